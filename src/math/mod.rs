//! # Matrix/Vector Math
//!
//! A deliberately small math library used to build the view, projection and
//! model transforms uploaded to the shaders.
//!
//! - [`Vec3`] - immutable 3-component vector
//! - [`Mat4`] - immutable column-major 4x4 matrix (OpenGL conventions)
//!
//! Both types are plain values: every operation returns a new value and no
//! input is ever mutated. Conversions to and from `cgmath` types are provided
//! for interoperability.

pub mod mat4;
pub mod vec3;

pub use mat4::Mat4;
pub use vec3::Vec3;

/// Smallest upper-left 3x3 determinant magnitude [`Mat4::inverse`] accepts.
pub const SINGULARITY_EPSILON: f32 = 1e-8;

/// Failures reported by the math library.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("matrix is singular and cannot be inverted (determinant {determinant:e})")]
    SingularMatrix { determinant: f32 },
}
