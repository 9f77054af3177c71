//! # Scene Module
//!
//! The viewer's world: a flat list of [`Object`]s, the camera, and one point
//! light. There is no hierarchy; every object carries its own model matrix.
//!
//! - [`Scene`] - Objects, camera manager and light, advanced once per frame
//! - [`Object`] - A generated mesh with a model transform and a color
//! - [`Vertex3D`] - Interleaved position + normal vertex format

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawObject, Object, ObjectUniform};
pub use scene::Scene;
pub use vertex::Vertex3D;
