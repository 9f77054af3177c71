//! # flyview Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use flyview::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     let mut app = flyview::default()?;
//!     app.scene_mut().add_object(
//!         Object::new("pillar", generate_cylinder(16))
//!             .translate(Vec3::new(0.0, 0.0, -4.0))
//!             .scale(Vec3::new(0.3, 2.0, 0.3)),
//!     );
//!     app.run()
//! }
//! ```

// Re-export core application types
pub use crate::app::ViewerApp;
pub use crate::config::{CameraConfig, LightConfig, ProjectionConfig, ViewerConfig};
pub use crate::default;
pub use crate::error::ViewerError;

// Math
pub use crate::math::{Mat4, MathError, Vec3};

// Camera, scene and geometry
pub use crate::gfx::camera::{CameraManager, FlyCamera, InputSource, KeyState};
pub use crate::gfx::geometry::{generate_cube, generate_cylinder, generate_sphere, GeometryData};
pub use crate::gfx::scene::{Object, Scene};
