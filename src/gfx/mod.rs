//! # Graphics Module
//!
//! Everything between the math library and the window: the free-fly camera
//! and its input, procedural meshes, the scene, and the wgpu renderer.
//!
//! - **Camera** ([`camera`]) - Yaw/pitch fly camera driven by an input source
//! - **Geometry** ([`geometry`]) - Cube, UV sphere and cylinder generators
//! - **Scene** ([`scene`]) - Objects with model transforms plus one point light
//! - **Resources** ([`resources`]) - Global uniforms and the depth texture
//!
//! ```no_run
//! use flyview::config::ViewerConfig;
//! use flyview::gfx::scene::Scene;
//!
//! let config = ViewerConfig::default();
//! let mut scene = Scene::with_default_objects(&config, 1200, 800);
//! scene.update(1.0 / 60.0);
//! ```

pub mod camera;
pub mod geometry;
pub mod render_engine;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::fly_camera::FlyCamera;
pub use render_engine::RenderEngine;
