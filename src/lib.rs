// src/lib.rs
//! flyview
//!
//! A small 3D viewer built on wgpu and winit: a free-fly yaw/pitch camera,
//! a column-major 4x4 matrix and vector library, and a handful of
//! procedurally generated primitives lit by a single point light.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod math;
pub mod prelude;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ViewerApp;
pub use error::ViewerError;

/// Creates a viewer with the default configuration
pub fn default() -> Result<ViewerApp, ViewerError> {
    ViewerApp::new(config::ViewerConfig::default())
}
