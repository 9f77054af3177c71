// src/gfx/resources/mod.rs
//! GPU resource management
//!
//! Depth textures and the global (per-frame) uniform bindings.

pub mod global_bindings;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUBOContent};
pub use texture_resource::TextureResource;
