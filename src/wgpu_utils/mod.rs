//! WGPU utility functions and helpers
//!
//! Typed uniform buffers and binding type shorthands.

pub mod binding_types;
pub mod uniform_buffer;

// Re-export main types
pub use uniform_buffer::UniformBuffer;
