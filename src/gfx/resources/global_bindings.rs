//! Global uniform bindings for camera and lighting data
//!
//! Everything here is shared by all objects in a frame and bound to slot 0
//! of the render pipeline.

use crate::{
    config::LightConfig,
    gfx::camera::camera_utils::CameraUniform,
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in `shader.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    camera: CameraUniform,
    /// xyz position, w unused
    light_position: [f32; 4],
    /// rgb color, w intensity
    light_color: [f32; 4],
    /// x ambient term, y elapsed seconds
    params: [f32; 4],
}

impl GlobalUBOContent {
    pub fn new(camera: CameraUniform, light: &LightConfig, time: f32) -> Self {
        let [r, g, b] = light.color;
        let p = light.position;
        Self {
            camera,
            light_position: [p.x, p.y, p.z, 1.0],
            light_color: [r, g, b, light.intensity],
            params: [light.ambient, time, 0.0, 0.0],
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Owns the global uniform buffer and its bind group
pub struct GlobalBindings {
    ubo: GlobalUBO,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let ubo = GlobalUBO::new(device);
        let bind_group_layout = binding_types::single_uniform_layout(device, "Globals Bind Group Layout");
        let bind_group = ubo.create_bind_group(device, &bind_group_layout);

        GlobalBindings {
            ubo,
            bind_group_layout,
            bind_group,
        }
    }

    /// Should be called once per frame before drawing
    pub fn update(&mut self, queue: &wgpu::Queue, content: GlobalUBOContent) {
        self.ubo.update_content(queue, content);
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
