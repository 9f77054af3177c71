use wgpu::util::DeviceExt;

use crate::gfx::geometry::GeometryData;
use crate::math::{Mat4, Vec3};
use crate::wgpu_utils::UniformBuffer;

/// Per-object uniform block, bound to slot 1.
///
/// MUST match the `ObjectData` struct in `shader.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: Mat4,
    /// Transpose of the inverse model matrix, for transforming normals
    pub normal_matrix: Mat4,
    pub color: [f32; 4],
}

/// GPU-side copy of an object: mesh buffers plus its uniform block
pub struct ObjectGpuResources {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform: UniformBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
}

/// A mesh placed in the world with a color and an optional constant spin
pub struct Object {
    pub name: String,
    pub geometry: GeometryData,
    /// Placement before spin is applied
    pub transform: Mat4,
    pub color: [f32; 3],
    /// Spin rate about the local X and Y axes, radians per second
    pub spin: (f32, f32),
    gpu_resources: Option<ObjectGpuResources>, // None until init_gpu_resources is called
    singular_warned: bool,
}

impl Object {
    /// Create a new Object with identity transformation
    pub fn new(name: impl Into<String>, geometry: GeometryData) -> Self {
        Self {
            name: name.into(),
            geometry,
            transform: Mat4::identity(),
            color: [0.8, 0.8, 0.8],
            spin: (0.0, 0.0),
            gpu_resources: None,
            singular_warned: false,
        }
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_spin(mut self, x: f32, y: f32) -> Self {
        self.spin = (x, y);
        self
    }

    /// Apply translation (composed after the existing transform)
    pub fn translate(mut self, translation: Vec3) -> Self {
        self.transform = self.transform.translate(translation);
        self
    }

    pub fn rotate_x(mut self, angle: f32) -> Self {
        self.transform = self.transform.rotate_x(angle);
        self
    }

    pub fn rotate_y(mut self, angle: f32) -> Self {
        self.transform = self.transform.rotate_y(angle);
        self
    }

    pub fn rotate_z(mut self, angle: f32) -> Self {
        self.transform = self.transform.rotate_z(angle);
        self
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.transform = self.transform.scale(scale);
        self
    }

    /// Model matrix at `time` seconds
    pub fn model_matrix(&self, time: f32) -> Mat4 {
        let (spin_x, spin_y) = self.spin;
        self.transform
            .rotate_y(spin_y * time)
            .rotate_x(spin_x * time)
    }

    /// Uniform block at `time`. A singular model gets an identity normal matrix.
    pub fn uniform(&self, time: f32) -> ObjectUniform {
        let model = self.model_matrix(time);
        self.pack_uniform(model, model.inverse().ok())
    }

    /// Like [`Object::uniform`], but warns the first time the model turns out
    /// to be singular instead of failing silently.
    fn frame_uniform(&mut self, time: f32) -> ObjectUniform {
        let model = self.model_matrix(time);
        let inverse = match model.inverse() {
            Ok(inverse) => Some(inverse),
            Err(err) => {
                if !self.singular_warned {
                    log::warn!("object '{}': {err}; using identity normal matrix", self.name);
                    self.singular_warned = true;
                }
                None
            }
        };
        self.pack_uniform(model, inverse)
    }

    fn pack_uniform(&self, model: Mat4, inverse: Option<Mat4>) -> ObjectUniform {
        let [r, g, b] = self.color;
        ObjectUniform {
            model,
            normal_matrix: inverse.unwrap_or_default().transpose(),
            color: [r, g, b, 1.0],
        }
    }

    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) {
        let vertices = self.geometry.to_vertices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", self.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", self.name)),
            contents: bytemuck::cast_slice(&self.geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform = UniformBuffer::new_with_data(device, &self.uniform(0.0));
        let bind_group = uniform.create_bind_group(device, layout);

        log::debug!(
            "uploaded '{}': {} vertices, {} triangles",
            self.name,
            self.geometry.vertex_count(),
            self.geometry.triangle_count()
        );

        self.gpu_resources = Some(ObjectGpuResources {
            vertex_buffer,
            index_buffer,
            index_count: self.geometry.indices.len() as u32,
            uniform,
            bind_group,
        });
    }

    /// Sync the model matrix for `time` to the GPU if resources exist
    pub fn update_gpu(&mut self, queue: &wgpu::Queue, time: f32) {
        if self.gpu_resources.is_none() {
            return;
        }
        let uniform = self.frame_uniform(time);
        if let Some(gpu) = self.gpu_resources.as_mut() {
            gpu.uniform.update_content(queue, uniform);
        }
    }

    pub fn has_gpu_resources(&self) -> bool {
        self.gpu_resources.is_some()
    }
}

pub trait DrawObject<'a> {
    fn draw_object(&mut self, object: &'a Object, slot: u32);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_object(&mut self, object: &'b Object, slot: u32) {
        let Some(gpu) = object.gpu_resources.as_ref() else {
            return; // Skip drawing if not uploaded
        };

        self.set_bind_group(slot, &gpu.bind_group, &[]);
        self.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        self.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..gpu.index_count, 0, 0..1);
    }
}
