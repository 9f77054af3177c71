use std::f32::consts::FRAC_PI_4;

use crate::config::{LightConfig, ViewerConfig};
use crate::gfx::{
    camera::camera_utils::CameraManager,
    geometry::{generate_cube, generate_cylinder, generate_sphere},
    resources::GlobalUBOContent,
};
use crate::math::Vec3;

use super::object::Object;

/// Flat list of objects plus the camera and the single point light
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub light: LightConfig,
    time: f32,
}

impl Scene {
    /// Creates an empty scene with the given camera manager
    pub fn new(camera_manager: CameraManager, light: LightConfig) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            light,
            time: 0.0,
        }
    }

    /// The demo scene: a cube, a sphere and a cylinder side by side
    pub fn with_default_objects(config: &ViewerConfig, width: u32, height: u32) -> Self {
        let camera_manager = CameraManager::new(config.camera, config.projection, width, height);
        let mut scene = Self::new(camera_manager, config.light);

        scene.add_object(
            Object::new("cube", generate_cube())
                .translate(Vec3::new(-3.0, 0.0, 0.0))
                .scale(Vec3::new(0.75, 0.75, 0.75))
                .rotate_y(FRAC_PI_4)
                .with_color([0.85, 0.35, 0.3])
                .with_spin(0.3, 0.6),
        );
        scene.add_object(
            Object::new("sphere", generate_sphere(32, 32)).with_color([0.3, 0.55, 0.9]),
        );
        scene.add_object(
            Object::new("cylinder", generate_cylinder(32))
                .translate(Vec3::new(3.0, 0.0, 0.0))
                .scale(Vec3::new(0.6, 1.0, 0.6))
                .with_color([0.35, 0.8, 0.45])
                .with_spin(0.5, 0.0),
        );

        scene
    }

    pub fn add_object(&mut self, object: Object) -> &mut Object {
        self.objects.push(object);
        let index = self.objects.len() - 1;
        &mut self.objects[index]
    }

    pub fn object(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|object| object.name == name)
    }

    /// Advances one tick: camera input first, then the animation clock
    pub fn update(&mut self, delta_time: f32) {
        self.camera_manager.update();
        self.time += delta_time;
    }

    /// Seconds of animation time elapsed
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn global_uniform(&self) -> GlobalUBOContent {
        GlobalUBOContent::new(self.camera_manager.uniform(), &self.light, self.time)
    }

    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) {
        for object in &mut self.objects {
            object.init_gpu_resources(device, layout);
        }
        log::info!("uploaded {} objects", self.objects.len());
    }

    /// Pushes the current model matrices to the GPU
    pub fn sync_gpu(&mut self, queue: &wgpu::Queue) {
        let time = self.time;
        for object in &mut self.objects {
            object.update_gpu(queue, time);
        }
    }
}
