use crate::config::{CameraConfig, ProjectionConfig};
use crate::math::{Mat4, Vec3};

use super::{camera_controller::CameraController, fly_camera::FlyCamera};

/// Perspective projection parameters; the aspect ratio follows the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(config: ProjectionConfig, width: u32, height: u32) -> Self {
        let mut projection = Self {
            fov_y: config.fov_y,
            aspect: 1.0,
            near: config.near,
            far: config.far,
        };
        projection.resize(width, height);
        projection
    }

    /// Updates the aspect ratio. Zero-sized viewports (minimized windows) keep
    /// the previous ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect, self.near, self.far)
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    pub view: Mat4,
    pub proj: Mat4,

    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view: Mat4::identity(),
            proj: Mat4::identity(),
            view_position: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Owns the camera, its input source and the projection, and produces the
/// per-frame camera uniforms.
pub struct CameraManager {
    pub camera: FlyCamera,
    pub controller: CameraController,
    pub projection: Projection,
}

impl CameraManager {
    pub fn new(camera: CameraConfig, projection: ProjectionConfig, width: u32, height: u32) -> Self {
        Self {
            camera: FlyCamera::new(camera),
            controller: CameraController::new(camera.invert_mouse_y),
            projection: Projection::new(projection, width, height),
        }
    }

    /// Advances the camera by one tick using the controller's input state.
    pub fn update(&mut self) {
        self.camera.update(&mut self.controller);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.projection.matrix() * self.camera.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        let Vec3 { x, y, z } = self.camera.position();
        CameraUniform {
            view: self.camera.view_matrix(),
            proj: self.projection.matrix(),
            view_position: [x, y, z, 1.0],
        }
    }
}
