//! # Viewer Configuration
//!
//! Plain-struct settings for the window, camera, projection and light. The
//! [`Default`] values reproduce the reference viewer; [`ViewerConfig::validate`]
//! rejects values that would make the camera or projection degenerate.

use std::f32::consts::{FRAC_PI_4, PI};

use crate::gfx::camera::fly_camera::{MAX_PITCH, MIN_PITCH};
use crate::math::Vec3;

/// Reasons a [`ViewerConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("window size must be non-zero, got {width}x{height}")]
    EmptyWindow { width: u32, height: u32 },
    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    ClipPlanes { near: f32, far: f32 },
    #[error("vertical field of view must lie in (0, pi) radians, got {0}")]
    FieldOfView(f32),
    #[error("initial pitch {0} is outside [-89, 89] degrees")]
    Pitch(f32),
    #[error("{name} must be finite and non-negative, got {value}")]
    NegativeRate { name: &'static str, value: f32 },
}

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "flyview".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

/// Initial pose and input rates of the free-fly camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Degrees.
    pub yaw: f32,
    /// Degrees, clamped to `[-89, 89]` by the camera.
    pub pitch: f32,
    /// World units moved per tick while a movement key is held.
    pub move_speed: f32,
    /// Degrees of rotation per unit of mouse delta.
    pub mouse_sensitivity: f32,
    /// Flip the sign of vertical mouse deltas before they reach the camera.
    pub invert_mouse_y: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 6.0),
            yaw: -90.0,
            pitch: 0.0,
            move_speed: 0.05,
            mouse_sensitivity: 0.1,
            invert_mouse_y: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y: FRAC_PI_4,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// The single point light of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightConfig {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub ambient: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(4.0, 6.0, 4.0),
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            ambient: 0.15,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub light: LightConfig,
    pub clear_color: ClearColor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor(pub [f64; 4]);

impl Default for ClearColor {
    fn default() -> Self {
        Self([0.05, 0.06, 0.08, 1.0])
    }
}

impl ViewerConfig {
    /// Checks the preconditions the matrix constructors leave unchecked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let WindowConfig { width, height, .. } = self.window;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyWindow { width, height });
        }

        let ProjectionConfig { fov_y, near, far } = self.projection;
        if !(near > 0.0 && near < far && far.is_finite()) {
            return Err(ConfigError::ClipPlanes { near, far });
        }
        if !(fov_y > 0.0 && fov_y < PI) {
            return Err(ConfigError::FieldOfView(fov_y));
        }

        if !(MIN_PITCH..=MAX_PITCH).contains(&self.camera.pitch) {
            return Err(ConfigError::Pitch(self.camera.pitch));
        }
        for (name, value) in [
            ("move_speed", self.camera.move_speed),
            ("mouse_sensitivity", self.camera.mouse_sensitivity),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NegativeRate { name, value });
            }
        }

        Ok(())
    }
}
