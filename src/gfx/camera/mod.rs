pub mod camera_controller;
pub mod camera_utils;
pub mod fly_camera;

// Re-export main types
pub use camera_controller::{CameraController, InputSource, KeyState};
pub use camera_utils::{CameraManager, CameraUniform, Projection};
pub use fly_camera::FlyCamera;
