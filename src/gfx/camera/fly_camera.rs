//! # Free-Fly Camera
//!
//! A single continuously-updated pose driven by mouse look and directional
//! keys. Orientation is stored as yaw/pitch in degrees; the `forward` and
//! `right` basis vectors are derived from them and never set directly.

use crate::config::CameraConfig;
use crate::math::{Mat4, Vec3};

use super::camera_controller::{InputSource, KeyState};

/// Lower pitch bound in degrees.
pub const MIN_PITCH: f32 = -89.0;
/// Upper pitch bound in degrees.
///
/// Keeping pitch away from +-90 keeps `forward` from becoming parallel to the
/// world up axis, where `right = forward x up` collapses towards zero. This
/// clamp is the only guard against that singularity.
pub const MAX_PITCH: f32 = 89.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    forward: Vec3,
    right: Vec3,
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl FlyCamera {
    pub fn new(config: CameraConfig) -> Self {
        let mut camera = Self {
            position: config.position,
            yaw: config.yaw,
            pitch: config.pitch.clamp(MIN_PITCH, MAX_PITCH),
            forward: Vec3::ZERO, // derived in update_vectors()
            right: Vec3::ZERO,
            move_speed: config.move_speed,
            mouse_sensitivity: config.mouse_sensitivity,
        };
        camera.update_vectors();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, always within `[MIN_PITCH, MAX_PITCH]`.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Unit viewing direction.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Unit vector pointing to the right of the viewing direction.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Applies a mouse delta: yaw and pitch grow by `delta * sensitivity`.
    pub fn handle_mouse(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch = (self.pitch + dy * self.mouse_sensitivity).clamp(MIN_PITCH, MAX_PITCH);
        self.update_vectors();
    }

    /// Moves along `forward`/`right` for every active key.
    ///
    /// Active directions are summed without normalization, so holding two
    /// perpendicular keys moves up to sqrt(2) times faster.
    pub fn handle_keyboard(&mut self, keys: &KeyState) {
        let f = self.forward;
        let r = self.right;
        let speed = self.move_speed;

        if keys.forward {
            self.position += f * speed;
        }
        if keys.backward {
            self.position += f * -speed;
        }
        if keys.left {
            self.position += r * -speed;
        }
        if keys.right {
            self.position += r * speed;
        }
    }

    /// Runs one tick against an input source: look first, then move.
    pub fn update<I: InputSource + ?Sized>(&mut self, input: &mut I) {
        let (dx, dy) = input.take_mouse_delta();
        if dx != 0.0 || dy != 0.0 {
            self.handle_mouse(dx, dy);
        }
        self.handle_keyboard(&input.key_state());
    }

    /// View matrix looking from the camera position along `forward`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.forward, Vec3::UP)
    }

    fn update_vectors(&mut self) {
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sp, cp) = self.pitch.to_radians().sin_cos();

        self.forward = Vec3::new(cy * cp, sp, sy * cp);
        self.right = self.forward.cross(Vec3::UP).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::Rng;

    fn assert_vec_eq(actual: Vec3, expected: Vec3) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-5);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-5);
        assert_abs_diff_eq!(actual.z, expected.z, epsilon = 1e-5);
    }

    fn camera_at(yaw: f32, pitch: f32) -> FlyCamera {
        FlyCamera::new(CameraConfig {
            position: Vec3::ZERO,
            yaw,
            pitch,
            ..CameraConfig::default()
        })
    }

    struct ScriptedInput {
        keys: KeyState,
        delta: (f32, f32),
    }

    impl InputSource for ScriptedInput {
        fn key_state(&self) -> KeyState {
            self.keys
        }

        fn take_mouse_delta(&mut self) -> (f32, f32) {
            std::mem::take(&mut self.delta)
        }
    }

    #[test]
    fn test_default_pose_looks_down_negative_z() {
        let camera = FlyCamera::default();
        assert_eq!(camera.position(), Vec3::new(0.0, 1.5, 6.0));
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
        assert_vec_eq(camera.forward(), Vec3::new(0.0, 0.0, -1.0));
        assert_vec_eq(camera.right(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_basis_is_orthonormal_over_all_angles() {
        let mut yaw = 0.0;
        while yaw < 360.0 {
            let mut pitch = MIN_PITCH;
            while pitch <= MAX_PITCH {
                let camera = camera_at(yaw, pitch);
                let (f, r) = (camera.forward(), camera.right());
                assert_abs_diff_eq!(f.length(), 1.0, epsilon = 1e-5);
                assert_abs_diff_eq!(r.length(), 1.0, epsilon = 1e-5);
                assert_abs_diff_eq!(f.dot(r), 0.0, epsilon = 1e-5);
                pitch += 7.0;
            }
            yaw += 5.0;
        }
    }

    #[test]
    fn test_right_stays_horizontal() {
        let camera = camera_at(33.0, 60.0);
        assert_abs_diff_eq!(camera.right().y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mouse_rotates_by_sensitivity() {
        let mut camera = FlyCamera::default();
        camera.handle_mouse(100.0, -50.0);
        assert_abs_diff_eq!(camera.yaw(), -80.0, epsilon = 1e-4);
        assert_abs_diff_eq!(camera.pitch(), -5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FlyCamera::default();
        camera.handle_mouse(0.0, 10_000.0);
        assert_eq!(camera.pitch(), MAX_PITCH);
        camera.handle_mouse(0.0, -20_000.0);
        assert_eq!(camera.pitch(), MIN_PITCH);
    }

    #[test]
    fn test_random_mouse_sequences_keep_pitch_in_range() {
        let mut rng = rand::rng();
        let mut camera = FlyCamera::default();

        for _ in 0..10_000 {
            let dx = rng.random_range(-500.0..500.0);
            let dy = rng.random_range(-500.0..500.0);
            camera.handle_mouse(dx, dy);

            assert!((MIN_PITCH..=MAX_PITCH).contains(&camera.pitch()));
            assert_abs_diff_eq!(camera.forward().length(), 1.0, epsilon = 1e-5);
            assert_abs_diff_eq!(camera.forward().dot(camera.right()), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_forward_key_moves_by_speed() {
        let mut camera = FlyCamera::default();
        let start = camera.position();
        camera.handle_keyboard(&KeyState {
            forward: true,
            ..KeyState::default()
        });
        assert_vec_eq(camera.position(), start + camera.forward() * camera.move_speed);
        assert_vec_eq(camera.position(), Vec3::new(0.0, 1.5, 5.95));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut camera = FlyCamera::default();
        let start = camera.position();
        camera.handle_keyboard(&KeyState {
            forward: true,
            backward: true,
            left: true,
            right: true,
        });
        assert_vec_eq(camera.position(), start);
    }

    #[test]
    fn test_diagonal_movement_is_not_normalized() {
        let mut camera = FlyCamera::default();
        let start = camera.position();
        camera.handle_keyboard(&KeyState {
            forward: true,
            right: true,
            ..KeyState::default()
        });
        let travelled = (camera.position() - start).length();
        assert_abs_diff_eq!(travelled, camera.move_speed * 2f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_update_applies_look_then_move() {
        let mut camera = camera_at(-90.0, 0.0);
        let mut input = ScriptedInput {
            keys: KeyState {
                forward: true,
                ..KeyState::default()
            },
            delta: (900.0, 0.0),
        };

        camera.update(&mut input);

        // yaw -90 + 90 = 0 degrees: forward is +X
        assert_vec_eq(camera.forward(), Vec3::new(1.0, 0.0, 0.0));
        assert_vec_eq(camera.position(), Vec3::new(camera.move_speed, 0.0, 0.0));

        // delta was consumed
        camera.update(&mut input);
        assert_abs_diff_eq!(camera.yaw(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_view_matrix_maps_position_to_origin() {
        let mut camera = FlyCamera::default();
        camera.handle_mouse(37.0, -12.0);
        let eye = camera.view_matrix().transform_point(camera.position());
        assert_vec_eq(eye, Vec3::ZERO);

        let ahead = camera
            .view_matrix()
            .transform_point(camera.position() + camera.forward() * 3.0);
        assert_vec_eq(ahead, Vec3::new(0.0, 0.0, -3.0));
    }
}
