//! # 4x4 Matrices
//!
//! Column-major 4x4 matrices following the OpenGL conventions: right-handed
//! view space, clip-space depth in `[-1, 1]`, and `a * b` meaning "apply `b`,
//! then `a`".
//!
//! Every operation returns a new matrix. The element at row `r`, column `c`
//! lives at index `c * 4 + r` of the backing array, which is also the byte
//! layout the shaders expect.

use std::ops::Mul;

use super::{vec3::Vec3, MathError, SINGULARITY_EPSILON};

/// A 4x4 `f32` matrix stored column-major.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4 {
    m: [f32; 16],
}

#[rustfmt::skip]
const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn identity() -> Self {
        Self { m: IDENTITY }
    }

    /// Builds a matrix from 16 column-major elements.
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    pub const fn to_cols_array(&self) -> [f32; 16] {
        self.m
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.m
    }

    /// Element at `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[col * 4 + row]
    }

    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let m = &self.m;
        [
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
            [m[12], m[13], m[14], m[15]],
        ]
    }

    /// Post-multiplies by a translation: the offset is expressed in the basis
    /// of `self`, so existing rotation and scale are preserved.
    pub fn translate(self, t: Vec3) -> Mat4 {
        let m = &self.m;
        let mut r = self.m;
        for row in 0..4 {
            r[12 + row] = m[row] * t.x + m[4 + row] * t.y + m[8 + row] * t.z + m[12 + row];
        }
        Mat4 { m: r }
    }

    /// Post-multiplies by a rotation of `angle` radians about the X axis.
    pub fn rotate_x(self, angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let m = &self.m;
        let mut r = self.m;
        for row in 0..4 {
            let y = m[4 + row];
            let z = m[8 + row];
            r[4 + row] = y * c + z * s;
            r[8 + row] = z * c - y * s;
        }
        Mat4 { m: r }
    }

    /// Post-multiplies by a rotation of `angle` radians about the Y axis.
    pub fn rotate_y(self, angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let m = &self.m;
        let mut r = self.m;
        for row in 0..4 {
            let x = m[row];
            let z = m[8 + row];
            r[row] = x * c - z * s;
            r[8 + row] = x * s + z * c;
        }
        Mat4 { m: r }
    }

    /// Post-multiplies by a rotation of `angle` radians about the Z axis.
    pub fn rotate_z(self, angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let m = &self.m;
        let mut r = self.m;
        for row in 0..4 {
            let x = m[row];
            let y = m[4 + row];
            r[row] = x * c + y * s;
            r[4 + row] = y * c - x * s;
        }
        Mat4 { m: r }
    }

    /// Multiplies the diagonal elements `(0,0)`, `(1,1)` and `(2,2)` by the
    /// per-axis factors in `s`. Every other element, including the
    /// off-diagonal terms of a rotation, is copied unchanged.
    ///
    /// On an axis-aligned matrix this is a post-multiplied scale; on a rotated
    /// one it is not, so scale before rotating when composing transforms.
    pub fn scale(self, s: Vec3) -> Mat4 {
        let mut r = self.m;
        r[0] *= s.x;
        r[5] *= s.y;
        r[10] *= s.z;
        Mat4 { m: r }
    }

    /// Standard matrix product; the result applies `rhs` first, then `self`.
    pub fn multiply(self, rhs: Mat4) -> Mat4 {
        let a = &self.m;
        let b = &rhs.m;
        let mut r = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                r[col * 4 + row] = (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum();
            }
        }
        Mat4 { m: r }
    }

    pub fn transpose(self) -> Mat4 {
        let mut r = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                r[row * 4 + col] = self.m[col * 4 + row];
            }
        }
        Mat4 { m: r }
    }

    /// Right-handed perspective projection with OpenGL depth range `[-1, 1]`.
    ///
    /// `fov_y` is in radians. Requires `0 < near < far`; this is not checked
    /// and `near == far` yields non-finite elements.
    #[rustfmt::skip]
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);
        Mat4::from_cols_array([
            f / aspect, 0.0, 0.0,                    0.0,
            0.0,        f,   0.0,                    0.0,
            0.0,        0.0, (far + near) * nf,     -1.0,
            0.0,        0.0, 2.0 * far * near * nf,  0.0,
        ])
    }

    /// Orthographic projection with OpenGL depth range `[-1, 1]`.
    #[rustfmt::skip]
    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
        let lr = 1.0 / (left - right);
        let bt = 1.0 / (bottom - top);
        let nf = 1.0 / (near - far);
        Mat4::from_cols_array([
            -2.0 * lr,            0.0,                  0.0,                 0.0,
            0.0,                  -2.0 * bt,            0.0,                 0.0,
            0.0,                  0.0,                  2.0 * nf,            0.0,
            (left + right) * lr,  (top + bottom) * bt,  (far + near) * nf,   1.0,
        ])
    }

    /// View matrix looking from `eye` towards `target`.
    ///
    /// The camera basis is `forward = normalize(target - eye)`,
    /// `right = normalize(forward x up)` and `up' = right x forward`. An `up`
    /// parallel to the viewing direction leaves `right` undefined (NaN).
    #[rustfmt::skip]
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let f = (target - eye).normalize();
        let r = f.cross(up).normalize();
        let u = r.cross(f);
        Mat4::from_cols_array([
            r.x,          u.x,          -f.x,        0.0,
            r.y,          u.y,          -f.y,        0.0,
            r.z,          u.z,          -f.z,        0.0,
            -r.dot(eye),  -u.dot(eye),  f.dot(eye),  1.0,
        ])
    }

    /// Determinant of the upper-left 3x3 block.
    pub fn determinant3(&self) -> f32 {
        let m = &self.m;
        m[0] * (m[5] * m[10] - m[6] * m[9]) - m[1] * (m[4] * m[10] - m[6] * m[8])
            + m[2] * (m[4] * m[9] - m[5] * m[8])
    }

    /// Inverts an affine matrix (rotation, scale and translation only).
    ///
    /// The upper-left 3x3 block is inverted through its adjugate and the
    /// translation is inverted separately; the bottom row is assumed to be
    /// `(0, 0, 0, 1)`. Projective matrices such as [`Mat4::perspective`] are
    /// outside this routine's domain and give meaningless results.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::SingularMatrix`] when the 3x3 determinant is
    /// smaller than [`SINGULARITY_EPSILON`] in magnitude.
    pub fn inverse(&self) -> Result<Mat4, MathError> {
        let m = &self.m;
        let det = self.determinant3();
        if det.abs() < SINGULARITY_EPSILON {
            return Err(MathError::SingularMatrix { determinant: det });
        }
        let inv_det = 1.0 / det;

        let mut inv = [0.0; 16];
        inv[0] = (m[5] * m[10] - m[6] * m[9]) * inv_det;
        inv[1] = (m[2] * m[9] - m[1] * m[10]) * inv_det;
        inv[2] = (m[1] * m[6] - m[2] * m[5]) * inv_det;

        inv[4] = (m[6] * m[8] - m[4] * m[10]) * inv_det;
        inv[5] = (m[0] * m[10] - m[2] * m[8]) * inv_det;
        inv[6] = (m[2] * m[4] - m[0] * m[6]) * inv_det;

        inv[8] = (m[4] * m[9] - m[5] * m[8]) * inv_det;
        inv[9] = (m[1] * m[8] - m[0] * m[9]) * inv_det;
        inv[10] = (m[0] * m[5] - m[1] * m[4]) * inv_det;

        inv[12] = -(inv[0] * m[12] + inv[4] * m[13] + inv[8] * m[14]);
        inv[13] = -(inv[1] * m[12] + inv[5] * m[13] + inv[9] * m[14]);
        inv[14] = -(inv[2] * m[12] + inv[6] * m[13] + inv[10] * m[14]);
        inv[15] = 1.0;

        Ok(Mat4 { m: inv })
    }

    /// Like [`Mat4::inverse`], but substitutes the identity for singular input
    /// and logs a warning instead of failing.
    pub fn inverse_or_identity(&self) -> Mat4 {
        match self.inverse() {
            Ok(inv) => inv,
            Err(err) => {
                log::warn!("{err}; substituting identity");
                Mat4::identity()
            }
        }
    }

    /// Multiplies a homogeneous column vector.
    pub fn transform_vec4(&self, v: [f32; 4]) -> [f32; 4] {
        let m = &self.m;
        let mut r = [0.0; 4];
        for (row, out) in r.iter_mut().enumerate() {
            *out = m[row] * v[0] + m[4 + row] * v[1] + m[8 + row] * v[2] + m[12 + row] * v[3];
        }
        r
    }

    /// Transforms a point (`w = 1`) without a perspective divide.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let [x, y, z, _] = self.transform_vec4([p.x, p.y, p.z, 1.0]);
        Vec3::new(x, y, z)
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(rhs)
    }
}

impl From<cgmath::Matrix4<f32>> for Mat4 {
    fn from(m: cgmath::Matrix4<f32>) -> Self {
        let cols: &[f32; 16] = m.as_ref();
        Mat4::from_cols_array(*cols)
    }
}

impl From<Mat4> for cgmath::Matrix4<f32> {
    fn from(m: Mat4) -> Self {
        m.to_cols_array_2d().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::Rng;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_mat_eq(actual: Mat4, expected: Mat4, epsilon: f32) {
        for (i, (a, e)) in actual.as_slice().iter().zip(expected.as_slice()).enumerate() {
            assert!(
                (a - e).abs() <= epsilon,
                "element {i} differs: {a} vs {e}\nactual:   {actual:?}\nexpected: {expected:?}"
            );
        }
    }

    fn sample_matrix() -> Mat4 {
        #[rustfmt::skip]
        let m = Mat4::from_cols_array([
            1.0,  2.0,  3.0,  4.0,
            5.0,  6.0,  7.0,  8.0,
            9.0,  10.0, 11.0, 12.0,
            13.0, 14.0, 15.0, 16.0,
        ]);
        m
    }

    fn sample_affine() -> Mat4 {
        Mat4::identity()
            .translate(Vec3::new(1.0, -2.0, 3.5))
            .rotate_y(0.7)
            .rotate_x(-0.3)
            .scale(Vec3::new(2.0, 0.5, 1.5))
    }

    #[test]
    fn test_identity_law() {
        let m = sample_matrix();
        assert_eq!(Mat4::identity() * m, m);
        assert_eq!(m * Mat4::identity(), m);
    }

    #[test]
    fn test_multiply_is_column_major() {
        let t = Mat4::identity().translate(Vec3::new(1.0, 0.0, 0.0));
        let s = Mat4::identity().scale(Vec3::new(2.0, 2.0, 2.0));

        // scale first, then translate
        let p = (t * s).transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(3.0, 2.0, 2.0));

        // translate first, then scale
        let p = (s * t).transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn test_multiply_matches_cgmath() {
        let a = sample_affine();
        let b = sample_matrix();
        let expected: Mat4 =
            (cgmath::Matrix4::from(a) * cgmath::Matrix4::from(b)).into();
        assert_mat_eq(a * b, expected, 1e-4);
    }

    #[test]
    fn test_translate_writes_last_column() {
        let m = Mat4::identity().translate(Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(&m.as_slice()[12..16], &[3.0, 4.0, 5.0, 1.0]);
    }

    #[test]
    fn test_translate_preserves_existing_basis() {
        let m = Mat4::identity()
            .scale(Vec3::new(2.0, 3.0, 4.0))
            .translate(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(&m.as_slice()[12..16], &[2.0, 3.0, 4.0, 1.0]);
        assert_eq!(m.get(0, 0), 2.0);
        assert_eq!(m.get(1, 1), 3.0);
        assert_eq!(m.get(2, 2), 4.0);
    }

    #[test]
    fn test_rotations_match_cgmath() {
        let base = Mat4::identity().translate(Vec3::new(0.5, 1.0, -2.0));
        let base_cg = cgmath::Matrix4::from(base);
        let angle = 0.9;

        let expected: Mat4 = (base_cg * cgmath::Matrix4::from_angle_x(cgmath::Rad(angle))).into();
        assert_mat_eq(base.rotate_x(angle), expected, 1e-6);

        let expected: Mat4 = (base_cg * cgmath::Matrix4::from_angle_y(cgmath::Rad(angle))).into();
        assert_mat_eq(base.rotate_y(angle), expected, 1e-6);

        let expected: Mat4 = (base_cg * cgmath::Matrix4::from_angle_z(cgmath::Rad(angle))).into();
        assert_mat_eq(base.rotate_z(angle), expected, 1e-6);
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        let p = Mat4::identity()
            .rotate_y(FRAC_PI_2)
            .transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_scale_identity_touches_only_diagonal() {
        let m = Mat4::identity().scale(Vec3::new(2.0, 3.0, 4.0));
        #[rustfmt::skip]
        let expected = Mat4::from_cols_array([
            2.0, 0.0, 0.0, 0.0,
            0.0, 3.0, 0.0, 0.0,
            0.0, 0.0, 4.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        assert_eq!(m, expected);
    }

    #[test]
    fn test_scale_leaves_rotation_terms_alone() {
        let rotated = Mat4::identity().rotate_y(0.7);
        let m = rotated.scale(Vec3::new(2.0, 3.0, 4.0));
        let (s, c) = 0.7f32.sin_cos();

        assert_abs_diff_eq!(m.get(0, 0), 2.0 * c, epsilon = 1e-6);
        assert_abs_diff_eq!(m.get(1, 1), 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.get(2, 2), 4.0 * c, epsilon = 1e-6);
        for i in (0..16).filter(|i| ![0, 5, 10].contains(i)) {
            assert_eq!(m.as_slice()[i], rotated.as_slice()[i], "element {i} changed");
        }
        assert_abs_diff_eq!(m.get(2, 0), -s, epsilon = 1e-6);
    }

    #[test]
    fn test_operations_return_new_values() {
        let m = Mat4::identity();
        let _ = m.translate(Vec3::new(1.0, 2.0, 3.0)).rotate_x(1.0).scale(Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(m, Mat4::identity());
    }

    #[test]
    fn test_inverse_of_translation_round_trips() {
        let m = Mat4::identity().translate(Vec3::new(3.0, 4.0, 5.0));
        let inv = m.inverse().unwrap();
        assert_mat_eq(inv * m, Mat4::identity(), 1e-6);
        assert_mat_eq(m * inv, Mat4::identity(), 1e-6);
    }

    #[test]
    fn test_inverse_of_affine_composite_round_trips() {
        let m = sample_affine();
        let inv = m.inverse().unwrap();
        assert_mat_eq(m * inv, Mat4::identity(), 1e-5);
        assert_mat_eq(inv * m, Mat4::identity(), 1e-5);
    }

    #[test]
    fn test_random_affine_composites_round_trip() {
        let mut rng = rand::rng();

        for _ in 0..1_000 {
            let translation = Vec3::new(
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
            );
            let scale = Vec3::new(
                rng.random_range(0.5..2.0),
                rng.random_range(0.5..2.0),
                rng.random_range(0.5..2.0),
            );
            let m = Mat4::identity()
                .translate(translation)
                .scale(scale)
                .rotate_x(rng.random_range(-PI..PI))
                .rotate_y(rng.random_range(-PI..PI))
                .rotate_z(rng.random_range(-PI..PI));

            let inv = m.inverse().unwrap();
            assert_mat_eq(inv * m, Mat4::identity(), 1e-4);
            assert_mat_eq(m * inv, Mat4::identity(), 1e-4);
        }
    }

    #[test]
    fn test_inverse_matches_cgmath_for_affine() {
        use cgmath::SquareMatrix;

        let m = sample_affine();
        let expected: Mat4 = cgmath::Matrix4::from(m).invert().unwrap().into();
        assert_mat_eq(m.inverse().unwrap(), expected, 1e-5);
    }

    #[test]
    fn test_inverse_of_singular_block_is_error() {
        let mut cols = IDENTITY;
        for i in [0, 1, 2, 4, 5, 6, 8, 9, 10] {
            cols[i] = 0.0;
        }
        let singular = Mat4::from_cols_array(cols);

        match singular.inverse() {
            Err(MathError::SingularMatrix { determinant }) => assert_eq!(determinant, 0.0),
            other => panic!("expected singular matrix error, got {other:?}"),
        }
        assert_eq!(singular.inverse_or_identity(), Mat4::identity());
    }

    #[test]
    fn test_inverse_rejects_near_zero_scale() {
        let m = Mat4::identity().scale(Vec3::new(1e-3, 1e-3, 1e-3));
        assert!(m.inverse().is_err());

        let m = Mat4::identity().scale(Vec3::new(1e-2, 1e-2, 1e-2));
        assert!(m.inverse().is_ok());
    }

    #[test]
    fn test_look_at_down_negative_z() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP);

        // third row is the camera-space Z basis
        assert_abs_diff_eq!(view.get(2, 0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(view.get(2, 1), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(view.get(2, 2), 1.0, epsilon = 1e-6);

        assert_abs_diff_eq!(view.get(0, 3), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(view.get(1, 3), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(view.get(2, 3), -5.0, epsilon = 1e-6);

        let target = view.transform_point(Vec3::ZERO);
        assert_abs_diff_eq!(target.z, -5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_look_at_matches_cgmath() {
        let eye = Vec3::new(2.0, 3.0, -4.0);
        let target = Vec3::new(-1.0, 0.5, 2.0);
        let expected: Mat4 = cgmath::Matrix4::look_at_rh(
            cgmath::Point3::new(eye.x, eye.y, eye.z),
            cgmath::Point3::new(target.x, target.y, target.z),
            cgmath::Vector3::unit_y(),
        )
        .into();
        assert_mat_eq(Mat4::look_at(eye, target, Vec3::UP), expected, 1e-5);
    }

    #[test]
    fn test_look_at_parallel_up_degenerates() {
        let view = Mat4::look_at(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0), Vec3::UP);
        assert!(view.as_slice().iter().any(|v| v.is_nan()));
    }

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let proj = Mat4::perspective(FRAC_PI_2, 1.0, 1.0, 10.0);

        let near = proj.transform_vec4([0.0, 0.0, -1.0, 1.0]);
        assert_abs_diff_eq!(near[2] / near[3], -1.0, epsilon = 1e-6);

        let far = proj.transform_vec4([0.0, 0.0, -10.0, 1.0]);
        assert_abs_diff_eq!(far[2] / far[3], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_matches_cgmath() {
        let expected: Mat4 = cgmath::perspective(cgmath::Rad(FRAC_PI_4), 1.5, 0.1, 100.0).into();
        assert_mat_eq(Mat4::perspective(FRAC_PI_4, 1.5, 0.1, 100.0), expected, 1e-5);
    }

    #[test]
    fn test_perspective_equal_planes_is_not_finite() {
        let proj = Mat4::perspective(FRAC_PI_4, 1.0, 5.0, 5.0);
        assert!(proj.as_slice().iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn test_ortho_maps_box_to_clip_cube() {
        let proj = Mat4::ortho(-2.0, 2.0, -1.0, 1.0, 0.5, 10.0);

        let corner = proj.transform_vec4([-2.0, -1.0, -0.5, 1.0]);
        assert_abs_diff_eq!(corner[0], -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(corner[1], -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(corner[2], -1.0, epsilon = 1e-6);

        let corner = proj.transform_vec4([2.0, 1.0, -10.0, 1.0]);
        assert_abs_diff_eq!(corner[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(corner[1], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(corner[2], 1.0, epsilon = 1e-6);
        assert_eq!(corner[3], 1.0);
    }

    #[test]
    fn test_ortho_matches_cgmath() {
        let expected: Mat4 = cgmath::ortho(-3.0, 5.0, -2.0, 4.0, 0.1, 50.0).into();
        assert_mat_eq(Mat4::ortho(-3.0, 5.0, -2.0, 4.0, 0.1, 50.0), expected, 1e-6);
    }

    #[test]
    fn test_transpose_swaps_rows_and_columns() {
        let m = sample_matrix();
        let t = m.transpose();
        assert_eq!(t.get(0, 3), m.get(3, 0));
        assert_eq!(t.get(2, 1), m.get(1, 2));
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_byte_layout_is_column_major_f32() {
        let m = Mat4::identity().translate(Vec3::new(7.0, 8.0, 9.0));
        let bytes: &[u8] = bytemuck::bytes_of(&m);
        assert_eq!(bytes.len(), 64);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(&floats[12..15], &[7.0, 8.0, 9.0]);
    }
}
