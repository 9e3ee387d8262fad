//! 3x3 and 4x4 row-major matrices.
//!
//! Storage is `m[row][col]`; transforms compose with column vectors, so
//! `M * v` applies `M` to `v` and `A * B` applies `B` first. Inversion goes
//! through the classical cofactor/adjoint construction rather than Gaussian
//! elimination, which is exact enough for the small fixed sizes used here.
//! Inverting a singular matrix divides by a zero determinant and yields
//! non-finite entries; that is a caller error, not a guarded condition.

use std::ops::Mul;

use crate::math::vector::{Vec3, Vec4};

/// 3x3 row-major matrix.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat3 {
    /// Rows of the matrix, `m[row][col]`.
    pub m: [[f32; 3]; 3],
}

/// 4x4 row-major matrix.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4 {
    /// Rows of the matrix, `m[row][col]`.
    pub m: [[f32; 4]; 4],
}

impl Mat3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Matrix with the given columns.
    #[must_use]
    pub fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self {
            m: [
                [c0.x, c1.x, c2.x],
                [c0.y, c1.y, c2.y],
                [c0.z, c1.z, c2.z],
            ],
        }
    }

    /// The upper-left 3x3 block of a 4x4 matrix.
    #[must_use]
    pub fn from_mat4(m: Mat4) -> Self {
        Self {
            m: [
                [m.m[0][0], m.m[0][1], m.m[0][2]],
                [m.m[1][0], m.m[1][1], m.m[1][2]],
                [m.m[2][0], m.m[2][1], m.m[2][2]],
            ],
        }
    }

    /// Transposed copy.
    #[must_use]
    pub fn transpose(self) -> Self {
        let mut t = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                t[i][j] = self.m[j][i];
            }
        }
        Self { m: t }
    }

    /// Determinant, by cofactor expansion along the first row.
    #[must_use]
    pub fn determinant(self) -> f32 {
        let m = &self.m;
        let a = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]);
        let b = -m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0]);
        let c = m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
        a + b + c
    }

    // Matrix of cofactors (the transpose of the classical adjugate).
    fn cofactor_matrix(self) -> Self {
        let m = &self.m;
        Self {
            m: [
                [
                    m[1][1] * m[2][2] - m[2][1] * m[1][2],
                    -(m[1][0] * m[2][2] - m[2][0] * m[1][2]),
                    m[1][0] * m[2][1] - m[2][0] * m[1][1],
                ],
                [
                    -(m[0][1] * m[2][2] - m[2][1] * m[0][2]),
                    m[0][0] * m[2][2] - m[2][0] * m[0][2],
                    -(m[0][0] * m[2][1] - m[2][0] * m[0][1]),
                ],
                [
                    m[0][1] * m[1][2] - m[1][1] * m[0][2],
                    -(m[0][0] * m[1][2] - m[1][0] * m[0][2]),
                    m[0][0] * m[1][1] - m[1][0] * m[0][1],
                ],
            ],
        }
    }

    /// Transpose of the inverse, i.e. the cofactor matrix divided by the
    /// determinant. Non-finite for singular matrices.
    #[must_use]
    pub fn inverse_transpose(self) -> Self {
        self.cofactor_matrix() * (1.0 / self.determinant())
    }

    /// Inverse. Non-finite for singular matrices.
    #[must_use]
    pub fn inverse(self) -> Self {
        self.inverse_transpose().transpose()
    }
}

impl Mul for Mat3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        // Accumulator cells start at zero before the k-summation.
        let mut m = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    m[i][j] += self.m[i][k] * rhs.m[k][j];
                }
            }
        }
        Self { m }
    }
}

// Entry-wise scalar scale.
impl Mul<f32> for Mat3 {
    type Output = Self;

    fn mul(self, factor: f32) -> Self {
        let mut m = self.m;
        for row in &mut m {
            for entry in row {
                *entry *= factor;
            }
        }
        Self { m }
    }
}

// Column-vector transform: `result[i] = sum_j m[i][j] * v[j]`.
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3 {
            x: m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            y: m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            z: m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        }
    }
}

// Row-vector transform: `result[j] = sum_i v[i] * m[i][j]`.
impl Mul<Mat3> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: Mat3) -> Vec3 {
        let m = &rhs.m;
        Vec3 {
            x: self.x * m[0][0] + self.y * m[1][0] + self.z * m[2][0],
            y: self.x * m[0][1] + self.y * m[1][1] + self.z * m[2][1],
            z: self.x * m[0][2] + self.y * m[1][2] + self.z * m[2][2],
        }
    }
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Affine scale by `v` along the world axes.
    #[must_use]
    pub fn from_scale(v: Vec3) -> Self {
        Self {
            m: [
                [v.x, 0.0, 0.0, 0.0],
                [0.0, v.y, 0.0, 0.0],
                [0.0, 0.0, v.z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Affine translation by `v`.
    #[must_use]
    pub fn from_translation(v: Vec3) -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, v.x],
                [0.0, 1.0, 0.0, v.y],
                [0.0, 0.0, 1.0, v.z],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation by `angle` radians about an arbitrary `axis` (Rodrigues'
    /// formula). The axis need not be unit length; it is normalized here,
    /// so a zero axis produces a non-finite matrix.
    #[must_use]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();

        let n = axis.normalize();
        let (x2, y2, z2) = (n.x * n.x, n.y * n.y, n.z * n.z);
        let (xy, yz, zx) = (n.x * n.y, n.y * n.z, n.z * n.x);
        let (xs, ys, zs) = (n.x * s, n.y * s, n.z * s);

        Self {
            m: [
                [
                    x2 * (1.0 - c) + c,
                    xy * (1.0 - c) - zs,
                    zx * (1.0 - c) + ys,
                    0.0,
                ],
                [
                    xy * (1.0 - c) + zs,
                    y2 * (1.0 - c) + c,
                    yz * (1.0 - c) - xs,
                    0.0,
                ],
                [
                    zx * (1.0 - c) - ys,
                    yz * (1.0 - c) + xs,
                    z2 * (1.0 - c) + c,
                    0.0,
                ],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation by `angle` radians about the X axis.
    #[must_use]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (c, s) = (angle.cos(), angle.sin());
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, -s, 0.0],
                [0.0, s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation by `angle` radians about the Y axis.
    #[must_use]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (c, s) = (angle.cos(), angle.sin());
        Self {
            m: [
                [c, 0.0, s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [-s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation by `angle` radians about the Z axis.
    #[must_use]
    pub fn from_rotation_z(angle: f32) -> Self {
        let (c, s) = (angle.cos(), angle.sin());
        Self {
            m: [
                [c, -s, 0.0, 0.0],
                [s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Right-handed world-to-view matrix for an eye at `eye` looking at
    /// `target`, with `up` fixing the roll. The rows hold the view basis
    /// and the inverse translation.
    #[must_use]
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let z_axis = (eye - target).normalize();
        let x_axis = up.cross(z_axis).normalize();
        let y_axis = z_axis.cross(x_axis);

        Self {
            m: [
                [x_axis.x, x_axis.y, x_axis.z, -x_axis.dot(eye)],
                [y_axis.x, y_axis.y, y_axis.z, -y_axis.dot(eye)],
                [z_axis.x, z_axis.y, z_axis.z, -z_axis.dot(eye)],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Orthographic projection mapping the box `[left, right] x
    /// [bottom, top] x [-near, -far]` onto the `[-1, 1]` cube.
    #[must_use]
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let x_range = right - left;
        let y_range = top - bottom;
        let z_range = far - near;

        debug_assert!(x_range > 0.0 && y_range > 0.0 && z_range > 0.0);

        Self {
            m: [
                [2.0 / x_range, 0.0, 0.0, -(right + left) / x_range],
                [0.0, 2.0 / y_range, 0.0, -(top + bottom) / y_range],
                [0.0, 0.0, -2.0 / z_range, -(far + near) / z_range],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// General perspective frustum with the near plane window
    /// `[left, right] x [bottom, top]`, producing `[-1, 1]` clip depth.
    #[must_use]
    pub fn frustum(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let x_range = right - left;
        let y_range = top - bottom;
        let z_range = far - near;

        debug_assert!(near > 0.0 && far > 0.0);
        debug_assert!(x_range > 0.0 && y_range > 0.0 && z_range > 0.0);

        Self {
            m: [
                [2.0 * near / x_range, 0.0, (left + right) / x_range, 0.0],
                [0.0, 2.0 * near / y_range, (top + bottom) / y_range, 0.0],
                [
                    0.0,
                    0.0,
                    -(far + near) / z_range,
                    -2.0 * far * near / z_range,
                ],
                [0.0, 0.0, -1.0, 0.0],
            ],
        }
    }

    /// Symmetric perspective projection. `fovy` is the vertical field of
    /// view in radians; clip depth spans `[-1, 1]` from the near to the far
    /// plane.
    #[must_use]
    pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Self {
        let z_range = far - near;
        let f = 1.0 / (fovy / 2.0).tan();

        debug_assert!(fovy > 0.0 && aspect > 0.0);
        debug_assert!(near > 0.0 && far > 0.0 && z_range > 0.0);

        Self {
            m: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [
                    0.0,
                    0.0,
                    -(far + near) / z_range,
                    -2.0 * far * near / z_range,
                ],
                [0.0, 0.0, -1.0, 0.0],
            ],
        }
    }

    /// Transposed copy.
    #[must_use]
    pub fn transpose(self) -> Self {
        let mut t = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                t[i][j] = self.m[j][i];
            }
        }
        Self { m: t }
    }

    // Determinant of the 3x3 left after cutting row `r` and column `c`.
    fn minor(self, r: usize, c: usize) -> f32 {
        let mut cut_down = [[0.0; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                let row = if i < r { i } else { i + 1 };
                let col = if j < c { j } else { j + 1 };
                cut_down[i][j] = self.m[row][col];
            }
        }
        Mat3 { m: cut_down }.determinant()
    }

    fn cofactor(self, r: usize, c: usize) -> f32 {
        let minor = self.minor(r, c);
        if (r + c) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }

    // Matrix of cofactors (the transpose of the classical adjugate).
    fn cofactor_matrix(self) -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = self.cofactor(i, j);
            }
        }
        Self { m }
    }

    /// Transpose of the inverse, i.e. the cofactor matrix divided by the
    /// determinant. Non-finite for singular matrices.
    #[must_use]
    pub fn inverse_transpose(self) -> Self {
        let cofactors = self.cofactor_matrix();
        let mut determinant = 0.0;
        for i in 0..4 {
            determinant += self.m[0][i] * cofactors.m[0][i];
        }
        cofactors * (1.0 / determinant)
    }

    /// Inverse. Non-finite for singular matrices.
    #[must_use]
    pub fn inverse(self) -> Self {
        self.inverse_transpose().transpose()
    }

    /// Column-major 2D array, for uploading to graphics APIs whose matrix
    /// types are column-major (WGSL `mat4x4<f32>`). Equivalent to
    /// `self.transpose().m`.
    #[must_use]
    pub fn to_cols_array_2d(self) -> [[f32; 4]; 4] {
        self.transpose().m
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        // Accumulator cells start at zero before the k-summation.
        let mut m = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    m[i][j] += self.m[i][k] * rhs.m[k][j];
                }
            }
        }
        Self { m }
    }
}

// Entry-wise scalar scale.
impl Mul<f32> for Mat4 {
    type Output = Self;

    fn mul(self, factor: f32) -> Self {
        let mut m = self.m;
        for row in &mut m {
            for entry in row {
                *entry *= factor;
            }
        }
        Self { m }
    }
}

// Column-vector transform: `result[i] = sum_j m[i][j] * v[j]`.
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4 {
            x: m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3] * v.w,
            y: m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3] * v.w,
            z: m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3] * v.w,
            w: m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3] * v.w,
        }
    }
}

// Row-vector transform: `result[j] = sum_i v[i] * m[i][j]`.
impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: Mat4) -> Vec4 {
        let m = &rhs.m;
        Vec4 {
            x: self.x * m[0][0]
                + self.y * m[1][0]
                + self.z * m[2][0]
                + self.w * m[3][0],
            y: self.x * m[0][1]
                + self.y * m[1][1]
                + self.z * m[2][1]
                + self.w * m[3][1],
            z: self.x * m[0][2]
                + self.y * m[1][2]
                + self.z * m[2][2]
                + self.w * m[3][2],
            w: self.x * m[0][3]
                + self.y * m[1][3]
                + self.z * m[2][3]
                + self.w * m[3][3],
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn assert_mat3_eq(a: Mat3, b: Mat3, epsilon: f32) {
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(
                    a.m[i][j],
                    b.m[i][j],
                    epsilon = epsilon,
                    max_relative = epsilon
                );
            }
        }
    }

    fn assert_mat4_eq(a: Mat4, b: Mat4, epsilon: f32) {
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(
                    a.m[i][j],
                    b.m[i][j],
                    epsilon = epsilon,
                    max_relative = epsilon
                );
            }
        }
    }

    #[test]
    fn identity_is_multiplicative_unit() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
            * Mat4::from_rotation_y(0.7);
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::IDENTITY, m);
    }

    #[test]
    fn transpose_is_involutive() {
        let m = Mat4 {
            m: [
                [1.0, 2.0, 3.0, 4.0],
                [5.0, 6.0, 7.0, 8.0],
                [9.0, 10.0, 11.0, 12.0],
                [13.0, 14.0, 15.0, 16.0],
            ],
        };
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().m[1][3], m.m[3][1]);
    }

    #[test]
    fn mat3_determinant_known_values() {
        assert_eq!(Mat3::IDENTITY.determinant(), 1.0);
        let scale2 = Mat3 {
            m: [[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]],
        };
        assert_eq!(scale2.determinant(), 8.0);
        let singular = Mat3 {
            m: [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]],
        };
        assert_eq!(singular.determinant(), 0.0);
    }

    #[test]
    fn mat3_inverse_times_original_is_identity() {
        let m = Mat3 {
            m: [[2.0, 1.0, 0.5], [-1.0, 3.0, 2.0], [0.0, 1.0, 4.0]],
        };
        assert_mat3_eq(m.inverse() * m, Mat3::IDENTITY, 1e-4);
        assert_mat3_eq(m * m.inverse(), Mat3::IDENTITY, 1e-4);
    }

    #[test]
    fn mat4_inverse_times_original_is_identity() {
        let m = Mat4::from_translation(Vec3::new(1.0, -2.0, 3.0))
            * Mat4::from_axis_angle(Vec3::new(1.0, 2.0, 0.5), 1.1)
            * Mat4::from_scale(Vec3::new(2.0, 3.0, 0.5));
        assert_mat4_eq(m.inverse() * m, Mat4::IDENTITY, 1e-4);
        assert_mat4_eq(m * m.inverse(), Mat4::IDENTITY, 1e-4);
    }

    #[test]
    fn inverse_transpose_matches_inverse_then_transpose() {
        let m = Mat4::from_axis_angle(Vec3::new(0.3, 1.0, -0.2), 0.8)
            * Mat4::from_scale(Vec3::new(1.5, 1.5, 4.0));
        assert_mat4_eq(m.inverse_transpose(), m.inverse().transpose(), 1e-4);
    }

    #[test]
    fn singular_inverse_is_non_finite() {
        let m = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        let inv = m.inverse();
        assert!(inv.m.iter().flatten().any(|e| !e.is_finite()));
    }

    #[test]
    fn translate_and_scale_transform_points() {
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let p = t * Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(p, Vec4::new(2.0, 3.0, 4.0, 1.0));
        // Direction vectors (w = 0) ignore translation.
        let d = t * Vec4::new(1.0, 1.0, 1.0, 0.0);
        assert_eq!(d, Vec4::new(1.0, 1.0, 1.0, 0.0));

        let s = Mat4::from_scale(Vec3::splat(2.0));
        assert_eq!(
            s * Vec4::new(1.0, -1.0, 0.5, 1.0),
            Vec4::new(2.0, -2.0, 1.0, 1.0)
        );
    }

    #[test]
    fn axis_angle_quarter_turn_about_z_maps_x_to_y() {
        let r = Mat4::from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2);
        let p = r * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn axis_angle_matches_axis_aligned_constructors() {
        for angle in [0.3, 1.2, -0.7] {
            assert_mat4_eq(
                Mat4::from_axis_angle(Vec3::X, angle),
                Mat4::from_rotation_x(angle),
                1e-6,
            );
            assert_mat4_eq(
                Mat4::from_axis_angle(Vec3::Y, angle),
                Mat4::from_rotation_y(angle),
                1e-6,
            );
            assert_mat4_eq(
                Mat4::from_axis_angle(Vec3::Z, angle),
                Mat4::from_rotation_z(angle),
                1e-6,
            );
        }
    }

    #[test]
    fn row_vector_product_matches_transposed_column_product() {
        let m = Mat4::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.6)
            * Mat4::from_translation(Vec3::new(0.5, 1.0, -2.0));
        let v = Vec4::new(1.0, 2.0, 3.0, 1.0);
        let row = v * m;
        let col = m.transpose() * v;
        assert_relative_eq!(row.x, col.x, epsilon = 1e-6);
        assert_relative_eq!(row.y, col.y, epsilon = 1e-6);
        assert_relative_eq!(row.z, col.z, epsilon = 1e-6);
        assert_relative_eq!(row.w, col.w, epsilon = 1e-6);
    }

    #[test]
    fn look_at_maps_eye_to_origin_and_target_onto_minus_z() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::new(4.0, 2.0, -1.0);
        let view = Mat4::look_at(eye, target, Vec3::Y);

        let eye_view = view * eye.extend(1.0);
        assert_relative_eq!(eye_view.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye_view.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye_view.z, 0.0, epsilon = 1e-5);

        let target_view = view * target.extend(1.0);
        assert_relative_eq!(target_view.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(target_view.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(target_view.z, -(target - eye).length(), epsilon = 1e-4);
    }

    #[test]
    fn look_at_inverse_recovers_eye_translation() {
        let eye = Vec3::new(-2.0, 4.0, -1.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::Y);
        let camera_to_world = view.inverse();
        assert_relative_eq!(camera_to_world.m[0][3], eye.x, epsilon = 1e-4);
        assert_relative_eq!(camera_to_world.m[1][3], eye.y, epsilon = 1e-4);
        assert_relative_eq!(camera_to_world.m[2][3], eye.z, epsilon = 1e-4);
    }

    #[test]
    fn perspective_maps_near_and_far_planes_to_clip_extremes() {
        let proj =
            Mat4::perspective(45.0_f32.to_radians(), 1.0, 0.1, 100.0);

        let near = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-4);

        let far = proj * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn perspective_matches_equivalent_frustum() {
        let fovy = 60.0_f32.to_radians();
        let (aspect, near, far) = (1.5, 0.5, 50.0);
        let half_h = near * (fovy / 2.0).tan();
        let half_w = half_h * aspect;
        assert_mat4_eq(
            Mat4::perspective(fovy, aspect, near, far),
            Mat4::frustum(-half_w, half_w, -half_h, half_h, near, far),
            1e-5,
        );
    }

    #[test]
    fn orthographic_maps_box_corners_to_unit_cube() {
        let m = Mat4::orthographic(-10.0, 10.0, -5.0, 5.0, 1.0, 7.5);
        let lo = m * Vec4::new(-10.0, -5.0, -1.0, 1.0);
        assert_relative_eq!(lo.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(lo.y, -1.0, epsilon = 1e-6);
        assert_relative_eq!(lo.z, -1.0, epsilon = 1e-6);
        let hi = m * Vec4::new(10.0, 5.0, -7.5, 1.0);
        assert_relative_eq!(hi.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(hi.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(hi.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn to_cols_array_transposes() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let cols = m.to_cols_array_2d();
        // Translation lives in the last row of the column-major layout.
        assert_eq!(cols[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
