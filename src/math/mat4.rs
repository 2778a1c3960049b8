use std::ops::Mul;

use super::mat3::Mat3;
use super::quat::Quat;
use super::vec3::Vec3;

/// A 4x4 transform matrix stored in column-major order.
///
/// Bodies expose their pose as a `Mat4` so a host renderer can feed it
/// straight into its uniform buffers. Only rigid transforms (rotation +
/// translation) are produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// Columns of the matrix
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a pure translation matrix
    #[inline]
    pub fn from_translation(t: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = [t.x, t.y, t.z, 1.0];
        m
    }

    /// Creates a rigid transform from a rotation and a translation
    #[inline]
    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        let r = Mat3::from_quat(rotation);
        Self {
            cols: [
                [r.cols[0].x, r.cols[0].y, r.cols[0].z, 0.0],
                [r.cols[1].x, r.cols[1].y, r.cols[1].z, 0.0],
                [r.cols[2].x, r.cols[2].y, r.cols[2].z, 0.0],
                [translation.x, translation.y, translation.z, 1.0],
            ],
        }
    }

    /// Returns the transpose of the matrix
    #[inline]
    pub fn transpose(self) -> Self {
        let c = self.cols;
        Self {
            cols: [
                [c[0][0], c[1][0], c[2][0], c[3][0]],
                [c[0][1], c[1][1], c[2][1], c[3][1]],
                [c[0][2], c[1][2], c[2][2], c[3][2]],
                [c[0][3], c[1][3], c[2][3], c[3][3]],
            ],
        }
    }

    /// Transforms a point (w = 1)
    #[inline]
    pub fn transform_point(self, p: Vec3) -> Vec3 {
        let c = self.cols;
        Vec3::new(
            c[0][0] * p.x + c[1][0] * p.y + c[2][0] * p.z + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[2][1] * p.z + c[3][1],
            c[0][2] * p.x + c[1][2] * p.y + c[2][2] * p.z + c[3][2],
        )
    }

    /// Transforms a direction (w = 0, translation ignored)
    #[inline]
    pub fn transform_vector(self, v: Vec3) -> Vec3 {
        let c = self.cols;
        Vec3::new(
            c[0][0] * v.x + c[1][0] * v.y + c[2][0] * v.z,
            c[0][1] * v.x + c[1][1] * v.y + c[2][1] * v.z,
            c[0][2] * v.x + c[1][2] * v.y + c[2][2] * v.z,
        )
    }

    /// Returns the 16 elements in column-major order, ready for GPU upload
    #[inline]
    pub fn to_cols_array(self) -> [f32; 16] {
        let c = self.cols;
        [
            c[0][0], c[0][1], c[0][2], c[0][3],
            c[1][0], c[1][1], c[1][2], c[1][3],
            c[2][0], c[2][1], c[2][2], c[2][3],
            c[3][0], c[3][1], c[3][2], c[3][3],
        ]
    }
}

impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        let mut cols = [[0.0; 4]; 4];
        for (col, other_col) in cols.iter_mut().zip(other.cols.iter()) {
            for row in 0..4 {
                let mut sum = 0.0;
                for (k, other_val) in other_col.iter().enumerate() {
                    sum += self.cols[k][row] * other_val;
                }
                col[row] = sum;
            }
        }
        Self { cols }
    }
}
