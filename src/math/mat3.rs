use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use super::quat::Quat;
use super::vec3::Vec3;

/// A 3x3 matrix stored in column-major order.
///
/// Used for rotation matrices and inertia tensors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Columns of the matrix
    pub cols: [Vec3; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    /// Zero matrix
    pub const ZERO: Self = Self {
        cols: [Vec3::ZERO, Vec3::ZERO, Vec3::ZERO],
    };

    /// Identity matrix
    pub const IDENTITY: Self = Self {
        cols: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    /// Creates a matrix from column vectors
    #[inline]
    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Creates a diagonal matrix
    #[inline]
    pub fn from_diagonal(diag: Vec3) -> Self {
        Self::from_cols(
            Vec3::new(diag.x, 0.0, 0.0),
            Vec3::new(0.0, diag.y, 0.0),
            Vec3::new(0.0, 0.0, diag.z),
        )
    }

    /// Creates a rotation matrix from a quaternion
    #[inline]
    pub fn from_quat(q: Quat) -> Self {
        let x2 = q.x + q.x;
        let y2 = q.y + q.y;
        let z2 = q.z + q.z;

        let xx = q.x * x2;
        let xy = q.x * y2;
        let xz = q.x * z2;
        let yy = q.y * y2;
        let yz = q.y * z2;
        let zz = q.z * z2;
        let wx = q.w * x2;
        let wy = q.w * y2;
        let wz = q.w * z2;

        Self::from_cols(
            Vec3::new(1.0 - (yy + zz), xy + wz, xz - wy),
            Vec3::new(xy - wz, 1.0 - (xx + zz), yz + wx),
            Vec3::new(xz + wy, yz - wx, 1.0 - (xx + yy)),
        )
    }

    /// Returns the transpose of the matrix
    #[inline]
    pub fn transpose(self) -> Self {
        Self::from_cols(
            Vec3::new(self.cols[0].x, self.cols[1].x, self.cols[2].x),
            Vec3::new(self.cols[0].y, self.cols[1].y, self.cols[2].y),
            Vec3::new(self.cols[0].z, self.cols[1].z, self.cols[2].z),
        )
    }

    /// Returns the determinant of the matrix
    #[inline]
    pub fn determinant(self) -> f32 {
        self.cols[0].dot(self.cols[1].cross(self.cols[2]))
    }

    /// Returns the inverse of the matrix, or None if not invertible
    #[inline]
    pub fn try_inverse(self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-10 {
            return None;
        }

        let inv_det = 1.0 / det;

        let c0 = self.cols[1].cross(self.cols[2]) * inv_det;
        let c1 = self.cols[2].cross(self.cols[0]) * inv_det;
        let c2 = self.cols[0].cross(self.cols[1]) * inv_det;

        Some(Self::from_cols(
            Vec3::new(c0.x, c1.x, c2.x),
            Vec3::new(c0.y, c1.y, c2.y),
            Vec3::new(c0.z, c1.z, c2.z),
        ))
    }

    /// Returns the inverse of the matrix (panics if not invertible)
    #[inline]
    pub fn inverse(self) -> Self {
        self.try_inverse().expect("Matrix is not invertible")
    }

    /// Transforms a vector by this matrix
    #[inline]
    pub fn transform_vec(self, v: Vec3) -> Vec3 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }

    /// Returns a column of the matrix
    #[inline]
    pub fn col(self, index: usize) -> Vec3 {
        self.cols[index]
    }

    /// Returns the diagonal elements
    #[inline]
    pub fn diagonal(self) -> Vec3 {
        Vec3::new(self.cols[0].x, self.cols[1].y, self.cols[2].z)
    }

    /// Scalar multiplication
    #[inline]
    pub fn scale(self, s: f32) -> Self {
        Self::from_cols(self.cols[0] * s, self.cols[1] * s, self.cols[2] * s)
    }

    /// Returns true if this is approximately equal to another matrix
    #[inline]
    pub fn approx_eq(self, other: Self, epsilon: f32) -> bool {
        (self.cols[0] - other.cols[0]).length_squared() < epsilon * epsilon
            && (self.cols[1] - other.cols[1]).length_squared() < epsilon * epsilon
            && (self.cols[2] - other.cols[2]).length_squared() < epsilon * epsilon
    }
}

impl Add for Mat3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::from_cols(
            self.cols[0] + other.cols[0],
            self.cols[1] + other.cols[1],
            self.cols[2] + other.cols[2],
        )
    }
}

impl AddAssign for Mat3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.cols[0] += other.cols[0];
        self.cols[1] += other.cols[1];
        self.cols[2] += other.cols[2];
    }
}

impl Sub for Mat3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::from_cols(
            self.cols[0] - other.cols[0],
            self.cols[1] - other.cols[1],
            self.cols[2] - other.cols[2],
        )
    }
}

impl SubAssign for Mat3 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.cols[0] -= other.cols[0];
        self.cols[1] -= other.cols[1];
        self.cols[2] -= other.cols[2];
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Self::from_cols(
            self.transform_vec(other.cols[0]),
            self.transform_vec(other.cols[1]),
            self.transform_vec(other.cols[2]),
        )
    }
}

impl MulAssign for Mat3 {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        self.transform_vec(v)
    }
}

impl Mul<f32> for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, s: f32) -> Self {
        self.scale(s)
    }
}
