use crate::math::{Mat3, Quat, Vec3};

use super::aabb::Aabb;

/// The type of collision shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Sphere,
}

/// A collision shape attached to a body.
///
/// Shapes are pure value descriptors: mass properties are reported for unit
/// mass and scaled by the owning body's inverse mass where needed. The only
/// variant today is the sphere; the orientation parameter of
/// [`Shape::world_bounds`] exists so new variants can slot in without
/// touching callers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// A sphere defined by its radius
    Sphere(Sphere),
}

impl Shape {
    /// Creates a sphere shape
    #[inline]
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere(Sphere::new(radius))
    }

    /// Returns the shape type
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere(_) => ShapeKind::Sphere,
        }
    }

    /// Returns the inertia tensor for a unit-mass shape in local space
    #[inline]
    pub fn inertia_tensor(&self) -> Mat3 {
        match self {
            Shape::Sphere(s) => s.inertia_tensor(),
        }
    }

    /// Returns the center of mass in local space
    #[inline]
    pub fn center_of_mass(&self) -> Vec3 {
        match self {
            Shape::Sphere(_) => Vec3::ZERO,
        }
    }

    /// Returns the bounds of this shape in local space
    #[inline]
    pub fn local_bounds(&self) -> Aabb {
        match self {
            Shape::Sphere(s) => s.local_bounds(),
        }
    }

    /// Returns the bounds of this shape at a world pose
    #[inline]
    pub fn world_bounds(&self, position: Vec3, orientation: Quat) -> Aabb {
        match self {
            Shape::Sphere(s) => s.world_bounds(position, orientation),
        }
    }
}

/// A sphere collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f32,
}

impl Sphere {
    /// Creates a new sphere with the given radius
    #[inline]
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Unit-mass inertia tensor: diagonal 2r²/5
    #[inline]
    pub fn inertia_tensor(&self) -> Mat3 {
        let i = 2.0 * self.radius * self.radius / 5.0;
        Mat3::from_diagonal(Vec3::splat(i))
    }

    /// Returns the bounds of this sphere in local space
    #[inline]
    pub fn local_bounds(&self) -> Aabb {
        let r = Vec3::splat(self.radius);
        Aabb::new(-r, r)
    }

    /// Returns the bounds of this sphere at a world pose.
    /// A sphere is rotationally symmetric, so the orientation is unused.
    #[inline]
    pub fn world_bounds(&self, position: Vec3, _orientation: Quat) -> Aabb {
        let r = Vec3::splat(self.radius);
        Aabb::new(position - r, position + r)
    }
}
