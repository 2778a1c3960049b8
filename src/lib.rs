//! # Spherecast
//!
//! A continuous-collision rigid body physics core for spheres.
//!
//! ## Features
//!
//! - **Rigid Body Dynamics**: linear and angular motion with gyroscopic
//!   precession and impulse-based velocity changes
//! - **Continuous Collision Detection**: swept sphere/sphere tests produce a
//!   time of impact, so fast bodies never tunnel within a step
//! - **Broad Phase**: 1D sweep-and-prune over velocity-expanded bounds
//! - **Contact Resolution**: restitution and friction impulses, resolved in
//!   time-of-impact order with the whole scene integrated to each impact
//! - **Scene Configuration**: YAML scenario descriptors via `serde`
//!
//! ## Quick Start
//!
//! ```rust
//! use spherecast::prelude::*;
//!
//! let mut scene = Scene::new();
//!
//! // A unit sphere, ten meters up
//! scene.add_body(
//!     Body::new(Shape::sphere(1.0))
//!         .with_position(Vec3::new(0.0, 0.0, 10.0))
//!         .with_inverse_mass(1.0),
//! );
//!
//! // A planet-sized static sphere whose top surface is the ground plane
//! scene.add_body(
//!     Body::new(Shape::sphere(6000.0))
//!         .with_position(Vec3::new(0.0, 0.0, -6000.0))
//!         .with_inverse_mass(0.0),
//! );
//!
//! // Drive the simulation at a fixed rate
//! for _ in 0..120 {
//!     scene.step(1.0 / 120.0);
//! }
//!
//! assert!(scene.bodies()[0].position.z < 10.0);
//! ```
//!
//! Units are meters, seconds and radians in a right-handed frame with +Z up;
//! gravity points along -Z.

pub mod collision;
pub mod config;
pub mod dynamics;
pub mod geometry;
pub mod math;
mod scene;

pub use scene::Scene;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{CollisionPair, Contact};
    pub use crate::config::{BodyConfig, SceneConfig};
    pub use crate::dynamics::Body;
    pub use crate::geometry::{Aabb, Shape, ShapeKind, Sphere};
    pub use crate::math::{Mat3, Mat4, Quat, Vec3};
    pub use crate::scene::Scene;
}
