//! Configuration types for loading scenes from YAML.
//!
//! A scene descriptor is a thin, `serde`-deserializable list of body initial
//! states plus an optional gravity override. It maps onto the runtime
//! [`Scene`](crate::Scene) via [`Scene::from_config`](crate::Scene::from_config).
//!
//! # YAML format
//!
//! ```yaml
//! gravity: [0.0, 0.0, -10.0]
//!
//! bodies:
//!   - position: [0.0, 0.0, 10.0]
//!     radius: 1.0
//!     inverse_mass: 1.0
//!     elasticity: 0.5
//!     friction: 0.5
//!   - position: [0.0, 0.0, -6000.0]   # static ground sphere
//!     radius: 6000.0
//!     inverse_mass: 0.0
//!     elasticity: 1.0
//! ```
//!
//! Omitted fields fall back to the defaults of the built-in world: unit
//! inverse mass, zero velocity, elasticity and friction of 0.5.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dynamics::Body;
use crate::geometry::Shape;
use crate::math::Vec3;

fn default_gravity() -> [f32; 3] {
    [0.0, 0.0, -10.0]
}

fn default_inverse_mass() -> f32 {
    1.0
}

fn default_material() -> f32 {
    0.5
}

/// Initial state for a single body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    /// World-space position
    pub position: [f32; 3],
    /// Linear velocity, defaults to rest
    #[serde(default)]
    pub velocity: [f32; 3],
    /// Angular velocity, defaults to rest
    #[serde(default)]
    pub angular_velocity: [f32; 3],
    /// Sphere radius
    pub radius: f32,
    /// Inverse mass; 0 makes the body static
    #[serde(default = "default_inverse_mass")]
    pub inverse_mass: f32,
    /// Restitution coefficient in [0, 1]
    #[serde(default = "default_material")]
    pub elasticity: f32,
    /// Friction coefficient in [0, 1]
    #[serde(default = "default_material")]
    pub friction: f32,
}

impl BodyConfig {
    /// Builds the runtime body this configuration describes
    pub fn to_body(&self) -> Body {
        Body::new(Shape::sphere(self.radius))
            .with_position(Vec3::from(self.position))
            .with_linear_velocity(Vec3::from(self.velocity))
            .with_angular_velocity(Vec3::from(self.angular_velocity))
            .with_inverse_mass(self.inverse_mass)
            .with_elasticity(self.elasticity)
            .with_friction(self.friction)
    }
}

/// Top-level scene configuration loaded from YAML
#[derive(Deserialize, Debug, Clone)]
pub struct SceneConfig {
    /// Gravitational acceleration; defaults to 10 m/s² along -Z
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 3],
    /// Initial state for every body in the scene
    pub bodies: Vec<BodyConfig>,
}

impl SceneConfig {
    /// Parses a scene configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("failed to parse scene configuration")
    }

    /// Loads a scene configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open scene file {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse scene file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_scene() {
        let yaml = r#"
gravity: [0.0, 0.0, -9.81]

bodies:
  - position: [0.0, 0.0, 10.0]
    velocity: [1.0, 0.0, 0.0]
    radius: 1.0
    inverse_mass: 1.0
    elasticity: 0.5
    friction: 0.5
  - position: [0.0, 0.0, -6000.0]
    radius: 6000.0
    inverse_mass: 0.0
    elasticity: 1.0
"#;

        let config = SceneConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.gravity, [0.0, 0.0, -9.81]);
        assert_eq!(config.bodies.len(), 2);
        assert_eq!(config.bodies[0].velocity, [1.0, 0.0, 0.0]);
        assert_eq!(config.bodies[1].inverse_mass, 0.0);
        // Omitted friction falls back to the default material
        assert_eq!(config.bodies[1].friction, 0.5);
    }

    #[test]
    fn test_defaults() {
        let yaml = r#"
bodies:
  - position: [0.0, 0.0, 1.0]
    radius: 0.5
"#;

        let config = SceneConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.gravity, [0.0, 0.0, -10.0]);

        let body = config.bodies[0].to_body();
        assert_eq!(body.linear_velocity, Vec3::ZERO);
        assert_eq!(body.inverse_mass, 1.0);
        assert_eq!(body.elasticity, 0.5);
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        assert!(SceneConfig::from_yaml_str("bodies: [nonsense").is_err());
        assert!(SceneConfig::from_yaml_str("gravity: [0, 0, -10]").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = SceneConfig::from_yaml_file("/definitely/not/here.yaml");
        assert!(err.is_err());
    }
}
