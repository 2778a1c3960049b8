use tracing::trace;

use crate::collision::contact::get_two_mut;
use crate::collision::{broad_phase, intersect, CollisionPair, Contact};
use crate::config::SceneConfig;
use crate::dynamics::Body;
use crate::geometry::Shape;
use crate::math::Vec3;

/// Default gravitational acceleration, along -Z.
const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, 0.0, -10.0);

/// A population of rigid bodies advanced through time by [`Scene::step`].
///
/// Bodies are addressed by index; indices are stable across a step and only
/// invalidated by [`Scene::reset`]. Hosts read body state between steps and
/// never mutate it mid-step.
pub struct Scene {
    gravity: Vec3,
    bodies: Vec<Body>,
    // Step-scoped scratch, reused to avoid per-frame allocator churn
    pairs: Vec<CollisionPair>,
    contacts: Vec<Contact>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            bodies: Vec::new(),
            pairs: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Populates the scene with the default world: one dynamic unit sphere
    /// falling onto a planet-sized static sphere whose top surface sits at
    /// z = 0.
    pub fn initialize(&mut self) {
        self.add_body(
            Body::new(Shape::sphere(1.0))
                .with_position(Vec3::new(0.0, 0.0, 10.0))
                .with_inverse_mass(1.0)
                .with_elasticity(0.5)
                .with_friction(0.5),
        );

        self.add_body(
            Body::new(Shape::sphere(6000.0))
                .with_position(Vec3::new(0.0, 0.0, -6000.0))
                .with_inverse_mass(0.0)
                .with_elasticity(1.0)
                .with_friction(0.5),
        );
    }

    /// Drops all bodies and re-populates the default world
    pub fn reset(&mut self) {
        self.bodies.clear();
        self.initialize();
    }

    /// Builds a scene from a loaded configuration
    pub fn from_config(config: &SceneConfig) -> Self {
        let mut scene = Self::new();
        scene.gravity = Vec3::from(config.gravity);
        for body_config in &config.bodies {
            scene.add_body(body_config.to_body());
        }
        scene
    }

    /// Adds a body and returns its index
    pub fn add_body(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    /// Read access to all bodies
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Read access to a single body
    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    /// Returns the number of bodies in the scene
    pub fn num_bodies(&self) -> usize {
        self.bodies.len()
    }

    /// Sets the gravitational acceleration
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    /// Returns the gravitational acceleration
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Advances the simulation by `dt_sec` seconds.
    ///
    /// Contacts found by the pre-step sweep are resolved in time-of-impact
    /// order: all bodies are integrated up to each impact before it is
    /// resolved, so early collisions cascade correctly into later ones and
    /// fast bodies cannot tunnel within the step.
    pub fn step(&mut self, dt_sec: f32) {
        // Gravity enters as an impulse: J = m * g * dt
        for body in &mut self.bodies {
            if body.inverse_mass == 0.0 {
                continue;
            }
            let mass = 1.0 / body.inverse_mass;
            let impulse_gravity = self.gravity * mass * dt_sec;
            body.apply_impulse_linear(impulse_gravity);
        }

        broad_phase(&self.bodies, dt_sec, &mut self.pairs);

        // Narrow phase: promote candidate pairs to contacts
        self.contacts.clear();
        for i in 0..self.pairs.len() {
            let pair = self.pairs[i];
            let (body_a, body_b) = get_two_mut(&mut self.bodies, pair.a, pair.b);
            if body_a.is_static() && body_b.is_static() {
                continue;
            }
            if let Some(contact) = intersect(pair.a, pair.b, body_a, body_b, dt_sec) {
                self.contacts.push(contact);
            }
        }

        self.contacts
            .sort_unstable_by(|a, b| a.time_of_impact.total_cmp(&b.time_of_impact));

        if !self.contacts.is_empty() {
            trace!(
                candidates = self.pairs.len(),
                contacts = self.contacts.len(),
                "resolving contacts in impact order"
            );
        }

        // Advance the whole scene to each impact in turn and resolve it
        let mut accumulated_time = 0.0;
        for i in 0..self.contacts.len() {
            let contact = self.contacts[i];
            let dt_contact = contact.time_of_impact - accumulated_time;

            for body in &mut self.bodies {
                body.update(dt_contact);
            }

            contact.resolve(&mut self.bodies);
            accumulated_time += dt_contact;
        }

        // Integrate the remainder of the step
        let time_remaining = dt_sec - accumulated_time;
        if time_remaining > 0.0 {
            for body in &mut self.bodies {
                body.update(time_remaining);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scene() {
        let mut scene = Scene::new();
        assert_eq!(scene.num_bodies(), 0);
        scene.step(1.0 / 60.0);
    }

    #[test]
    fn test_initialize_default_world() {
        let mut scene = Scene::new();
        scene.initialize();

        assert_eq!(scene.num_bodies(), 2);
        assert_eq!(scene.bodies()[0].position, Vec3::new(0.0, 0.0, 10.0));
        assert!(scene.bodies()[1].is_static());
    }

    #[test]
    fn test_reset_restores_default_world() {
        let mut scene = Scene::new();
        scene.initialize();
        scene.add_body(Body::new(Shape::sphere(0.5)).with_position(Vec3::new(5.0, 5.0, 5.0)));
        assert_eq!(scene.num_bodies(), 3);

        scene.reset();
        assert_eq!(scene.num_bodies(), 2);
        assert_eq!(scene.bodies()[0].position, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_gravity_accelerates_dynamic_bodies() {
        let mut scene = Scene::new();
        let index = scene.add_body(
            Body::new(Shape::sphere(1.0)).with_position(Vec3::new(0.0, 0.0, 100.0)),
        );

        scene.step(1.0 / 60.0);

        let body = scene.body(index).unwrap();
        assert!(body.linear_velocity.z < 0.0);
        assert!(body.position.z < 100.0);
    }

    #[test]
    fn test_static_bodies_never_move() {
        let mut scene = Scene::new();
        let index = scene.add_body(
            Body::new(Shape::sphere(1.0))
                .with_position(Vec3::new(0.0, 0.0, 5.0))
                .with_inverse_mass(0.0),
        );

        for _ in 0..120 {
            scene.step(1.0 / 60.0);
        }

        let body = scene.body(index).unwrap();
        assert_eq!(body.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(body.linear_velocity, Vec3::ZERO);
        assert_eq!(body.angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_orientation_stays_unit_length() {
        let mut scene = Scene::new();
        scene.initialize();
        scene.bodies[0].angular_velocity = Vec3::new(1.0, 2.0, 3.0);

        for _ in 0..240 {
            scene.step(1.0 / 120.0);
        }

        for body in scene.bodies() {
            assert!((body.orientation.length() - 1.0).abs() < 1e-5);
            assert!(body.angular_velocity.length() <= 30.0 + 1e-5);
        }
    }

    #[test]
    fn test_set_gravity() {
        let mut scene = Scene::new();
        scene.set_gravity(Vec3::ZERO);
        let index = scene.add_body(Body::new(Shape::sphere(1.0)));

        scene.step(1.0 / 60.0);
        assert_eq!(scene.body(index).unwrap().linear_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_static_pair_produces_no_contact() {
        let mut scene = Scene::new();
        scene.set_gravity(Vec3::ZERO);
        // Two overlapping static spheres: skipped before the narrow phase
        scene.add_body(
            Body::new(Shape::sphere(1.0))
                .with_position(Vec3::ZERO)
                .with_inverse_mass(0.0),
        );
        scene.add_body(
            Body::new(Shape::sphere(1.0))
                .with_position(Vec3::new(1.0, 0.0, 0.0))
                .with_inverse_mass(0.0),
        );

        scene.step(1.0 / 60.0);

        assert_eq!(scene.bodies()[0].position, Vec3::ZERO);
        assert_eq!(scene.bodies()[1].position, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_config() {
        use crate::config::{BodyConfig, SceneConfig};

        let config = SceneConfig {
            gravity: [0.0, 0.0, -9.81],
            bodies: vec![BodyConfig {
                position: [1.0, 2.0, 3.0],
                velocity: [0.5, 0.0, 0.0],
                angular_velocity: [0.0, 0.0, 0.0],
                radius: 0.25,
                inverse_mass: 2.0,
                elasticity: 0.9,
                friction: 0.1,
            }],
        };

        let scene = Scene::from_config(&config);
        assert_eq!(scene.num_bodies(), 1);
        assert_eq!(scene.gravity(), Vec3::new(0.0, 0.0, -9.81));

        let body = &scene.bodies()[0];
        assert_eq!(body.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.inverse_mass, 2.0);
    }
}
