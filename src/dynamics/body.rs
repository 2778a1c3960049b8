use crate::geometry::{Aabb, Shape};
use crate::math::{Mat3, Mat4, Quat, Vec3};

/// Hard cap on angular speed, in radians per second.
const MAX_ANGULAR_SPEED: f32 = 30.0;

/// A rigid body in the simulation.
///
/// A body owns its collision shape. An `inverse_mass` of zero marks the body
/// as static: it never moves and impulse application is a no-op, so its
/// velocities stay at zero for the lifetime of the scene.
#[derive(Debug, Clone)]
pub struct Body {
    /// World-space origin of the body frame
    pub position: Vec3,
    /// Orientation as a unit quaternion
    pub orientation: Quat,
    /// Linear velocity in world space
    pub linear_velocity: Vec3,
    /// Angular velocity in world space (axis times rate, rad/s)
    pub angular_velocity: Vec3,
    /// Inverse mass (0 for infinite mass / static)
    pub inverse_mass: f32,
    /// Restitution coefficient in [0, 1]
    pub elasticity: f32,
    /// Friction coefficient in [0, 1]
    pub friction: f32,
    /// The collision shape owned by this body
    pub shape: Shape,
}

impl Body {
    /// Creates a new dynamic unit-mass body at the origin
    pub fn new(shape: Shape) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            inverse_mass: 1.0,
            elasticity: 0.5,
            friction: 0.5,
            shape,
        }
    }

    /// Sets the position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the orientation
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation.normalize();
        self
    }

    /// Sets the linear velocity
    pub fn with_linear_velocity(mut self, velocity: Vec3) -> Self {
        self.linear_velocity = velocity;
        self
    }

    /// Sets the angular velocity, clamped to the angular speed cap
    pub fn with_angular_velocity(mut self, velocity: Vec3) -> Self {
        self.angular_velocity = if velocity.length_squared() > MAX_ANGULAR_SPEED * MAX_ANGULAR_SPEED
        {
            velocity.normalize() * MAX_ANGULAR_SPEED
        } else {
            velocity
        };
        self
    }

    /// Sets the inverse mass directly; 0 makes the body static
    pub fn with_inverse_mass(mut self, inverse_mass: f32) -> Self {
        debug_assert!(inverse_mass >= 0.0);
        self.inverse_mass = inverse_mass;
        self
    }

    /// Sets the mass (automatically computes inverse mass)
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.inverse_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        self
    }

    /// Sets the restitution coefficient
    pub fn with_elasticity(mut self, elasticity: f32) -> Self {
        self.elasticity = elasticity.clamp(0.0, 1.0);
        self
    }

    /// Sets the friction coefficient
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction.clamp(0.0, 1.0);
        self
    }

    /// Returns true if this body has infinite mass
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    /// Returns the center of mass in world space
    pub fn center_of_mass_world(&self) -> Vec3 {
        self.position + self.orientation.rotate_vec(self.shape.center_of_mass())
    }

    /// Returns the center of mass in body space
    pub fn center_of_mass_body(&self) -> Vec3 {
        self.shape.center_of_mass()
    }

    /// Returns the inverse inertia tensor in body space, scaled by inverse mass
    pub fn inverse_inertia_tensor_body(&self) -> Mat3 {
        self.shape.inertia_tensor().inverse() * self.inverse_mass
    }

    /// Returns the inverse inertia tensor in world space.
    ///
    /// For a static body the impulse entry points short-circuit before ever
    /// consulting this, so the inverse-mass scaling to zero is enough.
    pub fn inverse_inertia_tensor_world(&self) -> Mat3 {
        let orient = Mat3::from_quat(self.orientation);
        orient * self.inverse_inertia_tensor_body() * orient.transpose()
    }

    /// Converts a world-space point into body space
    pub fn world_to_body(&self, world_point: Vec3) -> Vec3 {
        let relative = world_point - self.center_of_mass_world();
        self.orientation.inverse().rotate_vec(relative)
    }

    /// Converts a body-space point into world space
    pub fn body_to_world(&self, body_point: Vec3) -> Vec3 {
        self.center_of_mass_world() + self.orientation.rotate_vec(body_point)
    }

    /// Returns the body's pose as a world transform for rendering
    pub fn world_transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// Returns the world-space bounds of the body's shape
    pub fn world_bounds(&self) -> Aabb {
        self.shape.world_bounds(self.position, self.orientation)
    }

    /// Applies a linear impulse at the center of mass. No-op for static bodies.
    pub fn apply_impulse_linear(&mut self, impulse: Vec3) {
        if self.inverse_mass == 0.0 {
            return;
        }
        // dv = J / m
        self.linear_velocity += impulse * self.inverse_mass;
    }

    /// Applies an angular impulse. No-op for static bodies.
    pub fn apply_impulse_angular(&mut self, impulse: Vec3) {
        if self.inverse_mass == 0.0 {
            return;
        }
        // dw = I^-1 * (r x J)
        self.angular_velocity += self.inverse_inertia_tensor_world() * impulse;

        if self.angular_velocity.length_squared() > MAX_ANGULAR_SPEED * MAX_ANGULAR_SPEED {
            self.angular_velocity = self.angular_velocity.normalize() * MAX_ANGULAR_SPEED;
        }
    }

    /// Applies an impulse at a world-space point, producing both a linear
    /// velocity change and a torque about the center of mass.
    pub fn apply_impulse(&mut self, impulse_point: Vec3, impulse: Vec3) {
        if self.inverse_mass == 0.0 {
            return;
        }
        self.apply_impulse_linear(impulse);

        let r = impulse_point - self.center_of_mass_world();
        self.apply_impulse_angular(r.cross(impulse));
    }

    /// Advances the body's pose by `dt_sec` of free motion.
    ///
    /// A negative `dt_sec` rewinds; the narrow phase uses this to sample the
    /// pose at the time of impact and then restore the pre-step state.
    pub fn update(&mut self, dt_sec: f32) {
        self.position += self.linear_velocity * dt_sec;

        // The angular state lives at the center of mass; rotating there and
        // mapping the body origin back keeps off-center shapes rigid.
        let position_cm = self.center_of_mass_world();
        let cm_to_position = self.position - position_cm;

        // Torque-free precession: alpha = I^-1 (w x I w), with I in world space
        let orient = Mat3::from_quat(self.orientation);
        let inertia = orient * self.shape.inertia_tensor() * orient.transpose();
        let alpha = inertia.inverse()
            * self
                .angular_velocity
                .cross(inertia * self.angular_velocity);
        self.angular_velocity += alpha * dt_sec;

        let d_angle = self.angular_velocity * dt_sec;
        let dq = Quat::from_axis_angle(d_angle, d_angle.length());
        self.orientation = (dq * self.orientation).normalize();

        self.position = position_cm + dq.rotate_vec(cm_to_position);
    }
}
