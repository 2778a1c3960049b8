use crate::dynamics::Body;
use crate::math::Vec3;

/// An unordered pair of body indices produced by the broadphase.
#[derive(Debug, Clone, Copy, Eq)]
pub struct CollisionPair {
    pub a: usize,
    pub b: usize,
}

impl CollisionPair {
    /// Creates a new collision pair
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

impl PartialEq for CollisionPair {
    /// (a, b) and (b, a) are the same pair
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

/// A collision between two bodies, produced by the narrow phase.
///
/// Contacts reference their bodies by scene index; indices are stable for
/// the duration of a step.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Contact point on body A in world space
    pub pt_on_a_world: Vec3,
    /// Contact point on body A in its body space
    pub pt_on_a_local: Vec3,
    /// Contact point on body B in world space
    pub pt_on_b_world: Vec3,
    /// Contact point on body B in its body space
    pub pt_on_b_local: Vec3,
    /// Unit contact normal, pointing from A to B at the hit point
    pub normal: Vec3,
    /// Distance between the surfaces; zero or negative when touching
    pub separation_distance: f32,
    /// Seconds into the step at which the bodies first touch; zero when
    /// already interpenetrating
    pub time_of_impact: f32,
    /// Scene index of body A
    pub body_a: usize,
    /// Scene index of body B
    pub body_b: usize,
}

/// Gets mutable references to two bodies at different indices
pub(crate) fn get_two_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    assert!(a != b);
    if a < b {
        let (left, right) = bodies.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

impl Contact {
    /// Resolves this contact by exchanging collision and friction impulses,
    /// then separating the bodies if they started the step interpenetrating.
    ///
    /// The bodies are expected to have been advanced to the time of impact.
    pub fn resolve(&self, bodies: &mut [Body]) {
        let (a, b) = get_two_mut(bodies, self.body_a, self.body_b);

        let inv_mass_a = a.inverse_mass;
        let inv_mass_b = b.inverse_mass;
        let elasticity = a.elasticity * b.elasticity;

        let pt_on_a = self.pt_on_a_world;
        let pt_on_b = self.pt_on_b_world;

        let inv_inertia_a = a.inverse_inertia_tensor_world();
        let inv_inertia_b = b.inverse_inertia_tensor_world();
        let n = self.normal;
        let r_a = pt_on_a - a.center_of_mass_world();
        let r_b = pt_on_b - b.center_of_mass_world();

        let angular_j_a = (inv_inertia_a * r_a.cross(n)).cross(r_a);
        let angular_j_b = (inv_inertia_b * r_b.cross(n)).cross(r_b);
        let angular_factor = (angular_j_a + angular_j_b).dot(n);

        // World-space velocities of the contact points
        let vel_a = a.linear_velocity + a.angular_velocity.cross(r_a);
        let vel_b = b.linear_velocity + b.angular_velocity.cross(r_b);
        let vel_ab = vel_a - vel_b;

        // Collision impulse along the normal
        let impulse_j =
            (1.0 + elasticity) * vel_ab.dot(n) / (inv_mass_a + inv_mass_b + angular_factor);
        let impulse = n * impulse_j;

        a.apply_impulse(pt_on_a, -impulse);
        b.apply_impulse(pt_on_b, impulse);

        // Friction impulse along the tangent. The magnitude is proportional
        // to the tangential speed rather than clamped against the normal
        // impulse, so this over-damps at low normal force.
        let friction = a.friction * b.friction;

        let vel_normal = n * n.dot(vel_ab);
        let vel_tangent = vel_ab - vel_normal;

        if let Some(tangent) = vel_tangent.try_normalize() {
            let inertia_a = (inv_inertia_a * r_a.cross(tangent)).cross(r_a);
            let inertia_b = (inv_inertia_b * r_b.cross(tangent)).cross(r_b);
            let inv_inertia = (inertia_a + inertia_b).dot(tangent);

            let reduced_mass = 1.0 / (inv_mass_a + inv_mass_b + inv_inertia);
            let impulse_friction = vel_tangent * (reduced_mass * friction);

            a.apply_impulse(pt_on_a, -impulse_friction);
            b.apply_impulse(pt_on_b, impulse_friction);
        }

        // Bodies that started the step interpenetrating were never advanced
        // to a touching pose; move them apart in inverse-mass proportion.
        if self.time_of_impact == 0.0 {
            let t_a = inv_mass_a / (inv_mass_a + inv_mass_b);
            let t_b = inv_mass_b / (inv_mass_a + inv_mass_b);
            let d = pt_on_b - pt_on_a;

            a.position += d * t_a;
            b.position -= d * t_b;
        }
    }
}
