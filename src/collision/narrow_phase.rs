//! Continuous narrow-phase collision detection for spheres.
//!
//! The swept test reduces moving sphere vs moving sphere to a ray cast in
//! the frame of body B: a ray along the relative motion over the step,
//! against a sphere grown to the sum of both radii. The earliest root inside
//! the step becomes the time of impact.

use crate::dynamics::Body;
use crate::geometry::{Shape, Sphere};
use crate::math::Vec3;

use super::contact::Contact;

/// Relative motion shorter than this over a step is treated as stationary.
const SHORT_RAY_THRESHOLD: f32 = 1e-3;

/// Intersects a ray with a sphere, returning the two parametric roots.
///
/// Roots are in units of `dir`, not seconds, and may both be negative when
/// the sphere lies behind the ray origin. Returns None when the supporting
/// line misses the sphere.
pub fn ray_sphere(start: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<(f32, f32)> {
    let m = center - start;
    let a = dir.dot(dir);
    let b = m.dot(dir);
    let c = m.dot(m) - radius * radius;

    let delta = b * b - a * c;
    if delta < 0.0 {
        return None;
    }

    let inv_a = 1.0 / a;
    let delta_root = delta.sqrt();
    let t0 = (b - delta_root) * inv_a;
    let t1 = (b + delta_root) * inv_a;

    Some((t0, t1))
}

/// Sweeps two moving spheres against each other over `dt_sec`.
///
/// On a hit, returns the contact point on each sphere's surface and the time
/// of impact in seconds (zero when already overlapping at the start of the
/// step).
pub fn sphere_sphere_dynamic(
    sphere_a: Sphere,
    sphere_b: Sphere,
    pos_a: Vec3,
    pos_b: Vec3,
    vel_a: Vec3,
    vel_b: Vec3,
    dt_sec: f32,
) -> Option<(Vec3, Vec3, f32)> {
    let relative_velocity = vel_a - vel_b;
    let start_pt = pos_a;
    let end_pt = start_pt + relative_velocity * dt_sec;
    let ray_dir = end_pt - start_pt;

    let mut t0 = 0.0;
    let mut t1 = 0.0;

    if ray_dir.length_squared() < SHORT_RAY_THRESHOLD * SHORT_RAY_THRESHOLD {
        // Barely any relative motion: fall back to a static overlap test
        let ab = pos_b - pos_a;
        let radius = sphere_a.radius + sphere_b.radius + SHORT_RAY_THRESHOLD;
        if ab.length_squared() > radius * radius {
            return None;
        }
    } else if let Some((hit0, hit1)) = ray_sphere(
        start_pt,
        ray_dir,
        pos_b,
        sphere_a.radius + sphere_b.radius,
    ) {
        t0 = hit0;
        t1 = hit1;
    } else {
        return None;
    }

    // The ray parameter covers the whole step; rescale to seconds
    t0 *= dt_sec;
    t1 *= dt_sec;

    // Collision entirely in the past
    if t1 < 0.0 {
        return None;
    }

    // Earliest non-negative time of impact
    let toi = if t0 < 0.0 { 0.0 } else { t0 };

    // First touch is beyond this step
    if toi > dt_sec {
        return None;
    }

    let new_pos_a = pos_a + vel_a * toi;
    let new_pos_b = pos_b + vel_b * toi;
    let ab = (new_pos_b - new_pos_a).normalize();

    let pt_on_a = new_pos_a + ab * sphere_a.radius;
    let pt_on_b = new_pos_b - ab * sphere_b.radius;

    Some((pt_on_a, pt_on_b, toi))
}

/// Tests two bodies for collision within the step, producing a full contact.
///
/// On a hit both bodies are stepped forward to the time of impact to sample
/// the body-local contact points and the normal, then rewound, so their
/// observable state is unchanged.
pub fn intersect(
    index_a: usize,
    index_b: usize,
    a: &mut Body,
    b: &mut Body,
    dt_sec: f32,
) -> Option<Contact> {
    let (Shape::Sphere(sphere_a), Shape::Sphere(sphere_b)) = (a.shape, b.shape);

    let (pt_on_a_world, pt_on_b_world, time_of_impact) = sphere_sphere_dynamic(
        sphere_a,
        sphere_b,
        a.position,
        b.position,
        a.linear_velocity,
        b.linear_velocity,
        dt_sec,
    )?;

    // Step forward to the collision to capture local-space contact points
    a.update(time_of_impact);
    b.update(time_of_impact);

    let pt_on_a_local = a.world_to_body(pt_on_a_world);
    let pt_on_b_local = b.world_to_body(pt_on_b_world);

    let ab = b.position - a.position;
    let normal = ab.normalize();
    let separation_distance = ab.length() - (sphere_a.radius + sphere_b.radius);

    // Unwind to the start of the step
    a.update(-time_of_impact);
    b.update(-time_of_impact);

    Some(Contact {
        pt_on_a_world,
        pt_on_a_local,
        pt_on_b_world,
        pt_on_b_local,
        normal,
        separation_distance,
        time_of_impact,
        body_a: index_a,
        body_b: index_b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec3_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length_squared() < EPSILON * EPSILON
    }

    #[test]
    fn test_ray_sphere_hit() {
        let (t0, t1) =
            ray_sphere(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, Vec3::ZERO, 1.0).unwrap();

        assert!(approx_eq(t0, 4.0));
        assert!(approx_eq(t1, 6.0));
        assert!(t0 <= t1);
    }

    #[test]
    fn test_ray_sphere_miss() {
        let hit = ray_sphere(Vec3::new(-5.0, 2.0, 0.0), Vec3::X, Vec3::ZERO, 1.0);
        assert!(hit.is_none());
    }

    #[test]
    fn test_ray_sphere_behind_origin() {
        // The infinite line hits, so roots come back, both negative
        let (t0, t1) = ray_sphere(Vec3::new(5.0, 0.0, 0.0), Vec3::X, Vec3::ZERO, 1.0).unwrap();
        assert!(t0 < 0.0);
        assert!(t1 < 0.0);
        assert!(t0 <= t1);
    }

    #[test]
    fn test_dynamic_spheres_collide_mid_step() {
        let sphere = Sphere::new(0.5);
        let (pt_a, pt_b, toi) = sphere_sphere_dynamic(
            sphere,
            sphere,
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::ZERO,
            1.0,
        )
        .unwrap();

        // Gap of 1.0 closed at 10 m/s
        assert!(approx_eq(toi, 0.1));
        assert!(vec3_approx_eq(pt_a, Vec3::new(-0.5, 0.0, 0.0)));
        assert!(vec3_approx_eq(pt_b, Vec3::new(-0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_dynamic_spheres_miss_when_receding() {
        let sphere = Sphere::new(0.5);
        let hit = sphere_sphere_dynamic(
            sphere,
            sphere,
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(-10.0, 0.0, 0.0),
            Vec3::ZERO,
            1.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_dynamic_spheres_too_far_this_step() {
        let sphere = Sphere::new(0.5);
        let hit = sphere_sphere_dynamic(
            sphere,
            sphere,
            Vec3::new(-20.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::ZERO,
            1.0 / 60.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_stationary_overlap_reports_zero_toi() {
        let sphere = Sphere::new(1.0);
        let (_, _, toi) = sphere_sphere_dynamic(
            sphere,
            sphere,
            Vec3::ZERO,
            Vec3::new(1.5, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::ZERO,
            1.0 / 60.0,
        )
        .unwrap();
        assert_eq!(toi, 0.0);
    }

    #[test]
    fn test_stationary_separated_reports_nothing() {
        let sphere = Sphere::new(1.0);
        let hit = sphere_sphere_dynamic(
            sphere,
            sphere,
            Vec3::ZERO,
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::ZERO,
            1.0 / 60.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_intersect_restores_body_state() {
        let mut a = Body::new(Shape::sphere(0.5))
            .with_position(Vec3::new(-2.0, 0.0, 0.0))
            .with_linear_velocity(Vec3::new(10.0, 0.0, 0.0));
        let mut b = Body::new(Shape::sphere(0.5));

        let pos_a = a.position;
        let pos_b = b.position;

        let contact = intersect(0, 1, &mut a, &mut b, 1.0).expect("collision expected");

        assert!(vec3_approx_eq(a.position, pos_a));
        assert!(vec3_approx_eq(b.position, pos_b));
        assert!(approx_eq(contact.time_of_impact, 0.1));
        assert_eq!(contact.body_a, 0);
        assert_eq!(contact.body_b, 1);
    }

    #[test]
    fn test_intersect_normal_points_from_a_to_b() {
        let mut a = Body::new(Shape::sphere(0.5))
            .with_position(Vec3::new(-2.0, 0.0, 0.0))
            .with_linear_velocity(Vec3::new(10.0, 0.0, 0.0));
        let mut b = Body::new(Shape::sphere(0.5));

        let contact = intersect(0, 1, &mut a, &mut b, 1.0).expect("collision expected");
        assert!(vec3_approx_eq(contact.normal, Vec3::X));
        // Touching at the time of impact
        assert!(contact.separation_distance.abs() < 1e-3);
    }

    #[test]
    fn test_intersect_local_points_sit_on_surfaces() {
        let mut a = Body::new(Shape::sphere(0.5))
            .with_position(Vec3::new(-2.0, 0.0, 0.0))
            .with_linear_velocity(Vec3::new(10.0, 0.0, 0.0));
        let mut b = Body::new(Shape::sphere(0.5));

        let contact = intersect(0, 1, &mut a, &mut b, 1.0).expect("collision expected");
        assert!(approx_eq(contact.pt_on_a_local.length(), 0.5));
        assert!(approx_eq(contact.pt_on_b_local.length(), 0.5));
    }
}
