//! 1D sweep-and-prune broadphase.
//!
//! Every body's world bounds are expanded by its motion over the step,
//! fattened by a small epsilon, and projected onto a fixed diagonal axis.
//! Sorting the interval endpoints and walking min-to-max emits every pair
//! whose projected intervals overlap. The fixed axis trades selectivity for
//! stability: no per-frame axis choice, no coherence bookkeeping.

use crate::dynamics::Body;
use crate::math::Vec3;

use super::contact::CollisionPair;

/// Margin added to every projected interval, in world units.
const BOUNDS_EPSILON: f32 = 0.01;

/// A projected interval endpoint for one body.
#[derive(Debug, Clone, Copy)]
pub struct PseudoBody {
    /// Index of the body in the scene
    pub id: usize,
    /// Projection of the endpoint onto the sweep axis
    pub value: f32,
    /// True for the interval's lower endpoint
    pub is_min: bool,
}

/// Projects every body's swept, fattened bounds onto the sweep axis and
/// sorts the 2N endpoints.
fn sort_bodies_bounds(bodies: &[Body], dt_sec: f32, sorted: &mut Vec<PseudoBody>) {
    let axis = Vec3::ONE.normalize();

    sorted.clear();
    sorted.reserve(bodies.len() * 2);
    for (id, body) in bodies.iter().enumerate() {
        let sweep = body.linear_velocity * dt_sec;

        let mut bounds = body.world_bounds();
        bounds = bounds.expand_to_include(bounds.min + sweep);
        bounds = bounds.expand_to_include(bounds.max + sweep);
        bounds = bounds.expand(BOUNDS_EPSILON);

        sorted.push(PseudoBody {
            id,
            value: axis.dot(bounds.min),
            is_min: true,
        });
        sorted.push(PseudoBody {
            id,
            value: axis.dot(bounds.max),
            is_min: false,
        });
    }

    sorted.sort_unstable_by(|a, b| a.value.total_cmp(&b.value));
}

/// Walks the sorted endpoint list and emits a pair for every pair of
/// overlapping intervals.
fn build_pairs(sorted: &[PseudoBody], pairs: &mut Vec<CollisionPair>) {
    pairs.clear();

    for (i, a) in sorted.iter().enumerate() {
        if !a.is_min {
            continue;
        }

        for b in &sorted[i + 1..] {
            // Reaching a's max closes the window for a
            if b.id == a.id {
                break;
            }
            if !b.is_min {
                continue;
            }
            pairs.push(CollisionPair::new(a.id, b.id));
        }
    }
}

/// Produces the candidate pairs for this step. The output is a superset of
/// the actually-colliding pairs; callers treat it as a set.
pub fn broad_phase(bodies: &[Body], dt_sec: f32, pairs: &mut Vec<CollisionPair>) {
    let mut sorted = Vec::new();
    sort_bodies_bounds(bodies, dt_sec, &mut sorted);
    build_pairs(&sorted, pairs);
}
