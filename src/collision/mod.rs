pub mod broad_phase;
pub mod contact;
pub mod narrow_phase;

pub use broad_phase::{broad_phase, PseudoBody};
pub use contact::{CollisionPair, Contact};
pub use narrow_phase::{intersect, ray_sphere, sphere_sphere_dynamic};
