// Combat primitives shared by every actor
//
// - Hit boxes and the AABB overlap test
// - Feedback sinks (damage numbers, health bars)

pub mod feedback;
pub mod hitbox;

pub use feedback::{DamageNumbers, DamageSink, HealthBar, NullDamageSink};
pub use hitbox::{hitboxes_intersect, penetration, Hitbox};
