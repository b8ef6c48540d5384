// Character system
//
// This module contains every actor that takes part in combat:
// - Shared entity core (health, hit boxes, knockback, movement)
// - Player and enemy behavior
// - Animation state machine and sprite-sheet clip tables
// - Actor stats
// - The entity manager that runs the per-tick pipeline

pub mod animation;
pub mod enemy;
pub mod entity;
pub mod manager;
pub mod player;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationController, AnimationFrame, ClipDef, ClipTable};
pub use enemy::Enemy;
pub use entity::{Actor, Entity, MoveResult, TargetView};
pub use manager::{ActorId, EnemyId, EntityManager};
pub use player::{ControlState, Player};
pub use state::{AnimationState, Direction};
pub use stats::{ActorStats, EnemyBehavior, FeetProbe};
