// Actor stats - fixed numbers an actor is built from
// Player and enemies share one struct; only the presets differ

use crate::game::combat::Hitbox;

/// Vertical offsets of the collision sample line below an actor's anchor
///
/// Moving up tests the line at `up`, anything else tests it at `down`, so
/// the actor's head can overlap a wall above while its feet stay clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeetProbe {
    pub up: f32,
    pub down: f32,
}

/// Combat and movement numbers for one kind of actor
#[derive(Debug, Clone, PartialEq)]
pub struct ActorStats {
    // Combat
    pub max_health: i32,
    pub damage: i32,
    pub hurt_box: Hitbox,
    pub attack_box: Hitbox,
    /// Ticks of invulnerability after a hit
    pub invuln_duration: u32,

    // Knockback
    pub knockback_duration: u32,
    /// Pixels per tick while knocked back
    pub knockback_strength: f32,

    // Movement
    /// Pixels per tick
    pub speed: f32,
    pub feet: FeetProbe,
}

/// Enemy-only AI tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyBehavior {
    /// Start chasing inside this distance
    pub aggro_radius: f32,
    /// Keep chasing until the target is at least this far
    pub lose_radius: f32,
    /// Ticks between attacks
    pub attack_cooldown: u32,
}

pub const PLAYER_STATS: ActorStats = ActorStats {
    max_health: 10,
    damage: 1,
    hurt_box: Hitbox::centered(6.0, 6.0),
    attack_box: Hitbox::centered(6.0, 6.0),
    invuln_duration: 60,

    knockback_duration: 6,
    knockback_strength: 2.0,

    speed: 0.6,
    feet: FeetProbe { up: 6.0, down: 9.0 },
};

pub const ENEMY_STATS: ActorStats = ActorStats {
    max_health: 5,
    damage: 1,
    hurt_box: Hitbox::centered(6.0, 6.0),
    attack_box: Hitbox::centered(6.0, 6.0),
    invuln_duration: 30,

    knockback_duration: 6,
    knockback_strength: 2.0,

    speed: 0.7,
    feet: FeetProbe { up: 2.0, down: 6.0 },
};

pub const ENEMY_BEHAVIOR: EnemyBehavior = EnemyBehavior {
    aggro_radius: 50.0,
    lose_radius: 100.0,
    attack_cooldown: 60,
};

impl ActorStats {
    pub fn player() -> Self {
        PLAYER_STATS
    }

    pub fn enemy() -> Self {
        ENEMY_STATS
    }
}

impl Default for ActorStats {
    fn default() -> Self {
        PLAYER_STATS
    }
}

impl Default for EnemyBehavior {
    fn default() -> Self {
        ENEMY_BEHAVIOR
    }
}
