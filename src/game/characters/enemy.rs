// Enemy actor: target tracking, attack cooldown and local pathfinding

use glam::Vec2;

use crate::core::math::normalize_max_component;
use crate::game::world::CollisionQuery;

use super::animation::ClipTable;
use super::entity::{Actor, Entity, TargetView};
use super::manager::ActorId;
use super::state::Direction;
use super::stats::{ActorStats, EnemyBehavior, ENEMY_BEHAVIOR, ENEMY_STATS};

/// Ticks between pathfinder recomputes
pub const PATH_RECALC_INTERVAL: u32 = 10;

/// How far ahead each candidate direction is probed, in pixels
pub const PATH_LOOKAHEAD: f32 = 8.0;

/// Velocity components at or below this count as standing still
const STOP_THRESHOLD: f32 = 0.05;

#[derive(Debug, Clone)]
pub struct Enemy {
    entity: Entity,
    target: Option<ActorId>,
    velocity: Vec2,
    facing: Direction,
    max_speed: f32,
    behavior: EnemyBehavior,
    attack_cooldown: u32,
    path_recalc_timer: u32,
    start_attack: bool,
}

impl Enemy {
    /// Enemy with the default stats
    pub fn new(position: Vec2) -> Self {
        Self::with_stats(position, &ENEMY_STATS, ENEMY_BEHAVIOR)
    }

    pub fn with_stats(position: Vec2, stats: &ActorStats, behavior: EnemyBehavior) -> Self {
        Self {
            entity: Entity::new(position, stats, ClipTable::enemy()).with_health_bar(),
            target: None,
            velocity: Vec2::ZERO,
            facing: Direction::Down,
            max_speed: stats.speed,
            behavior,
            attack_cooldown: 0,
            path_recalc_timer: 0,
            start_attack: false,
        }
    }

    pub fn set_target(&mut self, target: Option<ActorId>) {
        self.target = target;
    }

    pub fn target(&self) -> Option<ActorId> {
        self.target
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn behavior(&self) -> &EnemyBehavior {
        &self.behavior
    }

    /// Ticks left before the next attack is allowed
    pub fn attack_cooldown(&self) -> u32 {
        self.attack_cooldown
    }

    /// Whether an attack was started during the last update
    pub fn started_attack(&self) -> bool {
        self.start_attack
    }

    /// One simulation tick. `target` is a fresh snapshot of whatever this
    /// enemy is chasing, if it still exists.
    pub fn update(&mut self, target: Option<TargetView>, world: Option<&dyn CollisionQuery>) {
        self.start_attack = false;

        if self.entity.animation().is_locked() {
            self.velocity = Vec2::ZERO;
            self.entity.update(world);
            return;
        }

        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);

        self.update_ai(target, world);
        self.apply_velocity(world);
        self.update_animation();

        self.entity.update(world);
    }

    fn update_ai(&mut self, target: Option<TargetView>, world: Option<&dyn CollisionQuery>) {
        let Some(target) = target.filter(|t| t.alive) else {
            self.velocity = Vec2::ZERO;
            return;
        };

        let to_target = target.position - self.entity.position();
        let dist_sq = to_target.length_squared();

        if !self.entity.animation().is_locked()
            && self.attack_cooldown == 0
            && self.entity.attack_hits_view(&target)
        {
            self.velocity = Vec2::ZERO;
            self.start_attack = true;
            self.attack_cooldown = self.behavior.attack_cooldown;
            if to_target != Vec2::ZERO {
                self.facing = Direction::from_dominant_axis(to_target);
            }
            return;
        }

        let aggro_sq = self.behavior.aggro_radius * self.behavior.aggro_radius;
        let lose_sq = self.behavior.lose_radius * self.behavior.lose_radius;

        if dist_sq <= aggro_sq || dist_sq < lose_sq {
            match world {
                Some(world) => self.follow_path(target.position, world),
                None => self.velocity = normalize_max_component(to_target) * self.max_speed,
            }
        } else {
            self.velocity = Vec2::ZERO;
            self.path_recalc_timer = 0;
        }
    }

    /// Probe the four directions and head toward whichever free step lands
    /// closest to the goal. Holds the previous choice between recomputes.
    fn follow_path(&mut self, goal: Vec2, world: &dyn CollisionQuery) {
        if self.path_recalc_timer > 0 {
            self.path_recalc_timer -= 1;
            return;
        }
        self.path_recalc_timer = PATH_RECALC_INTERVAL - 1;

        let here = self.entity.position();
        let mut best: Option<(Direction, f32)> = None;

        for dir in Direction::ALL {
            let next = here + dir.unit() * PATH_LOOKAHEAD;
            if !self.entity.can_stand_at(here, next, world) {
                continue;
            }

            let d_sq = (goal - next).length_squared();
            if best.map_or(true, |(_, best_sq)| d_sq < best_sq) {
                best = Some((dir, d_sq));
            }
        }

        self.velocity = match best {
            Some((dir, _)) => dir.unit() * self.max_speed,
            None => Vec2::ZERO,
        };
    }

    fn apply_velocity(&mut self, world: Option<&dyn CollisionQuery>) {
        if self.velocity == Vec2::ZERO {
            return;
        }

        let result = self.entity.move_by(self.velocity, world);
        if result.blocked_x {
            self.velocity.x = 0.0;
        }
        if result.blocked_y {
            self.velocity.y = 0.0;
        }
    }

    fn update_animation(&mut self) {
        let moving =
            self.velocity.x.abs() > STOP_THRESHOLD || self.velocity.y.abs() > STOP_THRESHOLD;

        let animation = self.entity.animation_mut();
        if self.start_attack {
            animation.set_direction(self.facing);
            animation.play_attack();
        } else if !moving {
            self.velocity = Vec2::ZERO;
            animation.play_idle();
        } else {
            self.facing = Direction::from_dominant_axis(self.velocity);
            animation.play_walk(self.facing);
        }
    }
}

impl Actor for Enemy {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::state::AnimationState;
    use crate::game::combat::{Hitbox, NullDamageSink};
    use crate::game::world::TileMap;
    use approx::assert_relative_eq;

    fn target_at(x: f32, y: f32) -> Option<TargetView> {
        Some(TargetView {
            position: Vec2::new(x, y),
            hurt_box: Hitbox::centered(6.0, 6.0),
            alive: true,
        })
    }

    #[test]
    fn test_defaults() {
        let enemy = Enemy::new(Vec2::ZERO);
        assert_eq!(enemy.entity().health(), 5);
        assert_eq!(enemy.entity().damage(), 1);
        assert_relative_eq!(enemy.max_speed(), 0.7);
        assert_eq!(enemy.behavior().attack_cooldown, 60);
        assert!(enemy.entity().health_bar().is_some());
    }

    #[test]
    fn test_chases_target_inside_aggro_radius() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        enemy.update(target_at(40.0, 0.0), None);

        assert!(!enemy.started_attack());
        assert_relative_eq!(enemy.velocity().x, 0.7);
        assert_relative_eq!(enemy.velocity().y, 0.0);
        assert_relative_eq!(enemy.entity().position().x, 0.7);
        assert_eq!(enemy.facing(), Direction::Right);
        assert_eq!(enemy.entity().animation().state(), AnimationState::Walk);
    }

    #[test]
    fn test_direct_chase_uses_max_component() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        enemy.update(target_at(-30.0, 15.0), None);
        assert_relative_eq!(enemy.velocity().x, -0.7);
        assert_relative_eq!(enemy.velocity().y, 0.35);
        assert_eq!(enemy.facing(), Direction::Left);
    }

    #[test]
    fn test_keeps_chasing_until_lose_radius() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        enemy.update(target_at(0.0, 80.0), None);
        assert_relative_eq!(enemy.velocity().y, 0.7);

        let mut enemy = Enemy::new(Vec2::ZERO);
        enemy.update(target_at(0.0, 120.0), None);
        assert_eq!(enemy.velocity(), Vec2::ZERO);
        assert_eq!(enemy.entity().animation().state(), AnimationState::Idle);
    }

    #[test]
    fn test_no_target_or_dead_target_stops() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        enemy.update(None, None);
        assert_eq!(enemy.velocity(), Vec2::ZERO);

        let dead = target_at(10.0, 0.0).map(|t| TargetView { alive: false, ..t });
        enemy.update(dead, None);
        assert_eq!(enemy.velocity(), Vec2::ZERO);
        assert_eq!(enemy.entity().position(), Vec2::ZERO);
    }

    #[test]
    fn test_attacks_when_in_reach() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        enemy.update(target_at(0.0, -10.0), None);

        assert!(enemy.started_attack());
        assert_eq!(enemy.velocity(), Vec2::ZERO);
        assert_eq!(enemy.attack_cooldown(), 60);
        assert_eq!(enemy.facing(), Direction::Up);
        assert!(enemy.entity().animation().is_attacking());
    }

    #[test]
    fn test_attack_locks_then_cooldown_gates() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        enemy.update(target_at(10.0, 0.0), None);
        assert!(enemy.started_attack());

        // Locked for the 40-tick swing: no movement, cooldown frozen
        for _ in 0..39 {
            enemy.update(target_at(10.0, 0.0), None);
            assert!(!enemy.started_attack());
            assert_eq!(enemy.velocity(), Vec2::ZERO);
        }
        assert_eq!(enemy.attack_cooldown(), 60);
        assert!(!enemy.entity().animation().is_locked());

        // Still cooling down, so it walks into the target instead
        enemy.update(target_at(10.0, 0.0), None);
        assert!(!enemy.started_attack());
        assert_eq!(enemy.attack_cooldown(), 59);
        assert_relative_eq!(enemy.velocity().x, 0.7);
    }

    #[test]
    fn test_hurt_enemy_stands_still() {
        let mut enemy = Enemy::new(Vec2::ZERO);
        enemy
            .entity_mut()
            .take_damage(1, Vec2::new(-1.0, 0.0), &mut NullDamageSink);
        enemy.update(target_at(40.0, 0.0), None);
        assert_eq!(enemy.velocity(), Vec2::ZERO);
        // Only knockback moved it
        assert_relative_eq!(enemy.entity().position().x, 2.0);
    }

    #[test]
    fn test_pathfinder_steps_around_wall() {
        // Wall column at tile x = 5 (x in 8..16) spanning rows 2..=5
        let mut map = TileMap::new(8, 8);
        for ty in 2..=5 {
            map.set_solid(5, ty, true);
        }

        let mut enemy = Enemy::new(Vec2::ZERO);
        enemy.update(target_at(24.0, 0.0), Some(&map));

        assert_eq!(enemy.velocity().x, 0.0);
        assert_relative_eq!(enemy.velocity().y.abs(), 0.7);
    }

    #[test]
    fn test_pathfinder_holds_velocity_between_recomputes() {
        let map = TileMap::new(16, 16);
        let mut enemy = Enemy::new(Vec2::ZERO);
        enemy.update(target_at(40.0, 0.0), Some(&map));
        assert_relative_eq!(enemy.velocity().x, 0.7);

        // Target jumps behind; the old heading is kept until the next recompute
        for _ in 0..9 {
            enemy.update(target_at(-40.0, 0.0), Some(&map));
            assert_relative_eq!(enemy.velocity().x, 0.7);
        }
        enemy.update(target_at(-40.0, 0.0), Some(&map));
        assert_relative_eq!(enemy.velocity().x, -0.7);
    }

    #[test]
    fn test_blocked_axis_zeroes_velocity() {
        // Wall column at tile x = 5 (x in 8..16)
        let mut map = TileMap::new(8, 8);
        for ty in 0..8 {
            map.set_solid(5, ty, true);
        }
        let mut enemy = Enemy::new(Vec2::new(2.5, 0.0));
        enemy.velocity = Vec2::new(0.7, 0.7);
        enemy.apply_velocity(Some(&map));

        assert_eq!(enemy.velocity().x, 0.0);
        assert_relative_eq!(enemy.velocity().y, 0.7);
        assert_relative_eq!(enemy.entity().position().x, 2.5);

        enemy.update_animation();
        assert_eq!(enemy.facing(), Direction::Down);
    }
}
