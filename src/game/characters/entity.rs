// Shared actor core: health, hit boxes, knockback and tile-aware movement

use glam::Vec2;

use crate::core::math::unit_or;
use crate::game::combat::{hitboxes_intersect, DamageSink, HealthBar, Hitbox};
use crate::game::world::CollisionQuery;

use super::animation::{AnimationController, AnimationFrame, ClipTable};
use super::stats::{ActorStats, FeetProbe};

/// Knockback direction used when the source sits exactly on the victim
const DEFAULT_KNOCKBACK_DIR: Vec2 = Vec2::new(0.0, -1.0);

/// Draw-order key for a vertical position: lower on screen draws in front.
/// Rounds toward zero and saturates instead of overflowing.
fn z_key(y: f32) -> i32 {
    (y.trunc() as i32).saturating_neg()
}

/// Which axes were refused by collision during a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    pub blocked_x: bool,
    pub blocked_y: bool,
}

/// In-flight knockback impulse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knockback {
    pub direction: Vec2,
    /// Remaining ticks
    pub timer: u32,
    pub duration: u32,
    /// Pixels per tick
    pub strength: f32,
}

impl Knockback {
    pub fn is_active(&self) -> bool {
        self.timer > 0
    }
}

/// Read-only snapshot of another actor, taken before it is used as a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub position: Vec2,
    pub hurt_box: Hitbox,
    pub alive: bool,
}

/// State every actor in the world carries
#[derive(Debug, Clone)]
pub struct Entity {
    position: Vec2,
    health: i32,
    max_health: i32,
    damage: i32,
    hurt_box: Hitbox,
    attack_box: Hitbox,
    invuln_timer: u32,
    invuln_duration: u32,
    knockback: Knockback,
    active: bool,
    z_order: i32,
    feet: FeetProbe,
    animation: AnimationController,
    health_bar: Option<HealthBar>,
}

impl Entity {
    pub fn new(position: Vec2, stats: &ActorStats, clips: ClipTable) -> Self {
        let max_health = stats.max_health.max(1);

        Self {
            position,
            health: max_health,
            max_health,
            damage: stats.damage,
            hurt_box: stats.hurt_box,
            attack_box: stats.attack_box,
            invuln_timer: 0,
            invuln_duration: stats.invuln_duration,
            knockback: Knockback {
                direction: Vec2::ZERO,
                timer: 0,
                duration: stats.knockback_duration,
                strength: stats.knockback_strength,
            },
            active: true,
            z_order: z_key(position.y),
            feet: stats.feet,
            animation: AnimationController::new(clips),
            health_bar: None,
        }
    }

    /// Attach a health bar view to this entity
    pub fn with_health_bar(mut self) -> Self {
        self.health_bar = Some(HealthBar::new());
        self
    }

    // Accessors

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Teleport without collision checks
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn hurt_box(&self) -> &Hitbox {
        &self.hurt_box
    }

    pub fn attack_box(&self) -> &Hitbox {
        &self.attack_box
    }

    pub fn set_attack_box(&mut self, attack_box: Hitbox) {
        self.attack_box = attack_box;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0
    }

    pub fn invuln_timer(&self) -> u32 {
        self.invuln_timer
    }

    pub fn knockback(&self) -> &Knockback {
        &self.knockback
    }

    pub fn feet(&self) -> FeetProbe {
        self.feet
    }

    /// Draw order key; smaller values are drawn in front
    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    pub fn animation(&self) -> &AnimationController {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut AnimationController {
        &mut self.animation
    }

    pub fn health_bar(&self) -> Option<&HealthBar> {
        self.health_bar.as_ref()
    }

    /// Sprite frame a renderer should draw
    pub fn frame(&self) -> AnimationFrame {
        self.animation.frame()
    }

    /// Active and not hidden by a finished death clip
    pub fn is_visible(&self) -> bool {
        self.active && self.animation.is_visible()
    }

    pub fn view(&self) -> TargetView {
        TargetView {
            position: self.position,
            hurt_box: self.hurt_box,
            alive: self.is_alive(),
        }
    }

    // Combat

    /// Apply a hit coming from `source`.
    ///
    /// Ignored when `amount <= 0` or the entity is dead, inactive or
    /// invulnerable.
    pub fn take_damage(&mut self, amount: i32, source: Vec2, sink: &mut dyn DamageSink) {
        if amount <= 0 || !self.is_alive() || !self.active || self.is_invulnerable() {
            return;
        }

        self.health = (self.health - amount).max(0);
        self.invuln_timer = self.invuln_duration;

        if self.health == 0 {
            log::debug!("Entity at {:?} died", self.position);
            self.animation.play_death();
        } else {
            self.animation.play_hurt();
        }

        self.knockback.direction = unit_or(self.position - source, DEFAULT_KNOCKBACK_DIR);
        self.knockback.timer = self.knockback.duration;

        sink.spawn(self.position, amount);
    }

    /// Hit with no meaningful source; knockback goes straight up
    pub fn take_damage_here(&mut self, amount: i32, sink: &mut dyn DamageSink) {
        self.take_damage(amount, self.position, sink);
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        hitboxes_intersect(&self.hurt_box, self.position, &other.hurt_box, other.position)
    }

    pub fn attack_hits(&self, other: &Entity) -> bool {
        hitboxes_intersect(&self.attack_box, self.position, &other.hurt_box, other.position)
    }

    pub fn overlaps_view(&self, other: &TargetView) -> bool {
        hitboxes_intersect(&self.hurt_box, self.position, &other.hurt_box, other.position)
    }

    pub fn attack_hits_view(&self, other: &TargetView) -> bool {
        hitboxes_intersect(&self.attack_box, self.position, &other.hurt_box, other.position)
    }

    // Movement

    /// Whether the feet line at `new` is clear, given the entity came from `old`
    pub fn can_stand_at(&self, old: Vec2, new: Vec2, world: &dyn CollisionQuery) -> bool {
        let feet_y = if new.y < old.y { self.feet.up } else { self.feet.down };
        let center = new + Vec2::new(0.0, feet_y);
        let hw = self.hurt_box.half_width;

        !world.is_solid(center)
            && !world.is_solid(center - Vec2::new(hw, 0.0))
            && !world.is_solid(center + Vec2::new(hw - 1.0, 0.0))
    }

    /// Move X then Y, dropping whichever axis would end inside a wall, then
    /// clamp to the map. Without a world the move is applied as is.
    pub fn move_by(&mut self, delta: Vec2, world: Option<&dyn CollisionQuery>) -> MoveResult {
        let Some(world) = world else {
            self.position += delta;
            return MoveResult::default();
        };

        let mut result = MoveResult::default();

        if delta.x != 0.0 {
            let candidate = self.position + Vec2::new(delta.x, 0.0);
            if self.can_stand_at(self.position, candidate, world) {
                self.position = candidate;
            } else {
                result.blocked_x = true;
            }
        }

        if delta.y != 0.0 {
            let candidate = self.position + Vec2::new(0.0, delta.y);
            if self.can_stand_at(self.position, candidate, world) {
                self.position = candidate;
            } else {
                result.blocked_y = true;
            }
        }

        self.position = world.clamp_to_bounds(self.position);
        result
    }

    /// Per-tick bookkeeping shared by every actor
    pub fn update(&mut self, world: Option<&dyn CollisionQuery>) {
        if self.knockback.is_active() {
            let step = self.knockback.direction * self.knockback.strength;
            self.move_by(step, world);
            self.knockback.timer -= 1;
        }

        self.animation.update();
        self.z_order = z_key(self.position.y);

        let visible = self.active && self.is_alive();
        if let Some(bar) = self.health_bar.as_mut() {
            if visible {
                bar.update(self.position, self.health, self.max_health, self.z_order);
            } else {
                bar.hide();
            }
        }

        self.invuln_timer = self.invuln_timer.saturating_sub(1);
    }

    /// Show or hide the entity without touching its state
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            if let Some(bar) = self.health_bar.as_mut() {
                bar.hide();
            }
        }
    }
}

/// Something that can be hit: an `Entity` plus optional blocking behavior
pub trait Actor {
    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    /// Whether a hit coming from `source` is stopped by a guard
    fn is_blocking_attack_from(&self, _source: Vec2) -> bool {
        false
    }

    /// Called when a hit gets through
    fn on_block_broken(&mut self) {}

    /// Called when a hit is stopped by the guard
    fn on_block_success(&mut self) {
        self.entity_mut().animation_mut().play_block_success();
    }

    /// Deliver a hit, giving the actor a chance to block it first.
    /// Returns whether damage was applied.
    fn receive_hit(&mut self, amount: i32, source: Vec2, sink: &mut dyn DamageSink) -> bool {
        let entity = self.entity();
        if amount <= 0 || !entity.is_alive() || !entity.is_active() || entity.is_invulnerable() {
            return false;
        }

        if self.is_blocking_attack_from(source) {
            self.on_block_success();
            return false;
        }

        self.on_block_broken();
        self.entity_mut().take_damage(amount, source, sink);
        true
    }
}

impl Actor for Entity {
    fn entity(&self) -> &Entity {
        self
    }

    fn entity_mut(&mut self) -> &mut Entity {
        self
    }
}
