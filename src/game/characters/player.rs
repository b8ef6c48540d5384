// The player actor: input-driven movement, combo attacks and blocking

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;

use crate::game::world::CollisionQuery;

use super::animation::ClipTable;
use super::entity::{Actor, Entity};
use super::state::Direction;
use super::stats::{ActorStats, PLAYER_STATS};

/// Distance of the attack box centre in front of the player
pub const ATTACK_REACH: f32 = 8.0;

/// Movement speed multiplier while holding the guard
pub const BLOCK_SPEED_FACTOR: f32 = 0.5;

/// Decisions derived from input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Pressed this tick (edge)
    pub attack: bool,
    /// Held
    pub block: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    entity: Entity,
    facing: Direction,
    move_intent: Vec2,
    moving: bool,
    is_blocking: bool,
    controls: ControlState,
    speed: f32,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self::with_stats(position, &PLAYER_STATS)
    }

    pub fn with_stats(position: Vec2, stats: &ActorStats) -> Self {
        let mut entity = Entity::new(position, stats, ClipTable::player());
        let attack_box = entity
            .attack_box()
            .with_offset(Direction::Down.unit() * ATTACK_REACH);
        entity.set_attack_box(attack_box);

        Self {
            entity,
            facing: Direction::Down,
            move_intent: Vec2::ZERO,
            moving: false,
            is_blocking: false,
            controls: ControlState::default(),
            speed: stats.speed,
        }
    }

    /// Input for the next update. The attack edge is consumed by `update`.
    pub fn set_controls(&mut self, controls: ControlState) {
        self.controls = controls;
    }

    pub fn controls(&self) -> ControlState {
        self.controls
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Displacement requested this tick
    pub fn move_intent(&self) -> Vec2 {
        self.move_intent
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_blocking(&self) -> bool {
        self.is_blocking
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Place the player somewhere else, e.g. after walking through a door
    pub fn teleport(&mut self, position: Vec2) {
        self.entity.set_position(position);
    }

    pub fn update(&mut self, world: Option<&dyn CollisionQuery>) {
        let controls = self.controls;
        self.controls.attack = false;

        if self.entity.animation().is_locked() {
            self.move_intent = Vec2::ZERO;
            self.moving = false;
            self.entity.update(world);
            return;
        }

        let direction = self.read_direction(&controls);
        self.moving = direction != Vec2::ZERO;

        let mut speed = self.speed;
        if controls.block {
            if !self.is_blocking {
                log::trace!("Player raises guard facing {:?}", self.facing);
            }
            self.is_blocking = true;
            speed *= BLOCK_SPEED_FACTOR;
        } else if self.is_blocking {
            self.is_blocking = false;
            self.entity.animation_mut().play_idle();
        }

        self.move_intent = direction * speed;
        if self.moving {
            self.entity.move_by(self.move_intent, world);
        }

        let facing = self.facing;
        let animation = self.entity.animation_mut();
        animation.set_direction(facing);
        if self.is_blocking {
            if !animation.is_guarding() {
                animation.play_block();
            }
        } else if controls.attack {
            animation.play_attack();
        } else if self.moving {
            animation.play_walk(facing);
        } else {
            animation.play_idle();
        }

        let attack_box = self
            .entity
            .attack_box()
            .with_offset(self.facing.unit() * ATTACK_REACH);
        self.entity.set_attack_box(attack_box);

        self.entity.update(world);
    }

    /// Unit-length (or zero) movement direction; also updates facing
    fn read_direction(&mut self, controls: &ControlState) -> Vec2 {
        let mut direction = Vec2::ZERO;

        if controls.left {
            direction.x = -1.0;
            self.facing = Direction::Left;
        } else if controls.right {
            direction.x = 1.0;
            self.facing = Direction::Right;
        }

        if controls.up {
            direction.y = -1.0;
            self.facing = Direction::Up;
        } else if controls.down {
            direction.y = 1.0;
            self.facing = Direction::Down;
        }

        if direction.x != 0.0 && direction.y != 0.0 {
            direction *= FRAC_1_SQRT_2;
        }
        direction
    }

    /// Where a camera of `viewport` pixels should centre so it stays inside
    /// the map. Axes where the map is smaller than the view are centred on 0.
    pub fn camera_focus(&self, viewport: Vec2, world: &dyn CollisionQuery) -> Vec2 {
        let (w, h) = world.pixel_size();
        let half_map = Vec2::new(w as f32, h as f32) / 2.0;
        let half_view = viewport / 2.0;
        let pos = self.entity.position();

        let axis = |p: f32, map: f32, view: f32| {
            if map <= view {
                0.0
            } else {
                p.clamp(-(map - view), map - view)
            }
        };

        Vec2::new(
            axis(pos.x, half_map.x, half_view.x),
            axis(pos.y, half_map.y, half_view.y),
        )
    }
}

impl Actor for Player {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn is_blocking_attack_from(&self, source: Vec2) -> bool {
        self.is_blocking
            && Direction::from_dominant_axis(source - self.entity.position()) == self.facing
    }

    fn on_block_broken(&mut self) {
        self.is_blocking = false;
    }

    fn on_block_success(&mut self) {
        log::debug!("Player blocked a hit");
        self.entity.animation_mut().play_block_success();
    }
}
