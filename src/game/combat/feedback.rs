// Combat feedback: floating damage numbers and health bars
//
// Both are view models only. A renderer reads them each frame; the combat
// core only pushes events into them.

use arrayvec::ArrayVec;
use glam::Vec2;

/// Maximum number of damage popups alive at once
pub const MAX_DAMAGE_NUMBERS: usize = 16;

/// How many ticks a damage popup lives
pub const DAMAGE_NUMBER_LIFETIME: u32 = 30;

/// Upward drift of a popup per tick
const DAMAGE_NUMBER_DRIFT: Vec2 = Vec2::new(0.0, -0.4);

/// Number of distinct health bar graphics (0 = empty, 14 = full)
pub const HEALTH_BAR_STAGES: i32 = 15;

/// Vertical distance of the bar above its owner
const HEALTH_BAR_Y_OFFSET: f32 = -14.0;

/// Receives "show this damage amount here" events from the combat core.
///
/// Fire-and-forget: implementations must swallow their own failures
/// (a full pool, a missing font, ...).
pub trait DamageSink {
    fn spawn(&mut self, at: Vec2, amount: i32);
}

/// Sink that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDamageSink;

impl DamageSink for NullDamageSink {
    fn spawn(&mut self, _at: Vec2, _amount: i32) {}
}

/// A single floating damage popup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageNumber {
    pub position: Vec2,
    pub amount: i32,
    pub ticks_left: u32,
}

/// Bounded pool of floating damage popups
#[derive(Debug, Default)]
pub struct DamageNumbers {
    entries: ArrayVec<DamageNumber, MAX_DAMAGE_NUMBERS>,
}

impl DamageNumbers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drift every popup upward and drop the expired ones
    pub fn update(&mut self) {
        for entry in &mut self.entries {
            entry.position += DAMAGE_NUMBER_DRIFT;
            entry.ticks_left = entry.ticks_left.saturating_sub(1);
        }
        self.entries.retain(|entry| entry.ticks_left > 0);
    }

    /// Popups currently alive, oldest first
    pub fn entries(&self) -> &[DamageNumber] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl DamageSink for DamageNumbers {
    fn spawn(&mut self, at: Vec2, amount: i32) {
        let entry = DamageNumber {
            position: at,
            amount,
            ticks_left: DAMAGE_NUMBER_LIFETIME,
        };

        if self.entries.try_push(entry).is_err() {
            log::trace!("Damage number pool full, dropping popup for {}", amount);
        }
    }
}

/// Health bar drawn above an actor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HealthBar {
    /// Graphic index in `0..HEALTH_BAR_STAGES`
    pub stage: i32,
    pub position: Vec2,
    pub z_order: i32,
    pub visible: bool,
}

impl HealthBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the bar for the owner's current state
    pub fn update(&mut self, owner_pos: Vec2, health: i32, max_health: i32, z_order: i32) {
        if max_health <= 0 {
            self.hide();
            return;
        }

        self.stage = health_stage(health, max_health);
        self.position = owner_pos + Vec2::new(0.0, HEALTH_BAR_Y_OFFSET);
        // Slightly in front of the owner
        self.z_order = z_order - 1;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Map `health` in `[0, max_health]` onto a rounded bar stage
pub fn health_stage(health: i32, max_health: i32) -> i32 {
    if max_health <= 0 {
        return 0;
    }

    let health = health.clamp(0, max_health);
    if health == 0 {
        return 0;
    }

    let stage = (health * (HEALTH_BAR_STAGES - 1) + max_health / 2) / max_health;
    stage.clamp(0, HEALTH_BAR_STAGES - 1)
}
