// Per-frame action state for the local player

use std::collections::HashSet;

use super::action::Action;
use crate::game::characters::ControlState;

/// Pressed state plus the edges seen since the last `update`
#[derive(Debug, Default)]
pub struct PlayerInput {
    pressed: HashSet<Action>,
    pressed_last_frame: HashSet<Action>,
    went_down: HashSet<Action>,
    went_up: HashSet<Action>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Pressed since the last `update`
    pub fn just_pressed(&self, action: Action) -> bool {
        self.went_down.contains(&action)
    }

    /// Released since the last `update`
    pub fn just_released(&self, action: Action) -> bool {
        self.went_up.contains(&action)
    }

    /// Down now and at the end of the previous frame
    pub fn is_held(&self, action: Action) -> bool {
        self.pressed.contains(&action) && self.pressed_last_frame.contains(&action)
    }

    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.went_down.insert(action);
        }
    }

    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.went_up.insert(action);
        }
    }

    /// Start a new input frame: forget edges, remember what is down
    pub(crate) fn update(&mut self) {
        self.went_down.clear();
        self.went_up.clear();
        self.pressed_last_frame.clone_from(&self.pressed);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Combat decisions for this frame. Attack is an edge, everything else
    /// is held.
    pub fn controls(&self) -> ControlState {
        ControlState {
            left: self.is_pressed(Action::MoveLeft),
            right: self.is_pressed(Action::MoveRight),
            up: self.is_pressed(Action::MoveUp),
            down: self.is_pressed(Action::MoveDown),
            attack: self.just_pressed(Action::Attack),
            block: self.is_pressed(Action::Block),
        }
    }
}
