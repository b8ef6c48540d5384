// Input manager - turns winit events into actions

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::player::PlayerInput;
use crate::game::characters::ControlState;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Routes raw key and mouse events through the bindings into `PlayerInput`
#[derive(Debug)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::with_defaults())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Key repeats are not new presses
        if event.repeat {
            return;
        }
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_source(InputSource::key(key_code), event.state);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_event(&mut self, button: MouseButton, state: ElementState) {
        self.process_source(InputSource::mouse(button), state);
    }

    fn process_source(&mut self, source: InputSource, state: ElementState) {
        let Some(action) = self.config.get_action(source) else {
            return;
        };
        match state {
            ElementState::Pressed => self.player.press(action),
            ElementState::Released => self.player.release(action),
        }
    }

    /// Update input state for a new frame
    /// Call this once per frame after processing all events
    pub fn update(&mut self) {
        self.player.update();
    }

    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.player.just_pressed(action)
    }

    /// Combat decisions for the current frame
    pub fn controls(&self) -> ControlState {
        self.player.controls()
    }

    /// Drop every held input, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.player.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_binding_routes_to_attack() {
        let mut manager = InputManager::new();
        manager.process_mouse_event(MouseButton::Left, ElementState::Pressed);
        assert!(manager.controls().attack);
        assert!(manager.just_pressed(Action::Attack));

        manager.update();
        assert!(!manager.controls().attack);
        assert!(manager.player().is_pressed(Action::Attack));
    }

    #[test]
    fn test_unbound_mouse_button_is_ignored() {
        let mut manager = InputManager::new();
        manager.process_mouse_event(MouseButton::Middle, ElementState::Pressed);
        assert_eq!(manager.controls(), ControlState::default());
    }

    #[test]
    fn test_block_held_across_frames() {
        let mut manager = InputManager::new();
        manager.process_mouse_event(MouseButton::Right, ElementState::Pressed);
        manager.update();
        manager.update();
        assert!(manager.controls().block);

        manager.process_mouse_event(MouseButton::Right, ElementState::Released);
        assert!(!manager.controls().block);
    }

    #[test]
    fn test_remapped_config() {
        let mut manager = InputManager::new();
        manager.config_mut().unbind_action(Action::Attack);
        manager.process_mouse_event(MouseButton::Left, ElementState::Pressed);
        assert!(!manager.controls().attack);
    }

    #[test]
    fn test_reset() {
        let mut manager = InputManager::new();
        manager.process_mouse_event(MouseButton::Right, ElementState::Pressed);
        manager.reset();
        assert!(!manager.controls().block);
    }
}
