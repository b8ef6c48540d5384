// Actions the player can trigger and where they come from

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Attack,
    Block,
    Pause,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Attack,
        Action::Block,
        Action::Pause,
    ];
}

/// A physical key or mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

const DEFAULT_BINDINGS: [(InputSource, Action); 14] = [
    // WASD
    (InputSource::Keyboard(KeyCode::KeyW), Action::MoveUp),
    (InputSource::Keyboard(KeyCode::KeyS), Action::MoveDown),
    (InputSource::Keyboard(KeyCode::KeyA), Action::MoveLeft),
    (InputSource::Keyboard(KeyCode::KeyD), Action::MoveRight),
    // Arrows
    (InputSource::Keyboard(KeyCode::ArrowUp), Action::MoveUp),
    (InputSource::Keyboard(KeyCode::ArrowDown), Action::MoveDown),
    (InputSource::Keyboard(KeyCode::ArrowLeft), Action::MoveLeft),
    (InputSource::Keyboard(KeyCode::ArrowRight), Action::MoveRight),
    (InputSource::Keyboard(KeyCode::KeyJ), Action::Attack),
    (InputSource::Keyboard(KeyCode::KeyK), Action::Block),
    (InputSource::Mouse(MouseButton::Left), Action::Attack),
    (InputSource::Mouse(MouseButton::Right), Action::Block),
    (InputSource::Keyboard(KeyCode::KeyP), Action::Pause),
    (InputSource::Keyboard(KeyCode::Escape), Action::Pause),
];

/// Default keyboard and mouse layout
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    DEFAULT_BINDINGS.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_action_is_bound() {
        let bindings = default_bindings();
        for action in Action::ALL {
            assert!(
                bindings.iter().any(|(_, a)| *a == action),
                "{:?} has no default binding",
                action
            );
        }
    }

    #[test]
    fn test_no_duplicate_inputs() {
        let mut seen = HashSet::new();
        for (source, _) in default_bindings() {
            assert!(seen.insert(source), "{:?} is bound twice", source);
        }
    }
}
