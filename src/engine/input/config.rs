// Remappable key bindings

use std::collections::HashMap;

use super::action::{default_bindings, Action, InputSource};

/// Which action each key or button triggers. A source maps to at most one
/// action; an action may have several sources.
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// No bindings at all
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::from_bindings(default_bindings())
    }

    /// Bind `source` to `action`, replacing whatever it triggered before
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    pub fn unbind_source(&mut self, source: InputSource) {
        self.bindings.remove(&source);
    }

    /// Remove every source of `action`
    pub fn unbind_action(&mut self, action: Action) {
        self.bindings.retain(|_, bound| *bound != action);
    }

    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    pub fn get_sources(&self, action: Action) -> Vec<InputSource> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(source, _)| *source)
            .collect()
    }

    pub fn has_binding(&self, action: Action) -> bool {
        self.bindings.values().any(|bound| *bound == action)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::with_defaults();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::MouseButton;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_bind_and_lookup() {
        let mut config = InputConfig::new();
        config.bind(InputSource::key(KeyCode::Space), Action::Attack);
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::Space)),
            Some(Action::Attack)
        );
        assert!(config.has_binding(Action::Attack));
    }

    #[test]
    fn test_rebind_source_moves_action() {
        let mut config = InputConfig::new();
        let space = InputSource::key(KeyCode::Space);
        config.bind(space, Action::Attack);
        config.bind(space, Action::Block);

        assert_eq!(config.get_action(space), Some(Action::Block));
        assert!(!config.has_binding(Action::Attack));
    }

    #[test]
    fn test_unbind_source_keeps_other_sources() {
        let mut config = InputConfig::with_defaults();
        config.unbind_source(InputSource::key(KeyCode::KeyJ));
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyJ)), None);
        assert!(config.has_binding(Action::Attack));
    }

    #[test]
    fn test_unbind_action() {
        let mut config = InputConfig::with_defaults();
        config.unbind_action(Action::Block);
        assert!(!config.has_binding(Action::Block));
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyK)), None);
        assert_eq!(config.get_action(InputSource::mouse(MouseButton::Right)), None);
    }

    #[test]
    fn test_defaults_have_two_sources_per_direction() {
        let config = InputConfig::with_defaults();
        assert_eq!(config.get_sources(Action::MoveLeft).len(), 2);
        assert_eq!(config.get_sources(Action::Pause).len(), 2);
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut config = InputConfig::with_defaults();
        config.clear();
        assert!(!config.has_binding(Action::MoveUp));
        config.reset_to_defaults();
        assert!(config.has_binding(Action::MoveUp));
    }
}
