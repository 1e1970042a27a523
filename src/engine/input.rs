use std::collections::HashSet;

use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

pub trait KeyInput {
    fn is_key_pressed(&self, key: KeyCode) -> bool;
}

/// Physical keys currently held down, as reported by the window's events.
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.pressed.insert(key) {
                    tracing::trace!(?key, "key pressed");
                }
            }
            ElementState::Released => {
                if self.pressed.remove(&key) {
                    tracing::trace!(?key, "key released");
                }
            }
        }
    }

    /// Drops every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }
}

impl KeyInput for KeyboardState {
    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_then_release() {
        let mut keys = KeyboardState::default();
        keys.handle_key(KeyCode::ArrowUp, ElementState::Pressed);
        assert!(keys.is_key_pressed(KeyCode::ArrowUp));
        assert!(!keys.is_key_pressed(KeyCode::ArrowDown));

        keys.handle_key(KeyCode::ArrowUp, ElementState::Released);
        assert!(!keys.is_key_pressed(KeyCode::ArrowUp));
    }

    #[test]
    fn test_repeat_press_is_idempotent() {
        let mut keys = KeyboardState::default();
        keys.handle_key(KeyCode::Space, ElementState::Pressed);
        keys.handle_key(KeyCode::Space, ElementState::Pressed);
        keys.handle_key(KeyCode::Space, ElementState::Released);
        assert!(!keys.is_key_pressed(KeyCode::Space));
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyboardState::default();
        keys.handle_key(KeyCode::ArrowUp, ElementState::Pressed);
        keys.handle_key(KeyCode::ArrowDown, ElementState::Pressed);
        keys.release_all();
        assert!(!keys.is_key_pressed(KeyCode::ArrowUp));
        assert!(!keys.is_key_pressed(KeyCode::ArrowDown));
    }
}
