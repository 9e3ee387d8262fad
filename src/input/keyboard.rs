use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::camera::Movement;

// Queried in a fixed order so movement application is deterministic
// regardless of hash-set iteration order.
const MOVEMENT_KEYS: [(KeyCode, Movement); 6] = [
    (KeyCode::KeyW, Movement::Forward),
    (KeyCode::KeyS, Movement::Backward),
    (KeyCode::KeyA, Movement::Left),
    (KeyCode::KeyD, Movement::Right),
    (KeyCode::KeyE, Movement::Up),
    (KeyCode::KeyQ, Movement::Down),
];

/// The camera movement driven by a held key, if any (WASD plus E/Q for
/// up/down).
#[must_use]
pub fn movement_for_key(code: KeyCode) -> Option<Movement> {
    MOVEMENT_KEYS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, movement)| *movement)
}

/// Tracks which physical keys are currently held.
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    /// New state with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns `true` if the key was not already held,
    /// for edge-triggered actions that must fire once per press.
    pub fn press(&mut self, code: KeyCode) -> bool {
        self.held.insert(code)
    }

    /// Record a key release.
    pub fn release(&mut self, code: KeyCode) {
        let _ = self.held.remove(&code);
    }

    /// Whether `code` is currently held.
    #[must_use]
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    /// The movement directions for every held movement key, in a stable
    /// order.
    #[must_use]
    pub fn movements(&self) -> Vec<Movement> {
        MOVEMENT_KEYS
            .iter()
            .filter(|(key, _)| self.held.contains(key))
            .map(|(_, movement)| *movement)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_map_to_movements() {
        let mut keys = KeyboardState::new();
        assert!(keys.press(KeyCode::KeyW));
        assert!(keys.press(KeyCode::KeyD));
        assert_eq!(
            keys.movements(),
            vec![Movement::Forward, Movement::Right]
        );
        keys.release(KeyCode::KeyW);
        assert_eq!(keys.movements(), vec![Movement::Right]);
    }

    #[test]
    fn press_reports_edges_only() {
        let mut keys = KeyboardState::new();
        assert!(keys.press(KeyCode::Tab));
        // Held-down key repeat is not a new press.
        assert!(!keys.press(KeyCode::Tab));
        keys.release(KeyCode::Tab);
        assert!(keys.press(KeyCode::Tab));
    }

    #[test]
    fn non_movement_keys_have_no_mapping() {
        assert_eq!(movement_for_key(KeyCode::Space), None);
        assert_eq!(movement_for_key(KeyCode::KeyE), Some(Movement::Up));
        assert_eq!(movement_for_key(KeyCode::KeyQ), Some(Movement::Down));
    }
}
