use std::collections::HashSet;

use super::types::{InputEvent, Key};

/// Keys currently held in a window.
///
/// The runtime feeds it every translated event and hands it to the scene's
/// `update` each frame.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<Key>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match *ev {
            // Keys released while unfocused never reach us.
            InputEvent::Focused(false) => self.keys_down.clear(),
            InputEvent::Focused(true) => {}

            InputEvent::Key { key, state, .. } => {
                if state.is_pressed() {
                    self.keys_down.insert(key);
                } else {
                    self.keys_down.remove(&key);
                }
            }
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether any of `keys` is held.
    pub fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|&key| self.is_down(key))
    }
}
