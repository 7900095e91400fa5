/// Keyboard key identifier.
///
/// Only the keys the tutorials react to get their own variant; everything
/// else maps to `Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,
    Enter,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    W,
    A,
    S,
    D,
    R,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

impl KeyState {
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == Self::Pressed
    }
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when the event is an auto-repeat.
        repeat: bool,
    },

    /// Window focus change.
    Focused(bool),
}

impl InputEvent {
    /// Whether this is the initial (non-repeat) press of `key`.
    pub fn is_press_of(&self, key: Key) -> bool {
        matches!(
            self,
            Self::Key { key: k, state: KeyState::Pressed, repeat: false } if *k == key
        )
    }
}
