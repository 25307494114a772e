/// Keyboard key identifier, derived from the platform's logical key.
///
/// Named keys the engine cares about get their own variant; printable keys arrive
/// as `Character`, everything else as `Unknown`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Shift,
    Control,
    Alt,
    Meta,

    /// Printable key, lowercase where the platform reports case.
    Character(char),

    Unknown,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// Physical key code when available, 0 otherwise.
        code: u32,
        /// True when the event is an OS auto-repeat of a held key.
        repeat: bool,
    },

    /// Window focus change.
    Focused(bool),
}

impl InputEvent {
    /// Convenience constructor for a fresh (non-repeat) key press.
    pub fn key_pressed(key: Key) -> Self {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            code: 0,
            repeat: false,
        }
    }

    /// Returns the key if this is a press (first or repeated).
    pub fn pressed_key(&self) -> Option<Key> {
        match self {
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                ..
            } => Some(*key),
            _ => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, code: 0, repeat }
    }

    #[test]
    fn pressed_key_includes_repeats() {
        assert_eq!(
            key(Key::ArrowRight, KeyState::Pressed, true).pressed_key(),
            Some(Key::ArrowRight)
        );
        assert_eq!(InputEvent::key_pressed(Key::ArrowUp).pressed_key(), Some(Key::ArrowUp));
    }

    #[test]
    fn pressed_key_ignores_releases_and_focus() {
        assert_eq!(key(Key::ArrowRight, KeyState::Released, false).pressed_key(), None);
        assert_eq!(InputEvent::Focused(true).pressed_key(), None);
    }
}
