use ::winit::event::{ElementState, KeyEvent, WindowEvent};
use ::winit::keyboard::{Key as WinitKey, NamedKey, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput { event, .. } => Some(translate_key_event(event)),

        _ => None,
    }
}

fn translate_key_event(event: &KeyEvent) -> InputEvent {
    let state = match event.state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    };

    let code = match event.physical_key {
        PhysicalKey::Code(code) => code as u32,
        // NativeKeyCode has no stable numeric form.
        PhysicalKey::Unidentified(_) => 0,
    };

    InputEvent::Key {
        key: map_logical_key(&event.logical_key),
        state,
        code,
        repeat: event.repeat,
    }
}

fn map_logical_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => match named {
            NamedKey::ArrowUp => Key::ArrowUp,
            NamedKey::ArrowDown => Key::ArrowDown,
            NamedKey::ArrowLeft => Key::ArrowLeft,
            NamedKey::ArrowRight => Key::ArrowRight,

            NamedKey::Escape => Key::Escape,
            NamedKey::Enter => Key::Enter,
            NamedKey::Tab => Key::Tab,
            NamedKey::Backspace => Key::Backspace,
            NamedKey::Space => Key::Space,

            NamedKey::Shift => Key::Shift,
            NamedKey::Control => Key::Control,
            NamedKey::Alt => Key::Alt,
            NamedKey::Super | NamedKey::Meta => Key::Meta,

            _ => Key::Unknown,
        },

        WinitKey::Character(s) => s
            .chars()
            .next()
            .map(|c| Key::Character(c.to_ascii_lowercase()))
            .unwrap_or(Key::Unknown),

        _ => Key::Unknown,
    }
}
