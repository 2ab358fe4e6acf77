//! Window-system independent input events.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Escape,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    F(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    MouseDown(MouseButton),
    /// Pointer position in canvas pixels.
    MouseMove { x: i32, y: i32 },
    Focus(bool),
    /// Window fully hidden (true) or shown again (false).
    Occluded(bool),
    Quit,
}

/// Translation from winit's events.
pub mod winit_input {
    use winit::event::MouseButton as WinitButton;
    use winit::keyboard::{Key as WinitKey, NamedKey};

    use super::{Key, MouseButton};

    pub fn key(key: &WinitKey) -> Option<Key> {
        match key {
            WinitKey::Named(named) => Some(match named {
                NamedKey::Space => Key::Space,
                NamedKey::Enter => Key::Enter,
                NamedKey::Escape => Key::Escape,
                NamedKey::Backspace => Key::Backspace,
                NamedKey::Delete => Key::Delete,
                NamedKey::ArrowLeft => Key::Left,
                NamedKey::ArrowRight => Key::Right,
                NamedKey::ArrowUp => Key::Up,
                NamedKey::ArrowDown => Key::Down,
                NamedKey::Home => Key::Home,
                NamedKey::End => Key::End,
                NamedKey::F1 => Key::F(1),
                NamedKey::F2 => Key::F(2),
                NamedKey::F3 => Key::F(3),
                NamedKey::F4 => Key::F(4),
                NamedKey::F5 => Key::F(5),
                _ => return None,
            }),
            WinitKey::Character(s) => match s.chars().next() {
                Some(' ') => Some(Key::Space),
                Some(c) => Some(Key::Char(c)),
                None => None,
            },
            _ => None,
        }
    }

    pub fn button(button: WinitButton) -> Option<MouseButton> {
        match button {
            WinitButton::Left => Some(MouseButton::Left),
            WinitButton::Right => Some(MouseButton::Right),
            WinitButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}
