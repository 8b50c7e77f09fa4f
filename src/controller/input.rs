/// Platform-agnostic input handling
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    // Keyboard events
    KeyDown { key: String, repeat: bool },
    KeyUp { key: String },

    // Mouse events
    MouseMove { dx: f32, dy: f32 },
    MouseClick { button: MouseButton, is_down: bool },

    // Window events
    FocusLost,
    VisibilityChanged { visible: bool },
    PointerLockChanged { locked: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn from_web_button(button: i16) -> Self {
        match button {
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::Left,
        }
    }
}

/// Logical movement keys, independent of the physical key bound to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKey {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
}

impl MovementKey {
    pub const ALL: [MovementKey; 4] = [
        MovementKey::Forward,
        MovementKey::Backward,
        MovementKey::StrafeLeft,
        MovementKey::StrafeRight,
    ];
}

/// Held movement keys plus the pointer capture flag.
///
/// Written by key and pointer-lock events, read by the per-frame tick.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<MovementKey>,
    pointer_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_held(&mut self, key: MovementKey, is_down: bool) {
        if is_down {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    pub fn is_held(&self, key: MovementKey) -> bool {
        self.held.contains(&key)
    }

    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }

    pub fn clear_keys(&mut self) {
        self.held.clear();
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
    }
}

/// Key mapping configuration
///
/// Single-character bindings match case-insensitively, so Shift+W still walks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
    pub toggle_light: String,
    pub release_pointer: String,
    /// Arrow keys drive the same movement keys as the bindings above.
    pub arrows: bool,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            backward: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
            toggle_light: "f".to_string(),
            release_pointer: "Escape".to_string(),
            arrows: true,
        }
    }
}

impl KeyBindings {
    pub fn movement_key(&self, key: &str) -> Option<MovementKey> {
        if key.eq_ignore_ascii_case(&self.forward) {
            return Some(MovementKey::Forward);
        }
        if key.eq_ignore_ascii_case(&self.backward) {
            return Some(MovementKey::Backward);
        }
        if key.eq_ignore_ascii_case(&self.left) {
            return Some(MovementKey::StrafeLeft);
        }
        if key.eq_ignore_ascii_case(&self.right) {
            return Some(MovementKey::StrafeRight);
        }
        if !self.arrows {
            return None;
        }
        match key {
            "ArrowUp" => Some(MovementKey::Forward),
            "ArrowDown" => Some(MovementKey::Backward),
            "ArrowLeft" => Some(MovementKey::StrafeLeft),
            "ArrowRight" => Some(MovementKey::StrafeRight),
            _ => None,
        }
    }

    pub fn is_toggle_light(&self, key: &str) -> bool {
        key.eq_ignore_ascii_case(&self.toggle_light)
    }

    pub fn is_release_pointer(&self, key: &str) -> bool {
        key == self.release_pointer
    }

    /// Keys whose browser default action (scrolling) should be suppressed.
    pub fn is_bound(&self, key: &str) -> bool {
        self.movement_key(key).is_some() || self.is_toggle_light(key)
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    pub fn keyboard_event_to_input(e: &KeyboardEvent, is_down: bool) -> InputEvent {
        let key = e.key();
        if is_down {
            InputEvent::KeyDown { key, repeat: e.repeat() }
        } else {
            InputEvent::KeyUp { key }
        }
    }

    pub fn mouse_move_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::MouseMove {
            dx: e.movement_x() as f32,
            dy: e.movement_y() as f32,
        }
    }

    pub fn mouse_click_to_input(e: &MouseEvent, is_down: bool) -> InputEvent {
        InputEvent::MouseClick {
            button: MouseButton::from_web_button(e.button()),
            is_down,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod native {
    use super::*;
    use winit::event::{ElementState, KeyEvent};
    use winit::keyboard::{Key, NamedKey};

    /// Browser-style key name for a winit logical key.
    pub fn key_name(key: &Key) -> Option<String> {
        match key {
            Key::Character(s) => Some(s.to_string()),
            Key::Named(named) => {
                let name = match named {
                    NamedKey::ArrowUp => "ArrowUp",
                    NamedKey::ArrowDown => "ArrowDown",
                    NamedKey::ArrowLeft => "ArrowLeft",
                    NamedKey::ArrowRight => "ArrowRight",
                    NamedKey::Escape => "Escape",
                    NamedKey::Space => " ",
                    NamedKey::Shift => "Shift",
                    NamedKey::Control => "Control",
                    _ => return None,
                };
                Some(name.to_string())
            }
            _ => None,
        }
    }

    pub fn key_event_to_input(event: &KeyEvent) -> Option<InputEvent> {
        let key = key_name(&event.logical_key)?;
        Some(match event.state {
            ElementState::Pressed => InputEvent::KeyDown { key, repeat: event.repeat },
            ElementState::Released => InputEvent::KeyUp { key },
        })
    }

    pub fn mouse_button_to_input(button: winit::event::MouseButton, state: ElementState) -> Option<InputEvent> {
        let button = match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            _ => return None,
        };
        Some(InputEvent::MouseClick { button, is_down: state == ElementState::Pressed })
    }

    pub fn mouse_motion_to_input(delta: (f64, f64)) -> InputEvent {
        InputEvent::MouseMove { dx: delta.0 as f32, dy: delta.1 as f32 }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_key_names_match_browser() {
            assert_eq!(key_name(&Key::Character("w".into())).as_deref(), Some("w"));
            assert_eq!(key_name(&Key::Named(NamedKey::ArrowUp)).as_deref(), Some("ArrowUp"));
            assert_eq!(key_name(&Key::Named(NamedKey::Escape)).as_deref(), Some("Escape"));
            assert_eq!(key_name(&Key::Named(NamedKey::F1)), None);
        }

        #[test]
        fn test_mouse_buttons() {
            assert_eq!(
                mouse_button_to_input(winit::event::MouseButton::Left, ElementState::Pressed),
                Some(InputEvent::MouseClick { button: MouseButton::Left, is_down: true })
            );
            assert_eq!(mouse_button_to_input(winit::event::MouseButton::Back, ElementState::Pressed), None);
        }
    }
}
