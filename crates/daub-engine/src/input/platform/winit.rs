use std::time::Instant;

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{Key as WinitKey, ModifiersState, NamedKey};

use crate::coords::Vec2;
use crate::input::{InputEvent, InputTranslator, Key, Modifiers, MouseButton, PointerKind};

/// Translates a winit `WindowEvent` into zero or more engine `InputEvent`s.
///
/// `scale_factor` converts physical positions to logical pixels.
pub fn translate_window_event(
    translator: &mut InputTranslator,
    scale_factor: f64,
    event: &WindowEvent,
) -> Vec<InputEvent> {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            translator.modifiers = map_modifiers(m.state());
            Vec::new()
        }

        WindowEvent::CursorMoved { position, .. } => {
            vec![translator.pointer_moved(to_logical(scale_factor, *position))]
        }

        WindowEvent::CursorLeft { .. } => {
            translator.pointer_left();
            Vec::new()
        }

        WindowEvent::MouseInput { state, button, .. } => translator.button(
            map_mouse_button(*button),
            *state == ElementState::Pressed,
            Instant::now(),
        ),

        WindowEvent::Touch(touch) => {
            let kind = match touch.phase {
                TouchPhase::Started => PointerKind::TouchStart,
                TouchPhase::Moved => PointerKind::TouchMove,
                TouchPhase::Ended | TouchPhase::Cancelled => PointerKind::TouchEnd,
            };
            vec![translator.touch(kind, to_logical(scale_factor, touch.location))]
        }

        WindowEvent::KeyboardInput { event, .. } => {
            translate_key(translator, &event.logical_key, event.state, event.text.as_deref())
        }

        WindowEvent::Resized(size) => {
            let logical = size.to_logical::<f64>(scale_factor);
            vec![translator.resized(logical.width as f32, logical.height as f32)]
        }

        _ => Vec::new(),
    }
}

/// Key transition from the parts of a winit `KeyEvent`.
pub fn translate_key(
    translator: &mut InputTranslator,
    logical_key: &WinitKey,
    state: ElementState,
    text: Option<&str>,
) -> Vec<InputEvent> {
    translator.key(map_key(logical_key), state == ElementState::Pressed, text.map(str::to_owned))
}

fn to_logical(scale_factor: f64, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(scale_factor);
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Character(s) => s
            .chars()
            .next()
            .map(|c| Key::Char(c.to_ascii_lowercase()))
            .unwrap_or(Key::Unknown),

        WinitKey::Named(named) => match named {
            NamedKey::Escape => Key::Escape,
            NamedKey::Enter => Key::Enter,
            NamedKey::Tab => Key::Tab,
            NamedKey::Backspace => Key::Backspace,
            NamedKey::Space => Key::Space,
            NamedKey::Delete => Key::Delete,
            NamedKey::Home => Key::Home,
            NamedKey::End => Key::End,
            NamedKey::PageUp => Key::PageUp,
            NamedKey::PageDown => Key::PageDown,

            NamedKey::ArrowUp => Key::ArrowUp,
            NamedKey::ArrowDown => Key::ArrowDown,
            NamedKey::ArrowLeft => Key::ArrowLeft,
            NamedKey::ArrowRight => Key::ArrowRight,

            NamedKey::Shift => Key::Shift,
            NamedKey::Control => Key::Control,
            NamedKey::Alt => Key::Alt,
            NamedKey::Super | NamedKey::Meta => Key::Meta,

            NamedKey::F1 => Key::F(1),
            NamedKey::F2 => Key::F(2),
            NamedKey::F3 => Key::F(3),
            NamedKey::F4 => Key::F(4),
            NamedKey::F5 => Key::F(5),
            NamedKey::F6 => Key::F(6),
            NamedKey::F7 => Key::F(7),
            NamedKey::F8 => Key::F(8),
            NamedKey::F9 => Key::F(9),
            NamedKey::F10 => Key::F(10),
            NamedKey::F11 => Key::F(11),
            NamedKey::F12 => Key::F(12),

            _ => Key::Unknown,
        },

        _ => Key::Unknown,
    }
}
