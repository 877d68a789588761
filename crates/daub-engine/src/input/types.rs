use std::fmt;

/// Keyboard key identifier, derived from the logical (layout-aware) key.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    /// Printable key, lowercased.
    Char(char),
    /// Function key `F1`..`F12`.
    F(u8),

    /// Key not represented here.
    Unknown,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Pointer-class events. These are hit-tested against the scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PointerKind {
    Click,
    Down,
    Up,
    Move,
    DoubleClick,
    TouchStart,
    TouchMove,
    TouchEnd,
}

/// Key-class events. These bypass hit-testing.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum KeyKind {
    Down,
    Up,
    /// A key press that produced text.
    Press,
}

/// Normalized input sample handed to the scene's listener.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer or touch sample at logical coordinates.
    Pointer {
        kind: PointerKind,
        x: f32,
        y: f32,
        button: Option<MouseButton>,
    },

    Key {
        kind: KeyKind,
        key: Key,
        modifiers: Modifiers,
        /// Text produced by the key, if any.
        text: Option<String>,
    },

    /// Drawing surface resized, in logical pixels.
    Resize { width: f32, height: f32 },
}

impl InputEvent {
    #[inline]
    pub fn pointer(kind: PointerKind, x: f32, y: f32) -> Self {
        Self::Pointer { kind, x, y, button: None }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}
