//! Event records, event kinds and handler tables.
//!
//! Handlers are keyed by a closed [`EventKind`]. Space-delimited type strings
//! ("click mousedown") are accepted only at the public boundary and parsed
//! with [`EventKind::parse_list`].

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::coords::Vec2;
use crate::error::SceneError;
use crate::input::{InputEvent, KeyKind, PointerKind};
use crate::shape::ShapeRef;
use crate::time::FrameInfo;

/// Every event type a shape can receive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    Click,
    MouseDown,
    MouseUp,
    MouseMove,
    DoubleClick,
    TouchStart,
    TouchMove,
    TouchEnd,
    KeyDown,
    KeyUp,
    KeyPress,
    Resize,
    /// Scene loop started.
    Start,
    /// Scene loop stopped.
    Stop,
    /// Fired on the scene before each frame is drawn.
    Render,
    /// An asynchronously loaded resource became ready.
    Load,
}

impl EventKind {
    pub const ALL: [EventKind; 16] = [
        Self::Click,
        Self::MouseDown,
        Self::MouseUp,
        Self::MouseMove,
        Self::DoubleClick,
        Self::TouchStart,
        Self::TouchMove,
        Self::TouchEnd,
        Self::KeyDown,
        Self::KeyUp,
        Self::KeyPress,
        Self::Resize,
        Self::Start,
        Self::Stop,
        Self::Render,
        Self::Load,
    ];

    /// Wire name used by the string adapters.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::MouseMove => "mousemove",
            Self::DoubleClick => "dblclick",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::KeyPress => "keypress",
            Self::Resize => "resize",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Render => "render",
            Self::Load => "load",
        }
    }

    /// Parses a space-delimited list such as `"click touchend"`.
    ///
    /// Repeated whitespace is ignored; an unknown name fails the whole list.
    pub fn parse_list(types: &str) -> Result<Vec<EventKind>, SceneError> {
        types.split_whitespace().map(str::parse).collect()
    }
}

impl FromStr for EventKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| SceneError::invalid(format!("unknown event type {s:?}")))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PointerKind> for EventKind {
    fn from(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Click => Self::Click,
            PointerKind::Down => Self::MouseDown,
            PointerKind::Up => Self::MouseUp,
            PointerKind::Move => Self::MouseMove,
            PointerKind::DoubleClick => Self::DoubleClick,
            PointerKind::TouchStart => Self::TouchStart,
            PointerKind::TouchMove => Self::TouchMove,
            PointerKind::TouchEnd => Self::TouchEnd,
        }
    }
}

impl From<KeyKind> for EventKind {
    fn from(kind: KeyKind) -> Self {
        match kind {
            KeyKind::Down => Self::KeyDown,
            KeyKind::Up => Self::KeyUp,
            KeyKind::Press => Self::KeyPress,
        }
    }
}

/// Event record passed to handlers, mutated in place while it bubbles.
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    /// Pointer coordinates in logical pixels. Zero for non-pointer events.
    pub x: f32,
    pub y: f32,
    /// The input sample this event was built from, if any.
    pub original: Option<InputEvent>,
    pub propagation_stopped: bool,
    /// Deepest shape on the bubble path.
    pub target: Option<ShapeRef>,
    /// Frame snapshot, set on `render` events.
    pub frame: Option<FrameInfo>,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            x: 0.0,
            y: 0.0,
            original: None,
            propagation_stopped: false,
            target: None,
            frame: None,
        }
    }

    pub fn at(kind: EventKind, x: f32, y: f32) -> Self {
        Self { x, y, ..Self::new(kind) }
    }

    /// Normalizes an input sample. Key and resize samples carry no position.
    pub fn from_input(input: InputEvent) -> Self {
        let mut event = match &input {
            InputEvent::Pointer { kind, x, y, .. } => Self::at((*kind).into(), *x, *y),
            InputEvent::Key { kind, .. } => Self::new((*kind).into()),
            InputEvent::Resize { .. } => Self::new(EventKind::Resize),
        };
        event.original = Some(input);
        event
    }

    pub fn with_frame(mut self, info: FrameInfo) -> Self {
        self.frame = Some(info);
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Prevents the event from reaching shapes further up the bubble path.
    #[inline]
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

type HandlerFn = dyn Fn(&ShapeRef, &mut Event) -> anyhow::Result<()>;

/// Shared event callback.
///
/// Handlers receive the shape they are registered on and the event. Identity
/// is by allocation: clones of one `Handler` compare equal, two handlers built
/// from identical closures do not.
#[derive(Clone)]
pub struct Handler(Rc<HandlerFn>);

impl Handler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ShapeRef, &mut Event) -> anyhow::Result<()> + 'static,
    {
        Self(Rc::new(f))
    }

    #[inline]
    pub fn call(&self, shape: &ShapeRef, event: &mut Event) -> anyhow::Result<()> {
        (self.0)(shape, event)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Handler) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// Ordered handler lists per event kind. No de-duplication.
#[derive(Debug, Default)]
pub(crate) struct HandlerTable {
    map: HashMap<EventKind, Vec<Handler>>,
}

impl HandlerTable {
    pub(crate) fn add(&mut self, kind: EventKind, handler: Handler) {
        self.map.entry(kind).or_default().push(handler);
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }

    pub(crate) fn clear_kind(&mut self, kind: EventKind) {
        self.map.remove(&kind);
    }

    /// Removes every registration of `handler` under `kind`, keeping order.
    pub(crate) fn remove(&mut self, kind: EventKind, handler: &Handler) {
        if let Some(list) = self.map.get_mut(&kind) {
            list.retain(|h| !h.ptr_eq(handler));
        }
    }

    /// Snapshot of the handlers for `kind`, in registration order.
    pub(crate) fn snapshot(&self, kind: EventKind) -> Vec<Handler> {
        self.map.get(&kind).cloned().unwrap_or_default()
    }

    pub(crate) fn count(&self, kind: EventKind) -> usize {
        self.map.get(&kind).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, Modifiers};

    #[test]
    fn names_round_trip_through_parse() {
        for kind in EventKind::ALL {
            assert_eq!(kind.name().parse::<EventKind>(), Ok(kind));
        }
    }

    #[test]
    fn parse_list_splits_on_whitespace() {
        assert_eq!(
            EventKind::parse_list("click  touchend"),
            Ok(vec![EventKind::Click, EventKind::TouchEnd])
        );
        assert_eq!(EventKind::parse_list(""), Ok(vec![]));
        assert!(matches!(
            EventKind::parse_list("click hover"),
            Err(SceneError::InvalidArgument(_))
        ));
    }

    #[test]
    fn from_input_normalizes_pointer_and_key_samples() {
        let click = Event::from_input(InputEvent::pointer(PointerKind::Click, 3.0, 4.0));
        assert_eq!(click.kind, EventKind::Click);
        assert_eq!(click.position(), Vec2::new(3.0, 4.0));
        assert!(!click.propagation_stopped);

        let key = Event::from_input(InputEvent::Key {
            kind: KeyKind::Up,
            key: Key::Enter,
            modifiers: Modifiers::default(),
            text: None,
        });
        assert_eq!(key.kind, EventKind::KeyUp);
        assert!(key.original.is_some());
    }

    #[test]
    fn stop_propagation_sets_flag() {
        let mut e = Event::new(EventKind::Click);
        e.stop_propagation();
        assert!(e.propagation_stopped);
    }

    #[test]
    fn handler_identity_is_per_allocation() {
        let a = Handler::new(|_, _| Ok(()));
        let b = Handler::new(|_, _| Ok(()));
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn table_removes_only_matching_handler() {
        let a = Handler::new(|_, _| Ok(()));
        let b = Handler::new(|_, _| Ok(()));
        let mut table = HandlerTable::default();
        table.add(EventKind::Click, a.clone());
        table.add(EventKind::Click, b.clone());
        table.add(EventKind::Click, a.clone());

        table.remove(EventKind::Click, &a);
        let left = table.snapshot(EventKind::Click);
        assert_eq!(left.len(), 1);
        assert!(left[0].ptr_eq(&b));

        table.clear_kind(EventKind::Click);
        assert_eq!(table.count(EventKind::Click), 0);
    }
}
