use std::time::{Duration, Instant};

use crate::coords::Vec2;

use super::types::{InputEvent, Key, KeyKind, Modifiers, MouseButton, PointerKind};

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);
const DOUBLE_CLICK_SLOP: f32 = 4.0;

/// Turns raw pointer, touch and key transitions into normalized input events.
///
/// Tracks the pointer position (button transitions carry none on most
/// platforms), the modifier state, and the previous click for double-click
/// detection. One translator per drawing surface.
#[derive(Debug, Default)]
pub struct InputTranslator {
    pub modifiers: Modifiers,
    pointer: Option<Vec2>,
    last_click: Option<(Instant, Vec2)>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position, if the pointer is over the surface.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn pointer_moved(&mut self, pos: Vec2) -> InputEvent {
        self.pointer = Some(pos);
        InputEvent::pointer(PointerKind::Move, pos.x, pos.y)
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Button transition at the tracked pointer position.
    ///
    /// A press yields `Down`. A release yields `Up` followed by `Click`, and
    /// additionally `DoubleClick` when it completes the second click within
    /// the double-click window and slop.
    pub fn button(&mut self, button: MouseButton, pressed: bool, now: Instant) -> Vec<InputEvent> {
        let pos = self.pointer.unwrap_or_default();
        let at = |kind| InputEvent::Pointer { kind, x: pos.x, y: pos.y, button: Some(button) };

        if pressed {
            return vec![at(PointerKind::Down)];
        }

        let mut out = vec![at(PointerKind::Up), at(PointerKind::Click)];

        let double = matches!(
            self.last_click,
            Some((t, p)) if now.saturating_duration_since(t) <= DOUBLE_CLICK_WINDOW
                && p.distance(pos) <= DOUBLE_CLICK_SLOP
        );

        if double {
            out.push(at(PointerKind::DoubleClick));
            self.last_click = None;
        } else {
            self.last_click = Some((now, pos));
        }

        out
    }

    /// Touch transition. Touches do not move the tracked mouse pointer.
    pub fn touch(&mut self, kind: PointerKind, pos: Vec2) -> InputEvent {
        debug_assert!(matches!(
            kind,
            PointerKind::TouchStart | PointerKind::TouchMove | PointerKind::TouchEnd
        ));
        InputEvent::pointer(kind, pos.x, pos.y)
    }

    /// Key transition. A press that produced text is followed by `Press`.
    pub fn key(&mut self, key: Key, pressed: bool, text: Option<String>) -> Vec<InputEvent> {
        let modifiers = self.modifiers;
        if !pressed {
            return vec![InputEvent::Key { kind: KeyKind::Up, key, modifiers, text: None }];
        }

        let mut out = vec![InputEvent::Key { kind: KeyKind::Down, key, modifiers, text: None }];
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            out.push(InputEvent::Key { kind: KeyKind::Press, key, modifiers, text: Some(text) });
        }
        out
    }

    pub fn resized(&mut self, width: f32, height: f32) -> InputEvent {
        InputEvent::Resize { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(events: &[InputEvent]) -> Vec<PointerKind> {
        events
            .iter()
            .filter_map(|e| match e {
                InputEvent::Pointer { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn press_then_release_synthesizes_click_at_pointer() {
        let mut tr = InputTranslator::new();
        let t0 = Instant::now();
        tr.pointer_moved(Vec2::new(15.0, 25.0));

        assert_eq!(kinds(&tr.button(MouseButton::Left, true, t0)), vec![PointerKind::Down]);

        let up = tr.button(MouseButton::Left, false, t0);
        assert_eq!(kinds(&up), vec![PointerKind::Up, PointerKind::Click]);
        assert_eq!(
            up[1],
            InputEvent::Pointer {
                kind: PointerKind::Click,
                x: 15.0,
                y: 25.0,
                button: Some(MouseButton::Left),
            }
        );
    }

    #[test]
    fn two_quick_clicks_in_place_produce_double_click() {
        let mut tr = InputTranslator::new();
        let t0 = Instant::now();
        tr.pointer_moved(Vec2::new(10.0, 10.0));
        tr.button(MouseButton::Left, false, t0);

        tr.pointer_moved(Vec2::new(12.0, 11.0));
        let second = tr.button(MouseButton::Left, false, t0 + Duration::from_millis(200));
        assert_eq!(
            kinds(&second),
            vec![PointerKind::Up, PointerKind::Click, PointerKind::DoubleClick]
        );

        // A third click starts a new pair.
        let third = tr.button(MouseButton::Left, false, t0 + Duration::from_millis(300));
        assert_eq!(kinds(&third), vec![PointerKind::Up, PointerKind::Click]);
    }

    #[test]
    fn slow_or_distant_clicks_are_not_double() {
        let mut tr = InputTranslator::new();
        let t0 = Instant::now();
        tr.pointer_moved(Vec2::new(0.0, 0.0));
        tr.button(MouseButton::Left, false, t0);
        let late = tr.button(MouseButton::Left, false, t0 + Duration::from_millis(900));
        assert_eq!(kinds(&late).len(), 2);

        tr.pointer_moved(Vec2::new(40.0, 0.0));
        let far = tr.button(MouseButton::Left, false, t0 + Duration::from_millis(1000));
        assert_eq!(kinds(&far).len(), 2);
    }

    #[test]
    fn pointer_left_clears_position() {
        let mut tr = InputTranslator::new();
        tr.pointer_moved(Vec2::new(1.0, 2.0));
        tr.pointer_left();
        assert_eq!(tr.pointer(), None);
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn key_with_text_emits_press() {
        let mut tr = InputTranslator::new();
        let down = tr.key(Key::Char('a'), true, Some("a".to_string()));
        assert_eq!(down.len(), 2);
        assert!(matches!(&down[1], InputEvent::Key { kind: KeyKind::Press, text: Some(t), .. } if t == "a"));

        let plain = tr.key(Key::Shift, true, None);
        assert_eq!(plain.len(), 1);

        let up = tr.key(Key::Char('a'), false, None);
        assert!(matches!(up[0], InputEvent::Key { kind: KeyKind::Up, .. }));
    }
}
