//! Input dispatch: hit-test, bubble path, propagation.
//!
//! Pointer events are matched against the scene graph and triggered on the
//! deepest matching shape first, then on each enclosing group up to the root,
//! until a handler stops propagation. Key and resize events skip hit-testing
//! and go to the root directly.

use log::trace;

use crate::coords::Transform;
use crate::event::Event;
use crate::group::{Collision, GroupMatch, MatchEntry};
use crate::input::InputEvent;
use crate::shape::ShapeRef;

#[derive(Debug, Clone)]
pub struct Listener {
    capture: bool,
}

impl Listener {
    pub fn new(capture: bool) -> Self {
        Self { capture }
    }

    /// Turns input capture on or off. While off, [`Listener::dispatch`] ignores
    /// pointer and key input; resizes still reach the root.
    pub fn set_capture(&mut self, capture: bool) {
        self.capture = capture;
    }

    pub fn is_capturing(&self) -> bool {
        self.capture
    }

    /// Dispatches one input sample into the graph rooted at `root`.
    ///
    /// Returns the event after dispatch, or `None` when capture is off and the
    /// input was dropped.
    pub fn dispatch(&self, root: &ShapeRef, input: InputEvent) -> anyhow::Result<Option<Event>> {
        if !self.capture && !matches!(input, InputEvent::Resize { .. }) {
            return Ok(None);
        }
        let mut event = Event::from_input(input);
        if matches!(event.original, Some(InputEvent::Pointer { .. })) {
            self.find_matches(root, &mut event)?;
        } else {
            root.trigger(event.kind, &mut event)?;
        }
        Ok(Some(event))
    }

    /// Hit-tests `event` against `root` and triggers it along the bubble path,
    /// deepest shape first.
    ///
    /// When nothing matched the root alone receives the event. `target` is
    /// set to the first shape of the path.
    pub fn find_matches(&self, root: &ShapeRef, event: &mut Event) -> anyhow::Result<()> {
        let collision = root.test_bounds(event.position(), &Transform::identity());
        let mut path = Self::bubble_path(&collision);
        path.reverse();
        if path.is_empty() {
            path.push(root.clone());
        }
        trace!("{} at ({}, {}) bubbles through {} shapes", event.kind, event.x, event.y, path.len());

        event.target = path.first().cloned();
        for shape in &path {
            if event.propagation_stopped {
                break;
            }
            shape.trigger(event.kind, event)?;
        }
        Ok(())
    }

    /// Flattens a nested match into a root-to-leaf path.
    ///
    /// Only the last entry of each level is followed, so among overlapping
    /// siblings the one added last wins.
    pub fn bubble_path(collision: &Collision) -> Vec<ShapeRef> {
        let mut path = Vec::new();
        if let Collision::Group(m) = collision {
            push_path(m, &mut path);
        }
        path
    }
}

impl Default for Listener {
    fn default() -> Self {
        Self::new(true)
    }
}

fn push_path(m: &GroupMatch, path: &mut Vec<ShapeRef>) {
    path.push(m.group.clone());
    match m.shapes.last() {
        Some(MatchEntry::Shape(shape)) => path.push(shape.clone()),
        Some(MatchEntry::Group(sub)) => push_path(sub, path),
        None => {}
    }
}
