//! Per-shape animation queue.
//!
//! Records are processed strictly FIFO: only the head record advances, and it
//! is popped on the tick where its elapsed time reaches its duration.

use std::collections::VecDeque;
use std::fmt;

use crate::coords::{Transform, Vec2};
use crate::easing::{Easing, EasingFn, EasingTable};
use crate::error::SceneError;
use crate::shape::ShapeRef;

/// Partial transform an animation moves towards. Absent components are left
/// untouched.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Target {
    pub position: Option<Vec2>,
    pub scale: Option<f32>,
    pub rotation: Option<f32>,
}

impl Target {
    pub fn position(position: Vec2) -> Self {
        Self { position: Some(position), ..Self::default() }
    }

    pub fn scale(scale: f32) -> Self {
        Self { scale: Some(scale), ..Self::default() }
    }

    pub fn rotation(rotation: f32) -> Self {
        Self { rotation: Some(rotation), ..Self::default() }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.scale.is_none() && self.rotation.is_none()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_none_or(Vec2::is_finite)
            && self.scale.is_none_or(f32::is_finite)
            && self.rotation.is_none_or(f32::is_finite)
    }

    /// Writes every present component into `transform` unchanged.
    fn apply_exact(&self, transform: &mut Transform) {
        if let Some(p) = self.position {
            transform.position = p;
        }
        if let Some(s) = self.scale {
            transform.scale = s;
        }
        if let Some(r) = self.rotation {
            transform.rotation = r;
        }
    }

    /// Writes every present component as `ease(t, initial, target - initial, d)`.
    fn apply_eased(&self, transform: &mut Transform, initial: &Transform, ease: EasingFn, t: f32, d: f32) {
        if let Some(p) = self.position {
            transform.position = Vec2::new(
                ease(t, initial.position.x, p.x - initial.position.x, d),
                ease(t, initial.position.y, p.y - initial.position.y, d),
            );
        }
        if let Some(s) = self.scale {
            transform.scale = ease(t, initial.scale, s - initial.scale, d);
        }
        if let Some(r) = self.rotation {
            transform.rotation = ease(t, initial.rotation, r - initial.rotation, d);
        }
    }
}

/// One queued transform change.
#[derive(Debug, Clone)]
pub struct Animation {
    pub target: Target,
    /// Milliseconds. Zero or negative completes on the next tick.
    pub duration: f32,
    pub easing: Easing,
    /// Milliseconds consumed so far.
    pub elapsed: f32,
    /// Local transform captured on the record's first tick.
    pub initial: Option<Transform>,
}

impl Animation {
    pub fn new(target: Target, duration: f32, easing: Easing) -> Self {
        Self { target, duration, easing, elapsed: 0.0, initial: None }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnimationQueue {
    records: VecDeque<Animation>,
}

impl AnimationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, animation: Animation) {
        self.records.push_back(animation);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn head(&self) -> Option<&Animation> {
        self.records.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Animation> {
        self.records.iter()
    }

    /// Drops every record behind the head.
    pub fn truncate_to_head(&mut self) {
        self.records.truncate(1);
    }

    /// Forces the head record to finish on its next tick.
    pub fn finish_head(&mut self) {
        if let Some(head) = self.records.front_mut() {
            head.duration = 0.0;
        }
    }

    /// Removes the head record, discarding its progress.
    pub fn discard_head(&mut self) -> Option<Animation> {
        self.records.pop_front()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Advances the head record by `elapsed` milliseconds and writes the result
    /// into `transform`.
    ///
    /// Returns `true` when the head record completed on this tick.
    pub fn advance(&mut self, transform: &mut Transform, elapsed: f32, easings: &EasingTable) -> bool {
        let Some(head) = self.records.front_mut() else {
            return false;
        };

        if head.elapsed == 0.0 || head.initial.is_none() {
            head.initial = Some(*transform);
        }
        let initial = head.initial.unwrap_or(*transform);

        let slice = (head.elapsed + elapsed).min(head.duration);
        head.elapsed += elapsed;

        if head.is_complete() {
            head.target.apply_exact(transform);
            self.records.pop_front();
            return true;
        }

        // Resolve once; later ticks reuse the function pointer.
        let ease = easings.resolve(&head.easing);
        head.easing = Easing::Func(ease);
        head.target.apply_eased(transform, &initial, ease, slice, head.duration);
        false
    }
}

// ── Movement ──────────────────────────────────────────────────────────────

/// Argument of [`ShapeRef::move_by`].
pub enum Movement {
    /// Relative offset. At least one axis must be given; a missing axis is 0.
    By { x: Option<f32>, y: Option<f32> },
    /// Computed from the shape when the move is applied.
    Deferred(Box<dyn FnOnce(&ShapeRef) -> MoveSpec>),
}

impl Movement {
    pub fn by(x: f32, y: f32) -> Self {
        Self::By { x: Some(x), y: Some(y) }
    }

    pub fn x(x: f32) -> Self {
        Self::By { x: Some(x), y: None }
    }

    pub fn y(y: f32) -> Self {
        Self::By { x: None, y: Some(y) }
    }

    pub fn deferred<F>(f: F) -> Self
    where
        F: FnOnce(&ShapeRef) -> MoveSpec + 'static,
    {
        Self::Deferred(Box::new(f))
    }

    /// Resolves the offset, rejecting a missing or non-finite delta.
    pub(crate) fn delta(x: Option<f32>, y: Option<f32>) -> Result<Vec2, SceneError> {
        if x.is_none() && y.is_none() {
            return Err(SceneError::invalid("move needs an x or y offset"));
        }
        let delta = Vec2::new(x.unwrap_or(0.0), y.unwrap_or(0.0));
        if !delta.is_finite() {
            return Err(SceneError::invalid(format!("non-finite move offset {delta:?}")));
        }
        Ok(delta)
    }
}

impl From<Vec2> for Movement {
    fn from(v: Vec2) -> Self {
        Self::by(v.x, v.y)
    }
}

impl fmt::Debug for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::By { x, y } => f.debug_struct("By").field("x", x).field("y", y).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// What a deferred movement resolves to.
#[derive(Debug)]
pub struct MoveSpec {
    pub movement: Movement,
    pub duration: Option<f32>,
    pub easing: Option<Easing>,
}

impl MoveSpec {
    pub fn new(movement: impl Into<Movement>) -> Self {
        Self { movement: movement.into(), duration: None, easing: None }
    }

    pub fn over(mut self, duration: f32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn eased(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = Some(easing.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::ease_in_quad;

    fn at(x: f32, y: f32) -> Transform {
        Transform { position: Vec2::new(x, y), ..Transform::identity() }
    }

    // ── convergence ──────────────────────────────────────────────────────

    #[test]
    fn linear_partial_ticks_lie_on_the_line() {
        let easings = EasingTable::default();
        let mut q = AnimationQueue::new();
        q.push(Animation::new(Target::position(Vec2::new(100.0, 50.0)), 1000.0, Easing::default()));

        let mut t = at(0.0, 0.0);
        assert!(!q.advance(&mut t, 250.0, &easings));
        assert_eq!(t.position, Vec2::new(25.0, 12.5));
        assert!(!q.advance(&mut t, 250.0, &easings));
        assert_eq!(t.position, Vec2::new(50.0, 25.0));
    }

    #[test]
    fn overshooting_tick_lands_exactly_on_target() {
        let easings = EasingTable::default();
        let mut q = AnimationQueue::new();
        q.push(Animation::new(Target::position(Vec2::new(0.3, -7.7)), 100.0, Easing::named("ease_in_out_sine")));

        let mut t = at(1.1, 2.2);
        let mut ticks = 0;
        while !q.advance(&mut t, 17.0, &easings) {
            ticks += 1;
        }
        assert_eq!(ticks, 5);
        assert_eq!(t.position, Vec2::new(0.3, -7.7));
        assert!(q.is_empty());
    }

    #[test]
    fn eased_change_is_relative_to_initial() {
        let easings = EasingTable::default();
        let mut q = AnimationQueue::new();
        q.push(Animation::new(Target::position(Vec2::new(30.0, 10.0)), 100.0, Easing::Func(ease_in_quad)));

        let mut t = at(10.0, 10.0);
        q.advance(&mut t, 50.0, &easings);
        assert_eq!(t.position.x, ease_in_quad(50.0, 10.0, 20.0, 100.0));
        assert_eq!(t.position.y, 10.0);
    }

    #[test]
    fn zero_duration_completes_on_next_tick() {
        let easings = EasingTable::default();
        let mut q = AnimationQueue::new();
        q.push(Animation::new(Target::position(Vec2::new(5.0, 5.0)), 0.0, Easing::default()));

        let mut t = at(0.0, 0.0);
        assert!(q.advance(&mut t, 0.0, &easings));
        assert_eq!(t.position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn scale_and_rotation_animate_alongside_position() {
        let easings = EasingTable::default();
        let mut q = AnimationQueue::new();
        q.push(Animation::new(Target::scale(3.0).with_rotation(1.0), 100.0, Easing::default()));

        let mut t = at(4.0, 4.0);
        q.advance(&mut t, 50.0, &easings);
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.rotation, 0.5);
        assert_eq!(t.position, Vec2::new(4.0, 4.0));

        q.advance(&mut t, 50.0, &easings);
        assert_eq!(t.scale, 3.0);
        assert_eq!(t.rotation, 1.0);
    }

    #[test]
    fn unknown_easing_name_falls_back_to_linear() {
        let easings = EasingTable::default();
        let mut q = AnimationQueue::new();
        q.push(Animation::new(Target::position(Vec2::new(10.0, 0.0)), 10.0, Easing::named("wobble")));

        let mut t = at(0.0, 0.0);
        q.advance(&mut t, 5.0, &easings);
        assert_eq!(t.position.x, 5.0);
    }

    // ── ordering ─────────────────────────────────────────────────────────

    #[test]
    fn second_record_waits_for_first() {
        let easings = EasingTable::default();
        let mut q = AnimationQueue::new();
        q.push(Animation::new(Target::position(Vec2::new(10.0, 0.0)), 20.0, Easing::default()));
        q.push(Animation::new(Target::position(Vec2::new(10.0, 10.0)), 20.0, Easing::default()));

        let mut t = at(0.0, 0.0);
        q.advance(&mut t, 10.0, &easings);
        assert_eq!(t.position, Vec2::new(5.0, 0.0));
        assert!(q.advance(&mut t, 10.0, &easings));
        assert_eq!(q.len(), 1);

        // Second record captures its initial from where the first ended.
        q.advance(&mut t, 10.0, &easings);
        assert_eq!(t.position, Vec2::new(10.0, 5.0));
    }

    #[test]
    fn truncate_keeps_only_head() {
        let mut q = AnimationQueue::new();
        for i in 0..4 {
            q.push(Animation::new(Target::rotation(i as f32), 10.0, Easing::default()));
        }
        q.truncate_to_head();
        assert_eq!(q.len(), 1);
        assert_eq!(q.head().map(|a| a.target.rotation), Some(Some(0.0)));
    }

    #[test]
    fn finish_head_jumps_to_target() {
        let easings = EasingTable::default();
        let mut q = AnimationQueue::new();
        q.push(Animation::new(Target::position(Vec2::new(8.0, 8.0)), 1000.0, Easing::default()));

        let mut t = at(0.0, 0.0);
        q.advance(&mut t, 16.0, &easings);
        q.finish_head();
        assert!(q.advance(&mut t, 16.0, &easings));
        assert_eq!(t.position, Vec2::new(8.0, 8.0));
    }

    #[test]
    fn empty_queue_is_a_no_op() {
        let easings = EasingTable::default();
        let mut q = AnimationQueue::new();
        let mut t = at(1.0, 2.0);
        assert!(!q.advance(&mut t, 16.0, &easings));
        assert_eq!(t, at(1.0, 2.0));
    }
}
