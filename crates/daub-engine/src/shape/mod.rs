//! Scene-graph nodes.
//!
//! Every node is a [`ShapeRef`]: a shared handle to a [`ShapeBase`] (transform,
//! material, handlers, animation queue) plus a [`ShapeKind`] holding the
//! kind-specific fields. Groups are the `Group` kind; [`GroupRef`] is the typed
//! handle that exposes child management.
//!
//! Construction is two-step: the base record is built from [`ShapeOptions`]
//! first, then the kind applies its own initialization on top of it (images
//! and sprites start hidden until loaded).
//!
//! [`GroupRef`]: crate::group::GroupRef

mod base;
mod geometry;

pub mod kinds;

pub use base::{ShapeBase, ShapeOptions};
pub use geometry::Geometry;

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use log::{trace, warn};

use crate::animation::{Animation, Movement, Target};
use crate::coords::{Transform, Vec2};
use crate::draw::DrawList;
use crate::easing::{Easing, EasingTable};
use crate::error::SceneError;
use crate::event::{Event, EventKind, Handler};
use crate::group::{Collision, Group, GroupRef};
use crate::paint::Material;
use crate::time::FrameInfo;

use kinds::{Arc, Circle, Image, Line, LinePoint, Rectangle, Sprite, Text};

// ── FrameCtx ──────────────────────────────────────────────────────────────

/// Per-frame state threaded through `render`.
pub struct FrameCtx<'a> {
    /// Draw list of the frame being composed.
    pub list: &'a mut DrawList,
    pub info: FrameInfo,
    pub easings: &'a EasingTable,
}

// ── ShapeKind ─────────────────────────────────────────────────────────────

/// Kind-specific part of a node.
#[derive(Debug)]
pub enum ShapeKind {
    /// Plain node: no geometry, never collides.
    Base,
    Rectangle(Rectangle),
    Arc(Arc),
    Circle(Circle),
    Line(Line),
    Image(Image),
    Sprite(Sprite),
    Text(Text),
    Group(Group),
    /// User-defined geometry.
    Custom(Box<dyn Geometry>),
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Rectangle(_) => "rectangle",
            Self::Arc(_) => "arc",
            Self::Circle(_) => "circle",
            Self::Line(_) => "line",
            Self::Image(_) => "image",
            Self::Sprite(_) => "sprite",
            Self::Text(_) => "text",
            Self::Group(_) => "group",
            Self::Custom(_) => "custom",
        }
    }

    /// Drawing capability. `None` for plain nodes and groups.
    pub fn geometry(&self) -> Option<&dyn Geometry> {
        match self {
            Self::Base | Self::Group(_) => None,
            Self::Rectangle(g) => Some(g),
            Self::Arc(g) => Some(g),
            Self::Circle(g) => Some(g),
            Self::Line(g) => Some(g),
            Self::Image(g) => Some(g),
            Self::Sprite(g) => Some(g),
            Self::Text(g) => Some(g),
            Self::Custom(g) => Some(g.as_ref()),
        }
    }

    /// Kind-specific initialization, applied after the base record is built.
    fn init(&self, base: &mut ShapeBase) {
        if let Self::Image(_) | Self::Sprite(_) = self {
            base.render_flag = false;
        }
    }
}

macro_rules! kind_from {
    ($($ty:ident),*) => {
        $(impl From<$ty> for ShapeKind {
            fn from(v: $ty) -> Self {
                Self::$ty(v)
            }
        })*
    };
}

kind_from!(Rectangle, Arc, Circle, Line, Image, Sprite, Text, Group);

// ── Node / ShapeRef ───────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Node {
    pub base: ShapeBase,
    pub kind: ShapeKind,
}

/// Shared handle to a scene-graph node.
///
/// Clones refer to the same node; equality is identity. Handlers and
/// callbacks may freely mutate the graph: no borrow is held while user code
/// runs.
#[derive(Clone)]
pub struct ShapeRef(pub(crate) Rc<RefCell<Node>>);

impl ShapeRef {
    /// Builds a node in two steps: base record, then kind initialization.
    pub fn from_kind(options: ShapeOptions, kind: impl Into<ShapeKind>) -> Self {
        let mut base = ShapeBase::new(options);
        let kind = kind.into();
        kind.init(&mut base);
        Self::from_parts(base, kind)
    }

    pub fn from_parts(base: ShapeBase, kind: ShapeKind) -> Self {
        Self(Rc::new(RefCell::new(Node { base, kind })))
    }

    /// Plain node without geometry.
    pub fn new(options: ShapeOptions) -> Self {
        Self::from_parts(ShapeBase::new(options), ShapeKind::Base)
    }

    pub fn custom(options: ShapeOptions, geometry: impl Geometry) -> Self {
        Self::extend(options, geometry, |_| {})
    }

    /// Custom shape whose initializer runs over the already built base.
    pub fn extend<G, F>(options: ShapeOptions, geometry: G, init: F) -> Self
    where
        G: Geometry,
        F: FnOnce(&mut ShapeBase),
    {
        let mut base = ShapeBase::new(options);
        init(&mut base);
        Self::from_parts(base, ShapeKind::Custom(Box::new(geometry)))
    }

    pub fn rectangle(options: ShapeOptions, width: f32, height: f32) -> Self {
        Self::from_kind(options, Rectangle::new(width, height))
    }

    pub fn arc(options: ShapeOptions, arc: Arc) -> Self {
        Self::from_kind(options, arc)
    }

    pub fn circle(options: ShapeOptions, radius: f32) -> Self {
        Self::from_kind(options, Circle::new(radius))
    }

    pub fn line(options: ShapeOptions, line: Line) -> Self {
        Self::from_kind(options, line)
    }

    /// Image node. Hidden until [`ShapeRef::finish_load`] is called.
    pub fn image(options: ShapeOptions, image: Image) -> Self {
        Self::from_kind(options, image)
    }

    /// Sprite node. Hidden until [`ShapeRef::finish_load`] is called.
    pub fn sprite(options: ShapeOptions, sprite: Sprite) -> Self {
        Self::from_kind(options, sprite)
    }

    pub fn text(options: ShapeOptions, text: impl Into<String>) -> Self {
        Self::from_kind(options, Text::new(text))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ShapeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Borrows the node. Panics if it is mutably borrowed, which only happens
    /// from inside `with_kind_mut`/`with_base_mut` closures.
    pub fn node(&self) -> Ref<'_, Node> {
        self.0.borrow()
    }

    pub(crate) fn node_mut(&self) -> RefMut<'_, Node> {
        self.0.borrow_mut()
    }

    pub fn with_base<R>(&self, f: impl FnOnce(&ShapeBase) -> R) -> R {
        f(&self.node().base)
    }

    pub fn with_base_mut<R>(&self, f: impl FnOnce(&mut ShapeBase) -> R) -> R {
        f(&mut self.node_mut().base)
    }

    pub fn with_kind<R>(&self, f: impl FnOnce(&ShapeKind) -> R) -> R {
        f(&self.node().kind)
    }

    pub fn with_kind_mut<R>(&self, f: impl FnOnce(&mut ShapeKind) -> R) -> R {
        f(&mut self.node_mut().kind)
    }

    pub fn kind_name(&self) -> &'static str {
        self.node().kind.name()
    }

    pub fn is_group(&self) -> bool {
        matches!(self.node().kind, ShapeKind::Group(_))
    }

    /// Typed group handle, if this node is a group.
    pub fn as_group(&self) -> Option<GroupRef> {
        GroupRef::from_shape(self.clone())
    }

    /// Group currently holding this shape.
    pub fn parent(&self) -> Option<GroupRef> {
        self.node().base.parent().and_then(GroupRef::from_shape)
    }

    fn unsupported(&self, op: &'static str) -> SceneError {
        SceneError::UnsupportedKind { op, kind: self.kind_name() }
    }
}

impl PartialEq for ShapeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ShapeRef {}

impl fmt::Debug for ShapeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.0.try_borrow().map_or("<borrowed>", |n| n.kind.name());
        write!(f, "ShapeRef({kind}@{:p})", Rc::as_ptr(&self.0))
    }
}

// ── transform ─────────────────────────────────────────────────────────────

impl ShapeRef {
    pub fn transform(&self) -> Transform {
        self.node().base.transform
    }

    pub fn set_transform(&self, transform: Transform) {
        self.node_mut().base.transform = transform;
    }

    /// Local position, relative to the parent group.
    pub fn position(&self) -> Vec2 {
        self.node().base.transform.position
    }

    /// Sets the local position. Non-finite input is ignored.
    ///
    /// Returns whether the position was applied.
    pub fn set_position(&self, position: Vec2) -> bool {
        if !position.is_finite() {
            warn!("ignoring non-finite position {position:?} on {self:?}");
            return false;
        }
        self.node_mut().base.transform.position = position;
        true
    }

    pub fn scale(&self) -> f32 {
        self.node().base.transform.scale
    }

    pub fn set_scale(&self, scale: f32) {
        self.node_mut().base.transform.scale = scale;
    }

    pub fn rotation(&self) -> f32 {
        self.node().base.transform.rotation
    }

    pub fn set_rotation(&self, rotation: f32) {
        self.node_mut().base.transform.rotation = rotation;
    }

    /// Local transform composed with `parent`.
    pub fn absolute_transform(&self, parent: &Transform) -> Transform {
        self.node().base.transform.compose(parent)
    }

    pub fn material(&self) -> Rc<Material> {
        Rc::clone(&self.node().base.material)
    }

    pub fn set_material(&self, material: Rc<Material>) {
        self.node_mut().base.material = material;
    }

    pub fn render_flag(&self) -> bool {
        self.node().base.render_flag
    }

    pub fn set_render_flag(&self, flag: bool) {
        self.node_mut().base.render_flag = flag;
    }

    pub fn register_events(&self) -> bool {
        self.node().base.register_events
    }

    pub fn set_register_events(&self, register: bool) {
        self.node_mut().base.register_events = register;
    }

    pub fn bounds(&self) -> Option<ShapeRef> {
        self.node().base.bounds.clone()
    }

    pub fn set_bounds(&self, bounds: Option<ShapeRef>) {
        self.node_mut().base.bounds = bounds;
    }
}

// ── events ────────────────────────────────────────────────────────────────

impl ShapeRef {
    /// Registers `f` for `kind` and returns its handle for later removal.
    pub fn on<F>(&self, kind: EventKind, f: F) -> Handler
    where
        F: Fn(&ShapeRef, &mut Event) -> anyhow::Result<()> + 'static,
    {
        let handler = Handler::new(f);
        self.on_handler(&[kind], &handler);
        handler
    }

    /// Registers one handler under several kinds. Registering the same handler
    /// twice yields two invocations per trigger.
    pub fn on_handler(&self, kinds: &[EventKind], handler: &Handler) {
        let mut node = self.node_mut();
        for &kind in kinds {
            node.base.handlers.add(kind, handler.clone());
        }
    }

    /// Space-delimited adapter: `shape.on_str("click touchend", f)`.
    pub fn on_str<F>(&self, types: &str, f: F) -> Result<Handler, SceneError>
    where
        F: Fn(&ShapeRef, &mut Event) -> anyhow::Result<()> + 'static,
    {
        let kinds = EventKind::parse_list(types)?;
        let handler = Handler::new(f);
        self.on_handler(&kinds, &handler);
        Ok(handler)
    }

    /// Removes every handler of every kind.
    pub fn off_all(&self) {
        self.node_mut().base.handlers.clear();
    }

    /// Removes every handler registered for `kind`.
    pub fn off(&self, kind: EventKind) {
        self.node_mut().base.handlers.clear_kind(kind);
    }

    /// Removes `handler` from `kind`, keeping the other handlers in order.
    pub fn off_handler(&self, kind: EventKind, handler: &Handler) {
        self.node_mut().base.handlers.remove(kind, handler);
    }

    /// Space-delimited adapter. A blank `types` clears everything.
    pub fn off_str(&self, types: &str, handler: Option<&Handler>) -> Result<(), SceneError> {
        let kinds = EventKind::parse_list(types)?;
        if kinds.is_empty() {
            self.off_all();
            return Ok(());
        }
        for kind in kinds {
            match handler {
                Some(h) => self.off_handler(kind, h),
                None => self.off(kind),
            }
        }
        Ok(())
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.node().base.handlers.count(kind)
    }

    /// Runs the handlers for `kind` in registration order.
    ///
    /// The list is snapshotted first, so handlers may register or remove
    /// handlers. The first handler error stops the remaining handlers and is
    /// returned as is.
    pub fn trigger(&self, kind: EventKind, event: &mut Event) -> anyhow::Result<()> {
        let handlers = self.node().base.handlers.snapshot(kind);
        for handler in handlers {
            handler.call(self, event)?;
        }
        Ok(())
    }

    /// Space-delimited adapter. Kinds are triggered in the order given.
    pub fn trigger_str(&self, types: &str, event: &mut Event) -> anyhow::Result<()> {
        for kind in EventKind::parse_list(types)? {
            self.trigger(kind, event)?;
        }
        Ok(())
    }
}

// ── hit-testing ───────────────────────────────────────────────────────────

impl ShapeRef {
    /// Hit-tests this shape against `coords`, given its parent's absolute
    /// transform.
    ///
    /// Static shapes never match. A `bounds` override answers in place of the
    /// shape's own geometry.
    pub fn test_bounds(&self, coords: Vec2, parent: &Transform) -> Collision {
        let (transform, bounds) = {
            let node = self.node();
            if !node.base.register_events {
                return Collision::Hit(false);
            }
            (node.base.transform.compose(parent), node.base.bounds.clone())
        };
        match bounds {
            Some(bounds) => bounds.check_collision(coords, &transform),
            None => self.check_collision(coords, &transform),
        }
    }

    /// Geometry test against an already composed absolute transform.
    ///
    /// Leaf shapes answer `Hit`; groups answer with the nested match of their
    /// children.
    pub fn check_collision(&self, coords: Vec2, transform: &Transform) -> Collision {
        let children = {
            let node = self.node();
            match &node.kind {
                ShapeKind::Group(group) => group.children().to_vec(),
                kind => {
                    let hit = kind
                        .geometry()
                        .is_some_and(|g| g.check_collision(coords, &node.base.material, transform));
                    return Collision::Hit(hit);
                }
            }
        };
        Collision::Group(crate::group::match_children(self, &children, coords, transform))
    }
}

// ── animation ─────────────────────────────────────────────────────────────

impl ShapeRef {
    /// Moves the shape by an offset, immediately or animated.
    ///
    /// With a non-zero `duration` (ms) an animation towards the current
    /// position plus the offset is queued; otherwise the offset is applied
    /// now. A [`Movement::Deferred`] is resolved against this shape first.
    pub fn move_by(
        &self,
        movement: impl Into<Movement>,
        duration: Option<f32>,
        easing: Option<Easing>,
    ) -> Result<(), SceneError> {
        match movement.into() {
            Movement::Deferred(f) => {
                let spec = f(self);
                self.move_by(spec.movement, spec.duration, spec.easing)
            }
            Movement::By { x, y } => {
                let delta = Movement::delta(x, y)?;
                let target = self.position() + delta;
                match duration {
                    Some(d) if d != 0.0 => self.animate(Target::position(target), d, easing),
                    _ => {
                        self.set_position(target);
                        Ok(())
                    }
                }
            }
        }
    }

    /// Queues an animation towards `target` over `duration` milliseconds.
    pub fn animate(&self, target: Target, duration: f32, easing: Option<Easing>) -> Result<(), SceneError> {
        if !duration.is_finite() {
            return Err(SceneError::invalid(format!("non-finite animation duration {duration}")));
        }
        if !target.is_finite() {
            return Err(SceneError::invalid(format!("non-finite animation target {target:?}")));
        }
        trace!("queue animation on {self:?}: {target:?} over {duration}ms");
        self.node_mut()
            .base
            .animations
            .push(Animation::new(target, duration, easing.unwrap_or_default()));
        Ok(())
    }

    /// Stops the running animation.
    ///
    /// `clear_queue` drops everything queued behind it. `jump_to_end` lets the
    /// running record finish at its target on the next tick instead of
    /// discarding it where it is.
    pub fn stop(&self, clear_queue: bool, jump_to_end: bool) {
        let mut node = self.node_mut();
        let queue = &mut node.base.animations;
        if clear_queue {
            queue.truncate_to_head();
        }
        if jump_to_end {
            queue.finish_head();
        } else {
            queue.discard_head();
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.node().base.animations.is_empty()
    }

    pub fn queued_animations(&self) -> usize {
        self.node().base.animations.len()
    }

    /// Advances the head animation record by one frame.
    pub fn update(&self, info: &FrameInfo, easings: &EasingTable) {
        let mut node = self.node_mut();
        let base = &mut node.base;
        if base.animations.is_empty() {
            return;
        }
        if base.animations.advance(&mut base.transform, info.elapsed, easings) {
            trace!("animation finished at {:?} (frame {})", base.transform, info.frame);
        }
    }
}

// ── rendering ─────────────────────────────────────────────────────────────

impl ShapeRef {
    /// Per-frame entry point: update, compose, draw.
    pub fn render(&self, ctx: &mut FrameCtx<'_>, parent: &Transform) {
        self.update(&ctx.info, ctx.easings);
        let transform = self.absolute_transform(parent);
        self.draw(ctx, &transform);
    }

    /// Draws with an already composed absolute transform.
    ///
    /// A group renders every child whose render flag is set, passing its own
    /// absolute transform as the children's parent.
    pub fn draw(&self, ctx: &mut FrameCtx<'_>, transform: &Transform) {
        let children = {
            let node = self.node();
            match &node.kind {
                ShapeKind::Group(group) => group.children().to_vec(),
                kind => {
                    if let Some(geometry) = kind.geometry() {
                        geometry.draw(ctx.list, &node.base.material, transform);
                    }
                    return;
                }
            }
        };
        for child in children.iter().filter(|c| c.render_flag()) {
            child.render(ctx, transform);
        }
    }
}

// ── kind-specific ─────────────────────────────────────────────────────────

impl ShapeRef {
    /// Marks an image or sprite as loaded.
    ///
    /// Missing display dimensions take the natural size. A sprite is cut into
    /// cells and gets a one-cell rectangle as its hit-test bounds. The shape
    /// becomes renderable and `load` fires.
    pub fn finish_load(&self, natural_size: Vec2) -> anyhow::Result<()> {
        {
            let mut node = self.node_mut();
            let Node { base, kind } = &mut *node;
            match kind {
                ShapeKind::Image(image) => image.apply_natural_size(natural_size),
                ShapeKind::Sprite(sprite) => {
                    let cell = sprite.apply_natural_size(natural_size);
                    base.bounds = Some(ShapeRef::from_kind(ShapeOptions::default(), cell));
                }
                other => {
                    return Err(SceneError::UnsupportedKind { op: "finish_load", kind: other.name() }.into());
                }
            }
            base.render_flag = true;
        }
        trace!("{self:?} loaded at {natural_size:?}");
        self.trigger(EventKind::Load, &mut Event::new(EventKind::Load))
    }

    /// Advances a sprite's active cell by `n`, wrapping in both directions.
    pub fn step(&self, n: i64) -> Result<(), SceneError> {
        if let ShapeKind::Sprite(sprite) = &mut self.node_mut().kind {
            sprite.step(n);
            return Ok(());
        }
        Err(self.unsupported("step"))
    }

    /// Appends vertices to a line.
    pub fn add_points<I, P>(&self, points: I) -> Result<(), SceneError>
    where
        I: IntoIterator<Item = P>,
        P: Into<LinePoint>,
    {
        if let ShapeKind::Line(line) = &mut self.node_mut().kind {
            line.add_points(points);
            return Ok(());
        }
        Err(self.unsupported("add_points"))
    }
}
