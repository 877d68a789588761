use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::animation::AnimationQueue;
use crate::coords::{Transform, Vec2};
use crate::event::HandlerTable;
use crate::paint::Material;

use super::{Node, ShapeRef};

// ── ShapeOptions ──────────────────────────────────────────────────────────

/// Construction options common to every shape kind.
#[derive(Debug, Clone)]
pub struct ShapeOptions {
    pub position: Vec2,
    pub scale: f32,
    pub rotation: f32,
    /// `None` uses a fresh default material.
    pub material: Option<Rc<Material>>,
    /// `false` excludes the shape, and a group's whole subtree, from
    /// hit-testing.
    pub register_events: bool,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            scale: 1.0,
            rotation: 0.0,
            material: None,
            register_events: true,
        }
    }
}

impl ShapeOptions {
    pub fn at(x: f32, y: f32) -> Self {
        Self { position: Vec2::new(x, y), ..Self::default() }
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn material(mut self, material: Rc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    /// Marks the shape static: drawn, but never hit-tested.
    pub fn without_events(mut self) -> Self {
        self.register_events = false;
        self
    }
}

// ── ShapeBase ─────────────────────────────────────────────────────────────

/// State shared by every shape kind.
#[derive(Debug)]
pub struct ShapeBase {
    /// Local transform, relative to the parent group.
    pub transform: Transform,
    pub material: Rc<Material>,
    /// `false` skips the shape in both draw and hit-test traversal.
    pub render_flag: bool,
    pub register_events: bool,
    /// Stand-in geometry used for hit-testing instead of the shape's own.
    pub bounds: Option<ShapeRef>,
    pub(crate) handlers: HandlerTable,
    pub(crate) animations: AnimationQueue,
    pub(crate) parent: Option<Weak<RefCell<Node>>>,
}

impl ShapeBase {
    pub fn new(options: ShapeOptions) -> Self {
        Self {
            transform: Transform::new(options.position, options.scale, options.rotation),
            material: options.material.unwrap_or_default(),
            render_flag: true,
            register_events: options.register_events,
            bounds: None,
            handlers: HandlerTable::default(),
            animations: AnimationQueue::new(),
            parent: None,
        }
    }

    pub fn animations(&self) -> &AnimationQueue {
        &self.animations
    }

    pub(crate) fn parent(&self) -> Option<ShapeRef> {
        self.parent.as_ref().and_then(Weak::upgrade).map(ShapeRef)
    }
}

impl Default for ShapeBase {
    fn default() -> Self {
        Self::new(ShapeOptions::default())
    }
}
