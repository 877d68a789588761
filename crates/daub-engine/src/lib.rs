//! Daub engine crate.
//!
//! Retained 2D scene graph: shapes grouped into a tree, animated per frame,
//! hit-tested and bubbled on input, and recorded into a renderer-agnostic
//! draw list once per frame.

pub mod animation;
pub mod config;
pub mod easing;
pub mod error;
pub mod event;
pub mod group;
pub mod listener;
pub mod scene;
pub mod shape;

pub mod coords;
pub mod draw;
pub mod input;
pub mod logging;
pub mod paint;
pub mod surface;
pub mod time;

/// Everything needed to build and run a scene.
pub mod prelude {
    pub use std::rc::Rc;

    pub use crate::animation::{MoveSpec, Movement, Target};
    pub use crate::config::SceneConfig;
    pub use crate::coords::{Rect, Transform, Vec2};
    pub use crate::draw::{ArcCmd, DrawCmd, DrawList};
    pub use crate::easing::{Easing, EasingTable};
    pub use crate::error::SceneError;
    pub use crate::event::{Event, EventKind, Handler};
    pub use crate::group::{Collision, GroupRef};
    pub use crate::input::{InputEvent, PointerKind};
    pub use crate::paint::{Color, Material};
    pub use crate::scene::{Scene, SceneControl, SceneState};
    pub use crate::shape::kinds::{Arc, Circle, Image, Line, LinePoint, Rectangle, Sprite, Text};
    pub use crate::shape::{Geometry, ShapeKind, ShapeOptions, ShapeRef};
    pub use crate::surface::{DrawingSurface, FrameBuffer};
    pub use crate::time::{RefreshSource, TimerRefresh};
}
