use std::rc::Rc;

use crate::coords::{Rect, Vec2};
use crate::paint::Material;

/// Renderer-agnostic draw command stream.
///
/// Extending the stream:
/// - add a payload struct here
/// - add a new variant to `DrawCmd`
/// - implement the push helper next to the shape kind that records it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Arc(ArcCmd),
    Path(PathCmd),
    Image(ImageCmd),
    Text(TextCmd),
}

/// Rectangle payload. `rect` is already in absolute, scaled coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub rotation: f32,
    /// Stroke width after scaling.
    pub line_width: f32,
    pub material: Rc<Material>,
}

/// Arc payload. A full circle is an arc from `0` to `2π`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcCmd {
    pub center: Vec2,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub counter_clockwise: bool,
    pub line_width: f32,
    pub material: Rc<Material>,
}

/// One segment of a path, in absolute coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { ctrl: Vec2, to: Vec2 },
    CubicTo { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
}

/// Open or filled path payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCmd {
    pub segments: Vec<PathSegment>,
    /// `false` strokes the outline only.
    pub fill: bool,
    pub line_width: f32,
    pub material: Rc<Material>,
}

/// Image payload. The renderer resolves `src` to pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub src: String,
    /// Destination rect in absolute, scaled coordinates.
    pub dest: Rect,
    /// Source sub-rect in image pixels. `None` = whole image.
    pub clip: Option<Rect>,
}

/// Text payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    /// Baseline origin in absolute coordinates.
    pub origin: Vec2,
    pub scale: f32,
    pub material: Rc<Material>,
}
