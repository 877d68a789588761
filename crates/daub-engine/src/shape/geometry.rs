use std::fmt;
use std::rc::Rc;

use crate::coords::{Transform, Vec2};
use crate::draw::DrawList;
use crate::paint::Material;

// ── Geometry trait ────────────────────────────────────────────────────────

/// Drawing and hit-testing capability of a concrete shape kind.
///
/// Both methods receive the shape's already composed absolute transform.
///
/// # Implementing a custom shape
///
/// ```rust,ignore
/// use daub_engine::prelude::*;
///
/// #[derive(Debug)]
/// struct Dot;
///
/// impl Geometry for Dot {
///     fn draw(&self, list: &mut DrawList, material: &Rc<Material>, transform: &Transform) {
///         list.push(DrawCmd::Arc(ArcCmd {
///             center: transform.position,
///             radius: 2.0 * transform.scale,
///             start_angle: 0.0,
///             end_angle: std::f32::consts::TAU,
///             counter_clockwise: false,
///             line_width: 0.0,
///             material: material.clone(),
///         }));
///     }
/// }
///
/// let dot = ShapeRef::custom(ShapeOptions::at(4.0, 4.0), Dot);
/// ```
pub trait Geometry: fmt::Debug + 'static {
    /// Records this shape into `list`.
    fn draw(&self, list: &mut DrawList, material: &Rc<Material>, transform: &Transform);

    /// Returns `true` if `coords` land on the shape.
    ///
    /// The default never collides.
    fn check_collision(&self, _coords: Vec2, _material: &Material, _transform: &Transform) -> bool {
        false
    }
}
