//! Materials carried by shapes into draw commands.
//!
//! The scene graph never resolves styling itself: a [`Material`] is an opaque,
//! shared, read-only bundle that shape geometry copies into the draw stream.
//! The only field the engine interprets is `line_width`, which widens the
//! collision radius of arcs and circles.

mod color;
mod material;

pub use color::Color;
pub use material::{FontSpec, LineCap, Material};
