//! Draw stream recorded by shapes during a frame.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands in paint order
//! - keep each shape kind's command payload next to its geometry under
//!   `shape::kinds`
//!
//! Paint order is traversal order: a group draws its children in list order,
//! so later children land on top.

mod cmd;
mod list;

pub use cmd::{ArcCmd, DrawCmd, ImageCmd, PathCmd, PathSegment, RectCmd, TextCmd};
pub use list::DrawList;
