//! Built-in shape kinds.
//!
//! Each kind records renderer-agnostic commands into a [`DrawList`] and
//! answers point queries against its absolute transform.
//!
//! [`DrawList`]: crate::draw::DrawList

mod arc;
mod image;
mod line;
mod rect;
mod sprite;
mod text;

pub use arc::{Arc, Circle};
pub use image::Image;
pub use line::{Line, LinePoint};
pub use rect::Rectangle;
pub use sprite::Sprite;
pub use text::Text;
