//! Drawing surfaces.
//!
//! The scene never touches pixels. Each frame it asks its surface for a
//! [`DrawList`](crate::draw::DrawList) to record into, then asks it to
//! present. A renderer outside this crate consumes the presented list.
//!
//! [`FrameBuffer`] is the default surface: two [`Canvas`]es, one visible,
//! so a partially recorded frame is never presented.

mod canvas;
mod frame_buffer;

pub use canvas::Canvas;
pub use frame_buffer::FrameBuffer;

use crate::draw::DrawList;

/// Contract between a scene and whatever presents its frames.
pub trait DrawingSurface {
    /// Draw list for the frame being composed.
    fn context(&mut self) -> &mut DrawList;

    /// Presents the frame recorded into `context()`.
    fn flip(&mut self);

    /// Discards everything recorded into `context()` so far.
    fn clear(&mut self);

    fn show(&mut self);

    fn hide(&mut self);

    /// Width in logical pixels.
    fn width(&self) -> f32;

    /// Height in logical pixels.
    fn height(&self) -> f32;

    /// Releases the surface. Called exactly once, by `Scene::destroy`.
    fn destroy(&mut self);
}
