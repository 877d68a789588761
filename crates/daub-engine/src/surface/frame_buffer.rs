use crate::coords::Vec2;
use crate::draw::DrawList;
use crate::error::SceneError;

use super::{Canvas, DrawingSurface};

/// Double-buffered surface.
///
/// Frames are recorded into the hidden canvas; `flip` hides and clears the
/// visible one, then shows the freshly recorded one.
#[derive(Debug)]
pub struct FrameBuffer {
    canvases: [Canvas; 2],
    visible: usize,
    shown: bool,
}

impl FrameBuffer {
    /// Creates a buffer of two `width`×`height` canvases.
    ///
    /// Fails if either dimension is not a finite, strictly positive number.
    pub fn new(width: f32, height: f32) -> Result<Self, SceneError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(SceneError::InvalidSurface(format!(
                "frame buffer size must be positive, got {width}x{height}"
            )));
        }

        let first = Canvas::new(width, height);
        let mut second = Canvas::new(width, height);
        second.hide();

        Ok(Self { canvases: [first, second], visible: 0, shown: true })
    }

    /// Commands of the currently presented frame.
    pub fn presented(&self) -> &DrawList {
        self.canvases[self.visible].list()
    }

    /// The canvas currently being drawn into.
    pub fn buffer(&self) -> &Canvas {
        &self.canvases[1 - self.visible]
    }

    pub fn centre_point(&self) -> Vec2 {
        self.canvases[self.visible].centre_point()
    }

    /// Resizes both canvases.
    pub fn resize(&mut self, width: f32, height: f32) {
        for canvas in &mut self.canvases {
            canvas.set_width(width).set_height(height);
        }
    }

    #[inline]
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn is_destroyed(&self) -> bool {
        self.canvases.iter().all(Canvas::is_destroyed)
    }
}

impl DrawingSurface for FrameBuffer {
    fn context(&mut self) -> &mut DrawList {
        self.canvases[1 - self.visible].context()
    }

    fn flip(&mut self) {
        self.canvases[self.visible].hide().clear();
        self.visible = 1 - self.visible;
        if self.shown {
            self.canvases[self.visible].show();
        }
    }

    fn clear(&mut self) {
        self.canvases[1 - self.visible].clear();
    }

    fn show(&mut self) {
        self.shown = true;
        self.canvases[self.visible].show();
    }

    fn hide(&mut self) {
        self.shown = false;
        self.canvases[self.visible].hide();
    }

    fn width(&self) -> f32 {
        self.canvases[self.visible].width()
    }

    fn height(&self) -> f32 {
        self.canvases[self.visible].height()
    }

    fn destroy(&mut self) {
        for canvas in &mut self.canvases {
            canvas.destroy();
        }
    }
}
