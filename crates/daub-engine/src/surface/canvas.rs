use crate::coords::Vec2;
use crate::draw::DrawList;

/// A single drawable layer: a draw list plus size and visibility.
#[derive(Debug)]
pub struct Canvas {
    list: DrawList,
    width: f32,
    height: f32,
    visible: bool,
    destroyed: bool,
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            list: DrawList::new(),
            width,
            height,
            visible: true,
            destroyed: false,
        }
    }

    #[inline]
    pub fn context(&mut self) -> &mut DrawList {
        &mut self.list
    }

    /// Commands recorded on this canvas.
    #[inline]
    pub fn list(&self) -> &DrawList {
        &self.list
    }

    pub fn clear(&mut self) -> &mut Self {
        self.list.clear();
        self
    }

    /// Centre of the canvas, floored to whole pixels.
    pub fn centre_point(&self) -> Vec2 {
        Vec2::new((self.width / 2.0).floor(), (self.height / 2.0).floor())
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_width(&mut self, width: f32) -> &mut Self {
        self.width = width;
        self
    }

    pub fn set_height(&mut self, height: f32) -> &mut Self {
        self.height = height;
        self
    }

    pub fn show(&mut self) -> &mut Self {
        self.visible = true;
        self
    }

    pub fn hide(&mut self) -> &mut Self {
        self.visible = false;
        self
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Drops recorded commands and their capacity and hides the canvas.
    pub fn destroy(&mut self) {
        self.list = DrawList::new();
        self.visible = false;
        self.destroyed = true;
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
