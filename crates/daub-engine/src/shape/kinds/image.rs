use std::rc::Rc;

use crate::coords::{Rect, Transform, Vec2};
use crate::draw::{DrawCmd, DrawList, ImageCmd};
use crate::paint::Material;
use crate::shape::Geometry;

use super::Rectangle;

/// Bitmap drawn into a box anchored at its top-left corner.
///
/// Pixels are resolved by the renderer from `src`. A zero `width` or `height`
/// means "use the natural size", filled in by [`Image::apply_natural_size`]
/// once the source has loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    pub src: String,
    pub width: f32,
    pub height: f32,
    /// Source sub-rect in image pixels.
    pub clip: Option<Rect>,
    loaded: bool,
}

impl Image {
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into(), ..Self::default() }
    }

    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn clipped(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fills in any display dimension that was left at zero.
    pub fn apply_natural_size(&mut self, natural: Vec2) {
        if self.width == 0.0 {
            self.width = natural.x;
        }
        if self.height == 0.0 {
            self.height = natural.y;
        }
        self.loaded = true;
    }

    pub(crate) fn frame(&self) -> Rectangle {
        Rectangle::new(self.width, self.height)
    }

    pub(crate) fn draw_clipped(&self, list: &mut DrawList, transform: &Transform, clip: Option<Rect>) {
        list.push(DrawCmd::Image(ImageCmd {
            src: self.src.clone(),
            dest: self.frame().rect_at(transform),
            clip,
        }));
    }
}

impl Geometry for Image {
    fn draw(&self, list: &mut DrawList, _material: &Rc<Material>, transform: &Transform) {
        self.draw_clipped(list, transform, self.clip);
    }

    fn check_collision(&self, coords: Vec2, material: &Material, transform: &Transform) -> bool {
        self.frame().check_collision(coords, material, transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_size_fills_only_missing_dimensions() {
        let mut img = Image::new("a.png").sized(40.0, 0.0);
        assert!(!img.is_loaded());
        img.apply_natural_size(Vec2::new(128.0, 64.0));
        assert_eq!((img.width, img.height), (40.0, 64.0));
        assert!(img.is_loaded());
    }

    #[test]
    fn draw_passes_clip_and_scaled_dest() {
        let img = Image::new("a.png").sized(10.0, 5.0).clipped(Rect::new(0.0, 0.0, 2.0, 2.0));
        let mut list = DrawList::new();
        img.draw(
            &mut list,
            &Rc::new(Material::default()),
            &Transform::new(Vec2::new(3.0, 3.0), 2.0, 0.0),
        );
        assert_eq!(
            list.items()[0],
            DrawCmd::Image(ImageCmd {
                src: "a.png".to_string(),
                dest: Rect::new(3.0, 3.0, 20.0, 10.0),
                clip: Some(Rect::new(0.0, 0.0, 2.0, 2.0)),
            })
        );
    }
}
