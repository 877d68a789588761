use std::rc::Rc;

use crate::coords::{Rect, Transform, Vec2};
use crate::draw::DrawList;
use crate::paint::Material;
use crate::shape::Geometry;

use super::{Image, Rectangle};

/// Uniform grid of animation cells cut from one image.
///
/// Until the image loads the cell size is unknown and nothing is drawn. On
/// load the display size shrinks to one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub image: Image,
    pub rows: u32,
    pub cols: u32,
    /// Number of usable cells, `rows * cols` unless given explicitly.
    pub cells: u32,
    pub active_cell: u32,
    cell_size: Vec2,
}

impl Sprite {
    pub fn new(image: Image, rows: u32, cols: u32) -> Self {
        Self {
            image,
            rows,
            cols,
            cells: rows * cols,
            active_cell: 0,
            cell_size: Vec2::zero(),
        }
    }

    pub fn with_cells(mut self, cells: u32) -> Self {
        self.cells = cells;
        self
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Completes loading: the image takes its natural size, which is then cut
    /// into cells. Returns the cell rectangle used for hit-testing.
    pub(crate) fn apply_natural_size(&mut self, natural: Vec2) -> Rectangle {
        self.image.apply_natural_size(natural);
        let cols = self.cols.max(1) as f32;
        let rows = self.rows.max(1) as f32;
        self.cell_size = Vec2::new(self.image.width / cols, self.image.height / rows);
        self.image.width = self.cell_size.x;
        self.image.height = self.cell_size.y;
        Rectangle::new(self.cell_size.x, self.cell_size.y)
    }

    /// Moves the active cell by `n`, wrapping around the cell count in both
    /// directions.
    pub fn step(&mut self, n: i64) {
        if self.cells == 0 {
            return;
        }
        let next = (i64::from(self.active_cell) + n).rem_euclid(i64::from(self.cells));
        self.active_cell = next as u32;
    }

    /// Source rect of the active cell in image pixels.
    pub fn active_clip(&self) -> Rect {
        let cols = self.cols.max(1);
        let col = self.active_cell % cols;
        let row = self.active_cell / cols;
        Rect::new(
            col as f32 * self.cell_size.x,
            row as f32 * self.cell_size.y,
            self.cell_size.x,
            self.cell_size.y,
        )
    }
}

impl Geometry for Sprite {
    fn draw(&self, list: &mut DrawList, _material: &Rc<Material>, transform: &Transform) {
        self.image.draw_clipped(list, transform, Some(self.active_clip()));
    }

    fn check_collision(&self, coords: Vec2, material: &Material, transform: &Transform) -> bool {
        self.image.check_collision(coords, material, transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(rows: u32, cols: u32) -> Sprite {
        let mut s = Sprite::new(Image::new("walk.png"), rows, cols);
        s.apply_natural_size(Vec2::new(400.0, 200.0));
        s
    }

    #[test]
    fn load_cuts_image_into_cells() {
        let s = loaded(2, 4);
        assert_eq!(s.cell_size(), Vec2::new(100.0, 100.0));
        assert_eq!((s.image.width, s.image.height), (100.0, 100.0));
    }

    #[test]
    fn clip_follows_row_major_order() {
        let mut s = loaded(2, 4);
        s.step(5);
        assert_eq!(s.active_clip(), Rect::new(100.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn step_wraps_both_ways() {
        let mut s = loaded(2, 4);
        s.step(-1);
        assert_eq!(s.active_cell, 7);
        s.step(3);
        assert_eq!(s.active_cell, 2);
    }

    #[test]
    fn explicit_cell_count_bounds_wrapping() {
        let mut s = loaded(2, 4).with_cells(6);
        s.step(6);
        assert_eq!(s.active_cell, 0);
    }
}
