use std::rc::Rc;

use crate::coords::{Rect, Transform, Vec2};
use crate::draw::{DrawCmd, DrawList, RectCmd};
use crate::paint::Material;
use crate::shape::Geometry;

/// Axis-aligned box anchored at its top-left corner.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rectangle {
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Absolute, scaled box. Rotation is not applied.
    pub fn rect_at(&self, transform: &Transform) -> Rect {
        Rect::from_origin_size(
            transform.position,
            Vec2::new(self.width, self.height) * transform.scale,
        )
    }
}

impl Geometry for Rectangle {
    fn draw(&self, list: &mut DrawList, material: &Rc<Material>, transform: &Transform) {
        list.push(DrawCmd::Rect(RectCmd {
            rect: self.rect_at(transform),
            rotation: transform.rotation,
            line_width: material.line_width * transform.scale,
            material: Rc::clone(material),
        }));
    }

    fn check_collision(&self, coords: Vec2, _material: &Material, transform: &Transform) -> bool {
        self.rect_at(transform).contains_inclusive(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32, scale: f32) -> Transform {
        Transform::new(Vec2::new(x, y), scale, 0.0)
    }

    #[test]
    fn collision_is_edge_inclusive() {
        let r = Rectangle::new(20.0, 20.0);
        let m = Material::default();
        let t = at(10.0, 10.0, 1.0);
        assert!(r.check_collision(Vec2::new(10.0, 10.0), &m, &t));
        assert!(r.check_collision(Vec2::new(30.0, 30.0), &m, &t));
        assert!(!r.check_collision(Vec2::new(30.1, 15.0), &m, &t));
        assert!(!r.check_collision(Vec2::new(9.9, 15.0), &m, &t));
    }

    #[test]
    fn collision_box_scales_from_top_left() {
        let r = Rectangle::new(10.0, 10.0);
        let m = Material::default();
        assert!(r.check_collision(Vec2::new(19.0, 19.0), &m, &at(0.0, 0.0, 2.0)));
        assert!(!r.check_collision(Vec2::new(11.0, 11.0), &m, &at(0.0, 0.0, 1.0)));
    }

    #[test]
    fn draw_records_scaled_rect_and_shared_material() {
        let r = Rectangle::new(4.0, 3.0);
        let m = Rc::new(Material::stroked(Default::default(), 2.0));
        let mut list = DrawList::new();
        r.draw(&mut list, &m, &Transform::new(Vec2::new(1.0, 1.0), 2.0, 0.5));

        let DrawCmd::Rect(cmd) = &list.items()[0] else {
            panic!("expected a rect command");
        };
        assert_eq!(cmd.rect, Rect::new(1.0, 1.0, 8.0, 6.0));
        assert_eq!(cmd.rotation, 0.5);
        assert_eq!(cmd.line_width, 4.0);
        assert!(Rc::ptr_eq(&cmd.material, &m));
    }
}
