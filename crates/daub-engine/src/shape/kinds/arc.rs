use std::f32::consts::TAU;
use std::rc::Rc;

use crate::coords::{Transform, Vec2};
use crate::draw::{ArcCmd, DrawCmd, DrawList};
use crate::paint::Material;
use crate::shape::Geometry;

/// Circular arc centred on the shape position. Angles are in radians.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Arc {
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub counter_clockwise: bool,
}

impl Arc {
    pub fn new(radius: f32, start_angle: f32, end_angle: f32) -> Self {
        Self { radius, start_angle, end_angle, counter_clockwise: false }
    }

    pub fn counter_clockwise(mut self, ccw: bool) -> Self {
        self.counter_clockwise = ccw;
        self
    }
}

/// Distance test shared by arcs and circles. Half the stroke counts as inside.
fn within_radius(radius: f32, coords: Vec2, material: &Material, transform: &Transform) -> bool {
    coords.distance(transform.position) <= (radius + material.line_width / 2.0) * transform.scale
}

fn push_arc(
    list: &mut DrawList,
    material: &Rc<Material>,
    transform: &Transform,
    radius: f32,
    (start_angle, end_angle): (f32, f32),
    counter_clockwise: bool,
) {
    list.push(DrawCmd::Arc(ArcCmd {
        center: transform.position,
        radius: radius * transform.scale,
        start_angle,
        end_angle,
        counter_clockwise,
        line_width: material.line_width * transform.scale,
        material: Rc::clone(material),
    }));
}

impl Geometry for Arc {
    fn draw(&self, list: &mut DrawList, material: &Rc<Material>, transform: &Transform) {
        push_arc(
            list,
            material,
            transform,
            self.radius,
            (self.start_angle, self.end_angle),
            self.counter_clockwise,
        );
    }

    fn check_collision(&self, coords: Vec2, material: &Material, transform: &Transform) -> bool {
        let d = coords - transform.position;
        let mut angle = d.y.atan2(d.x);
        if angle < 0.0 {
            angle += TAU;
        }
        angle >= self.start_angle
            && angle <= self.end_angle
            && within_radius(self.radius, coords, material, transform)
    }
}

/// Full circle centred on the shape position.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Circle {
    pub radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Geometry for Circle {
    fn draw(&self, list: &mut DrawList, material: &Rc<Material>, transform: &Transform) {
        push_arc(list, material, transform, self.radius, (0.0, TAU), false);
    }

    fn check_collision(&self, coords: Vec2, material: &Material, transform: &Transform) -> bool {
        within_radius(self.radius, coords, material, transform)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn origin() -> Transform {
        Transform::identity()
    }

    // ── circle ───────────────────────────────────────────────────────────

    #[test]
    fn circle_counts_half_the_stroke() {
        let c = Circle::new(10.0);
        let thin = Material::default();
        let thick = Material::stroked(Default::default(), 4.0);
        let p = Vec2::new(11.5, 0.0);
        assert!(!c.check_collision(p, &thin, &origin()));
        assert!(c.check_collision(p, &thick, &origin()));
    }

    #[test]
    fn circle_radius_scales() {
        let c = Circle::new(10.0);
        let m = Material::default();
        let t = Transform::new(Vec2::new(50.0, 50.0), 2.0, 0.0);
        assert!(c.check_collision(Vec2::new(50.0, 69.0), &m, &t));
        assert!(!c.check_collision(Vec2::new(50.0, 71.0), &m, &t));
    }

    // ── arc ──────────────────────────────────────────────────────────────

    #[test]
    fn arc_accepts_points_inside_its_sweep() {
        // Lower half in screen space: angles 0..π.
        let a = Arc::new(10.0, 0.0, PI);
        let m = Material::default();
        assert!(a.check_collision(Vec2::new(0.0, 5.0), &m, &origin()));
        assert!(!a.check_collision(Vec2::new(0.0, -5.0), &m, &origin()));
    }

    #[test]
    fn negative_atan2_is_wrapped_into_full_turn() {
        // Point straight up has atan2 = -π/2, i.e. 3π/2 after wrapping.
        let a = Arc::new(10.0, PI, TAU);
        let m = Material::default();
        assert!(a.check_collision(Vec2::new(0.0, -5.0), &m, &origin()));
        assert!(!a.check_collision(Vec2::new(0.0, -11.0), &m, &origin()));
    }

    #[test]
    fn circle_draws_full_turn() {
        let mut list = DrawList::new();
        Circle::new(3.0).draw(&mut list, &Rc::new(Material::default()), &origin());
        let DrawCmd::Arc(cmd) = &list.items()[0] else {
            panic!("expected an arc command");
        };
        assert_eq!((cmd.start_angle, cmd.end_angle), (0.0, TAU));
        assert_eq!(cmd.radius, 3.0);
    }
}
