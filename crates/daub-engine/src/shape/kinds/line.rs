use std::rc::Rc;

use crate::coords::{Transform, Vec2};
use crate::draw::{DrawCmd, DrawList, PathCmd, PathSegment};
use crate::paint::Material;
use crate::shape::Geometry;

/// One vertex of a [`Line`], relative to the shape position.
///
/// Control points turn the segment ending at this vertex into a quadratic or
/// cubic curve. They are ignored on the first vertex.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LinePoint {
    Straight(Vec2),
    Quad { ctrl: Vec2, to: Vec2 },
    Cubic { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
}

impl LinePoint {
    pub fn to(&self) -> Vec2 {
        match *self {
            Self::Straight(to) | Self::Quad { to, .. } | Self::Cubic { to, .. } => to,
        }
    }

    fn segment(&self, offset: Vec2) -> PathSegment {
        match *self {
            Self::Straight(to) => PathSegment::LineTo(to + offset),
            Self::Quad { ctrl, to } => PathSegment::QuadTo { ctrl: ctrl + offset, to: to + offset },
            Self::Cubic { ctrl1, ctrl2, to } => PathSegment::CubicTo {
                ctrl1: ctrl1 + offset,
                ctrl2: ctrl2 + offset,
                to: to + offset,
            },
        }
    }
}

impl From<Vec2> for LinePoint {
    fn from(p: Vec2) -> Self {
        Self::Straight(p)
    }
}

impl From<(f32, f32)> for LinePoint {
    fn from(p: (f32, f32)) -> Self {
        Self::Straight(p.into())
    }
}

/// Open or filled polyline. Vertices are offset by the absolute position but
/// not scaled. Lines never collide.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub points: Vec<LinePoint>,
    pub fill: bool,
}

impl Line {
    pub fn new<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<LinePoint>,
    {
        Self { points: points.into_iter().map(Into::into).collect(), fill: false }
    }

    pub fn filled(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn add_points<I, P>(&mut self, points: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<LinePoint>,
    {
        self.points.extend(points.into_iter().map(Into::into));
    }

    fn segments(&self, offset: Vec2) -> Vec<PathSegment> {
        let mut points = self.points.iter();
        let Some(first) = points.next() else {
            return Vec::new();
        };
        std::iter::once(PathSegment::MoveTo(first.to() + offset))
            .chain(points.map(|p| p.segment(offset)))
            .collect()
    }
}

impl Geometry for Line {
    fn draw(&self, list: &mut DrawList, material: &Rc<Material>, transform: &Transform) {
        if self.points.is_empty() {
            return;
        }
        list.push(DrawCmd::Path(PathCmd {
            segments: self.segments(transform.position),
            fill: self.fill,
            line_width: material.line_width * transform.scale,
            material: Rc::clone(material),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_vertex_moves_and_curves_keep_controls() {
        let mut line = Line::new([Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]);
        line.add_points([LinePoint::Quad { ctrl: Vec2::new(15.0, 5.0), to: Vec2::new(10.0, 10.0) }]);

        let segs = line.segments(Vec2::new(1.0, 2.0));
        assert_eq!(
            segs,
            vec![
                PathSegment::MoveTo(Vec2::new(1.0, 2.0)),
                PathSegment::LineTo(Vec2::new(11.0, 2.0)),
                PathSegment::QuadTo { ctrl: Vec2::new(16.0, 7.0), to: Vec2::new(11.0, 12.0) },
            ]
        );
    }

    #[test]
    fn empty_line_draws_nothing_and_never_collides() {
        let line = Line::default();
        let mut list = DrawList::new();
        line.draw(&mut list, &Rc::new(Material::default()), &Transform::identity());
        assert!(list.is_empty());
        assert!(!line.check_collision(Vec2::zero(), &Material::default(), &Transform::identity()));
    }
}
