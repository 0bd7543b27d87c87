//! Rigid and similarity transforms of points and shapes.
//!
//! # Overview
//!
//! - [`rotate_point`], [`scale_point`], [`translate_point`] - Point primitives
//! - [`Transformation`] - A transform value that can be applied to any shape
//! - [`Transformable`] - Lifts a [`Transformation`] to each shape type
//!
//! Rotations take degrees (counter-clockwise) about an arbitrary center. A
//! zero rotation and a unit scale return their input unchanged, bit for bit.

use crate::{
    circle::angle_of_point,
    geometry::{Point2, deg_to_rad},
    line::reflect_point,
    shape::{Angle, Arc, Circle, CircleLike, Line, Polygon, Shape},
};

/// Rotates `point` by `angle_deg` about `center`.
pub fn rotate_point(point: Point2, angle_deg: f64, center: Point2) -> Point2 {
    if angle_deg == 0.0 {
        return point;
    }
    let rad = deg_to_rad(angle_deg);
    let (sin, cos) = rad.sin_cos();
    let d = point.sub_point(center);
    Point2::new(
        center.x() + d.x() * cos - d.y() * sin,
        center.y() + d.x() * sin + d.y() * cos,
    )
}

/// Scales the offset of `point` from `center` by `factor`.
pub fn scale_point(point: Point2, factor: f64, center: Point2) -> Point2 {
    if factor == 1.0 {
        return point;
    }
    center.add_point(point.sub_point(center).scale(factor))
}

pub fn translate_point(point: Point2, offset: Point2) -> Point2 {
    point.add_point(offset)
}

/// A single geometric transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transformation {
    Rotate { angle: f64, center: Point2 },
    Scale { factor: f64, center: Point2 },
    Translate { offset: Point2 },
    Reflect { mirror: Line },
}

impl Transformation {
    /// Applies the transform to a single point.
    pub fn apply(&self, point: Point2) -> Point2 {
        match *self {
            Self::Rotate { angle, center } => rotate_point(point, angle, center),
            Self::Scale { factor, center } => scale_point(point, factor, center),
            Self::Translate { offset } => translate_point(point, offset),
            Self::Reflect { mirror } => reflect_point(point, mirror),
        }
    }
}

/// Shapes that can be carried through a [`Transformation`].
pub trait Transformable: Sized {
    fn transformed(&self, t: &Transformation) -> Self;
}

impl Transformable for Point2 {
    fn transformed(&self, t: &Transformation) -> Self {
        t.apply(*self)
    }
}

impl Transformable for Line {
    fn transformed(&self, t: &Transformation) -> Self {
        Line::new(t.apply(self.start()), t.apply(self.end()))
    }
}

impl Transformable for Circle {
    /// Scaling multiplies the radius by the factor itself, so a negative
    /// factor yields a negative stored radius.
    fn transformed(&self, t: &Transformation) -> Self {
        let radius = match *t {
            Transformation::Scale { factor, .. } => self.radius() * factor,
            _ => self.radius(),
        };
        Circle::new(t.apply(self.center()), radius)
    }
}

impl Transformable for Arc {
    fn transformed(&self, t: &Transformation) -> Self {
        let center = t.apply(self.center());
        match *t {
            Transformation::Rotate { angle, .. } => {
                self.with_frame(center, self.radius(), self.start_angle() + angle)
            }
            Transformation::Scale { factor, .. } => {
                self.with_frame(center, self.radius() * factor, self.start_angle())
            }
            Transformation::Translate { .. } => {
                self.with_frame(center, self.radius(), self.start_angle())
            }
            Transformation::Reflect { .. } => {
                // Mirroring reverses the direction of travel.
                let start = t.apply(self.start_point());
                Arc::new(
                    center,
                    self.radius().abs(),
                    angle_of_point(center, start),
                    -self.sweep(),
                )
            }
        }
    }
}

impl Transformable for Polygon {
    fn transformed(&self, t: &Transformation) -> Self {
        self.map_vertices(|v| t.apply(v))
    }
}

impl Transformable for Angle {
    fn transformed(&self, t: &Transformation) -> Self {
        self.map_points(|p| t.apply(p))
    }
}

impl Shape {
    /// Applies `t`, or returns `None` for shapes that cannot be transformed
    /// (plots).
    pub fn transformed(&self, t: &Transformation) -> Option<Shape> {
        let shape = match self {
            Self::Point(p) => Self::Point(p.transformed(t)),
            Self::Line(line) => Self::Line(line.transformed(t)),
            Self::Circle(circle) => Self::Circle(circle.transformed(t)),
            Self::Arc(arc) => Self::Arc(arc.transformed(t)),
            Self::Polygon(polygon) => Self::Polygon(polygon.transformed(t)),
            Self::Angle(angle) => Self::Angle(angle.transformed(t)),
            Self::Plot(_) => return None,
        };
        Some(shape)
    }
}
