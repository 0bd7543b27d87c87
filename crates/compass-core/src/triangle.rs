//! Triangle centers and measures.
//!
//! Centers that are defined by intersecting two auxiliary lines (the
//! circumcenter and the orthocenter) fall back to the [centroid](Triangle::centroid)
//! when the triangle is degenerate, i.e. when the solving determinant is
//! below [`DEGENERATE_EPSILON`].

use crate::geometry::Point2;

/// Determinant/area threshold below which a triangle is degenerate.
pub const DEGENERATE_EPSILON: f64 = 1e-10;

/// A triangle with corners `a`, `b`, `c`.
///
/// # Examples
///
/// ```
/// # use compass_core::{geometry::Point2, triangle::Triangle};
/// let t = Triangle::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(0.0, 3.0));
/// assert!(t.incenter().approx_eq(Point2::new(1.0, 1.0), 1e-12));
/// assert_eq!(t.area(), 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    a: Point2,
    b: Point2,
    c: Point2,
}

impl Triangle {
    pub fn new(a: Point2, b: Point2, c: Point2) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(self) -> [Point2; 3] {
        [self.a, self.b, self.c]
    }

    /// Arithmetic mean of the corners.
    pub fn centroid(self) -> Point2 {
        Point2::new(
            (self.a.x() + self.b.x() + self.c.x()) / 3.0,
            (self.a.y() + self.b.y() + self.c.y()) / 3.0,
        )
    }

    /// Intersection of the perpendicular bisectors of `ab` and `ac`.
    pub fn circumcenter(self) -> Point2 {
        let mid_ab = self.a.midpoint(self.b);
        let mid_ac = self.a.midpoint(self.c);
        let perp_ab = self.b.sub_point(self.a).perpendicular();
        let perp_ac = self.c.sub_point(self.a).perpendicular();

        self.solve(mid_ab, perp_ab, mid_ac, perp_ac)
    }

    /// Intersection of the altitudes from `a` and `b`.
    pub fn orthocenter(self) -> Point2 {
        let perp_bc = self.c.sub_point(self.b).perpendicular();
        let perp_ca = self.a.sub_point(self.c).perpendicular();

        self.solve(self.a, perp_bc, self.b, perp_ca)
    }

    /// Intersects `p + t·dp` with `q + s·dq`, falling back to the centroid.
    fn solve(self, p: Point2, dp: Point2, q: Point2, dq: Point2) -> Point2 {
        let det = dp.cross(dq);
        if det.abs() < DEGENERATE_EPSILON {
            return self.centroid();
        }
        let t = q.sub_point(p).cross(dq) / det;
        p.add_point(dp.scale(t))
    }

    /// Side lengths `(|bc|, |ca|, |ab|)`, each opposite the matching corner.
    pub fn sides(self) -> (f64, f64, f64) {
        (
            self.b.distance(self.c),
            self.c.distance(self.a),
            self.a.distance(self.b),
        )
    }

    /// Side-length-weighted average of the corners.
    ///
    /// A triangle collapsed to a single point yields `a`.
    pub fn incenter(self) -> Point2 {
        let (la, lb, lc) = self.sides();
        let perimeter = la + lb + lc;
        if perimeter < DEGENERATE_EPSILON {
            return self.a;
        }
        Point2::new(
            (la * self.a.x() + lb * self.b.x() + lc * self.c.x()) / perimeter,
            (la * self.a.y() + lb * self.b.y() + lc * self.c.y()) / perimeter,
        )
    }

    /// Signed area; positive for counter-clockwise corners.
    pub fn signed_area(self) -> f64 {
        self.b.sub_point(self.a).cross(self.c.sub_point(self.a)) / 2.0
    }

    pub fn area(self) -> f64 {
        self.signed_area().abs()
    }

    pub fn perimeter(self) -> f64 {
        let (la, lb, lc) = self.sides();
        la + lb + lc
    }

    /// Radius of the circumscribed circle; infinite for a degenerate triangle.
    pub fn circumradius(self) -> f64 {
        let area = self.area();
        if area < DEGENERATE_EPSILON {
            return f64::INFINITY;
        }
        let (la, lb, lc) = self.sides();
        la * lb * lc / (4.0 * area)
    }

    /// Radius of the inscribed circle; zero for a degenerate triangle.
    pub fn inradius(self) -> f64 {
        let perimeter = self.perimeter();
        if perimeter < DEGENERATE_EPSILON {
            return 0.0;
        }
        2.0 * self.area() / perimeter
    }

    /// Returns `true` when `p` lies inside or on the boundary.
    pub fn contains_point(self, p: Point2) -> bool {
        let d1 = Self::new(p, self.a, self.b).signed_area();
        let d2 = Self::new(p, self.b, self.c).signed_area();
        let d3 = Self::new(p, self.c, self.a).signed_area();
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }
}
