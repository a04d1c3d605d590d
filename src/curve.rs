//! Line segments and cubic bezier curves
use crate::{quadratic_solve, ArrayIter, Point, Rect, Scalar};
use std::fmt;

/// Parameter values at which curve reaches its extremes along x or y axis
pub type CurveExtremities = ArrayIter<Scalar, 4>;

/// Set of operations common to all curves.
pub trait Curve: Sized + Into<Segment> {
    /// Point at which curve starts
    fn start(&self) -> Point;

    /// Point at which curve ends
    fn end(&self) -> Point;

    /// Evaluate curve at parameter value `t` in (0.0..=1.0)
    fn at(&self, t: Scalar) -> Point;

    /// Derivative with respect to t evaluated at `t`, `[curve'(t)_x, curve'(t)_y]`
    fn deriv_at(&self, t: Scalar) -> Point;

    /// Identical curve but directed from end to start, instead of start to end.
    fn reverse(&self) -> Self;

    /// Find all extremities of the curve `curve'(t)_x = 0 || curve'(t)_y = 0`
    /// for `t` strictly inside of `(0.0..1.0)`, in ascending order.
    fn extremities(&self) -> CurveExtremities;

    /// Tight bounding box of the curve extended with `init` bounding box
    fn bbox(&self, init: Option<Rect>) -> Rect;
}

// -----------------------------------------------------------------------------
// Line
// -----------------------------------------------------------------------------

/// Line segment curve
#[derive(Clone, Copy, PartialEq)]
pub struct Line(pub [Point; 2]);

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Line([p0, p1]) = self;
        write!(f, "Line {:?} {:?}", p0, p1)
    }
}

impl Line {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into()])
    }

    /// Start and end points of the line
    pub fn points(&self) -> [Point; 2] {
        self.0
    }
}

impl Curve for Line {
    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[1]
    }

    fn at(&self, t: Scalar) -> Point {
        let Self([p0, p1]) = *self;
        (1.0 - t) * p0 + t * p1
    }

    fn deriv_at(&self, _t: Scalar) -> Point {
        self.end() - self.start()
    }

    fn reverse(&self) -> Self {
        let Self([p0, p1]) = *self;
        Self([p1, p0])
    }

    fn extremities(&self) -> CurveExtremities {
        CurveExtremities::new()
    }

    fn bbox(&self, init: Option<Rect>) -> Rect {
        let Self([p0, p1]) = *self;
        Rect::new(p0, p1).union_opt(init)
    }
}

// -----------------------------------------------------------------------------
// Cubic bezier curve
// -----------------------------------------------------------------------------

/// Cubic bezier curve
///
/// Polynimial form:
/// `(1 - t) ^ 3 * p0 + 3 * (1 - t) ^ 2 * t * p1 + 3 * (1 - t) * t ^ 2 * p2 + t ^ 3 * p3`
#[derive(Clone, Copy, PartialEq)]
pub struct Cubic(pub [Point; 4]);

impl fmt::Debug for Cubic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Cubic([p0, p1, p2, p3]) = self;
        write!(f, "Cubic {:?} {:?} {:?} {:?}", p0, p1, p2, p3)
    }
}

impl Cubic {
    pub fn new(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        Self([p0.into(), p1.into(), p2.into(), p3.into()])
    }

    pub fn points(&self) -> [Point; 4] {
        self.0
    }
}

/// Roots of `z'(t) = 0` for a single coordinate of a cubic curve
///
/// The derivative of a cubic bezier coordinate is
///     z'(t) = 3 (1 - t)^2 (z1 - z0) + 6 (1 - t) t (z2 - z1) + 3 t^2 (z3 - z2)
/// with `a = z1 - z0`, `b = z2 - z1`, `c = z3 - z2` it becomes
///     z'(t) = 3 t^2 (a - 2 b + c) + 6 t (b - a) + 3 a
/// and with `u = a - b`, `v = b - c`, dropping the common factor of 3
///     z'(t) / 3 = t^2 (u - v) - 2 t u + a
fn cubic_axis_extremities(
    z0: Scalar,
    z1: Scalar,
    z2: Scalar,
    z3: Scalar,
    out: &mut CurveExtremities,
) {
    let a = z1 - z0;
    let b = z2 - z1;
    let c = z3 - z2;
    let u = a - b;
    let v = b - c;
    match quadratic_solve(u - v, -2.0 * u, a) {
        Ok(roots) => out.extend(roots.filter(|t| 0.0 < *t && *t < 1.0)),
        // derivative is constant, no extremities inside of the curve
        Err(error) => tracing::trace!(%error, "[cubic:extremities] degenerate axis"),
    }
}

impl Curve for Cubic {
    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[3]
    }

    fn at(&self, t: Scalar) -> Point {
        // at(t) =
        //   (1 - t) ^ 3 * p0 +
        //   3 * (1 - t) ^ 2 * t * p1 +
        //   3 * (1 - t) * t ^ 2 * p2 +
        //   t ^ 3 * p3
        let Self([p0, p1, p2, p3]) = *self;
        let (t1, t_1) = (t, 1.0 - t);
        let (t2, t_2) = (t1 * t1, t_1 * t_1);
        let (t3, t_3) = (t2 * t1, t_2 * t_1);
        t_3 * p0 + 3.0 * t1 * t_2 * p1 + 3.0 * t2 * t_1 * p2 + t3 * p3
    }

    fn deriv_at(&self, t: Scalar) -> Point {
        // deriv(t) =
        //   3 * (1 - t) ^ 2 * (p1 - p0) +
        //   6 * (1 - t) * t * (p2 - p1) +
        //   3 * t ^ 2 * (p3 - p2)
        let Self([p0, p1, p2, p3]) = *self;
        let t_1 = 1.0 - t;
        (3.0 * t_1 * t_1) * (p1 - p0) + (6.0 * t_1 * t) * (p2 - p1) + (3.0 * t * t) * (p3 - p2)
    }

    fn reverse(&self) -> Self {
        let Self([p0, p1, p2, p3]) = *self;
        Self([p3, p2, p1, p0])
    }

    fn extremities(&self) -> CurveExtremities {
        let Self([Point([x0, y0]), Point([x1, y1]), Point([x2, y2]), Point([x3, y3])]) = *self;
        let mut result = CurveExtremities::new();
        cubic_axis_extremities(y0, y1, y2, y3, &mut result);
        cubic_axis_extremities(x0, x1, x2, x3, &mut result);
        result.sort_by(Scalar::total_cmp);
        result
    }

    /// Bounding box is formed by the end points and points at extremities
    fn bbox(&self, init: Option<Rect>) -> Rect {
        let Self([p0, p1, p2, p3]) = *self;
        let bbox = Rect::new(p0, p3);
        // curve is inside of the convex hull of its control points
        let bbox = if bbox.contains(p1) && bbox.contains(p2) {
            bbox
        } else {
            self.extremities()
                .fold(bbox, |bbox, t| bbox.extend(self.at(t)))
        };
        bbox.union_opt(init)
    }
}

// -----------------------------------------------------------------------------
// Segment
// -----------------------------------------------------------------------------

/// `Segment` is an enum of either `Line` or `Cubic`
#[derive(Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Line),
    Cubic(Cubic),
}

impl Segment {
    /// Convert to line if it is a line variant of the segment
    pub fn to_line(&self) -> Option<Line> {
        match self {
            Segment::Line(line) => Some(*line),
            _ => None,
        }
    }

    /// Convert to cubic if it is a cubic variant of the segment
    pub fn to_cubic(&self) -> Option<Cubic> {
        match self {
            Segment::Cubic(cubic) => Some(*cubic),
            _ => None,
        }
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Line(line) => line.fmt(f),
            Segment::Cubic(cubic) => cubic.fmt(f),
        }
    }
}

impl Curve for Segment {
    fn start(&self) -> Point {
        match self {
            Segment::Line(line) => line.start(),
            Segment::Cubic(cubic) => cubic.start(),
        }
    }

    fn end(&self) -> Point {
        match self {
            Segment::Line(line) => line.end(),
            Segment::Cubic(cubic) => cubic.end(),
        }
    }

    fn at(&self, t: Scalar) -> Point {
        match self {
            Segment::Line(line) => line.at(t),
            Segment::Cubic(cubic) => cubic.at(t),
        }
    }

    fn deriv_at(&self, t: Scalar) -> Point {
        match self {
            Segment::Line(line) => line.deriv_at(t),
            Segment::Cubic(cubic) => cubic.deriv_at(t),
        }
    }

    fn reverse(&self) -> Self {
        match self {
            Segment::Line(line) => line.reverse().into(),
            Segment::Cubic(cubic) => cubic.reverse().into(),
        }
    }

    fn extremities(&self) -> CurveExtremities {
        match self {
            Segment::Line(line) => line.extremities(),
            Segment::Cubic(cubic) => cubic.extremities(),
        }
    }

    fn bbox(&self, init: Option<Rect>) -> Rect {
        match self {
            Segment::Line(line) => line.bbox(init),
            Segment::Cubic(cubic) => cubic.bbox(init),
        }
    }
}

impl From<Line> for Segment {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Cubic> for Segment {
    fn from(cubic: Cubic) -> Self {
        Self::Cubic(cubic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    /// Bounding box of densely sampled points of the curve
    fn sampled_bbox(curve: &impl Curve, samples: usize) -> Rect {
        (0..=samples)
            .map(|index| curve.at(index as Scalar / samples as Scalar))
            .fold(Rect::new(curve.start(), curve.end()), |bbox, p| {
                bbox.extend(p)
            })
    }

    /// Bounding box contains every sampled point and touches all sampled extremes
    fn tightness_check(curve: &impl Curve) {
        const SAMPLES: usize = 10_000;
        const TOLERANCE: Scalar = 1e-6;
        let bbox = curve.bbox(None);
        for index in 0..=SAMPLES {
            let t = index as Scalar / SAMPLES as Scalar;
            let Point([x, y]) = curve.at(t);
            assert!(bbox.x() - TOLERANCE <= x && x <= bbox.max().x() + TOLERANCE);
            assert!(bbox.y() - TOLERANCE <= y && y <= bbox.max().y() + TOLERANCE);
        }
        let sampled = sampled_bbox(curve, SAMPLES);
        assert_approx_eq!(bbox.x(), sampled.x(), 1e-3);
        assert_approx_eq!(bbox.y(), sampled.y(), 1e-3);
        assert_approx_eq!(bbox.max().x(), sampled.max().x(), 1e-3);
        assert_approx_eq!(bbox.max().y(), sampled.max().y(), 1e-3);
    }

    #[test]
    fn test_at_deriv() {
        let c = Cubic::new((0.0, 0.0), (0.0, 100.0), (100.0, 100.0), (100.0, 0.0));
        assert_eq!(c.at(0.0), c.start());
        assert_eq!(c.at(1.0), c.end());
        assert_eq!(c.at(0.5), Point::new(50.0, 75.0));
        assert_eq!(c.deriv_at(0.0), Point::new(0.0, 300.0));
        assert_eq!(c.deriv_at(1.0), Point::new(0.0, -300.0));
        assert_eq!(c.deriv_at(0.5), Point::new(150.0, 0.0));

        // derivative against finite difference
        let c = Cubic::new((3.0, 7.0), (2.0, 8.0), (0.0, 3.0), (6.0, 5.0));
        let h = 1e-6;
        for t in [0.1, 0.3, 0.5, 0.9] {
            let Point([dx, dy]) = (c.at(t + h) - c.at(t - h)) / (2.0 * h);
            let deriv = c.deriv_at(t);
            assert_approx_eq!(deriv.x(), dx, 1e-5);
            assert_approx_eq!(deriv.y(), dy, 1e-5);
        }

        let l = Line::new((1.0, 2.0), (5.0, -2.0));
        assert_eq!(l.at(0.5), Point::new(3.0, 0.0));
        assert_eq!(l.deriv_at(0.25), Point::new(4.0, -4.0));
    }

    #[test]
    fn test_extremities() {
        // s-curve, only y has an extremum inside of the curve
        let c = Cubic::new((0.0, 0.0), (0.0, 100.0), (100.0, 100.0), (100.0, 0.0));
        assert_eq!(c.extremities().collect::<Vec<_>>(), vec![0.5]);

        let c = Cubic::new((0.0, 0.0), (10.0, -3.0), (-4.0, -3.0), (6.0, 0.0));
        let ts = c.extremities().collect::<Vec<_>>();
        assert_eq!(ts.len(), 3, "{:?}", ts);
        assert!(ts.windows(2).all(|w| w[0] <= w[1]), "{:?}", ts);
        assert!(ts.iter().all(|t| 0.0 < *t && *t < 1.0), "{:?}", ts);
        for t in ts {
            let Point([dx, dy]) = c.deriv_at(t);
            assert!(dx.abs() < 1e-9 || dy.abs() < 1e-9, "{} {} {}", t, dx, dy);
        }

        // no extremities for curves without turning points
        let c = Cubic::new((0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 6.0));
        assert!(c.extremities().is_empty());
        let c = Cubic::new((0.0, 0.0), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0));
        assert!(c.extremities().is_empty());
        assert!(Line::new((0.0, 0.0), (1.0, 1.0)).extremities().is_empty());
    }

    #[test]
    fn test_bbox() {
        let cubic = Cubic::new((0.0, 0.0), (0.0, 100.0), (100.0, 100.0), (100.0, 0.0));
        let bbox = cubic.bbox(None);
        assert_eq!(bbox, Rect::from_xywh(0.0, 0.0, 100.0, 75.0).unwrap());
        tightness_check(&cubic);

        let cubic = Cubic::new((106.0, 0.0), (0.0, 100.0), (382.0, 216.0), (324.0, 14.0));
        let bbox = cubic.bbox(None);
        assert_approx_eq!(bbox.x(), 87.308, 0.001);
        assert_approx_eq!(bbox.y(), 0.0, 0.001);
        assert_approx_eq!(bbox.width(), 242.724, 0.001);
        assert_approx_eq!(bbox.height(), 125.140, 0.001);
        tightness_check(&cubic);

        let cubic = Cubic::new((0.0, 0.0), (10.0, -3.0), (-4.0, -3.0), (6.0, 0.0));
        let bbox = cubic.bbox(None);
        assert_approx_eq!(bbox.x(), 0.0);
        assert_approx_eq!(bbox.y(), -2.25);
        assert_approx_eq!(bbox.width(), 6.0);
        assert_approx_eq!(bbox.height(), 2.25);
        tightness_check(&cubic);

        // loop
        tightness_check(&Cubic::new((0.0, 0.0), (30.0, 20.0), (-10.0, 20.0), (20.0, 0.0)));
        tightness_check(&Cubic::new((158.0, 70.0), (210.0, 250.0), (25.0, 190.0), (219.0, 89.0)));

        // box does not depend on the direction of the curve
        let bbox = cubic.bbox(None);
        assert_eq!(cubic.reverse().bbox(None), bbox);

        // control points give an overestimate
        let cubic = Cubic::new((0.0, 0.0), (0.0, 100.0), (100.0, 100.0), (100.0, 0.0));
        let hull = cubic.points()[1..]
            .iter()
            .fold(Rect::new(cubic.start(), cubic.start()), |bbox, p| bbox.extend(*p));
        assert!(hull.height() > cubic.bbox(None).height());
    }

    #[test]
    fn test_bbox_large_coordinates() {
        let scale = 1e160;
        let unit = Cubic::new((0.0, 0.0), (1.0, 1.0), (2.0, -1.0), (3.0, 0.0));
        let cubic = Cubic::new(
            (0.0, 0.0),
            (scale, scale),
            (2.0 * scale, -scale),
            (3.0 * scale, 0.0),
        );
        assert_eq!(cubic.extremities().len(), 2);

        let bbox = cubic.bbox(None);
        let expected = unit.bbox(None);
        assert_approx_eq!(expected.height(), 3.0f64.sqrt() / 3.0, 1e-12);
        assert_approx_eq!(bbox.x() / scale, expected.x(), 1e-12);
        assert_approx_eq!(bbox.y() / scale, expected.y(), 1e-12);
        assert_approx_eq!(bbox.width() / scale, expected.width(), 1e-12);
        assert_approx_eq!(bbox.height() / scale, expected.height(), 1e-12);

        let tolerance = scale * 1e-12;
        for index in 0..=1000 {
            let Point([x, y]) = cubic.at(index as Scalar / 1000.0);
            assert!(bbox.x() - tolerance <= x && x <= bbox.max().x() + tolerance);
            assert!(bbox.y() - tolerance <= y && y <= bbox.max().y() + tolerance);
        }
    }

    #[test]
    fn test_bbox_collinear() {
        for (p0, p1, p2, p3) in [
            ((0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 6.0)),
            ((0.0, 0.0), (2.0, 1.0), (4.0, 2.0), (10.0, 5.0)),
            ((5.0, 1.0), (5.0, 2.0), (5.0, 3.0), (5.0, 7.0)),
            ((-3.0, 4.0), (-3.0, 4.0), (6.0, -2.0), (6.0, -2.0)),
        ] {
            let cubic = Cubic::new(p0, p1, p2, p3);
            let line = Line::new(p0, p3);
            assert_eq!(cubic.bbox(None), line.bbox(None), "{:?}", cubic);
        }
    }

    #[test]
    fn test_bbox_init() {
        let init = Rect::from_xywh(-10.0, 50.0, 1.0, 1.0).unwrap();
        let line = Line::new((3.0, 1.0), (1.0, 3.0));
        assert_eq!(line.bbox(None), Rect::from_xywh(1.0, 1.0, 2.0, 2.0).unwrap());
        assert_eq!(
            line.bbox(Some(init)),
            Rect::from_xywh(-10.0, 1.0, 13.0, 50.0).unwrap()
        );

        let cubic = Cubic::new((0.0, 0.0), (0.0, 100.0), (100.0, 100.0), (100.0, 0.0));
        assert_eq!(
            cubic.bbox(Some(init)),
            cubic.bbox(None).union(init),
        );

        let segment: Segment = cubic.into();
        assert_eq!(segment.bbox(None), cubic.bbox(None));
        assert_eq!(segment.to_cubic(), Some(cubic));
        assert_eq!(segment.to_line(), None);
        assert_eq!(segment.reverse().start(), cubic.end());
    }
}
