use crate::Error;
use std::{
    fmt,
    ops::{Add, Div, Mul, Sub},
    str::FromStr,
};

pub type Scalar = f64;
pub const EPSILON: f64 = f64::EPSILON;

/// Format floats in a compact, rounded way suitable for debug output
pub fn scalar_fmt(f: &mut fmt::Formatter<'_>, value: Scalar) -> fmt::Result {
    let value_abs = value.abs();
    if value_abs.fract() < EPSILON && value_abs < 1e15 {
        write!(f, "{}", value.trunc() as i64)
    } else if value_abs > 9999.0 || value_abs <= 0.0001 {
        write!(f, "{:.3e}", value)
    } else {
        let ten: Scalar = 10.0;
        let round = ten.powi(6 - (value_abs.trunc() + 1.0).log10().ceil() as i32);
        write!(f, "{}", (value * round).round() / round)
    }
}

/// Value representing a 2D point or vector.
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(pub [Scalar; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        scalar_fmt(f, *x)?;
        write!(f, ",")?;
        scalar_fmt(f, *y)?;
        Ok(())
    }
}

impl Point {
    #[inline]
    pub const fn new(x: Scalar, y: Scalar) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub fn x(self) -> Scalar {
        self.0[0]
    }

    /// Get `y` compenent of the point
    #[inline]
    pub fn y(self) -> Scalar {
        self.0[1]
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from(xy: (Scalar, Scalar)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Self::Output {
        let Point([x, y]) = other;
        Point([self * x, self * y])
    }
}

impl Div<Scalar> for Point {
    type Output = Point;

    #[inline]
    fn div(self, rhs: Scalar) -> Self::Output {
        let Point([x, y]) = self;
        Point([x / rhs, y / rhs])
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 + x1, y0 + y1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

/// Axis aligned rectangle `{x, y, w, h}`
///
/// `(x, y)` is the corner with minimal coordinates, width and height are
/// never negative. Stored as a pair of minimal and maximal corners.
#[derive(Clone, Copy, PartialEq)]
pub struct Rect {
    /// Point with minimal x and y values
    min: Point,
    /// Point with maximum x and y values
    max: Point,
}

impl Rect {
    /// Construct smallest rectangle which includes points `p0` and `p1`
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        let Point([x0, y0]) = p0.into();
        let Point([x1, y1]) = p1.into();
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            min: Point([x0, y0]),
            max: Point([x1, y1]),
        }
    }

    /// Construct rectangle from its minimal corner and size
    pub fn from_xywh(x: Scalar, y: Scalar, w: Scalar, h: Scalar) -> Result<Self, Error> {
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return Err(Error::InvalidRect {
                reason: format!("non-finite value in x={x} y={y} w={w} h={h}"),
            });
        }
        if w < 0.0 || h < 0.0 {
            return Err(Error::InvalidRect {
                reason: format!("negative size w={w} h={h}"),
            });
        }
        Ok(Self {
            min: Point([x, y]),
            max: Point([x + w, y + h]),
        })
    }

    /// Point with minimal values of x and y coordinates
    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    /// Point with maximal values of x and y coordinates
    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    /// `x` coordinate of the point with the minimal value
    #[inline]
    pub fn x(&self) -> Scalar {
        self.min.x()
    }

    /// `y` coordinate of the point with the minimal value
    #[inline]
    pub fn y(&self) -> Scalar {
        self.min.y()
    }

    /// Width of the rectangle
    #[inline]
    pub fn width(&self) -> Scalar {
        self.max.x() - self.min.x()
    }

    /// Height of the rectangle
    #[inline]
    pub fn height(&self) -> Scalar {
        self.max.y() - self.min.y()
    }

    /// Determine if the point is inside of the rectangle (borders included)
    pub fn contains(&self, point: Point) -> bool {
        let Point([x, y]) = point;
        self.min.x() <= x && x <= self.max.x() && self.min.y() <= y && y <= self.max.y()
    }

    /// Determine if the other rectangle is fully inside of this one
    pub fn contains_rect(&self, other: Rect) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Extend rectangle so it would contain provided point
    pub fn extend(&self, point: Point) -> Self {
        let Point([x, y]) = point;
        Self {
            min: Point([self.min.x().min(x), self.min.y().min(y)]),
            max: Point([self.max.x().max(x), self.max.y().max(y)]),
        }
    }

    /// Smallest rectangle containing both rectangles
    ///
    /// Commutative and associative, there is no neutral element (see [`Rect::union_opt`]).
    pub fn union(&self, other: Rect) -> Self {
        Self {
            min: Point([
                self.min.x().min(other.min.x()),
                self.min.y().min(other.min.y()),
            ]),
            max: Point([
                self.max.x().max(other.max.x()),
                self.max.y().max(other.max.y()),
            ]),
        }
    }

    /// Union with an optional rectangle, `None` leaves rectangle unchanged
    pub fn union_opt(&self, other: Option<Rect>) -> Self {
        match other {
            Some(other) => self.union(other),
            None => *self,
        }
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect x=")?;
        scalar_fmt(f, self.x())?;
        write!(f, ", y=")?;
        scalar_fmt(f, self.y())?;
        write!(f, ", w=")?;
        scalar_fmt(f, self.width())?;
        write!(f, ", h=")?;
        scalar_fmt(f, self.height())
    }
}

/// Formatted as `x y w h` without rounding, same as accepted by `FromStr`
impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.x(),
            self.y(),
            self.width(),
            self.height()
        )
    }
}

impl FromStr for Rect {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut values = [0.0; 4];
        let mut count = 0;
        for token in text
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
        {
            let value = lexical_core::parse::<Scalar>(token.as_bytes()).map_err(|_| {
                Error::InvalidRect {
                    reason: format!("failed to parse scalar: {token}"),
                }
            })?;
            if count >= values.len() {
                return Err(Error::InvalidRect {
                    reason: "too many values, expected `x y w h`".to_string(),
                });
            }
            values[count] = value;
            count += 1;
        }
        if count != values.len() {
            return Err(Error::InvalidRect {
                reason: "not enough values, expected `x y w h`".to_string(),
            });
        }
        let [x, y, w, h] = values;
        Self::from_xywh(x, y, w, h)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RectFields {
    x: Scalar,
    y: Scalar,
    w: Scalar,
    h: Scalar,
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rect {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RectFields {
            x: self.x(),
            y: self.y(),
            w: self.width(),
            h: self.height(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rect {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RectFields { x, y, w, h } = RectFields::deserialize(deserializer)?;
        Rect::from_xywh(x, y, w, h).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects() -> Vec<Rect> {
        vec![
            Rect::new((0.0, 0.0), (10.0, 10.0)),
            Rect::new((5.0, -3.0), (7.0, 2.0)),
            Rect::new((-4.0, 12.0), (-4.0, 12.0)),
            Rect::new((20.0, 1.0), (-1.0, 3.0)),
            Rect::new((2.0, 2.0), (3.0, 3.0)),
        ]
    }

    #[test]
    fn test_rect_new() {
        let rect = Rect::new((4.0, 1.0), (1.0, 5.0));
        assert_eq!(rect.x(), 1.0);
        assert_eq!(rect.y(), 1.0);
        assert_eq!(rect.width(), 3.0);
        assert_eq!(rect.height(), 4.0);
        assert_eq!(rect, Rect::from_xywh(1.0, 1.0, 3.0, 4.0).unwrap());

        let point = Rect::new((2.0, 3.0), (2.0, 3.0));
        assert_eq!(point.width(), 0.0);
        assert_eq!(point.height(), 0.0);

        assert!(Rect::from_xywh(0.0, 0.0, 0.0, 0.0).is_ok());
        assert!(matches!(
            Rect::from_xywh(0.0, 0.0, -1.0, 1.0),
            Err(Error::InvalidRect { .. })
        ));
        assert!(matches!(
            Rect::from_xywh(0.0, 0.0, 1.0, Scalar::NAN),
            Err(Error::InvalidRect { .. })
        ));
    }

    #[test]
    fn test_rect_extend() {
        let b0 = Rect::new(Point::new(2.0, 2.0), Point::new(4.0, 4.0));
        let b1 = b0.extend(Point::new(1.0, 3.0));
        assert_eq!(b1.min(), Point::new(1.0, 2.0));
        assert_eq!(b1.max(), b0.max());
        let b2 = b1.extend(Point::new(5.0, 3.0));
        assert_eq!(b2.min(), b1.min());
        assert_eq!(b2.max(), Point::new(5.0, 4.0));
        let b3 = b2.extend(Point::new(3.0, 1.0));
        assert_eq!(b3.min(), Point::new(1.0, 1.0));
        assert_eq!(b3.max(), b2.max());
        let b4 = b3.extend(Point::new(3.0, 5.0));
        assert_eq!(b4.min(), b3.min());
        assert_eq!(b4.max(), Point::new(5.0, 5.0));
        assert_eq!(b4.extend(Point::new(3.0, 3.0)), b4);
    }

    #[test]
    fn test_rect_union() {
        let r0 = Rect::from_xywh(0.0, 0.0, 2.0, 1.0).unwrap();
        let r1 = Rect::from_xywh(3.0, -1.0, 1.0, 1.0).unwrap();
        let r = r0.union(r1);
        assert_eq!(r, Rect::from_xywh(0.0, -1.0, 4.0, 2.0).unwrap());
        assert_eq!(r0.union_opt(None), r0);
        assert_eq!(r0.union_opt(Some(r1)), r);

        let rects = rects();
        for r0 in rects.iter() {
            assert_eq!(r0.union(*r0), *r0);
            for r1 in rects.iter() {
                let r = r0.union(*r1);
                // contains both
                assert!(r.contains_rect(*r0));
                assert!(r.contains_rect(*r1));
                // commutative
                assert_eq!(r, r1.union(*r0));
                // smallest, every edge belongs to one of the inputs
                assert!(r.x() == r0.x() || r.x() == r1.x());
                assert!(r.y() == r0.y() || r.y() == r1.y());
                assert!(r.max().x() == r0.max().x() || r.max().x() == r1.max().x());
                assert!(r.max().y() == r0.max().y() || r.max().y() == r1.max().y());
                for r2 in rects.iter() {
                    // associative
                    assert_eq!(r.union(*r2), r0.union(r1.union(*r2)));
                }
            }
        }
    }

    #[test]
    fn test_rect_parse() -> Result<(), Error> {
        let rect: Rect = "1 2.5,3 4".parse()?;
        assert_eq!(rect, Rect::from_xywh(1.0, 2.5, 3.0, 4.0)?);
        assert_eq!(rect.to_string(), "1 2.5 3 4");
        assert_eq!(rect.to_string().parse::<Rect>()?, rect);
        assert_eq!(format!("{:?}", rect), "Rect x=1, y=2.5, w=3, h=4");

        let rect = Rect::from_xywh(-0.1, 3e-7, 1e20, 12345.678)?;
        assert_eq!(rect.to_string(), "-0.1 0.0000003 100000000000000000000 12345.678");
        assert_eq!(rect.to_string().parse::<Rect>()?, rect);
        assert_eq!(
            format!("{:?}", rect),
            "Rect x=-0.1, y=3.000e-7, w=1.000e20, h=1.235e4"
        );

        assert!("1 2 3".parse::<Rect>().is_err());
        assert!("1 2 3 4 5".parse::<Rect>().is_err());
        assert!("1 2 -3 4".parse::<Rect>().is_err());
        assert!("1 2 x 4".parse::<Rect>().is_err());
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_rect_serde() -> Result<(), Error> {
        let rect = Rect::from_xywh(-1.0, 2.0, 3.0, 4.5)?;
        let json = serde_json::to_string(&rect)?;
        assert_eq!(json, r#"{"x":-1.0,"y":2.0,"w":3.0,"h":4.5}"#);
        assert_eq!(serde_json::from_str::<Rect>(&json)?, rect);
        assert!(serde_json::from_str::<Rect>(r#"{"x":0,"y":0,"w":-1,"h":1}"#).is_err());
        Ok(())
    }
}
