//! Utility functions and types used accross the library
use crate::{Error, Scalar};
use std::{cmp::Ordering, fmt};

/// Fixed sized iterator
///
/// This type is similar to a smallvec but it never allocates and just panics
/// if you try to fit more than `N` items into it.
#[derive(Clone, Copy)]
pub struct ArrayIter<T, const N: usize> {
    start: usize,
    end: usize,
    array: [Option<T>; N],
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for ArrayIter<T, N> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list()
            .entries(self.array[self.start..self.end].iter().flatten())
            .finish()
    }
}

impl<T, const N: usize> Default for ArrayIter<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> ArrayIter<T, N> {
    pub fn new() -> Self {
        Self {
            start: 0,
            end: 0,
            array: std::array::from_fn(|_| None),
        }
    }

    /// Push new element to the end of the iterator
    pub fn push(&mut self, item: T) {
        self.array[self.end] = Some(item);
        self.end += 1;
    }

    /// Sort unconsumed elements
    pub fn sort_by(&mut self, mut cmp: impl FnMut(&T, &T) -> Ordering) {
        self.array[self.start..self.end].sort_unstable_by(|a, b| match (a, b) {
            (Some(a), Some(b)) => cmp(a, b),
            _ => Ordering::Equal,
        });
    }

    /// Check if array iterator is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of uncosumed elements
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

impl<T, const N: usize> Extend<T> for ArrayIter<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T, const N: usize> FromIterator<T> for ArrayIter<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T, const N: usize> Iterator for ArrayIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            let item = self.array[self.start].take();
            self.start += 1;
            item
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.len();
        (size, Some(size))
    }
}

impl<T, const N: usize> DoubleEndedIterator for ArrayIter<T, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start < self.end {
            self.end -= 1;
            self.array[self.end].take()
        } else {
            None
        }
    }
}

impl<T, const N: usize> ExactSizeIterator for ArrayIter<T, N> {}

/// Real roots of a quadratic equation in ascending order
pub type QuadRoots = ArrayIter<Scalar, 2>;

/// Solve quadratic equation `a * t ^ 2 + b * t + c = 0` for `t`
///
/// The textbook `(-b +- sqrt(b^2 - 4ac)) / 2a` loses precision when `b^2 >> 4ac`,
/// as one of the roots subtracts two nearly equal values. Instead both roots are
/// derived from `p = -(b + sign(b) * sqrt(b^2 - 4ac)) / 2` as `p / a` and `c / p`.
/// `sign(0)` is taken to be `+1`, so `p` is never zero when the discriminant
/// is positive.
///
/// Discriminant is compared exactly, without any tolerance.
///
/// Degenerate coefficients:
///  - `a == 0` with non-zero `b` is a linear equation, only `c / p` is returned
///    which is equal to `-c / b`.
///  - `a == 0 && b == 0` has no `t` terms at all and results in
///    [`Error::DegenerateQuadratic`].
///
/// Coefficients are first scaled by a power of two so that the largest one is
/// close to `1.0`. Scaling is exact, so it does not change the roots, but it keeps
/// `b^2` and `4ac` from overflowing for large finite coefficients.
///
/// Non-finite roots are never returned.
pub fn quadratic_solve(a: Scalar, b: Scalar, c: Scalar) -> Result<QuadRoots, Error> {
    let mut result = QuadRoots::new();
    let (a0, b0, c0) = (a, b, c);
    let scale = pow2_scale(a.abs().max(b.abs()).max(c.abs()));
    let (a, b, c) = (a * scale, b * scale, c * scale);
    let u = b * b;
    let v = 4.0 * a * c;
    if u > v {
        let sign = if b < 0.0 { -1.0 } else { 1.0 };
        let p = -(b + sign * (u - v).sqrt()) / 2.0;
        let t = c / p;
        if a == 0.0 {
            if t.is_finite() {
                result.push(t);
            }
            return Ok(result);
        }
        let s = p / a;
        let (t0, t1) = if s < t { (s, t) } else { (t, s) };
        result.extend([t0, t1].into_iter().filter(|t| t.is_finite()));
    } else if u == v {
        if a == 0.0 {
            return Err(Error::DegenerateQuadratic {
                a: a0,
                b: b0,
                c: c0,
            });
        }
        let t = -b / (2.0 * a);
        if t.is_finite() {
            result.push(t);
        }
    }
    Ok(result)
}

/// Power of two `s` such that `value * s` is close to `1.0`
///
/// Exponent is clamped to keep `s` itself a normal number, `1.0` is returned
/// for zero and non-finite values.
fn pow2_scale(value: Scalar) -> Scalar {
    if value == 0.0 || !value.is_finite() {
        return 1.0;
    }
    let exp = value.log2().floor().clamp(-1000.0, 1000.0) as i32;
    (2.0 as Scalar).powi(-exp)
}
