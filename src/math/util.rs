use super::Point2d;
use cgmath::prelude::*;

/// Linearly interpolates between two points.
/// `r = 0` yields `a`, `r = 1` yields `b`.
#[inline(always)]
pub fn mix(a: Point2d, b: Point2d, r: f64) -> Point2d {
    a + (b - a) * r
}

/// Computes `(a + t * b) / (a + b + c)`, or `fallback` when the
/// weights sum to zero or less.
///
/// Every blend ratio in the kernel goes through here so that
/// degenerate (zero-length) neighbourhoods never produce NaN.
#[inline(always)]
pub fn safe_div(a: f64, b: f64, c: f64, t: f64, fallback: f64) -> f64 {
    let sum = a + b + c;
    if sum <= 0.0 {
        fallback
    } else {
        (a + t * b) / sum
    }
}

/// Computes the weighted sum of a set of points, with weights that sum to one.
pub fn weighted_sum(points: impl IntoIterator<Item = (Point2d, f64)>) -> Point2d {
    let v = points
        .into_iter()
        .fold(cgmath::Vector2::zero(), |acc, (p, w)| acc + p.to_vec() * w);
    Point2d::from_vec(v)
}
