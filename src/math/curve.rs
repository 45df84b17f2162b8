use super::basis;
use super::{Point2d, Vector2d};
use crate::util::Interval;
use crate::vertex::Vertex;

/// A parametric curve in 2D space.
pub trait ParametricCurve2d {
    /// Samples the parametric curve.
    fn sample(&self, t: f64) -> Point2d;

    /// Returns the minimum and maximum t-values that define the bounds of the curve.
    fn bounds(&self) -> Interval<f64>;

    /// Samples the derivative of the parametric curve.
    ///
    /// The default implementation approximates the derivative by sampling
    /// two very nearby points along the curve.
    fn sample_dt(&self, t: f64) -> Vector2d {
        let delta = self.bounds().length() * 0.0001;
        let p1 = self.sample(t);
        let p2 = self.sample(t + delta);
        (p2 - p1) / delta
    }
}

/// A single segment of a knot-interval spline, borrowed from its vertices.
///
/// Segment `j` runs over `t` in `[0, 1]`, from the on-curve point of vertex `j`
/// to that of vertex `j + 1`.
#[derive(Clone, Copy)]
pub struct SplineSegment<'a> {
    vertices: &'a [Vertex],
    index: usize,
}

impl<'a> SplineSegment<'a> {
    /// Creates a segment view. Returns `None` if there are no vertices.
    pub fn new(vertices: &'a [Vertex], index: usize) -> Option<Self> {
        if vertices.is_empty() {
            return None;
        }
        Some(Self {
            vertices,
            index: index % vertices.len(),
        })
    }

    /// The index of the vertex the segment starts at.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The unnormalized tangent direction at `t`.
    pub fn tangent(&self, t: f64) -> Vector2d {
        // The view is never empty, so evaluation cannot fail.
        basis::tangent(self.vertices, self.index, t).unwrap_or_else(|_| Vector2d::new(0.0, 0.0))
    }
}

impl ParametricCurve2d for SplineSegment<'_> {
    fn sample(&self, t: f64) -> Point2d {
        basis::position(self.vertices, self.index, t)
            .unwrap_or_else(|_| self.vertices[self.index].position)
    }

    fn bounds(&self) -> Interval<f64> {
        Interval::new(0.0, 1.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use cgmath::InnerSpace;

    #[test]
    fn segment_derivative_follows_tangent_direction() {
        let vertices = [
            Vertex::new(0.0, 0.0, 30.0),
            Vertex::new(200.0, 20.0, 80.0),
            Vertex::new(150.0, 180.0, 10.0),
            Vertex::new(-20.0, 90.0, 50.0),
        ];
        let segment = SplineSegment::new(&vertices, 1).unwrap();
        for i in 1..10 {
            let t = i as f64 / 10.0;
            let a = segment.sample_dt(t).normalize();
            let b = segment.tangent(t).normalize();
            assert_approx_eq!(a.dot(b), 1.0, 1e-3);
        }
    }

    #[test]
    fn empty_vertices_have_no_segments() {
        assert!(SplineSegment::new(&[], 0).is_none());
    }
}
