use crate::error::{Result, SplineError};
use crate::gadget::{self, BezierArc, BezierGadget};
use crate::locate::{locate, CurvePick, LocateOptions};
use crate::math::{self, Point2d, SparseCoefficients, SplineSegment, Vector2d};
use crate::sink::BezierSink;
use crate::vertex::{self, Vertex, VertexKind};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

mod editing;
mod insertion;

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Returns a version stamp that has never been handed out before.
fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

/// A closed curve, defined by a cyclic sequence of vertices.
///
/// Segment `j` joins the on-curve points of vertices `j` and `j + 1`;
/// the last segment wraps back to vertex 0. Evaluation accepts any
/// segment index and wraps it, while mutations require an existing vertex.
///
/// Every mutation stamps the contour with a fresh version, so data derived
/// from it can be cached against [Contour::version].
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<Vertex>", into = "Vec<Vertex>")
)]
pub struct Contour {
    /// The control vertices, in curve order.
    vertices: Vec<Vertex>,
    /// The version stamp of the current vertex set.
    version: u64,
}

/// Ensures a knot interval is finite and non-negative.
fn check_knot_interval(knot_interval: f64) -> Result<()> {
    if knot_interval.is_finite() && knot_interval >= 0.0 {
        Ok(())
    } else {
        Err(SplineError::InvalidKnotInterval {
            value: knot_interval,
        })
    }
}

impl Contour {
    /// Creates an empty contour.
    pub fn new() -> Self {
        Self {
            vertices: vec![],
            version: next_version(),
        }
    }

    /// Creates a contour from a list of vertices.
    /// Fails if any knot interval is negative or not finite.
    pub fn from_vertices(vertices: Vec<Vertex>) -> Result<Self> {
        for vertex in &vertices {
            check_knot_interval(vertex.knot_interval)?;
        }
        Ok(Self {
            vertices,
            version: next_version(),
        })
    }

    /// The number of vertices, which is also the number of segments.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertices, in curve order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Gets the vertex with the given index.
    pub fn vertex(&self, j: usize) -> Result<&Vertex> {
        self.check_index(j)?;
        Ok(&self.vertices[j])
    }

    /// The version stamp of the current vertex set.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Appends a vertex to the end of the contour.
    pub fn push(&mut self, vertex: Vertex) -> Result<()> {
        check_knot_interval(vertex.knot_interval)?;
        self.vertices.push(vertex);
        self.touch();
        Ok(())
    }

    /// Moves vertex `j` to a new position.
    pub fn set_position(&mut self, j: usize, position: Point2d) -> Result<()> {
        self.check_index(j)?;
        self.vertices[j].position = position;
        self.touch();
        Ok(())
    }

    /// Moves vertex `j` by the given offset.
    pub fn translate_vertex(&mut self, j: usize, delta: Vector2d) -> Result<()> {
        self.check_index(j)?;
        self.vertices[j].position += delta;
        self.touch();
        Ok(())
    }

    /// Sets the knot interval of vertex `j`, i.e. of the segment leaving it.
    pub fn set_knot_interval(&mut self, j: usize, knot_interval: f64) -> Result<()> {
        self.check_index(j)?;
        check_knot_interval(knot_interval)?;
        self.vertices[j].knot_interval = knot_interval;
        self.touch();
        Ok(())
    }

    /// Evaluates the position on segment `j` at parameter `t`.
    pub fn position(&self, j: usize, t: f64) -> Result<Point2d> {
        math::position(&self.vertices, j, t)
    }

    /// Evaluates the unnormalized tangent direction on segment `j` at parameter `t`.
    pub fn tangent(&self, j: usize, t: f64) -> Result<Vector2d> {
        math::tangent(&self.vertices, j, t)
    }

    /// The blending weights of segment `j` at parameter `t`.
    pub fn coefficients(&self, j: usize, t: f64) -> Result<SparseCoefficients> {
        math::coefficients(&self.vertices, j, t)
    }

    /// The tangent weights of segment `j` at parameter `t`.
    pub fn tangent_coefficients(&self, j: usize, t: f64) -> Result<SparseCoefficients> {
        math::tangent_coefficients(&self.vertices, j, t)
    }

    /// Classifies vertex `j + bias`.
    pub fn classify(&self, j: usize, bias: isize) -> Result<VertexKind> {
        vertex::classify(&self.vertices, j, bias)
    }

    /// The on-curve point of vertex `j`.
    pub fn on_knot(&self, j: usize) -> Result<Point2d> {
        Ok(self.gadget(j)?.on_knot)
    }

    /// The Bezier control points around vertex `j`.
    pub fn gadget(&self, j: usize) -> Result<BezierGadget> {
        BezierGadget::new(&self.vertices, j)
    }

    /// The Bezier form of segment `j`.
    pub fn arc(&self, j: usize) -> Result<BezierArc> {
        BezierArc::new(&self.vertices, j)
    }

    /// A view of segment `j` as a parametric curve.
    pub fn segment(&self, j: usize) -> Option<SplineSegment<'_>> {
        SplineSegment::new(&self.vertices, j)
    }

    /// Emits the whole contour as path instructions.
    pub fn evaluate(&self, sink: &mut impl BezierSink) -> Result<()> {
        gadget::evaluate(&self.vertices, sink)
    }

    /// Finds the segment and parameter closest to `point`.
    pub fn locate(&self, point: Point2d, options: &LocateOptions) -> Option<CurvePick> {
        locate(
            &self.vertices,
            options.dicing_steps,
            options.accept_radius,
            point,
        )
    }

    /// Ensures `j` names an existing vertex.
    fn check_index(&self, j: usize) -> Result<()> {
        match self.vertices.len() {
            0 => Err(SplineError::EmptyContour),
            len if j >= len => Err(SplineError::IndexOutOfRange { index: j, len }),
            _ => Ok(()),
        }
    }

    /// Marks the vertex set as changed.
    fn touch(&mut self) {
        self.version = next_version();
    }
}

impl Default for Contour {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Vertex>> for Contour {
    type Error = SplineError;

    fn try_from(vertices: Vec<Vertex>) -> Result<Self> {
        Self::from_vertices(vertices)
    }
}

impl From<Contour> for Vec<Vertex> {
    fn from(contour: Contour) -> Self {
        contour.vertices
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    pub(super) fn square() -> Contour {
        Contour::from_vertices(vec![
            Vertex::at(100.0, 100.0),
            Vertex::at(500.0, 100.0),
            Vertex::at(500.0, 500.0),
            Vertex::at(100.0, 500.0),
        ])
        .unwrap()
    }

    #[test]
    fn mutations_bump_the_version() {
        let mut contour = square();
        let v0 = contour.version();
        contour
            .set_position(0, Point2d::new(120.0, 100.0))
            .unwrap();
        let v1 = contour.version();
        assert_ne!(v0, v1);
        contour.set_knot_interval(1, 50.0).unwrap();
        assert_ne!(v1, contour.version());

        let clone = contour.clone();
        assert_eq!(clone.version(), contour.version());
    }

    #[test]
    fn failed_mutations_leave_the_version_alone() {
        let mut contour = square();
        let v0 = contour.version();
        assert_eq!(
            contour.set_knot_interval(4, 1.0),
            Err(SplineError::IndexOutOfRange { index: 4, len: 4 })
        );
        assert!(contour.set_knot_interval(0, -1.0).is_err());
        assert!(contour.set_knot_interval(0, f64::NAN).is_err());
        assert_eq!(contour.version(), v0);
    }

    #[test]
    fn invalid_knot_intervals_are_rejected() {
        let nan = Contour::from_vertices(vec![
            Vertex::new(0.0, 0.0, f64::NAN),
            Vertex::new(10.0, 0.0, 1.0),
        ]);
        assert!(matches!(nan, Err(SplineError::InvalidKnotInterval { .. })));
        assert_eq!(
            Contour::from_vertices(vec![
                Vertex::new(0.0, 0.0, 1.0),
                Vertex::new(10.0, 10.0, -1.0),
            ])
            .unwrap_err(),
            SplineError::InvalidKnotInterval { value: -1.0 }
        );
        assert!(Contour::try_from(vec![Vertex::new(0.0, 0.0, f64::INFINITY)]).is_err());

        let mut contour = square();
        let v0 = contour.version();
        assert!(contour.push(Vertex::new(0.0, 0.0, -5.0)).is_err());
        assert_eq!(contour.len(), 4);
        assert_eq!(contour.version(), v0);
        contour.push(Vertex::new(0.0, 300.0, 0.0)).unwrap();
        assert_eq!(contour.len(), 5);
        assert_ne!(contour.version(), v0);

        let p = contour.position(4, 0.5).unwrap();
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn empty_contour_rejects_vertex_operations() {
        let mut contour = Contour::new();
        assert_eq!(contour.vertex(0), Err(SplineError::EmptyContour));
        assert_eq!(contour.position(0, 0.5), Err(SplineError::EmptyContour));
        assert_eq!(contour.classify(0, 0), Err(SplineError::EmptyContour));
        assert_eq!(
            contour.translate_vertex(0, Vector2d::new(1.0, 0.0)),
            Err(SplineError::EmptyContour)
        );
        let mut commands: Vec<crate::sink::PathCommand> = vec![];
        assert!(contour.evaluate(&mut commands).is_ok());
        assert!(commands.is_empty());
    }

    #[test]
    fn on_knot_matches_segment_start() {
        let contour = square();
        for j in 0..4 {
            let a = contour.on_knot(j).unwrap();
            let b = contour.position(j, 0.0).unwrap();
            assert_approx_eq!(a.x, b.x);
            assert_approx_eq!(a.y, b.y);
        }
    }
}
