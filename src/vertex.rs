use crate::cyclic::Cyclic;
use crate::error::Result;
use crate::math::Point2d;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The knot interval given to vertices created without one.
pub const DEFAULT_KNOT_INTERVAL: f64 = 100.0;

/// A control vertex of a contour.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// The position of the control vertex.
    pub position: Point2d,
    /// The relative length of the segment leaving this vertex.
    /// Zero breaks tangent continuity on that side.
    pub knot_interval: f64,
}

impl Vertex {
    /// Creates a new vertex.
    pub fn new(x: f64, y: f64, knot_interval: f64) -> Self {
        Self {
            position: Point2d::new(x, y),
            knot_interval,
        }
    }

    /// Creates a new vertex with the default knot interval.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, DEFAULT_KNOT_INTERVAL)
    }

    /// Returns a copy of this vertex with a different knot interval.
    pub fn with_interval(self, knot_interval: f64) -> Self {
        Self {
            position: self.position,
            knot_interval,
        }
    }
}

/// How the curve behaves at the on-curve point of a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// Both adjacent intervals are zero.
    Corner,
    CornerTangentBefore,
    CornerTangentAfter,
    TangentStart,
    TangentEnd,
    /// Both adjacent intervals are positive.
    Smooth,
}

/// Classifies vertex `j + bias` from the knot intervals around it.
///
/// ```text
///  in-2    in    out   out-2
/// *-----*-----#-----*-----*
/// ```
///
/// | in | out | in-2 | out-2 | kind                |
/// |----|-----|------|-------|---------------------|
/// | 0  | 0   |      |       | Corner              |
/// | 0  | >0  |      | 0     | CornerTangentAfter  |
/// | 0  | >0  |      | >0    | TangentEnd          |
/// | >0 | 0   | 0    |       | CornerTangentBefore |
/// | >0 | 0   | >0   |       | TangentStart        |
/// | >0 | >0  |      |       | Smooth              |
pub fn classify(vertices: &[Vertex], j: usize, bias: isize) -> Result<VertexKind> {
    let interval = |offset: isize| -> Result<f64> {
        Ok(vertices.term(j, bias + offset)?.knot_interval)
    };
    let incoming2 = interval(-2)?;
    let incoming = interval(-1)?;
    let outgoing = interval(0)?;
    let outgoing2 = interval(1)?;

    let kind = match (incoming > 0.0, outgoing > 0.0) {
        (false, false) => VertexKind::Corner,
        (false, true) if outgoing2 > 0.0 => VertexKind::TangentEnd,
        (false, true) => VertexKind::CornerTangentAfter,
        (true, false) if incoming2 > 0.0 => VertexKind::TangentStart,
        (true, false) => VertexKind::CornerTangentBefore,
        (true, true) => VertexKind::Smooth,
    };
    Ok(kind)
}
