//! Conversion of a knot-interval spline into Bezier path instructions.
//!
//! Every vertex contributes an on-curve point and up to two off-curve
//! points around it (its "gadget"). Concatenating the gadgets of all
//! vertices gives a cyclic token stream `... D Z C D Z C ...` which is
//! consumed into line and cubic instructions.

use crate::cyclic::Cyclic;
use crate::error::Result;
use crate::math::{mix, safe_div, CubicBezier2d, Point2d};
use crate::sink::BezierSink;
use crate::util::rotated_range;
use crate::vertex::Vertex;
use smallvec::SmallVec;

/// A tagged control point of the Bezier representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BezierToken {
    /// An on-curve point (`Z`).
    OnCurve(Point2d),
    /// The control point before an on-curve point (`D`).
    PreOff(Point2d),
    /// The control point after an on-curve point (`C`).
    PostOff(Point2d),
    /// The single control point of a quadratic arc (`Q`).
    QuadControl(Point2d),
}

impl BezierToken {
    pub fn point(&self) -> Point2d {
        match *self {
            Self::OnCurve(p) | Self::PreOff(p) | Self::PostOff(p) | Self::QuadControl(p) => p,
        }
    }
}

/// The Bezier control points contributed by one vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierGadget {
    /// Present only if the incoming knot interval is nonzero.
    pub pre_off: Option<Point2d>,
    pub on_knot: Point2d,
    /// Present only if the outgoing knot interval is nonzero.
    pub post_off: Option<Point2d>,
}

impl BezierGadget {
    /// Computes the gadget of vertex `j`.
    pub fn new(vertices: &[Vertex], j: usize) -> Result<Self> {
        let dm2 = vertices.term(j, -2)?.knot_interval;
        let dm1 = vertices.term(j, -1)?.knot_interval;
        let dp1 = vertices.term(j, 0)?.knot_interval;
        let dp2 = vertices.term(j, 1)?.knot_interval;

        let z = vertices.term(j, 0)?.position;
        let zm1 = vertices.term(j, -1)?.position;
        let zp1 = vertices.term(j, 1)?.position;

        let before = mix(z, zm1, safe_div(dp1, dm2 + dm1, 0.0, 0.0, 0.0));
        let after = mix(z, zp1, safe_div(dm1, dp1 + dp2, 0.0, 0.0, 0.0));

        let on_knot = if dm1 + dp1 > 0.0 {
            mix(before, after, safe_div(dm1, dp1, 0.0, 0.0, 0.0))
        } else {
            // Hard corner
            z
        };

        Ok(Self {
            pre_off: (dm1 > 0.0).then_some(before),
            on_knot,
            post_off: (dp1 > 0.0).then_some(after),
        })
    }

    /// The tokens of this gadget, in stream order.
    pub fn tokens(&self) -> SmallVec<[BezierToken; 3]> {
        let mut tokens = SmallVec::new();
        if let Some(p) = self.pre_off {
            tokens.push(BezierToken::PreOff(p));
        }
        tokens.push(BezierToken::OnCurve(self.on_knot));
        if let Some(p) = self.post_off {
            tokens.push(BezierToken::PostOff(p));
        }
        tokens
    }
}

/// The Bezier form of a single segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BezierArc {
    Line(Point2d, Point2d),
    Cubic(Point2d, Point2d, Point2d, Point2d),
}

impl BezierArc {
    /// Computes the arc of segment `j`, from vertex `j` to vertex `j + 1`.
    pub fn new(vertices: &[Vertex], j: usize) -> Result<Self> {
        let before = BezierGadget::new(vertices, j)?;
        let after = BezierGadget::new(vertices, j + 1)?;
        let arc = match (before.post_off, after.pre_off) {
            (Some(c1), Some(c2)) => Self::Cubic(before.on_knot, c1, c2, after.on_knot),
            _ => Self::Line(before.on_knot, after.on_knot),
        };
        Ok(arc)
    }

    pub fn start(&self) -> Point2d {
        match *self {
            Self::Line(p, _) | Self::Cubic(p, _, _, _) => p,
        }
    }

    pub fn end(&self) -> Point2d {
        match *self {
            Self::Line(_, p) | Self::Cubic(_, _, _, p) => p,
        }
    }

    /// Converts to a cubic bezier curve; lines get evenly spaced control points.
    pub fn to_cubic(&self) -> CubicBezier2d {
        match *self {
            Self::Line(a, b) => CubicBezier2d::line(a, b),
            Self::Cubic(a, b, c, d) => CubicBezier2d::new(&[a, b, c, d]),
        }
    }
}

/// Builds the token stream of a whole contour.
pub fn bezier_tokens(vertices: &[Vertex]) -> Result<Vec<BezierToken>> {
    let mut tokens = Vec::with_capacity(3 * vertices.len());
    for j in 0..vertices.len() {
        tokens.extend(BezierGadget::new(vertices, j)?.tokens());
    }
    Ok(tokens)
}

/// Emits the closed contour described by `vertices` into `sink`.
///
/// An empty contour emits nothing; a single vertex emits only a move.
pub fn evaluate(vertices: &[Vertex], sink: &mut impl BezierSink) -> Result<()> {
    match vertices {
        [] => Ok(()),
        [_] => {
            let gadget = BezierGadget::new(vertices, 0)?;
            sink.move_to(gadget.on_knot);
            Ok(())
        }
        _ => {
            let tokens = bezier_tokens(vertices)?;
            log::trace!(
                "emitting {} vertices as {} bezier tokens",
                vertices.len(),
                tokens.len()
            );
            emit_tokens(&tokens, sink);
            Ok(())
        }
    }
}

/// Consumes a cyclic token stream into path instructions.
///
/// The stream is rotated to open on an on-curve point, after which
/// `C D Z` becomes a cubic, `Q Z` a quadratic, and any other token a line.
/// Lookahead wraps around, so the last arc closes back onto the first point.
pub fn emit_tokens(tokens: &[BezierToken], sink: &mut impl BezierSink) {
    use BezierToken::*;

    let Some(start) = tokens.iter().position(|t| matches!(t, OnCurve(_))) else {
        return;
    };
    let tokens: Vec<BezierToken> = rotated_range(tokens.len(), start)
        .map(|i| tokens[i])
        .collect();
    let n = tokens.len();

    sink.move_to(tokens[0].point());
    let mut j = 1;
    while j < n {
        let ahead = (tokens[j], tokens[(j + 1) % n], tokens[(j + 2) % n]);
        match ahead {
            (PostOff(c1), PreOff(c2), OnCurve(to)) => {
                sink.curve_to(c1, c2, to);
                j += 3;
            }
            (QuadControl(c), OnCurve(to), _) => {
                sink.quad_to(c, to);
                j += 2;
            }
            (token, _, _) => {
                sink.line_to(token.point());
                j += 1;
            }
        }
    }
}
