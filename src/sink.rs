//! Destinations for the path instructions emitted by the Bezier converter.

use crate::math::{CubicBezier2d, Point2d, QuadraticBezier2d};

/// Receives a stream of path instructions.
pub trait BezierSink {
    /// Starts a new path at `to`.
    fn move_to(&mut self, to: Point2d);

    /// A straight line to `to`.
    fn line_to(&mut self, to: Point2d);

    /// A quadratic arc with one control point.
    fn quad_to(&mut self, control: Point2d, to: Point2d);

    /// A cubic arc with two control points.
    fn curve_to(&mut self, control1: Point2d, control2: Point2d, to: Point2d);
}

impl<S: BezierSink + ?Sized> BezierSink for &mut S {
    fn move_to(&mut self, to: Point2d) {
        (**self).move_to(to)
    }

    fn line_to(&mut self, to: Point2d) {
        (**self).line_to(to)
    }

    fn quad_to(&mut self, control: Point2d, to: Point2d) {
        (**self).quad_to(control, to)
    }

    fn curve_to(&mut self, control1: Point2d, control2: Point2d, to: Point2d) {
        (**self).curve_to(control1, control2, to)
    }
}

/// A single path instruction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point2d),
    LineTo(Point2d),
    QuadTo(Point2d, Point2d),
    CurveTo(Point2d, Point2d, Point2d),
}

impl BezierSink for Vec<PathCommand> {
    fn move_to(&mut self, to: Point2d) {
        self.push(PathCommand::MoveTo(to));
    }

    fn line_to(&mut self, to: Point2d) {
        self.push(PathCommand::LineTo(to));
    }

    fn quad_to(&mut self, control: Point2d, to: Point2d) {
        self.push(PathCommand::QuadTo(control, to));
    }

    fn curve_to(&mut self, control1: Point2d, control2: Point2d, to: Point2d) {
        self.push(PathCommand::CurveTo(control1, control2, to));
    }
}

/// Builds the `d` attribute of a closed SVG path.
///
/// Instructions are written as `M x y`, `L x y`, `Q cx cy x y` and
/// `C c1x c1y c2x c2y x y`, separated by spaces and closed by a
/// trailing `Z`. A sink that received nothing yields an empty string.
#[derive(Clone, Debug, Default)]
pub struct SvgPathSink {
    d: String,
}

impl SvgPathSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the path data.
    pub fn result(&self) -> String {
        if self.d.is_empty() {
            String::new()
        } else {
            format!("{}Z", self.d)
        }
    }
}

impl BezierSink for SvgPathSink {
    fn move_to(&mut self, to: Point2d) {
        self.d += &format!("M {} {} ", to.x, to.y);
    }

    fn line_to(&mut self, to: Point2d) {
        self.d += &format!("L {} {} ", to.x, to.y);
    }

    fn quad_to(&mut self, c: Point2d, to: Point2d) {
        self.d += &format!("Q {} {} {} {} ", c.x, c.y, to.x, to.y);
    }

    fn curve_to(&mut self, c1: Point2d, c2: Point2d, to: Point2d) {
        self.d += &format!(
            "C {} {} {} {} {} {} ",
            c1.x, c1.y, c2.x, c2.y, to.x, to.y
        );
    }
}

/// Collects every emitted segment as its own open SVG path,
/// e.g. so that each arc can be styled or hit-tested on its own.
#[derive(Clone, Debug)]
pub struct SvgArcsSink {
    last: Point2d,
    arcs: Vec<String>,
}

impl SvgArcsSink {
    pub fn new() -> Self {
        Self {
            last: Point2d::new(0.0, 0.0),
            arcs: vec![],
        }
    }

    /// Returns one path string per segment, in emission order.
    pub fn arcs(&self) -> &[String] {
        &self.arcs
    }

    pub fn into_arcs(self) -> Vec<String> {
        self.arcs
    }
}

impl Default for SvgArcsSink {
    fn default() -> Self {
        Self::new()
    }
}

impl BezierSink for SvgArcsSink {
    fn move_to(&mut self, to: Point2d) {
        self.last = to;
    }

    fn line_to(&mut self, to: Point2d) {
        let from = self.last;
        self.arcs
            .push(format!("M {} {} L {} {}", from.x, from.y, to.x, to.y));
        self.last = to;
    }

    fn quad_to(&mut self, c: Point2d, to: Point2d) {
        let from = self.last;
        self.arcs.push(format!(
            "M {} {} Q {} {} {} {}",
            from.x, from.y, c.x, c.y, to.x, to.y
        ));
        self.last = to;
    }

    fn curve_to(&mut self, c1: Point2d, c2: Point2d, to: Point2d) {
        let from = self.last;
        self.arcs.push(format!(
            "M {} {} C {} {} {} {} {} {}",
            from.x, from.y, c1.x, c1.y, c2.x, c2.y, to.x, to.y
        ));
        self.last = to;
    }
}

/// Collects every emitted segment as a cubic bezier curve.
/// Lines and quadratic arcs are elevated to their exact cubic equivalents.
#[derive(Clone, Debug)]
pub struct CubicListSink {
    last: Point2d,
    cubics: Vec<CubicBezier2d>,
}

impl CubicListSink {
    pub fn new() -> Self {
        Self {
            last: Point2d::new(0.0, 0.0),
            cubics: vec![],
        }
    }

    pub fn cubics(&self) -> &[CubicBezier2d] {
        &self.cubics
    }

    pub fn into_cubics(self) -> Vec<CubicBezier2d> {
        self.cubics
    }
}

impl Default for CubicListSink {
    fn default() -> Self {
        Self::new()
    }
}

impl BezierSink for CubicListSink {
    fn move_to(&mut self, to: Point2d) {
        self.last = to;
    }

    fn line_to(&mut self, to: Point2d) {
        self.cubics.push(CubicBezier2d::line(self.last, to));
        self.last = to;
    }

    fn quad_to(&mut self, control: Point2d, to: Point2d) {
        let quad = QuadraticBezier2d::new(&[self.last, control, to]);
        self.cubics.push(quad.elevate());
        self.last = to;
    }

    fn curve_to(&mut self, control1: Point2d, control2: Point2d, to: Point2d) {
        self.cubics
            .push(CubicBezier2d::new(&[self.last, control1, control2, to]));
        self.last = to;
    }
}
