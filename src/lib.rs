pub use cgmath;
pub use cache::ContourCache;
pub use contour::Contour;
pub use curve::Curve;
pub use error::{Result, SplineError};
pub use gadget::{BezierArc, BezierGadget, BezierToken};
pub use locate::{CurvePick, LocateOptions};
pub use sink::{BezierSink, CubicListSink, PathCommand, SvgArcsSink, SvgPathSink};
pub use util::Interval;
pub use vertex::{Vertex, VertexKind};

mod cache;
mod contour;
mod curve;
pub mod cyclic;
mod error;
pub mod gadget;
pub mod locate;
pub mod math;
mod sink;
mod util;
pub mod vertex;
