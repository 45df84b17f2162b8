//! Mathematical structs and functions.

use cgmath::{Point2, Vector2};
pub use basis::{coefficients, position, tangent, tangent_coefficients, SparseCoefficients};
pub(crate) use basis::{Neighbourhood, Ratios};
pub use bezier::{CubicBezier2d, QuadraticBezier2d};
pub use curve::{ParametricCurve2d, SplineSegment};
pub use util::*;

mod basis;
mod bezier;
mod curve;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;
