//! Finding the point on a contour closest to a given point.
//!
//! Each segment is diced into straight chords, and the query point is
//! projected onto every chord. Only perpendicular hits count: a point that
//! lies beyond the end of every chord is not considered to be on the curve.

use crate::error::Result;
use crate::math::{position, Point2d};
use crate::util::Interval;
use crate::vertex::Vertex;
use cgmath::prelude::*;
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default number of chords per segment.
pub const DEFAULT_DICING_STEPS: usize = 32;

/// The default maximum distance between the query point and the curve.
pub const DEFAULT_ACCEPT_RADIUS: f64 = 4.0;

/// Chords with a squared length at or below this are treated as points,
/// and never produce a hit.
pub const ZERO_LENGTH_TOLERANCE: f64 = 1e-4;

/// Tuning of the closest point search.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocateOptions {
    /// The number of chords each segment is diced into.
    pub dicing_steps: usize,
    /// Hits further than this from the query point are ignored.
    pub accept_radius: f64,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            dicing_steps: DEFAULT_DICING_STEPS,
            accept_radius: DEFAULT_ACCEPT_RADIUS,
        }
    }
}

/// A point on a contour, as found by [locate].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePick {
    /// The segment the point is on.
    pub segment: usize,
    /// The parameter of the point within the segment.
    pub t: f64,
    /// The squared distance from the query point.
    pub distance2: f64,
}

/// A straight piece of a diced segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chord {
    /// The segment the chord belongs to.
    pub segment: usize,
    /// The parameter range of the segment covered by the chord.
    pub params: Interval<f64>,
    pub start: Point2d,
    pub end: Point2d,
}

impl Chord {
    /// Projects `point` onto the chord.
    ///
    /// Returns the fraction along the chord of the projected point and the
    /// squared distance to the nearest point of the chord. The fraction is
    /// `-1` for chords of (near) zero length.
    pub fn project(&self, point: Point2d) -> (f64, f64) {
        let dir = self.end - self.start;
        let len2 = dir.magnitude2();
        let frac = if len2 > ZERO_LENGTH_TOLERANCE {
            dir.dot(point - self.start) / len2
        } else {
            -1.0
        };
        let nearest = if frac < 0.0 {
            self.start
        } else if frac > 1.0 {
            self.end
        } else {
            self.start + dir * frac
        };
        (frac, point.distance2(nearest))
    }
}

/// Dices every segment of a contour into `steps` chords of equal parameter length.
pub fn dice(vertices: &[Vertex], steps: usize) -> Result<Vec<Chord>> {
    let mut chords = Vec::with_capacity(vertices.len() * steps);
    if steps == 0 {
        return Ok(chords);
    }
    for segment in 0..vertices.len() {
        let samples = (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                position(vertices, segment, t).map(|p| (t, p))
            })
            .collect::<Result<Vec<_>>>()?;
        chords.extend(
            samples
                .into_iter()
                .tuple_windows()
                .map(|((t0, start), (t1, end))| Chord {
                    segment,
                    params: Interval::new(t0, t1),
                    start,
                    end,
                }),
        );
    }
    Ok(chords)
}

/// Finds the closest perpendicular hit among a set of chords.
///
/// Ties go to the earliest chord.
pub fn closest_on_chords(
    chords: &[Chord],
    accept_radius: f64,
    point: Point2d,
) -> Option<CurvePick> {
    let accept2 = accept_radius * accept_radius;
    let mut best: Option<CurvePick> = None;
    for chord in chords {
        let (frac, distance2) = chord.project(point);
        if !(0.0..=1.0).contains(&frac) || distance2 >= accept2 {
            continue;
        }
        if best.map_or(true, |b| distance2 < b.distance2) {
            best = Some(CurvePick {
                segment: chord.segment,
                t: chord.params.lerp(frac),
                distance2,
            });
        }
    }
    best
}

/// Finds the segment and parameter of the contour point closest to `point`.
///
/// Returns `None` if no part of the curve lies within `accept_radius`, or if
/// the contour is empty.
pub fn locate(
    vertices: &[Vertex],
    dicing_steps: usize,
    accept_radius: f64,
    point: Point2d,
) -> Option<CurvePick> {
    let chords = dice(vertices, dicing_steps).ok()?;
    let pick = closest_on_chords(&chords, accept_radius, point);
    log::trace!("locate {:?} -> {:?}", point, pick);
    pick
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn segment_line() -> Vec<Vertex> {
        vec![Vertex::new(0.0, 0.0, 0.0), Vertex::new(100.0, 0.0, 0.0)]
    }

    #[test]
    fn point_on_the_curve() {
        let pick = locate(&segment_line(), 32, 4.0, Point2d::new(30.0, 0.0)).unwrap();
        assert_eq!(pick.segment, 0);
        assert_approx_eq!(pick.t, 0.3);
        assert_approx_eq!(pick.distance2, 0.0);
    }

    #[test]
    fn point_near_the_curve() {
        let pick = locate(&segment_line(), 32, 10.0, Point2d::new(30.0, 5.0)).unwrap();
        assert_approx_eq!(pick.t, 0.3);
        assert_approx_eq!(pick.distance2, 25.0);

        assert!(locate(&segment_line(), 32, 4.0, Point2d::new(30.0, 5.0)).is_none());
        assert!(locate(&segment_line(), 32, 4.0, Point2d::new(30.0, 50.0)).is_none());
    }

    #[test]
    fn closing_segment_is_searched() {
        // The square's closing segment runs down the left side.
        let vertices = vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(100.0, 0.0, 0.0),
            Vertex::new(100.0, 100.0, 0.0),
            Vertex::new(0.0, 100.0, 0.0),
        ];
        let pick = locate(&vertices, 8, 4.0, Point2d::new(1.0, 25.0)).unwrap();
        assert_eq!(pick.segment, 3);
        assert_approx_eq!(pick.t, 0.75);
        assert_approx_eq!(pick.distance2, 1.0);
    }

    #[test]
    fn hits_lie_on_the_spline() {
        let vertices = vec![
            Vertex::new(100.0, 100.0, 100.0),
            Vertex::new(500.0, 100.0, 100.0),
            Vertex::new(500.0, 500.0, 100.0),
            Vertex::new(100.0, 500.0, 100.0),
        ];
        let target = position(&vertices, 1, 0.4).unwrap();
        let pick = locate(&vertices, 32, 4.0, target).unwrap();
        assert_eq!(pick.segment, 1);
        assert_approx_eq!(pick.t, 0.4, 1e-2);
        assert!(pick.distance2 < 0.5);
    }

    #[test]
    fn degenerate_input() {
        assert!(locate(&[], 32, 4.0, Point2d::new(0.0, 0.0)).is_none());
        assert!(locate(&segment_line(), 0, 4.0, Point2d::new(30.0, 0.0)).is_none());

        let point = [Vertex::new(5.0, 5.0, 0.0)];
        assert!(locate(&point, 32, 4.0, Point2d::new(5.0, 5.0)).is_none());
        assert!(dice(&point, 4).unwrap().iter().all(|c| c.start == c.end));
    }
}
