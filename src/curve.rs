use crate::contour::Contour;
use crate::error::{Result, SplineError};
use crate::locate::{CurvePick, LocateOptions};
use crate::math::Point2d;
use crate::sink::{BezierSink, SvgPathSink};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A curve, made up of any number of independent closed contours.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Curve {
    /// The contours of the curve.
    contours: Vec<Contour>,
}

impl Curve {
    /// Creates an empty curve.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a contour to the curve, returning its index.
    pub fn add_contour(&mut self, contour: Contour) -> usize {
        self.contours.push(contour);
        self.contours.len() - 1
    }

    /// Gets a reference to the contour with the given index.
    pub fn contour(&self, i: usize) -> Result<&Contour> {
        let len = self.contours.len();
        self.contours
            .get(i)
            .ok_or(SplineError::ContourOutOfRange { index: i, len })
    }

    /// Gets a mutable reference to the contour with the given index.
    pub fn contour_mut(&mut self, i: usize) -> Result<&mut Contour> {
        let len = self.contours.len();
        self.contours
            .get_mut(i)
            .ok_or(SplineError::ContourOutOfRange { index: i, len })
    }

    /// Gets an iterator over all the contours.
    pub fn contours(&self) -> impl Iterator<Item = &Contour> {
        self.contours.iter()
    }

    /// Emits contour `i` into `sink`.
    pub fn evaluate(&self, i: usize, sink: &mut impl BezierSink) -> Result<()> {
        self.contour(i)?.evaluate(sink)
    }

    /// Emits every contour into `sink`, one after the other.
    /// Each non-empty contour opens with its own move.
    pub fn evaluate_all(&self, sink: &mut impl BezierSink) -> Result<()> {
        for contour in &self.contours {
            contour.evaluate(sink)?;
        }
        Ok(())
    }

    /// Renders each contour as the `d` attribute of its own SVG path.
    pub fn svg_paths(&self) -> Result<Vec<String>> {
        self.contours
            .iter()
            .map(|contour| {
                let mut sink = SvgPathSink::new();
                contour.evaluate(&mut sink)?;
                Ok(sink.result())
            })
            .collect()
    }

    /// Inserts a knot into segment `j` of contour `i` at parameter `t`.
    /// Returns the index of the new on-curve vertex.
    pub fn insert_knot(&mut self, i: usize, j: usize, t: f64) -> Result<usize> {
        self.contour_mut(i)?.insert_knot(j, t)
    }

    /// Finds the contour point closest to `point` over all contours.
    ///
    /// Returns the contour index and the pick within it. When two contours
    /// are equally close, the first wins.
    pub fn pick(&self, point: Point2d, options: &LocateOptions) -> Option<(usize, CurvePick)> {
        let mut best: Option<(usize, CurvePick)> = None;
        for (i, contour) in self.contours.iter().enumerate() {
            if let Some(pick) = contour.locate(point, options) {
                if best.map_or(true, |(_, b)| pick.distance2 < b.distance2) {
                    best = Some((i, pick));
                }
            }
        }
        best
    }

    /// Picks the closest contour point to `point` and inserts a knot there.
    ///
    /// Returns the contour index and the index of the new on-curve vertex, or
    /// `None` if nothing was close enough. A pick at the very end of a segment
    /// adds nothing, since the curve already has an on-curve vertex there.
    pub fn insert_knot_near(
        &mut self,
        point: Point2d,
        options: &LocateOptions,
    ) -> Result<Option<(usize, usize)>> {
        let Some((i, pick)) = self.pick(point, options) else {
            return Ok(None);
        };
        if pick.t <= 0.0 || pick.t >= 1.0 {
            log::debug!("pick {:?} is on a vertex, nothing to insert", pick);
            return Ok(None);
        }
        let j = self.insert_knot(i, pick.segment, pick.t)?;
        Ok(Some((i, j)))
    }
}

impl FromIterator<Contour> for Curve {
    fn from_iter<I: IntoIterator<Item = Contour>>(iter: I) -> Self {
        Self {
            contours: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sink::PathCommand;
    use crate::vertex::Vertex;
    use assert_approx_eq::assert_approx_eq;

    fn square(x: f64, y: f64, size: f64) -> Contour {
        Contour::from_vertices(vec![
            Vertex::new(x, y, 0.0),
            Vertex::new(x + size, y, 0.0),
            Vertex::new(x + size, y + size, 0.0),
            Vertex::new(x, y + size, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn contour_access() {
        let mut curve = Curve::new();
        assert_eq!(curve.add_contour(square(0.0, 0.0, 10.0)), 0);
        assert_eq!(curve.add_contour(Contour::new()), 1);
        assert_eq!(curve.contours().count(), 2);
        assert_eq!(curve.contour(0).unwrap().len(), 4);
        assert_eq!(
            curve.contour(2).unwrap_err(),
            SplineError::ContourOutOfRange { index: 2, len: 2 }
        );
        assert!(curve.contour_mut(5).is_err());
        assert!(curve.insert_knot(3, 0, 0.5).is_err());
    }

    #[test]
    fn every_contour_is_emitted() {
        let curve: Curve = [square(0.0, 0.0, 10.0), Contour::new(), square(20.0, 0.0, 5.0)]
            .into_iter()
            .collect();
        let mut commands: Vec<PathCommand> = vec![];
        curve.evaluate_all(&mut commands).unwrap();
        let moves = commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
        assert_eq!(commands.len(), 8);

        let paths = curve.svg_paths().unwrap();
        assert_eq!(paths[0], "M 0 0 L 10 0 L 10 10 L 0 10 Z");
        assert_eq!(paths[1], "");
        assert_eq!(paths[2], "M 20 0 L 25 0 L 25 5 L 20 5 Z");
    }

    #[test]
    fn pick_prefers_the_closest_contour() {
        let curve: Curve = [square(0.0, 0.0, 10.0), square(0.0, 12.0, 10.0)]
            .into_iter()
            .collect();
        let options = LocateOptions::default();

        // Between the two squares, but closer to the second.
        let (i, pick) = curve.pick(Point2d::new(5.0, 11.5), &options).unwrap();
        assert_eq!(i, 1);
        assert_eq!(pick.segment, 0);
        assert_approx_eq!(pick.t, 0.5);
        assert_approx_eq!(pick.distance2, 0.25);

        assert!(curve.pick(Point2d::new(50.0, 50.0), &options).is_none());
    }

    #[test]
    fn insert_near_a_point() {
        let mut curve: Curve = [square(0.0, 0.0, 100.0)].into_iter().collect();
        let options = LocateOptions::default();

        let hit = curve
            .insert_knot_near(Point2d::new(100.0, 40.0), &options)
            .unwrap();
        assert_eq!(hit, Some((0, 2)));
        let contour = curve.contour(0).unwrap();
        assert_eq!(contour.len(), 5);
        let p = contour.on_knot(2).unwrap();
        assert_approx_eq!(p.x, 100.0);
        assert_approx_eq!(p.y, 40.0);

        assert_eq!(
            curve
                .insert_knot_near(Point2d::new(300.0, 300.0), &options)
                .unwrap(),
            None
        );
    }
}
