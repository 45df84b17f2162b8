//! Edits that act on the curve rather than on raw vertices.

use super::Contour;
use crate::cyclic::{cyclic_index, Cyclic};
use crate::error::Result;
use crate::math::Vector2d;
use crate::vertex::{VertexKind, DEFAULT_KNOT_INTERVAL};
use smallvec::SmallVec;

/// Below this magnitude a weight or determinant is treated as zero.
const SOLVE_TOLERANCE: f64 = 1e-6;

/// Keeps a positive interval, or substitutes the default for zero.
fn nonzero_or_default(interval: f64) -> f64 {
    if interval > 0.0 {
        interval
    } else {
        DEFAULT_KNOT_INTERVAL
    }
}

impl Contour {
    /// Makes vertex `j` a hard corner by zeroing the intervals on both sides.
    pub fn make_corner(&mut self, j: usize) -> Result<()> {
        self.set_adjacent_intervals(j, |_| 0.0, |_| 0.0)
    }

    /// Keeps the curve smooth coming into vertex `j` and breaks it going out.
    pub fn make_tangent(&mut self, j: usize) -> Result<()> {
        self.set_adjacent_intervals(j, nonzero_or_default, |_| 0.0)
    }

    /// Makes the curve smooth on both sides of vertex `j`.
    pub fn make_smooth(&mut self, j: usize) -> Result<()> {
        self.set_adjacent_intervals(j, nonzero_or_default, nonzero_or_default)
    }

    fn set_adjacent_intervals(
        &mut self,
        j: usize,
        incoming: impl Fn(f64) -> f64,
        outgoing: impl Fn(f64) -> f64,
    ) -> Result<()> {
        self.check_index(j)?;
        let prev = cyclic_index(self.len(), j, -1)?;
        let d = incoming(self.vertices[prev].knot_interval);
        self.vertices[prev].knot_interval = d;
        let d = outgoing(self.vertices[j].knot_interval);
        self.vertices[j].knot_interval = d;
        self.touch();
        log::debug!("vertex {} is now {:?}", j, self.classify(j, 0));
        Ok(())
    }

    /// Moves the on-curve point of vertex `j` by `delta`.
    ///
    /// Corners and tangent ends move the vertices that define them rigidly;
    /// otherwise only vertex `j` moves, scaled by its own blending weight.
    pub fn translate_on_knot(&mut self, j: usize, delta: Vector2d) -> Result<()> {
        self.check_index(j)?;
        let len = self.len();
        let at = |offset: isize| cyclic_index(len, j, offset);

        let mut moved: SmallVec<[(usize, Vector2d); 3]> = SmallVec::new();
        match self.classify(j, 0)? {
            VertexKind::Corner => {
                moved.push((j, delta));
                for side in [-1, 1] {
                    if self.is_corner_partner(j, side)? {
                        moved.push((at(side)?, delta));
                    }
                }
            }
            VertexKind::TangentStart => {
                moved.push((j, delta));
                moved.push((at(1)?, delta));
            }
            VertexKind::TangentEnd => {
                moved.push((at(-1)?, delta));
                moved.push((j, delta));
            }
            _ => {
                let weight = self.coefficients(j, 0.0)?.get(j);
                if weight.abs() > SOLVE_TOLERANCE {
                    moved.push((j, delta / weight));
                }
            }
        }

        moved.sort_by_key(|(idx, _)| *idx);
        moved.dedup_by_key(|(idx, _)| *idx);
        if moved.is_empty() {
            return Ok(());
        }
        for (idx, offset) in moved {
            self.vertices[idx].position += offset;
        }
        self.touch();
        Ok(())
    }

    /// Whether vertex `j + side` (with `side` either -1 or 1) carries a
    /// straight tangent that runs into the corner at `j`: its interval facing
    /// away from the corner is positive, while both intervals between the
    /// corner and the far side of the neighbour are zero.
    fn is_corner_partner(&self, j: usize, side: isize) -> Result<bool> {
        let interval = |offset: isize| -> Result<f64> {
            Ok(self.vertices.term(j, offset)?.knot_interval)
        };
        let far = if side < 0 { -2 } else { 1 };
        Ok(interval(far)? > 0.0 && interval(-1)? <= 0.0 && interval(0)? <= 0.0)
    }

    /// Moves vertices `j` and `j + 1` together so that the midpoint of
    /// segment `j` moves by `delta`.
    pub fn translate_arc_midpoint(&mut self, j: usize, delta: Vector2d) -> Result<()> {
        self.check_index(j)?;
        let next = cyclic_index(self.len(), j, 1)?;
        let c = self.coefficients(j, 0.5)?;
        let total = c.get(j) + c.get(next);
        if next == j || total.abs() <= SOLVE_TOLERANCE {
            return Ok(());
        }
        self.vertices[j].position += delta / total;
        self.vertices[next].position += delta / total;
        self.touch();
        Ok(())
    }

    /// Moves vertices `j` and `j + 1` so that the tangent at the midpoint
    /// of segment `j` changes by `delta` while the midpoint stays put.
    pub fn translate_arc_tangent(&mut self, j: usize, delta: Vector2d) -> Result<()> {
        self.check_index(j)?;
        let next = cyclic_index(self.len(), j, 1)?;
        if next == j {
            return Ok(());
        }
        let dc = self.tangent_coefficients(j, 0.5)?;
        let zc = self.coefficients(j, 0.5)?;
        let (dc_j, dc_next) = (dc.get(j), dc.get(next));
        let (zc_j, zc_next) = (zc.get(j), zc.get(next));

        let det = dc_j * zc_next - dc_next * zc_j;
        if det.abs() <= SOLVE_TOLERANCE {
            return Ok(());
        }
        self.vertices[j].position += delta * (zc_next / det);
        self.vertices[next].position += delta * (-zc_j / det);
        self.touch();
        Ok(())
    }
}
