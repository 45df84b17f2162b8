use super::Contour;
use crate::cyclic::insert_term;
use crate::error::{Result, SplineError};
use crate::math::{Neighbourhood, Ratios};
use crate::vertex::Vertex;

impl Contour {
    /// Inserts a knot into segment `j` at parameter `t` without changing the
    /// shape of the curve. See [Contour::insert_knot_with_multiplicity].
    pub fn insert_knot(&mut self, j: usize, t: f64) -> Result<usize> {
        self.insert_knot_with_multiplicity(j, t, 1.0)
    }

    /// Inserts a knot into segment `j` at parameter `t`.
    ///
    /// Segment `j` is split in two, with knot intervals `multiplicity * d * t`
    /// and `multiplicity * d * (1 - t)`, where `d` is the original interval of
    /// vertex `j`. Vertices `j` and `j + 1` move onto the refined control
    /// polygon and one new vertex appears between them, so the contour grows
    /// by one. With a multiplicity of one the curve keeps its exact shape.
    ///
    /// Returns the index of the vertex whose on-curve point is the old
    /// `position(j, t)`. On error the contour is left untouched.
    pub fn insert_knot_with_multiplicity(
        &mut self,
        j: usize,
        t: f64,
        multiplicity: f64,
    ) -> Result<usize> {
        self.check_index(j)?;
        if !(t > 0.0 && t < 1.0) {
            return Err(SplineError::ParameterOutOfRange { t });
        }
        if !(multiplicity.is_finite() && multiplicity > 0.0) {
            return Err(SplineError::InvalidMultiplicity {
                value: multiplicity,
            });
        }

        let n = Neighbourhood::new(&self.vertices, j)?;
        let r = Ratios::new(n.intervals, t);
        let [head, split, tail] = n.legs(&r);
        let d = n.intervals[2];

        // The only fallible step goes first.
        let at = insert_term(
            &mut self.vertices,
            j,
            0,
            Vertex {
                position: head,
                knot_interval: multiplicity * d * t,
            },
        )?;
        let len = self.vertices.len();
        let current = &mut self.vertices[at + 1];
        current.position = split;
        current.knot_interval = multiplicity * d * (1.0 - t);
        self.vertices[(at + 2) % len].position = tail;
        self.touch();

        log::debug!(
            "inserted knot into segment {} at t = {}, contour now has {} vertices",
            j,
            t,
            len
        );
        Ok(at + 1)
    }
}
