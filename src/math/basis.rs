//! Local blending of a knot-interval spline segment.
//!
//! A segment `j` runs from the on-curve point of vertex `j` to that of vertex `j + 1`
//! and is influenced by the four vertices `j - 1 ..= j + 2` and by the five knot
//! intervals `d0..d4` of vertices `j - 2 ..= j + 2`. The pyramid of ratios is
//!
//! ```text
//!            t
//!        dM     dP
//!     cM1   cZ    cP1
//!  zm1    z    zp1    zp2
//! ```

use super::util::{mix, safe_div, weighted_sum};
use super::{Point2d, Vector2d};
use crate::cyclic::{cyclic_index, Cyclic};
use crate::error::Result;
use crate::vertex::Vertex;
use arrayvec::ArrayVec;
use cgmath::prelude::*;

/// The blend ratios of one segment at one parameter value.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ratios {
    pub c_m1: f64,
    pub c_z: f64,
    pub c_p1: f64,
    pub d_m: f64,
    pub d_p: f64,
}

impl Ratios {
    /// Computes the ratio pyramid from the five knot intervals around a segment.
    pub fn new(d: [f64; 5], t: f64) -> Self {
        let [d0, d1, d2, d3, d4] = d;
        Self {
            c_m1: safe_div(d0 + d1, d2, 0.0, t, 1.0),
            c_z: safe_div(d1, d2, d3, t, t),
            c_p1: safe_div(0.0, d2, d3 + d4, t, 0.0),
            d_m: safe_div(d1, d2, 0.0, t, 1.0),
            d_p: safe_div(0.0, d2, d3, t, 0.0),
        }
    }
}

/// The vertices and knot intervals that influence segment `j`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Neighbourhood {
    /// Knot intervals of vertices `j-2 ..= j+2`.
    pub intervals: [f64; 5],
    /// Normalized indices of vertices `j-1 ..= j+2`.
    pub indices: [usize; 4],
    /// Positions of vertices `j-1 ..= j+2`.
    pub points: [Point2d; 4],
}

impl Neighbourhood {
    pub fn new(vertices: &[Vertex], j: usize) -> Result<Self> {
        let mut intervals = [0.0; 5];
        for (slot, offset) in intervals.iter_mut().zip(-2..=2) {
            *slot = vertices.term(j, offset)?.knot_interval;
        }
        let mut indices = [0; 4];
        let mut points = [Point2d::origin(); 4];
        for ((idx, p), offset) in indices.iter_mut().zip(points.iter_mut()).zip(-1..=2) {
            *idx = cyclic_index(vertices.len(), j, offset)?;
            *p = vertices[*idx].position;
        }
        Ok(Self {
            intervals,
            indices,
            points,
        })
    }

    /// The first level of the pyramid: points on the three control legs.
    pub fn legs(&self, r: &Ratios) -> [Point2d; 3] {
        let [zm1, z, zp1, zp2] = self.points;
        [mix(zm1, z, r.c_m1), mix(z, zp1, r.c_z), mix(zp1, zp2, r.c_p1)]
    }
}

/// Sparse blending weights over the vertices of a contour.
///
/// Holds exactly one entry per vertex `j-1 ..= j+2`. On contours with
/// fewer than four vertices several entries share the same index, and
/// they accumulate.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseCoefficients {
    entries: ArrayVec<(usize, f64), 4>,
}

impl SparseCoefficients {
    fn new(indices: [usize; 4], weights: [f64; 4]) -> Self {
        Self {
            entries: indices.into_iter().zip(weights).collect(),
        }
    }

    /// Iterates over the `(vertex index, weight)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Gets the total weight of the given vertex.
    pub fn get(&self, index: usize) -> f64 {
        self.iter().filter(|(i, _)| *i == index).map(|(_, w)| w).sum()
    }

    /// Sums all weights.
    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, w)| w).sum()
    }

    /// Expands into a dense vector of `len` weights.
    pub fn to_dense(&self, len: usize) -> Vec<f64> {
        let mut dense = vec![0.0; len];
        for (i, w) in self.iter() {
            if let Some(slot) = dense.get_mut(i) {
                *slot += w;
            }
        }
        dense
    }

    /// Computes the weighted sum of the vertex positions as a vector.
    pub fn apply(&self, vertices: &[Vertex]) -> Vector2d {
        self.iter()
            .filter_map(|(i, w)| vertices.get(i).map(|v| v.position.to_vec() * w))
            .fold(Vector2d::zero(), |acc, v| acc + v)
    }

    /// Computes the weighted sum of the vertex positions as a point.
    /// Only meaningful for weights that form a partition of unity.
    pub fn apply_point(&self, vertices: &[Vertex]) -> Point2d {
        weighted_sum(
            self.iter()
                .filter_map(|(i, w)| vertices.get(i).map(|v| (v.position, w))),
        )
    }
}

/// Computes the blending weights of segment `j` at parameter `t`.
///
/// The weights always sum to one, including at corners where the
/// guarded ratios fall back to fixed values.
pub fn coefficients(vertices: &[Vertex], j: usize, t: f64) -> Result<SparseCoefficients> {
    let n = Neighbourhood::new(vertices, j)?;
    let Ratios {
        c_m1,
        c_z,
        c_p1,
        d_m,
        d_p,
    } = Ratios::new(n.intervals, t);
    let s = 1.0 - t;
    let weights = [
        s * (1.0 - d_m) * (1.0 - c_m1),
        s * ((1.0 - d_m) * c_m1 + d_m * (1.0 - c_z)) + t * (1.0 - d_p) * (1.0 - c_z),
        s * d_m * c_z + t * ((1.0 - d_p) * c_z + d_p * (1.0 - c_p1)),
        t * d_p * c_p1,
    ];
    Ok(SparseCoefficients::new(n.indices, weights))
}

/// Computes the tangent weights of segment `j` at parameter `t`.
///
/// Same pyramid as [coefficients], but the outermost `1 - t` / `t` blend is
/// replaced by `-1` / `+1`. The result is a direction, not a derivative with
/// respect to `t` or to arc length, and its weights sum to zero.
pub fn tangent_coefficients(vertices: &[Vertex], j: usize, t: f64) -> Result<SparseCoefficients> {
    let n = Neighbourhood::new(vertices, j)?;
    let Ratios {
        c_m1,
        c_z,
        c_p1,
        d_m,
        d_p,
    } = Ratios::new(n.intervals, t);
    let weights = [
        -(1.0 - d_m) * (1.0 - c_m1),
        -((1.0 - d_m) * c_m1 + d_m * (1.0 - c_z)) + (1.0 - d_p) * (1.0 - c_z),
        -d_m * c_z + ((1.0 - d_p) * c_z + d_p * (1.0 - c_p1)),
        d_p * c_p1,
    ];
    Ok(SparseCoefficients::new(n.indices, weights))
}

/// Evaluates the position on segment `j` at parameter `t` by repeated
/// linear interpolation of the neighbouring vertices.
pub fn position(vertices: &[Vertex], j: usize, t: f64) -> Result<Point2d> {
    let n = Neighbourhood::new(vertices, j)?;
    let r = Ratios::new(n.intervals, t);
    let [cm1, cz, cp1] = n.legs(&r);
    Ok(mix(mix(cm1, cz, r.d_m), mix(cz, cp1, r.d_p), t))
}

/// Evaluates the tangent direction of segment `j` at parameter `t`.
/// Equal to applying [tangent_coefficients] to the vertex positions.
pub fn tangent(vertices: &[Vertex], j: usize, t: f64) -> Result<Vector2d> {
    let n = Neighbourhood::new(vertices, j)?;
    let r = Ratios::new(n.intervals, t);
    let [cm1, cz, cp1] = n.legs(&r);
    Ok(mix(cz, cp1, r.d_p) - mix(cm1, cz, r.d_m))
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{Rng, SeedableRng};

    fn random_contour(rng: &mut impl Rng) -> Vec<Vertex> {
        let len = rng.gen_range(1..8);
        (0..len)
            .map(|_| {
                let interval = if rng.gen_bool(0.3) {
                    0.0
                } else {
                    rng.gen_range(0.0..200.0)
                };
                Vertex::new(
                    rng.gen_range(-500.0..500.0),
                    rng.gen_range(-500.0..500.0),
                    interval,
                )
            })
            .collect()
    }

    fn square() -> Vec<Vertex> {
        vec![
            Vertex::new(100.0, 100.0, 100.0),
            Vertex::new(500.0, 100.0, 100.0),
            Vertex::new(500.0, 500.0, 100.0),
            Vertex::new(100.0, 500.0, 100.0),
        ]
    }

    #[test]
    fn partition_of_unity() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        for _ in 0..200 {
            let vertices = random_contour(&mut rng);
            for j in 0..vertices.len() {
                for i in 0..=10 {
                    let t = i as f64 / 10.0;
                    let c = coefficients(&vertices, j, t).unwrap();
                    assert_approx_eq!(c.sum(), 1.0, 1e-9);
                    let dc = tangent_coefficients(&vertices, j, t).unwrap();
                    assert_approx_eq!(dc.sum(), 0.0, 1e-9);
                }
            }
        }
    }

    #[test]
    fn position_matches_coefficients() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        for _ in 0..200 {
            let vertices = random_contour(&mut rng);
            for j in 0..vertices.len() {
                let t = rng.gen_range(0.0..=1.0);
                let p = position(&vertices, j, t).unwrap();
                let q = coefficients(&vertices, j, t).unwrap().apply_point(&vertices);
                assert_approx_eq!(p.x, q.x, 1e-6);
                assert_approx_eq!(p.y, q.y, 1e-6);

                let v = tangent(&vertices, j, t).unwrap();
                let w = tangent_coefficients(&vertices, j, t)
                    .unwrap()
                    .apply(&vertices);
                assert_approx_eq!(v.x, w.x, 1e-6);
                assert_approx_eq!(v.y, w.y, 1e-6);
            }
        }
    }

    #[test]
    fn segments_join_continuously() {
        let vertices = square();
        for j in 0..4 {
            let end = position(&vertices, j, 1.0).unwrap();
            let start = position(&vertices, j + 1, 0.0).unwrap();
            assert_approx_eq!(end.x, start.x);
            assert_approx_eq!(end.y, start.y);
        }
    }

    #[test]
    fn uniform_square_blends_one_four_one() {
        let vertices = square();
        let c = coefficients(&vertices, 0, 0.0).unwrap();
        assert_approx_eq!(c.get(3), 1.0 / 6.0);
        assert_approx_eq!(c.get(0), 4.0 / 6.0);
        assert_approx_eq!(c.get(1), 1.0 / 6.0);
        assert_approx_eq!(c.get(2), 0.0);

        let p = position(&vertices, 0, 0.0).unwrap();
        assert_approx_eq!(p.x, 500.0 / 3.0);
        assert_approx_eq!(p.y, 500.0 / 3.0);
        let p = position(&vertices, 0, 0.5).unwrap();
        assert_approx_eq!(p.x, 300.0);
        assert_approx_eq!(p.y, 350.0 / 3.0);
    }

    #[test]
    fn zero_intervals_give_straight_lines() {
        let vertices = vec![Vertex::new(0.0, 0.0, 0.0), Vertex::new(100.0, 0.0, 0.0)];
        let p = position(&vertices, 0, 0.3).unwrap();
        assert_approx_eq!(p.x, 30.0);
        assert_approx_eq!(p.y, 0.0);
        let p = position(&vertices, 1, 0.3).unwrap();
        assert_approx_eq!(p.x, 70.0);
    }

    #[test]
    fn small_contours_accumulate_shared_indices() {
        let vertices = vec![Vertex::new(0.0, 0.0, 50.0), Vertex::new(100.0, 40.0, 20.0)];
        let c = coefficients(&vertices, 0, 0.4).unwrap();
        let dense = c.to_dense(2);
        assert_approx_eq!(dense[0] + dense[1], 1.0);
        assert_approx_eq!(dense[1], c.get(1));
    }

    #[test]
    fn empty_contour_is_an_error() {
        assert!(position(&[], 0, 0.5).is_err());
        assert!(coefficients(&[], 0, 0.5).is_err());
    }
}
