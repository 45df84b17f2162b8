//! Data derived from a contour, recomputed only when the contour changes.

use crate::contour::Contour;
use crate::error::Result;
use crate::locate::{closest_on_chords, dice, Chord, CurvePick, LocateOptions};
use crate::math::{coefficients, Point2d, SparseCoefficients};

/// Caches the coefficient matrix, on-curve points and diced chords of a contour.
///
/// Entries are keyed by [Contour::version], so a cache handed a contour
/// that has been edited (or a different contour altogether) recomputes.
#[derive(Clone, Debug, Default)]
pub struct ContourCache {
    matrix: Option<(u64, Vec<SparseCoefficients>)>,
    on_knots: Option<(u64, Vec<Point2d>)>,
    chords: Option<(u64, usize, Vec<Chord>)>,
}

impl ContourCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The blending weights of every on-curve point: row `j` holds
    /// the weights of segment `j` at `t = 0`.
    pub fn coefficient_matrix(&mut self, contour: &Contour) -> Result<&[SparseCoefficients]> {
        let version = contour.version();
        if !matches!(self.matrix, Some((v, _)) if v == version) {
            log::trace!("rebuilding coefficient matrix for version {}", version);
            let rows = (0..contour.len())
                .map(|j| coefficients(contour.vertices(), j, 0.0))
                .collect::<Result<Vec<_>>>()?;
            self.matrix = Some((version, rows));
        }
        Ok(self
            .matrix
            .as_ref()
            .map(|(_, rows)| rows.as_slice())
            .unwrap_or_default())
    }

    /// The on-curve point of every vertex.
    pub fn on_knots(&mut self, contour: &Contour) -> Result<&[Point2d]> {
        let version = contour.version();
        if !matches!(self.on_knots, Some((v, _)) if v == version) {
            log::trace!("rebuilding on-curve points for version {}", version);
            let points = (0..contour.len())
                .map(|j| contour.on_knot(j))
                .collect::<Result<Vec<_>>>()?;
            self.on_knots = Some((version, points));
        }
        Ok(self
            .on_knots
            .as_ref()
            .map(|(_, points)| points.as_slice())
            .unwrap_or_default())
    }

    /// The contour diced into `steps` chords per segment.
    pub fn chords(&mut self, contour: &Contour, steps: usize) -> Result<&[Chord]> {
        let version = contour.version();
        if !matches!(self.chords, Some((v, s, _)) if v == version && s == steps) {
            log::trace!(
                "dicing version {} into {} steps per segment",
                version,
                steps
            );
            self.chords = Some((version, steps, dice(contour.vertices(), steps)?));
        }
        Ok(self
            .chords
            .as_ref()
            .map(|(_, _, chords)| chords.as_slice())
            .unwrap_or_default())
    }

    /// Same as [Contour::locate], but reuses the diced chords.
    pub fn locate(
        &mut self,
        contour: &Contour,
        point: Point2d,
        options: &LocateOptions,
    ) -> Option<CurvePick> {
        let chords = self.chords(contour, options.dicing_steps).ok()?;
        closest_on_chords(chords, options.accept_radius, point)
    }

    /// Drops everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
