/// Errors raised by operations on contours and curves.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplineError {
    #[error("contour has no vertices")]
    EmptyContour,

    #[error("vertex index {index} is out of range for a contour of {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("contour index {index} is out of range for a curve of {len} contours")]
    ContourOutOfRange { index: usize, len: usize },

    #[error("parameter {t} must lie strictly inside (0, 1)")]
    ParameterOutOfRange { t: f64 },

    #[error("knot interval {value} must be finite and non-negative")]
    InvalidKnotInterval { value: f64 },

    #[error("knot multiplicity {value} must be finite and positive")]
    InvalidMultiplicity { value: f64 },
}

pub type Result<T> = std::result::Result<T, SplineError>;
