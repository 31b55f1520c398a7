use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the blade geometry pipeline.
#[derive(Debug, Error)]
pub enum ProtobladeError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Io(#[from] IoError),
}

impl ProtobladeError {
    /// Returns `true` if this error reports a missing input file.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(IoError::NotFound { .. }))
    }
}

/// Errors raised when the input geometry cannot produce a valid result.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("new radius has gone below zero: point {index} would move to r = {radius}")]
    NegativeRadius { index: usize, radius: f64 },

    #[error("degenerate midline: {found} bisector vertices survived filtering, at least 2 required")]
    DegenerateMidline { found: usize },

    #[error("voronoi construction failed: {0}")]
    Voronoi(String),

    #[error("point {index} lies on x = 0, polar angle is undefined")]
    PolarSingularity { index: usize },
}

/// Precondition violations on operation inputs.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{operation} requires at least {required} points, got {found}")]
    TooFewPoints {
        operation: &'static str,
        required: usize,
        found: usize,
    },

    #[error("{operation}: length mismatch ({left} vs {right})")]
    LengthMismatch {
        operation: &'static str,
        left: usize,
        right: usize,
    },

    #[error("pressure surface has {pressure} sections but suction surface has {suction}")]
    SectionCountMismatch { pressure: usize, suction: usize },

    #[error("blade count must be positive")]
    InvalidBladeCount,

    #[error("{operation}: abscissae must be non-decreasing")]
    NotMonotonic { operation: &'static str },

    #[error("parameter {parameter} = {value} is out of range")]
    OutOfRange { parameter: &'static str, value: f64 },

    #[error("no {parameter} given and the endwalls do not define one")]
    MissingExtent { parameter: &'static str },
}

/// Errors related to reading and writing point data files.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("point data file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to access {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl IoError {
    /// Wraps an I/O failure on `path`, keeping `NotFound` distinguishable.
    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path, source }
        } else {
            Self::Access { path, source }
        }
    }
}

/// Convenience type alias for results using [`ProtobladeError`].
pub type Result<T> = std::result::Result<T, ProtobladeError>;
