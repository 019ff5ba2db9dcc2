//! Error types for survey geometry operations

use thiserror::Error;

/// Main error type for geometry operations
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Degenerate grid: {0}")]
    DegenerateGrid(String),

    #[error("Missing header samples: {0}")]
    MissingSamples(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Ambiguous axis direction: {0}")]
    AmbiguousAxisDirection(String),

    #[error("Negative step: {0}")]
    NegativeStep(String),

    #[error("Unknown axis name: {0}")]
    UnknownAxisName(String),

    #[error("Unknown coordinate system: {0}")]
    UnknownCoordinateSystem(String),

    #[error("Unknown interpolation method: {0}")]
    UnknownInterpolation(String),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Invalid axis: {0}")]
    InvalidAxis(String),

    #[error("Unsupported coordinate scale factor: {0}")]
    UnsupportedScaleFactor(i16),

    #[error("Grid mismatch: {0}")]
    GridMismatch(String),

    #[error("No shared lines: {0}")]
    NoSharedLines(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Fieldless discriminant of [`GeometryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DegenerateGrid,
    MissingSamples,
    OutOfRange,
    AmbiguousAxisDirection,
    NegativeStep,
    UnknownAxisName,
    UnknownCoordinateSystem,
    UnknownInterpolation,
    InvalidDimensions,
    InvalidAxis,
    UnsupportedScaleFactor,
    GridMismatch,
    NoSharedLines,
    Io,
    Serialization,
    InvalidUrl,
    NotFound,
    Configuration,
}

impl GeometryError {
    /// The kind of this error, without its context
    pub fn kind(&self) -> ErrorKind {
        match self {
            GeometryError::DegenerateGrid(_) => ErrorKind::DegenerateGrid,
            GeometryError::MissingSamples(_) => ErrorKind::MissingSamples,
            GeometryError::OutOfRange(_) => ErrorKind::OutOfRange,
            GeometryError::AmbiguousAxisDirection(_) => ErrorKind::AmbiguousAxisDirection,
            GeometryError::NegativeStep(_) => ErrorKind::NegativeStep,
            GeometryError::UnknownAxisName(_) => ErrorKind::UnknownAxisName,
            GeometryError::UnknownCoordinateSystem(_) => ErrorKind::UnknownCoordinateSystem,
            GeometryError::UnknownInterpolation(_) => ErrorKind::UnknownInterpolation,
            GeometryError::InvalidDimensions(_) => ErrorKind::InvalidDimensions,
            GeometryError::InvalidAxis(_) => ErrorKind::InvalidAxis,
            GeometryError::UnsupportedScaleFactor(_) => ErrorKind::UnsupportedScaleFactor,
            GeometryError::GridMismatch(_) => ErrorKind::GridMismatch,
            GeometryError::NoSharedLines(_) => ErrorKind::NoSharedLines,
            GeometryError::Io(_) => ErrorKind::Io,
            GeometryError::Serialization(_) => ErrorKind::Serialization,
            GeometryError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            GeometryError::NotFound(_) => ErrorKind::NotFound,
            GeometryError::Configuration(_) => ErrorKind::Configuration,
        }
    }
}

/// Specialized Result type for geometry operations
pub type Result<T> = std::result::Result<T, GeometryError>;

impl From<serde_json::Error> for GeometryError {
    fn from(err: serde_json::Error) -> Self {
        GeometryError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_discriminates() {
        let err = GeometryError::NegativeStep("Inline".to_string());
        assert_eq!(err.kind(), ErrorKind::NegativeStep);
        assert_eq!(err.to_string(), "Negative step: Inline");
    }

    #[test]
    fn test_from_serde_json() {
        let err: GeometryError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }
}
