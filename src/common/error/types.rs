//! Crate-wide error type.
use thiserror::Error;

/// Main error type for svgdml operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Length literal without a numeric prefix or with an unknown unit suffix
    #[error("Malformed length: {0}")]
    MalformedLength(String),

    /// Path data that does not follow the path mini-language
    #[error("Invalid path data at byte {position}: {message}")]
    InvalidPathData { position: usize, message: String },

    /// NaN or infinity where a finite coordinate is required, raised when a
    /// clamp warning is promoted
    #[error("Non-finite value: {0}")]
    NonFiniteValue(String),

    /// Grid size of zero or below
    #[error("Invalid grid size: {0} (must be > 0)")]
    InvalidGridSize(i64),

    /// Internal invariant violated while generating a metafile tile
    #[error("EMF encoding error: {0}")]
    EmfEncoding(String),

    /// Metafile bytes that cannot be read back
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Transform list operation with an unknown name or wrong arity
    #[error("Invalid transform: {0}")]
    InvalidTransform(String),

    /// A warning promoted to an error by `ConversionOptions::warnings_are_fatal`
    #[error("Warning treated as error: {0}")]
    Promoted(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an `InvalidPathData` error.
    #[inline]
    pub fn path(position: usize, message: impl Into<String>) -> Self {
        Self::InvalidPathData {
            position,
            message: message.into(),
        }
    }

    /// Whether the error is scoped to a single shape.
    ///
    /// Shape-scoped errors skip the offending shape; its siblings still convert.
    pub fn is_shape_scoped(&self) -> bool {
        matches!(
            self,
            Self::InvalidPathData { .. }
                | Self::MalformedLength(_)
                | Self::NonFiniteValue(_)
                | Self::InvalidTransform(_)
                | Self::Promoted(_)
        )
    }
}

/// Result type for svgdml operations.
pub type Result<T> = std::result::Result<T, Error>;
