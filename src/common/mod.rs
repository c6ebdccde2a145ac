//! Common types, traits, and utilities shared across the pipeline.
//!
//! This module holds the pieces every stage needs: the error and warning
//! types, length units and their resolution, conversion options, the font
//! metrics capability and XML escaping.

// Submodule declarations
pub mod error;
pub mod metrics;
pub mod options;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Checked, Error, Result, Warning};
pub use metrics::{DefaultFontMetrics, FontMetrics};
pub use options::ConversionOptions;
pub use unit::{Axis, Length, PrecisionMode, Unit, UnitResolver, ViewportContext};
