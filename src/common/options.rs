//! Conversion options.
//!
//! Options are plain data so they can be loaded from a config file with serde;
//! every field has a default and missing fields fall back to it.

use crate::common::unit::PrecisionMode;
use serde::{Deserialize, Serialize};

/// Samples taken per curve segment when flattening.
pub const DEFAULT_CURVE_SAMPLES: usize = 48;

/// Options controlling geometry conversion.
///
/// # Examples
///
/// ```
/// use svgdml::common::options::ConversionOptions;
/// use svgdml::common::unit::PrecisionMode;
///
/// let options = ConversionOptions::default()
///     .with_precision(PrecisionMode::Subpixel)
///     .with_grid_size(Some(12700));
/// assert_eq!(options.curve_samples, 48);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Rounding policy for the final EMU values
    pub precision: PrecisionMode,
    /// Fixed sample count per curve segment
    pub curve_samples: usize,
    /// Snap offsets and extents to this EMU grid
    pub grid_size: Option<i64>,
    /// Treat any warning as an error for the shape that raised it
    pub warnings_are_fatal: bool,
    /// Convert independent shapes on the rayon pool
    ///
    /// Only selects the iteration strategy; results are identical either way.
    pub parallel: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            precision: PrecisionMode::Standard,
            curve_samples: DEFAULT_CURVE_SAMPLES,
            grid_size: None,
            warnings_are_fatal: false,
            parallel: true,
        }
    }
}

impl ConversionOptions {
    /// Load options from a YAML document; absent keys keep their defaults.
    pub fn from_yaml(text: &str) -> crate::Result<Self> {
        serde_saphyr::from_str(text)
            .map_err(|e| crate::Error::Other(format!("Invalid conversion options: {}", e)))
    }

    pub fn with_precision(mut self, precision: PrecisionMode) -> Self {
        self.precision = precision;
        self
    }

    /// Set the curve sample count; values below 1 are raised to 1.
    pub fn with_curve_samples(mut self, samples: usize) -> Self {
        self.curve_samples = samples.max(1);
        self
    }

    pub fn with_grid_size(mut self, grid_size: Option<i64>) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_warnings_fatal(mut self, fatal: bool) -> Self {
        self.warnings_are_fatal = fatal;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_floor() {
        let options = ConversionOptions::default().with_curve_samples(0);
        assert_eq!(options.curve_samples, 1);
    }

    #[test]
    fn test_serde_defaults_missing_fields() {
        let options =
            ConversionOptions::from_yaml("precision: ultra\ngrid_size: 635\n").unwrap();
        assert_eq!(options.precision, PrecisionMode::Ultra);
        assert_eq!(options.grid_size, Some(635));
        assert_eq!(options.curve_samples, DEFAULT_CURVE_SAMPLES);
        assert!(!options.warnings_are_fatal);
    }

    #[test]
    fn test_high_is_subpixel_alias() {
        let options = ConversionOptions::from_yaml("precision: high\n").unwrap();
        assert_eq!(options.precision, PrecisionMode::Subpixel);
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        assert!(ConversionOptions::from_yaml("precision: [1, 2]\n").is_err());
    }
}
