//! Font measurement capability.
//!
//! Unit resolution needs one font measurement, the x-height used by `ex`
//! lengths. Callers with a real font service plug it in through
//! [`FontMetrics`] when they build a resolver; everyone else gets
//! [`DefaultFontMetrics`].

/// Font measurements available to unit resolution.
pub trait FontMetrics: Send + Sync {
    /// x-height as a fraction of the font size.
    fn x_height_ratio(&self, font_size: f64) -> f64;

    /// Name used in debug output.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Fallback metrics: x-height is half the font size.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFontMetrics;

impl FontMetrics for DefaultFontMetrics {
    #[inline]
    fn x_height_ratio(&self, _font_size: f64) -> f64 {
        0.5
    }

    fn name(&self) -> &str {
        "default"
    }
}
