//! Length parsing and unit resolution.
//!
//! Lengths are parsed into a magnitude and a [`Unit`], then resolved against a
//! [`ViewportContext`] into EMUs. Resolution stays in `f64` until the caller
//! quantizes at the output boundary, so rounding error does not compound
//! across unit resolution, transform composition and curve flattening.
//!
//! Resolution never fails on a single bad value: NaN, infinities and negative
//! values where they are invalid are clamped to 0 and reported as a
//! [`Warning`] next to the result.

use crate::common::error::{Checked, Error, Result, Warning};
use crate::common::metrics::{DefaultFontMetrics, FontMetrics};
use phf::{Set, phf_set};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_MM: i64 = 36_000;
pub const EMUS_PER_PT: i64 = 12_700;
/// CSS pixel at 96 px/in
pub const EMUS_PER_PX: i64 = 9_525;

const PT_PER_INCH: f64 = 72.0;
const PC_PER_INCH: f64 = 6.0;
const CM_PER_INCH: f64 = 2.54;
const MM_PER_INCH: f64 = 25.4;

#[inline]
pub fn px_to_emu(px: f64) -> f64 {
    px * EMUS_PER_PX as f64
}

#[inline]
pub fn emu_to_px(emu: f64) -> f64 {
    emu / EMUS_PER_PX as f64
}

/// Supported length units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// No suffix; user units, treated as CSS pixels
    None,
    /// CSS pixel (1/96 inch)
    Px,
    /// Point (1/72 inch)
    Pt,
    /// Pica (1/6 inch)
    Pc,
    /// Inch
    In,
    /// Centimeter
    Cm,
    /// Millimeter
    Mm,
    /// Multiple of the font size
    Em,
    /// Multiple of the font x-height
    Ex,
    /// Percentage of the viewport extent along the resolution axis
    Percent,
    /// Percentage of the viewport width
    Vw,
    /// Percentage of the viewport height
    Vh,
}

impl Unit {
    /// Get the unit suffix
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Px => "px",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::In => "in",
            Self::Cm => "cm",
            Self::Mm => "mm",
            Self::Em => "em",
            Self::Ex => "ex",
            Self::Percent => "%",
            Self::Vw => "vw",
            Self::Vh => "vh",
        }
    }

    /// Match a unit suffix, ignoring ASCII case.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        if suffix.is_empty() {
            return Some(Self::None);
        }
        if suffix == "%" {
            return Some(Self::Percent);
        }
        if suffix.len() != 2 {
            return None;
        }
        let lower = suffix.to_ascii_lowercase();
        match lower.as_str() {
            "px" => Some(Self::Px),
            "pt" => Some(Self::Pt),
            "pc" => Some(Self::Pc),
            "in" => Some(Self::In),
            "cm" => Some(Self::Cm),
            "mm" => Some(Self::Mm),
            "em" => Some(Self::Em),
            "ex" => Some(Self::Ex),
            "vw" => Some(Self::Vw),
            "vh" => Some(Self::Vh),
            _ => None,
        }
    }

    /// Inches per unit for the physical units.
    fn per_inch(&self) -> Option<f64> {
        match self {
            Self::Pt => Some(PT_PER_INCH),
            Self::Pc => Some(PC_PER_INCH),
            Self::In => Some(1.0),
            Self::Cm => Some(CM_PER_INCH),
            Self::Mm => Some(MM_PER_INCH),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length value with unit
///
/// # Examples
///
/// ```
/// use svgdml::common::unit::{Length, Unit};
///
/// let length = "2.5cm".parse::<Length>().unwrap();
/// assert_eq!(length.magnitude(), 2.5);
/// assert_eq!(length.unit(), Unit::Cm);
///
/// let bare = "12".parse::<Length>().unwrap();
/// assert_eq!(bare.unit(), Unit::None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    magnitude: f64,
    unit: Unit,
}

impl Length {
    #[inline]
    pub const fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    #[inline]
    pub const fn px(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::Px)
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    #[inline]
    pub fn unit(&self) -> Unit {
        self.unit
    }
}

/// Parse a length literal.
///
/// Grammar: optional sign, integer or decimal mantissa, optional exponent,
/// optional unit suffix (case-insensitive). A missing suffix means user units.
/// Input without a numeric prefix, or with an unknown suffix, is a
/// [`Error::MalformedLength`]; the caller decides whether to default.
pub fn parse_length(text: &str) -> Result<Length> {
    let trimmed = text.trim();
    let (magnitude, consumed) = fast_float2::parse_partial::<f64, _>(trimmed)
        .map_err(|_| Error::MalformedLength(format!("no numeric value in '{}'", text)))?;
    let suffix = trimmed[consumed..].trim_start();
    let unit = Unit::from_suffix(suffix)
        .ok_or_else(|| Error::MalformedLength(format!("unknown unit '{}' in '{}'", suffix, text)))?;
    Ok(Length::new(magnitude, unit))
}

impl FromStr for Length {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_length(s)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.as_str())
    }
}

/// Ambient extents used to resolve relative units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportContext {
    /// Viewport width in pixels
    pub width: f64,
    /// Viewport height in pixels
    pub height: f64,
    pub dpi: f64,
    /// Font size in pixels
    pub font_size: f64,
}

impl Default for ViewportContext {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            dpi: 96.0,
            font_size: 16.0,
        }
    }
}

impl ViewportContext {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    /// Replace every field that cannot be used as a divisor with its default.
    pub fn validated(self) -> Checked<Self> {
        let defaults = Self::default();
        let mut warnings = Vec::new();
        let mut fix = |value: f64, fallback: f64, field: &'static str| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                warnings.push(Warning::ViewportDefaulted { field });
                fallback
            }
        };
        let ctx = Self {
            width: fix(self.width, defaults.width, "width"),
            height: fix(self.height, defaults.height, "height"),
            dpi: fix(self.dpi, defaults.dpi, "dpi"),
            font_size: fix(self.font_size, defaults.font_size, "font-size"),
        };
        Checked {
            value: ctx,
            warnings,
        }
    }
}

/// Axis a relative length resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Attribute names with a vertical sense.
static VERTICAL_ATTRIBUTES: Set<&'static str> = phf_set! {
    "y",
    "y1",
    "y2",
    "cy",
    "ry",
    "dy",
    "fy",
    "height",
    "font-size",
    "top",
    "bottom",
    "refY",
    "markerHeight",
};

/// Axis policy for attribute names.
///
/// `y`, `y1`, `y2`, `cy`, `ry`, `dy`, `fy`, `height`, `font-size`, `top`,
/// `bottom`, `refY` and `markerHeight` resolve against the viewport height;
/// every other name resolves against the width.
#[inline]
pub fn axis_for_attribute(name: &str) -> Axis {
    if VERTICAL_ATTRIBUTES.contains(name) {
        Axis::Y
    } else {
        Axis::X
    }
}

/// Rounding policy at the output boundary.
///
/// The pipeline carries `f64` from unit resolution through flattening and
/// rounds once, when EMU values are emitted. `Standard` and `Subpixel`
/// therefore produce the same output today; the distinction is kept so that
/// option files written for either mode stay valid. `Ultra` differs by
/// trimming guard digits before that single rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionMode {
    /// Round to the nearest integer at output
    #[default]
    Standard,
    /// Keep `f64` through the pipeline and round once at output
    #[serde(alias = "high")]
    Subpixel,
    /// Like `Subpixel`, with guard digits trimmed before the final rounding
    Ultra,
}

const ULTRA_GUARD_SCALE: f64 = 1_000.0;

/// Round a pre-quantization EMU value to an integer.
///
/// Non-finite input yields 0 with a warning. Values beyond the `i64` range
/// saturate.
pub fn quantize(value: f64, mode: PrecisionMode) -> Checked<i64> {
    if !value.is_finite() {
        return Checked::warned(0, Warning::NonFiniteClamped {
            context: "quantize".into(),
        });
    }
    let rounded = match mode {
        PrecisionMode::Standard | PrecisionMode::Subpixel => value.round(),
        PrecisionMode::Ultra => ((value * ULTRA_GUARD_SCALE).round() / ULTRA_GUARD_SCALE).round(),
    };
    Checked::clean(rounded as i64)
}

/// Round to the nearest multiple of `grid_size`.
///
/// The result is always an exact multiple of the grid: values beyond the
/// `i64` range snap to the outermost representable grid line. Non-finite
/// input yields 0 with a warning.
///
/// ```
/// use svgdml::common::unit::quantize_to_grid;
///
/// assert_eq!(quantize_to_grid(1234.0, 100).unwrap().value, 1200);
/// assert_eq!(quantize_to_grid(1250.0, 100).unwrap().value, 1300);
/// assert!(quantize_to_grid(5.0, 0).is_err());
/// ```
pub fn quantize_to_grid(value: f64, grid_size: i64) -> Result<Checked<i64>> {
    if grid_size <= 0 {
        return Err(Error::InvalidGridSize(grid_size));
    }
    if !value.is_finite() {
        return Ok(Checked::warned(0, Warning::NonFiniteClamped {
            context: "grid quantization".into(),
        }));
    }
    // `as` saturates; the clamp keeps the product in range
    let steps = ((value / grid_size as f64).round() as i64).clamp(i64::MIN / grid_size, i64::MAX / grid_size);
    Ok(Checked::clean(steps * grid_size))
}

/// Resolves lengths to EMUs.
///
/// The font metrics capability is chosen when the resolver is built; the
/// default assumes an x-height of half the font size.
#[derive(Clone)]
pub struct UnitResolver {
    metrics: Arc<dyn FontMetrics>,
}

impl fmt::Debug for UnitResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitResolver")
            .field("metrics", &self.metrics.name())
            .finish()
    }
}

impl Default for UnitResolver {
    fn default() -> Self {
        Self::new(Arc::new(DefaultFontMetrics))
    }
}

impl UnitResolver {
    pub fn new(metrics: Arc<dyn FontMetrics>) -> Self {
        Self { metrics }
    }

    /// Resolve a length to EMUs, before quantization.
    pub fn resolve(&self, length: &Length, ctx: &ViewportContext, axis: Axis) -> Checked<f64> {
        let magnitude = length.magnitude();
        if !magnitude.is_finite() {
            return Checked::warned(0.0, Warning::NonFiniteClamped {
                context: format!("length {}", length),
            });
        }

        let emu = match length.unit() {
            Unit::None | Unit::Px => px_to_emu(magnitude),
            Unit::Pt | Unit::Pc | Unit::In | Unit::Cm | Unit::Mm => {
                // per_inch is defined for every physical unit
                let per_inch = length.unit().per_inch().unwrap_or(1.0);
                magnitude / per_inch * EMUS_PER_INCH as f64
            },
            Unit::Em => px_to_emu(magnitude * ctx.font_size),
            Unit::Ex => {
                let ratio = self.metrics.x_height_ratio(ctx.font_size);
                px_to_emu(magnitude * ctx.font_size * ratio)
            },
            Unit::Percent => {
                let extent = match axis {
                    Axis::X => ctx.width,
                    Axis::Y => ctx.height,
                };
                px_to_emu(magnitude / 100.0 * extent)
            },
            Unit::Vw => px_to_emu(magnitude / 100.0 * ctx.width),
            Unit::Vh => px_to_emu(magnitude / 100.0 * ctx.height),
        };

        if emu.is_finite() {
            Checked::clean(emu)
        } else {
            Checked::warned(0.0, Warning::NonFiniteClamped {
                context: format!("length {}", length),
            })
        }
    }

    /// Resolve a length for an attribute that must not be negative.
    pub fn resolve_non_negative(
        &self,
        length: &Length,
        ctx: &ViewportContext,
        axis: Axis,
        context: &str,
    ) -> Checked<f64> {
        self.resolve(length, ctx, axis).and_then(|emu| {
            if emu < 0.0 {
                Checked::warned(0.0, Warning::NegativeClamped {
                    context: context.to_string(),
                    value: emu,
                })
            } else {
                Checked::clean(emu)
            }
        })
    }

    /// Parse and resolve a length literal, defaulting malformed input to 0.
    pub fn resolve_str(&self, text: &str, ctx: &ViewportContext, axis: Axis) -> Checked<f64> {
        match parse_length(text) {
            Ok(length) => self.resolve(&length, ctx, axis),
            Err(_) => Checked::warned(0.0, Warning::MalformedLengthDefaulted {
                input: text.to_string(),
            }),
        }
    }

    /// Resolve a set of named lengths, inferring each axis from its name.
    pub fn batch_resolve<K, I>(&self, attributes: I, ctx: &ViewportContext) -> Checked<BTreeMap<String, f64>>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Length)>,
    {
        let mut warnings = Vec::new();
        let mut resolved = BTreeMap::new();
        for (name, length) in attributes {
            let name = name.as_ref();
            let emu = self
                .resolve(&length, ctx, axis_for_attribute(name))
                .collect_into(&mut warnings);
            resolved.insert(name.to_string(), emu);
        }
        Checked {
            value: resolved,
            warnings,
        }
    }
}

/// Resolve a length to EMUs with the default font metrics.
///
/// ```
/// use svgdml::common::unit::{resolve_to_emu, Axis, Length, ViewportContext};
///
/// let ctx = ViewportContext::default();
/// let inch: Length = "1in".parse().unwrap();
/// assert_eq!(resolve_to_emu(&inch, &ctx, Axis::X).value, 914400.0);
/// ```
pub fn resolve_to_emu(length: &Length, ctx: &ViewportContext, axis: Axis) -> Checked<f64> {
    UnitResolver::default().resolve(length, ctx, axis)
}

/// Resolve named lengths with the default font metrics.
pub fn batch_resolve<K, I>(attributes: I, ctx: &ViewportContext) -> Checked<BTreeMap<String, f64>>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, Length)>,
{
    UnitResolver::default().batch_resolve(attributes, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn emu(text: &str, ctx: &ViewportContext, axis: Axis) -> i64 {
        let length = parse_length(text).unwrap();
        quantize(resolve_to_emu(&length, ctx, axis).value, PrecisionMode::Standard).value
    }

    #[test]
    fn test_parse_length() {
        let length = parse_length("2.5cm").unwrap();
        assert_eq!(length.magnitude(), 2.5);
        assert_eq!(length.unit(), Unit::Cm);

        let length = parse_length("-1.5E2PX").unwrap();
        assert_eq!(length.magnitude(), -150.0);
        assert_eq!(length.unit(), Unit::Px);

        assert_eq!(parse_length(" 50% ").unwrap().unit(), Unit::Percent);
        assert_eq!(parse_length("3em").unwrap().unit(), Unit::Em);
        assert_eq!(parse_length("2ex").unwrap().unit(), Unit::Ex);
        assert_eq!(parse_length("+.5").unwrap(), Length::new(0.5, Unit::None));
    }

    #[test]
    fn test_parse_length_malformed() {
        assert!(matches!(parse_length("px"), Err(Error::MalformedLength(_))));
        assert!(matches!(parse_length(""), Err(Error::MalformedLength(_))));
        assert!(matches!(parse_length("12furlongs"), Err(Error::MalformedLength(_))));
    }

    #[test]
    fn test_absolute_units() {
        let ctx = ViewportContext::default();
        assert_eq!(emu("0px", &ctx, Axis::X), 0);
        assert_eq!(emu("1in", &ctx, Axis::X), 914_400);
        assert_eq!(emu("72pt", &ctx, Axis::X), 914_400);
        assert_eq!(emu("6pc", &ctx, Axis::X), 914_400);
        assert_eq!(emu("2.54cm", &ctx, Axis::X), 914_400);
        assert_eq!(emu("25.4mm", &ctx, Axis::X), 914_400);
        assert_eq!(emu("96px", &ctx, Axis::X), 914_400);
        assert_eq!(emu("1", &ctx, Axis::Y), 9_525);
    }

    #[test]
    fn test_relative_units() {
        let ctx = ViewportContext::new(800.0, 400.0).with_font_size(10.0);
        assert_eq!(emu("50%", &ctx, Axis::X), (800.0f64 * 0.5 * 9525.0).round() as i64);
        assert_eq!(emu("50%", &ctx, Axis::Y), (400.0f64 * 0.5 * 9525.0).round() as i64);
        assert_eq!(emu("10vw", &ctx, Axis::Y), 80 * 9_525);
        assert_eq!(emu("10vh", &ctx, Axis::X), 40 * 9_525);
        assert_eq!(emu("2em", &ctx, Axis::X), 20 * 9_525);
        assert_eq!(emu("2ex", &ctx, Axis::X), 10 * 9_525);
    }

    struct TallXHeight;

    impl FontMetrics for TallXHeight {
        fn x_height_ratio(&self, _font_size: f64) -> f64 {
            0.75
        }

        fn name(&self) -> &str {
            "tall"
        }
    }

    #[test]
    fn test_custom_font_metrics() {
        let resolver = UnitResolver::new(Arc::new(TallXHeight));
        let ctx = ViewportContext::default().with_font_size(8.0);
        let length = parse_length("1ex").unwrap();
        assert_eq!(resolver.resolve(&length, &ctx, Axis::X).value, 6.0 * 9525.0);
    }

    #[test]
    fn test_non_finite_clamped() {
        let ctx = ViewportContext::default();
        let result = resolve_to_emu(&Length::px(f64::NAN), &ctx, Axis::X);
        assert_eq!(result.value, 0.0);
        assert!(matches!(result.warnings[0], Warning::NonFiniteClamped { .. }));

        let result = resolve_to_emu(&Length::new(f64::INFINITY, Unit::In), &ctx, Axis::X);
        assert_eq!(result.value, 0.0);
        assert!(!result.is_clean());

        let result = quantize(f64::NEG_INFINITY, PrecisionMode::Ultra);
        assert_eq!(result.value, 0);
        assert!(!result.is_clean());
    }

    #[test]
    fn test_negative_clamped() {
        let ctx = ViewportContext::default();
        let resolver = UnitResolver::default();
        let result = resolver.resolve_non_negative(&Length::px(-4.0), &ctx, Axis::X, "width");
        assert_eq!(result.value, 0.0);
        assert!(matches!(result.warnings[0], Warning::NegativeClamped { .. }));
    }

    #[test]
    fn test_resolve_str_defaults_malformed() {
        let ctx = ViewportContext::default();
        let result = UnitResolver::default().resolve_str("auto", &ctx, Axis::X);
        assert_eq!(result.value, 0.0);
        assert!(matches!(result.warnings[0], Warning::MalformedLengthDefaulted { .. }));
    }

    #[test]
    fn test_axis_policy() {
        for name in ["y", "cy", "height", "font-size", "ry", "y2"] {
            assert_eq!(axis_for_attribute(name), Axis::Y, "{}", name);
        }
        for name in ["x", "cx", "width", "r", "rx", "stroke-width", "unknown"] {
            assert_eq!(axis_for_attribute(name), Axis::X, "{}", name);
        }
    }

    #[test]
    fn test_batch_resolve() {
        let ctx = ViewportContext::new(200.0, 100.0);
        let attrs = [
            ("x", Length::new(50.0, Unit::Percent)),
            ("height", Length::new(50.0, Unit::Percent)),
            ("cy", Length::new(f64::NAN, Unit::Px)),
        ];
        let result = batch_resolve(attrs, &ctx);
        assert_eq!(result.value["x"], 100.0 * 9525.0);
        assert_eq!(result.value["height"], 50.0 * 9525.0);
        assert_eq!(result.value["cy"], 0.0);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_quantize_modes() {
        assert_eq!(quantize(10.5, PrecisionMode::Standard).value, 11);
        assert_eq!(quantize(-10.4, PrecisionMode::Subpixel).value, -10);
        // 12.4999996 keeps its guard digits as 12.5 and rounds up
        assert_eq!(quantize(12.499_999_6, PrecisionMode::Ultra).value, 13);
        assert_eq!(quantize(12.499_999_6, PrecisionMode::Standard).value, 12);
        assert_eq!(quantize(1e300, PrecisionMode::Standard).value, i64::MAX);
    }

    #[test]
    fn test_grid_invalid() {
        assert_eq!(quantize_to_grid(10.0, 0), Err(Error::InvalidGridSize(0)));
        assert_eq!(quantize_to_grid(10.0, -5), Err(Error::InvalidGridSize(-5)));
        let snapped = quantize_to_grid(f64::NAN, 5).unwrap();
        assert_eq!(snapped.value, 0);
        assert!(matches!(snapped.warnings[0], Warning::NonFiniteClamped { .. }));
        assert!(!quantize_to_grid(f64::INFINITY, 5).unwrap().is_clean());
    }

    #[test]
    fn test_grid_extremes_stay_on_grid() {
        for value in [1e300, -1e300, 9.3e18, -9.3e18] {
            for grid in [1, 7, 10, 9525, i64::MAX] {
                let snapped = quantize_to_grid(value, grid).unwrap();
                assert!(snapped.is_clean());
                assert_eq!(snapped.value % grid, 0, "{} on {}", value, grid);
                assert_eq!(snapped.value.signum(), value.signum() as i64);
            }
        }
    }

    #[test]
    fn test_viewport_validated() {
        let ctx = ViewportContext {
            width: 0.0,
            height: f64::NAN,
            dpi: 72.0,
            font_size: -1.0,
        };
        let checked = ctx.validated();
        assert_eq!(checked.value.width, 800.0);
        assert_eq!(checked.value.height, 600.0);
        assert_eq!(checked.value.dpi, 72.0);
        assert_eq!(checked.warnings.len(), 3);
    }

    proptest! {
        #[test]
        fn prop_grid_multiple(value in -1.0e12f64..1.0e12, grid in 1i64..1_000_000) {
            let snapped = quantize_to_grid(value, grid).unwrap().value;
            prop_assert_eq!(snapped % grid, 0);
            prop_assert!((snapped as f64 - value).abs() <= grid as f64 / 2.0 + 1.0);
        }

        #[test]
        fn prop_grid_multiple_full_range(value in -1.0e300f64..1.0e300, grid in 1i64..i64::MAX) {
            let snapped = quantize_to_grid(value, grid).unwrap().value;
            prop_assert_eq!(snapped % grid, 0);
        }

        #[test]
        fn prop_non_negative_inputs_give_non_negative_emu(
            magnitude in 0.0f64..1.0e6,
            unit_index in 0usize..12,
        ) {
            let units = [
                Unit::None, Unit::Px, Unit::Pt, Unit::Pc, Unit::In, Unit::Cm,
                Unit::Mm, Unit::Em, Unit::Ex, Unit::Percent, Unit::Vw, Unit::Vh,
            ];
            let ctx = ViewportContext::default();
            let emu = resolve_to_emu(&Length::new(magnitude, units[unit_index]), &ctx, Axis::X);
            let q = quantize(emu.value, PrecisionMode::Standard);
            prop_assert!(q.value >= 0);
            prop_assert!(emu.is_clean());
        }
    }
}
