//! Shape and fill conversion.
//!
//! This is where the pieces meet: [`ShapeConverter`] turns a shape's lengths,
//! transform list and path data into EMU geometry and DrawingML, and
//! [`FillResolver`] turns a pattern into a native preset, a metafile tile or a
//! solid fallback.
//!
//! Failures stay local. A bad path skips its shape, a tile that cannot be
//! encoded degrades to a solid fill, and every recovery is logged at `warn`.
//!
//! # Example
//!
//! ```
//! use svgdml::common::{ConversionOptions, ViewportContext};
//! use svgdml::convert::{ShapeConverter, ShapeInput};
//!
//! let converter = ShapeConverter::new(ConversionOptions::default(), ViewportContext::default())?;
//! let outcomes = converter.convert_shapes(&[
//!     ShapeInput::path("tri", "M 0 0 L 10 0 L 5 8 Z"),
//!     ShapeInput::rect("box", "1in", "1in", "2cm", "2cm").with_transform("rotate(30)"),
//! ]);
//! assert!(outcomes.iter().all(|o| o.is_ok()));
//! # Ok::<(), svgdml::Error>(())
//! ```

pub mod collaborators;
pub mod fill;
pub mod shape;

pub use collaborators::{
    HatchPresets, MediaPart, MemoryPackage, NativeFill, NoNativePresets, PackageWriter, PresetClassifier,
};
pub use fill::{FillOutcome, FillResolver, resolve_pattern_fill, suggested_media_name};
pub use shape::{ShapeConverter, ShapeGeometry, ShapeInput, ShapeOutcome, convert_shapes};
