//! svgdml - SVG geometry to DrawingML
//!
//! This library converts the geometry of vector drawings into the fixed-point
//! vocabulary of presentation documents: EMU offsets and extents, custom
//! geometry paths, and metafile tiles for pattern fills that have no native
//! preset.
//!
//! # Features
//!
//! - **Unit resolution**: `px`, `pt`, `pc`, `in`, `cm`, `mm`, `em`, `ex`, `%`,
//!   `vw` and `vh` lengths to EMU against a viewport
//! - **Transforms**: affine matrices, SVG transform lists and a scoped stack
//!   for nested coordinate contexts
//! - **Paths**: the full path mini-language, elliptical arcs as cubic Béziers,
//!   fixed-sample flattening and bounding boxes
//! - **Pattern tiles**: hatch, crosshatch, grid, dot and brick tiles encoded as
//!   Enhanced Metafiles, with the fill XML that references them
//! - **Parallel batches**: independent shapes convert on the rayon pool with
//!   shared caches
//!
//! Nothing here panics on malformed input. Bad values are clamped or defaulted
//! with a [`Warning`]; errors are scoped to the shape or fill that raised them.
//!
//! # Example - Flattening a path
//!
//! ```
//! use svgdml::geometry::{BoundingBox, Transform};
//! use svgdml::geometry::path::{flatten_path, parse};
//!
//! let commands = parse("M 10 10 h 80 a 10 10 0 0 1 10 10 v 60 Z")?;
//! let polylines = flatten_path(&commands, &Transform::scale_uniform(2.0), 48).value;
//! let bounds = polylines
//!     .iter()
//!     .fold(BoundingBox::Empty, |acc, line| acc.union(line.bounds()));
//! assert_eq!(bounds.width(), 180.0);
//! # Ok::<(), svgdml::Error>(())
//! ```
//!
//! # Example - Encoding a pattern tile
//!
//! ```
//! use svgdml::images::emf::{EmfParser, PatternKind, Rgb, create_tile};
//!
//! let tile = create_tile(PatternKind::Dots { radius: 2, spacing: 8 }, 25, 25, Rgb::BLACK, Rgb::WHITE)?;
//! let bytes = tile.to_bytes();
//! assert_eq!(EmfParser::new(&bytes)?.width(), 25);
//! # Ok::<(), svgdml::Error>(())
//! ```

/// Errors, warnings, units, options and XML helpers
pub mod common;

/// Points, transforms, paths and bounding boxes
pub mod geometry;

/// Enhanced Metafile pattern tiles
pub mod images;

/// DrawingML fragments
pub mod ooxml;

/// Shape and fill conversion
pub mod convert;

// Re-export commonly used types for convenience
pub use common::error::{Checked, Error, Result, Warning};
pub use common::options::ConversionOptions;
pub use convert::{ShapeConverter, ShapeInput};
