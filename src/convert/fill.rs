//! Pattern fill resolution.
//!
//! A pattern becomes a native preset when the classifier knows one, an
//! encoded metafile tile otherwise, and a solid fill of its foreground colour
//! when the tile cannot be encoded.

use super::collaborators::{NativeFill, PackageWriter, PresetClassifier};
use crate::common::error::{Error, Result, Warning};
use crate::common::options::ConversionOptions;
use crate::images::emf::{HatchDirection, PatternConfig, PatternKind, PatternLibrary, PatternTile, Rgb, TileCache};
use crate::ooxml::drawings::fill::{
    FillMode, PATTERN_TILE_REL_PLACEHOLDER, bind_relationship, solid_fill_fragment, to_stretch_fill_fragment,
    to_tile_fill_fragment,
};
use std::sync::Arc;

/// How a pattern fill ended up being expressed.
#[derive(Debug, Clone, PartialEq)]
pub enum FillOutcome {
    /// Native preset, no media part
    Native { fill: NativeFill, xml: String },
    /// Encoded tile stored as media part `rel`
    Tile { xml: String, rel: String },
    /// Tile encoding failed; solid foreground colour instead
    SolidFallback { xml: String, warning: Warning },
}

impl FillOutcome {
    pub fn xml(&self) -> &str {
        match self {
            Self::Native { xml, .. } | Self::Tile { xml, .. } | Self::SolidFallback { xml, .. } => xml,
        }
    }
}

/// Media part name for a tile, stable for a given configuration.
pub fn suggested_media_name(config: &PatternConfig) -> String {
    let kind = match config.kind {
        PatternKind::Hatch(HatchDirection::Horizontal) => "hatch-h",
        PatternKind::Hatch(HatchDirection::Vertical) => "hatch-v",
        PatternKind::Hatch(HatchDirection::ForwardDiagonal) => "hatch-fd",
        PatternKind::Hatch(HatchDirection::BackwardDiagonal) => "hatch-bd",
        PatternKind::Crosshatch { .. } => "crosshatch",
        PatternKind::Grid { .. } => "grid",
        PatternKind::Dots { .. } => "dots",
        PatternKind::Brick { .. } => "brick",
    };
    format!(
        "pattern-{}-{}x{}-{}-{}.emf",
        kind,
        config.width,
        config.height,
        config.foreground.to_hex(),
        config.background.to_hex()
    )
}

/// Resolves pattern fills for one conversion run.
#[derive(Clone, Copy)]
pub struct FillResolver<'a> {
    classifier: &'a dyn PresetClassifier,
    cache: &'a TileCache,
    mode: FillMode,
    warnings_are_fatal: bool,
}

impl<'a> FillResolver<'a> {
    pub fn new(classifier: &'a dyn PresetClassifier, cache: &'a TileCache) -> Self {
        Self {
            classifier,
            cache,
            mode: FillMode::Tile,
            warnings_are_fatal: false,
        }
    }

    pub fn with_mode(mut self, mode: FillMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_options(mut self, options: &ConversionOptions) -> Self {
        self.warnings_are_fatal = options.warnings_are_fatal;
        self
    }

    /// Resolve a pattern configuration to fill XML.
    ///
    /// Tiles come from the cache. An encoding failure is recovered with a
    /// solid fill unless warnings are fatal; package writer failures are
    /// returned.
    pub fn resolve(&self, config: &PatternConfig, writer: &mut dyn PackageWriter) -> Result<FillOutcome> {
        if let Some(outcome) = self.native(config) {
            return Ok(outcome);
        }
        self.emit_tile(self.cache.get_or_create(config), config, writer)
    }

    /// Resolve a named preset from `library`, recoloured.
    ///
    /// The classifier sees the recoloured configuration. An unknown preset
    /// name is an error.
    pub fn resolve_preset(
        &self,
        library: &PatternLibrary,
        name: &str,
        foreground: Rgb,
        background: Rgb,
        writer: &mut dyn PackageWriter,
    ) -> Result<FillOutcome> {
        let base = library
            .get(name)
            .ok_or_else(|| Error::Other(format!("unknown pattern preset '{}'", name)))?;
        let config = base.config().with_colors(foreground, background);
        if let Some(outcome) = self.native(&config) {
            return Ok(outcome);
        }
        let tile = library.variant(name, foreground, background).map(Arc::new);
        self.emit_tile(tile, &config, writer)
    }

    fn native(&self, config: &PatternConfig) -> Option<FillOutcome> {
        let fill = self.classifier.classify(config)?;
        log::debug!("native preset {} for {:?}", fill.preset.as_str(), config.kind);
        Some(FillOutcome::Native { xml: fill.to_xml(), fill })
    }

    fn emit_tile(
        &self,
        tile: Result<Arc<PatternTile>>,
        config: &PatternConfig,
        writer: &mut dyn PackageWriter,
    ) -> Result<FillOutcome> {
        let tile = match tile {
            Ok(tile) => tile,
            Err(Error::EmfEncoding(reason)) => {
                let warning = Warning::PatternFallback { reason };
                log::warn!("{}", warning);
                if self.warnings_are_fatal {
                    return Err(warning.into());
                }
                return Ok(FillOutcome::SolidFallback {
                    xml: solid_fill_fragment(config.foreground),
                    warning,
                });
            },
            Err(e) => return Err(e),
        };

        let fragment = match self.mode {
            FillMode::Tile => to_tile_fill_fragment(&tile, PATTERN_TILE_REL_PLACEHOLDER),
            FillMode::Stretch => to_stretch_fill_fragment(&tile, PATTERN_TILE_REL_PLACEHOLDER),
        };
        let rel = writer.add_media(&tile.to_bytes(), &suggested_media_name(config))?;
        Ok(FillOutcome::Tile {
            xml: bind_relationship(&fragment, &rel),
            rel,
        })
    }
}

/// Tiled fill for `config` with default settings.
pub fn resolve_pattern_fill(
    config: &PatternConfig,
    classifier: &dyn PresetClassifier,
    cache: &TileCache,
    writer: &mut dyn PackageWriter,
) -> Result<FillOutcome> {
    FillResolver::new(classifier, cache).resolve(config, writer)
}
