//! Named pattern presets.

use super::pattern::{HatchDirection, PatternConfig, PatternKind, PatternTile, Rgb, create_tile_from, derive_colored_variant};
use crate::common::error::{Error, Result};
use std::collections::BTreeMap;

/// Built-in presets, black on white.
const STANDARD_PRESETS: &[(&str, PatternConfig)] = &[
    ("hatch-horizontal", preset(PatternKind::Hatch(HatchDirection::Horizontal), 8, 8)),
    ("hatch-vertical", preset(PatternKind::Hatch(HatchDirection::Vertical), 8, 8)),
    ("hatch-diagonal", preset(PatternKind::Hatch(HatchDirection::ForwardDiagonal), 8, 8)),
    ("crosshatch-dense", preset(PatternKind::Crosshatch { spacing: 4 }, 16, 16)),
    ("crosshatch-sparse", preset(PatternKind::Crosshatch { spacing: 8 }, 16, 16)),
    (
        "grid-fine",
        preset(
            PatternKind::Grid {
                cell_w: 4,
                cell_h: 4,
                line_w: 1,
            },
            16,
            16,
        ),
    ),
    (
        "grid-coarse",
        preset(
            PatternKind::Grid {
                cell_w: 10,
                cell_h: 10,
                line_w: 2,
            },
            20,
            20,
        ),
    ),
    ("dots-small", preset(PatternKind::Dots { radius: 1, spacing: 4 }, 16, 16)),
    ("dots-large", preset(PatternKind::Dots { radius: 3, spacing: 10 }, 20, 20)),
    (
        "brick",
        preset(
            PatternKind::Brick {
                brick_w: 16,
                brick_h: 8,
                mortar_w: 2,
            },
            36,
            20,
        ),
    ),
];

const fn preset(kind: PatternKind, width: u32, height: u32) -> PatternConfig {
    PatternConfig::new(kind, width, height, Rgb::BLACK, Rgb::WHITE)
}

/// Read-only registry of named tiles.
///
/// Built once and passed by reference to whoever needs it. Entries are never
/// modified; recoloured tiles come from [`PatternLibrary::variant`] as new
/// values.
#[derive(Debug, Clone, Default)]
pub struct PatternLibrary {
    tiles: BTreeMap<String, PatternTile>,
}

impl PatternLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in presets.
    pub fn standard() -> Result<Self> {
        STANDARD_PRESETS
            .iter()
            .try_fold(Self::new(), |library, (name, config)| library.with_preset(*name, config))
    }

    /// Add a preset while building the library.
    pub fn with_preset(mut self, name: impl Into<String>, config: &PatternConfig) -> Result<Self> {
        self.tiles.insert(name.into(), create_tile_from(config)?);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&PatternTile> {
        self.tiles.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tiles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// A recoloured copy of a preset.
    pub fn variant(&self, name: &str, foreground: Rgb, background: Rgb) -> Result<PatternTile> {
        let base = self
            .get(name)
            .ok_or_else(|| Error::Other(format!("unknown pattern preset '{}'", name)))?;
        derive_colored_variant(base, foreground, background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_presets() {
        let library = PatternLibrary::standard().unwrap();
        assert_eq!(library.len(), STANDARD_PRESETS.len());
        for name in ["grid-fine", "crosshatch-dense", "dots-small", "brick", "hatch-diagonal"] {
            assert!(library.get(name).is_some(), "missing {}", name);
        }
        assert!(library.get("plaid").is_none());
        let names: Vec<&str> = library.names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_variant_does_not_mutate_preset() {
        let library = PatternLibrary::standard().unwrap();
        let before = library.get("grid-fine").unwrap().clone();
        let red = library.variant("grid-fine", Rgb::new(255, 0, 0), Rgb::WHITE).unwrap();
        assert_eq!(library.get("grid-fine"), Some(&before));
        assert_eq!(red.config().foreground, Rgb::new(255, 0, 0));
        assert_eq!(red.config().kind, before.config().kind);
        assert!(library.variant("plaid", Rgb::BLACK, Rgb::WHITE).is_err());
    }

    #[test]
    fn test_custom_preset() {
        let library = PatternLibrary::new()
            .with_preset("stripes", &preset(PatternKind::Hatch(HatchDirection::Vertical), 4, 4))
            .unwrap();
        assert_eq!(library.names().collect::<Vec<_>>(), vec!["stripes"]);
        assert!(
            PatternLibrary::new()
                .with_preset("broken", &preset(PatternKind::Dots { radius: 1, spacing: 0 }, 4, 4))
                .is_err()
        );
    }
}
