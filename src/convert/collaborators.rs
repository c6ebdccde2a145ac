//! Seams to the systems around the converter.
//!
//! The package writer stores tile bytes as media parts and the preset
//! classifier decides when a pattern has a native DrawingML equivalent. Both
//! live outside this crate; the implementations here are the defaults and an
//! in-memory package for callers that assemble parts themselves.

use crate::common::error::{Error, Result};
use crate::images::emf::{HatchDirection, PatternConfig, PatternKind, Rgb};
use crate::ooxml::drawings::fill::{PresetPattern, write_preset_pattern_fill};

/// Stores binary media and returns the relationship id that refers to it.
pub trait PackageWriter {
    fn add_media(&mut self, bytes: &[u8], suggested_name: &str) -> Result<String>;
}

/// Native fill chosen instead of an encoded tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeFill {
    pub preset: PresetPattern,
    pub foreground: Rgb,
    pub background: Rgb,
}

impl NativeFill {
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(128);
        write_preset_pattern_fill(&mut xml, self.preset, self.foreground, self.background);
        xml
    }
}

/// Decides whether a pattern has a native preset.
pub trait PresetClassifier: Send + Sync {
    fn classify(&self, config: &PatternConfig) -> Option<NativeFill>;
}

/// Classifier that never matches, so every pattern is encoded as a tile.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNativePresets;

impl PresetClassifier for NoNativePresets {
    fn classify(&self, _config: &PatternConfig) -> Option<NativeFill> {
        None
    }
}

/// Maps single-line hatches to the matching DrawingML preset.
///
/// Presets have a fixed density, so only hatches (whose look does not depend
/// on a spacing parameter) are matched.
#[derive(Debug, Clone, Copy, Default)]
pub struct HatchPresets;

impl PresetClassifier for HatchPresets {
    fn classify(&self, config: &PatternConfig) -> Option<NativeFill> {
        let PatternKind::Hatch(direction) = config.kind else {
            return None;
        };
        let preset = match direction {
            HatchDirection::Horizontal => PresetPattern::Horizontal,
            HatchDirection::Vertical => PresetPattern::Vertical,
            // `upDiag` rises left to right like `/`; `dnDiag` falls like `\`
            HatchDirection::ForwardDiagonal => PresetPattern::UpDiagonal,
            HatchDirection::BackwardDiagonal => PresetPattern::DownDiagonal,
        };
        Some(NativeFill {
            preset,
            foreground: config.foreground,
            background: config.background,
        })
    }
}

/// A media part held by [`MemoryPackage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPart {
    pub name: String,
    pub rel_id: String,
    pub bytes: Vec<u8>,
}

/// Package writer that keeps parts in memory.
///
/// Relationship ids are `rId1`, `rId2`, ... in insertion order. A name that is
/// already taken gets a numeric suffix before its extension.
#[derive(Debug, Clone, Default)]
pub struct MemoryPackage {
    parts: Vec<MediaPart>,
}

impl MemoryPackage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parts(&self) -> &[MediaPart] {
        &self.parts
    }

    pub fn part(&self, rel_id: &str) -> Option<&MediaPart> {
        self.parts.iter().find(|p| p.rel_id == rel_id)
    }

    fn unique_name(&self, suggested: &str) -> String {
        let taken = |name: &str| self.parts.iter().any(|p| p.name == name);
        if !taken(suggested) {
            return suggested.to_string();
        }
        let (stem, ext) = suggested.rsplit_once('.').unwrap_or((suggested, ""));
        (2..)
            .map(|n| {
                if ext.is_empty() {
                    format!("{}{}", stem, n)
                } else {
                    format!("{}{}.{}", stem, n, ext)
                }
            })
            .find(|name| !taken(name))
            .unwrap_or_else(|| suggested.to_string())
    }
}

impl PackageWriter for MemoryPackage {
    fn add_media(&mut self, bytes: &[u8], suggested_name: &str) -> Result<String> {
        if suggested_name.is_empty() {
            return Err(Error::Other("media part needs a name".into()));
        }
        let rel_id = format!("rId{}", self.parts.len() + 1);
        let name = self.unique_name(suggested_name);
        self.parts.push(MediaPart {
            name,
            rel_id: rel_id.clone(),
            bytes: bytes.to_vec(),
        });
        Ok(rel_id)
    }
}
