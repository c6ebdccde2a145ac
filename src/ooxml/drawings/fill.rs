//! Fill fragments: tiled or stretched metafile tiles and solid colours.
//!
//! A tile fragment names its media part only by relationship id. The package
//! writer hands back the real id after storing the tile bytes; until then the
//! [`PATTERN_TILE_REL_PLACEHOLDER`] id stands in and can be swapped with
//! [`bind_relationship`].

use crate::common::xml::escape_attr;
use crate::images::emf::{PatternTile, Rgb};

/// Relationship id written when the real one is not known yet.
pub const PATTERN_TILE_REL_PLACEHOLDER: &str = "rIdPatternTile";

/// How a tile covers the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillMode {
    /// Repeat at the tile's own size from the top-left corner
    Tile,
    /// Scale a single copy to the shape bounds
    Stretch,
}

fn push_blip_fill_open(xml: &mut String, rel_id: &str) {
    xml.push_str(r#"<a:blipFill dpi="0" rotWithShape="1"><a:blip r:embed=""#);
    xml.push_str(&escape_attr(rel_id));
    xml.push_str(r#""/>"#);
}

/// Append a fill for `tile` in the given mode.
///
/// The tile's size travels in the metafile header of the embedded blip, so
/// `a:tile` scales at 100% and `tile` only feeds the debug log.
pub fn write_pattern_fill(xml: &mut String, tile: &PatternTile, rel_id: &str, mode: FillMode) {
    log::debug!(
        "pattern fill {:?} for {}x{} tile via {}",
        mode,
        tile.width(),
        tile.height(),
        rel_id
    );
    push_blip_fill_open(xml, rel_id);
    match mode {
        FillMode::Tile => {
            xml.push_str(
                r#"<a:srcRect/><a:tile tx="0" ty="0" sx="100000" sy="100000" flip="none" algn="tl"/>"#,
            );
        },
        FillMode::Stretch => xml.push_str("<a:stretch><a:fillRect/></a:stretch>"),
    }
    xml.push_str("</a:blipFill>");
}

/// Fragment repeating `tile` across the shape.
///
/// ```
/// use svgdml::images::emf::{PatternKind, Rgb, create_tile};
/// use svgdml::ooxml::drawings::fill::{PATTERN_TILE_REL_PLACEHOLDER, to_tile_fill_fragment};
///
/// let tile = create_tile(PatternKind::Crosshatch { spacing: 4 }, 16, 16, Rgb::BLACK, Rgb::WHITE)?;
/// let xml = to_tile_fill_fragment(&tile, PATTERN_TILE_REL_PLACEHOLDER);
/// assert!(xml.contains(r#"r:embed="rIdPatternTile""#));
/// assert!(xml.contains("<a:tile "));
/// # Ok::<(), svgdml::Error>(())
/// ```
pub fn to_tile_fill_fragment(tile: &PatternTile, rel_id: &str) -> String {
    let mut xml = String::with_capacity(192);
    write_pattern_fill(&mut xml, tile, rel_id, FillMode::Tile);
    xml
}

/// Fragment stretching one copy of `tile` over the shape.
pub fn to_stretch_fill_fragment(tile: &PatternTile, rel_id: &str) -> String {
    let mut xml = String::with_capacity(160);
    write_pattern_fill(&mut xml, tile, rel_id, FillMode::Stretch);
    xml
}

pub fn write_solid_fill(xml: &mut String, color: Rgb) {
    xml.push_str(r#"<a:solidFill><a:srgbClr val=""#);
    xml.push_str(&color.to_hex());
    xml.push_str(r#""/></a:solidFill>"#);
}

/// `a:solidFill` with an sRGB colour.
pub fn solid_fill_fragment(color: Rgb) -> String {
    let mut xml = String::with_capacity(56);
    write_solid_fill(&mut xml, color);
    xml
}

/// DrawingML preset patterns that match a single-line hatch tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetPattern {
    Horizontal,
    Vertical,
    DownDiagonal,
    UpDiagonal,
}

impl PresetPattern {
    /// `ST_PresetPatternVal` token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horz",
            Self::Vertical => "vert",
            Self::DownDiagonal => "dnDiag",
            Self::UpDiagonal => "upDiag",
        }
    }
}

/// Append a native `a:pattFill`.
pub fn write_preset_pattern_fill(xml: &mut String, preset: PresetPattern, foreground: Rgb, background: Rgb) {
    xml.push_str(r#"<a:pattFill prst=""#);
    xml.push_str(preset.as_str());
    xml.push_str(r#""><a:fgClr><a:srgbClr val=""#);
    xml.push_str(&foreground.to_hex());
    xml.push_str(r#""/></a:fgClr><a:bgClr><a:srgbClr val=""#);
    xml.push_str(&background.to_hex());
    xml.push_str(r#""/></a:bgClr></a:pattFill>"#);
}

/// Replace the placeholder relationship id with the one the package assigned.
pub fn bind_relationship(fragment: &str, rel_id: &str) -> String {
    let placeholder = format!(r#"r:embed="{}""#, PATTERN_TILE_REL_PLACEHOLDER);
    let bound = format!(r#"r:embed="{}""#, escape_attr(rel_id));
    fragment.replace(&placeholder, &bound)
}
