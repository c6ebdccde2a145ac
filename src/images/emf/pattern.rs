//! Procedural pattern tiles encoded as EMF.
//!
//! Every tile is generated the same way: header, creation of every pen and
//! brush the tile needs, a background fill across the whole tile, the
//! pattern's draw records, deletion of every object, EOF. Generation is a pure function of [`PatternConfig`], so equal
//! configurations produce byte-identical tiles.

use super::records::{BackgroundMode, ColorRef, RectL, brush_style, pen_style};
use super::writer::{EmfRecordBytes, EmfStream, EmfWriter, ObjectHandle};
use crate::common::error::{Error, Result};
use crate::images::emf::records::EmrType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    pub fn from_hex(text: &str) -> Result<Self> {
        let hex = text.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || Error::ParseError(format!("invalid hex colour '{}'", text));
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::new(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            },
            _ => Err(invalid()),
        }
    }

    /// Upper-case `RRGGBB`, the form DrawingML's `a:srgbClr` expects.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    #[inline]
    pub const fn to_colorref(self) -> ColorRef {
        ColorRef::from_rgb(self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Direction of a single-line hatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HatchDirection {
    Horizontal,
    Vertical,
    /// `/`
    ForwardDiagonal,
    /// `\`
    BackwardDiagonal,
}

/// Pattern family and its geometric parameters, in tile units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    Hatch(HatchDirection),
    Crosshatch { spacing: u32 },
    Grid { cell_w: u32, cell_h: u32, line_w: u32 },
    Dots { radius: u32, spacing: u32 },
    Brick { brick_w: u32, brick_h: u32, mortar_w: u32 },
}

impl PatternKind {
    fn validate(&self) -> Result<()> {
        let check = |ok: bool, what: &str| {
            if ok {
                Ok(())
            } else {
                Err(Error::EmfEncoding(format!("{} must be positive", what)))
            }
        };
        match *self {
            Self::Hatch(_) => Ok(()),
            Self::Crosshatch { spacing } => check(spacing > 0, "crosshatch spacing"),
            Self::Grid {
                cell_w,
                cell_h,
                line_w,
            } => {
                check(cell_w > 0 && cell_h > 0, "grid cell size")?;
                check(line_w > 0, "grid line width")
            },
            Self::Dots { radius, spacing } => {
                check(radius > 0, "dot radius")?;
                check(spacing > 0, "dot spacing")
            },
            Self::Brick {
                brick_w,
                brick_h,
                mortar_w,
            } => {
                check(brick_w > 0 && brick_h > 0, "brick size")?;
                check(mortar_w > 0, "mortar width")
            },
        }
    }
}

/// Everything that determines a tile. Used as the tile cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternConfig {
    pub kind: PatternKind,
    pub width: u32,
    pub height: u32,
    pub foreground: Rgb,
    pub background: Rgb,
}

impl PatternConfig {
    pub const fn new(kind: PatternKind, width: u32, height: u32, foreground: Rgb, background: Rgb) -> Self {
        Self {
            kind,
            width,
            height,
            foreground,
            background,
        }
    }

    /// Same geometry, different colours.
    pub const fn with_colors(self, foreground: Rgb, background: Rgb) -> Self {
        Self {
            foreground,
            background,
            ..self
        }
    }
}

/// An encoded tile. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTile {
    config: PatternConfig,
    stream: EmfStream,
}

impl PatternTile {
    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Records in stream order, header first and EOF last.
    pub fn records(&self) -> &[EmfRecordBytes] {
        self.stream.records()
    }

    pub fn handles(&self) -> &[ObjectHandle] {
        self.stream.handles()
    }

    pub fn record_types(&self) -> Vec<EmrType> {
        self.records().iter().map(EmfRecordBytes::record_type).collect()
    }

    /// The complete EMF byte stream.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.stream.to_bytes()
    }
}

/// Encode a tile.
///
/// ```
/// use svgdml::images::emf::{PatternKind, Rgb, create_tile};
///
/// let tile = create_tile(PatternKind::Dots { radius: 2, spacing: 8 }, 25, 25, Rgb::BLACK, Rgb::WHITE).unwrap();
/// assert_eq!((tile.width(), tile.height()), (25, 25));
/// assert!(!tile.handles().is_empty());
/// ```
pub fn create_tile(kind: PatternKind, width: u32, height: u32, foreground: Rgb, background: Rgb) -> Result<PatternTile> {
    create_tile_from(&PatternConfig::new(kind, width, height, foreground, background))
}

/// Encode a tile from a full configuration.
pub fn create_tile_from(config: &PatternConfig) -> Result<PatternTile> {
    config.kind.validate()?;
    let mut tile = TileBuilder::new(config)?;
    tile.fill_background()?;
    match config.kind {
        PatternKind::Hatch(direction) => tile.hatch(direction)?,
        PatternKind::Crosshatch { spacing } => tile.crosshatch(spacing)?,
        PatternKind::Grid { cell_w, cell_h, .. } => tile.grid(cell_w, cell_h)?,
        PatternKind::Dots { radius, spacing } => tile.dots(radius, spacing)?,
        PatternKind::Brick {
            brick_w,
            brick_h,
            mortar_w,
        } => tile.brick(brick_w, brick_h, mortar_w)?,
    }
    let stream = tile.finish()?;
    log::debug!(
        "encoded {:?} tile {}x{}: {} records, {} bytes",
        config.kind,
        config.width,
        config.height,
        stream.records().len(),
        stream.byte_len()
    );
    Ok(PatternTile {
        config: *config,
        stream,
    })
}

/// Re-run tile creation with the same geometry and new colours. `base` is
/// left untouched.
pub fn derive_colored_variant(base: &PatternTile, foreground: Rgb, background: Rgb) -> Result<PatternTile> {
    create_tile_from(&base.config.with_colors(foreground, background))
}

/// Per-tile drawing state over an [`EmfWriter`].
///
/// Every object the tile paints with is created up front, so all creation
/// records precede the first draw record.
struct TileBuilder {
    writer: EmfWriter,
    width: i32,
    height: i32,
    background_brush: ObjectHandle,
    null_pen: ObjectHandle,
    /// Pen for line patterns, brush for filled ones
    foreground: ObjectHandle,
}

impl TileBuilder {
    fn new(config: &PatternConfig) -> Result<Self> {
        let mut writer = EmfWriter::new(config.width, config.height)?;
        let fg = config.foreground.to_colorref();
        let bg = config.background.to_colorref();

        writer.set_background_mode(BackgroundMode::Transparent);
        let background_brush = writer.create_brush(brush_style::SOLID, bg, 0)?;
        let null_pen = writer.create_pen(pen_style::NULL, 0, bg)?;
        let foreground = match config.kind {
            PatternKind::Hatch(_) | PatternKind::Crosshatch { .. } => {
                writer.create_pen(pen_style::SOLID, 1, fg)?
            },
            PatternKind::Grid { line_w, .. } => writer.create_pen(pen_style::SOLID, line_w, fg)?,
            PatternKind::Dots { .. } | PatternKind::Brick { .. } => {
                writer.create_brush(brush_style::SOLID, fg, 0)?
            },
        };

        // EmfWriter::new has already checked that both fit in i32
        Ok(Self {
            writer,
            width: config.width as i32,
            height: config.height as i32,
            background_brush,
            null_pen,
            foreground,
        })
    }

    fn fill_background(&mut self) -> Result<()> {
        self.writer.select(self.background_brush)?;
        self.writer.select(self.null_pen)?;
        // a null pen leaves the right and bottom edge unpainted
        self.writer
            .rectangle(RectL::new(0, 0, self.width.saturating_add(1), self.height.saturating_add(1)))
    }

    fn hatch(&mut self, direction: HatchDirection) -> Result<()> {
        self.writer.select(self.foreground)?;
        let (w, h) = (self.width, self.height);
        match direction {
            HatchDirection::Horizontal => self.writer.line((0, h / 2), (w, h / 2)),
            HatchDirection::Vertical => self.writer.line((w / 2, 0), (w / 2, h)),
            HatchDirection::ForwardDiagonal => self.writer.line((0, h), (w, 0)),
            HatchDirection::BackwardDiagonal => self.writer.line((0, 0), (w, h)),
        }
    }

    fn crosshatch(&mut self, spacing: u32) -> Result<()> {
        self.writer.select(self.foreground)?;
        let step = spacing as usize;
        for y in (0..self.height).step_by(step) {
            self.writer.line((0, y), (self.width, y))?;
        }
        for x in (0..self.width).step_by(step) {
            self.writer.line((x, 0), (x, self.height))?;
        }
        Ok(())
    }

    fn grid(&mut self, cell_w: u32, cell_h: u32) -> Result<()> {
        self.writer.select(self.foreground)?;
        for x in (0..self.width).step_by(cell_w as usize) {
            self.writer.line((x, 0), (x, self.height))?;
        }
        for y in (0..self.height).step_by(cell_h as usize) {
            self.writer.line((0, y), (self.width, y))?;
        }
        Ok(())
    }

    fn dots(&mut self, radius: u32, spacing: u32) -> Result<()> {
        self.writer.select(self.foreground)?;
        let r = radius.min(i32::MAX as u32) as i32;
        let half = (spacing / 2) as i32;
        for cy in (half..self.height).step_by(spacing as usize) {
            for cx in (half..self.width).step_by(spacing as usize) {
                self.writer
                    .ellipse(RectL::new(
                        cx.saturating_sub(r),
                        cy.saturating_sub(r),
                        cx.saturating_add(r).saturating_add(1),
                        cy.saturating_add(r).saturating_add(1),
                    ))?;
            }
        }
        Ok(())
    }

    /// Running bond: every other course is offset by half a brick.
    fn brick(&mut self, brick_w: u32, brick_h: u32, mortar_w: u32) -> Result<()> {
        self.writer.select(self.foreground)?;
        let bw = brick_w.min(i32::MAX as u32) as i32;
        let bh = brick_h.min(i32::MAX as u32) as i32;
        let m = mortar_w.min(i32::MAX as u32) as i32;
        let course = bh.saturating_add(m);
        let pitch = bw.saturating_add(m);

        for (row, top) in (0..self.height).step_by(course as usize).enumerate() {
            let offset = if row % 2 == 1 { -(pitch / 2) } else { 0 };
            let bottom = top.saturating_add(bh).min(self.height);
            let mut left = offset;
            while left < self.width {
                let right = left.saturating_add(bw).min(self.width);
                // null pen: add 1 so the brick covers its full extent
                self.writer
                    .rectangle(RectL::new(left.max(0), top, right.saturating_add(1), bottom.saturating_add(1)))?;
                left = left.saturating_add(pitch);
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<EmfStream> {
        for handle in [self.background_brush, self.null_pen, self.foreground] {
            self.writer.delete(handle)?;
        }
        self.writer.finish()
    }
}
