/// EMF Record Types and Common Structures
///
/// The subset of [MS-EMF] needed to write and read back procedural pattern
/// tiles: control records, object creation and selection, the two filled
/// primitives and straight line drawing.
///
/// References:
/// - [MS-EMF]: Enhanced Metafile Format Specification, 2.1.1 and 2.2
use zerocopy_derive::*;

/// "EMF " in little-endian, stored in the header record
pub const EMF_SIGNATURE: u32 = 0x464D_4520;

/// Header format version written by the encoder
pub const EMF_VERSION: u32 = 0x0001_0000;

/// EMF Record Type enumeration (record types used by pattern tiles)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum EmrType {
    Header = 1,
    Eof = 14,
    SetBkMode = 18,
    MoveToEx = 27,
    SelectObject = 37,
    CreatePen = 38,
    CreateBrushIndirect = 39,
    DeleteObject = 40,
    Ellipse = 42,
    Rectangle = 43,
    LineTo = 54,
}

impl EmrType {
    /// Convert from u32 value
    #[inline]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::Header),
            14 => Some(Self::Eof),
            18 => Some(Self::SetBkMode),
            27 => Some(Self::MoveToEx),
            37 => Some(Self::SelectObject),
            38 => Some(Self::CreatePen),
            39 => Some(Self::CreateBrushIndirect),
            40 => Some(Self::DeleteObject),
            42 => Some(Self::Ellipse),
            43 => Some(Self::Rectangle),
            54 => Some(Self::LineTo),
            _ => None,
        }
    }

    /// Get record type name for debugging
    pub const fn name(self) -> &'static str {
        match self {
            Self::Header => "EMR_HEADER",
            Self::Eof => "EMR_EOF",
            Self::SetBkMode => "EMR_SETBKMODE",
            Self::MoveToEx => "EMR_MOVETOEX",
            Self::SelectObject => "EMR_SELECTOBJECT",
            Self::CreatePen => "EMR_CREATEPEN",
            Self::CreateBrushIndirect => "EMR_CREATEBRUSHINDIRECT",
            Self::DeleteObject => "EMR_DELETEOBJECT",
            Self::Ellipse => "EMR_ELLIPSE",
            Self::Rectangle => "EMR_RECTANGLE",
            Self::LineTo => "EMR_LINETO",
        }
    }

    /// Draw records reference the currently selected objects.
    #[inline]
    pub const fn is_draw(self) -> bool {
        matches!(self, Self::Ellipse | Self::Rectangle | Self::LineTo)
    }
}

/// Size of a fixed-layout record struct as written to `record_size`
#[inline]
pub const fn record_size_of<T>() -> u32 {
    std::mem::size_of::<T>() as u32
}

// Common EMF structures

/// EMF Point (POINTL) - 32-bit signed coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct PointL {
    pub x: i32,
    pub y: i32,
}

/// EMF Rectangle (RECTL), inclusive-exclusive as drawn by GDI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct RectL {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectL {
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// EMF Size (SIZEL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct SizeL {
    pub cx: i32,
    pub cy: i32,
}

/// EMF Color (COLORREF) - 0x00bbggrr format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct ColorRef {
    pub value: u32,
}

impl ColorRef {
    /// Create from RGB components
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            value: (r as u32) | ((g as u32) << 8) | ((b as u32) << 16),
        }
    }

    /// Extract red component
    #[inline]
    pub const fn r(self) -> u8 {
        (self.value & 0xFF) as u8
    }

    /// Extract green component
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.value >> 8) & 0xFF) as u8
    }

    /// Extract blue component
    #[inline]
    pub const fn b(self) -> u8 {
        ((self.value >> 16) & 0xFF) as u8
    }
}

/// EMF Record Header (common to all records)
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EmrHeader {
    pub record_type: u32,
    pub record_size: u32,
}

/// EMR_HEADER without the optional description, pixel format and OpenGL
/// extensions (88 bytes)
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EmrFileHeader {
    pub record_type: u32,
    pub record_size: u32,
    /// Bounds in device units
    pub bounds: RectL,
    /// Frame in .01 millimeter units
    pub frame: RectL,
    pub signature: u32,
    pub version: u32,
    /// Size of the whole metafile in bytes
    pub bytes: u32,
    /// Number of records, header and EOF included
    pub records: u32,
    /// Handle table size; index 0 is reserved, so this is highest handle + 1
    pub handles: u16,
    pub reserved: u16,
    pub description_size: u32,
    pub description_offset: u32,
    pub palette_entries: u32,
    /// Reference device size in pixels
    pub device: SizeL,
    /// Reference device size in millimeters
    pub millimeters: SizeL,
}

/// EMR_EOF without palette entries
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EmrEof {
    pub record_type: u32,
    pub record_size: u32,
    pub palette_entries: u32,
    pub palette_offset: u32,
    /// Repeats `record_size`
    pub size_last: u32,
}

impl EmrEof {
    pub const fn new() -> Self {
        let size = record_size_of::<Self>();
        Self {
            record_type: EmrType::Eof as u32,
            record_size: size,
            palette_entries: 0,
            palette_offset: 16,
            size_last: size,
        }
    }
}

impl Default for EmrEof {
    fn default() -> Self {
        Self::new()
    }
}
