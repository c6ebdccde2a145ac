/// EMF Drawing Record Structures
///
/// Filled primitives and straight line drawing.
use super::types::{EmrType, PointL, RectL, record_size_of};
use zerocopy_derive::*;

/// EMR_RECTANGLE / EMR_ELLIPSE
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EmrRectangle {
    pub record_type: u32,
    pub record_size: u32,
    pub rect: RectL,
}

impl EmrRectangle {
    pub const fn rectangle(rect: RectL) -> Self {
        Self {
            record_type: EmrType::Rectangle as u32,
            record_size: record_size_of::<Self>(),
            rect,
        }
    }

    pub const fn ellipse(rect: RectL) -> Self {
        Self {
            record_type: EmrType::Ellipse as u32,
            record_size: record_size_of::<Self>(),
            rect,
        }
    }
}

/// EMR_LINETO / EMR_MOVETOEX
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EmrLineTo {
    pub record_type: u32,
    pub record_size: u32,
    pub point: PointL,
}

impl EmrLineTo {
    pub const fn move_to(x: i32, y: i32) -> Self {
        Self {
            record_type: EmrType::MoveToEx as u32,
            record_size: record_size_of::<Self>(),
            point: PointL { x, y },
        }
    }

    pub const fn line_to(x: i32, y: i32) -> Self {
        Self {
            record_type: EmrType::LineTo as u32,
            record_size: record_size_of::<Self>(),
            point: PointL { x, y },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(EmrRectangle::ellipse(RectL::new(0, 0, 4, 4)).record_size, 24);
        assert_eq!(EmrLineTo::line_to(1, 2).record_size, 16);
        assert_eq!(EmrLineTo::move_to(1, 2).record_type, 27);
    }
}
