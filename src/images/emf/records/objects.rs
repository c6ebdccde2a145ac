/// EMF Object Creation Records
///
/// Pens and brushes, plus selection and deletion by object-table index.
use super::types::{ColorRef, EmrType, record_size_of};
use zerocopy_derive::*;

// Object management

/// EMR_SELECTOBJECT
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EmrSelectObject {
    pub record_type: u32,
    pub record_size: u32,
    pub object_index: u32,
}

impl EmrSelectObject {
    pub const fn new(object_index: u32) -> Self {
        Self {
            record_type: EmrType::SelectObject as u32,
            record_size: record_size_of::<Self>(),
            object_index,
        }
    }
}

/// EMR_DELETEOBJECT
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EmrDeleteObject {
    pub record_type: u32,
    pub record_size: u32,
    pub object_index: u32,
}

impl EmrDeleteObject {
    pub const fn new(object_index: u32) -> Self {
        Self {
            record_type: EmrType::DeleteObject as u32,
            record_size: record_size_of::<Self>(),
            object_index,
        }
    }
}

// Pen creation

/// Pen styles
pub mod pen_style {
    pub const SOLID: u32 = 0;
    pub const NULL: u32 = 5;
}

/// EMR_CREATEPEN
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EmrCreatePen {
    pub record_type: u32,
    pub record_size: u32,
    pub object_index: u32,
    pub pen_style: u32,
    pub width: u32,   // Only x component used
    pub _unused: u32, // y component (unused)
    pub color: ColorRef,
}

impl EmrCreatePen {
    pub const fn new(object_index: u32, pen_style: u32, width: u32, color: ColorRef) -> Self {
        Self {
            record_type: EmrType::CreatePen as u32,
            record_size: record_size_of::<Self>(),
            object_index,
            pen_style,
            width,
            _unused: 0,
            color,
        }
    }
}

// Brush creation

/// Brush styles
pub mod brush_style {
    pub const SOLID: u32 = 0;
    pub const NULL: u32 = 1;
}

/// EMR_CREATEBRUSHINDIRECT
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EmrCreateBrushIndirect {
    pub record_type: u32,
    pub record_size: u32,
    pub object_index: u32,
    pub brush_style: u32,
    pub color: ColorRef,
    pub brush_hatch: u32,
}

impl EmrCreateBrushIndirect {
    pub const fn new(object_index: u32, brush_style: u32, color: ColorRef, brush_hatch: u32) -> Self {
        Self {
            record_type: EmrType::CreateBrushIndirect as u32,
            record_size: record_size_of::<Self>(),
            object_index,
            brush_style,
            color,
            brush_hatch,
        }
    }
}
