/// EMF State Management Records
use super::types::{EmrType, record_size_of};
use zerocopy_derive::*;

/// Background mix mode for hatched brushes and pen gaps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum BackgroundMode {
    /// Transparent background
    Transparent = 1,
    /// Opaque background
    Opaque = 2,
}

/// EMR_SETBKMODE
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EmrSetBkMode {
    pub record_type: u32,
    pub record_size: u32,
    pub mode: u32,
}

impl EmrSetBkMode {
    pub const fn new(mode: BackgroundMode) -> Self {
        Self {
            record_type: EmrType::SetBkMode as u32,
            record_size: record_size_of::<Self>(),
            mode: mode as u32,
        }
    }
}
