//! Unified error and warning types.
//!
//! Errors abort the smallest unit that produced them (a length attribute, one
//! shape, one pattern fill). Warnings never abort anything; they travel next to
//! the value they describe so the caller can log them or promote them.

// Submodule declarations
pub mod conversions;
pub mod types;
pub mod warning;

// Re-exports
pub use types::{Error, Result};
pub use warning::{Checked, Warning};
