//! XML helpers for DrawingML fragments.

pub mod escape;

pub use escape::escape_attr;
