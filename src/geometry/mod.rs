//! Geometry: points, affine transforms, path data and bounding boxes.
//!
//! Coordinates here are plain `f64` in whatever space the caller works in
//! (user units before a transform, EMUs after). Quantization to integers only
//! happens in `convert`.

pub mod bbox;
pub mod path;
pub mod stack;
pub mod transform;

pub use bbox::BoundingBox;
pub use path::{PathCommand, Polyline};
pub use stack::{StackScope, TransformStack};
pub use transform::{Decomposition, Transform, TransformOp};

/// A 2D point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Reflect `other` through this point.
    #[inline]
    pub fn reflect(&self, other: Point) -> Point {
        Point::new(2.0 * self.x - other.x, 2.0 * self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
