//! Path data: parsing, arc expansion, flattening.
//!
//! The parser resolves every relative command against a running current point,
//! so [`PathCommand`] values only ever carry absolute coordinates. Curves are
//! flattened at a fixed sample count per segment
//! ([`DEFAULT_CURVE_SAMPLES`](crate::common::options::DEFAULT_CURVE_SAMPLES)
//! unless configured otherwise), which keeps output size predictable.

pub mod arc;
pub mod cache;
pub mod flatten;
pub mod parser;

pub use arc::{ArcSegment, arc_to_cubics};
pub use cache::PathCache;
pub use flatten::{Polyline, flatten, flatten_path};
pub use parser::{ParseOptions, parse, parse_with};

use crate::geometry::Point;

/// A path command in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// New x; y stays at the current point's
    HorizontalLineTo(f64),
    /// New y; x stays at the current point's
    VerticalLineTo(f64),
    CubicBezierTo { c1: Point, c2: Point, end: Point },
    /// `c1` is the reflection of the previous cubic's second control point
    SmoothCubicTo { c1: Point, c2: Point, end: Point },
    QuadraticBezierTo { c: Point, end: Point },
    /// `c` is the reflection of the previous quadratic's control point
    SmoothQuadraticTo { c: Point, end: Point },
    ArcTo(ArcSegment),
    ClosePath,
}

impl PathCommand {
    /// Current point after this command, given the point before it.
    ///
    /// `ClosePath` has no intrinsic end point; `None` is returned and the
    /// caller moves back to the subpath start.
    pub fn end_point(&self, from: Point) -> Option<Point> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) => Some(p),
            Self::HorizontalLineTo(x) => Some(Point::new(x, from.y)),
            Self::VerticalLineTo(y) => Some(Point::new(from.x, y)),
            Self::CubicBezierTo { end, .. }
            | Self::SmoothCubicTo { end, .. }
            | Self::QuadraticBezierTo { end, .. }
            | Self::SmoothQuadraticTo { end, .. } => Some(end),
            Self::ArcTo(arc) => Some(arc.end),
            Self::ClosePath => None,
        }
    }

    #[inline]
    pub fn is_curve(&self) -> bool {
        matches!(
            self,
            Self::CubicBezierTo { .. }
                | Self::SmoothCubicTo { .. }
                | Self::QuadraticBezierTo { .. }
                | Self::SmoothQuadraticTo { .. }
                | Self::ArcTo(_)
        )
    }
}

/// Evaluate a cubic Bézier at `t`.
#[inline]
pub fn cubic_point(p0: Point, c1: Point, c2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * c1.x + c * c2.x + d * p3.x,
        a * p0.y + b * c1.y + c * c2.y + d * p3.y,
    )
}

/// Evaluate a quadratic Bézier at `t`.
#[inline]
pub fn quadratic_point(p0: Point, c: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let d = t * t;
    Point::new(
        a * p0.x + b * c.x + d * p2.x,
        a * p0.y + b * c.y + d * p2.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_point() {
        let from = Point::new(3.0, 4.0);
        assert_eq!(
            PathCommand::HorizontalLineTo(9.0).end_point(from),
            Some(Point::new(9.0, 4.0))
        );
        assert_eq!(
            PathCommand::VerticalLineTo(-1.0).end_point(from),
            Some(Point::new(3.0, -1.0))
        );
        assert_eq!(PathCommand::ClosePath.end_point(from), None);
    }

    #[test]
    fn test_bezier_endpoints() {
        let p0 = Point::new(0.0, 0.0);
        let p3 = Point::new(10.0, 5.0);
        let c = Point::new(3.0, 9.0);
        assert_eq!(cubic_point(p0, c, c, p3, 0.0), p0);
        assert_eq!(cubic_point(p0, c, c, p3, 1.0), p3);
        assert_eq!(quadratic_point(p0, c, p3, 1.0), p3);
        assert_eq!(quadratic_point(p0, c, p3, 0.5), Point::new(4.0, 5.75));
    }
}
