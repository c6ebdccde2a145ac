//! Axis-aligned bounding boxes.

use crate::geometry::Point;

/// Min/max extent of a point set.
///
/// An empty input has no extent and is represented explicitly; a single point
/// gives a zero-area box, which is valid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundingBox {
    #[default]
    Empty,
    Bounds { min: Point, max: Point },
}

impl BoundingBox {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        points
            .into_iter()
            .fold(Self::Empty, |bbox, &p| bbox.include(p))
    }

    /// Grow to contain `p`.
    pub fn include(self, p: Point) -> Self {
        match self {
            Self::Empty => Self::Bounds { min: p, max: p },
            Self::Bounds { min, max } => Self::Bounds {
                min: Point::new(min.x.min(p.x), min.y.min(p.y)),
                max: Point::new(max.x.max(p.x), max.y.max(p.y)),
            },
        }
    }

    pub fn union(self, other: BoundingBox) -> Self {
        match (self, other) {
            (Self::Empty, b) | (b, Self::Empty) => b,
            (Self::Bounds { min, max }, Self::Bounds { min: omin, max: omax }) => {
                Self::Bounds { min, max }.include(omin).include(omax)
            },
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn width(&self) -> f64 {
        match self {
            Self::Empty => 0.0,
            Self::Bounds { min, max } => max.x - min.x,
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            Self::Empty => 0.0,
            Self::Bounds { min, max } => max.y - min.y,
        }
    }

    /// Zero area (a point or a horizontal/vertical segment). Empty boxes count.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Top-left corner, origin when empty.
    pub fn origin(&self) -> Point {
        match self {
            Self::Empty => Point::default(),
            Self::Bounds { min, .. } => *min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let bbox = BoundingBox::from_points(&[] as &[Point]);
        assert!(bbox.is_empty());
        assert_eq!(bbox.width(), 0.0);
        assert!(bbox.is_degenerate());
    }

    #[test]
    fn test_single_point_degenerate() {
        let bbox = BoundingBox::from_points(&[Point::new(3.0, 4.0)]);
        assert_eq!(
            bbox,
            BoundingBox::Bounds {
                min: Point::new(3.0, 4.0),
                max: Point::new(3.0, 4.0)
            }
        );
        assert!(bbox.is_degenerate());
        assert!(!bbox.is_empty());
    }

    #[test]
    fn test_from_points_and_union() {
        let a = BoundingBox::from_points(&[Point::new(0.0, 5.0), Point::new(2.0, -1.0)]);
        let b = BoundingBox::from_points(&[Point::new(10.0, 3.0)]);
        let u = a.union(b);
        assert_eq!(u.width(), 10.0);
        assert_eq!(u.height(), 6.0);
        assert_eq!(u.origin(), Point::new(0.0, -1.0));
        assert_eq!(a.union(BoundingBox::Empty), a);
        assert_eq!(BoundingBox::Empty.union(b), b);
    }
}
