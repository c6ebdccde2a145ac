//! Curve flattening at a fixed sample count.

use super::arc::arc_to_cubics;
use super::{PathCommand, cubic_point, quadratic_point};
use crate::common::error::{Checked, Warning};
use crate::geometry::{BoundingBox, Point, Transform};
use smallvec::{SmallVec, smallvec};

/// One flattened subpath in target space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polyline {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points)
    }
}

/// Points contributed by one command, in target space.
///
/// `from` is the current point before the command and `subpath_start` the
/// point `ClosePath` returns to, both untransformed. Straight segments give
/// their two end points, curves give `samples + 1` points at evenly spaced
/// parameters (`samples` is at least 1), `MoveTo` gives its single point.
pub fn flatten(
    command: &PathCommand,
    from: Point,
    subpath_start: Point,
    transform: &Transform,
    samples: usize,
) -> SmallVec<[Point; 2]> {
    let samples = samples.max(1);
    let sample_curve = |eval: &dyn Fn(f64) -> Point| -> SmallVec<[Point; 2]> {
        (0..=samples)
            .map(|i| transform.apply_to_point(eval(i as f64 / samples as f64)))
            .collect()
    };
    let line = |to: Point| -> SmallVec<[Point; 2]> {
        smallvec![transform.apply_to_point(from), transform.apply_to_point(to)]
    };

    match *command {
        PathCommand::MoveTo(p) => smallvec![transform.apply_to_point(p)],
        PathCommand::LineTo(p) => line(p),
        PathCommand::HorizontalLineTo(x) => line(Point::new(x, from.y)),
        PathCommand::VerticalLineTo(y) => line(Point::new(from.x, y)),
        PathCommand::ClosePath => line(subpath_start),
        PathCommand::CubicBezierTo { c1, c2, end } | PathCommand::SmoothCubicTo { c1, c2, end } => {
            sample_curve(&|t| cubic_point(from, c1, c2, end, t))
        },
        PathCommand::QuadraticBezierTo { c, end } | PathCommand::SmoothQuadraticTo { c, end } => {
            sample_curve(&|t| quadratic_point(from, c, end, t))
        },
        PathCommand::ArcTo(arc) => {
            let mut points: SmallVec<[Point; 2]> = smallvec![transform.apply_to_point(from)];
            let mut start = from;
            for piece in arc_to_cubics(from, &arc) {
                let flattened = flatten(&piece, start, subpath_start, transform, samples);
                points.extend(flattened.into_iter().skip(1));
                start = piece.end_point(start).unwrap_or(start);
            }
            points
        },
    }
}

/// Flatten a whole command list, one [`Polyline`] per subpath.
///
/// `ClosePath` marks the polyline closed and, unless the current point already
/// sits on the subpath start, appends the start point. Non-finite points
/// (from overflowing transforms) are clamped to 0 with a warning.
pub fn flatten_path(commands: &[PathCommand], transform: &Transform, samples: usize) -> Checked<Vec<Polyline>> {
    let mut polylines = Vec::new();
    let mut warnings = Vec::new();
    let mut current_line = Polyline::default();
    let mut current = Point::default();
    let mut subpath_start = Point::default();

    for command in commands {
        match command {
            PathCommand::MoveTo(p) => {
                finish_polyline(&mut current_line, &mut polylines);
                current = *p;
                subpath_start = *p;
                let point = clamp_finite(transform.apply_to_point(*p), &mut warnings);
                current_line.points.push(point);
            },
            PathCommand::ClosePath => {
                if current_line.points.len() > 1 && current != subpath_start {
                    let point = clamp_finite(transform.apply_to_point(subpath_start), &mut warnings);
                    current_line.points.push(point);
                }
                if !current_line.points.is_empty() {
                    current_line.closed = true;
                }
                finish_polyline(&mut current_line, &mut polylines);
                current = subpath_start;
            },
            _ => {
                let points = flatten(command, current, subpath_start, transform, samples);
                let skip = usize::from(!current_line.points.is_empty());
                for point in points.into_iter().skip(skip) {
                    current_line.points.push(clamp_finite(point, &mut warnings));
                }
                current = command.end_point(current).unwrap_or(current);
            },
        }
    }
    finish_polyline(&mut current_line, &mut polylines);

    Checked {
        value: polylines,
        warnings,
    }
}

fn finish_polyline(line: &mut Polyline, polylines: &mut Vec<Polyline>) {
    if !line.points.is_empty() {
        polylines.push(std::mem::take(line));
    }
}

fn clamp_finite(p: Point, warnings: &mut Vec<Warning>) -> Point {
    if p.is_finite() {
        return p;
    }
    warnings.push(Warning::NonFiniteClamped {
        context: "flattened path point".to_string(),
    });
    let fix = |v: f64| if v.is_finite() { v } else { 0.0 };
    Point::new(fix(p.x), fix(p.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::options::DEFAULT_CURVE_SAMPLES;
    use crate::geometry::path::parse;

    #[test]
    fn test_square_bounds() {
        let cmds = parse("M0,0 L10,0 L10,10 Z").unwrap();
        let result = flatten_path(&cmds, &Transform::identity(), DEFAULT_CURVE_SAMPLES);
        assert!(result.is_clean());
        let lines = result.value;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].closed);
        assert_eq!(lines[0].points.len(), 4);
        assert_eq!(lines[0].points.last(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(
            lines[0].bounds(),
            BoundingBox::Bounds {
                min: Point::new(0.0, 0.0),
                max: Point::new(10.0, 10.0)
            }
        );
    }

    #[test]
    fn test_line_gives_two_points_curve_gives_samples() {
        let t = Transform::identity();
        let from = Point::new(0.0, 0.0);
        let line = flatten(&PathCommand::LineTo(Point::new(1.0, 1.0)), from, from, &t, 48);
        assert_eq!(line.len(), 2);
        let curve = PathCommand::CubicBezierTo {
            c1: Point::new(0.0, 10.0),
            c2: Point::new(10.0, 10.0),
            end: Point::new(10.0, 0.0),
        };
        let pts = flatten(&curve, from, from, &t, 48);
        assert_eq!(pts.len(), 49);
        assert_eq!(pts[0], from);
        assert_eq!(pts[48], Point::new(10.0, 0.0));
        assert_eq!(flatten(&curve, from, from, &t, 0).len(), 2);
    }

    #[test]
    fn test_transform_applied() {
        let cmds = parse("M1 1 L2 1").unwrap();
        let lines = flatten_path(&cmds, &Transform::scale_uniform(9525.0), 48).value;
        assert_eq!(lines[0].points, vec![Point::new(9525.0, 9525.0), Point::new(19050.0, 9525.0)]);
    }

    #[test]
    fn test_subpaths_flattened_independently() {
        let cmds = parse("M0 0 L1 0 L1 1 Z M5 5 L6 6").unwrap();
        let lines = flatten_path(&cmds, &Transform::identity(), 48).value;
        assert_eq!(lines.len(), 2);
        assert!(lines[0].closed);
        assert!(!lines[1].closed);
        assert_eq!(lines[1].points, vec![Point::new(5.0, 5.0), Point::new(6.0, 6.0)]);
    }

    #[test]
    fn test_close_on_start_adds_no_point() {
        let cmds = parse("M0 0 L5 0 L0 0 Z").unwrap();
        let lines = flatten_path(&cmds, &Transform::identity(), 48).value;
        assert_eq!(lines[0].points.len(), 3);
        assert!(lines[0].closed);
    }

    #[test]
    fn test_single_point_path() {
        let cmds = parse("M5 5").unwrap();
        let lines = flatten_path(&cmds, &Transform::identity(), 48).value;
        assert_eq!(lines.len(), 1);
        assert!(lines[0].bounds().is_degenerate());
    }

    #[test]
    fn test_unexpanded_arc_flattens() {
        use crate::geometry::path::{ParseOptions, parse_with};
        let cmds = parse_with("M0 0 A10 10 0 0 1 20 0", ParseOptions { expand_arcs: false }).unwrap();
        let lines = flatten_path(&cmds, &Transform::identity(), 8).value;
        // two quarter arcs of 8 samples each, shared join point
        assert_eq!(lines[0].points.len(), 17);
        assert_eq!(lines[0].points.last(), Some(&Point::new(20.0, 0.0)));
    }

    #[test]
    fn test_non_finite_clamped() {
        let cmds = parse("M1 1 L2 2").unwrap();
        let result = flatten_path(&cmds, &Transform::scale_uniform(f64::INFINITY), 48);
        assert!(!result.is_clean());
        assert!(result.value[0].points.iter().all(Point::is_finite));
    }
}
