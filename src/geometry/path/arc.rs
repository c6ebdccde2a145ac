//! Elliptical arc to cubic Bézier conversion.
//!
//! Endpoint parameterization is converted to center parameterization following
//! the SVG implementation notes (F.6.5/F.6.6), then the sweep is split into
//! pieces of at most 90° and each piece is approximated by one cubic.

use super::PathCommand;
use crate::geometry::Point;
use smallvec::SmallVec;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Arc parameters as written in path data, with an absolute end point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub rx: f64,
    pub ry: f64,
    /// Degrees
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub end: Point,
}

/// Center parameterization of an arc.
#[derive(Debug, Clone, Copy)]
struct Ellipse {
    center: Point,
    rx: f64,
    ry: f64,
    sin_phi: f64,
    cos_phi: f64,
}

impl Ellipse {
    fn point_at(&self, t: f64) -> Point {
        let (sin_t, cos_t) = t.sin_cos();
        Point::new(
            self.center.x + self.rx * cos_t * self.cos_phi - self.ry * sin_t * self.sin_phi,
            self.center.y + self.rx * cos_t * self.sin_phi + self.ry * sin_t * self.cos_phi,
        )
    }

    fn tangent_at(&self, t: f64) -> Point {
        let (sin_t, cos_t) = t.sin_cos();
        Point::new(
            -self.rx * sin_t * self.cos_phi - self.ry * cos_t * self.sin_phi,
            -self.rx * sin_t * self.sin_phi + self.ry * cos_t * self.cos_phi,
        )
    }
}

/// Signed angle from `u` to `v`.
fn angle_between(u: (f64, f64), v: (f64, f64)) -> f64 {
    let cross = u.0 * v.1 - u.1 * v.0;
    let dot = u.0 * v.0 + u.1 * v.1;
    cross.atan2(dot)
}

/// Endpoint to center conversion. Returns the ellipse (with radii already
/// scaled up if they were too small), start angle and sweep angle.
fn endpoint_to_center(from: Point, arc: &ArcSegment) -> (Ellipse, f64, f64) {
    let (sin_phi, cos_phi) = arc.x_axis_rotation.to_radians().sin_cos();
    let dx2 = (from.x - arc.end.x) / 2.0;
    let dy2 = (from.y - arc.end.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    let mut rx = arc.rx.abs();
    let mut ry = arc.ry.abs();
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let num = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
    let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let mut coef = if den > 0.0 { (num / den).max(0.0).sqrt() } else { 0.0 };
    if arc.large_arc == arc.sweep {
        coef = -coef;
    }
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    let center = Point::new(
        cos_phi * cxp - sin_phi * cyp + (from.x + arc.end.x) / 2.0,
        sin_phi * cxp + cos_phi * cyp + (from.y + arc.end.y) / 2.0,
    );

    let u = ((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = ((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let theta1 = angle_between((1.0, 0.0), u);
    let mut delta = angle_between(u, v);
    if !arc.sweep && delta > 0.0 {
        delta -= TAU;
    } else if arc.sweep && delta < 0.0 {
        delta += TAU;
    }

    (
        Ellipse {
            center,
            rx,
            ry,
            sin_phi,
            cos_phi,
        },
        theta1,
        delta,
    )
}

/// Convert an arc starting at `from` into cubic Bézier commands.
///
/// A zero radius degrades to a single `LineTo`; an arc whose end point equals
/// its start point draws nothing and yields no commands. The last command ends
/// exactly on `arc.end`.
pub fn arc_to_cubics(from: Point, arc: &ArcSegment) -> SmallVec<[PathCommand; 4]> {
    let mut out = SmallVec::new();

    if from == arc.end {
        return out;
    }
    if arc.rx == 0.0 || arc.ry == 0.0 {
        log::debug!("arc with radii ({}, {}) drawn as a line", arc.rx, arc.ry);
        out.push(PathCommand::LineTo(arc.end));
        return out;
    }

    let (ellipse, theta1, delta) = endpoint_to_center(from, arc);
    let segments = ((delta.abs() / FRAC_PI_2) - 1e-9).ceil().max(1.0) as usize;
    let step = delta / segments as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let mut start = from;
    for i in 0..segments {
        let t1 = theta1 + step * i as f64;
        let t2 = t1 + step;
        let d1 = ellipse.tangent_at(t1);
        let d2 = ellipse.tangent_at(t2);
        let end = if i + 1 == segments {
            arc.end
        } else {
            ellipse.point_at(t2)
        };
        let c1 = Point::new(start.x + k * d1.x, start.y + k * d1.y);
        let c2 = Point::new(end.x - k * d2.x, end.y - k * d2.y);
        out.push(PathCommand::CubicBezierTo { c1, c2, end });
        start = end;
    }

    out
}
