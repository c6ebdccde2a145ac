//! 2D affine transforms.
//!
//! A [`Transform`] is the 3×3 matrix
//!
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```
//!
//! applied to column vectors (`p' = M · p`). Chained transform lists compose
//! in source order: `"T1 T2 … Tn"` becomes `T1 · T2 · … · Tn`, so the last
//! listed operation touches the point first.

use crate::common::error::{Checked, Error, Result, Warning};
use crate::geometry::Point;
use smallvec::SmallVec;
use std::fmt;

/// Affine transform with an implicit `[0, 0, 1]` bottom row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Translation, scale and rotation extracted from a [`Transform`].
///
/// Skew is not extracted and always reported as 0; a sheared matrix
/// decomposes to the nearest rotation and per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposition {
    pub tx: f64,
    pub ty: f64,
    pub sx: f64,
    /// Negative when the transform contains a reflection
    pub sy: f64,
    /// Radians, in `(-π, π]`
    pub rotation: f64,
    pub skew_x: f64,
    pub skew_y: f64,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self::from_matrix(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Build from the six affine coefficients `[[a, c, e], [b, d, f]]`.
    #[inline]
    pub const fn from_matrix(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    #[inline]
    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self::from_matrix(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    #[inline]
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::from_matrix(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    #[inline]
    pub const fn scale_uniform(s: f64) -> Self {
        Self::scale(s, s)
    }

    /// Rotation about the origin, angle in radians.
    #[inline]
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_matrix(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Rotation about `(cx, cy)`: `T(c) · R · T(-c)`.
    pub fn rotate_about(angle: f64, cx: f64, cy: f64) -> Self {
        Self::translate(cx, cy)
            .compose(&Self::rotate(angle))
            .compose(&Self::translate(-cx, -cy))
    }

    /// Horizontal skew, angle in radians.
    #[inline]
    pub fn skew_x(angle: f64) -> Self {
        Self::from_matrix(1.0, 0.0, angle.tan(), 1.0, 0.0, 0.0)
    }

    /// Vertical skew, angle in radians.
    #[inline]
    pub fn skew_y(angle: f64) -> Self {
        Self::from_matrix(1.0, angle.tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// The coefficients `[a, b, c, d, e, f]`.
    #[inline]
    pub fn coefficients(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Matrix product `self · other`.
    ///
    /// Applying the result to a point equals applying `other` first, then
    /// `self`.
    pub fn compose(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Inverse transform, `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<Transform> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Transform {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    #[inline]
    pub fn apply_to_point(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// Apply to every point; identical to calling [`apply_to_point`] per element.
    ///
    /// [`apply_to_point`]: Transform::apply_to_point
    pub fn apply_to_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.apply_to_point(p)).collect()
    }

    /// Split into translation, rotation and per-axis scale.
    ///
    /// Translation comes straight from the third column. The linear part goes
    /// through a closed-form 2×2 singular value decomposition
    /// `M = R(φ) · diag(σ1, σ2) · R(θ)`; the rotation is the orthogonal
    /// factor `R(φ + θ)` and the scales are the diagonal of the remaining
    /// symmetric stretch. A negative determinant is handled by factoring out
    /// a y-reflection first and reporting it as a negative `sy`.
    pub fn decompose(&self) -> Decomposition {
        let reflected = self.determinant() < 0.0;
        let (a, b) = (self.a, self.b);
        let (c, d) = if reflected {
            (-self.c, -self.d)
        } else {
            (self.c, self.d)
        };

        let e = (a + d) / 2.0;
        let f = (a - d) / 2.0;
        let g = (b + c) / 2.0;
        let h = (b - c) / 2.0;
        let q = e.hypot(h);
        let r = f.hypot(g);
        let (sigma1, sigma2) = (q + r, q - r);

        let a1 = g.atan2(f);
        let a2 = h.atan2(e);
        let theta = (a2 - a1) / 2.0;
        let (sin_t, cos_t) = theta.sin_cos();

        let sx = sigma1 * cos_t * cos_t + sigma2 * sin_t * sin_t;
        let sy = sigma1 * sin_t * sin_t + sigma2 * cos_t * cos_t;

        Decomposition {
            tx: self.e,
            ty: self.f,
            sx,
            sy: if reflected { -sy } else { sy },
            rotation: a2,
            skew_x: 0.0,
            skew_y: 0.0,
        }
    }

    /// Build a transform from one transform-list operation.
    ///
    /// Arguments follow SVG: angles in degrees, `translate(tx)` means
    /// `ty = 0`, `scale(s)` means `sy = sx`, `rotate(a, cx, cy)` rotates about
    /// `(cx, cy)`. Non-finite arguments are replaced by 0 with a warning.
    pub fn from_op(op: TransformOp, args: &[f64]) -> Result<Checked<Transform>> {
        let mut warnings = Vec::new();
        let args: SmallVec<[f64; 6]> = args
            .iter()
            .map(|&v| {
                if v.is_finite() {
                    v
                } else {
                    warnings.push(Warning::NonFiniteClamped {
                        context: format!("{} argument", op),
                    });
                    0.0
                }
            })
            .collect();

        let transform = match (op, args.as_slice()) {
            (TransformOp::Matrix, &[a, b, c, d, e, f]) => Transform::from_matrix(a, b, c, d, e, f),
            (TransformOp::Translate, &[tx]) => Transform::translate(tx, 0.0),
            (TransformOp::Translate, &[tx, ty]) => Transform::translate(tx, ty),
            (TransformOp::Scale, &[s]) => Transform::scale_uniform(s),
            (TransformOp::Scale, &[sx, sy]) => Transform::scale(sx, sy),
            (TransformOp::Rotate, &[deg]) => Transform::rotate(deg.to_radians()),
            (TransformOp::Rotate, &[deg, cx, cy]) => Transform::rotate_about(deg.to_radians(), cx, cy),
            (TransformOp::SkewX, &[deg]) => Transform::skew_x(deg.to_radians()),
            (TransformOp::SkewY, &[deg]) => Transform::skew_y(deg.to_radians()),
            (op, args) => {
                return Err(Error::InvalidTransform(format!(
                    "{} does not take {} argument(s)",
                    op,
                    args.len()
                )));
            },
        };

        Ok(Checked {
            value: transform,
            warnings,
        })
    }

    /// Parse and compose an SVG transform list in source order.
    ///
    /// ```
    /// use svgdml::geometry::{Point, Transform};
    ///
    /// let t = Transform::from_list("translate(10, 0) scale(2)").unwrap().value;
    /// assert_eq!(t.apply_to_point(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
    /// ```
    pub fn from_list(text: &str) -> Result<Checked<Transform>> {
        let mut result = Checked::clean(Transform::identity());
        for (op, args) in parse_transform_list(text)? {
            let next = Transform::from_op(op, &args)?;
            result = result.and_then(|acc| next.map(|t| acc.compose(&t)));
        }
        Ok(result)
    }
}

/// Transform-list operation names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformOp {
    Matrix,
    Translate,
    Scale,
    Rotate,
    SkewX,
    SkewY,
}

impl TransformOp {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "matrix" => Some(Self::Matrix),
            "translate" => Some(Self::Translate),
            "scale" => Some(Self::Scale),
            "rotate" => Some(Self::Rotate),
            "skewX" => Some(Self::SkewX),
            "skewY" => Some(Self::SkewY),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matrix => "matrix",
            Self::Translate => "translate",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
            Self::SkewX => "skewX",
            Self::SkewY => "skewY",
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split an SVG transform list into `(operation, arguments)` pairs.
pub fn parse_transform_list(text: &str) -> Result<Vec<(TransformOp, SmallVec<[f64; 6]>)>> {
    let mut ops = Vec::new();
    let mut rest = text.trim_start_matches(is_list_separator);

    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| Error::InvalidTransform(format!("missing '(' in '{}'", text)))?;
        let name = rest[..open].trim();
        let op = TransformOp::from_name(name)
            .ok_or_else(|| Error::InvalidTransform(format!("unknown operation '{}'", name)))?;
        let close = rest[open..]
            .find(')')
            .map(|i| open + i)
            .ok_or_else(|| Error::InvalidTransform(format!("missing ')' after '{}'", name)))?;

        let mut args = SmallVec::new();
        let mut inner = rest[open + 1..close].trim_start_matches(is_list_separator);
        while !inner.is_empty() {
            let (value, consumed) = fast_float2::parse_partial::<f64, _>(inner).map_err(|_| {
                Error::InvalidTransform(format!("bad argument '{}' for {}", inner, name))
            })?;
            args.push(value);
            inner = inner[consumed..].trim_start_matches(is_list_separator);
        }

        ops.push((op, args));
        rest = rest[close + 1..].trim_start_matches(is_list_separator);
    }

    Ok(ops)
}

#[inline]
fn is_list_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == ','
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_point_eq(p: Point, q: Point, eps: f64) {
        assert!(
            (p.x - q.x).abs() < eps && (p.y - q.y).abs() < eps,
            "{:?} != {:?}",
            p,
            q
        );
    }

    #[test]
    fn test_translate_scale_rotate() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(Transform::translate(3.0, 4.0).apply_to_point(p), Point::new(4.0, 6.0));
        assert_eq!(Transform::scale(2.0, 3.0).apply_to_point(p), Point::new(2.0, 6.0));
        assert_point_eq(Transform::rotate(FRAC_PI_2).apply_to_point(p), Point::new(-2.0, 1.0), 1e-12);
    }

    #[test]
    fn test_rotate_about_center_fixes_center() {
        let t = Transform::rotate_about(1.1, 5.0, -3.0);
        assert_point_eq(t.apply_to_point(Point::new(5.0, -3.0)), Point::new(5.0, -3.0), 1e-12);
        assert_point_eq(
            Transform::rotate_about(PI, 1.0, 1.0).apply_to_point(Point::new(2.0, 1.0)),
            Point::new(0.0, 1.0),
            1e-12,
        );
    }

    #[test]
    fn test_compose_order() {
        // translate then scale in source order: scale touches the point first
        let t = Transform::translate(10.0, 0.0).compose(&Transform::scale_uniform(2.0));
        assert_eq!(t.apply_to_point(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
        let u = Transform::scale_uniform(2.0).compose(&Transform::translate(10.0, 0.0));
        assert_eq!(u.apply_to_point(Point::new(1.0, 1.0)), Point::new(22.0, 2.0));
    }

    #[test]
    fn test_identity_compose_is_noop() {
        let t = Transform::from_matrix(1.5, -0.25, 0.75, 2.0, 3.0, -4.0);
        assert_eq!(t.compose(&Transform::identity()), t);
        assert_eq!(Transform::identity().compose(&t), t);
    }

    #[test]
    fn test_inverse() {
        let t = Transform::from_matrix(2.0, 1.0, -1.0, 3.0, 5.0, 7.0);
        let inv = t.inverse().unwrap();
        assert_point_eq(
            inv.apply_to_point(t.apply_to_point(Point::new(3.0, -2.0))),
            Point::new(3.0, -2.0),
            1e-12,
        );
        assert!(Transform::scale(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn test_apply_to_points_empty() {
        assert!(Transform::rotate(0.3).apply_to_points(&[]).is_empty());
    }

    #[test]
    fn test_decompose_translate_rotate_scale() {
        let t = Transform::translate(5.0, 7.0)
            .compose(&Transform::rotate(0.3))
            .compose(&Transform::scale(2.0, 3.0));
        let d = t.decompose();
        assert!((d.tx - 5.0).abs() < 1e-12);
        assert!((d.ty - 7.0).abs() < 1e-12);
        assert!((d.rotation - 0.3).abs() < 1e-9, "rotation {}", d.rotation);
        assert!((d.sx - 2.0).abs() < 1e-9, "sx {}", d.sx);
        assert!((d.sy - 3.0).abs() < 1e-9, "sy {}", d.sy);
        assert_eq!(d.skew_x, 0.0);
        assert_eq!(d.skew_y, 0.0);
    }

    #[test]
    fn test_decompose_reflection() {
        let t = Transform::rotate(-0.7).compose(&Transform::scale(1.5, -2.5));
        let d = t.decompose();
        assert!((d.rotation + 0.7).abs() < 1e-9);
        assert!((d.sx - 1.5).abs() < 1e-9);
        assert!((d.sy + 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_decompose_uniform_and_singular() {
        let d = Transform::scale_uniform(4.0).decompose();
        assert!((d.sx - 4.0).abs() < 1e-12 && (d.sy - 4.0).abs() < 1e-12);
        assert_eq!(d.rotation, 0.0);

        let d = Transform::scale(0.0, 0.0).decompose();
        assert_eq!((d.sx, d.sy), (0.0, 0.0));
    }

    #[test]
    fn test_parse_transform_list() {
        let ops = parse_transform_list("translate(10,20) rotate(45 5 5), scale(2)").unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].0, TransformOp::Translate);
        assert_eq!(ops[0].1.as_slice(), &[10.0, 20.0]);
        assert_eq!(ops[1].1.as_slice(), &[45.0, 5.0, 5.0]);
        assert_eq!(ops[2].1.as_slice(), &[2.0]);
        assert!(parse_transform_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_transform_list_errors() {
        assert!(matches!(parse_transform_list("shear(1)"), Err(Error::InvalidTransform(_))));
        assert!(matches!(parse_transform_list("scale(1"), Err(Error::InvalidTransform(_))));
        assert!(matches!(parse_transform_list("scale(x)"), Err(Error::InvalidTransform(_))));
        assert!(matches!(Transform::from_list("rotate(1 2)"), Err(Error::InvalidTransform(_))));
    }

    #[test]
    fn test_from_list_matches_manual_composition() {
        let parsed = Transform::from_list("matrix(1 0 0 1 3 4) rotate(90) skewX(0)").unwrap();
        assert!(parsed.is_clean());
        let manual = Transform::translate(3.0, 4.0).compose(&Transform::rotate(FRAC_PI_2));
        let p = Point::new(2.0, 1.0);
        assert_point_eq(parsed.value.apply_to_point(p), manual.apply_to_point(p), 1e-12);
    }

    #[test]
    fn test_from_op_non_finite_clamped() {
        let result = Transform::from_op(TransformOp::Translate, &[f64::NAN, 2.0]).unwrap();
        assert_eq!(result.value, Transform::translate(0.0, 2.0));
        assert_eq!(result.warnings.len(), 1);
    }

    fn transform_strategy() -> impl Strategy<Value = Transform> {
        prop::array::uniform6(-100.0f64..100.0)
            .prop_map(|[a, b, c, d, e, f]| Transform::from_matrix(a, b, c, d, e, f))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_composition_law(
            a in transform_strategy(),
            b in transform_strategy(),
            x in -100.0f64..100.0,
            y in -100.0f64..100.0,
        ) {
            let p = Point::new(x, y);
            let lhs = a.compose(&b).apply_to_point(p);
            let rhs = a.apply_to_point(b.apply_to_point(p));
            // relative to the magnitude of the terms summed for B·p, then A·(B·p)
            let max_abs = |t: &Transform| t.coefficients().iter().fold(0.0f64, |m, v| m.max(v.abs()));
            let inner = max_abs(&b) * (x.abs() + y.abs() + 1.0);
            let scale = 1.0 + max_abs(&a) * (inner + 1.0);
            prop_assert!((lhs.x - rhs.x).abs() <= 1e-9 * scale);
            prop_assert!((lhs.y - rhs.y).abs() <= 1e-9 * scale);
        }

        #[test]
        fn prop_batch_matches_single(
            t in transform_strategy(),
            points in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 0..32),
        ) {
            let points: Vec<Point> = points.into_iter().map(Point::from).collect();
            let batch = t.apply_to_points(&points);
            prop_assert_eq!(batch.len(), points.len());
            for (p, q) in points.iter().zip(batch.iter()) {
                prop_assert_eq!(t.apply_to_point(*p), *q);
            }
        }

        #[test]
        fn prop_compose_associative(
            a in transform_strategy(),
            b in transform_strategy(),
            c in transform_strategy(),
        ) {
            let left = a.compose(&b).compose(&c).coefficients();
            let right = a.compose(&b.compose(&c)).coefficients();
            for (l, r) in left.iter().zip(right.iter()) {
                prop_assert!((l - r).abs() <= 1e-9 * (1.0 + l.abs().max(r.abs())));
            }
        }
    }
}
