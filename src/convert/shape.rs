//! Per-shape geometry conversion.
//!
//! A shape's lengths are resolved against the viewport, its transform list is
//! pushed onto the caller's stack for the duration of the conversion, and its
//! path is flattened straight into EMU space. Quantization to integers happens
//! once, at the end.

use crate::common::error::{Checked, Error, Result, Warning};
use crate::common::options::ConversionOptions;
use crate::common::unit::{
    Axis, EMUS_PER_PX, UnitResolver, ViewportContext, emu_to_px, parse_length, quantize, quantize_to_grid,
};
use crate::geometry::path::{PathCache, PathCommand, Polyline, flatten_path};
use crate::geometry::{BoundingBox, Point, Transform, TransformStack};
use crate::ooxml::drawings::custgeom::{Outline, to_cust_geom_fragment};
use crate::ooxml::drawings::xfrm::Xfrm;
use rayon::prelude::*;
use std::sync::Arc;

/// Geometric attributes of one source shape, as written in the document.
///
/// A shape with `path_data` is converted from its path; otherwise `x`, `y`,
/// `width` and `height` describe a rectangle. Absent lengths count as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeInput {
    pub id: String,
    pub x: Option<String>,
    pub y: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub path_data: Option<String>,
    pub transform: Option<String>,
}

impl ShapeInput {
    pub fn path(id: impl Into<String>, path_data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path_data: Some(path_data.into()),
            ..Self::default()
        }
    }

    pub fn rect(
        id: impl Into<String>,
        x: impl Into<String>,
        y: impl Into<String>,
        width: impl Into<String>,
        height: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            x: Some(x.into()),
            y: Some(y.into()),
            width: Some(width.into()),
            height: Some(height.into()),
            ..Self::default()
        }
    }

    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }
}

/// Final geometry of one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGeometry {
    pub id: String,
    /// Quantized offset and extent
    pub xfrm: Xfrm,
    /// Unquantized bounds in EMU
    pub bounds: BoundingBox,
    /// Flattened subpaths in EMU, before quantization
    pub polylines: Vec<Polyline>,
    /// Quantized subpaths relative to the shape offset
    pub outlines: Vec<Outline>,
    pub xfrm_xml: String,
    pub cust_geom_xml: String,
}

/// Result of converting one shape in a batch.
#[derive(Debug)]
pub struct ShapeOutcome {
    pub id: String,
    pub result: Result<Checked<ShapeGeometry>>,
}

impl ShapeOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Converts shapes with one set of options and one viewport.
#[derive(Debug, Clone)]
pub struct ShapeConverter {
    options: ConversionOptions,
    viewport: ViewportContext,
    resolver: UnitResolver,
    paths: Arc<PathCache>,
}

impl ShapeConverter {
    /// Build a converter, validating the options and the viewport.
    ///
    /// A non-positive grid size is rejected. Unusable viewport fields are
    /// replaced by defaults with a warning, which is an error when warnings
    /// are fatal.
    pub fn new(options: ConversionOptions, viewport: ViewportContext) -> Result<Self> {
        if let Some(grid) = options.grid_size
            && grid <= 0
        {
            return Err(Error::InvalidGridSize(grid));
        }
        let checked = viewport.validated();
        for warning in &checked.warnings {
            log::warn!("{}", warning);
        }
        let viewport = if options.warnings_are_fatal {
            checked.into_strict()?
        } else {
            checked.value
        };
        Ok(Self {
            options,
            viewport,
            resolver: UnitResolver::default(),
            paths: Arc::new(PathCache::new()),
        })
    }

    pub fn with_resolver(mut self, resolver: UnitResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Share a parsed-path cache with other converters.
    pub fn with_path_cache(mut self, paths: Arc<PathCache>) -> Self {
        self.paths = paths;
        self
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn viewport(&self) -> &ViewportContext {
        &self.viewport
    }

    pub fn path_cache(&self) -> &Arc<PathCache> {
        &self.paths
    }

    /// User units to EMU.
    pub fn base_transform(&self) -> Transform {
        Transform::scale_uniform(EMUS_PER_PX as f64)
    }

    /// A fresh stack holding only [`Self::base_transform`].
    pub fn new_stack(&self) -> TransformStack {
        TransformStack::with_base(self.base_transform())
    }

    /// Convert one shape under the transforms already on `stack`.
    ///
    /// The shape's own transform is pushed for the duration of the call and
    /// popped on every return path.
    pub fn convert(&self, shape: &ShapeInput, stack: &mut TransformStack) -> Result<Checked<ShapeGeometry>> {
        let mut warnings = Vec::new();
        let mut scope = stack.scope();
        if let Some(list) = shape.transform.as_deref() {
            let transform = Transform::from_list(list)?.collect_into(&mut warnings);
            scope.push(transform);
        }
        let matrix = scope.current();

        let commands = match shape.path_data.as_deref() {
            Some(data) => self.paths.get_or_parse(data)?,
            None => self.rect_commands(shape, &mut warnings),
        };
        let polylines = flatten_path(&commands, &matrix, self.options.curve_samples).collect_into(&mut warnings);
        let bounds = polylines
            .iter()
            .fold(BoundingBox::Empty, |acc, line| acc.union(line.bounds()));

        let origin = bounds.origin();
        let xfrm = Xfrm::new(
            self.quantize_position(origin.x, &mut warnings)?,
            self.quantize_position(origin.y, &mut warnings)?,
            self.quantize_position(bounds.width(), &mut warnings)?,
            self.quantize_position(bounds.height(), &mut warnings)?,
        );
        let outlines = polylines
            .iter()
            .map(|line| self.outline(line, origin, &mut warnings))
            .collect::<Vec<_>>();

        for warning in &warnings {
            log::warn!("shape {}: {}", shape.id, warning);
        }
        if self.options.warnings_are_fatal
            && let Some(first) = warnings.first()
        {
            return Err(first.clone().into());
        }

        let cust_geom_xml = to_cust_geom_fragment(&outlines, xfrm.cx, xfrm.cy);
        Ok(Checked {
            value: ShapeGeometry {
                id: shape.id.clone(),
                xfrm_xml: xfrm.to_xml(),
                cust_geom_xml,
                xfrm,
                bounds,
                polylines,
                outlines,
            },
            warnings,
        })
    }

    /// Convert independent shapes, each on its own stack.
    ///
    /// A failing shape yields an error outcome; the others still convert.
    /// Output order follows input order whether or not the batch runs in
    /// parallel.
    pub fn convert_shapes(&self, shapes: &[ShapeInput]) -> Vec<ShapeOutcome> {
        let run = |shape: &ShapeInput| {
            let mut stack = self.new_stack();
            let result = self.convert(shape, &mut stack);
            if let Err(e) = &result {
                log::warn!("shape {} skipped: {}", shape.id, e);
            }
            ShapeOutcome {
                id: shape.id.clone(),
                result,
            }
        };
        if self.options.parallel {
            shapes.par_iter().map(run).collect()
        } else {
            shapes.iter().map(run).collect()
        }
    }

    fn length_px(&self, text: Option<&str>, axis: Axis, attribute: &str, warnings: &mut Vec<Warning>) -> f64 {
        let Some(text) = text else {
            return 0.0;
        };
        let emu = match parse_length(text) {
            Ok(length) if matches!(attribute, "width" | "height") => self
                .resolver
                .resolve_non_negative(&length, &self.viewport, axis, attribute),
            Ok(length) => self.resolver.resolve(&length, &self.viewport, axis),
            Err(_) => self.resolver.resolve_str(text, &self.viewport, axis),
        };
        emu_to_px(emu.collect_into(warnings))
    }

    fn rect_commands(&self, shape: &ShapeInput, warnings: &mut Vec<Warning>) -> Arc<[PathCommand]> {
        let x = self.length_px(shape.x.as_deref(), Axis::X, "x", warnings);
        let y = self.length_px(shape.y.as_deref(), Axis::Y, "y", warnings);
        let w = self.length_px(shape.width.as_deref(), Axis::X, "width", warnings);
        let h = self.length_px(shape.height.as_deref(), Axis::Y, "height", warnings);
        Arc::from([
            PathCommand::MoveTo(Point::new(x, y)),
            PathCommand::LineTo(Point::new(x + w, y)),
            PathCommand::LineTo(Point::new(x + w, y + h)),
            PathCommand::LineTo(Point::new(x, y + h)),
            PathCommand::ClosePath,
        ])
    }

    fn quantize_position(&self, value: f64, warnings: &mut Vec<Warning>) -> Result<i64> {
        match self.options.grid_size {
            Some(grid) => Ok(quantize_to_grid(value, grid)?.collect_into(warnings)),
            None => Ok(quantize(value, self.options.precision).collect_into(warnings)),
        }
    }

    fn outline(&self, line: &Polyline, origin: Point, warnings: &mut Vec<Warning>) -> Outline {
        let points = line
            .points
            .iter()
            .map(|p| {
                (
                    quantize(p.x - origin.x, self.options.precision).collect_into(warnings),
                    quantize(p.y - origin.y, self.options.precision).collect_into(warnings),
                )
            })
            .collect();
        Outline::new(points, line.closed)
    }
}

/// Convert a batch with fresh converter state.
pub fn convert_shapes(
    shapes: &[ShapeInput],
    options: &ConversionOptions,
    viewport: ViewportContext,
) -> Result<Vec<ShapeOutcome>> {
    let converter = ShapeConverter::new(options.clone(), viewport)?;
    Ok(converter.convert_shapes(shapes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::unit::{EMUS_PER_INCH, PrecisionMode};
    use proptest::prelude::*;

    const PX: i64 = EMUS_PER_PX;

    fn converter() -> ShapeConverter {
        ShapeConverter::new(ConversionOptions::default(), ViewportContext::default()).unwrap()
    }

    #[test]
    fn test_square_path() {
        let c = converter();
        let mut stack = c.new_stack();
        let geometry = c
            .convert(&ShapeInput::path("sq", "M0,0 L10,0 L10,10 L0,10 Z"), &mut stack)
            .unwrap();
        assert!(geometry.is_clean());
        let g = geometry.value;
        assert_eq!(g.xfrm, Xfrm::new(0, 0, 10 * PX, 10 * PX));
        assert_eq!(g.outlines.len(), 1);
        assert!(g.outlines[0].closed);
        assert_eq!(g.outlines[0].points[2], (10 * PX, 10 * PX));
        assert!(g.xfrm_xml.contains(&format!(r#"cx="{}""#, 10 * PX)));
        assert!(g.cust_geom_xml.contains("<a:close/>"));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_rect_with_units_and_transform() {
        let c = converter();
        let mut stack = c.new_stack();
        let shape = ShapeInput::rect("r", "1in", "0", "2in", "50%").with_transform("translate(96 0)");
        let g = c.convert(&shape, &mut stack).unwrap().value;
        // 1in offset plus a 96px (1in) translation
        assert_eq!(g.xfrm.x, 2 * EMUS_PER_INCH);
        assert_eq!(g.xfrm.cx, 2 * EMUS_PER_INCH);
        assert_eq!(g.xfrm.cy, 300 * PX);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_nested_transforms_compose_under_outer_scope() {
        let c = converter();
        let mut stack = c.new_stack();
        let mut group = stack.scope();
        group.push(Transform::scale_uniform(2.0));
        let g = c
            .convert(&ShapeInput::path("p", "M1 1 L2 2").with_transform("translate(1,1)"), &mut group)
            .unwrap()
            .value;
        assert_eq!(g.xfrm, Xfrm::new(4 * PX, 4 * PX, 2 * PX, 2 * PX));
        assert_eq!(group.depth(), 2);
        drop(group);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_invalid_path_leaves_stack_balanced() {
        let c = converter();
        let mut stack = c.new_stack();
        let shape = ShapeInput::path("bad", "M0 0 L").with_transform("rotate(45)");
        let err = c.convert(&shape, &mut stack).unwrap_err();
        assert!(matches!(err, Error::InvalidPathData { .. }));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_batch_scopes_failures() {
        let shapes = vec![
            ShapeInput::path("a", "M0 0 L10 10"),
            ShapeInput::path("b", "L 5 5"),
            ShapeInput::rect("c", "0", "0", "4", "4"),
        ];
        for parallel in [false, true] {
            let options = ConversionOptions::default().with_parallel(parallel);
            let outcomes = convert_shapes(&shapes, &options, ViewportContext::default()).unwrap();
            let ids: Vec<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
            assert_eq!(ids, vec!["a", "b", "c"]);
            assert!(outcomes[0].is_ok());
            assert!(matches!(outcomes[1].result, Err(Error::InvalidPathData { .. })));
            assert!(outcomes[2].is_ok());
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let shapes: Vec<_> = (0..24)
            .map(|i| {
                ShapeInput::path(format!("s{}", i), "M0 0 C 10 0 10 10 0 10 A 5 5 0 0 1 0 0 Z")
                    .with_transform(format!("rotate({}) scale(1.5)", i * 15))
            })
            .collect();
        let run = |parallel| {
            let options = ConversionOptions::default().with_parallel(parallel);
            convert_shapes(&shapes, &options, ViewportContext::default())
                .unwrap()
                .into_iter()
                .map(|o| o.result.unwrap().value)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(false), run(true));
    }

    #[test]
    fn test_malformed_and_negative_lengths_warn() {
        let c = converter();
        let mut stack = c.new_stack();
        let shape = ShapeInput::rect("r", "abc", "0", "-5", "10");
        let checked = c.convert(&shape, &mut stack).unwrap();
        assert!(checked.warnings.iter().any(|w| matches!(w, Warning::MalformedLengthDefaulted { .. })));
        assert!(checked.warnings.iter().any(|w| matches!(w, Warning::NegativeClamped { .. })));
        assert_eq!(checked.value.xfrm.cx, 0);
    }

    #[test]
    fn test_fatal_warnings() {
        let options = ConversionOptions::default().with_warnings_fatal(true);
        let c = ShapeConverter::new(options, ViewportContext::default()).unwrap();
        let mut stack = c.new_stack();
        let err = c
            .convert(&ShapeInput::rect("r", "0", "0", "-1", "1"), &mut stack)
            .unwrap_err();
        assert!(matches!(err, Error::Promoted(_)));
        assert_eq!(stack.depth(), 1);

        let bad_viewport = ViewportContext::new(f64::NAN, 600.0);
        let fatal = ConversionOptions::default().with_warnings_fatal(true);
        assert!(ShapeConverter::new(fatal, bad_viewport).is_err());
        assert!(ShapeConverter::new(ConversionOptions::default(), bad_viewport).is_ok());
    }

    #[test]
    fn test_standard_and_subpixel_round_once() {
        let shape = ShapeInput::path("c", "M 0.3 0.3 C 10.1 0.2 10.4 10.6 0.2 10.7 Z").with_transform("rotate(17)");
        let run = |precision| {
            let options = ConversionOptions::default().with_precision(precision);
            let c = ShapeConverter::new(options, ViewportContext::default()).unwrap();
            c.convert(&shape, &mut c.new_stack()).unwrap().value
        };
        let standard = run(PrecisionMode::Standard);
        let subpixel = run(PrecisionMode::Subpixel);
        assert_eq!(standard.xfrm, subpixel.xfrm);
        assert_eq!(standard.outlines, subpixel.outlines);
    }

    #[test]
    fn test_overflowing_path_warns_and_promotes() {
        let shape = ShapeInput::path("huge", "M 0 0 L 1e306 1e306");
        let options = ConversionOptions::default().with_grid_size(Some(9525));
        let c = ShapeConverter::new(options, ViewportContext::default()).unwrap();
        let checked = c.convert(&shape, &mut c.new_stack()).unwrap();
        assert!(checked.warnings.iter().any(|w| matches!(w, Warning::NonFiniteClamped { .. })));
        assert_eq!(checked.value.xfrm.cx % 9525, 0);

        let fatal = ConversionOptions::default().with_warnings_fatal(true);
        let c = ShapeConverter::new(fatal, ViewportContext::default()).unwrap();
        let err = c.convert(&shape, &mut c.new_stack()).unwrap_err();
        assert!(matches!(err, Error::NonFiniteValue(_)));
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let options = ConversionOptions::default().with_grid_size(Some(0));
        assert!(matches!(
            ShapeConverter::new(options, ViewportContext::default()),
            Err(Error::InvalidGridSize(0))
        ));
    }

    #[test]
    fn test_path_cache_shared() {
        let cache = Arc::new(PathCache::new());
        let c = converter().with_path_cache(Arc::clone(&cache));
        let shapes = vec![ShapeInput::path("a", "M0 0 H 5"), ShapeInput::path("b", "M0 0 H 5")];
        c.convert_shapes(&shapes);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_precision_modes_agree_on_integers() {
        for precision in [PrecisionMode::Standard, PrecisionMode::Subpixel, PrecisionMode::Ultra] {
            let options = ConversionOptions::default().with_precision(precision);
            let c = ShapeConverter::new(options, ViewportContext::default()).unwrap();
            let mut stack = c.new_stack();
            let g = c.convert(&ShapeInput::path("p", "M1 2 L3 4"), &mut stack).unwrap().value;
            assert_eq!(g.xfrm, Xfrm::new(PX, 2 * PX, 2 * PX, 2 * PX));
        }
    }

    proptest! {
        #[test]
        fn prop_grid_snaps_offsets(x in -1000.0f64..1000.0, y in -1000.0f64..1000.0, grid in 1i64..100_000) {
            let options = ConversionOptions::default().with_grid_size(Some(grid));
            let c = ShapeConverter::new(options, ViewportContext::default()).unwrap();
            let mut stack = c.new_stack();
            let shape = ShapeInput::path("p", format!("M{} {} l 3 4", x, y));
            let g = c.convert(&shape, &mut stack).unwrap().value;
            prop_assert_eq!(g.xfrm.x % grid, 0);
            prop_assert_eq!(g.xfrm.y % grid, 0);
            prop_assert_eq!(g.xfrm.cx % grid, 0);
            prop_assert_eq!(g.xfrm.cy % grid, 0);
        }

        #[test]
        fn prop_extents_non_negative(w in -50.0f64..500.0, h in -50.0f64..500.0) {
            let c = converter();
            let mut stack = c.new_stack();
            let shape = ShapeInput::rect("r", "0", "0", format!("{}", w), format!("{}", h));
            let g = c.convert(&shape, &mut stack).unwrap().value;
            prop_assert!(g.xfrm.cx >= 0);
            prop_assert!(g.xfrm.cy >= 0);
        }
    }
}
