//! Shape-level entry points.
//!
//! A [`Generator`] resolves per-call [`Options`] against its defaults, then
//! builds a [`Drawable`]: fill layers first, the outline last. Invisible
//! layers are left out, so a shape with a transparent stroke and no fill
//! has no sets at all.
//!
//! Every shape draws from one random stream seeded by `options.seed`. The
//! outline is always computed before the fill, even when it's hidden, so
//! toggling the stroke color never changes how the fill looks.

use crate::curve::{curve_to_bezier, points_on_bezier_curves};
use crate::error::PathError;
use crate::fill::{FillRegistry, arc_fill_points, solid_fill_polygon};
use crate::geometry::Point;
use crate::ops::{Drawable, DrawableShape, Op, OpKind, OpSet, OpSetType, PathInfo};
use crate::options::{FillStyle, Options, ResolvedOptions};
use crate::points_on_path::points_on_path;
use crate::stroke::{self, ArcFrame};

/// Flattening tolerance for curve fills.
const CURVE_FILL_TOLERANCE: f64 = 10.0;

#[derive(Debug, Clone, Default)]
pub struct Generator {
    defaults: ResolvedOptions,
    fills: FillRegistry,
}

impl Generator {
    /// A generator whose defaults are `options` over the built-in defaults.
    pub fn new(options: &Options) -> Self {
        Self::from_resolved(ResolvedOptions::default().merge(options))
    }

    pub fn from_resolved(defaults: ResolvedOptions) -> Self {
        Self { defaults, fills: FillRegistry::default() }
    }

    pub fn with_fill_registry(mut self, fills: FillRegistry) -> Self {
        self.fills = fills;
        self
    }

    fn resolve(&self, options: &Options) -> ResolvedOptions {
        self.defaults.merge(options)
    }

    pub fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64, options: &Options) -> Drawable {
        let o = self.resolve(options);
        let outline = stroke::line(x1, y1, x2, y2, &o);
        finish(DrawableShape::Line, o, None, outline)
    }

    pub fn rectangle(&self, x: f64, y: f64, width: f64, height: f64, options: &Options) -> Drawable {
        let o = self.resolve(options);
        if width == 0.0 && height == 0.0 {
            return finish(DrawableShape::Rectangle, o, None, OpSet::stroke(Vec::new()));
        }
        let outline = stroke::rectangle(x, y, width, height, &o);
        let fill = self.polygon_fill(&stroke::rectangle_points(x, y, width, height), &o);
        finish(DrawableShape::Rectangle, o, fill, outline)
    }

    /// Ellipse of `width` by `height` centered at `(x, y)`.
    pub fn ellipse(&self, x: f64, y: f64, width: f64, height: f64, options: &Options) -> Drawable {
        let o = self.resolve(options);
        self.ellipse_drawable(DrawableShape::Ellipse, x, y, width, height, o)
    }

    pub fn circle(&self, x: f64, y: f64, diameter: f64, options: &Options) -> Drawable {
        let o = self.resolve(options);
        self.ellipse_drawable(DrawableShape::Circle, x, y, diameter, diameter, o)
    }

    fn ellipse_drawable(&self, shape: DrawableShape, x: f64, y: f64, width: f64, height: f64, o: ResolvedOptions) -> Drawable {
        if width == 0.0 && height == 0.0 {
            return finish(shape, o, None, OpSet::stroke(Vec::new()));
        }
        let params = stroke::ellipse_params(width, height, &o);
        let outline = stroke::ellipse_with_params(x, y, &params, &o);

        let fill = o.visible_fill().map(|_| {
            if o.fill_style == FillStyle::Solid {
                let shape = stroke::ellipse_with_params(x, y, &params, &o).opset;
                OpSet::new(OpSetType::FillStroke, shape.ops)
            } else {
                self.fills.fill(&[outline.estimated_points.clone()], &o)
            }
        });
        finish(shape, o, fill, outline.opset)
    }

    /// Open polyline; never filled.
    pub fn linear_path(&self, points: &[Point], options: &Options) -> Drawable {
        let o = self.resolve(options);
        let outline = stroke::linear_path(points, false, &o);
        finish(DrawableShape::LinearPath, o, None, outline)
    }

    pub fn polygon(&self, points: &[Point], options: &Options) -> Drawable {
        let o = self.resolve(options);
        let outline = stroke::polygon(points, &o);
        let fill = self.polygon_fill(points, &o);
        finish(DrawableShape::Polygon, o, fill, outline)
    }

    fn polygon_fill(&self, points: &[Point], o: &ResolvedOptions) -> Option<OpSet> {
        o.visible_fill()?;
        let polygons = [points.to_vec()];
        Some(if o.fill_style == FillStyle::Solid {
            solid_fill_polygon(&polygons, o)
        } else {
            self.fills.fill(&polygons, o)
        })
    }

    /// Elliptical arc from `start` to `stop` radians. Closed arcs are drawn
    /// as pie slices and are the only ones filled.
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        start: f64,
        stop: f64,
        closed: bool,
        options: &Options,
    ) -> Drawable {
        let o = self.resolve(options);
        let frame = ArcFrame::new(x, y, width, height, start, stop, &o);
        let outline = stroke::arc(&frame, closed, true, &o);

        let fill = match o.visible_fill() {
            Some(_) if closed => Some(if o.fill_style == FillStyle::Solid {
                let mut single = o.clone();
                single.disable_multi_stroke = true;
                let frame = ArcFrame::new(x, y, width, height, start, stop, &single);
                let shape = stroke::arc(&frame, true, false, &single);
                OpSet::new(OpSetType::FillStroke, shape.ops)
            } else {
                let frame = ArcFrame::new(x, y, width, height, start, stop, &o);
                self.fills.fill(&[arc_fill_points(&frame, &o)], &o)
            }),
            _ => None,
        };
        finish(DrawableShape::Arc, o, fill, outline)
    }

    /// Smooth curve through each polyline of `points`.
    pub fn curve(&self, points: &[Vec<Point>], options: &Options) -> Drawable {
        let o = self.resolve(options);
        let outline = stroke::curve(points, &o);

        let fill = o.visible_fill().and_then(|_| {
            if o.fill_style == FillStyle::Solid {
                let shape = stroke::curve(points, &rougher_single_stroke(&o));
                return Some(OpSet::new(OpSetType::FillStroke, merge_shape(shape.ops)));
            }
            let polygon = curve_fill_polygon(points, &o);
            (!polygon.is_empty()).then(|| self.fills.fill(&[polygon], &o))
        });
        finish(DrawableShape::Curve, o, fill, outline)
    }

    /// Sketch SVG path data.
    pub fn path(&self, d: &str, options: &Options) -> Result<Drawable, PathError> {
        let o = self.resolve(options);
        if d.trim().is_empty() {
            return Ok(finish(DrawableShape::Path, o, None, OpSet::stroke(Vec::new())));
        }
        let d = clean_path_data(d);

        let simplification = o.simplification.filter(|&s| s != 0.0 && s < 1.0);
        let distance = match simplification {
            Some(s) => 4.0 - 4.0 * s,
            None => (1.0 + o.roughness) / 2.0,
        };
        let sets = points_on_path(&d, 1.0, distance)?;
        let shape = stroke::svg_path(&d, &o)?;

        let fill = match o.visible_fill() {
            None => None,
            Some(_) if o.fill_style == FillStyle::Solid => Some(if sets.len() == 1 {
                let shape = stroke::svg_path(&d, &rougher_single_stroke(&o))?;
                OpSet::new(OpSetType::FillStroke, merge_shape(shape.ops))
            } else {
                solid_fill_polygon(&sets, &o)
            }),
            Some(_) => Some(self.fills.fill(&sets, &o)),
        };

        let outlines = if simplification.is_some() {
            sets.iter().map(|set| stroke::linear_path(set, false, &o)).collect()
        } else {
            vec![shape]
        };
        Ok(finish_layers(DrawableShape::Path, o, fill, outlines))
    }

    /// SVG path data for one set.
    pub fn ops_to_path(&self, set: &OpSet, fixed_digits: Option<usize>) -> String {
        set.to_path_data(fixed_digits)
    }

    pub fn to_paths(&self, drawable: &Drawable) -> Vec<PathInfo> {
        drawable.to_paths()
    }
}

/// Assemble a drawable, dropping empty and invisible layers.
fn finish(shape: DrawableShape, o: ResolvedOptions, fill: Option<OpSet>, outline: OpSet) -> Drawable {
    finish_layers(shape, o, fill, vec![outline])
}

/// Fill first, then each outline layer; empty and hidden layers are dropped.
fn finish_layers(shape: DrawableShape, o: ResolvedOptions, fill: Option<OpSet>, outlines: Vec<OpSet>) -> Drawable {
    let mut sets = Vec::with_capacity(outlines.len() + 1);
    if let Some(fill) = fill.filter(|set| !set.is_empty()) {
        sets.push(fill);
    }
    if !o.stroke.is_transparent() {
        sets.extend(outlines.into_iter().filter(|set| !set.is_empty()));
    }
    log::debug!("{shape:?}: {} sets", sets.len());
    Drawable { shape, options: o, sets }
}

/// Options for the outline that backs a solid fill.
fn rougher_single_stroke(o: &ResolvedOptions) -> ResolvedOptions {
    let mut fill = o.clone();
    fill.disable_multi_stroke = true;
    if fill.roughness != 0.0 {
        fill.roughness += o.fill_shape_roughness_gain;
    }
    fill
}

/// Keep the first op and drop every later move, joining the passes into
/// one fillable run.
fn merge_shape(ops: Vec<Op>) -> Vec<Op> {
    ops.into_iter()
        .enumerate()
        .filter(|(i, op)| *i == 0 || op.kind() != OpKind::Move)
        .map(|(_, op)| op)
        .collect()
}

/// One polygon through every polyline of a curve.
fn curve_fill_polygon(lists: &[Vec<Point>], o: &ResolvedOptions) -> Vec<Point> {
    let distance = (1.0 + o.roughness) / 2.0;
    let mut polygon = Vec::new();
    for points in lists {
        match points.len() {
            0..=2 => polygon.extend_from_slice(points),
            3 => {
                let padded = [points[0], points[0], points[1], points[2]];
                let bezier = curve_to_bezier(&padded, 0.0);
                polygon.extend(points_on_bezier_curves(&bezier, CURVE_FILL_TOLERANCE, distance));
            }
            _ => {
                let bezier = curve_to_bezier(points, 0.0);
                polygon.extend(points_on_bezier_curves(&bezier, CURVE_FILL_TOLERANCE, distance));
            }
        }
    }
    polygon
}

/// Newlines become spaces and whitespace after a minus sign is dropped.
fn clean_path_data(d: &str) -> String {
    let mut cleaned = String::with_capacity(d.len());
    let mut after_minus = false;
    for ch in d.chars() {
        if after_minus && ch.is_whitespace() {
            continue;
        }
        after_minus = ch == '-';
        cleaned.push(if ch == '\n' { ' ' } else { ch });
    }
    cleaned
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::fill::FillAlgorithm;
    use crate::options::Color;
    use crate::path::parse_path;

    fn generator() -> Generator {
        Generator::new(&Options::new().with_seed(1234))
    }

    fn kinds(drawable: &Drawable) -> Vec<OpSetType> {
        drawable.sets.iter().map(|s| s.kind).collect()
    }

    fn red() -> Color {
        Color::rgba(255, 0, 0, 255)
    }

    fn square() -> Vec<Point> {
        vec![Point::new(10.0, 10.0), Point::new(110.0, 10.0), Point::new(110.0, 110.0), Point::new(10.0, 110.0)]
    }

    #[test]
    fn same_seed_same_drawable() {
        let g = generator();
        let options = Options::new().with_fill(red());
        let a = g.rectangle(10.0, 10.0, 100.0, 80.0, &options);
        let b = g.rectangle(10.0, 10.0, 100.0, 80.0, &options);
        assert_eq!(a.sets, b.sets);

        let c = g.rectangle(10.0, 10.0, 100.0, 80.0, &options.clone().with_seed(99));
        assert_ne!(a.sets, c.sets);
    }

    #[test]
    fn transparent_stroke_without_fill_has_no_sets() {
        let options = Options::new().with_stroke(Color::TRANSPARENT);
        let g = generator();
        assert!(g.line(0.0, 0.0, 10.0, 10.0, &options).sets.is_empty());
        assert!(g.rectangle(0.0, 0.0, 10.0, 10.0, &options).sets.is_empty());
        assert!(g.ellipse(0.0, 0.0, 10.0, 10.0, &options).sets.is_empty());
    }

    #[test]
    fn fill_comes_before_stroke() {
        let g = generator();
        let d = g.polygon(&square(), &Options::new().with_fill(red()));
        assert_eq!(kinds(&d), vec![OpSetType::FillSketch, OpSetType::Stroke]);

        let solid = g.polygon(&square(), &Options::new().with_fill(red()).with_fill_style(FillStyle::Solid));
        assert_eq!(kinds(&solid), vec![OpSetType::FillStroke, OpSetType::Stroke]);
    }

    #[test]
    fn hidden_stroke_does_not_change_the_fill() {
        let g = generator();
        let shown = g.polygon(&square(), &Options::new().with_fill(red()));
        let hidden = g.polygon(&square(), &Options::new().with_fill(red()).with_stroke(Color::TRANSPARENT));
        assert_eq!(hidden.sets.len(), 1);
        assert_eq!(hidden.sets[0], shown.sets[0]);
    }

    #[test]
    fn transparent_fill_is_skipped() {
        let d = generator().rectangle(0.0, 0.0, 50.0, 50.0, &Options::new().with_fill(Color::TRANSPARENT));
        assert_eq!(kinds(&d), vec![OpSetType::Stroke]);
    }

    #[test]
    fn solid_ellipse_reuses_the_outline_radii() {
        let g = generator();
        let options = Options::new().with_fill(red()).with_fill_style(FillStyle::Solid).with_roughness(0.0);
        let d = g.ellipse(50.0, 50.0, 80.0, 40.0, &options);
        assert_eq!(kinds(&d), vec![OpSetType::FillStroke, OpSetType::Stroke]);
        assert_eq!(d.sets[0].ops, d.sets[1].ops);
    }

    #[test]
    fn circle_is_an_ellipse() {
        let g = generator();
        let circle = g.circle(20.0, 20.0, 30.0, &Options::new());
        let ellipse = g.ellipse(20.0, 20.0, 30.0, 30.0, &Options::new());
        assert_eq!(circle.shape, DrawableShape::Circle);
        assert_eq!(circle.sets, ellipse.sets);
    }

    #[test]
    fn only_closed_arcs_are_filled() {
        let g = generator();
        let options = Options::new().with_fill(red());
        let open = g.arc(50.0, 50.0, 80.0, 80.0, 0.0, PI, false, &options);
        assert_eq!(kinds(&open), vec![OpSetType::Stroke]);
        let closed = g.arc(50.0, 50.0, 80.0, 80.0, 0.0, PI, true, &options);
        assert_eq!(kinds(&closed), vec![OpSetType::FillSketch, OpSetType::Stroke]);
    }

    #[test]
    fn solid_arc_fill_closes_with_plain_lines() {
        let options = Options::new().with_fill(red()).with_fill_style(FillStyle::Solid);
        let d = generator().arc(50.0, 50.0, 80.0, 80.0, 0.0, PI / 2.0, true, &options);
        let fill = &d.sets[0];
        assert_eq!(fill.kind, OpSetType::FillStroke);
        let tail: Vec<OpKind> = fill.ops[fill.ops.len() - 2..].iter().map(Op::kind).collect();
        assert_eq!(tail, vec![OpKind::LineTo, OpKind::LineTo]);
        assert_eq!(fill.ops.iter().filter(|op| op.kind() == OpKind::Move).count(), 1);
    }

    #[test]
    fn degenerate_shapes_are_empty() {
        let g = generator();
        assert!(g.rectangle(5.0, 5.0, 0.0, 0.0, &Options::new().with_fill(red())).sets.is_empty());
        assert!(g.ellipse(5.0, 5.0, 0.0, 0.0, &Options::new()).sets.is_empty());
        assert!(g.line(5.0, 5.0, 5.0, 5.0, &Options::new()).sets.is_empty());
        assert!(g.arc(5.0, 5.0, 10.0, 10.0, 1.0, 1.0, true, &Options::new()).sets.is_empty());
        assert!(g.linear_path(&[Point::new(1.0, 1.0)], &Options::new()).sets.is_empty());
    }

    #[test]
    fn solid_curve_fill_is_one_run() {
        let points = vec![vec![Point::new(0.0, 0.0), Point::new(50.0, 80.0), Point::new(100.0, 0.0), Point::new(150.0, 60.0)]];
        let options = Options::new().with_fill(red()).with_fill_style(FillStyle::Solid);
        let d = generator().curve(&points, &options);
        assert_eq!(kinds(&d), vec![OpSetType::FillStroke, OpSetType::Stroke]);
        assert_eq!(d.sets[0].ops.iter().filter(|op| op.kind() == OpKind::Move).count(), 1);
    }

    #[test]
    fn curve_pattern_fill_pads_three_points() {
        let points = vec![Point::new(0.0, 0.0), Point::new(50.0, 80.0), Point::new(100.0, 0.0)];
        let polygon = curve_fill_polygon(&[points.clone()], &ResolvedOptions::default());
        assert!(polygon.len() >= 2);
        assert_eq!(polygon[0], points[0]);

        let short = curve_fill_polygon(&[points[..2].to_vec()], &ResolvedOptions::default());
        assert_eq!(short, points[..2].to_vec());
    }

    #[test]
    fn path_layers() {
        let g = generator();
        let d = g.path("M10 10 L110 10 L110 110 Z", &Options::new().with_fill(red())).unwrap();
        assert_eq!(kinds(&d), vec![OpSetType::FillSketch, OpSetType::Stroke]);

        let solid = g
            .path("M10 10 L110 10 L110 110 Z", &Options::new().with_fill(red()).with_fill_style(FillStyle::Solid))
            .unwrap();
        assert_eq!(solid.sets[0].kind, OpSetType::FillStroke);
        assert_eq!(solid.sets[0].ops.iter().filter(|op| op.kind() == OpKind::Move).count(), 1);

        let two = g
            .path(
                "M0 0 L50 0 L50 50 Z M100 100 L150 100 L150 150 Z",
                &Options::new().with_fill(red()).with_fill_style(FillStyle::Solid),
            )
            .unwrap();
        assert_eq!(two.sets[0].ops.iter().filter(|op| op.kind() == OpKind::Move).count(), 2);
    }

    #[test]
    fn simplified_path_is_stroked_as_polylines() {
        let options = Options::new().with_simplification(0.5).with_single_stroke(true);
        let d = generator().path("M0 0 C0 100 100 100 100 0", &options).unwrap();
        assert_eq!(d.sets.len(), 1);
        assert!(d.sets[0].ops.iter().all(|op| op.kind() != OpKind::LineTo));
        assert!(d.sets[0].ops.len() >= 2);
    }

    #[test]
    fn simplified_subpaths_get_a_layer_each() {
        let options = Options::new().with_simplification(0.5).with_fill(red());
        let d = generator()
            .path("M0 0 C0 100 100 100 100 0 M200 0 L300 0 L300 100 Z M400 0 L500 50", &options)
            .unwrap();
        assert_eq!(d.sets[0].kind, OpSetType::FillSketch);
        assert_eq!(&kinds(&d)[1..], &[OpSetType::Stroke, OpSetType::Stroke, OpSetType::Stroke]);
        for set in &d.sets[1..] {
            let moves = set.ops.iter().filter(|op| op.kind() == OpKind::Move).count();
            assert!(moves >= 2 && moves % 2 == 0, "{moves} moves");
        }
    }

    #[test]
    fn blank_path_is_empty() {
        let d = generator().path("  \n ", &Options::new()).unwrap();
        assert!(d.sets.is_empty());
        assert_eq!(d.shape, DrawableShape::Path);
    }

    #[test]
    fn bad_path_is_an_error() {
        assert!(generator().path("M 10", &Options::new()).is_err());
    }

    #[test]
    fn path_data_is_cleaned() {
        assert_eq!(clean_path_data("M10 -\n 5\nL1 -  2"), "M10 -5 L1 -2");
    }

    #[test]
    fn fixed_decimals_round_trip_through_the_parser() {
        let g = generator();
        let d = g.rectangle(10.0, 10.0, 100.0, 80.0, &Options::new());
        let text = g.ops_to_path(&d.sets[0], Some(3));
        let segments = parse_path(&text).unwrap();
        assert_eq!(segments.len(), d.sets[0].ops.len());
        for (segment, op) in segments.iter().zip(&d.sets[0].ops) {
            for (parsed, original) in segment.data.iter().zip(op.data()) {
                assert!((parsed - original).abs() <= 0.0005 + 1e-9);
            }
        }
    }

    #[test]
    fn registry_mapping_changes_the_pattern() {
        let g = generator().with_fill_registry(FillRegistry::new().with_mapping(FillStyle::Hachure, FillAlgorithm::Dots));
        let dots = g.polygon(&square(), &Options::new().with_fill(red()));
        let hachure = generator().polygon(&square(), &Options::new().with_fill(red()));
        assert_ne!(dots.sets[0], hachure.sets[0]);
    }

    #[test]
    fn paths_carry_layer_colors() {
        let g = generator();
        let d = g.rectangle(0.0, 0.0, 40.0, 40.0, &Options::new().with_fill(red()));
        let paths = g.to_paths(&d);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].stroke, Some(red()));
        assert_eq!(paths[1].stroke, Some(Color::BLACK));
    }
}
