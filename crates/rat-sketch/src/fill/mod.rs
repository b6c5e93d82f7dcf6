//! Fill algorithms for closed shapes.
//!
//! Every pattern fill starts from the same hachure scan and then redraws
//! the scan lines its own way: as rough lines, zigzags, dashes or dots.
//!
//! ## Rust Lesson #21: Closed enums over trait objects
//!
//! The set of fill algorithms is fixed, so [`FillAlgorithm`] is a plain
//! `Copy` enum with a `match` per operation. A [`FillRegistry`] is then
//! just a map from style to enum value: it owns no boxed closures, which
//! makes it `Send + Sync` for free.

mod dashed;
mod dots;
mod hachure;
mod zigzag;
mod zigzag_line;

use std::collections::HashMap;

pub use dashed::dashed_fill;
pub use dots::dots_fill;
pub use hachure::{cross_hatch_fill, hachure_fill};
pub use zigzag::zigzag_fill;
pub use zigzag_line::zigzag_line_fill;

use crate::geometry::{Line, Point};
use crate::hachure::hachure_lines;
use crate::ops::{Op, OpSet, OpSetType};
use crate::options::{FillStyle, ResolvedOptions};
use crate::stroke::{ArcFrame, double_line, offset_opt};

/// The pattern algorithms a [`FillStyle`] can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillAlgorithm {
    Hachure,
    CrossHatch,
    ZigZag,
    ZigzagLine,
    Dots,
    Dashed,
}

impl FillAlgorithm {
    pub fn all() -> &'static [FillAlgorithm] {
        &[
            FillAlgorithm::Hachure,
            FillAlgorithm::CrossHatch,
            FillAlgorithm::ZigZag,
            FillAlgorithm::ZigzagLine,
            FillAlgorithm::Dots,
            FillAlgorithm::Dashed,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FillAlgorithm::Hachure => "hachure",
            FillAlgorithm::CrossHatch => "cross-hatch",
            FillAlgorithm::ZigZag => "zigzag",
            FillAlgorithm::ZigzagLine => "zigzag-line",
            FillAlgorithm::Dots => "dots",
            FillAlgorithm::Dashed => "dashed",
        }
    }

    /// Fill `polygons`, returning a [`OpSetType::FillSketch`] set.
    pub fn fill_polygons(&self, polygons: &[Vec<Point>], o: &ResolvedOptions) -> OpSet {
        let ops = match self {
            FillAlgorithm::Hachure => hachure_fill(polygons, o),
            FillAlgorithm::CrossHatch => cross_hatch_fill(polygons, o),
            FillAlgorithm::ZigZag => zigzag_fill(polygons, o),
            FillAlgorithm::ZigzagLine => zigzag_line_fill(polygons, o),
            FillAlgorithm::Dots => dots_fill(polygons, o),
            FillAlgorithm::Dashed => dashed_fill(polygons, o),
        };
        OpSet::new(OpSetType::FillSketch, ops)
    }
}

/// Which algorithm draws each fill style.
///
/// `Solid` is normally handled by the generator before a pattern is
/// needed; it maps to hachure for pattern-only callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillRegistry {
    algorithms: HashMap<FillStyle, FillAlgorithm>,
}

impl Default for FillRegistry {
    fn default() -> Self {
        let algorithms = FillStyle::all()
            .iter()
            .map(|&style| {
                let algorithm = match style {
                    FillStyle::Hachure | FillStyle::Solid => FillAlgorithm::Hachure,
                    FillStyle::ZigZag => FillAlgorithm::ZigZag,
                    FillStyle::CrossHatch => FillAlgorithm::CrossHatch,
                    FillStyle::Dots => FillAlgorithm::Dots,
                    FillStyle::Dashed => FillAlgorithm::Dashed,
                    FillStyle::ZigzagLine => FillAlgorithm::ZigzagLine,
                };
                (style, algorithm)
            })
            .collect();
        Self { algorithms }
    }
}

impl FillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `style` with `algorithm` instead.
    pub fn with_mapping(mut self, style: FillStyle, algorithm: FillAlgorithm) -> Self {
        self.set(style, algorithm);
        self
    }

    pub fn set(&mut self, style: FillStyle, algorithm: FillAlgorithm) {
        self.algorithms.insert(style, algorithm);
    }

    pub fn get(&self, style: FillStyle) -> FillAlgorithm {
        self.algorithms.get(&style).copied().unwrap_or(FillAlgorithm::Hachure)
    }

    /// Pattern-fill `polygons` with the algorithm for `o.fill_style`.
    pub fn fill(&self, polygons: &[Vec<Point>], o: &ResolvedOptions) -> OpSet {
        let algorithm = self.get(o.fill_style);
        log::trace!("filling {} polygons with {}", polygons.len(), algorithm.name());
        algorithm.fill_polygons(polygons, o)
    }
}

/// Outline fill: one jittered closed run per polygon with more than two
/// vertices.
pub fn solid_fill_polygon(polygons: &[Vec<Point>], o: &ResolvedOptions) -> OpSet {
    let jitter = |v: f64| v + offset_opt(o.max_randomness_offset, o, 1.0);
    let mut ops = Vec::new();
    for polygon in polygons {
        let Some((first, rest)) = polygon.split_first() else {
            continue;
        };
        if polygon.len() <= 2 {
            continue;
        }
        let x = jitter(first.x);
        let y = jitter(first.y);
        ops.push(Op::Move([x, y]));
        for p in rest {
            let x = jitter(p.x);
            let y = jitter(p.y);
            ops.push(Op::LineTo([x, y]));
        }
    }
    OpSet::new(OpSetType::FillStroke, ops)
}

/// Perimeter samples of an arc plus its center, for pattern fills of a
/// pie slice.
pub fn arc_fill_points(frame: &ArcFrame, o: &ResolvedOptions) -> Vec<Point> {
    let increment = (frame.stop - frame.start) / o.curve_step_count;
    let mut points = Vec::new();
    if increment.is_finite() && increment > 0.0 {
        let mut angle = frame.start;
        while angle <= frame.stop {
            points.push(frame.point_at(angle));
            angle += increment;
        }
    }
    points.push(frame.point_at(frame.stop));
    points.push(frame.center());
    points
}

/// Scan lines for a pattern fill.
///
/// The gap is rounded to whole units. With roughness of at least 1 a
/// random draw decides whether the scan steps a full gap at a time.
pub fn polygon_hachure_lines(polygons: &[Vec<Point>], o: &ResolvedOptions) -> Vec<Line> {
    let angle = o.hachure_angle + 90.0;
    let gap = o.hachure_gap_or_default().max(0.1).round();
    hachure_lines(polygons, gap, angle, scan_step(gap, o))
}

fn scan_step(gap: f64, o: &ResolvedOptions) -> f64 {
    let step = if o.roughness >= 1.0 && o.random() > 0.7 { gap } else { 1.0 };
    if step == 0.0 { 1.0 } else { step }
}

/// Each line as a rough fill stroke.
pub fn render_lines(lines: &[Line], o: &ResolvedOptions) -> Vec<Op> {
    let mut ops = Vec::new();
    for line in lines {
        ops.extend(double_line(line.x1, line.y1, line.x2, line.y2, o, true));
    }
    ops
}

/// `atan` of the slope, after ordering the endpoints left to right.
pub(crate) fn left_to_right(line: &Line) -> (Point, f64) {
    let (mut p1, mut p2) = (line.start(), line.end());
    if p1.x > p2.x {
        std::mem::swap(&mut p1, &mut p2);
    }
    let alpha = ((p2.y - p1.y) / (p2.x - p1.x)).atan();
    (p1, alpha)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn options(extra: Options) -> ResolvedOptions {
        ResolvedOptions::default().merge(&extra.with_seed(5))
    }

    fn square() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0), Point::new(0.0, 100.0)]
    }

    #[test]
    fn default_registry_covers_every_style() {
        let registry = FillRegistry::default();
        assert_eq!(registry.get(FillStyle::Solid), FillAlgorithm::Hachure);
        assert_eq!(registry.get(FillStyle::Dots), FillAlgorithm::Dots);
        assert_eq!(registry.get(FillStyle::ZigzagLine), FillAlgorithm::ZigzagLine);
        for style in FillStyle::all() {
            let _ = registry.get(*style);
        }
    }

    #[test]
    fn registry_can_be_remapped() {
        let registry = FillRegistry::new().with_mapping(FillStyle::Hachure, FillAlgorithm::Dashed);
        assert_eq!(registry.get(FillStyle::Hachure), FillAlgorithm::Dashed);
        assert_eq!(FillRegistry::default().get(FillStyle::Hachure), FillAlgorithm::Hachure);
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FillRegistry>();
    }

    #[test]
    fn every_pattern_fills_a_square() {
        for algorithm in FillAlgorithm::all() {
            let set = algorithm.fill_polygons(&[square()], &options(Options::new()));
            assert_eq!(set.kind, OpSetType::FillSketch);
            assert!(!set.is_empty(), "{} drew nothing", algorithm.name());
        }
    }

    #[test]
    fn solid_fill_traces_the_outline() {
        let set = solid_fill_polygon(&[square(), vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]], &options(Options::new()));
        assert_eq!(set.kind, OpSetType::FillStroke);
        assert_eq!(set.ops.len(), 4);
        assert!(matches!(set.ops[0], Op::Move(_)));
    }

    #[test]
    fn smooth_hachure_draws_no_random_value() {
        let o = options(Options::new().with_roughness(0.5).with_hachure_gap(10.0));
        let fresh = options(Options::new());
        assert!(!polygon_hachure_lines(&[square()], &o).is_empty());
        assert_eq!(o.random(), fresh.random());
    }

    #[test]
    fn rough_hachure_draws_exactly_one_value() {
        let o = options(Options::new().with_roughness(1.0).with_hachure_gap(10.0));
        let fresh = options(Options::new());
        assert!(!polygon_hachure_lines(&[square()], &o).is_empty());
        let _ = fresh.random();
        assert_eq!(o.random(), fresh.random());
    }

    #[test]
    fn high_draw_widens_the_scan_step() {
        let seeded = |seed| ResolvedOptions::default().merge(&Options::new().with_seed(seed).with_roughness(1.5));

        // Seed 0 opens with 0.883..., seed 1 with 0.566...
        assert_eq!(scan_step(8.0, &seeded(0)), 8.0);
        assert_eq!(scan_step(8.0, &seeded(1)), 1.0);
        assert_eq!(scan_step(0.0, &seeded(0)), 1.0);

        let smooth = ResolvedOptions::default().merge(&Options::new().with_seed(0).with_roughness(0.9));
        assert_eq!(scan_step(8.0, &smooth), 1.0);
    }

    #[test]
    fn arc_fill_ends_at_the_center() {
        let o = options(Options::new().with_roughness(0.0));
        let frame = ArcFrame::new(50.0, 50.0, 100.0, 100.0, 0.0, std::f64::consts::PI, &o);
        let points = arc_fill_points(&frame, &o);
        assert_eq!(*points.last().unwrap(), Point::new(50.0, 50.0));
        assert!((11..=12).contains(&points.len()));
    }
}
