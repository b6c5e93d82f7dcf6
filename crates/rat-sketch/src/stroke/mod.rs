//! Sketchy stroke synthesis.
//!
//! Every outline is built from jittered cubic curves. A straight edge
//! becomes one bowed cubic per pass, and two overlapping passes give the
//! hand-drawn "double stroke". The amount of jitter scales with
//! `roughness` and shrinks on long lines.
//!
//! Every jitter draws exactly one value from the options' random stream, in
//! a fixed order, so a seed always reproduces the same strokes.

mod curve;
mod ellipse;
mod path;

pub use curve::curve;
pub use ellipse::{ArcFrame, EllipseParams, EllipseResult, arc, ellipse, ellipse_params, ellipse_with_params};
pub use path::svg_path;

use crate::geometry::Point;
use crate::ops::{Op, OpSet};
use crate::options::ResolvedOptions;

/// Lines shorter than this are not drawn.
const MIN_LINE_LENGTH: f64 = 0.001;

/// `roughness * gain * uniform(min, max)`.
#[inline]
pub fn offset(min: f64, max: f64, o: &ResolvedOptions, gain: f64) -> f64 {
    o.roughness * gain * (o.random() * (max - min) + min)
}

/// Symmetric jitter in `[-x, x)`, scaled by roughness and `gain`.
#[inline]
pub fn offset_opt(x: f64, o: &ResolvedOptions, gain: f64) -> f64 {
    offset(-x, x, o, gain)
}

/// Jitter damping for long lines.
fn roughness_gain(length: f64) -> f64 {
    if length < 200.0 {
        1.0
    } else if length > 500.0 {
        0.4
    } else {
        -0.0016668 * length + 1.233334
    }
}

/// One bowed pass from `(x1, y1)` to `(x2, y2)`.
///
/// The overlay pass uses half the jitter of the first pass.
pub(crate) fn line_pass(x1: f64, y1: f64, x2: f64, y2: f64, o: &ResolvedOptions, mv: bool, overlay: bool) -> Vec<Op> {
    let length_sq = (x1 - x2).powi(2) + (y1 - y2).powi(2);
    let length = length_sq.sqrt();
    let gain = roughness_gain(length);

    let mut max_offset = o.max_randomness_offset;
    if max_offset * max_offset * 100.0 > length_sq {
        max_offset = length / 10.0;
    }
    let jitter = if overlay { max_offset / 2.0 } else { max_offset };
    let rand = || offset_opt(jitter, o, gain);

    let diverge = 0.2 + o.random() * 0.2;
    let mid_disp_x = offset_opt(o.bowing * o.max_randomness_offset * (y2 - y1) / 200.0, o, gain);
    let mid_disp_y = offset_opt(o.bowing * o.max_randomness_offset * (x1 - x2) / 200.0, o, gain);
    let vertex = || if o.preserve_vertices { 0.0 } else { rand() };

    let mut ops = Vec::with_capacity(2);
    if mv {
        let x = x1 + vertex();
        let y = y1 + vertex();
        ops.push(Op::Move([x, y]));
    }

    let c1x = mid_disp_x + x1 + (x2 - x1) * diverge + rand();
    let c1y = mid_disp_y + y1 + (y2 - y1) * diverge + rand();
    let c2x = mid_disp_x + x1 + 2.0 * (x2 - x1) * diverge + rand();
    let c2y = mid_disp_y + y1 + 2.0 * (y2 - y1) * diverge + rand();
    let ex = x2 + vertex();
    let ey = y2 + vertex();
    ops.push(Op::CubicCurveTo([c1x, c1y, c2x, c2y, ex, ey]));
    ops
}

/// A first pass plus an overlay pass, unless multi-stroke is disabled for
/// this kind of stroke.
pub fn double_line(x1: f64, y1: f64, x2: f64, y2: f64, o: &ResolvedOptions, filling: bool) -> Vec<Op> {
    let mut ops = line_pass(x1, y1, x2, y2, o, true, false);
    if !o.single_stroke(filling) {
        ops.extend(line_pass(x1, y1, x2, y2, o, true, true));
    }
    ops
}

/// Sketchy straight line.
pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, o: &ResolvedOptions) -> OpSet {
    if Point::new(x1, y1).distance(Point::new(x2, y2)) < MIN_LINE_LENGTH {
        return OpSet::stroke(Vec::new());
    }
    OpSet::stroke(double_line(x1, y1, x2, y2, o, false))
}

/// Sketchy polyline; `close` adds the edge back to the first point.
pub fn linear_path(points: &[Point], close: bool, o: &ResolvedOptions) -> OpSet {
    match points.len() {
        0 | 1 => OpSet::stroke(Vec::new()),
        2 => line(points[0].x, points[0].y, points[1].x, points[1].y, o),
        len => {
            let mut ops = Vec::new();
            for w in points.windows(2) {
                ops.extend(double_line(w[0].x, w[0].y, w[1].x, w[1].y, o, false));
            }
            if close {
                let (last, first) = (points[len - 1], points[0]);
                ops.extend(double_line(last.x, last.y, first.x, first.y, o, false));
            }
            OpSet::stroke(ops)
        }
    }
}

pub fn polygon(points: &[Point], o: &ResolvedOptions) -> OpSet {
    linear_path(points, true, o)
}

/// Corner points of an axis-aligned rectangle, clockwise in screen space.
pub fn rectangle_points(x: f64, y: f64, width: f64, height: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + width, y),
        Point::new(x + width, y + height),
        Point::new(x, y + height),
    ]
}

/// Sketchy rectangle. A point-sized rectangle draws nothing.
pub fn rectangle(x: f64, y: f64, width: f64, height: f64, o: &ResolvedOptions) -> OpSet {
    if width == 0.0 && height == 0.0 {
        return OpSet::stroke(Vec::new());
    }
    polygon(&rectangle_points(x, y, width, height), o)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::OpKind;
    use crate::options::Options;

    fn options(extra: Options) -> ResolvedOptions {
        ResolvedOptions::default().merge(&extra.with_seed(42))
    }

    fn kinds(set: &OpSet) -> Vec<OpKind> {
        set.ops.iter().map(Op::kind).collect()
    }

    #[test]
    fn line_is_two_passes() {
        let set = line(0.0, 0.0, 100.0, 0.0, &options(Options::new()));
        assert_eq!(kinds(&set), vec![OpKind::Move, OpKind::CubicCurveTo, OpKind::Move, OpKind::CubicCurveTo]);
    }

    #[test]
    fn single_stroke_is_one_pass() {
        let set = line(0.0, 0.0, 100.0, 0.0, &options(Options::new().with_single_stroke(true)));
        assert_eq!(set.ops.len(), 2);
    }

    #[test]
    fn same_seed_same_line() {
        let a = line(10.0, 10.0, 200.0, 80.0, &options(Options::new()));
        let b = line(10.0, 10.0, 200.0, 80.0, &options(Options::new()));
        assert_eq!(a, b);
        let c = line(10.0, 10.0, 200.0, 80.0, &options(Options::new().with_seed(43)));
        assert_ne!(a, c);
    }

    #[test]
    fn zero_roughness_is_straight() {
        let set = line(0.0, 0.0, 100.0, 0.0, &options(Options::new().with_roughness(0.0)));
        for op in &set.ops {
            for (i, v) in op.data().iter().enumerate() {
                if i % 2 == 1 {
                    assert_eq!(*v, 0.0);
                }
            }
        }
        assert_eq!(set.ops[0], Op::Move([0.0, 0.0]));
    }

    #[test]
    fn preserve_vertices_keeps_endpoints() {
        let o = options(Options::new().with_preserve_vertices(true).with_roughness(3.0));
        let set = line(5.0, 6.0, 105.0, 46.0, &o);
        assert_eq!(set.ops[0], Op::Move([5.0, 6.0]));
        let Op::CubicCurveTo(d) = set.ops[1] else { panic!("expected a curve") };
        assert_eq!((d[4], d[5]), (105.0, 46.0));
    }

    #[test]
    fn jitter_stays_near_the_line() {
        let o = options(Options::new());
        let set = line(0.0, 0.0, 300.0, 0.0, &o);
        for op in &set.ops {
            for (i, v) in op.data().iter().enumerate() {
                if i % 2 == 1 {
                    assert!(v.abs() < 4.0, "y {v} strays too far");
                }
            }
        }
    }

    #[test]
    fn zero_length_line_is_empty() {
        assert!(line(3.0, 3.0, 3.0, 3.0, &options(Options::new())).is_empty());
    }

    #[test]
    fn linear_path_sizes() {
        let o = options(Options::new());
        let pts = [Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(50.0, 50.0)];
        assert_eq!(linear_path(&pts, false, &o).ops.len(), 8);
        assert_eq!(linear_path(&pts, true, &o).ops.len(), 12);
        assert_eq!(linear_path(&pts[..2], false, &o).ops.len(), 4);
        assert!(linear_path(&pts[..1], false, &o).is_empty());
    }

    #[test]
    fn rectangle_has_four_double_edges() {
        let set = rectangle(10.0, 10.0, 100.0, 50.0, &options(Options::new()));
        assert_eq!(set.ops.len(), 16);
        assert!(rectangle(10.0, 10.0, 0.0, 0.0, &options(Options::new())).is_empty());
    }

    #[test]
    fn long_lines_are_damped() {
        assert_eq!(roughness_gain(100.0), 1.0);
        assert_eq!(roughness_gain(600.0), 0.4);
        assert!((roughness_gain(350.0) - 0.65995).abs() < 1e-4);
    }
}
