//! Sketchy curves through point lists.

use super::{line_pass, offset_opt};
use crate::geometry::Point;
use crate::ops::{Op, OpKind, OpSet};
use crate::options::ResolvedOptions;

/// Sketchy curve through each polyline in `lists`.
///
/// The first non-empty polyline starts the path. Later polylines continue
/// it without lifting the pen, and every polyline's overlay pass draws from
/// its own substream so the two passes never mirror each other.
pub fn curve(lists: &[Vec<Point>], o: &ResolvedOptions) -> OpSet {
    let underlay_offset = 1.0 + o.roughness * 0.2;
    let overlay_offset = 1.5 * (1.0 + o.roughness * 0.22);

    let mut under: Vec<Op> = Vec::new();
    let mut over: Vec<Op> = Vec::new();
    let mut started = false;

    for (i, points) in lists.iter().enumerate() {
        if points.is_empty() {
            continue;
        }
        let underlay = curve_with_offset(points, underlay_offset, o);
        let overlay = if o.disable_multi_stroke {
            Vec::new()
        } else {
            curve_with_offset(points, overlay_offset, &o.with_substream(i as u64 + 1))
        };

        if started {
            under.extend(underlay.into_iter().filter(|op| op.kind() != OpKind::Move));
            over.extend(overlay.into_iter().filter(|op| op.kind() != OpKind::Move));
        } else {
            under = underlay;
            over = overlay;
            started = true;
        }
    }

    under.extend(over);
    OpSet::stroke(under)
}

/// Jitter every point, doubling the first and last, then fit a curve.
fn curve_with_offset(points: &[Point], offset: f64, o: &ResolvedOptions) -> Vec<Op> {
    let jittered = |p: Point| {
        let x = p.x + offset_opt(offset, o, 1.0);
        let y = p.y + offset_opt(offset, o, 1.0);
        Point::new(x, y)
    };

    let Some((&first, rest)) = points.split_first() else {
        return Vec::new();
    };

    let mut ps = Vec::with_capacity(points.len() + 2);
    ps.push(jittered(first));
    ps.push(jittered(first));
    for (i, &p) in rest.iter().enumerate() {
        ps.push(jittered(p));
        if i + 1 == rest.len() {
            ps.push(jittered(p));
        }
    }
    curve_ops(&ps, o)
}

/// Cardinal spline through `points`, skipping the first and last which
/// only steer the end tangents.
pub(crate) fn curve_ops(points: &[Point], o: &ResolvedOptions) -> Vec<Op> {
    let len = points.len();
    let mut ops = Vec::new();

    if len > 3 {
        let s = 1.0 - o.curve_tightness;
        ops.push(Op::Move([points[1].x, points[1].y]));
        for i in 1..len - 2 {
            let (prev, p, next, after) = (points[i - 1], points[i], points[i + 1], points[i + 2]);
            ops.push(Op::CubicCurveTo([
                p.x + (s * next.x - s * prev.x) / 6.0,
                p.y + (s * next.y - s * prev.y) / 6.0,
                next.x + (s * p.x - s * after.x) / 6.0,
                next.y + (s * p.y - s * after.y) / 6.0,
                next.x,
                next.y,
            ]));
        }
    } else if len == 3 {
        ops.push(Op::Move([points[1].x, points[1].y]));
        ops.push(Op::CubicCurveTo([
            points[1].x,
            points[1].y,
            points[2].x,
            points[2].y,
            points[2].x,
            points[2].y,
        ]));
    } else if len == 2 {
        ops.extend(line_pass(points[0].x, points[0].y, points[1].x, points[1].y, o, true, true));
    }
    ops
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn options(extra: Options) -> ResolvedOptions {
        ResolvedOptions::default().merge(&extra.with_seed(7))
    }

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&p| p.into()).collect()
    }

    fn moves(set: &OpSet) -> usize {
        set.ops.iter().filter(|op| op.kind() == OpKind::Move).count()
    }

    #[test]
    fn spline_passes_through_inner_points() {
        let o = options(Options::new().with_roughness(0.0));
        let ops = curve_ops(&pts(&[(0.0, 0.0), (0.0, 0.0), (50.0, 50.0), (100.0, 0.0), (100.0, 0.0)]), &o);
        assert_eq!(ops[0], Op::Move([0.0, 0.0]));
        assert_eq!(ops.len(), 3);
        let Op::CubicCurveTo(d) = ops[2] else { panic!("expected a curve") };
        assert_eq!((d[4], d[5]), (100.0, 0.0));
    }

    #[test]
    fn tightness_one_gives_straight_controls() {
        let o = options(Options::new().with_roughness(0.0)).merge(&Options {
            curve_tightness: Some(1.0),
            seed: Some(7),
            ..Options::new()
        });
        let ops = curve_ops(&pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 10.0), (30.0, 0.0)]), &o);
        assert_eq!(ops[1], Op::CubicCurveTo([10.0, 0.0, 20.0, 10.0, 20.0, 10.0]));
    }

    #[test]
    fn curve_has_two_passes() {
        let set = curve(&[pts(&[(0.0, 0.0), (50.0, 30.0), (100.0, 0.0)])], &options(Options::new()));
        assert_eq!(moves(&set), 2);
        let single = curve(&[pts(&[(0.0, 0.0), (50.0, 30.0), (100.0, 0.0)])], &options(Options::new().with_single_stroke(true)));
        assert_eq!(moves(&single), 1);
    }

    #[test]
    fn later_polylines_continue_the_path() {
        let lists = vec![
            pts(&[(0.0, 0.0), (50.0, 30.0), (100.0, 0.0)]),
            Vec::new(),
            pts(&[(100.0, 0.0), (150.0, 30.0), (200.0, 0.0)]),
        ];
        let set = curve(&lists, &options(Options::new()));
        assert_eq!(moves(&set), 2);
        assert_eq!(set.ops[0].kind(), OpKind::Move);
    }

    #[test]
    fn passes_are_independent() {
        let set = curve(&[pts(&[(0.0, 0.0), (50.0, 30.0), (100.0, 0.0)])], &options(Options::new()));
        let half = set.ops.len() / 2;
        assert_ne!(set.ops[..half], set.ops[half..]);
    }

    #[test]
    fn single_point_is_a_short_line() {
        let set = curve(&[pts(&[(5.0, 5.0)])], &options(Options::new().with_single_stroke(true)));
        assert_eq!(set.ops.len(), 2);
    }

    #[test]
    fn nothing_to_draw() {
        assert!(curve(&[], &options(Options::new())).is_empty());
        assert!(curve(&[Vec::new()], &options(Options::new())).is_empty());
    }
}
