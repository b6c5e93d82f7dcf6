//! Sketchy rendering of SVG path data.

use super::{double_line, offset_opt};
use crate::error::PathError;
use crate::geometry::Point;
use crate::ops::{Op, OpSet};
use crate::options::ResolvedOptions;
use crate::path::normalized_segments;

/// Stroke path data segment by segment.
///
/// Straight segments and closes become double lines; cubics are redrawn
/// with jittered control points.
pub fn svg_path(d: &str, o: &ResolvedOptions) -> Result<OpSet, PathError> {
    let segments = normalized_segments(d)?;

    let mut ops = Vec::new();
    let mut first = Point::default();
    let mut current = Point::default();

    for segment in &segments {
        let data = &segment.data;
        match segment.key {
            'M' => {
                current = Point::new(data[0], data[1]);
                first = current;
            }
            'L' => {
                ops.extend(double_line(current.x, current.y, data[0], data[1], o, false));
                current = Point::new(data[0], data[1]);
            }
            'C' => {
                let controls = [data[0], data[1], data[2], data[3], data[4], data[5]];
                ops.extend(bezier_to(controls, current, o));
                current = Point::new(data[4], data[5]);
            }
            'Z' => {
                ops.extend(double_line(current.x, current.y, first.x, first.y, o, false));
                current = first;
            }
            _ => {}
        }
    }
    Ok(OpSet::stroke(ops))
}

/// One or two jittered passes of a cubic from `current`.
fn bezier_to(c: [f64; 6], current: Point, o: &ResolvedOptions) -> Vec<Op> {
    let [x1, y1, x2, y2, x, y] = c;
    let base = if o.max_randomness_offset == 0.0 { 1.0 } else { o.max_randomness_offset };
    let jitters = [base, base + 0.3];
    let passes = if o.disable_multi_stroke { 1 } else { 2 };
    let jitter = |r: f64| offset_opt(r, o, 1.0);

    let mut ops = Vec::with_capacity(passes * 2);
    for (i, &r) in jitters.iter().take(passes).enumerate() {
        if i == 0 || o.preserve_vertices {
            ops.push(Op::Move([current.x, current.y]));
        } else {
            let mx = current.x + jitter(jitters[0]);
            let my = current.y + jitter(jitters[0]);
            ops.push(Op::Move([mx, my]));
        }

        let end = if o.preserve_vertices {
            Point::new(x, y)
        } else {
            let ex = x + jitter(r);
            let ey = y + jitter(r);
            Point::new(ex, ey)
        };
        let c1x = x1 + jitter(r);
        let c1y = y1 + jitter(r);
        let c2x = x2 + jitter(r);
        let c2y = y2 + jitter(r);
        ops.push(Op::CubicCurveTo([c1x, c1y, c2x, c2y, end.x, end.y]));
    }
    ops
}

// ============================================================================
// TESTS
// ============================================================================
