//! Dashed fill: hachure lines cut into evenly spaced dashes.

use super::{left_to_right, polygon_hachure_lines};
use crate::geometry::Point;
use crate::ops::Op;
use crate::options::ResolvedOptions;
use crate::stroke::double_line;

/// Dash and gap lengths fall back to the hachure gap when unset. The
/// leftover length is split evenly between both ends of a line.
pub fn dashed_fill(polygons: &[Vec<Point>], o: &ResolvedOptions) -> Vec<Op> {
    let lines = polygon_hachure_lines(polygons, o);
    let dash = if o.dash_offset < 0.0 { o.hachure_gap_or_default() } else { o.dash_offset };
    let gap = if o.dash_gap < 0.0 { o.hachure_gap_or_default() } else { o.dash_gap };

    let mut ops = Vec::new();
    let period = dash + gap;
    if !(period > 0.0) {
        return ops;
    }

    for line in &lines {
        let length = line.length();
        let count = (length / period).floor() as usize;
        let start_offset = (length + gap - count as f64 * period) / 2.0;
        let (p1, alpha) = left_to_right(line);
        let along = |d: f64| {
            let d = d + start_offset;
            Point::new(p1.x + d * alpha.cos(), p1.y + d * alpha.sin())
        };

        for i in 0..count {
            let start = along(i as f64 * period);
            let end = along(i as f64 * period + dash);
            ops.extend(double_line(start.x, start.y, end.x, end.y, o, true));
        }
    }
    ops
}

// ============================================================================
// TESTS
// ============================================================================
