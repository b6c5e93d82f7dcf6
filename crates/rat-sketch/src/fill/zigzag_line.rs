//! Zigzag-line fill: each hachure line redrawn as a run of sawtooth teeth.

use std::f64::consts::FRAC_PI_4;

use super::{left_to_right, polygon_hachure_lines};
use crate::geometry::Point;
use crate::ops::Op;
use crate::options::ResolvedOptions;
use crate::stroke::double_line;

/// Teeth are `2 * zigzag_offset` long; the scan gap widens by the same
/// offset so neighbouring rows don't touch.
pub fn zigzag_line_fill(polygons: &[Vec<Point>], o: &ResolvedOptions) -> Vec<Op> {
    let gap = o.hachure_gap_or_default();
    let zo = if o.zigzag_offset < 0.0 { gap } else { o.zigzag_offset };
    let mut ops = Vec::new();
    if !(zo > 0.0) {
        return ops;
    }

    let mut scan = o.clone();
    scan.hachure_gap = gap + zo;
    let lines = polygon_hachure_lines(polygons, &scan);

    let tooth = 2.0 * zo;
    let dz = (2.0 * zo * zo).sqrt();
    for line in &lines {
        let count = (line.length() / tooth).round() as usize;
        let (p1, alpha) = left_to_right(line);
        let along = |d: f64| Point::new(p1.x + d * alpha.cos(), p1.y + d * alpha.sin());

        for i in 0..count {
            let start = along(i as f64 * tooth);
            let end = along((i + 1) as f64 * tooth);
            let middle = Point::new(
                start.x + dz * (alpha + FRAC_PI_4).cos(),
                start.y + dz * (alpha + FRAC_PI_4).sin(),
            );
            ops.extend(double_line(start.x, start.y, middle.x, middle.y, &scan, true));
            ops.extend(double_line(middle.x, middle.y, end.x, end.y, &scan, true));
        }
    }
    ops
}

// ============================================================================
// TESTS
// ============================================================================
