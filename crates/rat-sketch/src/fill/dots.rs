//! Dot fill: small sketchy circles scattered along vertical scan lines.

use super::polygon_hachure_lines;
use crate::geometry::Point;
use crate::ops::Op;
use crate::options::ResolvedOptions;
use crate::stroke::ellipse;

pub fn dots_fill(polygons: &[Vec<Point>], o: &ResolvedOptions) -> Vec<Op> {
    let mut o = o.clone();
    o.hachure_angle = 0.0;
    let lines = polygon_hachure_lines(polygons, &o);

    let gap = o.hachure_gap_or_default().max(0.1);
    let weight = o.fill_weight_or_default();
    let spread = gap / 4.0;

    let mut ops = Vec::new();
    for line in &lines {
        let length = line.length();
        let count = ((length / gap).ceil() - 1.0).max(0.0) as usize;
        let offset = length - count as f64 * gap;
        let x = (line.x1 + line.x2) / 2.0 - gap / 4.0;
        let min_y = line.y1.min(line.y2);

        for i in 0..count {
            let y = min_y + offset + i as f64 * gap;
            let cx = x - spread + o.random() * 2.0 * spread;
            let cy = y - spread + o.random() * 2.0 * spread;
            ops.extend(ellipse(cx, cy, weight, weight, &o).ops);
        }
    }
    ops
}

// ============================================================================
// TESTS
// ============================================================================
