//! Zigzag fill: every hachure line becomes a pair of slanted lines that
//! meet at its far end.

use super::{polygon_hachure_lines, render_lines};
use crate::geometry::{Line, Point};
use crate::ops::Op;
use crate::options::ResolvedOptions;

pub fn zigzag_fill(polygons: &[Vec<Point>], o: &ResolvedOptions) -> Vec<Op> {
    let gap = o.hachure_gap_or_default().max(0.1);
    let mut scan = o.clone();
    scan.hachure_gap = gap;
    let lines = polygon_hachure_lines(polygons, &scan);

    let angle = o.hachure_angle.to_radians();
    let dgx = gap * 0.5 * angle.cos();
    let dgy = gap * 0.5 * angle.sin();

    let mut zigzag = Vec::with_capacity(lines.len() * 2);
    for line in lines.iter().filter(|l| l.length() > 0.0) {
        zigzag.push(Line::new(line.x1 - dgx, line.y1 + dgy, line.x2, line.y2));
        zigzag.push(Line::new(line.x1 + dgx, line.y1 - dgy, line.x2, line.y2));
    }
    render_lines(&zigzag, o)
}

// ============================================================================
// TESTS
// ============================================================================
