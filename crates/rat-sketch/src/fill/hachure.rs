//! Plain and crossed hachure.

use super::{polygon_hachure_lines, render_lines};
use crate::geometry::Point;
use crate::ops::Op;
use crate::options::ResolvedOptions;

pub fn hachure_fill(polygons: &[Vec<Point>], o: &ResolvedOptions) -> Vec<Op> {
    render_lines(&polygon_hachure_lines(polygons, o), o)
}

/// Hachure at the configured angle, then again at a right angle to it.
pub fn cross_hatch_fill(polygons: &[Vec<Point>], o: &ResolvedOptions) -> Vec<Op> {
    let mut ops = hachure_fill(polygons, o);
    let mut crossed = o.clone();
    crossed.hachure_angle += 90.0;
    ops.extend(hachure_fill(polygons, &crossed));
    ops
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn square() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0), Point::new(0.0, 100.0)]
    }

    fn smooth() -> ResolvedOptions {
        ResolvedOptions::default().merge(
            &Options::new().with_seed(1).with_roughness(0.0).with_hachure_gap(10.0).with_hachure_angle(0.0),
        )
    }

    #[test]
    fn one_double_line_per_scan_line() {
        // Angle 0 scans vertical lines across the square.
        let ops = hachure_fill(&[square()], &smooth());
        assert_eq!(ops.len(), 10 * 4);
    }

    #[test]
    fn cross_hatch_doubles_the_lines() {
        let ops = cross_hatch_fill(&[square()], &smooth());
        assert_eq!(ops.len(), 2 * 10 * 4);
    }

    #[test]
    fn single_stroke_fill_halves_the_ops() {
        let o = smooth().merge(&Options { disable_multi_stroke_fill: Some(true), seed: Some(1), ..Options::new() });
        assert_eq!(hachure_fill(&[square()], &o).len(), 10 * 2);
    }
}
