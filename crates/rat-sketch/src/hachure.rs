//! Scanline hachure generation.
//!
//! Produces evenly spaced parallel segments covering a set of polygons.
//! The polygons are rotated so the hachure direction becomes horizontal, a
//! classic active-edge-table scan sweeps them bottom to top, and the
//! resulting segments are rotated back.
//!
//! ## Rust Lesson #17: Sorting floats
//!
//! `f64` is only `PartialOrd` (NaN breaks total order), so `sort_by` needs
//! an explicit comparator. `total_cmp` gives a total order that agrees with
//! `<` for every finite value.

use std::cmp::Ordering;

use crate::geometry::{Line, Point, rotate_lines, rotate_points};

/// A polygon edge waiting for the scanline to reach it.
#[derive(Debug, Clone, Copy)]
struct EdgeEntry {
    y_min: f64,
    y_max: f64,
    /// X at the current scanline (starts at `y_min`).
    x: f64,
    /// dx/dy.
    inverse_slope: f64,
}

/// An edge the scanline currently crosses.
#[derive(Debug, Clone, Copy)]
struct ActiveEdge {
    edge: EdgeEntry,
}

/// Hachure segments covering `polygons`.
///
/// `angle` is in degrees. With `step == 1` a scanline is emitted every
/// `gap` units; any other step emits on every scanline, `step` apart.
/// The input polygons are left untouched.
pub fn hachure_lines(polygons: &[Vec<Point>], gap: f64, angle: f64, step: f64) -> Vec<Line> {
    let gap = gap.max(0.1);
    let origin = Point::new(0.0, 0.0);

    if angle == 0.0 {
        return straight_hachure_lines(polygons, gap, step);
    }

    let rotated: Vec<Vec<Point>> = polygons.iter().map(|p| rotate_points(p, origin, angle)).collect();
    let lines = straight_hachure_lines(&rotated, gap, step);
    rotate_lines(&lines, origin, -angle)
}

fn straight_hachure_lines(polygons: &[Vec<Point>], gap: f64, step: f64) -> Vec<Line> {
    let mut edges = Vec::new();
    for polygon in polygons {
        let (Some(&first), Some(&last)) = (polygon.first(), polygon.last()) else {
            continue;
        };
        let mut vertices = polygon.clone();
        if first != last {
            vertices.push(first);
        }
        if vertices.len() <= 2 {
            continue;
        }

        for w in vertices.windows(2) {
            let (p1, p2) = (w[0], w[1]);
            if p1.y == p2.y {
                continue;
            }
            let y_min = p1.y.min(p2.y);
            edges.push(EdgeEntry {
                y_min,
                y_max: p1.y.max(p2.y),
                x: if y_min == p1.y { p1.x } else { p2.x },
                inverse_slope: (p2.x - p1.x) / (p2.y - p1.y),
            });
        }
    }

    edges.sort_by(|a, b| {
        a.y_min
            .total_cmp(&b.y_min)
            .then(a.x.total_cmp(&b.x))
            .then(a.y_max.total_cmp(&b.y_max))
    });

    let mut lines = Vec::new();
    let Some(mut y) = edges.first().map(|e| e.y_min) else {
        return lines;
    };

    let mut pending = edges.into_iter().peekable();
    let mut active: Vec<ActiveEdge> = Vec::new();
    let mut iteration: u64 = 0;

    while !active.is_empty() || pending.peek().is_some() {
        while let Some(edge) = pending.next_if(|e| e.y_min <= y) {
            active.push(ActiveEdge { edge });
        }

        active.retain(|a| a.edge.y_max > y);
        active.sort_by(|a, b| a.edge.x.partial_cmp(&b.edge.x).unwrap_or(Ordering::Equal));

        if step != 1.0 || (iteration as f64) % gap == 0.0 {
            for pair in active.chunks_exact(2) {
                lines.push(Line::new(pair[0].edge.x.round(), y, pair[1].edge.x.round(), y));
            }
        }

        y += step;
        for a in &mut active {
            a.edge.x += step * a.edge.inverse_slope;
        }
        iteration += 1;
    }

    log::trace!("hachure scan produced {} lines", lines.len());
    lines
}

// ============================================================================
// TESTS
// ============================================================================
