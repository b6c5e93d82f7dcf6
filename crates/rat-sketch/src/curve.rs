//! Curve math: spline fitting, adaptive flattening and simplification.
//!
//! ## Curve Flattening
//!
//! Bézier chains are bisected until each piece is flat enough to stand in
//! for a straight segment. lyon_geom does the de Casteljau split; the
//! flatness test and the point collection rules live here.

use lyon_geom::{CubicBezierSegment, point};

use crate::geometry::Point;

/// Turn a point list into a cubic Bézier chain passing through every point.
///
/// The result is `start, (ctrl1, ctrl2, end)*`. `tightness` pulls the control
/// points toward the anchors: 0 gives a Catmull-Rom style spline, 1 gives
/// straight segments.
///
/// # Panics
///
/// Panics when given fewer than three points.
pub fn curve_to_bezier(points: &[Point], tightness: f64) -> Vec<Point> {
    assert!(points.len() >= 3, "a curve needs at least three points, got {}", points.len());

    if points.len() == 3 {
        return vec![points[0], points[1], points[2], points[2]];
    }

    // Phantom anchors at both ends.
    let mut padded = Vec::with_capacity(points.len() + 2);
    padded.push(points[0]);
    padded.extend_from_slice(points);
    padded.push(points[points.len() - 1]);

    let s = 1.0 - tightness;
    let mut out = Vec::with_capacity(1 + 3 * (points.len() - 1));
    out.push(padded[0]);
    for w in padded.windows(4) {
        let (prev, cur, next, after) = (w[0], w[1], w[2], w[3]);
        out.push(Point::new(
            cur.x + (s * next.x - s * prev.x) / 6.0,
            cur.y + (s * next.y - s * prev.y) / 6.0,
        ));
        out.push(Point::new(
            next.x + (s * cur.x - s * after.x) / 6.0,
            next.y + (s * cur.y - s * after.y) / 6.0,
        ));
        out.push(next);
    }
    out
}

#[inline]
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Squared distance from `p` to the segment `v..w`.
pub fn distance_to_segment_squared(p: Point, v: Point, w: Point) -> f64 {
    let l2 = v.distance_squared(w);
    if l2 == 0.0 {
        return p.distance_squared(v);
    }
    let t = (((p.x - v.x) * (w.x - v.x) + (p.y - v.y) * (w.y - v.y)) / l2).clamp(0.0, 1.0);
    p.distance_squared(lerp(v, w, t))
}

/// How far the cubic starting at `points[offset]` strays from its chord.
///
/// Zero for a straight, evenly parameterized cubic.
pub fn flatness(points: &[Point], offset: usize) -> f64 {
    let (p1, p2, p3, p4) = (points[offset], points[offset + 1], points[offset + 2], points[offset + 3]);

    let ux = (3.0 * p2.x - 2.0 * p1.x - p4.x).powi(2);
    let uy = (3.0 * p2.y - 2.0 * p1.y - p4.y).powi(2);
    let vx = (3.0 * p3.x - 2.0 * p4.x - p1.x).powi(2);
    let vy = (3.0 * p3.y - 2.0 * p4.y - p1.y).powi(2);

    ux.max(vx) + uy.max(vy)
}

fn flatten_cubic(piece: [Point; 4], tolerance: f64, out: &mut Vec<Point>) {
    if flatness(&piece, 0) < tolerance {
        let p0 = piece[0];
        match out.last() {
            Some(last) if last.distance(p0) <= 1.0 => {}
            _ => out.push(p0),
        }
        out.push(piece[3]);
        return;
    }

    let segment = CubicBezierSegment {
        from: point(piece[0].x, piece[0].y),
        ctrl1: point(piece[1].x, piece[1].y),
        ctrl2: point(piece[2].x, piece[2].y),
        to: point(piece[3].x, piece[3].y),
    };
    let (left, right) = segment.split(0.5);
    flatten_cubic(to_points(&left), tolerance, out);
    flatten_cubic(to_points(&right), tolerance, out);
}

fn to_points(s: &CubicBezierSegment<f64>) -> [Point; 4] {
    [
        Point::new(s.from.x, s.from.y),
        Point::new(s.ctrl1.x, s.ctrl1.y),
        Point::new(s.ctrl2.x, s.ctrl2.y),
        Point::new(s.to.x, s.to.y),
    ]
}

/// Flatten a `start, (ctrl1, ctrl2, end)*` chain into a polyline.
///
/// A flat piece contributes its start point only when that start is more
/// than one unit from the last collected point, then always its end point.
/// With `distance > 0` the polyline is simplified afterwards.
pub fn points_on_bezier_curves(points: &[Point], tolerance: f64, distance: f64) -> Vec<Point> {
    let mut out = Vec::new();
    let segments = points.len().saturating_sub(1) / 3;
    for i in 0..segments {
        let o = i * 3;
        flatten_cubic([points[o], points[o + 1], points[o + 2], points[o + 3]], tolerance, &mut out);
    }

    if distance > 0.0 {
        simplify(&out, distance)
    } else {
        out
    }
}

/// Douglas-Peucker simplification.
///
/// Points closer than `epsilon` to the chord of their run are dropped.
pub fn simplify(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut out = Vec::new();
    simplify_run(points, 0, points.len(), epsilon, &mut out);
    out
}

fn simplify_run(points: &[Point], start: usize, end: usize, epsilon: f64, out: &mut Vec<Point>) {
    let s = points[start];
    let e = points[end - 1];

    let mut max_dist_sq = 0.0;
    let mut max_index = start;
    for i in start + 1..end.saturating_sub(1) {
        let dist_sq = distance_to_segment_squared(points[i], s, e);
        if dist_sq > max_dist_sq {
            max_dist_sq = dist_sq;
            max_index = i;
        }
    }

    if max_dist_sq > 0.0 && max_dist_sq.sqrt() > epsilon {
        simplify_run(points, start, max_index + 1, epsilon, out);
        simplify_run(points, max_index, end, epsilon, out);
    } else {
        if out.is_empty() {
            out.push(s);
        }
        out.push(e);
    }
}

// ============================================================================
// TESTS
// ============================================================================
