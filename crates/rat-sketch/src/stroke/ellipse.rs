//! Ellipses and elliptical arcs.
//!
//! Both are sampled into points around the center and fitted with
//! [`curve_ops`]. An ellipse's first pass overshoots its start a little so
//! the stroke visibly overlaps where it closes.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::Serialize;

use super::curve::curve_ops;
use super::{double_line, offset, offset_opt};
use crate::geometry::Point;
use crate::ops::{Op, OpSet};
use crate::options::ResolvedOptions;

/// Sampling plan for one ellipse, computed once per shape so the outline
/// and a solid fill trace the same radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EllipseParams {
    /// Angle between samples, in radians.
    pub increment: f64,
    pub rx: f64,
    pub ry: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EllipseResult {
    pub opset: OpSet,
    /// The jittered points of the first pass, used for pattern fills.
    pub estimated_points: Vec<Point>,
}

/// Step count grows with the perimeter; radii are jittered by
/// `1 - curve_fitting`.
pub fn ellipse_params(width: f64, height: f64, o: &ResolvedOptions) -> EllipseParams {
    let psq = (TAU * (((width / 2.0).powi(2) + (height / 2.0).powi(2)) / 2.0).sqrt()).sqrt();
    let steps = o.curve_step_count.max(o.curve_step_count / 200f64.sqrt() * psq).ceil();
    let increment = TAU / steps;

    let fit_randomness = 1.0 - o.curve_fitting;
    let mut rx = (width / 2.0).abs();
    let mut ry = (height / 2.0).abs();
    rx += offset_opt(rx * fit_randomness, o, 1.0);
    ry += offset_opt(ry * fit_randomness, o, 1.0);

    EllipseParams { increment, rx, ry }
}

pub fn ellipse(x: f64, y: f64, width: f64, height: f64, o: &ResolvedOptions) -> OpSet {
    let params = ellipse_params(width, height, o);
    ellipse_with_params(x, y, &params, o).opset
}

/// Sketchy ellipse centered at `(x, y)`.
pub fn ellipse_with_params(x: f64, y: f64, params: &EllipseParams, o: &ResolvedOptions) -> EllipseResult {
    if !(params.increment.is_finite() && params.increment > 0.0) {
        return EllipseResult { opset: OpSet::stroke(Vec::new()), estimated_points: Vec::new() };
    }

    let overlap = params.increment * offset(0.1, offset(0.4, 1.0, o, 1.0), o, 1.0);
    let (all, core) = ellipse_points(params, x, y, 1.0, overlap, o);
    let mut ops = curve_ops(&all, o);

    if !o.disable_multi_stroke && o.roughness != 0.0 {
        let (all, _) = ellipse_points(params, x, y, 1.5, 0.0, o);
        ops.extend(curve_ops(&all, o));
    }

    EllipseResult { opset: OpSet::stroke(ops), estimated_points: core }
}

/// Returns `(all, core)`: every spline point including the steering ones,
/// and just the points on the ellipse.
fn ellipse_points(
    params: &EllipseParams,
    cx: f64,
    cy: f64,
    jitter: f64,
    overlap: f64,
    o: &ResolvedOptions,
) -> (Vec<Point>, Vec<Point>) {
    let (rx, ry) = (params.rx, params.ry);
    let at = |scale: f64, angle: f64| Point::new(cx + scale * rx * angle.cos(), cy + scale * ry * angle.sin());
    let mut core = Vec::new();
    let mut all = Vec::new();

    if o.roughness == 0.0 {
        let increment = params.increment / 4.0;
        all.push(at(1.0, -increment));
        let mut angle = 0.0;
        while angle <= TAU {
            let p = at(1.0, angle);
            core.push(p);
            all.push(p);
            angle += increment;
        }
        all.push(at(1.0, 0.0));
        all.push(at(1.0, increment));
        return (all, core);
    }

    let jittered = |scale: f64, angle: f64| {
        let x = offset_opt(jitter, o, 1.0) + cx + scale * rx * angle.cos();
        let y = offset_opt(jitter, o, 1.0) + cy + scale * ry * angle.sin();
        Point::new(x, y)
    };

    let rad_offset = offset_opt(0.5, o, 1.0) - FRAC_PI_2;
    all.push(jittered(0.9, rad_offset - params.increment));

    let end = TAU + rad_offset - 0.01;
    let mut angle = rad_offset;
    while angle < end {
        let p = jittered(1.0, angle);
        core.push(p);
        all.push(p);
        angle += params.increment;
    }

    all.push(jittered(1.0, rad_offset + TAU + overlap * 0.5));
    all.push(jittered(0.98, rad_offset + overlap));
    all.push(jittered(0.9, rad_offset + overlap * 0.5));
    (all, core)
}

/// Center, jittered radii and normalized angles of an arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcFrame {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub start: f64,
    pub stop: f64,
}

impl ArcFrame {
    /// Negative start angles are shifted up by full turns, and a span of
    /// more than one turn collapses to `[0, 2π]`.
    pub fn new(x: f64, y: f64, width: f64, height: f64, start: f64, stop: f64, o: &ResolvedOptions) -> Self {
        let mut rx = (width / 2.0).abs();
        let mut ry = (height / 2.0).abs();
        rx += offset_opt(rx * 0.01, o, 1.0);
        ry += offset_opt(ry * 0.01, o, 1.0);

        let (mut start, mut stop) = (start, stop);
        if start.is_finite() {
            while start < 0.0 {
                start += TAU;
                stop += TAU;
            }
        }
        if stop - start > TAU {
            start = 0.0;
            stop = TAU;
        }

        Self { cx: x, cy: y, rx, ry, start, stop }
    }

    pub fn point_at(&self, angle: f64) -> Point {
        Point::new(self.cx + self.rx * angle.cos(), self.cy + self.ry * angle.sin())
    }

    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }
}

/// Sketchy arc. When `closed`, the pie edges back to the center are drawn
/// as rough lines, or as plain `LineTo`s without `rough_closure`.
pub fn arc(frame: &ArcFrame, closed: bool, rough_closure: bool, o: &ResolvedOptions) -> OpSet {
    let increment = (TAU / o.curve_step_count / 2.0).min((frame.stop - frame.start) / 2.0);
    if !(increment.is_finite() && increment > 0.0) {
        return OpSet::stroke(Vec::new());
    }

    let mut ops = arc_pass(frame, increment, 1.0, o);
    if !o.disable_multi_stroke {
        ops.extend(arc_pass(frame, increment, 1.5, o));
    }

    if closed {
        let center = frame.center();
        let (first, last) = (frame.point_at(frame.start), frame.point_at(frame.stop));
        if rough_closure {
            ops.extend(double_line(center.x, center.y, first.x, first.y, o, false));
            ops.extend(double_line(center.x, center.y, last.x, last.y, o, false));
        } else {
            ops.push(Op::LineTo([center.x, center.y]));
            ops.push(Op::LineTo([first.x, first.y]));
        }
    }
    OpSet::stroke(ops)
}

fn arc_pass(frame: &ArcFrame, increment: f64, jitter: f64, o: &ResolvedOptions) -> Vec<Op> {
    let jittered = |scale: f64, angle: f64| {
        let x = offset_opt(jitter, o, 1.0) + frame.cx + scale * frame.rx * angle.cos();
        let y = offset_opt(jitter, o, 1.0) + frame.cy + scale * frame.ry * angle.sin();
        Point::new(x, y)
    };

    let rad_offset = frame.start + offset_opt(0.1, o, 1.0);
    let mut points = vec![jittered(0.9, rad_offset - increment)];
    let mut angle = rad_offset;
    while angle <= frame.stop {
        points.push(jittered(1.0, angle));
        angle += increment;
    }
    let end = frame.point_at(frame.stop);
    points.push(end);
    points.push(end);
    curve_ops(&points, o)
}

// ============================================================================
// TESTS
// ============================================================================
