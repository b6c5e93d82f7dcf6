//! Reduce absolute path segments to `M`, `L`, `C` and `Z`.
//!
//! Quadratics are degree-elevated to cubics and elliptical arcs are split
//! into cubic pieces of at most 120 degrees each.

use std::f64::consts::PI;

use super::parse::Segment;
use crate::error::PathError;

const MAX_ARC_PIECE: f64 = PI * 120.0 / 180.0;

/// Normalize absolute segments (see [`super::absolutize`]) to `M L C Z`.
pub fn normalize(segments: &[Segment]) -> Result<Vec<Segment>, PathError> {
    let mut out = Vec::with_capacity(segments.len());
    let mut last_key = '\0';
    let (mut cx, mut cy) = (0.0, 0.0);
    let (mut subx, mut suby) = (0.0, 0.0);
    // Last control point, for smooth reflections.
    let (mut lcx, mut lcy) = (0.0, 0.0);

    for segment in segments {
        segment.check()?;
        let d = &segment.data;
        match segment.key {
            'M' => {
                out.push(segment.clone());
                (cx, cy) = (d[0], d[1]);
                (subx, suby) = (cx, cy);
            }
            'C' => {
                out.push(segment.clone());
                (cx, cy) = (d[4], d[5]);
                (lcx, lcy) = (d[2], d[3]);
            }
            'L' => {
                out.push(segment.clone());
                (cx, cy) = (d[0], d[1]);
            }
            'H' => {
                cx = d[0];
                out.push(Segment::new('L', vec![cx, cy]));
            }
            'V' => {
                cy = d[0];
                out.push(Segment::new('L', vec![cx, cy]));
            }
            'S' => {
                let (cx1, cy1) = if matches!(last_key, 'C' | 'S') {
                    (cx + (cx - lcx), cy + (cy - lcy))
                } else {
                    (cx, cy)
                };
                out.push(Segment::new('C', vec![cx1, cy1, d[0], d[1], d[2], d[3]]));
                (lcx, lcy) = (d[0], d[1]);
                (cx, cy) = (d[2], d[3]);
            }
            'T' | 'Q' => {
                let (x1, y1, x, y) = if segment.key == 'Q' {
                    (d[0], d[1], d[2], d[3])
                } else if matches!(last_key, 'Q' | 'T') {
                    (cx + (cx - lcx), cy + (cy - lcy), d[0], d[1])
                } else {
                    (cx, cy, d[0], d[1])
                };
                out.push(Segment::new(
                    'C',
                    vec![
                        cx + 2.0 * (x1 - cx) / 3.0,
                        cy + 2.0 * (y1 - cy) / 3.0,
                        x + 2.0 * (x1 - x) / 3.0,
                        y + 2.0 * (y1 - y) / 3.0,
                        x,
                        y,
                    ],
                ));
                (lcx, lcy) = (x1, y1);
                (cx, cy) = (x, y);
            }
            'A' => {
                let r1 = d[0].abs();
                let r2 = d[1].abs();
                let (ax, ay) = (d[5], d[6]);
                if r1 == 0.0 || r2 == 0.0 {
                    out.push(Segment::new('C', vec![cx, cy, ax, ay, ax, ay]));
                    (cx, cy) = (ax, ay);
                } else if cx != ax || cy != ay {
                    let arc = Arc {
                        x1: cx,
                        y1: cy,
                        x2: ax,
                        y2: ay,
                        r1,
                        r2,
                        angle: d[2],
                        large_arc: d[3] != 0.0,
                        sweep: d[4] != 0.0,
                    };
                    out.extend(arc_to_cubic_curves(&arc).into_iter().map(|c| Segment::new('C', c.to_vec())));
                    (cx, cy) = (ax, ay);
                }
            }
            'Z' => {
                out.push(Segment::new('Z', Vec::new()));
                (cx, cy) = (subx, suby);
            }
            _ => {}
        }
        last_key = segment.key;
    }

    Ok(out)
}

/// An SVG elliptical arc from `(x1, y1)` to `(x2, y2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub r1: f64,
    pub r2: f64,
    /// X-axis rotation in degrees.
    pub angle: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Convert an arc to cubic Bézier pieces, each `[x1, y1, x2, y2, x, y]`.
pub fn arc_to_cubic_curves(arc: &Arc) -> Vec<[f64; 6]> {
    let angle = arc.angle.to_radians();

    // Work in the ellipse's own frame.
    let (x1, y1) = rotate(arc.x1, arc.y1, -angle);
    let (x2, y2) = rotate(arc.x2, arc.y2, -angle);
    let (mut r1, mut r2) = (arc.r1, arc.r2);

    let x = (x1 - x2) / 2.0;
    let y = (y1 - y2) / 2.0;
    let h = x * x / (r1 * r1) + y * y / (r2 * r2);
    if h > 1.0 {
        let h = h.sqrt();
        r1 *= h;
        r2 *= h;
    }

    let sign = if arc.large_arc == arc.sweep { -1.0 } else { 1.0 };
    let r1_sq = r1 * r1;
    let r2_sq = r2 * r2;
    let left = r1_sq * r2_sq - r1_sq * y * y - r2_sq * x * x;
    let right = r1_sq * y * y + r2_sq * x * x;
    let k = sign * (left / right).abs().sqrt();

    let cx = k * r1 * y / r2 + (x1 + x2) / 2.0;
    let cy = k * -r2 * x / r1 + (y1 + y2) / 2.0;

    let mut f1 = clamped_asin((y1 - cy) / r2);
    let mut f2 = clamped_asin((y2 - cy) / r2);
    if x1 < cx {
        f1 = PI - f1;
    }
    if x2 < cx {
        f2 = PI - f2;
    }
    if f1 < 0.0 {
        f1 += PI * 2.0;
    }
    if f2 < 0.0 {
        f2 += PI * 2.0;
    }
    if arc.sweep && f1 > f2 {
        f1 -= PI * 2.0;
    }
    if !arc.sweep && f2 > f1 {
        f2 -= PI * 2.0;
    }

    let ellipse = LocalEllipse { cx, cy, r1, r2, sweep: arc.sweep };
    let mut points = Vec::new();
    ellipse.pieces((x1, y1), (x2, y2), f1, f2, &mut points);

    points
        .chunks_exact(3)
        .map(|c| {
            let (ax, ay) = rotate(c[0].0, c[0].1, angle);
            let (bx, by) = rotate(c[1].0, c[1].1, angle);
            let (ex, ey) = rotate(c[2].0, c[2].1, angle);
            [ax, ay, bx, by, ex, ey]
        })
        .collect()
}

/// The solved ellipse in its unrotated frame.
struct LocalEllipse {
    cx: f64,
    cy: f64,
    r1: f64,
    r2: f64,
    sweep: bool,
}

impl LocalEllipse {
    /// Push control point triples for the span `f1..f2`, splitting it until
    /// each piece is at most 120 degrees.
    fn pieces(&self, start: (f64, f64), end: (f64, f64), f1: f64, f2: f64, out: &mut Vec<(f64, f64)>) {
        let (mut x2, mut y2) = end;
        let mut f2_piece = f2;
        let mut rest = None;

        if (f2 - f1).abs() > MAX_ARC_PIECE {
            f2_piece = if self.sweep && f2 > f1 {
                f1 + MAX_ARC_PIECE
            } else {
                f1 - MAX_ARC_PIECE
            };
            x2 = self.cx + self.r1 * f2_piece.cos();
            y2 = self.cy + self.r2 * f2_piece.sin();
            rest = Some(((x2, y2), end, f2_piece, f2));
        }

        let df = f2_piece - f1;
        let (s1, c1) = f1.sin_cos();
        let (s2, c2) = f2_piece.sin_cos();
        let t = (df / 4.0).tan();
        let hx = 4.0 / 3.0 * self.r1 * t;
        let hy = 4.0 / 3.0 * self.r2 * t;

        let (x1, y1) = start;
        out.push((2.0 * x1 - (x1 + hx * s1), 2.0 * y1 - (y1 - hy * c1)));
        out.push((x2 + hx * s2, y2 - hy * c2));
        out.push((x2, y2));

        if let Some((from, to, g1, g2)) = rest {
            log::trace!("splitting arc span {:.3} rad", (g2 - g1).abs());
            self.pieces(from, to, g1, g2, out);
        }
    }
}

fn rotate(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

/// `asin` of a ratio rounded to 9 decimals, so ratios that drift past ±1
/// from floating error still land on the ellipse.
fn clamped_asin(ratio: f64) -> f64 {
    ((ratio * 1e9).round() / 1e9).clamp(-1.0, 1.0).asin()
}

// ============================================================================
// TESTS
// ============================================================================
