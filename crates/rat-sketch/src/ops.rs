//! Drawing operations and their serialized forms.
//!
//! A [`Drawable`] is a list of [`OpSet`]s; each set is an ordered run of
//! [`Op`]s plus a tag saying how to paint it.

use std::fmt::Write as _;

use serde::Serialize;

use crate::options::{Color, ResolvedOptions};

/// One low-level drawing instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", content = "data", rename_all = "camelCase")]
pub enum Op {
    Move([f64; 2]),
    LineTo([f64; 2]),
    /// Control point 1, control point 2, end point.
    CubicCurveTo([f64; 6]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Move,
    LineTo,
    CubicCurveTo,
}

impl Op {
    pub fn kind(&self) -> OpKind {
        match self {
            Op::Move(_) => OpKind::Move,
            Op::LineTo(_) => OpKind::LineTo,
            Op::CubicCurveTo(_) => OpKind::CubicCurveTo,
        }
    }

    pub fn data(&self) -> &[f64] {
        match self {
            Op::Move(d) | Op::LineTo(d) => d.as_slice(),
            Op::CubicCurveTo(d) => d.as_slice(),
        }
    }
}

/// How an [`OpSet`] is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OpSetType {
    /// Outline, stroked with the stroke color.
    Stroke,
    /// Closed outline, filled with the fill color.
    FillStroke,
    /// Fill pattern lines, stroked with the fill color.
    FillSketch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpSet {
    #[serde(rename = "type")]
    pub kind: OpSetType,
    pub ops: Vec<Op>,
}

impl OpSet {
    pub fn new(kind: OpSetType, ops: Vec<Op>) -> Self {
        Self { kind, ops }
    }

    pub fn stroke(ops: Vec<Op>) -> Self {
        Self::new(OpSetType::Stroke, ops)
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// SVG path data for these ops.
    ///
    /// With `fixed_digits` every number is printed with exactly that many
    /// decimals.
    pub fn to_path_data(&self, fixed_digits: Option<usize>) -> String {
        let num = |v: f64| match fixed_digits {
            Some(digits) => format!("{v:.digits$}"),
            None => v.to_string(),
        };

        let mut path = String::new();
        for op in &self.ops {
            // Writing to a String can't fail.
            let _ = match op {
                Op::Move([x, y]) => write!(path, "M{} {} ", num(*x), num(*y)),
                Op::LineTo([x, y]) => write!(path, "L{} {} ", num(*x), num(*y)),
                Op::CubicCurveTo([x1, y1, x2, y2, x, y]) => write!(
                    path,
                    "C{} {}, {} {}, {} {} ",
                    num(*x1),
                    num(*y1),
                    num(*x2),
                    num(*y2),
                    num(*x),
                    num(*y)
                ),
            };
        }
        path.trim_end().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DrawableShape {
    Line,
    Rectangle,
    Ellipse,
    Circle,
    LinearPath,
    Arc,
    Curve,
    Polygon,
    Path,
}

/// The generated geometry for one shape.
///
/// Fill layers come before stroke layers.
#[derive(Debug, Clone, Serialize)]
pub struct Drawable {
    pub shape: DrawableShape,
    pub options: ResolvedOptions,
    pub sets: Vec<OpSet>,
}

/// A paint-ready path derived from one [`OpSet`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathInfo {
    pub d: String,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub fill: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_dash: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_dash_offset: Option<f64>,
}

impl Drawable {
    /// Convert every set into a [`PathInfo`], painted per its tag.
    pub fn to_paths(&self) -> Vec<PathInfo> {
        let o = &self.options;
        let digits = o.fixed_decimal_place_digits;
        self.sets
            .iter()
            .map(|set| {
                let d = set.to_path_data(digits);
                match set.kind {
                    OpSetType::Stroke => PathInfo {
                        d,
                        stroke: Some(o.stroke),
                        stroke_width: o.stroke_width,
                        fill: None,
                        line_dash: o.stroke_line_dash.clone(),
                        line_dash_offset: o.stroke_line_dash_offset,
                    },
                    OpSetType::FillStroke => PathInfo {
                        d,
                        stroke: None,
                        stroke_width: 0.0,
                        fill: o.fill,
                        line_dash: None,
                        line_dash_offset: None,
                    },
                    OpSetType::FillSketch => PathInfo {
                        d,
                        stroke: o.fill,
                        stroke_width: o.fill_weight_or_default(),
                        fill: None,
                        line_dash: o.fill_line_dash.clone(),
                        line_dash_offset: o.fill_line_dash_offset,
                    },
                }
            })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
