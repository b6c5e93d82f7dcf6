//! Drawing options.
//!
//! [`Options`] is the sparse, caller-facing form: every field is optional,
//! and it deserializes from YAML or JSON with snake_case keys.
//! [`ResolvedOptions`] is what the algorithms read: every field is set and
//! it carries the random stream for the shape being drawn.
//!
//! A few numeric fields use `-1` to mean "derive from the stroke width";
//! the `*_or_default` helpers do that derivation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rng::Randomizer;

/// An RGBA color, written and read as a CSS color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = svgtypes::Color::from_str(s.trim()).map_err(|e| format!("invalid color {s:?}: {e}"))?;
        Ok(Color::rgba(c.red, c.green, c.blue, c.alpha))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = f64::from(self.a) / 255.0;
            write!(f, "rgba({},{},{},{:.3})", self.r, self.g, self.b, alpha)
        }
    }
}

/// How a closed shape's interior is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStyle {
    #[default]
    Hachure,
    Solid,
    #[serde(rename = "zigzag")]
    ZigZag,
    CrossHatch,
    Dots,
    Dashed,
    ZigzagLine,
}

impl FillStyle {
    pub fn all() -> &'static [FillStyle] {
        &[
            FillStyle::Hachure,
            FillStyle::Solid,
            FillStyle::ZigZag,
            FillStyle::CrossHatch,
            FillStyle::Dots,
            FillStyle::Dashed,
            FillStyle::ZigzagLine,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FillStyle::Hachure => "hachure",
            FillStyle::Solid => "solid",
            FillStyle::ZigZag => "zigzag",
            FillStyle::CrossHatch => "cross-hatch",
            FillStyle::Dots => "dots",
            FillStyle::Dashed => "dashed",
            FillStyle::ZigzagLine => "zigzag-line",
        }
    }

    /// Look up a style by name. Case and `-`/`_` are ignored.
    pub fn from_name(name: &str) -> Option<FillStyle> {
        match name.to_lowercase().replace('_', "-").as_str() {
            "hachure" => Some(FillStyle::Hachure),
            "solid" => Some(FillStyle::Solid),
            "zigzag" | "zig-zag" => Some(FillStyle::ZigZag),
            "cross-hatch" | "crosshatch" => Some(FillStyle::CrossHatch),
            "dots" => Some(FillStyle::Dots),
            "dashed" => Some(FillStyle::Dashed),
            "zigzag-line" => Some(FillStyle::ZigzagLine),
            _ => None,
        }
    }
}

/// Sparse drawing options. Unset fields fall through to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub max_randomness_offset: Option<f64>,
    pub roughness: Option<f64>,
    pub bowing: Option<f64>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
    pub curve_fitting: Option<f64>,
    pub curve_tightness: Option<f64>,
    pub curve_step_count: Option<f64>,
    pub fill: Option<Color>,
    pub fill_style: Option<FillStyle>,
    pub fill_weight: Option<f64>,
    pub hachure_angle: Option<f64>,
    pub hachure_gap: Option<f64>,
    pub simplification: Option<f64>,
    pub dash_offset: Option<f64>,
    pub dash_gap: Option<f64>,
    pub zigzag_offset: Option<f64>,
    pub seed: Option<u64>,
    pub stroke_line_dash: Option<Vec<f64>>,
    pub stroke_line_dash_offset: Option<f64>,
    pub fill_line_dash: Option<Vec<f64>>,
    pub fill_line_dash_offset: Option<f64>,
    pub disable_multi_stroke: Option<bool>,
    pub disable_multi_stroke_fill: Option<bool>,
    pub preserve_vertices: Option<bool>,
    pub fixed_decimal_place_digits: Option<usize>,
    pub fill_shape_roughness_gain: Option<f64>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_roughness(mut self, roughness: f64) -> Self {
        self.roughness = Some(roughness);
        self
    }

    pub fn with_bowing(mut self, bowing: f64) -> Self {
        self.bowing = Some(bowing);
        self
    }

    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_fill_style(mut self, style: FillStyle) -> Self {
        self.fill_style = Some(style);
        self
    }

    pub fn with_fill_weight(mut self, weight: f64) -> Self {
        self.fill_weight = Some(weight);
        self
    }

    pub fn with_hachure_angle(mut self, degrees: f64) -> Self {
        self.hachure_angle = Some(degrees);
        self
    }

    pub fn with_hachure_gap(mut self, gap: f64) -> Self {
        self.hachure_gap = Some(gap);
        self
    }

    pub fn with_simplification(mut self, simplification: f64) -> Self {
        self.simplification = Some(simplification);
        self
    }

    pub fn with_single_stroke(mut self, single: bool) -> Self {
        self.disable_multi_stroke = Some(single);
        self.disable_multi_stroke_fill = Some(single);
        self
    }

    pub fn with_preserve_vertices(mut self, preserve: bool) -> Self {
        self.preserve_vertices = Some(preserve);
        self
    }

    pub fn with_fixed_decimals(mut self, digits: usize) -> Self {
        self.fixed_decimal_place_digits = Some(digits);
        self
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    pub fn overlay(mut self, other: &Options) -> Self {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if other.$field.is_some() { self.$field = other.$field.clone(); })*
            };
        }
        take!(
            max_randomness_offset, roughness, bowing, stroke, stroke_width, curve_fitting,
            curve_tightness, curve_step_count, fill, fill_style, fill_weight, hachure_angle,
            hachure_gap, simplification, dash_offset, dash_gap, zigzag_offset, seed,
            stroke_line_dash, stroke_line_dash_offset, fill_line_dash, fill_line_dash_offset,
            disable_multi_stroke, disable_multi_stroke_fill, preserve_vertices,
            fixed_decimal_place_digits, fill_shape_roughness_gain,
        );
        self
    }
}

/// Fully populated options plus the random stream for one shape.
///
/// Cloning shares the stream: a cloned variant with a few fields changed
/// keeps drawing from the same sequence as the options it came from.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedOptions {
    pub max_randomness_offset: f64,
    pub roughness: f64,
    pub bowing: f64,
    pub stroke: Color,
    pub stroke_width: f64,
    pub curve_fitting: f64,
    pub curve_tightness: f64,
    pub curve_step_count: f64,
    pub fill: Option<Color>,
    pub fill_style: FillStyle,
    pub fill_weight: f64,
    pub hachure_angle: f64,
    pub hachure_gap: f64,
    pub simplification: Option<f64>,
    pub dash_offset: f64,
    pub dash_gap: f64,
    pub zigzag_offset: f64,
    pub seed: u64,
    pub stroke_line_dash: Option<Vec<f64>>,
    pub stroke_line_dash_offset: Option<f64>,
    pub fill_line_dash: Option<Vec<f64>>,
    pub fill_line_dash_offset: Option<f64>,
    pub disable_multi_stroke: bool,
    pub disable_multi_stroke_fill: bool,
    pub preserve_vertices: bool,
    pub fixed_decimal_place_digits: Option<usize>,
    pub fill_shape_roughness_gain: f64,
    #[serde(skip)]
    random: Randomizer,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            max_randomness_offset: 2.0,
            roughness: 1.0,
            bowing: 1.0,
            stroke: Color::BLACK,
            stroke_width: 1.0,
            curve_fitting: 0.95,
            curve_tightness: 0.0,
            curve_step_count: 9.0,
            fill: None,
            fill_style: FillStyle::Hachure,
            fill_weight: -1.0,
            hachure_angle: -41.0,
            hachure_gap: -1.0,
            simplification: None,
            dash_offset: -1.0,
            dash_gap: -1.0,
            zigzag_offset: -1.0,
            seed: 0,
            stroke_line_dash: None,
            stroke_line_dash_offset: None,
            fill_line_dash: None,
            fill_line_dash_offset: None,
            disable_multi_stroke: false,
            disable_multi_stroke_fill: false,
            preserve_vertices: false,
            fixed_decimal_place_digits: None,
            fill_shape_roughness_gain: 0.8,
            random: Randomizer::new(0),
        }
    }
}

impl ResolvedOptions {
    /// Apply `options` over `self`.
    ///
    /// The result always gets a fresh random stream seeded from its seed,
    /// even when `options` is empty.
    pub fn merge(&self, options: &Options) -> ResolvedOptions {
        let mut r = self.clone();
        r.max_randomness_offset = options.max_randomness_offset.unwrap_or(r.max_randomness_offset);
        r.roughness = options.roughness.unwrap_or(r.roughness);
        r.bowing = options.bowing.unwrap_or(r.bowing);
        r.stroke = options.stroke.unwrap_or(r.stroke);
        r.stroke_width = options.stroke_width.unwrap_or(r.stroke_width);
        r.curve_fitting = options.curve_fitting.unwrap_or(r.curve_fitting);
        r.curve_tightness = options.curve_tightness.unwrap_or(r.curve_tightness);
        r.curve_step_count = options.curve_step_count.unwrap_or(r.curve_step_count);
        r.fill = options.fill.or(r.fill);
        r.fill_style = options.fill_style.unwrap_or(r.fill_style);
        r.fill_weight = options.fill_weight.unwrap_or(r.fill_weight);
        r.hachure_angle = options.hachure_angle.unwrap_or(r.hachure_angle);
        r.hachure_gap = options.hachure_gap.unwrap_or(r.hachure_gap);
        r.simplification = options.simplification.or(r.simplification);
        r.dash_offset = options.dash_offset.unwrap_or(r.dash_offset);
        r.dash_gap = options.dash_gap.unwrap_or(r.dash_gap);
        r.zigzag_offset = options.zigzag_offset.unwrap_or(r.zigzag_offset);
        r.seed = options.seed.unwrap_or(r.seed);
        if options.stroke_line_dash.is_some() {
            r.stroke_line_dash = options.stroke_line_dash.clone();
        }
        r.stroke_line_dash_offset = options.stroke_line_dash_offset.or(r.stroke_line_dash_offset);
        if options.fill_line_dash.is_some() {
            r.fill_line_dash = options.fill_line_dash.clone();
        }
        r.fill_line_dash_offset = options.fill_line_dash_offset.or(r.fill_line_dash_offset);
        r.disable_multi_stroke = options.disable_multi_stroke.unwrap_or(r.disable_multi_stroke);
        r.disable_multi_stroke_fill = options.disable_multi_stroke_fill.unwrap_or(r.disable_multi_stroke_fill);
        r.preserve_vertices = options.preserve_vertices.unwrap_or(r.preserve_vertices);
        r.fixed_decimal_place_digits = options.fixed_decimal_place_digits.or(r.fixed_decimal_place_digits);
        r.fill_shape_roughness_gain = options.fill_shape_roughness_gain.unwrap_or(r.fill_shape_roughness_gain);
        r.random = Randomizer::new(r.seed);
        r
    }

    /// Next value in [0, 1) from this shape's stream.
    #[inline]
    pub fn random(&self) -> f64 {
        self.random.next()
    }

    /// A copy drawing from stream `pass_index` derived from the seed.
    pub fn with_substream(&self, pass_index: u64) -> ResolvedOptions {
        ResolvedOptions { random: Randomizer::substream(self.seed, pass_index), ..self.clone() }
    }

    /// Hachure gap, or four stroke widths when unset.
    pub fn hachure_gap_or_default(&self) -> f64 {
        if self.hachure_gap < 0.0 {
            self.stroke_width * 4.0
        } else {
            self.hachure_gap
        }
    }

    /// Fill stroke weight, or half the stroke width when unset.
    pub fn fill_weight_or_default(&self) -> f64 {
        if self.fill_weight < 0.0 {
            self.stroke_width / 2.0
        } else {
            self.fill_weight
        }
    }

    /// Whether strokes of this kind are drawn once instead of twice.
    pub fn single_stroke(&self, filling: bool) -> bool {
        if filling {
            self.disable_multi_stroke_fill
        } else {
            self.disable_multi_stroke
        }
    }

    /// Fill color, when it's set and visible.
    pub fn visible_fill(&self) -> Option<Color> {
        self.fill.filter(|c| !c.is_transparent())
    }
}

// ============================================================================
// TESTS
// ============================================================================
