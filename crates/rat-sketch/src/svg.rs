//! SVG input: pull every path out of a document so it can be re-sketched.
//!
//! Uses usvg for complete SVG resolution (CSS, transforms, basic shapes),
//! then walks the tree and rewrites each path as absolute path data in
//! document coordinates.
//!
//! ## Rust Lesson #22: Pattern Matching on Enums with Data
//!
//! `usvg::Node` is an enum whose variants carry different data. Matching on
//! the variant destructures it, so groups recurse and paths convert while
//! text and images fall through the `_` arm.

use std::fmt::Write as _;

use usvg::tiny_skia_path::PathSegment;

use crate::error::SvgError;
use crate::options::Color;

/// One path element, ready for [`crate::Generator::path`].
#[derive(Debug, Clone, PartialEq)]
pub struct SvgShape {
    /// Element id, when the document gave one.
    pub id: Option<String>,
    /// Absolute path data using only `M`, `L`, `Q`, `C` and `Z`.
    pub d: String,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
}

/// Extract every path element of an SVG document.
pub fn extract_shapes_from_svg(svg_content: &str) -> Result<Vec<SvgShape>, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options).map_err(|e| SvgError::Parse(e.to_string()))?;

    let mut shapes = Vec::new();
    extract_from_group(tree.root(), &mut shapes);
    log::debug!("extracted {} shapes from svg", shapes.len());

    if shapes.is_empty() { Err(SvgError::NoShapes) } else { Ok(shapes) }
}

fn extract_from_group(group: &usvg::Group, shapes: &mut Vec<SvgShape>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => extract_from_group(group, shapes),
            usvg::Node::Path(path) => {
                if let Some(shape) = path_to_shape(path) {
                    shapes.push(shape);
                }
            }
            _ => {}
        }
    }
}

fn path_to_shape(path: &usvg::Path) -> Option<SvgShape> {
    let data = path.data().clone().transform(path.abs_transform())?;
    let d = path_data(&data);
    if d.is_empty() {
        return None;
    }

    let fill = path.fill().and_then(|fill| paint_color(fill.paint(), fill.opacity().get()));
    let (stroke, stroke_width) = match path.stroke() {
        Some(stroke) => (paint_color(stroke.paint(), stroke.opacity().get()), Some(f64::from(stroke.width().get()))),
        None => (None, None),
    };
    let id = path.id();

    Some(SvgShape {
        id: (!id.is_empty()).then(|| id.to_string()),
        d,
        fill,
        stroke,
        stroke_width,
    })
}

/// Gradients and patterns have no single color and are skipped.
fn paint_color(paint: &usvg::Paint, opacity: f32) -> Option<Color> {
    match paint {
        usvg::Paint::Color(c) => {
            let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
            Some(Color::rgba(c.red, c.green, c.blue, alpha))
        }
        _ => None,
    }
}

fn path_data(data: &usvg::tiny_skia_path::Path) -> String {
    let mut d = String::new();
    for segment in data.segments() {
        // Writing to a String can't fail.
        let _ = match segment {
            PathSegment::MoveTo(p) => write!(d, "M{} {} ", p.x, p.y),
            PathSegment::LineTo(p) => write!(d, "L{} {} ", p.x, p.y),
            PathSegment::QuadTo(c, p) => write!(d, "Q{} {} {} {} ", c.x, c.y, p.x, p.y),
            PathSegment::CubicTo(c1, c2, p) => {
                write!(d, "C{} {} {} {} {} {} ", c1.x, c1.y, c2.x, c2.y, p.x, p.y)
            }
            PathSegment::Close => write!(d, "Z "),
        };
    }
    d.trim_end().to_string()
}

// ============================================================================
// TESTS
// ============================================================================
