//! CLI command implementations.
//!
//! - `styles` - List the fill styles
//! - `line`, `rect`, `ellipse`, ... - Draw one shape
//! - `svg` - Re-sketch the paths of an SVG document

pub mod common;
pub mod draw;
pub mod svg;

pub use draw::{SHAPES, cmd_draw, is_shape};
pub use svg::cmd_svg;
