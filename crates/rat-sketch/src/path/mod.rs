//! SVG path data: parsing, absolutizing and normalizing.
//!
//! The pipeline is `parse_path` → `absolutize` → `normalize`, ending in a
//! list of segments that only use `M`, `L`, `C` and `Z`.

mod absolutize;
mod normalize;
mod parse;

pub use absolutize::absolutize;
pub use normalize::{Arc, arc_to_cubic_curves, normalize};
pub use parse::{Segment, Token, arity, parse_path, serialize, tokenize};

use crate::error::PathError;

/// Parse, absolutize and normalize in one step.
pub fn normalized_segments(d: &str) -> Result<Vec<Segment>, PathError> {
    normalize(&absolutize(&parse_path(d)?)?)
}
