//! # rat-sketch
//!
//! Hand-drawn style vector shapes. Lines, rectangles, ellipses, arcs,
//! curves and SVG paths become jittered, double-stroked drawing operations
//! with hachure, zigzag, dashed, dotted or solid fills.
//!
//! ```text
//! let generator = Generator::new(&Options::new().with_seed(7));
//! let drawable = generator.rectangle(10.0, 10.0, 200.0, 100.0, &Options::new());
//! for path in generator.to_paths(&drawable) { /* paint path.d */ }
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Every module is declared here. `pub mod` exposes the module itself, and
//! the `pub use` lines below lift the everyday types to the crate root so
//! callers don't need to know the layout.

pub mod curve;
pub mod error;
pub mod fill;
pub mod generator;
pub mod geometry;
pub mod hachure;
pub mod ops;
pub mod options;
pub mod path;
pub mod points_on_path;
pub mod rng;
pub mod stroke;
pub mod svg;

pub use error::{PathError, SvgError};
pub use fill::{FillAlgorithm, FillRegistry};
pub use generator::Generator;
pub use geometry::{Line, Point};
pub use hachure::hachure_lines;
pub use ops::{Drawable, DrawableShape, Op, OpSet, OpSetType, PathInfo};
pub use options::{Color, FillStyle, Options, ResolvedOptions};
pub use points_on_path::points_on_path;
pub use rng::{Randomizer, Rng};
pub use svg::{SvgShape, extract_shapes_from_svg};
