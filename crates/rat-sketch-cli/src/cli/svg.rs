//! Svg command: re-sketch every path of an SVG document.

use rat_sketch::{Color, Generator, Options, extract_shapes_from_svg};

use super::common::{emit, ensure_seed, extract_viewbox, fit_viewbox, parse_sketch_args, read_input};

/// Execute the svg command.
///
/// Each element keeps its own fill, stroke and stroke width unless a flag
/// overrides it. Elements are drawn in document order, each from the
/// shared seed.
pub fn cmd_svg(args: &[String]) -> Result<(), String> {
    let mut args = parse_sketch_args(args)?;
    let [input] = args.positional.as_slice() else {
        return Err("usage: rat-sketch svg <file.svg|-> [options]".to_string());
    };
    let input = input.clone();

    let seed = ensure_seed(&mut args.options);
    let content = read_input(&input)?;
    let shapes = extract_shapes_from_svg(&content).map_err(|e| e.to_string())?;
    log::info!("loaded {} shapes from {input}", shapes.len());

    let generator = Generator::new(&Options::new());
    let mut drawables = Vec::with_capacity(shapes.len());
    for shape in &shapes {
        let mut own = Options::new();
        own.fill = shape.fill;
        own.stroke_width = shape.stroke_width;
        if let Some(stroke) = shape.stroke {
            own.stroke = Some(stroke);
        } else if shape.fill.is_some() {
            own.stroke = Some(Color::TRANSPARENT);
        }
        let options = own.overlay(&args.options);

        match generator.path(&shape.d, &options) {
            Ok(drawable) => drawables.push(drawable),
            Err(e) => log::warn!("skipping {}: {e}", shape.id.as_deref().unwrap_or("unnamed path")),
        }
    }

    let viewbox = extract_viewbox(&content).unwrap_or_else(|| fit_viewbox(&drawables));
    emit(&generator, &drawables, seed, &args, &viewbox)
}
