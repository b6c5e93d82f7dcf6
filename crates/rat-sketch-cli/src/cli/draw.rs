//! Shape commands: draw one shape from command-line coordinates.

use rat_sketch::{Drawable, Generator, Options, Point};

use super::common::{emit, ensure_seed, fit_viewbox, parse_sketch_args};

/// The shape commands and their positional arguments.
pub const SHAPES: &[(&str, &str)] = &[
    ("line", "x1 y1 x2 y2"),
    ("rect", "x y width height"),
    ("ellipse", "cx cy width height"),
    ("circle", "cx cy diameter"),
    ("arc", "cx cy width height start stop [--closed]"),
    ("polyline", "x,y x,y ..."),
    ("polygon", "x,y x,y ..."),
    ("curve", "x,y x,y ... [/ x,y ...]"),
    ("path", "\"<path data>\""),
];

pub fn is_shape(name: &str) -> bool {
    SHAPES.iter().any(|(shape, _)| *shape == name)
}

fn usage(shape: &str) -> String {
    let args = SHAPES.iter().find(|(s, _)| *s == shape).map_or("", |(_, a)| a);
    format!("usage: rat-sketch {shape} {args}")
}

fn numbers<const N: usize>(shape: &str, positional: &[String]) -> Result<[f64; N], String> {
    if positional.len() != N {
        return Err(usage(shape));
    }
    let mut out = [0.0; N];
    for (slot, raw) in out.iter_mut().zip(positional) {
        *slot = raw.parse().map_err(|_| format!("not a number: {raw}\n{}", usage(shape)))?;
    }
    Ok(out)
}

fn parse_point(raw: &str) -> Result<Point, String> {
    let (x, y) = raw.split_once(',').ok_or_else(|| format!("expected x,y but got {raw}"))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in {raw}"))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in {raw}"))?;
    Ok(Point::new(x, y))
}

fn points(shape: &str, positional: &[String]) -> Result<Vec<Point>, String> {
    if positional.is_empty() {
        return Err(usage(shape));
    }
    positional.iter().map(|raw| parse_point(raw)).collect()
}

/// Polylines separated by `/` tokens.
fn polylines(shape: &str, positional: &[String]) -> Result<Vec<Vec<Point>>, String> {
    positional
        .split(|arg| arg == "/")
        .filter(|group| !group.is_empty())
        .map(|group| points(shape, group))
        .collect::<Result<Vec<_>, _>>()
        .and_then(|lists| if lists.is_empty() { Err(usage(shape)) } else { Ok(lists) })
}

fn draw(shape: &str, generator: &Generator, positional: &[String], closed: bool) -> Result<Drawable, String> {
    let o = Options::new();
    let drawable = match shape {
        "line" => {
            let [x1, y1, x2, y2] = numbers(shape, positional)?;
            generator.line(x1, y1, x2, y2, &o)
        }
        "rect" => {
            let [x, y, w, h] = numbers(shape, positional)?;
            generator.rectangle(x, y, w, h, &o)
        }
        "ellipse" => {
            let [x, y, w, h] = numbers(shape, positional)?;
            generator.ellipse(x, y, w, h, &o)
        }
        "circle" => {
            let [x, y, d] = numbers(shape, positional)?;
            generator.circle(x, y, d, &o)
        }
        "arc" => {
            let [x, y, w, h, start, stop] = numbers(shape, positional)?;
            generator.arc(x, y, w, h, start, stop, closed, &o)
        }
        "polyline" => generator.linear_path(&points(shape, positional)?, &o),
        "polygon" => generator.polygon(&points(shape, positional)?, &o),
        "curve" => generator.curve(&polylines(shape, positional)?, &o),
        "path" => {
            let [d] = positional else {
                return Err(usage(shape));
            };
            generator.path(d, &o).map_err(|e| format!("invalid path data: {e}"))?
        }
        other => return Err(format!("unknown shape: {other}")),
    };
    Ok(drawable)
}

/// Execute a shape command.
pub fn cmd_draw(shape: &str, args: &[String]) -> Result<(), String> {
    let mut args = parse_sketch_args(args)?;
    let seed = ensure_seed(&mut args.options);
    let generator = Generator::new(&args.options);

    let drawable = draw(shape, &generator, &args.positional, args.closed)?;
    log::debug!("{shape}: {} layers", drawable.sets.len());

    let drawables = [drawable];
    emit(&generator, &drawables, seed, &args, &fit_viewbox(&drawables))
}

// ============================================================================
// TESTS
// ============================================================================
