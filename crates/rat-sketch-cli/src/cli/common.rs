//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::Serialize;

use rat_sketch::{Color, Drawable, FillStyle, Generator, Options};

/// Output format for generated shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name.to_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Flags shared by every drawing command, plus whatever positional
/// arguments were left over.
#[derive(Debug, Clone)]
pub struct SketchArgs {
    /// Options from flags, already laid over the `--options` file.
    pub options: Options,
    pub format: OutputFormat,
    pub output: Option<String>,
    pub closed: bool,
    pub positional: Vec<String>,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i).map(String::as_str).ok_or_else(|| format!("{flag} needs a value"))
}

fn number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = value(args, i, flag)?;
    raw.parse().map_err(|_| format!("invalid value for {flag}: {raw}"))
}

fn color(args: &[String], i: usize, flag: &str) -> Result<Color, String> {
    let raw = value(args, i, flag)?;
    raw.parse().map_err(|e| format!("invalid color for {flag}: {e}"))
}

/// Parse drawing flags. Anything that isn't a flag, including negative
/// numbers and points like `-10,5`, is kept as a positional argument.
pub fn parse_sketch_args(args: &[String]) -> Result<SketchArgs, String> {
    let mut flags = Options::new();
    let mut options_file: Option<String> = None;
    let mut format = OutputFormat::Svg;
    let mut output = None;
    let mut closed = false;
    let mut positional = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--seed" => {
                i += 1;
                flags.seed = Some(number(args, i, arg)?);
            }
            "--roughness" => {
                i += 1;
                flags.roughness = Some(number(args, i, arg)?);
            }
            "--bowing" => {
                i += 1;
                flags.bowing = Some(number(args, i, arg)?);
            }
            "--stroke" => {
                i += 1;
                flags.stroke = Some(color(args, i, arg)?);
            }
            "--stroke-width" => {
                i += 1;
                flags.stroke_width = Some(number(args, i, arg)?);
            }
            "--fill" => {
                i += 1;
                flags.fill = Some(color(args, i, arg)?);
            }
            "--fill-style" => {
                i += 1;
                let name = value(args, i, arg)?;
                let style = FillStyle::from_name(name)
                    .ok_or_else(|| format!("unknown fill style: {name}. Use 'rat-sketch styles' to list them."))?;
                flags.fill_style = Some(style);
            }
            "--hachure-angle" => {
                i += 1;
                flags.hachure_angle = Some(number(args, i, arg)?);
            }
            "--hachure-gap" => {
                i += 1;
                flags.hachure_gap = Some(number(args, i, arg)?);
            }
            "--fill-weight" => {
                i += 1;
                flags.fill_weight = Some(number(args, i, arg)?);
            }
            "--decimals" => {
                i += 1;
                flags.fixed_decimal_place_digits = Some(number(args, i, arg)?);
            }
            "--single-stroke" => {
                flags = flags.with_single_stroke(true);
            }
            "--preserve-vertices" => {
                flags.preserve_vertices = Some(true);
            }
            "--closed" => {
                closed = true;
            }
            "--options" => {
                i += 1;
                options_file = Some(value(args, i, arg)?.to_string());
            }
            "-f" | "--format" => {
                i += 1;
                let name = value(args, i, arg)?;
                format = OutputFormat::from_name(name)
                    .ok_or_else(|| format!("unknown format: {name}. Use 'svg' or 'json'."))?;
            }
            "-o" | "--output" => {
                i += 1;
                output = Some(value(args, i, arg)?.to_string());
            }
            _ if !arg.starts_with('-') || arg == "-" || arg[1..].starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
                positional.push(arg.to_string());
            }
            unknown => return Err(format!("unknown option: {unknown}")),
        }
        i += 1;
    }

    let base = match options_file {
        Some(path) => load_options_file(&path)?,
        None => Options::new(),
    };
    Ok(SketchArgs { options: base.overlay(&flags), format, output, closed, positional })
}

/// Load options from YAML or JSON, picked by file extension.
pub fn load_options_file(path: &str) -> Result<Options, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))?;
    let is_json = Path::new(path).extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content).map_err(|e| format!("invalid options in {path}: {e}"))
    } else {
        serde_yaml::from_str(&content).map_err(|e| format!("invalid options in {path}: {e}"))
    }
}

/// Fill in a random seed when none was given, and log whichever is used.
pub fn ensure_seed(options: &mut Options) -> u64 {
    let seed = *options.seed.get_or_insert_with(rand::random::<u64>);
    log::info!("using seed {seed}");
    seed
}

/// Read a file, or stdin for `-`.
pub fn read_input(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).map_err(|e| format!("failed to read stdin: {e}"))?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))
    }
}

/// Write to a file, or stdout when no file (or `-`) is given.
pub fn write_output(output: Option<&str>, content: &str) -> Result<(), String> {
    match output {
        Some(path) if path != "-" => {
            fs::write(path, content).map_err(|e| format!("failed to write {path}: {e}"))?;
            log::info!("wrote {path}");
            Ok(())
        }
        _ => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| format!("failed to write stdout: {e}")),
    }
}

/// Bounding box `(min_x, min_y, max_x, max_y)` of every op endpoint and
/// control point.
pub fn drawables_bounds(drawables: &[Drawable]) -> Option<(f64, f64, f64, f64)> {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;
    let coords = drawables.iter().flat_map(|d| &d.sets).flat_map(|s| &s.ops).flat_map(|op| op.data());
    for pair in coords.collect::<Vec<_>>().chunks_exact(2) {
        let (x, y) = (*pair[0], *pair[1]);
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds
}

/// Viewbox around the drawn geometry, padded a little.
pub fn fit_viewbox(drawables: &[Drawable]) -> String {
    const PADDING: f64 = 10.0;
    match drawables_bounds(drawables) {
        Some((min_x, min_y, max_x, max_y)) => format!(
            "{:.2} {:.2} {:.2} {:.2}",
            min_x - PADDING,
            min_y - PADDING,
            max_x - min_x + 2.0 * PADDING,
            max_y - min_y + 2.0 * PADDING
        ),
        None => "0 0 100 100".to_string(),
    }
}

/// The `viewBox` of the document's root `<svg>` element.
///
/// Prolog, comments and doctype are skipped; the first element decides.
pub fn extract_viewbox(svg: &str) -> Option<String> {
    let mut reader = Reader::from_str(svg);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() != b"svg" {
                    return None;
                }
                return e
                    .attributes()
                    .flatten()
                    .find(|attr| matches!(attr.key.as_ref(), b"viewBox" | b"viewbox"))
                    .and_then(|attr| attr.unescape_value().ok())
                    .map(|value| value.trim().to_string());
            }
            Ok(Event::Eof) => return None,
            Err(e) => {
                log::warn!("XML parse error at position {}: {e}", reader.error_position());
                return None;
            }
            _ => {}
        }
        buf.clear();
    }
}

/// Render drawables as one SVG document, a `<path>` per layer.
pub fn drawables_to_svg(generator: &Generator, drawables: &[Drawable], viewbox: &str) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{viewbox}">
"#
    ));

    for drawable in drawables {
        svg.push_str("<g stroke-linecap=\"round\">\n");
        for path in generator.to_paths(drawable) {
            let stroke = path.stroke.map_or_else(|| "none".to_string(), |c| c.to_string());
            let fill = path.fill.map_or_else(|| "none".to_string(), |c| c.to_string());
            svg.push_str(&format!(
                "  <path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"{}\"",
                path.d, stroke, path.stroke_width, fill
            ));
            if let Some(dash) = &path.line_dash {
                let dash: Vec<String> = dash.iter().map(f64::to_string).collect();
                svg.push_str(&format!(" stroke-dasharray=\"{}\"", dash.join(" ")));
            }
            if let Some(offset) = path.line_dash_offset {
                svg.push_str(&format!(" stroke-dashoffset=\"{offset}\""));
            }
            svg.push_str("/>\n");
        }
        svg.push_str("</g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    seed: u64,
    drawables: &'a [Drawable],
}

pub fn drawables_to_json(seed: u64, drawables: &[Drawable]) -> Result<String, String> {
    serde_json::to_string_pretty(&JsonOutput { seed, drawables }).map_err(|e| format!("failed to serialize JSON: {e}"))
}

/// Write drawables in the requested format.
pub fn emit(generator: &Generator, drawables: &[Drawable], seed: u64, args: &SketchArgs, viewbox: &str) -> Result<(), String> {
    let content = match args.format {
        OutputFormat::Svg => drawables_to_svg(generator, drawables, viewbox),
        OutputFormat::Json => drawables_to_json(seed, drawables)?,
    };
    write_output(args.output.as_deref(), &content)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_and_positionals_are_split() {
        let args = parse_sketch_args(&strings(&["10", "-20", "--seed", "7", "--fill", "red", "--closed", "-o", "out.svg"]))
            .unwrap();
        assert_eq!(args.positional, vec!["10", "-20"]);
        assert_eq!(args.options.seed, Some(7));
        assert_eq!(args.options.fill, Some(Color::rgba(255, 0, 0, 255)));
        assert!(args.closed);
        assert_eq!(args.output.as_deref(), Some("out.svg"));
    }

    #[test]
    fn bad_flags_are_errors() {
        assert!(parse_sketch_args(&strings(&["--seed"])).is_err());
        assert!(parse_sketch_args(&strings(&["--roughness", "lots"])).is_err());
        assert!(parse_sketch_args(&strings(&["--fill-style", "plaid"])).is_err());
        assert!(parse_sketch_args(&strings(&["--format", "png"])).is_err());
        assert!(parse_sketch_args(&strings(&["--wobble"])).is_err());
    }

    #[test]
    fn single_stroke_sets_both_flags() {
        let args = parse_sketch_args(&strings(&["--single-stroke"])).unwrap();
        assert_eq!(args.options.disable_multi_stroke, Some(true));
        assert_eq!(args.options.disable_multi_stroke_fill, Some(true));
    }

    #[test]
    fn given_seed_is_kept() {
        let mut options = Options::new().with_seed(99);
        assert_eq!(ensure_seed(&mut options), 99);
        let mut options = Options::new();
        let seed = ensure_seed(&mut options);
        assert_eq!(options.seed, Some(seed));
    }

    #[test]
    fn viewbox_lookup() {
        assert_eq!(extract_viewbox(r#"<svg viewBox="0 0 10 20"></svg>"#).as_deref(), Some("0 0 10 20"));
        assert_eq!(extract_viewbox("<svg viewBox='0 0 10 20'></svg>").as_deref(), Some("0 0 10 20"));
        assert_eq!(extract_viewbox("<svg/>"), None);
        assert_eq!(extract_viewbox(""), None);
    }

    #[test]
    fn viewbox_comes_from_the_root_element() {
        let commented = r#"<?xml version="1.0"?><!-- viewBox="9 9 9 9" --><svg viewBox="0 0 10 20"></svg>"#;
        assert_eq!(extract_viewbox(commented).as_deref(), Some("0 0 10 20"));

        let nested = r#"<svg xmlns="http://www.w3.org/2000/svg"><svg viewBox="1 1 5 5"/></svg>"#;
        assert_eq!(extract_viewbox(nested), None);

        let symbol = r#"<svg viewBox="0 0 100 50"><symbol id="s" viewBox="0 0 1 1"/></svg>"#;
        assert_eq!(extract_viewbox(symbol).as_deref(), Some("0 0 100 50"));
    }

    #[test]
    fn svg_has_a_path_per_layer() {
        let generator = Generator::new(&Options::new().with_seed(1));
        let drawable = generator.rectangle(0.0, 0.0, 50.0, 50.0, &Options::new().with_fill(Color::rgba(0, 128, 0, 255)));
        let svg = drawables_to_svg(&generator, &[drawable.clone()], &fit_viewbox(&[drawable]));
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("stroke=\"#008000\""));
        assert!(svg.contains("</svg>"));
    }
}
