//! rat-sketch - CLI for hand-drawn style shapes
//!
//! Usage:
//!   rat-sketch <shape> <args> [options]   Draw one shape
//!   rat-sketch svg <file.svg|->           Re-sketch every path of an SVG
//!   rat-sketch styles                     List available fill styles

use std::env;

use rat_sketch::FillStyle;

mod cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("rat-sketch", String::as_str);

    let Some(command) = args.get(1) else {
        print_usage(program);
        std::process::exit(1);
    };

    let result = match command.as_str() {
        "styles" => {
            cmd_styles();
            Ok(())
        }
        "svg" => cli::cmd_svg(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage(program);
            Ok(())
        }
        shape if cli::is_shape(shape) => cli::cmd_draw(shape, &args[2..]),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage(program);
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_styles() {
    println!("Available fill styles:");
    for style in FillStyle::all() {
        println!("  {}", style.name());
    }
}

fn print_usage(program: &str) {
    eprintln!("rat-sketch - hand-drawn style vector shapes");
    eprintln!();
    eprintln!("Usage:");
    for (shape, args) in cli::SHAPES {
        eprintln!("  {program} {shape} {args} [options]");
    }
    eprintln!("  {program} svg <file.svg|-> [options]");
    eprintln!("  {program} styles");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --seed <n>              Random seed (chosen and logged when absent)");
    eprintln!("  --roughness <n>         Jitter amount (default 1)");
    eprintln!("  --bowing <n>            Line bowing (default 1)");
    eprintln!("  --stroke <color>        Outline color, any CSS color");
    eprintln!("  --stroke-width <n>      Outline width (default 1)");
    eprintln!("  --fill <color>          Fill color; shapes are unfilled without it");
    eprintln!("  --fill-style <name>     One of the styles listed by `styles`");
    eprintln!("  --hachure-angle <deg>   Scan angle (default -41)");
    eprintln!("  --hachure-gap <n>       Scan spacing (default 4x stroke width)");
    eprintln!("  --fill-weight <n>       Fill line width (default half the stroke width)");
    eprintln!("  --decimals <n>          Round path coordinates");
    eprintln!("  --single-stroke         Draw one pass instead of two");
    eprintln!("  --preserve-vertices     Keep endpoints exact");
    eprintln!("  --closed                Close an arc into a pie slice");
    eprintln!("  --options <file>        Load options from JSON or YAML");
    eprintln!("  -f, --format <fmt>      svg (default) or json");
    eprintln!("  -o, --output <file>     Write to a file instead of stdout");
    eprintln!();
    eprintln!("Set RUST_LOG=info to see the seed that was used.");
}
