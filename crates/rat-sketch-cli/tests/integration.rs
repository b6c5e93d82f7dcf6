//! Integration tests for rat-sketch CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rat-sketch"))
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path()).args(args).output().expect("Failed to execute command")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(binary_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child.stdin.take().expect("stdin").write_all(stdin.as_bytes()).expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for command")
}

#[test]
fn styles_command_lists_all_styles() {
    let output = run(&["styles"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for style in ["hachure", "solid", "zigzag", "cross-hatch", "dots", "dashed", "zigzag-line"] {
        assert!(stdout.contains(style), "Should list '{}' style", style);
    }
}

#[test]
fn rect_command_produces_svg() {
    let output = run(&["rect", "10", "10", "200", "100", "--seed", "1", "--fill", "red"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<svg"), "Should output SVG");
    assert!(stdout.contains("</svg>"), "SVG should be complete");
    // Hachure fill plus outline.
    assert_eq!(stdout.matches("<path").count(), 2);
    assert!(stdout.contains("stroke=\"#ff0000\""), "Hachure lines use the fill color");
}

#[test]
fn json_format_carries_the_seed() {
    let output = run(&["circle", "50", "50", "80", "--seed", "42", "-f", "json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"seed\": 42"), "JSON should include the seed");
    assert!(stdout.contains("\"drawables\""));
    assert!(stdout.contains("\"cubicCurveTo\""), "Ellipses are drawn with cubic curves");
}

#[test]
fn same_seed_same_output() {
    let args = ["ellipse", "100", "60", "150", "80", "--seed", "7", "--fill", "blue", "--fill-style", "zigzag"];
    let first = run(&args);
    let second = run(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout, "Seeded output should be deterministic");

    let other = run(&["ellipse", "100", "60", "150", "80", "--seed", "8", "--fill", "blue", "--fill-style", "zigzag"]);
    assert_ne!(first.stdout, other.stdout, "Different seeds should differ");
}

#[test]
fn negative_points_are_accepted() {
    let output = run(&["polygon", "-10,-10", "50,-20", "30,40", "--seed", "3"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn svg_command_reads_stdin() {
    let input = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 120 80">
        <rect x="10" y="10" width="50" height="50" fill="green"/>
        <path d="M 70 10 L 110 70" stroke="black" fill="none"/>
    </svg>"#;
    let output = run_with_stdin(&["svg", "-", "--seed", "5"], input);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("viewBox=\"0 0 120 80\""), "Should keep the input viewBox");
    assert_eq!(stdout.matches("<g ").count(), 2, "One group per input shape");
}

#[test]
fn svg_command_keeps_a_single_quoted_root_viewbox() {
    let input = "<?xml version='1.0'?>\n<!-- viewBox=\"9 9 9 9\" -->\n\
        <svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 64 32'>\
        <path d='M 4 4 L 60 28' stroke='black' fill='none'/></svg>";
    let output = run_with_stdin(&["svg", "-", "--seed", "5"], input);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("viewBox=\"0 0 64 32\""), "Should use the root element's viewBox");
}

#[test]
fn output_file_is_written() {
    let path = std::env::temp_dir().join(format!("rat-sketch-test-{}.svg", std::process::id()));
    let output = run(&["line", "0", "0", "100", "100", "--seed", "2", "-o", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "Nothing goes to stdout with -o");

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("<path"));
    std::fs::remove_file(&path).ok();
}

#[test]
fn bad_path_data_fails() {
    let output = run(&["path", "M 10 #", "--seed", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}

#[test]
fn unknown_command_fails() {
    let output = run(&["hexagon"]);
    assert_eq!(output.status.code(), Some(1));
}
