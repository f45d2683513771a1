//! End-to-end runs of the `image-overlay` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_png(path: &Path, width: u32, height: u32, value: u8) {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([value, value, value, 255]));
    img.save(path).expect("write fixture");
}

fn bin() -> Command {
    Command::cargo_bin("image-overlay").expect("binary under test")
}

#[test]
fn text_subcommand_annotates_and_writes_the_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    write_png(&input, 640, 480, 255);

    bin()
        .arg("text")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--text", "site 7", "--anchor", "tl"])
        .assert()
        .success();

    let out = image::open(&output).expect("reopen output").to_rgba8();
    assert_eq!(out.dimensions(), (640, 480));
    let changed = out.pixels().any(|px| px.0 != [255, 255, 255, 255]);
    assert!(changed, "expected ink in the output");
}

#[test]
fn scalebar_subcommand_draws_the_bar() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.png");
    write_png(&input, 800, 600, 255);

    bin()
        .arg("scalebar")
        .arg("--input")
        .arg(&input)
        .args(["--anchor", "br"])
        .assert()
        .success();

    // without --output the input is overwritten in place
    let out = image::open(&input).expect("reopen input").to_rgba8();
    assert_eq!(out.get_pixel(500, 470).0, [0, 0, 0, 255]);
}

#[test]
fn rect_subcommand_honors_config_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    write_png(&input, 400, 300, 255);

    bin()
        .arg("rect")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--width", "40", "--height", "20", "--anchor", "tl", "--margin", "10"])
        .assert()
        .success();

    let out = image::open(&output).expect("reopen output").to_rgba8();
    assert_eq!(out.get_pixel(10, 10).0, [0, 0, 0, 255]);
    assert_eq!(out.get_pixel(9, 10).0, [255, 255, 255, 255]);
}

#[test]
fn unknown_anchor_is_a_usage_error() {
    bin()
        .args(["text", "--input", "whatever.png", "--text", "x", "--anchor", "center"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown anchor"));
}

#[test]
fn oversized_rectangle_fails_cleanly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.png");
    write_png(&input, 200, 100, 128);

    bin()
        .arg("rect")
        .arg("--input")
        .arg(&input)
        .args(["--width", "300", "--height", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not fit"));
}

#[test]
fn missing_font_file_fails_with_a_font_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.png");
    write_png(&input, 640, 480, 255);

    bin()
        .arg("text")
        .arg("--input")
        .arg(&input)
        .args(["--text", "x", "--font", "nope/arial.ttf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn text_json_renders_key_value_pairs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    let json = dir.path().join("gps.json");
    write_png(&input, 640, 480, 255);
    std::fs::write(&json, r#"{"lat": "47.6528 N", "lon": "122.3046 W", "alt": 56}"#)
        .expect("write json");

    bin()
        .arg("text")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--text-json")
        .arg(&json)
        .args(["--anchor", "tl"])
        .assert()
        .success();

    let out = image::open(&output).expect("reopen output").to_rgba8();
    let changed = out.pixels().any(|px| px.0 != [255, 255, 255, 255]);
    assert!(changed, "expected ink from the JSON annotation");
}

#[test]
fn text_json_rejects_non_object_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.png");
    let json = dir.path().join("bad.json");
    write_png(&input, 640, 480, 255);
    std::fs::write(&json, r#"["not", "an", "object"]"#).expect("write json");

    bin()
        .arg("text")
        .arg("--input")
        .arg(&input)
        .arg("--text-json")
        .arg(&json)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}
