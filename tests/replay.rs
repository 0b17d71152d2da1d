//! Workflow integration tests driven by replay cassettes.
//!
//! Every test sets `WATERMARK_REPLAY` so the binary answers its prompts from
//! a cassette, and runs in a scratch directory with its own `img/` folder.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image::{Rgba, RgbaImage};
use predicates::prelude::*;

const BASE: Rgba<u8> = Rgba([30, 160, 90, 255]);

fn cmd(work_dir: &Path, cassette: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("watermark-manager");
    cmd.current_dir(work_dir)
        .env("WATERMARK_REPLAY", cassette)
        .env_remove("WATERMARK_REC")
        .env("WATERMARK_CONFIG", "/nonexistent/watermark-manager.toml");
    cmd
}

/// Fresh working directory with `img/test.png` and `img/logo.png`.
fn work_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("watermark_replay_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    let img = dir.join("img");
    std::fs::create_dir_all(&img).unwrap();
    RgbaImage::from_pixel(80, 60, BASE).save(img.join("test.png")).unwrap();
    RgbaImage::from_pixel(20, 10, Rgba([255, 255, 255, 255])).save(img.join("logo.png")).unwrap();
    dir
}

/// Write a cassette answering prompts in order. Each answer is
/// `(method, yaml_value)`.
fn cassette(dir: &Path, answers: &[(&str, &str)]) -> PathBuf {
    let mut yaml = String::from(
        "name: replay-test\nrecorded_at: \"2026-01-01T00:00:00Z\"\ncommit: test\ninteractions:\n",
    );
    for (seq, (method, value)) in answers.iter().enumerate() {
        yaml.push_str(&format!(
            "  - seq: {seq}\n    port: prompter\n    method: {method}\n    output:\n      Ok: {value}\n"
        ));
    }
    let path = dir.join("session.cassette.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

fn load(path: &Path) -> RgbaImage {
    image::open(path).unwrap().into_rgba8()
}

#[test]
fn declining_exits_cleanly() {
    let dir = work_dir("decline");
    let tape = cassette(&dir, &[("confirm", "false")]);

    cmd(&dir, &tape).assert().success().stdout(predicate::str::contains("Adding").not());

    assert!(!dir.join("img/test-with-watermark.png").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn text_watermark_creates_output() {
    let dir = work_dir("text");
    let tape = cassette(
        &dir,
        &[
            ("confirm", "true"),
            ("input", "test.png"),
            ("confirm", "false"),
            ("select", "Text watermark"),
            ("input", "\"(c) 2026\""),
            ("confirm", "false"),
        ],
    );

    cmd(&dir, &tape)
        .assert()
        .success()
        .stdout(predicate::str::contains("Adding watermark finished with success!"));

    let out = load(&dir.join("img/test-with-watermark.png"));
    assert_eq!(out.dimensions(), (80, 60));
    assert!(out.pixels().any(|p| p.0 == [0, 0, 0, 255]));
    assert!(load(&dir.join("img/test.png")).pixels().all(|p| *p == BASE));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn image_watermark_after_greyscale() {
    let dir = work_dir("image_grey");
    let tape = cassette(
        &dir,
        &[
            ("confirm", "true"),
            ("input", "test.png"),
            ("confirm", "true"),
            ("select", "Make image b&w"),
            ("select", "Image watermark"),
            ("input", "logo.png"),
            ("confirm", "false"),
        ],
    );

    cmd(&dir, &tape).assert().success();

    // Edits overwrite the original.
    let edited = load(&dir.join("img/test.png"));
    assert!(edited.pixels().all(|p| p.0[0] == p.0[1] && p.0[1] == p.0[2]));

    let out = load(&dir.join("img/test-with-watermark.png"));
    assert_eq!(out.dimensions(), (80, 60));
    assert_eq!(out.get_pixel(0, 0), edited.get_pixel(0, 0));
    assert_ne!(out.get_pixel(40, 30), edited.get_pixel(40, 30));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_input_reports_and_returns_to_welcome() {
    let dir = work_dir("missing");
    let tape = cassette(
        &dir,
        &[
            ("confirm", "true"),
            ("input", "absent.png"),
            ("confirm", "false"),
            ("select", "Text watermark"),
            ("input", "hello"),
            ("confirm", "false"),
        ],
    );

    cmd(&dir, &tape)
        .assert()
        .success()
        .stdout(predicate::str::contains("Something went wrong"))
        .stdout(predicate::str::contains("absent.png"));

    assert!(!dir.join("img/absent-with-watermark.png").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_watermark_image_writes_nothing() {
    let dir = work_dir("missing_logo");
    let tape = cassette(
        &dir,
        &[
            ("confirm", "true"),
            ("input", "test.png"),
            ("confirm", "false"),
            ("select", "Image watermark"),
            ("input", "stamp.png"),
            ("confirm", "false"),
        ],
    );

    cmd(&dir, &tape).assert().success().stdout(predicate::str::contains("Something went wrong"));

    assert!(!dir.join("img/test-with-watermark.png").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_watermark_keeps_original_and_returns_to_welcome() {
    let dir = work_dir("corrupt_logo");
    std::fs::write(dir.join("img/logo.png"), b"not a png").unwrap();
    let tape = cassette(
        &dir,
        &[
            ("confirm", "true"),
            ("input", "test.png"),
            ("confirm", "true"),
            ("select", "Invert colours"),
            ("select", "Image watermark"),
            ("input", "logo.png"),
            ("confirm", "false"),
        ],
    );

    cmd(&dir, &tape)
        .assert()
        .success()
        .stdout(predicate::str::contains("Something went wrong"))
        .stdout(predicate::str::contains("logo.png"));

    assert!(!dir.join("img/test-with-watermark.png").exists());
    assert!(load(&dir.join("img/test.png")).pixels().all(|p| *p == BASE));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_input_reports_and_returns_to_welcome() {
    let dir = work_dir("corrupt_input");
    std::fs::write(dir.join("img/broken.png"), b"not a png").unwrap();
    let tape = cassette(
        &dir,
        &[
            ("confirm", "true"),
            ("input", "broken.png"),
            ("confirm", "false"),
            ("select", "Text watermark"),
            ("input", "hello"),
            ("confirm", "false"),
        ],
    );

    cmd(&dir, &tape)
        .assert()
        .success()
        .stdout(predicate::str::contains("Something went wrong"))
        .stdout(predicate::str::contains("failed to load image"));

    assert!(!dir.join("img/broken-with-watermark.png").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn multi_dot_filename_keeps_full_stem() {
    let dir = work_dir("multi_dot");
    std::fs::copy(dir.join("img/test.png"), dir.join("img/trip.2026.png")).unwrap();
    let tape = cassette(
        &dir,
        &[
            ("confirm", "true"),
            ("input", "trip.2026.png"),
            ("confirm", "false"),
            ("select", "Text watermark"),
            ("input", "hi"),
            ("confirm", "false"),
        ],
    );

    cmd(&dir, &tape).assert().success();

    assert!(dir.join("img/trip.2026-with-watermark.png").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn exhausted_cassette_exits_with_error() {
    let dir = work_dir("exhausted");
    let tape = cassette(&dir, &[("confirm", "true")]);

    cmd(&dir, &tape).assert().failure().stderr(predicate::str::contains("Cassette exhausted"));

    let _ = std::fs::remove_dir_all(&dir);
}
