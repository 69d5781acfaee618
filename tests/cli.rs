use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const FIXTURE: &str = "tests/fixtures/digest.md";

fn run(bin: &str, args: &[&Path]) -> Output {
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

/// Copy the fixture into `dir` so default outputs land next to it.
fn staged_input(dir: &Path) -> PathBuf {
    let input = dir.join("2026-02-10.md");
    std::fs::copy(FIXTURE, &input).unwrap();
    input
}

#[test]
fn missing_input_prints_usage_and_exits_1() {
    for bin in [
        env!("CARGO_BIN_EXE_digest-html"),
        env!("CARGO_BIN_EXE_digest-cover"),
        env!("CARGO_BIN_EXE_digest-cover-png"),
    ] {
        let out = run(bin, &[]);
        assert_eq!(out.status.code(), Some(1), "{bin}");
        assert!(String::from_utf8_lossy(&out.stderr).contains("Usage:"), "{bin}");
    }
}

#[test]
fn article_defaults_to_html_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = staged_input(dir.path());

    let out = run(env!("CARGO_BIN_EXE_digest-html"), &[&input]);
    assert!(out.status.success());

    let expected = dir.path().join("2026-02-10.html");
    assert!(expected.exists());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("✅ Article written to"));
    assert!(stdout.contains("2026-02-10.html"));
}

#[test]
fn cover_defaults_to_cover_html_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = staged_input(dir.path());

    let out = run(env!("CARGO_BIN_EXE_digest-cover"), &[&input]);
    assert!(out.status.success());

    let expected = dir.path().join("2026-02-10.cover.html");
    let html = std::fs::read_to_string(&expected).unwrap();
    assert!(html.contains("2026年2月10日"));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("✅ Cover written to"));
}

#[test]
fn explicit_output_path_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let input = staged_input(dir.path());
    let output = dir.path().join("custom.html");

    let out = run(env!("CARGO_BIN_EXE_digest-html"), &[&input, &output]);
    assert!(out.status.success());
    assert!(output.exists());
    assert!(!dir.path().join("2026-02-10.html").exists());
}

#[test]
fn model_flag_writes_digest_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = staged_input(dir.path());
    let model = dir.path().join("digest.json");

    let out = Command::new(env!("CARGO_BIN_EXE_digest-html"))
        .arg(&input)
        .arg("--model")
        .arg(&model)
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    assert!(out.status.success());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&model).unwrap()).unwrap();
    assert!(json["title"].as_str().unwrap().contains("2026-02-10"));
    assert_eq!(json["top_articles"].as_array().unwrap().len(), 3);
    assert_eq!(json["top_articles"][0]["medal"], "gold");
    assert_eq!(json["categories"].as_array().unwrap().len(), 3);
}

#[test]
fn unreadable_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(
        env!("CARGO_BIN_EXE_digest-html"),
        &[&dir.path().join("nope.md")],
    );
    assert!(!out.status.success());
    assert!(!dir.path().join("nope.html").exists());
}
