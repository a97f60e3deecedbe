use embed_cli::{command, execute, load_config, Output};
use pretty_assertions::assert_eq;
use std::io::Write;

fn run(args: &[&str]) -> Output {
    let matches = command()
        .try_get_matches_from(std::iter::once("demo-embed").chain(args.iter().copied()))
        .unwrap();
    execute(&matches).unwrap()
}

#[test]
fn test_resolve_text() {
    let out = run(&[
        "resolve",
        "embed-{$PATH}",
        "--fragment",
        "#/repo/2d/pong/README",
        "--site-root",
        "https://docs.example/index.html",
    ]);
    assert!(out.success);
    assert!(out.text.contains("src:   https://docs.example/repo/2d/pong/exports/web/?scene=2d%2Fpong"));
}

#[test]
fn test_resolve_json_notice() {
    let out = run(&["resolve", "embed-{$PATH}", "--json"]);
    assert!(!out.success);
    let value: serde_json::Value = serde_json::from_str(&out.text).unwrap();
    assert_eq!(value["notice"], "Could not determine scene path from current location");
    assert!(value.get("demo").is_none());
}

#[test]
fn test_no_scene_arg_flag() {
    let out = run(&["resolve", "embed-{$PATH}", "--fragment", "#/repo/2d/pong", "--no-scene-arg"]);
    assert!(out.text.contains("url:   repo/2d/pong/exports/web/\n"));
}

#[test]
fn test_scan_markdown_file() {
    let mut page = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
    writeln!(page, "# Pong\n\n<!-- embed-pong -->\n").unwrap();
    let path = page.path().to_str().unwrap();

    let out = run(&["scan", path]);
    assert!(out.success);
    assert!(out.text.contains("Interactive Demo: pong Project -> /pong/exports/web/"));
}

#[test]
fn test_scan_reports_failures() {
    let mut page = tempfile::Builder::new().suffix(".html").tempfile().unwrap();
    write!(page, "<!-- embed-x: a/b -->").unwrap();
    let path = page.path().to_str().unwrap();

    let out = run(&["scan", path, "--json"]);
    assert!(!out.success);
    let value: serde_json::Value = serde_json::from_str(&out.text).unwrap();
    assert_eq!(value[0]["outcome"]["kind"], "notice");
}

#[test]
fn test_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[resolver]\nallow_scene_query_arg = false").unwrap();

    let config = load_config(Some(file.path()), false).unwrap();
    assert!(!config.resolver.allow_scene_query_arg);

    let out = run(&[
        "resolve",
        "embed-{$PATH}",
        "--fragment",
        "#/repo/2d/pong",
        "--config",
        file.path().to_str().unwrap(),
    ]);
    assert!(!out.text.contains("?scene="));
}

#[test]
fn test_missing_config_is_an_error() {
    let err = load_config(Some(std::path::Path::new("/nonexistent/demo-embed.toml")), false).unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}

#[test]
fn test_simulate() {
    let out = run(&["simulate", "fullscreen,escape,fullscreen"]);
    assert!(out.success);
    assert!(out.text.contains("Invariants: PASS"));

    let out = run(&["simulate", "fullscreen", "--vendors", "none", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out.text).unwrap();
    assert_eq!(value["steps"][0]["mode"], "MobileExpanded");
}

#[test]
fn test_simulate_rejects_unknown_event() {
    let result = command().try_get_matches_from(["demo-embed", "simulate", "jump"]);
    assert!(result.is_err());
}
