use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn paintpilot(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_paintpilot"))
        .args(args)
        .current_dir(cwd)
        .env_remove("PAINTPILOT_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("paintpilot should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("report should exist")).expect("report should be JSON")
}

#[test]
fn takeoff_writes_bid_package_and_artifacts() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = paintpilot(
        &[
            "takeoff",
            "--input",
            "plans.pdf",
            "--svg",
            "out/plan.svg",
            "--html",
            "out/preview.html",
            "--json",
            "out/takeoff.json",
        ],
        temp.path(),
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Conference A"));
    assert!(out.contains("Total Net Area (sf)"));
    assert!(out.contains("4417"));
    assert!(out.contains("29.68"));
    assert!(out.contains("Project: AC Wallcovering Office | Floor: 2nd Floor"));
    assert!(out.contains("~$192.50 (@ $55/hr)"));

    let workbook = fs::read(temp.path().join("output/bid_package.xlsx")).expect("workbook should exist");
    assert!(workbook.starts_with(b"PK"));

    let svg = fs::read_to_string(temp.path().join("out/plan.svg")).expect("svg should exist");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("205 • 459 sf"));

    let html = fs::read_to_string(temp.path().join("out/preview.html")).expect("html should exist");
    assert!(html.contains(r#"<svg width="100%""#));

    let report = read_json(&temp.path().join("out/takeoff.json"));
    assert_eq!(report["results"].as_array().map(Vec::len), Some(8));
    assert_eq!(report["summary"]["paint"]["rooms"], 7);
    assert_eq!(report["summary"]["wallcovering"]["rolls"], 15.3);
}

#[test]
fn takeoff_no_fit_keeps_fixed_diagram() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = paintpilot(
        &["takeoff", "--input", "plans.pdf", "--html", "preview.html", "--no-fit"],
        temp.path(),
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let html = fs::read_to_string(temp.path().join("preview.html")).expect("html should exist");
    assert!(html.contains(r#"<svg width="1100" height="720""#));
}

#[test]
fn takeoff_uses_supplied_rooms() {
    let temp = TempDir::new().expect("tempdir should be created");
    fs::write(
        temp.path().join("rooms.json"),
        r#"{
          "project": "Clinic",
          "rooms": [
            {"id": "101", "name": "Exam", "length": 10, "width": 10, "height": 10, "doors": 1},
            {"id": "102", "name": "Lobby", "length": 10, "width": 10, "height": 10, "finish_type": "wallcovering"}
          ]
        }"#,
    )
    .expect("rooms file should be written");

    let output = paintpilot(
        &["takeoff", "--input", "plans.pdf", "--rooms", "rooms.json", "--json", "takeoff.json"],
        temp.path(),
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Project: Clinic | Floor: None"));

    let report = read_json(&temp.path().join("takeoff.json"));
    // 400 - 21 = 379 painted; 400 / 30 = 13.33 rolls
    assert_eq!(report["results"][0]["net_area"], 379.0);
    assert_eq!(report["summary"]["total_net_area"], 779.0);
    assert_eq!(report["summary"]["wallcovering"]["rolls"], 13.3);
}

#[test]
fn takeoff_reports_missing_room_field() {
    let temp = TempDir::new().expect("tempdir should be created");
    fs::write(
        temp.path().join("rooms.json"),
        r#"{"rooms": [{"id": "101", "name": "Exam", "length": 10, "width": 10}]}"#,
    )
    .expect("rooms file should be written");

    let output = paintpilot(&["takeoff", "--input", "plans.pdf", "--rooms", "rooms.json"], temp.path());
    assert_eq!(output.status.code(), Some(1));

    let err = stderr(&output);
    assert!(err.contains("Error:"));
    assert!(err.contains("height"));
    assert!(!temp.path().join("output/bid_package.xlsx").exists());
}

#[test]
fn takeoff_reads_config_from_environment() {
    let temp = TempDir::new().expect("tempdir should be created");
    fs::write(
        temp.path().join("takeoff.toml"),
        "[finish_systems.wallcovering]\ncoverage = 51.0\n",
    )
    .expect("config should be written");

    let output = Command::new(env!("CARGO_BIN_EXE_paintpilot"))
        .args(["takeoff", "--input", "plans.pdf", "--json", "takeoff.json"])
        .current_dir(temp.path())
        .env("PAINTPILOT_CONFIG", "takeoff.toml")
        .env_remove("RUST_LOG")
        .output()
        .expect("paintpilot should run");
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    // Break Room: 459 sf / 51 sf per roll
    let report = read_json(&temp.path().join("takeoff.json"));
    assert_eq!(report["summary"]["wallcovering"]["rolls"], 9.0);
}

#[test]
fn takeoff_rejects_invalid_config() {
    let temp = TempDir::new().expect("tempdir should be created");
    fs::write(
        temp.path().join("bad.toml"),
        "[finish_systems.paint.primer]\ncoats = 1\ncoverage = 0.0\n",
    )
    .expect("config should be written");

    let output = paintpilot(&["takeoff", "--input", "plans.pdf", "--config", "bad.toml"], temp.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Coverage must be positive"));
}

#[test]
fn sample_pdf_writes_placeholder() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = paintpilot(&["sample-pdf", "--output", "plans/sample.pdf"], temp.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let bytes = fs::read(temp.path().join("plans/sample.pdf")).expect("pdf should exist");
    assert!(bytes.starts_with(b"%PDF-1.4"));
}
