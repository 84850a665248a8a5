//! Integration tests for the CLI binary
//!
//! Only commands that work offline are exercised here; everything talking to
//! the backend is covered against wiremock in the lower crates.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wayfinder-cli"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("WAYFINDER_CONFIG")
        .env("WAYFINDER_STORAGE__STATE_FILE", dir.join("state.json"))
        .env("WAYFINDER_API__BASE_URL", "http://127.0.0.1:9")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const ITINERARY: &str = r#"{
    "duration": 900,
    "legs": [
        {
            "mode": "BUS",
            "from": { "name": "Campus", "lat": 48.2625, "lon": 11.6680, "track": "2" },
            "to": { "name": "Station", "lat": 48.2650, "lon": 11.6713 },
            "routeShortName": "690",
            "legGeometry": { "points": "", "precision": 6, "length": 0 }
        },
        {
            "mode": "SUBWAY",
            "from": { "name": "Station", "lat": 48.2650, "lon": 11.6713, "track": "1" },
            "to": { "name": "Odeonsplatz", "lat": 48.1428, "lon": 11.5775 },
            "routeShortName": "U6"
        }
    ]
}"#;

// ============================================================================
// Geometry tools
// ============================================================================

#[test]
fn decode_prints_one_point_per_line() {
    let dir = TempDir::new().unwrap();
    let output = cli(
        dir.path(),
        &["decode", "_p~iF~ps|U_ulLnnqC_mqNvxq`@", "--precision", "5"],
    );
    assert!(output.status.success());

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "38.500000,-120.200000");
}

#[test]
fn decode_rejects_malformed_input() {
    let dir = TempDir::new().unwrap();
    let output = cli(dir.path(), &["decode", "abc def"]);
    assert!(!output.status.success());
}

#[test]
fn route_reports_json() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("route.json");
    std::fs::write(&file, ITINERARY).unwrap();

    let output = cli(dir.path(), &["route", file.to_str().unwrap(), "--json"]);
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let report = &reports[0];
    assert_eq!(report["legs"].as_array().unwrap().len(), 2);
    assert!(report["bounds"].is_object());

    let station = report["stops"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == "Station")
        .unwrap();
    assert_eq!(station["modes"].as_array().unwrap().len(), 2);
}

#[test]
fn route_rejects_non_json() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("route.json");
    std::fs::write(&file, "not json").unwrap();

    let output = cli(dir.path(), &["route", file.to_str().unwrap()]);
    assert!(!output.status.success());
}

// ============================================================================
// Persisted client state
// ============================================================================

#[test]
fn prefs_are_persisted_between_runs() {
    let dir = TempDir::new().unwrap();

    let output = cli(dir.path(), &["prefs", "--theme", "dark", "--lang", "en"]);
    assert!(output.status.success());

    let output = cli(dir.path(), &["prefs"]);
    let text = stdout(&output);
    assert!(text.contains("theme: dark"));
    assert!(text.contains("lang:  en"));
    assert!(dir.path().join("state.json").exists());
}

#[test]
fn prefs_reject_unknown_theme() {
    let dir = TempDir::new().unwrap();
    let output = cli(dir.path(), &["prefs", "--theme", "sepia"]);
    assert!(!output.status.success());
}

#[test]
fn browser_without_webgl_reports_fallback() {
    let dir = TempDir::new().unwrap();
    let ua = "Mozilla/5.0 (X11; Linux x86_64; rv:140.0) Gecko/20100101 Firefox/140.0";

    let output = cli(dir.path(), &["browser", ua, "--no-webgl"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("\"webgl\": false"));
    assert!(text.contains("static room map"));
}

// ============================================================================
// Argument handling
// ============================================================================

#[test]
fn cli_requires_subcommand() {
    let dir = TempDir::new().unwrap();
    let output = cli(dir.path(), &[]);
    assert!(!output.status.success());
}

#[test]
fn calendar_limit_is_enforced_before_sending() {
    let dir = TempDir::new().unwrap();
    let ids: Vec<String> = (0..11).map(|i| format!("5606.EG.{i:03}")).collect();
    let mut args = vec!["calendar"];
    args.extend(ids.iter().map(String::as_str));

    let output = cli(dir.path(), &args);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("10"));
}
