//! CLI integration tests.
//!
//! These tests run the built `snarl` binary against snapshot fixtures and
//! assert on its output in both text and JSON modes.

mod common;

use common::run_snarl_in_dir;
use serde_json::Value;
use tempfile::tempdir;

/// A small snapshot: PROJ-1 blocks PROJ-2 and PROJ-3, PROJ-2 and PROJ-3
/// block each other (a cycle), and PROJ-2 links out to EXT-9.
const FIXTURE: &str = r#"{
    "issues": [
        {
            "key": "PROJ-1",
            "summary": "Provision build agents",
            "project_key": "PROJ",
            "issue_type": "Task",
            "status": "In Progress",
            "status_category": "in-progress",
            "story_points": 5,
            "links": [
                {
                    "type_name": "Blocks",
                    "direction": "outward",
                    "linked": {
                        "key": "PROJ-2",
                        "summary": "Wire up pipeline",
                        "status": "To Do",
                        "status_category": "new",
                        "issue_type": "Task"
                    }
                },
                {
                    "type_name": "Blocks",
                    "direction": "outward",
                    "linked": {
                        "key": "PROJ-3",
                        "summary": "Publish artifacts",
                        "status": "To Do",
                        "status_category": "new",
                        "issue_type": "Task"
                    }
                }
            ]
        },
        {
            "key": "PROJ-2",
            "summary": "Wire up pipeline",
            "project_key": "PROJ",
            "issue_type": "Task",
            "status": "To Do",
            "status_category": "new",
            "story_points": 3,
            "links": [
                {
                    "type_name": "Blocks",
                    "direction": "outward",
                    "linked": {
                        "key": "PROJ-3",
                        "summary": "Publish artifacts",
                        "status": "To Do",
                        "status_category": "new",
                        "issue_type": "Task"
                    }
                },
                {
                    "type_name": "Blocks",
                    "direction": "outward",
                    "linked": { "key": "EXT-9" }
                }
            ]
        },
        {
            "key": "PROJ-3",
            "summary": "Publish artifacts",
            "project_key": "PROJ",
            "issue_type": "Task",
            "status": "To Do",
            "status_category": "new",
            "story_points": 8,
            "links": [
                {
                    "type_name": "Blocks",
                    "direction": "outward",
                    "linked": {
                        "key": "PROJ-2",
                        "summary": "Wire up pipeline",
                        "status": "To Do",
                        "status_category": "new",
                        "issue_type": "Task"
                    }
                }
            ]
        }
    ]
}"#;

fn write_fixture(dir: &std::path::Path) {
    std::fs::write(dir.join("snapshot.json"), FIXTURE).unwrap();
}

#[test]
fn analyze_json_reports_graph_and_score() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    let output = run_snarl_in_dir(
        dir.path(),
        &[
            "analyze",
            "--snapshot",
            "snapshot.json",
            "--projects",
            "PROJ",
            "--json",
        ],
    );
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    // 3 project nodes plus the EXT-9 phantom.
    assert_eq!(report["graph"]["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(report["graph"]["edges"].as_array().unwrap().len(), 5);
    // PROJ-2 <-> PROJ-3 is a cycle.
    assert_eq!(report["graph"]["cycles"].as_array().unwrap().len(), 1);
    assert!(report["score"]["score"].as_u64().unwrap() > 0);
    assert!(report["recommendations"].is_array());
}

#[test]
fn analyze_text_renders_summary() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    let output = run_snarl_in_dir(
        dir.path(),
        &[
            "analyze",
            "--snapshot",
            "snapshot.json",
            "--projects",
            "PROJ",
        ],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Dependency graph"));
    assert!(stdout.contains("4 node(s), 5 edge(s)"));
    assert!(stdout.contains("circular dependency"));
}

#[test]
fn cycles_json_lists_cycle_and_suggestions() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    let output = run_snarl_in_dir(
        dir.path(),
        &[
            "cycles",
            "--snapshot",
            "snapshot.json",
            "--projects",
            "PROJ",
            "--json",
        ],
    );
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    let cycles = report["cycles"].as_array().unwrap();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0]["length"], 3);
    let path = cycles[0]["path"].as_array().unwrap();
    assert_eq!(path.first(), path.last());
    assert_eq!(report["suggestions"].as_array().unwrap().len(), 1);
}

#[test]
fn risks_honors_config_thresholds() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());
    // Lower the medium cutoff so even a single blocked issue classifies.
    std::fs::write(
        dir.path().join("snarl.yaml"),
        "projects:\n  - PROJ\nsnapshot: snapshot.json\nthresholds:\n  medium_blocked: 1\n",
    )
    .unwrap();

    let output = run_snarl_in_dir(dir.path(), &["risks", "--json"]);
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    let risks = report["risks"].as_array().unwrap();
    assert!(!risks.is_empty());
    assert!(risks.iter().all(|risk| risk["level"] != "low"));
}

#[test]
fn chains_text_mode() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    let output = run_snarl_in_dir(
        dir.path(),
        &[
            "chains",
            "--snapshot",
            "snapshot.json",
            "--projects",
            "PROJ",
        ],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Blocking chains") || stdout.contains("No blocking chains"));
}

#[test]
fn missing_snapshot_fails_with_context() {
    let dir = tempdir().unwrap();

    let output = run_snarl_in_dir(
        dir.path(),
        &[
            "analyze",
            "--snapshot",
            "missing.json",
            "--projects",
            "PROJ",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("missing.json"));
}

#[test]
fn missing_projects_fails_with_hint() {
    let dir = tempdir().unwrap();
    write_fixture(dir.path());

    let output = run_snarl_in_dir(dir.path(), &["analyze", "--snapshot", "snapshot.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("projects"));
}
