//! E2E CLI tests for the `rc` binary.
//!
//! Each test writes a small CMS export into an isolated temp directory and
//! runs `rc` against it as a subprocess, asserting on `--json` output.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the `rc` binary, rooted in `dir`.
fn rc_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rc").expect("rc binary must exist");
    cmd.current_dir(dir);
    cmd.env("RAPHAEL_LOG", "error");
    cmd.env_remove("RAPHAEL_CATALOG");
    cmd.env_remove("FORMAT");
    // Keep the developer's own user config out of the run.
    cmd.env("XDG_CONFIG_HOME", dir.join(".user-config"));
    cmd.env("HOME", dir);
    cmd
}

fn project(id: &str, name: &str, status: &str, sectors: &[&str]) -> Value {
    json!({
        "_type": "project",
        "_id": id,
        "name": name,
        "slug": { "_type": "slug", "current": id },
        "location": "Leeds",
        "status": status,
        "sectors": sectors.iter().map(|s| json!({ "_ref": format!("sector-{s}") })).collect::<Vec<_>>(),
    })
}

/// Seven current and five previous projects plus noise documents.
fn export_documents() -> Vec<Value> {
    let mut docs = vec![
        json!({ "_type": "sector", "_id": "sector-retail", "name": "Retail", "slug": { "current": "retail" }, "order": 0 }),
        json!({ "_type": "sector", "_id": "sector-office", "name": "Office", "slug": { "current": "office" }, "order": 1 }),
        json!({ "_type": "sector", "_id": "sector-industrial", "name": "Industrial", "slug": { "current": "industrial" }, "order": 2 }),
        json!({ "_type": "sector", "_id": "sector-residential", "name": "Residential", "order": 3 }),
        project("exchange", "The Exchange", "current", &["retail", "office"]),
        project("arcade", "County Arcade", "current", &["retail"]),
    ];
    for i in 1..=5 {
        docs.push(project(&format!("works-{i}"), &format!("Works {i}"), "current", &["industrial"]));
    }
    let mut foundry = project("foundry", "Foundry Quarter", "previous", &["retail", "office"]);
    foundry["featured"] = json!(true);
    docs.push(foundry);
    for i in 1..=4 {
        docs.push(project(&format!("depot-{i}"), &format!("Depot {i}"), "previous", &["industrial"]));
    }
    docs.push(json!({ "_type": "project", "_id": "drafts.arcade", "name": "Draft", "slug": { "current": "arcade" } }));
    docs.push(json!({ "_type": "teamMember", "_id": "team-1", "name": "Victor" }));
    docs.push(json!({ "_type": "project", "_id": "broken", "name": "Broken", "slug": { "current": "broken" }, "status": "sold" }));
    docs
}

fn write_export(dir: &Path, relative: &str) {
    let path = dir.join(relative);
    std::fs::create_dir_all(path.parent().expect("export has a parent")).expect("mkdir");
    let body: String = export_documents()
        .iter()
        .map(|doc| format!("{doc}\n"))
        .collect();
    std::fs::write(path, body).expect("write export");
}

/// Temp site with the export at the default location.
fn site() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    write_export(dir.path(), "content/export.ndjson");
    dir
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = rc_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("rc should not crash");
    assert!(
        output.status.success(),
        "rc {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON on stdout")
}

fn slugs(rows: &Value) -> Vec<String> {
    rows.as_array()
        .expect("array")
        .iter()
        .map(|row| row["slug"].as_str().expect("slug").to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// projects
// ---------------------------------------------------------------------------

#[test]
fn projects_first_page_then_view_more() {
    let dir = site();

    let first = run_json(dir.path(), &["projects"]);
    assert_eq!(first["total"], 12);
    assert_eq!(first["revealed"], 6);
    assert_eq!(first["has_more"], true);
    assert_eq!(first["state"], "collapsed");
    assert_eq!(first["projects"].as_array().expect("array").len(), 6);

    let more = run_json(dir.path(), &["projects", "--more", "1"]);
    assert_eq!(more["revealed"], 12);
    assert_eq!(more["has_more"], false);
    assert_eq!(more["state"], "exhausted");
}

#[test]
fn projects_filtered_by_status_starts_a_fresh_window() {
    let dir = site();
    let previous = run_json(dir.path(), &["projects", "--status", "previous", "--more", "3"]);
    assert_eq!(previous["total"], 5);
    assert_eq!(previous["revealed"], 5);
    assert_eq!(previous["has_more"], false);
    assert_eq!(previous["state"], "collapsed");
}

#[test]
fn projects_filtered_by_sector_matches_any_tag() {
    let dir = site();
    let office = run_json(dir.path(), &["projects", "--sector", "Office"]);
    assert_eq!(slugs(&office["projects"]), vec!["exchange", "foundry"]);

    let none = run_json(dir.path(), &["projects", "--sector", "Residential"]);
    assert_eq!(none["total"], 0);
}

#[test]
fn projects_rejects_unknown_status() {
    let dir = site();
    rc_cmd(dir.path())
        .args(["projects", "--status", "sold"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2002"));
}

#[test]
fn project_config_sets_page_size() {
    let dir = site();
    std::fs::create_dir_all(dir.path().join(".raphael")).expect("mkdir");
    std::fs::write(
        dir.path().join(".raphael/config.toml"),
        "[track_record]\nrows = 1\ncolumns = 4\n",
    )
    .expect("write config");

    let page = run_json(dir.path(), &["projects"]);
    assert_eq!(page["revealed"], 4);
    let more = run_json(dir.path(), &["projects", "--more", "1"]);
    assert_eq!(more["revealed"], 8);
    assert_eq!(more["state"], "expanded");
}

// ---------------------------------------------------------------------------
// sectors / featured / orders
// ---------------------------------------------------------------------------

#[test]
fn sectors_lists_only_used_sectors_in_display_order() {
    let dir = site();
    let options = run_json(dir.path(), &["sectors"]);
    let values: Vec<_> = options["sectors"]
        .as_array()
        .expect("array")
        .iter()
        .map(|o| o["value"].as_str().expect("value").to_string())
        .collect();
    assert_eq!(values, vec!["all", "Retail", "Office", "Industrial"]);
    assert_eq!(options["sectors"][1]["count"], 3);
    assert_eq!(options["statuses"][2]["count"], 5);
}

#[test]
fn featured_lists_flagged_projects() {
    let dir = site();
    let featured = run_json(dir.path(), &["featured"]);
    assert_eq!(slugs(&featured), vec!["foundry"]);
}

#[test]
fn orders_reports_every_project_unranked() {
    let dir = site();
    let rows = run_json(dir.path(), &["orders", "--unranked"]);
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0]["position"], 1);
    assert_eq!(rows[0]["slug"], "exchange");
}

// ---------------------------------------------------------------------------
// show / related
// ---------------------------------------------------------------------------

#[test]
fn related_ranks_shared_status_above_extra_sector() {
    let dir = site();
    let report = run_json(dir.path(), &["related", "exchange"]);
    let related = report["related"].as_array().expect("array");
    assert_eq!(related.len(), 3);
    assert_eq!(related[0]["slug"], "arcade");
    assert_eq!(related[0]["score"], 150);
    assert_eq!(related[1]["slug"], "foundry");
    assert_eq!(related[1]["score"], 130);
    assert_eq!(related[2]["slug"], "works-1");
    assert_eq!(related[2]["score"], 50);
}

#[test]
fn show_includes_related_without_itself() {
    let dir = site();
    let detail = run_json(dir.path(), &["show", "exchange"]);
    assert_eq!(detail["name"], "The Exchange");
    assert_eq!(detail["status"], "Current");
    let related = slugs(&detail["related"]);
    assert_eq!(related.len(), 3);
    assert!(!related.contains(&"exchange".to_string()));
}

#[test]
fn show_unknown_slug_fails() {
    let dir = site();
    rc_cmd(dir.path())
        .args(["show", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"));
}

// ---------------------------------------------------------------------------
// check / catalog resolution
// ---------------------------------------------------------------------------

#[test]
fn check_reports_ignored_and_skipped_documents() {
    let dir = site();
    let report = run_json(dir.path(), &["check"]);
    assert_eq!(report["projects"], 12);
    assert_eq!(report["sectors"], 4);
    assert_eq!(report["ignored"], 2);
    assert_eq!(report["skipped"][0]["id"], "broken");

    rc_cmd(dir.path())
        .args(["check", "--strict"])
        .assert()
        .failure();
}

#[test]
fn deleted_sector_reference_keeps_the_project() {
    let dir = TempDir::new().expect("tempdir");
    let docs = [
        json!({ "_type": "sector", "_id": "sector-retail", "name": "Retail", "order": 0 }),
        json!({
            "_type": "project", "_id": "arcade", "name": "County Arcade",
            "slug": { "current": "arcade" }, "status": "current",
            "sectors": [{ "_ref": "sector-retail" }, { "_ref": "sector-deleted" }, null]
        }),
    ];
    let body: String = docs.iter().map(|doc| format!("{doc}\n")).collect();
    std::fs::create_dir_all(dir.path().join("content")).expect("mkdir");
    std::fs::write(dir.path().join("content/export.ndjson"), body).expect("write export");

    let report = run_json(dir.path(), &["check", "--strict"]);
    assert_eq!(report["projects"], 1);
    assert!(report["skipped"].as_array().expect("array").is_empty());
    assert_eq!(report["dangling_references"][0]["project"], "arcade");
    assert_eq!(report["dangling_references"][0]["reference"], "sector-deleted");

    let retail = run_json(dir.path(), &["projects", "--sector", "Retail"]);
    assert_eq!(slugs(&retail["projects"]), vec!["arcade"]);
}

#[test]
fn missing_catalog_reports_code_and_hint() {
    let dir = TempDir::new().expect("tempdir");
    rc_cmd(dir.path())
        .args(["projects"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1002"))
        .stderr(predicate::str::contains("--catalog"));
}

#[test]
fn catalog_flag_and_env_override_default_path() {
    let dir = TempDir::new().expect("tempdir");
    write_export(dir.path(), "elsewhere/export.ndjson");

    let via_flag = run_json(dir.path(), &["featured", "--catalog", "elsewhere/export.ndjson"]);
    assert_eq!(slugs(&via_flag), vec!["foundry"]);

    let output = rc_cmd(dir.path())
        .env("RAPHAEL_CATALOG", dir.path().join("elsewhere/export.ndjson"))
        .args(["featured", "--format", "json"])
        .output()
        .expect("rc should not crash");
    assert!(output.status.success());
    let via_env: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(slugs(&via_env), vec!["foundry"]);
}

// ---------------------------------------------------------------------------
// contact / completions
// ---------------------------------------------------------------------------

#[test]
fn contact_accepts_valid_submission() {
    let dir = TempDir::new().expect("tempdir");
    let out = run_json(
        dir.path(),
        &[
            "contact",
            "--name",
            " Jane Doe ",
            "--email",
            "jane@example.com",
            "--message",
            "Interested in Leeds.",
        ],
    );
    assert_eq!(out["ok"], true);
    assert_eq!(out["subject"], "New Contact Form Submission from Jane Doe");
    assert!(out["body"].as_str().expect("body").contains("Email: jane@example.com"));
}

#[test]
fn contact_log_omits_submitter_address() {
    let dir = TempDir::new().expect("tempdir");
    let output = rc_cmd(dir.path())
        .env("RAPHAEL_LOG", "info")
        .args(["contact", "--name", "Jane", "--email", "jane@example.com", "--message", "hi"])
        .arg("--json")
        .output()
        .expect("rc should not crash");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("contact submission accepted"));
    assert!(!stderr.contains("jane@example.com"));
}

#[test]
fn contact_rejects_bad_email() {
    let dir = TempDir::new().expect("tempdir");
    rc_cmd(dir.path())
        .args(["contact", "--name", "Jane", "--email", "jane-at-example", "--message", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E4001"));
}

#[test]
fn completions_emit_script() {
    let dir = TempDir::new().expect("tempdir");
    rc_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rc"));
}

#[test]
fn text_mode_lists_rows() {
    let dir = site();
    rc_cmd(dir.path())
        .args(["projects", "--format", "text", "--sector", "Office"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exchange  current  Retail, Office  The Exchange"))
        .stdout(predicate::str::contains("# 2 of 2 (collapsed)"));
}
