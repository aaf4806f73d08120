//! Integration tests for riskreg
//!
//! The CLI surface is exercised end-to-end with assert_cmd; register flows
//! go through the library against temporary directories, since the session
//! loop itself requires a terminal.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use riskreg::cli::Session;
use riskreg::register::Rating;
use riskreg::report::heatmap;

/// Helper to get a riskreg command
fn riskreg() -> Command {
    Command::cargo_bin("riskreg").unwrap()
}

/// Helper to build a session writing reports into a temp directory
fn session_in(tmp: &TempDir, organization: &str) -> Session {
    Session::new(organization.to_string(), tmp.path().to_path_buf())
}

/// Helper to enter a risk through the form
fn enter(session: &mut Session, description: &str, likelihood: u8, impact: u8) {
    session.form_mut().description = description.to_string();
    session.form_mut().likelihood = Rating::new(likelihood).unwrap();
    session.form_mut().impact = Rating::new(impact).unwrap();
    session.submit_entry().unwrap();
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    riskreg()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("organizational risks"));
}

#[test]
fn test_version_displays() {
    riskreg()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("riskreg"));
}

#[test]
fn test_unknown_flag_fails() {
    riskreg()
        .arg("--definitely-not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Register Flow Tests
// ============================================================================

#[test]
fn test_add_edit_delete_flow() {
    let tmp = TempDir::new().unwrap();
    let mut session = session_in(&tmp, "Acme");

    enter(&mut session, "Server outage", 2, 4);
    enter(&mut session, "Data breach", 1, 5);
    enter(&mut session, "Vendor lock-in", 4, 2);
    assert_eq!(session.register().len(), 3);
    assert_eq!(session.table().len(), 3);

    // Edit the middle record in place
    session.begin_edit(1).unwrap();
    session.form_mut().description = "Customer data breach".to_string();
    session.submit_entry().unwrap();
    assert_eq!(session.register().len(), 3);
    assert_eq!(
        session.register().risk_at(1).unwrap().description,
        "Customer data breach"
    );
    assert_eq!(session.table().rows()[1].description, "Customer data breach");

    // Delete the first record; the rest shift up in both store and table
    session.delete(0).unwrap();
    assert_eq!(session.register().len(), 2);
    assert_eq!(
        session.register().risk_at(0).unwrap().description,
        "Customer data breach"
    );
    assert_eq!(session.table().rows()[0].description, "Customer data breach");
    assert_eq!(session.table().rows()[1].description, "Vendor lock-in");
}

#[test]
fn test_empty_description_is_rejected_without_state_change() {
    let tmp = TempDir::new().unwrap();
    let mut session = session_in(&tmp, "Acme");

    session.form_mut().description = "".to_string();
    assert!(session.submit_entry().is_err());
    assert_eq!(session.register().len(), 0);
    assert_eq!(session.table().len(), 0);
}

// ============================================================================
// Report Generation Tests
// ============================================================================

#[test]
fn test_generate_round_trip() {
    let tmp = TempDir::new().unwrap();
    let mut session = session_in(&tmp, "Acme");

    enter(&mut session, "Risk A", 2, 4);
    enter(&mut session, "Risk B", 2, 4);
    enter(&mut session, "Risk C", 5, 1);

    let report = session.generate().unwrap();

    // Exported file: header plus three data rows in insertion order
    let contents = std::fs::read_to_string(&report.path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        [
            "Description,Likelihood,Impact",
            "Risk A,2,4",
            "Risk B,2,4",
            "Risk C,5,1",
        ]
    );

    // Aggregation grid: 2 at (impact=4, likelihood=2), 1 at (impact=1,
    // likelihood=5), 0 elsewhere in the observed range
    let rating = |v: u8| Rating::new(v).unwrap();
    let grid = &report.grid;
    assert_eq!(grid.count_for(rating(4), rating(2)), Some(2));
    assert_eq!(grid.count_for(rating(1), rating(5)), Some(1));
    assert_eq!(grid.count_for(rating(1), rating(2)), Some(0));
    assert_eq!(grid.count_for(rating(4), rating(5)), Some(0));
}

#[test]
fn test_generate_blank_organization_defaults_filename() {
    let tmp = TempDir::new().unwrap();
    let mut session = session_in(&tmp, "");

    enter(&mut session, "Risk A", 3, 3);
    let report = session.generate().unwrap();

    assert_eq!(report.organization, "Organization");
    assert!(tmp
        .path()
        .join("Organization_risk_register.csv")
        .exists());
}

#[test]
fn test_generate_empty_register_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let session = session_in(&tmp, "Acme");

    assert!(session.generate().is_err());
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn test_generate_overwrites_previous_register() {
    let tmp = TempDir::new().unwrap();
    let mut session = session_in(&tmp, "Acme");

    enter(&mut session, "Risk A", 2, 4);
    session.generate().unwrap();

    enter(&mut session, "Risk B", 5, 5);
    let report = session.generate().unwrap();

    let contents = std::fs::read_to_string(&report.path).unwrap();
    assert_eq!(contents.lines().count(), 3); // header + both records
}

// ============================================================================
// Heatmap Tests
// ============================================================================

#[test]
fn test_heatmap_renders_from_generated_report() {
    let tmp = TempDir::new().unwrap();
    let mut session = session_in(&tmp, "Acme");

    enter(&mut session, "Risk A", 2, 4);
    enter(&mut session, "Risk B", 2, 4);
    enter(&mut session, "Risk C", 5, 1);

    let report = session.generate().unwrap();
    let rendered = heatmap::render(&report.organization, &report.grid);

    assert!(rendered.contains("Acme Risk Heatmap"));
    assert!(rendered.contains("Likelihood"));
    assert!(rendered.contains("Impact"));
    assert!(rendered.contains("Risk A"));
    assert!(rendered.contains("Risk C"));
}
