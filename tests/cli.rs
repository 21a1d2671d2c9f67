//! End-to-end tests for the turbine-atlas CLI, driven through assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn atlas() -> Command {
    Command::cargo_bin("turbine-atlas").unwrap()
}

/// Write a small source table with one gap per cleanable column.
fn write_fixture(tmp: &TempDir) -> PathBuf {
    let path = tmp.path().join("turbine_data.csv");
    fs::write(
        &path,
        "Turbine identifier,Turbine rated capacity (kW),Commissioning date,Manufacturer,Model,Latitude,Longitude\n\
         T1,100,2000-01-01,Vestas,V80,49.5,-97.1\n\
         T2,,2000-01-03,Vestas,V80,50.1,-96.8\n\
         T3,300,2000-01-02,,V80,49.9,-97.3\n",
    )
    .unwrap();
    path
}

#[test]
fn help_displays() {
    atlas()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("wind turbine table"));
}

#[test]
fn summary_reports_fills() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp);

    atlas()
        .arg("summary")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 turbine(s), 2 imputed cell(s)"))
        .stdout(predicate::str::contains("200"))
        .stdout(predicate::str::contains("Vestas"));
}

#[test]
fn summary_json_is_machine_readable() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp);

    let output = atlas()
        .arg("summary")
        .arg(&path)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["rows"], 3);
    let capacity = parsed["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "Turbine rated capacity (kW)")
        .unwrap();
    assert_eq!(capacity["kind"], "numeric");
    assert_eq!(capacity["filled"], 1);
    assert_eq!(capacity["fill"], "200");
}

#[test]
fn select_without_positions_prints_prompt() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp);

    atlas()
        .arg("select")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing selected"));
}

#[test]
fn select_shows_rows_in_given_order() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp);

    atlas()
        .args(["select"])
        .arg(&path)
        .args(["2", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("T3"))
        .stdout(predicate::str::contains("T1"))
        .stdout(predicate::str::contains("2 turbine(s) selected"));
}

#[test]
fn select_rejects_out_of_range_position() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp);

    atlas()
        .arg("select")
        .arg(&path)
        .arg("7")
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn export_round_trips_through_the_loader() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp);
    let out = tmp.path().join("cleaned.csv");

    atlas()
        .arg("export")
        .arg(&path)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 3 row(s)"));

    let exported = fs::read_to_string(&out).unwrap();
    assert!(exported.contains("T2,200,"));

    // A second pass over the export finds nothing left to repair.
    atlas()
        .arg("summary")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 turbine(s), 0 imputed cell(s)"));
}

#[test]
fn export_selection_to_stdout() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp);

    atlas()
        .arg("export")
        .arg(&path)
        .args(["--select", "1,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("T2,200,").count(2));
}

#[test]
fn missing_required_column_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.csv");
    fs::write(
        &path,
        "Turbine identifier,Manufacturer,Model,Latitude,Longitude\n\
         T1,Vestas,V80,49.5,-97.1\n",
    )
    .unwrap();

    atlas()
        .arg("export")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "missing required column 'Turbine rated capacity (kW)'",
        ));
}
