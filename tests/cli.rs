#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli(registry: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("lavage-cli").unwrap();
    cmd.arg("--registry").arg(registry);
    cmd
}

#[test]
fn import_slots_book_check_roundtrip() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("registry.json");

    let employees = dir.path().join("employees.csv");
    fs::write(&employees, "handle,display_name\nrachid,Rachid\n").unwrap();
    let areas = dir.path().join("areas.csv");
    fs::write(&areas, "name,employee_handles\nCentre,rachid\n").unwrap();
    let windows = dir.path().join("windows.csv");
    fs::write(&windows, "handle,day,start,end,active\nrachid,0,08:00,20:00,1\n").unwrap();

    cli(&registry)
        .args(["import-employees", "--csv"])
        .arg(&employees)
        .assert()
        .success();
    cli(&registry)
        .args(["import-areas", "--csv"])
        .arg(&areas)
        .assert()
        .success();
    cli(&registry)
        .args(["import-windows", "--csv"])
        .arg(&windows)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 window(s) imported"));

    // 2026-08-10 est un lundi ; --now la veille pour une grille pleine
    cli(&registry)
        .args([
            "slots",
            "--area",
            "Centre",
            "--date",
            "2026-08-10",
            "--now",
            "2026-08-09T12:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("08:00"))
        .stdout(predicate::str::contains("18:30"));

    cli(&registry)
        .args([
            "book",
            "--area",
            "Centre",
            "--date",
            "2026-08-10",
            "--time",
            "10:00",
            "--customer",
            "Ali",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("rachid"));

    // seul employé déjà pris : résultat attendu, code 2
    cli(&registry)
        .args([
            "book",
            "--area",
            "Centre",
            "--date",
            "2026-08-10",
            "--time",
            "10:30",
            "--customer",
            "Sara",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no employee available"));

    cli(&registry)
        .args(["check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));
}

#[test]
fn unknown_area_fails_with_message() {
    let dir = tempdir().unwrap();
    let registry = dir.path().join("registry.json");

    cli(&registry)
        .args([
            "slots",
            "--area",
            "Nulle-Part",
            "--date",
            "2026-08-10",
            "--now",
            "2026-08-09T12:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown area"));
}
