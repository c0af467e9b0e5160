//! Integration tests for the `drb` command-line interface.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Create a temp directory with a sample game file.
fn test_game() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("game.json");
    fs::write(
        &path,
        r#"{
    "items": {
        "weapon": {
            "sword": {"description": "Sharp", "conditions": ["$player.level >= 5"]},
            "staff": {"conditions": ["$player.alliance == evil"]}
        },
        "wearable": {
            "cloak": {"description": "Warm and grey", "weight": 2}
        },
        "potion": {
            "healing": {"description": "Red and fizzy"}
        }
    },
    "monsters": {
        "orc": {"level": 3}
    }
}
"#,
    )
    .unwrap();
    (dir, path)
}

fn drb() -> Command {
    let mut cmd = Command::cargo_bin("drb").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_shows_all_entities() {
    let (_dir, path) = test_game();
    drb()
        .args(["list", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("sword"))
        .stdout(predicate::str::contains("cloak"))
        .stdout(predicate::str::contains("healing"))
        .stdout(predicate::str::contains("4 entities"));
}

#[test]
fn list_reports_skipped_keys() {
    let (_dir, path) = test_game();
    drb()
        .args(["list", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 skipped"))
        .stdout(predicate::str::contains("monsters"));
}

#[test]
fn list_filters_by_kind() {
    let (_dir, path) = test_game();
    drb()
        .args(["list", "--kind", "wearable", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("cloak"))
        .stdout(predicate::str::contains("sword").not());
}

#[test]
fn list_missing_file_fails() {
    drb()
        .args(["list", "--file", "/nonexistent/game.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

#[test]
fn inspect_by_name() {
    let (_dir, path) = test_game();
    drb()
        .args(["inspect", "cloak", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Warm and grey"))
        .stdout(predicate::str::contains("weight: 2"));
}

#[test]
fn inspect_respects_player_level() {
    let (_dir, path) = test_game();
    drb()
        .args(["inspect", "items.weapon.sword", "--level", "3", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("equippable: no"));
}

#[test]
fn inspect_unknown_fails() {
    let (_dir, path) = test_game();
    drb()
        .args(["inspect", "dragon", "--file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("entity not found"));
}

// ---------------------------------------------------------------------------
// eval
// ---------------------------------------------------------------------------

#[test]
fn eval_uses_player_overrides() {
    drb()
        .args(["eval", "$player.alliance == evil", "--alliance", "evil"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=> true"));
}

#[test]
fn eval_reads_world_variables() {
    drb()
        .args(["eval", "$weather == rain", "--set", "weather=rain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=> true"));

    drb()
        .args(["eval", "$quest_stage >= 3", "--set", "quest_stage=4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=> true"));

    drb()
        .args(["eval", "$weather == rain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=> false"));
}

#[test]
fn set_without_equals_is_rejected() {
    drb()
        .args(["eval", "1 == 1", "--set", "weather"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn vars_gate_entities_in_game_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("game.yaml");
    fs::write(
        &path,
        r#"items:
  wearable:
    raincoat:
      conditions:
        - "$weather == rain"
"#,
    )
    .unwrap();
    drb()
        .args(["inspect", "raincoat", "--set", "weather=rain", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("equippable: yes"));
}

#[test]
fn eval_rejects_malformed_condition() {
    drb()
        .args(["eval", "justonetoken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no operator"));
}
