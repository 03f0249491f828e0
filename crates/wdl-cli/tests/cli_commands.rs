#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wdl() -> Command {
    Command::cargo_bin("wdl").unwrap()
}

/// Write a minimal valid world file and return its directory.
fn valid_world_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("world.json"),
        r#"{
    "metadata": {"title": "CLI Fixture", "author": "tests"},
    "entities": [
        {"name": "Ground", "entity_type": "terrain",
         "transform": {"scale": {"x": 50.0, "y": 1.0, "z": 50.0}}},
        {"name": "Crate", "entity_type": "prop",
         "transform": {"position": {"x": 3.0, "y": 0.5, "z": 0.0}}}
    ],
    "lights": [{"name": "Sun", "light_type": "directional"}]
}"#,
    )
    .unwrap();
    dir
}

/// A world whose only entity references a missing parent.
fn broken_world_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("world.json"),
        r#"{
    "metadata": {"title": "Broken Fixture"},
    "entities": [
        {"name": "Orphan", "entity_type": "prop",
         "parent_id": "00000000-0000-0000-0000-000000000001"}
    ]
}"#,
    )
    .unwrap();
    dir
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_world_file() {
    let parent = TempDir::new().unwrap();
    wdl()
        .args(["init", "myworld"])
        .current_dir(parent.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created world 'myworld'"));

    assert!(parent.path().join("myworld/world.json").exists());
}

#[test]
fn init_fails_if_dir_exists() {
    let parent = TempDir::new().unwrap();
    fs::create_dir(parent.path().join("myworld")).unwrap();

    wdl()
        .args(["init", "myworld"])
        .current_dir(parent.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_output_validates_cleanly() {
    let parent = TempDir::new().unwrap();
    wdl()
        .args(["init", "myworld"])
        .current_dir(parent.path())
        .assert()
        .success();

    wdl()
        .args(["validate", "-f", "myworld/world.json"])
        .current_dir(parent.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

// ---------------------------------------------------------------------------
// info
// ---------------------------------------------------------------------------

#[test]
fn info_prints_summary() {
    let dir = valid_world_dir();
    wdl()
        .args(["info"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CLI Fixture"))
        .stdout(predicate::str::contains("2 entities, 1 lights, 0 systems"));
}

#[test]
fn info_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    wdl()
        .args(["info"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_reports_dangling_parent_and_fails() {
    let dir = broken_world_dir();
    wdl()
        .args(["validate"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Orphan"))
        .stderr(predicate::str::contains("validation failed"));
}

#[test]
fn validate_malformed_json_fails_with_parse_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("world.json"), "{ not json").unwrap();
    wdl()
        .args(["validate"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed world document"));
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[test]
fn analyze_prints_entity_count() {
    let dir = valid_world_dir();
    wdl()
        .args(["analyze"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entities"));
}

#[test]
fn analyze_json_is_machine_readable() {
    let dir = valid_world_dir();
    wdl()
        .args(["analyze", "--json"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"entity_count\": 2"));
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn generate_all_writes_every_target() {
    let dir = valid_world_dir();
    wdl()
        .args(["generate", "all", "-o", "out"])
        .current_dir(dir.path())
        .assert()
        .success();

    for path in [
        "out/unity/Scripts/WorldLoader.cs",
        "out/unity/Data/world_data.json",
        "out/unreal/Scripts/world_builder.py",
        "out/horizon/scripts/types.ts",
    ] {
        assert!(dir.path().join(path).exists(), "missing {path}");
    }
}

#[test]
fn generate_single_target_only() {
    let dir = valid_world_dir();
    wdl()
        .args(["generate", "unity", "-o", "out"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("unity: 6 files"));

    assert!(dir.path().join("out/unity").exists());
    assert!(!dir.path().join("out/unreal").exists());
}

#[test]
fn generate_unknown_target_fails() {
    let dir = valid_world_dir();
    wdl()
        .args(["generate", "source2"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown target"));
}

#[test]
fn generate_unreadable_world_writes_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("world.json"), "{ not json").unwrap();
    wdl()
        .args(["generate", "all", "-o", "out"])
        .current_dir(dir.path())
        .assert()
        .failure();
    assert!(!dir.path().join("out").exists());
}
