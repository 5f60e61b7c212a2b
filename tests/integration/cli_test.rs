//! Integration tests for the lipcue CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture, write_cues};

/// lipcue command isolated from the user's config and log settings.
fn lipcue(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lipcue").expect("binary should build");
    cmd.env("LIPCUE_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("nearest"))
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn no_arguments_is_usage_error() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir).assert().code(2);
}

// ============================================================================
// Cue Queries
// ============================================================================

#[test]
fn cues_lists_times_labels_and_images() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir)
        .arg("cues")
        .arg(fixture("vocals.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("0.400"))
        .stdout(predicate::str::is_match(r"1\.500\s+1\.5\s+A\s+0").unwrap())
        .stdout(predicate::str::is_match(r"2\.100\s+2\.1\s+X\s+8").unwrap());
}

#[test]
fn cues_on_missing_file_fails_with_path() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir)
        .args(["cues", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn cues_on_malformed_document_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{ "cues": [] }"#).unwrap();
    lipcue(&dir)
        .arg("cues")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cue data unavailable"));
}

#[test]
fn nearest_prints_closest_cue() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir)
        .arg("nearest")
        .arg(fixture("vocals.json"))
        .arg("0.95")
        .assert()
        .success()
        .stdout("0.900 0.9 E\n");
}

#[test]
fn nearest_outside_window_prints_none() {
    let dir = TempDir::new().unwrap();
    let cues = write_cues(&dir, "sparse.json", &[(1.0, "A"), (9.0, "B")]);
    lipcue(&dir)
        .arg("nearest")
        .arg(&cues)
        .args(["5.0", "--threshold", "2"])
        .assert()
        .success()
        .stdout("none\n");
}

#[test]
fn active_uses_configured_window() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[sync]\nhighlight_threshold = 0.3\n",
    )
    .unwrap();
    lipcue(&dir)
        .arg("active")
        .arg(fixture("vocals.json"))
        .arg("0.5")
        .assert()
        .success()
        .stdout("0.4\n");
}

#[test]
fn active_with_default_window_covers_every_cue() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir)
        .arg("active")
        .arg(fixture("vocals.json"))
        .arg("1.0")
        .assert()
        .success()
        .stdout("0.0 0.4 0.9 1.5 2.1\n");
}

#[test]
fn click_reports_target_and_selection() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir)
        .arg("click")
        .arg(fixture("vocals.json"))
        .args(["--x", "300", "--width", "1000", "--duration", "3.2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("time     0.96"))
        .stdout(predicate::str::contains("progress 0.3000"))
        .stdout(predicate::str::contains("selected 0.9"));
}

#[test]
fn click_on_zero_width_view_fails() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir)
        .arg("click")
        .arg(fixture("vocals.json"))
        .args(["--x", "10", "--width", "0", "--duration", "3.2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Click ignored"));
}

// ============================================================================
// Replay
// ============================================================================

#[test]
fn replay_walks_every_shape_without_resync() {
    let dir = TempDir::new().unwrap();
    let cues = write_cues(&dir, "short.json", &[(0.0, "X"), (0.5, "B"), (1.0, "F")]);
    lipcue(&dir)
        .arg("replay")
        .arg(&cues)
        .args(["--duration", "1.5", "--step", "0.25", "--config"])
        .arg(dir.path().join("replay.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("shape B (1)"))
        .stdout(predicate::str::contains("shape F (5)"))
        .stdout(predicate::str::contains("6 updates, 0 waveform seeks, 3 cues"));
}

#[test]
fn replay_from_cue_stops_at_next_cue() {
    let dir = TempDir::new().unwrap();
    let cues = write_cues(&dir, "short.json", &[(0.0, "X"), (0.5, "B"), (1.0, "F")]);
    lipcue(&dir)
        .arg("replay")
        .arg(&cues)
        .args(["--duration", "1.5", "--step", "0.25", "--from", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Playing cue 0.5 until 1.00"))
        .stdout(predicate::str::contains("2 updates"));
}

#[test]
fn replay_from_unknown_cue_fails() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir)
        .arg("replay")
        .arg(fixture("vocals.json"))
        .args(["--duration", "3.2", "--from", "9.9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No cue with id 9.9"));
}

#[test]
fn replay_rejects_non_positive_step() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir)
        .arg("replay")
        .arg(fixture("vocals.json"))
        .args(["--duration", "3.2", "--step", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--step"));
}

// ============================================================================
// Config and Completions
// ============================================================================

#[test]
fn config_show_prints_defaults_when_file_missing() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[sync]"))
        .stdout(predicate::str::contains("drift_tolerance = 0.1"))
        .stdout(predicate::str::contains("active_class = \"blink\""));
}

#[test]
fn config_init_writes_once_then_needs_force() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join("config.toml").exists());

    lipcue(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    lipcue(&dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().unwrap();
    lipcue(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lipcue"));
}
