//! Shared fixtures for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Path to a checked-in fixture.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture(name)).expect("fixture should exist")
}

/// Write a cue document with the given `(start, value)` pairs.
pub fn write_cues(dir: &TempDir, name: &str, cues: &[(f64, &str)]) -> PathBuf {
    let body: Vec<String> = cues
        .iter()
        .map(|(start, value)| format!(r#"{{ "start": {:?}, "value": "{}" }}"#, start, value))
        .collect();
    let path = dir.path().join(name);
    fs::write(&path, format!(r#"{{ "mouthCues": [{}] }}"#, body.join(", ")))
        .expect("temp file should be writable");
    path
}
