//! Shared test helpers for license tests.

#![allow(dead_code)]

use impulse_license::{ActivationRecord, DeviceFingerprint, KeyGate};
use std::path::PathBuf;
use tempfile::TempDir;

/// A key whose character codes sum to 1302 = 7 * 186.
pub const CHECKSUM_KEY: &str = "AAAAA-AAAAA-AAAAA-AAAAC";

/// A well-formed key whose character codes sum to 1300 (1300 % 7 == 5).
pub const REJECTED_KEY: &str = "AAAAA-AAAAA-AAAAA-AAAAA";

/// Fingerprint used by gates built with [`gate_in`].
pub const TEST_MACHINE: &str = "test-machine";

/// Returns a temp dir and the activation file path inside it.
pub fn temp_activation_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("activation.json");
    (dir, path)
}

/// Builds a gate on a fresh temp file bound to [`TEST_MACHINE`].
pub fn gate_in() -> (TempDir, KeyGate) {
    let (dir, path) = temp_activation_file();
    let gate = KeyGate::with_fingerprint(path, DeviceFingerprint::from_id(TEST_MACHINE));
    (dir, gate)
}

/// Reads the raw activation file as JSON.
pub fn read_json(gate: &KeyGate) -> serde_json::Value {
    let contents = std::fs::read_to_string(gate.store().path()).unwrap();
    serde_json::from_str(&contents).unwrap()
}

/// Loads the typed record.
pub fn read_record(gate: &KeyGate) -> ActivationRecord {
    gate.store().try_load().unwrap().unwrap()
}
