//! Persisted activation state.
//!
//! The activation file is a single JSON document rewritten as a whole on
//! every change. A missing, unreadable or corrupt file loads as
//! [`ActivationRecord::default`] (not activated).

use crate::error::{LicenseError, LicenseResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name used inside the default data directory.
pub const ACTIVATION_FILE_NAME: &str = "activation.json";

/// Contents of the activation file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationRecord {
    /// Whether a key has been activated on this machine.
    #[serde(default)]
    pub activated: bool,
    /// The activated key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// SHA-256 hex digest of the activated key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_hash: Option<String>,
    /// Activation time in milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Activation time as an ISO 8601 string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_date: Option<String>,
    /// Fingerprint of the machine the key was activated on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<String>,
    /// When the record was last reset, as an ISO 8601 string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_date: Option<String>,
    /// Set on the placeholder written before the first activation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_run: Option<bool>,
}

impl ActivationRecord {
    /// The placeholder written when no activation file exists yet.
    #[must_use]
    pub fn first_run() -> Self {
        Self {
            first_run: Some(true),
            ..Self::default()
        }
    }

    /// A cleared record stamped with the reset time.
    #[must_use]
    pub fn cleared(reset_date: String) -> Self {
        Self {
            reset_date: Some(reset_date),
            ..Self::default()
        }
    }
}

/// Reads and writes the activation file.
#[derive(Debug, Clone)]
pub struct ActivationStore {
    path: PathBuf,
}

impl ActivationStore {
    /// Creates a store backed by `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location:
    /// `<data dir>/impulse/activation.json`, or `./activation.json` when the
    /// platform has no data directory.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(default_path())
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the activation file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the record, treating an absent or corrupt file as not activated.
    #[must_use]
    pub fn load(&self) -> ActivationRecord {
        match self.try_load() {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("No activation file at {:?}", self.path);
                ActivationRecord::default()
            }
            Err(e) => {
                warn!(
                    "Failed to load activation file {:?}: {}. Treating as not activated.",
                    self.path, e
                );
                ActivationRecord::default()
            }
        }
    }

    /// Loads the record, distinguishing a missing file (`Ok(None)`) from an
    /// unreadable or corrupt one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn try_load(&self) -> LicenseResult<Option<ActivationRecord>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the file with `record`.
    ///
    /// The document is written to a sibling temp file and renamed over the
    /// target so readers never see a half-written file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory can't be created or the file can't
    /// be written.
    pub fn save(&self, record: &ActivationRecord) -> LicenseResult<()> {
        let json = serde_json::to_string_pretty(record)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LicenseError::Storage(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| LicenseError::Storage(format!("failed to write {}: {e}", tmp.display())))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(LicenseError::Storage(format!(
                "failed to replace {}: {e}",
                self.path.display()
            )));
        }

        debug!("Saved activation record to {:?}", self.path);
        Ok(())
    }
}

fn default_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("impulse"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(ACTIVATION_FILE_NAME)
}
