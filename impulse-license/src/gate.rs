//! The activation gate: validate, activate, check, reset.
//!
//! ```text
//! NotActivated --activate--> Active --(30 days | other machine)--> Expired / MachineMismatch
//!      ^                                                                  |
//!      +------------------------- record cleared on check ----------------+
//! ```

use crate::activation::{ActivationRecord, ActivationStore};
use crate::device::DeviceFingerprint;
use crate::error::LicenseResult;
use crate::key::{sha256_hex, validate_key};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// How long an activation stays valid (30 days, in milliseconds).
pub const ACTIVATION_PERIOD_MS: i64 = 30 * DAY_MS;

/// Where the persisted activation sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum ActivationStatus {
    /// No activation, or the record is missing or corrupt.
    NotActivated,
    /// Activated on this machine and within the activation period.
    Active {
        /// Days left, rounded up, or `None` for records without a timestamp.
        days_remaining: Option<u32>,
    },
    /// More than [`ACTIVATION_PERIOD_MS`] have passed since activation.
    Expired,
    /// The record was activated on a different machine.
    MachineMismatch,
}

impl ActivationStatus {
    /// Returns true for [`ActivationStatus::Active`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Returns true if a check in this state clears the stored record.
    #[must_use]
    pub fn invalidates_record(&self) -> bool {
        matches!(self, Self::Expired | Self::MachineMismatch)
    }
}

/// Local license gate bound to one activation file and one machine.
#[derive(Debug, Clone)]
pub struct KeyGate {
    store: ActivationStore,
    machine: DeviceFingerprint,
}

impl KeyGate {
    /// Opens the gate on `path` for the current machine.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_fingerprint(path, DeviceFingerprint::generate())
    }

    /// Opens the gate at the default activation file location.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self {
            store: ActivationStore::at_default_location(),
            machine: DeviceFingerprint::generate(),
        }
    }

    /// Opens the gate on `path` with an explicit machine fingerprint.
    pub fn with_fingerprint(path: impl Into<PathBuf>, machine: DeviceFingerprint) -> Self {
        Self {
            store: ActivationStore::new(path),
            machine,
        }
    }

    /// Returns the backing store.
    #[must_use]
    pub fn store(&self) -> &ActivationStore {
        &self.store
    }

    /// Returns the fingerprint this gate binds activations to.
    #[must_use]
    pub fn machine(&self) -> &DeviceFingerprint {
        &self.machine
    }

    /// Returns true if `key` is well-formed and accepted.
    #[must_use]
    pub fn validate(&self, key: &str) -> bool {
        validate_key(key)
    }

    /// Writes the first-run placeholder if no activation file exists.
    ///
    /// Returns true if the placeholder was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the placeholder can't be written.
    pub fn ensure_initialized(&self) -> LicenseResult<bool> {
        if self.store.exists() {
            return Ok(false);
        }
        self.store.save(&ActivationRecord::first_run())?;
        info!("Created activation file at {:?}", self.store.path());
        Ok(true)
    }

    /// Records `key` as activated on this machine now.
    ///
    /// The key is not validated here; call [`validate`](Self::validate) first.
    ///
    /// # Errors
    ///
    /// Returns an error if the activation file can't be written.
    pub fn activate(&self, key: &str) -> LicenseResult<()> {
        self.activate_at(key, Utc::now())
    }

    /// Records `key` as activated on this machine at `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the activation file can't be written.
    pub fn activate_at(&self, key: &str, at: DateTime<Utc>) -> LicenseResult<()> {
        let record = ActivationRecord {
            activated: true,
            key: Some(key.to_string()),
            key_hash: Some(sha256_hex(key)),
            timestamp: Some(at.timestamp_millis()),
            activation_date: Some(iso(at)),
            machine_id: Some(self.machine.id().to_string()),
            ..ActivationRecord::default()
        };
        self.store.save(&record)?;
        info!("License activated on machine {}", self.machine);
        Ok(())
    }

    /// Reads the current status without modifying the record.
    #[must_use]
    pub fn status(&self) -> ActivationStatus {
        self.status_at(Utc::now())
    }

    /// Reads the status as of `now` without modifying the record.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> ActivationStatus {
        evaluate(&self.store.load(), self.machine.id(), now.timestamp_millis())
    }

    /// Checks the status and clears the record if it has expired or belongs
    /// to another machine.
    pub fn check(&self) -> ActivationStatus {
        self.check_at(Utc::now())
    }

    /// Like [`check`](Self::check) as of `now`.
    pub fn check_at(&self, now: DateTime<Utc>) -> ActivationStatus {
        let status = self.status_at(now);
        if status.invalidates_record() {
            info!("Activation no longer valid ({:?}), clearing", status);
            if let Err(e) = self.reset_at(now) {
                warn!("Failed to clear activation record: {}", e);
            }
        }
        status
    }

    /// Returns true if a valid activation exists for this machine.
    ///
    /// Fails closed: a missing or corrupt record is "not activated". Expired
    /// and foreign-machine records are cleared as a side effect.
    pub fn is_activated(&self) -> bool {
        self.check().is_active()
    }

    /// Like [`is_activated`](Self::is_activated) as of `now`.
    pub fn is_activated_at(&self, now: DateTime<Utc>) -> bool {
        self.check_at(now).is_active()
    }

    /// Overwrites the record with a cleared one.
    ///
    /// # Errors
    ///
    /// Returns an error if the activation file can't be written.
    pub fn reset(&self) -> LicenseResult<()> {
        self.reset_at(Utc::now())
    }

    fn reset_at(&self, now: DateTime<Utc>) -> LicenseResult<()> {
        self.store.save(&ActivationRecord::cleared(iso(now)))
    }
}

/// Decides the status of `record` for machine `machine_id` at `now_ms`.
///
/// A missing or zero `timestamp` means the activation never expires.
#[must_use]
pub fn evaluate(record: &ActivationRecord, machine_id: &str, now_ms: i64) -> ActivationStatus {
    if !record.activated {
        return ActivationStatus::NotActivated;
    }

    let days_remaining = match record.timestamp.filter(|&at| at != 0) {
        Some(activated_at) => {
            let elapsed = now_ms.saturating_sub(activated_at);
            if elapsed > ACTIVATION_PERIOD_MS {
                return ActivationStatus::Expired;
            }
            let remaining = ACTIVATION_PERIOD_MS - elapsed.max(0);
            Some(((remaining + DAY_MS - 1) / DAY_MS) as u32)
        }
        None => None,
    };

    match record.machine_id.as_deref() {
        Some(recorded) if !recorded.is_empty() && recorded != machine_id => {
            ActivationStatus::MachineMismatch
        }
        _ => ActivationStatus::Active { days_remaining },
    }
}

fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
