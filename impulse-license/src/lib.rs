//! Licensing and activation for Impulse.
//!
//! This module handles:
//! - License key shape checks and the allow-list/checksum acceptance test
//! - Local activation, persisted as a JSON record next to the app data
//! - Machine fingerprinting so an activation only counts on one device
//! - Offline issuing of key batches
//!
//! # Design Principles
//!
//! - **Fail closed**: a missing or corrupt activation file means "not activated"
//! - **No network**: activation and checks are purely local
//! - **Time-boxed**: an activation lasts 30 days, then the record is cleared
//! - **Device binding**: an activation made on another machine is cleared
//!
//! # License Key Format
//!
//! Keys are formatted as `AAAAA-BBBBB-CCCCC-DDDDD`: four groups of five
//! uppercase letters or digits. See [`LicenseKey`] for the acceptance rules.

mod activation;
mod device;
mod error;
mod gate;
mod issue;
mod key;

pub use activation::{ActivationRecord, ActivationStore, ACTIVATION_FILE_NAME};
pub use device::{
    first_hardware_mac, network_interfaces, DeviceFingerprint, FALLBACK_MACHINE_ID,
};
pub use error::{LicenseError, LicenseResult};
pub use gate::{evaluate, ActivationStatus, KeyGate, ACTIVATION_PERIOD_MS, DAY_MS};
pub use issue::{format_key, render_report, IssuedKey, KeyIssuer, KEY_DURATION_DAYS};
pub use key::{
    sha256_hex, validate_key, LicenseKey, CHECKSUM_MODULUS, GROUP_LEN, KEY_GROUPS,
    KEY_HASH_ALLOWLIST, KEY_LEN,
};
