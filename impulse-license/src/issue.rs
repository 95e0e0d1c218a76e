//! Offline key issuing.
//!
//! Key `i` of a batch is derived from the seed string
//! `IMPULSE-{date}-{secret}-{i}-PRO`, where `date` is the batch start date
//! plus `30 * i` days. The first 20 hex digits of the seed's SHA-256 digest,
//! uppercased and split into groups of five, form the key.
//!
//! Issued keys always have a valid shape. Whether they pass the gate depends
//! on the checksum, exactly like hand-typed keys.

use crate::gate::{ACTIVATION_PERIOD_MS, DAY_MS};
use crate::key::{sha256_hex, GROUP_LEN, KEY_GROUPS};
use chrono::{DateTime, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Days of validity attached to each issued key.
pub const KEY_DURATION_DAYS: u32 = (ACTIVATION_PERIOD_MS / DAY_MS) as u32;

/// One issued key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedKey {
    /// 1-based position in the batch.
    pub index: usize,
    /// The key, `XXXXX-XXXXX-XXXXX-XXXXX`.
    pub key: String,
    /// SHA-256 hex digest of the key.
    pub key_hash: String,
    /// Date the key is meant to be activated from.
    pub activation_date: NaiveDate,
    /// Validity in days.
    pub duration_days: u32,
}

/// Derives batches of keys from a secret.
#[derive(Clone)]
pub struct KeyIssuer {
    secret: String,
}

impl std::fmt::Debug for KeyIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyIssuer")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl KeyIssuer {
    /// Creates an issuer for `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issues `count` keys, the first dated `start`, each following one
    /// [`KEY_DURATION_DAYS`] later.
    #[must_use]
    pub fn issue(&self, count: usize, start: NaiveDate) -> Vec<IssuedKey> {
        (0..count)
            .filter_map(|i| {
                let offset = Days::new(u64::from(KEY_DURATION_DAYS) * i as u64);
                let date = start.checked_add_days(offset)?;
                Some(self.issue_one(i, date))
            })
            .collect()
    }

    fn issue_one(&self, i: usize, date: NaiveDate) -> IssuedKey {
        let seed = format!(
            "IMPULSE-{}-{}-{}-PRO",
            date.format("%Y-%m-%d"),
            self.secret,
            i
        );
        let digest = sha256_hex(&seed).to_ascii_uppercase();
        let key = format_key(&digest[..GROUP_LEN * KEY_GROUPS]);

        IssuedKey {
            index: i + 1,
            key_hash: sha256_hex(&key),
            key,
            activation_date: date,
            duration_days: KEY_DURATION_DAYS,
        }
    }
}

/// Splits `raw` into hyphen-separated groups of [`GROUP_LEN`] characters.
#[must_use]
pub fn format_key(raw: &str) -> String {
    raw.chars()
        .collect::<Vec<_>>()
        .chunks(GROUP_LEN)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("-")
}

/// Renders a batch as a plain-text report.
#[must_use]
pub fn render_report(keys: &[IssuedKey], generated_at: DateTime<Local>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "IMPULSE AI - LICENSE KEYS");
    let _ = writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "Total keys: {}", keys.len());

    for k in keys {
        let _ = writeln!(out);
        let _ = writeln!(out, "Key {}: {}", k.index, k.key);
        let _ = writeln!(out, "Hash: {}", k.key_hash);
        let _ = writeln!(out, "Activation: {}", k.activation_date);
        let _ = writeln!(out, "Duration: {} days", k.duration_days);
        let _ = writeln!(out, "{}", "-".repeat(50));
    }
    out
}
