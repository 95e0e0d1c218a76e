//! License key shape and acceptance checks.
//!
//! Keys look like `AAAAA-BBBBB-CCCCC-DDDDD`: four groups of five uppercase
//! ASCII letters or digits. A well-formed key is accepted when either
//!
//! - its lowercase hex SHA-256 digest is on [`KEY_HASH_ALLOWLIST`], or
//! - the sum of its character codes (hyphens excluded) is divisible by
//!   [`CHECKSUM_MODULUS`].
//!
//! This is a casual gate for a desktop tool, not a security boundary.

use crate::error::{LicenseError, LicenseResult};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Number of hyphen-separated groups in a key.
pub const KEY_GROUPS: usize = 4;

/// Characters per group.
pub const GROUP_LEN: usize = 5;

/// Total key length including hyphens.
pub const KEY_LEN: usize = KEY_GROUPS * GROUP_LEN + KEY_GROUPS - 1;

/// The character-code sum of an accepted key must be a multiple of this.
pub const CHECKSUM_MODULUS: u32 = 7;

/// SHA-256 digests of keys accepted regardless of checksum.
pub const KEY_HASH_ALLOWLIST: &[&str] =
    &["a1b2c3d4e5f6789012345678901234567890123456789012345678901234"];

/// Returns the lowercase hex SHA-256 digest of `input`.
#[must_use]
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// A license key with a verified shape.
///
/// Parsing only checks the shape; use [`LicenseKey::is_accepted`] (or
/// [`validate_key`]) for the full acceptance test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LicenseKey {
    raw: String,
}

impl LicenseKey {
    /// Parses a key string, checking only its shape.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKeyFormat`] if the string is not four
    /// hyphen-separated groups of five uppercase alphanumeric characters.
    pub fn parse(key: &str) -> LicenseResult<Self> {
        if key.len() != KEY_LEN {
            return Err(LicenseError::InvalidKeyFormat(format!(
                "expected {KEY_LEN} characters, got {}",
                key.len()
            )));
        }

        let groups: Vec<&str> = key.split('-').collect();
        if groups.len() != KEY_GROUPS {
            return Err(LicenseError::InvalidKeyFormat(format!(
                "expected {KEY_GROUPS} groups separated by '-'"
            )));
        }

        for group in &groups {
            if group.len() != GROUP_LEN {
                return Err(LicenseError::InvalidKeyFormat(format!(
                    "group '{group}' must be {GROUP_LEN} characters"
                )));
            }
            if !group
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
            {
                return Err(LicenseError::InvalidKeyFormat(format!(
                    "group '{group}' must be uppercase letters or digits"
                )));
            }
        }

        Ok(Self {
            raw: key.to_string(),
        })
    }

    /// Returns the raw key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the lowercase hex SHA-256 digest of the key.
    #[must_use]
    pub fn hash(&self) -> String {
        sha256_hex(&self.raw)
    }

    /// Sum of the character codes of the key with hyphens removed.
    #[must_use]
    pub fn checksum(&self) -> u32 {
        self.raw
            .chars()
            .filter(|&c| c != '-')
            .map(u32::from)
            .sum()
    }

    /// Returns true if the checksum is a multiple of [`CHECKSUM_MODULUS`].
    #[must_use]
    pub fn passes_checksum(&self) -> bool {
        self.checksum() % CHECKSUM_MODULUS == 0
    }

    /// Returns true if the key's digest is on the allow-list.
    #[must_use]
    pub fn is_allowlisted(&self) -> bool {
        let hash = self.hash();
        KEY_HASH_ALLOWLIST.iter().any(|h| *h == hash)
    }

    /// Returns true if the key is allow-listed or passes the checksum.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.is_allowlisted() || self.passes_checksum()
    }

    /// Parses the key and requires it to be accepted.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKeyFormat`] for a malformed key and
    /// [`LicenseError::Rejected`] for a well-formed key that is not accepted.
    pub fn parse_accepted(key: &str) -> LicenseResult<Self> {
        let parsed = Self::parse(key)?;
        if parsed.is_accepted() {
            Ok(parsed)
        } else {
            Err(LicenseError::Rejected)
        }
    }
}

impl FromStr for LicenseKey {
    type Err = LicenseError;

    fn from_str(s: &str) -> LicenseResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for LicenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Returns true if `key` is well-formed and accepted.
#[must_use]
pub fn validate_key(key: &str) -> bool {
    LicenseKey::parse(key).is_ok_and(|k| k.is_accepted())
}
