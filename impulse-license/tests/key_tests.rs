mod common;

use common::{CHECKSUM_KEY, REJECTED_KEY};
use impulse_license::{
    sha256_hex, validate_key, LicenseError, LicenseKey, CHECKSUM_MODULUS, KEY_HASH_ALLOWLIST,
    KEY_LEN,
};
use proptest::prelude::*;

// ── Shape ────────────────────────────────────────────────────────

#[test]
fn key_len_is_23() {
    assert_eq!(KEY_LEN, 23);
}

#[test]
fn well_formed_key_parses() {
    let key = LicenseKey::parse("AB12C-34DEF-GH567-89IJK").unwrap();
    assert_eq!(key.as_str(), "AB12C-34DEF-GH567-89IJK");
    assert_eq!(key.to_string(), "AB12C-34DEF-GH567-89IJK");
}

#[test]
fn short_string_is_rejected() {
    assert!(!validate_key("short"));
    assert!(matches!(
        LicenseKey::parse("short"),
        Err(LicenseError::InvalidKeyFormat(_))
    ));
}

#[test]
fn lowercase_group_is_rejected() {
    assert!(LicenseKey::parse("aaaaa-AAAAA-AAAAA-AAAAC").is_err());
    assert!(!validate_key("aaaaa-AAAAA-AAAAA-AAAAC"));
}

#[test]
fn uneven_groups_are_rejected() {
    assert!(LicenseKey::parse("AAAAAA-AAAA-AAAAA-AAAAC").is_err());
    assert!(LicenseKey::parse("AAAAA-AAAAA-AAAAA-AAAA").is_err());
    assert!(LicenseKey::parse("AAAAA-AAAAA-AAAAA-AAAAC-").is_err());
}

#[test]
fn wrong_separator_is_rejected() {
    assert!(LicenseKey::parse("AAAAA_AAAAA_AAAAA_AAAAC").is_err());
    assert!(LicenseKey::parse("AAAAAAAAAAAAAAAAAAAAAAC").is_err());
}

#[test]
fn non_ascii_is_rejected() {
    assert!(LicenseKey::parse("ÄAAA-AAAAA-AAAAA-AAAAC").is_err());
}

#[test]
fn surrounding_whitespace_is_rejected() {
    assert!(!validate_key(" AAAAA-AAAAA-AAAAA-AAAAC"));
}

#[test]
fn from_str_matches_parse() {
    let parsed: LicenseKey = CHECKSUM_KEY.parse().unwrap();
    assert_eq!(parsed, LicenseKey::parse(CHECKSUM_KEY).unwrap());
}

// ── Checksum ─────────────────────────────────────────────────────

#[test]
fn repeated_a_sums_to_1300_and_fails() {
    let key = LicenseKey::parse(REJECTED_KEY).unwrap();
    assert_eq!(key.checksum(), 65 * 20);
    assert_eq!(key.checksum() % CHECKSUM_MODULUS, 5);
    assert!(!key.passes_checksum());
    assert!(!validate_key(REJECTED_KEY));
}

#[test]
fn multiple_of_seven_passes() {
    let key = LicenseKey::parse(CHECKSUM_KEY).unwrap();
    assert_eq!(key.checksum(), 1302);
    assert!(key.passes_checksum());
    assert!(key.is_accepted());
    assert!(validate_key(CHECKSUM_KEY));
}

#[test]
fn off_by_three_fails() {
    // 65 * 19 + 70 = 1305 = 7 * 186 + 3
    assert!(!validate_key("AAAAA-AAAAA-AAAAA-AAAAF"));
}

#[test]
fn digit_key_with_trailing_letter_fails_checksum() {
    // Shape is fine; 3 * 255 + 202 + 71 = 1038 = 7 * 148 + 2.
    let key = LicenseKey::parse("12345-12345-12345-1234G").unwrap();
    assert_eq!(key.checksum(), 1038);
    assert!(!validate_key("12345-12345-12345-1234G"));
}

#[test]
fn parse_accepted_distinguishes_failures() {
    assert!(LicenseKey::parse_accepted(CHECKSUM_KEY).is_ok());
    assert!(matches!(
        LicenseKey::parse_accepted(REJECTED_KEY),
        Err(LicenseError::Rejected)
    ));
    assert!(matches!(
        LicenseKey::parse_accepted("nope"),
        Err(LicenseError::InvalidKeyFormat(_))
    ));
}

// ── Hashing ──────────────────────────────────────────────────────

#[test]
fn hash_is_lowercase_sha256_hex() {
    // Well-known digest of "abc".
    assert_eq!(
        sha256_hex("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    let key = LicenseKey::parse(CHECKSUM_KEY).unwrap();
    assert_eq!(key.hash(), sha256_hex(CHECKSUM_KEY));
}

#[test]
fn allowlist_placeholder_matches_nothing_here() {
    assert_eq!(KEY_HASH_ALLOWLIST.len(), 1);
    let key = LicenseKey::parse(REJECTED_KEY).unwrap();
    assert!(!key.is_allowlisted());
}

// ── Properties ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn acceptance_matches_char_sum_mod_seven(key in "[A-Z0-9]{5}-[A-Z0-9]{5}-[A-Z0-9]{5}-[A-Z0-9]{5}") {
        let sum: u32 = key.bytes().filter(|&b| b != b'-').map(u32::from).sum();
        prop_assert_eq!(validate_key(&key), sum % 7 == 0);
    }

    #[test]
    fn strings_of_wrong_length_never_validate(key in "[A-Z0-9-]{0,22}") {
        prop_assert!(!validate_key(&key));
    }
}
