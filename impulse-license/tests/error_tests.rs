use impulse_license::LicenseError;

#[test]
fn error_display_invalid_key_format() {
    let err = LicenseError::InvalidKeyFormat("bad format".into());
    assert!(format!("{err}").contains("invalid license key format"));
}

#[test]
fn error_display_rejected() {
    let err = LicenseError::Rejected;
    assert!(format!("{err}").contains("rejected"));
}

#[test]
fn error_display_storage() {
    let err = LicenseError::Storage("disk full".into());
    let msg = format!("{err}");
    assert!(msg.contains("storage"));
    assert!(msg.contains("disk full"));
}

#[test]
fn error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: LicenseError = io.into();
    assert!(format!("{err}").contains("io error"));
}

#[test]
fn error_from_serde_json() {
    let serde_err: Result<serde_json::Value, _> = serde_json::from_str("not json");
    let license_err: LicenseError = serde_err.unwrap_err().into();
    assert!(format!("{license_err}").contains("serialization"));
}

#[test]
fn error_is_debug() {
    let err = LicenseError::Rejected;
    let _ = format!("{err:?}");
}
