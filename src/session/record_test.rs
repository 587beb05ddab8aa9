use super::*;

fn sample() -> UserRecord {
    UserRecord::new(
        "a1b2c3".to_owned(),
        "Explorer4821".to_owned(),
        Some("https://avatars.test/a1b2c3".to_owned()),
        ProviderKind::Twitter,
    )
}

// =============================================================================
// ProviderKind
// =============================================================================

#[test]
fn provider_parses_all_tags() {
    for provider in ProviderKind::ALL {
        assert_eq!(provider.as_str().parse::<ProviderKind>().unwrap(), provider);
    }
}

#[test]
fn provider_parse_is_case_insensitive() {
    assert_eq!("Discord".parse::<ProviderKind>().unwrap(), ProviderKind::Discord);
    assert_eq!(" WALLET ".parse::<ProviderKind>().unwrap(), ProviderKind::Wallet);
}

#[test]
fn provider_parse_rejects_unknown() {
    let err = "github".parse::<ProviderKind>().unwrap_err();
    assert!(matches!(err, SessionError::UnknownProvider(ref s) if s == "github"));
}

#[test]
fn provider_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ProviderKind::Google).unwrap(), "\"google\"");
}

// =============================================================================
// UserRecord
// =============================================================================

#[test]
fn new_record_starts_with_zero_points_and_no_premium() {
    let record = sample();
    assert_eq!(record.points, 0);
    assert!(!record.premium);
    assert!(record.email.is_none());
}

#[test]
fn storage_encoding_uses_camel_case_and_omits_absent_email() {
    let raw = sample().to_storage().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["authProvider"], "twitter");
    assert_eq!(value["points"], 0);
    assert_eq!(value["premium"], false);
    assert!(value.get("email").is_none());
    assert!(value.get("auth_provider").is_none());
}

#[test]
fn decodes_record_written_by_browser_build() {
    let raw = r#"{"id":"k3j9x","username":"User512","avatar":"https://a.test/x.svg",
        "authProvider":"discord","points":40,"premium":true,"email":null}"#;
    let record = UserRecord::from_storage(raw).unwrap();
    assert_eq!(record.id, "k3j9x");
    assert_eq!(record.auth_provider, ProviderKind::Discord);
    assert_eq!(record.points, 40);
    assert!(record.premium);
    assert!(record.email.is_none());
}

#[test]
fn decode_ignores_unknown_keys() {
    let raw = r#"{"id":"x","username":"u","authProvider":"wallet","points":0,"premium":false,"theme":"dark"}"#;
    let record = UserRecord::from_storage(raw).unwrap();
    assert_eq!(record.auth_provider, ProviderKind::Wallet);
    assert!(record.avatar.is_none());
}

#[test]
fn decode_rejects_plain_text() {
    assert!(matches!(UserRecord::from_storage("not-json"), Err(SessionError::RestoreParse(_))));
}

#[test]
fn decode_rejects_negative_points() {
    let raw = r#"{"id":"x","username":"u","authProvider":"google","points":-3,"premium":false}"#;
    assert!(UserRecord::from_storage(raw).is_err());
}

#[test]
fn decode_rejects_unknown_provider() {
    let raw = r#"{"id":"x","username":"u","authProvider":"myspace","points":0,"premium":false}"#;
    assert!(UserRecord::from_storage(raw).is_err());
}

#[test]
fn decode_rejects_non_object() {
    assert!(UserRecord::from_storage("[1,2,3]").is_err());
    assert!(UserRecord::from_storage("null").is_err());
}
