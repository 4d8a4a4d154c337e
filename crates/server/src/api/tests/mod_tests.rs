use super::*;

#[test]
fn accepts_plain_addresses() {
    assert!(validate_email(Some("alice@example.com")).is_ok());
    assert!(validate_email(Some(" bob.smith@mail.co.uk ")).is_ok());
}

#[test]
fn missing_header_is_reported_without_value() {
    let entry = validate_email(None).expect_err("missing");
    assert!(entry.is_email_header());
    assert_eq!(entry.msg.as_deref(), Some("Invalid value"));
    assert_eq!(entry.value, None);
}

#[test]
fn malformed_addresses_echo_the_value() {
    for bad in ["", "alice", "@example.com", "alice@", "alice@localhost", "a@b@c.d", "a@.com"] {
        let entry = validate_email(Some(bad)).expect_err(bad);
        assert!(entry.is_email_header(), "{bad}");
        assert_eq!(
            entry.value,
            Some(serde_json::Value::String(bad.to_string())),
            "{bad}"
        );
    }
}
