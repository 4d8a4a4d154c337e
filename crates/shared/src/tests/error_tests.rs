use super::*;

#[test]
fn failure_body_parses_validator_shape_with_extras() {
    let failure: StructuredFailure = serde_json::from_value(serde_json::json!({
        "errors": [
            { "location": "headers", "param": "email", "msg": "Invalid value", "value": "x" },
            { "location": "body", "param": "title" }
        ]
    }))
    .expect("failure body");

    assert_eq!(failure.errors.len(), 2);
    assert_eq!(failure.errors[0].msg.as_deref(), Some("Invalid value"));
    assert_eq!(failure.errors[1].msg, None);
    assert!(failure.requires_auth());
}

#[test]
fn requires_auth_needs_both_location_and_param() {
    let failure = StructuredFailure {
        errors: vec![
            FailureEntry::new("body", "email"),
            FailureEntry::new("headers", "token"),
        ],
    };
    assert!(!failure.requires_auth());
    assert!(!StructuredFailure::default().requires_auth());
}

#[test]
fn network_errors_expose_their_category() {
    assert_eq!(
        ClassifiedError::network_unreachable().network_kind(),
        Some(NetworkFailureKind::Unreachable)
    );
    assert_eq!(
        ClassifiedError::network_slow().network_kind(),
        Some(NetworkFailureKind::Slow)
    );
    assert_eq!(ClassifiedError::auth_required().network_kind(), None);
}

#[test]
fn display_matches_message() {
    let err = ClassifiedError::generic("title in body: required");
    assert_eq!(err.to_string(), "title in body: required");
    assert_eq!(err.message(), "title in body: required");
    assert_eq!(
        ClassifiedError::network_unreachable().to_string(),
        "network problem"
    );
    assert_eq!(ClassifiedError::auth_required().message(), "invalid email");
}
