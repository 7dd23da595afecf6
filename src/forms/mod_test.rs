use super::*;

#[test]
fn email_shape_accepts_ordinary_addresses() {
    assert!(is_valid_email("a@b.com"));
    assert!(is_valid_email("first.last@mail.example.org"));
}

#[test]
fn email_shape_rejects_malformed_addresses() {
    assert!(!is_valid_email(""));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("@b.com"));
    assert!(!is_valid_email("a@.com"));
    assert!(!is_valid_email("a@b."));
    assert!(!is_valid_email("a b@c.com"));
    assert!(!is_valid_email("a@b@c.com"));
}

#[test]
fn validate_email_trims_input() {
    assert_eq!(validate_email("  a@b.com "), Ok("a@b.com".to_owned()));
    assert_eq!(validate_email("nope"), Err(ValidationError::InvalidEmail));
    assert_eq!(ValidationError::InvalidEmail.to_string(), "Invalid email format");
}

#[test]
fn password_needs_eight_characters() {
    assert_eq!(validate_password("1234567"), Err(ValidationError::PasswordTooShort));
    assert_eq!(validate_password("12345678"), Ok(()));
    assert_eq!(
        ValidationError::PasswordTooShort.to_string(),
        "Password must be at least 8 characters"
    );
}

#[test]
fn required_message_names_the_field() {
    assert_eq!(required("  ", "Tax ID"), Err(ValidationError::Required("Tax ID")));
    assert_eq!(ValidationError::Required("Tax ID").to_string(), "Tax ID is required");
    assert_eq!(required(" x ", "Tax ID"), Ok("x".to_owned()));
}

#[test]
fn optional_blank_is_none() {
    assert_eq!(optional("   "), None);
    assert_eq!(optional(" b "), Some("b".to_owned()));
}
