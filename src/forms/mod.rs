//! Submit-time form checks, as pure functions over raw input.
//!
//! Each form turns its raw fields into the typed request the services take,
//! or the first [`ValidationError`] found.

pub mod password;
pub mod profile;
pub mod register;

use crate::net::types::OrderStatus;

/// A rejected form submission. The display text is the message shown to
/// the user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("New passwords do not match")]
    PasswordMismatch,

    #[error("Business type must be one of MANUFACTURER, SUPPLIER, RETAILER, WHOLESALER")]
    InvalidBusinessType(String),

    #[error("Commission rate must be greater than 0")]
    CommissionRateNotPositive,

    #[error("Commission rate cannot exceed 100")]
    CommissionRateTooHigh,

    #[error("Bio cannot exceed 500 characters")]
    BioTooLong,

    #[error("Please enter a valid URL")]
    InvalidUrl,

    #[error("Cannot move an order from {from} to {to}")]
    StatusTransition { from: OrderStatus, to: OrderStatus },
}

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_BIO_LEN: usize = 500;

/// Trimmed value, or `Required(label)` when blank.
pub(crate) fn required(value: &str, label: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(label));
    }
    Ok(trimmed.to_owned())
}

/// Trimmed value, or `None` when blank.
pub(crate) fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// `local@domain.tld` shape: no whitespace, one `@`, and a dot inside the
/// domain with text on both sides.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] for a malformed address.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if is_valid_email(email) {
        Ok(email.to_owned())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// # Errors
///
/// Returns [`ValidationError::PasswordTooShort`] under the minimum length.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
