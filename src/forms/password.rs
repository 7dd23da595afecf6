//! Change-password form.

use crate::net::types::ChangePasswordData;

use super::{ValidationError, validate_password};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

impl ChangePasswordForm {
    /// # Errors
    ///
    /// [`ValidationError::PasswordMismatch`] when the confirmation differs;
    /// such a submission must never reach the server.
    pub fn validate(&self) -> Result<ChangePasswordData, ValidationError> {
        if self.current_password.is_empty() {
            return Err(ValidationError::Required("Current password"));
        }
        if self.new_password != self.confirm_new_password {
            return Err(ValidationError::PasswordMismatch);
        }
        validate_password(&self.new_password)?;
        Ok(ChangePasswordData {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
            confirm_new_password: self.confirm_new_password.clone(),
        })
    }
}

#[cfg(test)]
#[path = "password_test.rs"]
mod tests;
