//! Current-user slice: identity, loading flag, last error.
//!
//! DESIGN
//! ======
//! Every transition is a [`UserAction`] applied by [`UserState::reduce`]. The
//! async thunks below only sequence pending → fulfilled | rejected around a
//! service call; the reducer stays pure and synchronous.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use crate::forms::password::ChangePasswordForm;
use crate::net::error::ApiError;
use crate::net::types::{ProfileUpdate, ThemePreference, User};
use crate::services::auth::AuthService;
use crate::services::profile::ProfileService;

use super::{AppState, rejection_message};

const FETCH_FAILED: &str = "Failed to fetch user data";
const UPDATE_FAILED: &str = "Failed to update profile";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserState {
    pub current_user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    FetchPending,
    FetchFulfilled(User),
    FetchRejected(String),
    UpdatePending,
    UpdateFulfilled(User),
    UpdateRejected(String),
    PasswordPending,
    PasswordRejected(String),
    SetThemePreference(ThemePreference),
    Reset,
}

impl UserState {
    pub fn reduce(&mut self, action: UserAction) {
        match action {
            UserAction::FetchPending | UserAction::UpdatePending | UserAction::PasswordPending => {
                self.loading = true;
                self.error = None;
            }
            UserAction::FetchFulfilled(user) | UserAction::UpdateFulfilled(user) => {
                self.loading = false;
                self.current_user = Some(user);
            }
            UserAction::FetchRejected(message)
            | UserAction::UpdateRejected(message)
            | UserAction::PasswordRejected(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            UserAction::SetThemePreference(theme) => {
                if let Some(user) = self.current_user.as_mut() {
                    user.theme_preference = Some(theme);
                }
            }
            UserAction::Reset => *self = Self::default(),
        }
    }
}

// =============================================================================
// THUNKS
// =============================================================================

/// Load the current user through the auth service.
///
/// # Errors
///
/// Returns the service error after recording it on the slice.
pub async fn fetch_current_user(state: &mut AppState, auth: &AuthService) -> Result<User, ApiError> {
    state.user.reduce(UserAction::FetchPending);
    let result = auth.current_user(state).await;
    match result {
        Ok(profile) => {
            let fallback_id = state.user_id().unwrap_or_default().to_owned();
            let user = profile.into_user(&fallback_id);
            state.user.reduce(UserAction::FetchFulfilled(user.clone()));
            Ok(user)
        }
        Err(e) => {
            state.user.reduce(UserAction::FetchRejected(rejection_message(&e, FETCH_FAILED)));
            Err(e)
        }
    }
}

/// Submit a profile update; the server's answer becomes the current user.
///
/// # Errors
///
/// Returns [`ApiError::MissingUserId`] without a network call when no user
/// id is known, otherwise the service error. Both are recorded on the slice.
pub async fn update_profile(
    state: &mut AppState,
    profiles: &ProfileService,
    update: ProfileUpdate,
) -> Result<User, ApiError> {
    state.user.reduce(UserAction::UpdatePending);
    let result = match state.user_id().map(str::to_owned) {
        Some(user_id) => profiles
            .update_user_profile(&user_id, update)
            .await
            .map(|profile| profile.into_user(&user_id)),
        None => Err(ApiError::MissingUserId),
    };
    match result {
        Ok(user) => {
            state.user.reduce(UserAction::UpdateFulfilled(user.clone()));
            Ok(user)
        }
        Err(e) => {
            state.user.reduce(UserAction::UpdateRejected(rejection_message(&e, UPDATE_FAILED)));
            Err(e)
        }
    }
}

/// Validate a password change. The backend has no endpoint for it, so a
/// valid form is rejected as unsupported without a request; a form that
/// fails validation (including mismatched confirmation) dispatches nothing.
///
/// # Errors
///
/// [`ApiError::Validation`] for a rejected form, otherwise
/// [`ApiError::Unsupported`], which is also recorded on the slice.
pub fn change_password(state: &mut AppState, form: &ChangePasswordForm) -> Result<(), ApiError> {
    form.validate()?;
    state.user.reduce(UserAction::PasswordPending);
    let e = ApiError::Unsupported("Password change");
    tracing::warn!(error = %e, "password change not sent");
    state.user.reduce(UserAction::PasswordRejected(e.to_string()));
    Err(e)
}
