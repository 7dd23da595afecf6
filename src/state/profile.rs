//! Profile slice: the extended profile record (bio, website, links, picture).

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use crate::net::error::ApiError;
use crate::net::types::{ProfileUpdate, UserProfile};
use crate::services::profile::ProfileService;

use super::{AppState, rejection_message};

const FETCH_FAILED: &str = "Failed to fetch profile";
const UPDATE_FAILED: &str = "Failed to update profile";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileState {
    pub profile: Option<UserProfile>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileAction {
    FetchPending,
    FetchFulfilled(UserProfile),
    FetchRejected(String),
    UpdatePending,
    UpdateFulfilled(UserProfile),
    UpdateRejected(String),
    Reset,
}

impl ProfileState {
    pub fn reduce(&mut self, action: ProfileAction) {
        match action {
            ProfileAction::FetchPending | ProfileAction::UpdatePending => {
                self.loading = true;
                self.error = None;
            }
            ProfileAction::FetchFulfilled(profile) | ProfileAction::UpdateFulfilled(profile) => {
                self.loading = false;
                self.error = None;
                self.profile = Some(profile);
            }
            ProfileAction::FetchRejected(message) | ProfileAction::UpdateRejected(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            ProfileAction::Reset => *self = Self::default(),
        }
    }
}

/// An explicit id wins; a blank one falls back to the state's user id.
fn resolve_user_id(state: &AppState, user_id: &str) -> Option<String> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        state.user_id().map(str::to_owned)
    } else {
        Some(user_id.to_owned())
    }
}

/// # Errors
///
/// [`ApiError::MissingUserId`] when no id can be resolved, otherwise the
/// service error. Both are recorded on the slice.
pub async fn fetch_user_profile(
    state: &mut AppState,
    profiles: &ProfileService,
    user_id: &str,
) -> Result<UserProfile, ApiError> {
    state.profile.reduce(ProfileAction::FetchPending);
    let result = match resolve_user_id(state, user_id) {
        Some(user_id) => profiles.get_user_profile(&user_id).await,
        None => Err(ApiError::MissingUserId),
    };
    match result {
        Ok(profile) => {
            state.profile.reduce(ProfileAction::FetchFulfilled(profile.clone()));
            Ok(profile)
        }
        Err(e) => {
            state.profile.reduce(ProfileAction::FetchRejected(rejection_message(&e, FETCH_FAILED)));
            Err(e)
        }
    }
}

/// # Errors
///
/// As [`fetch_user_profile`].
pub async fn update_user_profile(
    state: &mut AppState,
    profiles: &ProfileService,
    user_id: &str,
    update: ProfileUpdate,
) -> Result<UserProfile, ApiError> {
    state.profile.reduce(ProfileAction::UpdatePending);
    let result = match resolve_user_id(state, user_id) {
        Some(user_id) => profiles.update_user_profile(&user_id, update).await,
        None => Err(ApiError::MissingUserId),
    };
    match result {
        Ok(profile) => {
            tracing::info!("profile updated");
            state.profile.reduce(ProfileAction::UpdateFulfilled(profile.clone()));
            Ok(profile)
        }
        Err(e) => {
            state.profile.reduce(ProfileAction::UpdateRejected(rejection_message(&e, UPDATE_FAILED)));
            Err(e)
        }
    }
}
