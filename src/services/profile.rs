//! User profile service: profile read and multipart update.
//!
//! The backend exposes no password endpoint, so password changes stop at
//! form validation in [`crate::state::user::change_password`].

use crate::net::error::ApiError;
use crate::net::http::{ApiClient, ApiRequest, FormPart};
use crate::net::types::{ProfileUpdate, UserProfile};

pub(crate) fn profile_endpoint(user_id: &str) -> String {
    format!("/users/{user_id}/profile")
}

/// Multipart parts for a profile update; absent fields are not sent.
pub(crate) fn profile_form(update: ProfileUpdate) -> Vec<FormPart> {
    let text_fields = [
        ("firstName", update.first_name),
        ("lastName", update.last_name),
        ("email", update.email),
        ("bio", update.bio),
        ("website", update.website),
        ("socialMediaLinks", update.social_media_links),
    ];
    let mut parts: Vec<FormPart> = text_fields
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| FormPart::text(name, value)))
        .collect();
    if let Some(upload) = update.profile_picture {
        parts.push(FormPart::file("profilePicture", upload));
    }
    parts
}

#[derive(Clone)]
pub struct ProfileService {
    api: ApiClient,
}

impl ProfileService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /users/{id}/profile`.
    ///
    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        self.api
            .fetch(ApiRequest::get(profile_endpoint(user_id)))
            .await
            .inspect_err(|e| tracing::error!(user_id, error = %e, "profile fetch failed"))
    }

    /// `PATCH /users/{id}/profile` as `multipart/form-data`.
    ///
    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn update_user_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<UserProfile, ApiError> {
        let request = ApiRequest::patch(profile_endpoint(user_id)).multipart(profile_form(update));
        self.api
            .fetch(request)
            .await
            .inspect_err(|e| tracing::error!(user_id, error = %e, "profile update failed"))
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
