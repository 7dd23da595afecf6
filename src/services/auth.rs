//! Auth service: login, role-based registration, logout, current-user lookup.
//!
//! Successful login/registration persists the token so every later request
//! picks it up through the API client's header injection.

use crate::net::error::ApiError;
use crate::net::http::{ApiClient, ApiRequest};
use crate::net::types::{LoginRequest, RegisterRequest, Session, UserProfile};
use crate::state::AppState;

use super::profile::profile_endpoint;

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// `POST /auth/login`; stores the token and the serialized session.
    ///
    /// # Errors
    ///
    /// Returns the transport/status error unchanged, or a storage error if
    /// the session cannot be persisted.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<Session, ApiError> {
        let request = ApiRequest::post("/auth/login").json(credentials)?;
        let session: Session = self.api.fetch(request).await.inspect_err(|e| {
            tracing::error!(error = %e, "login failed");
        })?;
        self.api.session().persist_session(&session)?;
        tracing::info!(role = %session.role, "logged in");
        Ok(session)
    }

    /// Post to the endpoint selected by the registration variant; stores only
    /// the token.
    ///
    /// # Errors
    ///
    /// Returns the transport/status error unchanged, or a storage error if
    /// the token cannot be persisted.
    pub async fn register(&self, registration: &RegisterRequest) -> Result<Session, ApiError> {
        let endpoint = registration.endpoint();
        let request = ApiRequest::post(endpoint).json(registration)?;
        let session: Session = self.api.fetch(request).await.inspect_err(|e| {
            tracing::error!(endpoint, error = %e, "registration failed");
        })?;
        self.api.session().persist_token(&session.token)?;
        tracing::info!(role = %session.role, endpoint, "registered");
        Ok(session)
    }

    /// Best-effort server logout followed by unconditional local teardown.
    pub async fn logout(&self) {
        if let Some(token) = self.api.session().token() {
            let request = ApiRequest::post("/auth/logout").bearer(token);
            if let Err(e) = self.api.execute(request).await {
                tracing::warn!(error = %e, "logout call failed; clearing local session anyway");
            }
        }
        self.api.session().teardown();
    }

    /// Fetch the profile of the user identified by `state`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingUserId`] without touching the network when
    /// `state` has no user id; otherwise the transport/status error unchanged.
    pub async fn current_user(&self, state: &AppState) -> Result<UserProfile, ApiError> {
        let Some(user_id) = state.user_id() else {
            tracing::error!("current user requested without a user id");
            return Err(ApiError::MissingUserId);
        };
        self.api
            .fetch(ApiRequest::get(profile_endpoint(user_id)))
            .await
            .inspect_err(|e| tracing::error!(user_id, error = %e, "current user fetch failed"))
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
