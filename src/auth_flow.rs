//! Login/register/logout as the UI drives them: a loading flag, a
//! displayable error, and navigation on completion.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sits between forms and the auth service. Errors stop here; callers read
//! [`AuthState::error`] instead of handling a `Result`.

#[cfg(test)]
#[path = "auth_flow_test.rs"]
mod auth_flow_test;

use crate::net::error::ApiError;
use crate::net::types::{LoginRequest, RegisterRequest, Session};
use crate::nav::routes;
use crate::services::auth::AuthService;
use crate::state::AppState;

const LOGIN_FAILED: &str = "Failed to login";
const REGISTER_FAILED: &str = "Failed to register";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_loading: bool,
    pub error: Option<String>,
}

pub struct AuthFlow<F>
where
    F: Fn(&str),
{
    auth: AuthService,
    navigate: F,
    state: AuthState,
}

impl<F> AuthFlow<F>
where
    F: Fn(&str),
{
    pub fn new(auth: AuthService, navigate: F) -> Self {
        Self { auth, navigate, state: AuthState::default() }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Log in and go to the dashboard. `None` means the attempt failed and
    /// [`AuthState::error`] says why.
    pub async fn login(&mut self, app: &mut AppState, credentials: &LoginRequest) -> Option<Session> {
        self.begin();
        let result = self.auth.login(credentials).await;
        self.finish(app, result, LOGIN_FAILED)
    }

    /// Register and go to the dashboard; failure handling as [`AuthFlow::login`].
    pub async fn register(&mut self, app: &mut AppState, registration: &RegisterRequest) -> Option<Session> {
        self.begin();
        let result = self.auth.register(registration).await;
        self.finish(app, result, REGISTER_FAILED)
    }

    /// Tear down the session everywhere and go to the login page.
    pub async fn logout(&mut self, app: &mut AppState) {
        self.auth.logout().await;
        app.clear_session();
        self.state = AuthState::default();
        (self.navigate)(routes::LOGIN);
    }

    fn begin(&mut self) {
        self.state.is_loading = true;
        self.state.error = None;
    }

    fn finish(&mut self, app: &mut AppState, result: Result<Session, ApiError>, fallback: &str) -> Option<Session> {
        self.state.is_loading = false;
        match result {
            Ok(session) => {
                if let Err(e) = self.auth.api().session().persist_role(session.role) {
                    tracing::warn!(error = %e, "failed to persist role");
                }
                app.install_session(session.clone());
                (self.navigate)(routes::DASHBOARD);
                Some(session)
            }
            Err(e) => {
                self.state.error = Some(e.server_message().unwrap_or_else(|| fallback.to_owned()));
                None
            }
        }
    }
}
