//! Application state: the session plus the user, profile and admin slices.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built once from persisted storage at startup and passed by reference to
//! every thunk and to the auth flow. Nothing here is global.

pub mod admin;
pub mod profile;
pub mod user;


use crate::net::error::ApiError;
use crate::net::types::{Role, Session};
use crate::session::SessionStore;

pub use admin::{AdminAction, AdminState, Pagination};
pub use profile::{ProfileAction, ProfileState};
pub use user::{UserAction, UserState};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub session: Option<Session>,
    pub user: UserState,
    pub profile: ProfileState,
    pub admin: AdminState,
}

impl AppState {
    /// Rebuild state from whatever session survived in storage.
    #[must_use]
    pub fn restore(store: &SessionStore) -> Self {
        let session = store.load();
        if let Some(session) = &session {
            tracing::debug!(role = %session.role, "restored persisted session");
        }
        Self { session, ..Self::default() }
    }

    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self { session: Some(session), ..Self::default() }
    }

    pub fn install_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Drop the session and reset every slice.
    pub fn clear_session(&mut self) {
        self.session = None;
        self.user.reduce(UserAction::Reset);
        self.profile.reduce(ProfileAction::Reset);
        self.admin.reduce(AdminAction::Reset);
    }

    /// Session user id first, then the loaded user's id.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|session| session.user_id.as_deref())
            .or_else(|| self.user.current_user.as_ref().map(|user| user.id.as_str()))
            .filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|session| session.role)
    }
}

/// Message stored on a rejected thunk: local errors keep their own text,
/// server errors use the body's message, everything else the fallback.
pub(crate) fn rejection_message(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::MissingUserId | ApiError::Unsupported(_) | ApiError::Validation(_) => error.to_string(),
        _ => error.server_message().unwrap_or_else(|| fallback.to_owned()),
    }
}
