//! Error taxonomy for API calls.
//!
//! Services return these unchanged; only the auth flow turns them into
//! user-facing messages via [`ApiError::server_message`].

use crate::forms::ValidationError;
use crate::session::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("http request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded into the expected type.
    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// A profile call was attempted without a known user id.
    #[error("User ID not found")]
    MissingUserId,

    /// The operation has no backend endpoint; nothing was sent.
    #[error("{0} is not supported by the server")]
    Unsupported(&'static str),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// HTTP status, when the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Best-effort human-readable message from the server's error payload.
    ///
    /// Looks for a JSON `message` field, then falls back to a non-empty
    /// plain-text body. Returns `None` for non-status errors.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        let Self::Status { body, .. } = self else {
            return None;
        };
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(serde_json::Value::Object(map)) => map
                .get("message")
                .and_then(serde_json::Value::as_str)
                .filter(|message| !message.is_empty())
                .map(ToOwned::to_owned),
            Ok(serde_json::Value::String(message)) if !message.is_empty() => Some(message),
            Ok(_) => None,
            Err(_) => Some(trimmed.to_owned()),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
