//! Shared fixtures for unit tests: a scripted transport and canned sessions.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::net::error::ApiError;
use crate::net::http::{ApiClient, HttpRequest, HttpResponse, Transport};
use crate::net::types::{Role, Session};
use crate::session::SessionStore;

pub const BASE_URL: &str = "http://api.test/api";

/// Transport that replays queued responses in order and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: serde_json::Value) -> Self {
        self.respond_raw(status, &body.to_string())
    }

    pub fn respond_raw(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse { status, body: body.to_owned() }));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Transport(message.to_owned())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> HttpRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_owned())))
    }
}

pub fn api_client(transport: &Arc<MockTransport>, session: SessionStore) -> ApiClient {
    ApiClient::new(BASE_URL, transport.clone(), session)
}

pub fn url(path: &str) -> String {
    format!("{BASE_URL}{path}")
}

pub fn session_json(token: &str, role: &str, user_id: &str) -> serde_json::Value {
    serde_json::json!({
        "token": token,
        "type": "Bearer",
        "role": role,
        "userId": user_id,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "a@b.com",
        "expiresAt": "2999-01-01T00:00:00"
    })
}

pub fn session(token: &str, role: Role, user_id: Option<&str>) -> Session {
    Session {
        token: token.to_owned(),
        token_type: "Bearer".to_owned(),
        role,
        user_id: user_id.map(ToOwned::to_owned),
        first_name: Some("Ada".to_owned()),
        last_name: Some("Lovelace".to_owned()),
        email: Some("a@b.com".to_owned()),
        expires_at: Some("2999-01-01T00:00:00".to_owned()),
    }
}
