//! Preconfigured HTTP client wrapper shared by every service.
//!
//! DESIGN
//! ======
//! `ApiClient` owns the base URL and the bearer-header injection point, and
//! turns non-2xx answers into [`ApiError::Status`]. The wire exchange itself
//! sits behind the [`Transport`] trait so services can be exercised against a
//! scripted transport; [`HttpTransport`] is the `reqwest` implementation.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::FileUpload;
use crate::config::{ClientConfig, Timeouts};
use crate::session::SessionStore;

/// Paths that must never carry a stored bearer token.
const AUTH_REQUEST_PATHS: [&str; 4] = ["/auth/login", "/auth/register-client", "/auth/register-partner", "/auth/register"];

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FileUpload),
}

/// One named part of a multipart body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

impl FormPart {
    #[must_use]
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self { name: name.to_owned(), value: FormValue::Text(value.into()) }
    }

    #[must_use]
    pub fn file(name: &str, upload: FileUpload) -> Self {
        Self { name: name.to_owned(), value: FormValue::File(upload) }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// Fully resolved request handed to a [`Transport`].
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Executes one HTTP exchange. Any answer from the server, whatever its
/// status, is `Ok`; `Err` means no answer was obtained.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the request could not be completed.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(timeouts: Timeouts) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http })
    }
}

fn multipart_form(parts: Vec<FormPart>) -> Result<reqwest::multipart::Form, ApiError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part.value {
            FormValue::Text(text) => form.text(part.name, text),
            FormValue::File(upload) => {
                let file = reqwest::multipart::Part::bytes(upload.bytes)
                    .file_name(upload.file_name)
                    .mime_str(&upload.mime)
                    .map_err(|e| ApiError::Transport(e.to_string()))?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self
            .http
            .request(request.method, &request.url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(json) => builder.json(&json),
            RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

// =============================================================================
// API CLIENT
// =============================================================================

/// A request relative to the API base URL.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
    bearer: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: RequestBody::Empty, bearer: None }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter; `None` values are skipped.
    #[must_use]
    pub fn query(mut self, key: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((key.to_owned(), value.to_string()));
        }
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Use `token` instead of the stored one.
    #[must_use]
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Whether `path` is a login/registration call, which never carries a token.
#[must_use]
pub fn is_auth_request(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    AUTH_REQUEST_PATHS.contains(&path)
}

/// The shared `api` object: base URL, transport, and session-backed auth header.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: SessionStore,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: &str, transport: Arc<dyn Transport>, session: SessionStore) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), transport, session }
    }

    /// Build a client with a `reqwest` transport from typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(config.timeouts)?;
        Ok(Self::new(&config.api_url, Arc::new(transport), session))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    /// Send `request`, returning the raw response on 2xx.
    ///
    /// A 401 on anything but a login/registration call clears the persisted
    /// session before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no answer was obtained and
    /// [`ApiError::Status`] for non-2xx answers.
    pub async fn send(&self, request: ApiRequest) -> Result<HttpResponse, ApiError> {
        let auth_request = is_auth_request(&request.path);
        let bearer = match request.bearer {
            Some(token) => Some(token),
            None if auth_request => None,
            None => self.session.token(),
        };
        let http_request = HttpRequest {
            method: request.method,
            url: self.url(&request.path, &request.query),
            bearer,
            body: request.body,
        };
        tracing::debug!(method = %http_request.method, url = %http_request.url, "api request");

        let response = self.transport.execute(http_request).await?;
        if response.is_success() {
            return Ok(response);
        }
        if response.status == 401 && !auth_request {
            tracing::warn!(path = %request.path, "unauthorized response; clearing session");
            self.session.teardown();
        }
        Err(ApiError::Status { status: response.status, body: response.body })
    }

    /// Send `request` and decode the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiClient::send`] error, or [`ApiError::Decode`] if the
    /// body does not match `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Send `request`, discarding the response body.
    ///
    /// # Errors
    ///
    /// Returns any [`ApiClient::send`] error.
    pub async fn execute(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }
}
