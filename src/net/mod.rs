//! Networking: wire types, error taxonomy, and the shared HTTP client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` sends requests and injects the bearer token, `types` defines the
//! JSON schema, and `error` is the failure type every service returns.

pub mod error;
pub mod http;
pub mod types;
