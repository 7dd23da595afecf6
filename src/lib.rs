//! Typed client for the creativePrint storefront API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` owns the HTTP exchange and the session header; `services` map one
//! resource family each onto typed calls; `state` and `auth_flow` sequence
//! those calls the way the storefront UI does; `forms` and `nav` hold the
//! UI-side rules that do not need a server.

pub mod auth_flow;
pub mod config;
pub mod forms;
pub mod nav;
pub mod net;
pub mod services;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;
