//! One service per HTTP resource family, all sharing one [`ApiClient`].
//!
//! [`ApiClient`]: crate::net::http::ApiClient

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod orders;
pub mod profile;

use crate::net::http::ApiClient;

/// Every service bound to the same client.
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub profile: profile::ProfileService,
    pub admin: admin::AdminService,
    pub dashboard: dashboard::DashboardService,
    pub orders: orders::OrderService,
}

impl Services {
    #[must_use]
    pub fn new(api: &ApiClient) -> Self {
        Self {
            auth: auth::AuthService::new(api.clone()),
            profile: profile::ProfileService::new(api.clone()),
            admin: admin::AdminService::new(api.clone()),
            dashboard: dashboard::DashboardService::new(api.clone()),
            orders: orders::OrderService::new(api.clone()),
        }
    }
}
