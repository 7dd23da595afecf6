//! Partner dashboard statistics.

use crate::net::http::{ApiClient, ApiRequest};
use crate::net::types::PartnerDashboardStats;

#[derive(Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `GET /partner/dashboard/stats`. Any failure is logged and yields zeroed
    /// stats so the dashboard can still render.
    pub async fn partner_stats(&self) -> PartnerDashboardStats {
        match self.api.fetch(ApiRequest::get("/partner/dashboard/stats")).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(error = %e, "error fetching dashboard statistics");
                PartnerDashboardStats::default()
            }
        }
    }
}

/// Two-decimal amount, as shown on dashboard cards.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
