//! Partner order desk: orders containing the partner's designs, their status
//! history, and status updates.
//!
//! DESIGN
//! ======
//! Partners move an order one step at a time (paid → in production →
//! shipped → delivered). The step is checked before anything is sent, so a
//! disallowed update never reaches the server.

use crate::forms::ValidationError;
use crate::net::error::ApiError;
use crate::net::http::{ApiClient, ApiRequest};
use crate::net::types::{OrderStatus, OrderStatusHistory, OrderStatusUpdate, Page, PartnerOrder};

/// Filters for `GET /partner/orders`. Absent fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderListQuery {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query("page", self.page)
            .query("size", self.size)
            .query("search", self.search.as_deref().filter(|s| !s.is_empty()))
            .query("status", self.status.map(OrderStatus::as_str))
    }
}

#[derive(Clone)]
pub struct OrderService {
    api: ApiClient,
}

impl OrderService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn orders(&self, query: &OrderListQuery) -> Result<Page<PartnerOrder>, ApiError> {
        self.api
            .fetch(query.apply(ApiRequest::get("/partner/orders")))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "error fetching orders"))
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn status_history(&self, order_id: &str) -> Result<Vec<OrderStatusHistory>, ApiError> {
        self.api
            .fetch(ApiRequest::get(format!("/partner/orders/{order_id}/status-history")))
            .await
            .inspect_err(|e| tracing::error!(order_id, error = %e, "error fetching order history"))
    }

    /// Move an order from `current` to `update.status`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::StatusTransition`] without a request when partners
    /// may not make that step, otherwise the transport/status error.
    pub async fn update_status(
        &self,
        order_id: &str,
        current: OrderStatus,
        update: &OrderStatusUpdate,
    ) -> Result<PartnerOrder, ApiError> {
        if !current.partner_can_move_to(update.status) {
            return Err(ValidationError::StatusTransition { from: current, to: update.status }.into());
        }
        let request = ApiRequest::patch(format!("/partner/orders/{order_id}/status")).json(update)?;
        self.api.fetch(request).await.inspect_err(|e| {
            tracing::error!(order_id, status = %update.status, error = %e, "error updating order status");
        })
    }
}

#[cfg(test)]
#[path = "orders_test.rs"]
mod tests;
