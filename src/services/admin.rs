//! Admin service: dashboard stats, users, products, settings, roles.
//!
//! Every call logs and returns the failure unchanged; there is no retry.

use serde::Serialize;

use crate::net::error::ApiError;
use crate::net::http::{ApiClient, ApiRequest};
use crate::net::types::{
    AdminProduct, AdminRole, AdminStats, AdminUser, Page, Permission, RolePermissionsUpdate, SystemSettings,
};

/// Filters for `GET /admin/users`. Absent fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub search: Option<String>,
    pub role: Option<String>,
    /// `active` or `inactive`.
    pub status: Option<String>,
}

/// Filters for `GET /admin/products`. Absent fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub search: Option<String>,
    pub category_id: Option<String>,
    pub status: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl UserListQuery {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query("page", self.page)
            .query("size", self.size)
            .query("search", non_empty(self.search.as_ref()))
            .query("role", non_empty(self.role.as_ref()))
            .query("status", non_empty(self.status.as_ref()))
    }
}

impl ProductListQuery {
    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query("page", self.page)
            .query("size", self.size)
            .query("search", non_empty(self.search.as_ref()))
            .query("categoryId", non_empty(self.category_id.as_ref()))
            .query("status", non_empty(self.status.as_ref()))
    }
}

#[derive(Serialize)]
struct StatusUpdate {
    active: bool,
}

#[derive(Serialize)]
struct ArchiveUpdate {
    archived: bool,
}

#[derive(Serialize)]
struct PermissionsUpdate<'a> {
    permissions: &'a [i64],
}

#[derive(Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, request: ApiRequest, what: &str) -> Result<T, ApiError> {
        let path = request.path().to_owned();
        self.api.fetch(request).await.inspect_err(|e| {
            tracing::error!(%path, error = %e, "error fetching {what}");
        })
    }

    async fn execute(&self, request: ApiRequest, what: &str) -> Result<(), ApiError> {
        let path = request.path().to_owned();
        self.api.execute(request).await.inspect_err(|e| {
            tracing::error!(%path, error = %e, "error {what}");
        })
    }

    // -------------------------------------------------------------------------
    // dashboard
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn dashboard_stats(&self) -> Result<AdminStats, ApiError> {
        self.fetch(ApiRequest::get("/admin/dashboard/stats"), "dashboard stats")
            .await
    }

    // -------------------------------------------------------------------------
    // users
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn users(&self, query: &UserListQuery) -> Result<Page<AdminUser>, ApiError> {
        self.fetch(query.apply(ApiRequest::get("/admin/users")), "users")
            .await
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn user(&self, user_id: &str) -> Result<AdminUser, ApiError> {
        self.fetch(ApiRequest::get(format!("/admin/users/{user_id}")), "user")
            .await
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn update_user_status(&self, user_id: &str, active: bool) -> Result<AdminUser, ApiError> {
        let request = ApiRequest::patch(format!("/admin/users/{user_id}/status")).json(&StatusUpdate { active })?;
        self.fetch(request, "updated user status").await
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(format!("/admin/users/{user_id}")), "deleting user")
            .await
    }

    // -------------------------------------------------------------------------
    // products
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn products(&self, query: &ProductListQuery) -> Result<Page<AdminProduct>, ApiError> {
        self.fetch(query.apply(ApiRequest::get("/admin/products")), "products")
            .await
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn product(&self, product_id: &str) -> Result<AdminProduct, ApiError> {
        self.fetch(ApiRequest::get(format!("/admin/products/{product_id}")), "product")
            .await
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn set_product_archived(&self, product_id: &str, archived: bool) -> Result<AdminProduct, ApiError> {
        let request =
            ApiRequest::patch(format!("/admin/products/{product_id}/archive")).json(&ArchiveUpdate { archived })?;
        self.fetch(request, "updated product archive status").await
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn delete_product(&self, product_id: &str) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(format!("/admin/products/{product_id}")), "deleting product")
            .await
    }

    // -------------------------------------------------------------------------
    // settings & permissions
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn settings(&self) -> Result<SystemSettings, ApiError> {
        self.fetch(ApiRequest::get("/admin/settings"), "system settings")
            .await
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn update_settings(&self, settings: &SystemSettings) -> Result<SystemSettings, ApiError> {
        let request = ApiRequest::post("/admin/settings").json(settings)?;
        self.fetch(request, "updated system settings").await
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn roles(&self) -> Result<Vec<AdminRole>, ApiError> {
        self.fetch(ApiRequest::get("/admin/roles"), "roles").await
    }

    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn permissions(&self) -> Result<Vec<Permission>, ApiError> {
        self.fetch(ApiRequest::get("/admin/permissions"), "permissions")
            .await
    }

    /// Replace the permission ids granted to a role. The server answers with
    /// an acknowledgement, not the updated role.
    ///
    /// # Errors
    ///
    /// Returns the transport/status error unchanged.
    pub async fn update_role_permissions(
        &self,
        role_id: &str,
        permissions: &[i64],
    ) -> Result<RolePermissionsUpdate, ApiError> {
        let request =
            ApiRequest::put(format!("/admin/roles/{role_id}/permissions")).json(&PermissionsUpdate { permissions })?;
        self.fetch(request, "updated role permissions").await
    }
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
