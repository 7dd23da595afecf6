//! Admin slice: dashboard statistics plus the paged user and product tables.
//!
//! DESIGN
//! ======
//! The three fetches go pending → fulfilled | rejected and share one
//! loading flag. Mutations (archive, activate, delete) only touch the loaded
//! rows once the server has accepted them; a failed mutation is returned to
//! the caller and leaves the slice as it was.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use crate::net::error::ApiError;
use crate::net::types::{AdminProduct, AdminStats, AdminUser, Page};
use crate::services::admin::{AdminService, ProductListQuery, UserListQuery};

use super::{AppState, rejection_message};

const STATS_FAILED: &str = "Failed to fetch admin data";
const USERS_FAILED: &str = "Failed to fetch users";
const PRODUCTS_FAILED: &str = "Failed to fetch products";

/// Position within a paged listing, as shown under a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based.
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl<T> From<&Page<T>> for Pagination {
    fn from(page: &Page<T>) -> Self {
        Self {
            current_page: page.number,
            total_pages: page.total_pages,
            total_items: page.total_elements,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdminState {
    pub statistics: AdminStats,
    pub users: Vec<AdminUser>,
    pub products: Vec<AdminProduct>,
    pub users_pagination: Pagination,
    pub products_pagination: Pagination,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AdminAction {
    StatsPending,
    StatsFulfilled(AdminStats),
    StatsRejected(String),
    UsersPending,
    UsersFulfilled(Page<AdminUser>),
    UsersRejected(String),
    ProductsPending,
    ProductsFulfilled(Page<AdminProduct>),
    ProductsRejected(String),
    ProductArchived { product_id: String, archived: bool },
    UserActivated { user_id: String, active: bool },
    ProductDeleted(String),
    UserDeleted(String),
    Reset,
}

impl AdminState {
    pub fn reduce(&mut self, action: AdminAction) {
        match action {
            AdminAction::StatsPending | AdminAction::UsersPending | AdminAction::ProductsPending => {
                self.loading = true;
                self.error = None;
            }
            AdminAction::StatsFulfilled(stats) => {
                self.loading = false;
                self.statistics = stats;
            }
            AdminAction::UsersFulfilled(page) => {
                self.loading = false;
                self.users_pagination = Pagination::from(&page);
                self.users = page.content;
            }
            AdminAction::ProductsFulfilled(page) => {
                self.loading = false;
                self.products_pagination = Pagination::from(&page);
                self.products = page.content;
            }
            AdminAction::StatsRejected(message)
            | AdminAction::UsersRejected(message)
            | AdminAction::ProductsRejected(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            AdminAction::ProductArchived { product_id, archived } => {
                for product in self.products.iter_mut().filter(|p| p.id == product_id) {
                    product.archived = Some(archived);
                }
            }
            AdminAction::UserActivated { user_id, active } => {
                for user in self.users.iter_mut().filter(|u| u.user.id == user_id) {
                    user.active = active;
                }
            }
            AdminAction::ProductDeleted(product_id) => self.products.retain(|p| p.id != product_id),
            AdminAction::UserDeleted(user_id) => self.users.retain(|u| u.user.id != user_id),
            AdminAction::Reset => *self = Self::default(),
        }
    }
}

// =============================================================================
// THUNKS
// =============================================================================

/// # Errors
///
/// Returns the service error after recording it on the slice.
pub async fn fetch_stats(state: &mut AppState, admin: &AdminService) -> Result<(), ApiError> {
    state.admin.reduce(AdminAction::StatsPending);
    match admin.dashboard_stats().await {
        Ok(stats) => {
            state.admin.reduce(AdminAction::StatsFulfilled(stats));
            Ok(())
        }
        Err(e) => {
            state.admin.reduce(AdminAction::StatsRejected(rejection_message(&e, STATS_FAILED)));
            Err(e)
        }
    }
}

/// # Errors
///
/// Returns the service error after recording it on the slice.
pub async fn fetch_users(state: &mut AppState, admin: &AdminService, query: &UserListQuery) -> Result<(), ApiError> {
    state.admin.reduce(AdminAction::UsersPending);
    match admin.users(query).await {
        Ok(page) => {
            state.admin.reduce(AdminAction::UsersFulfilled(page));
            Ok(())
        }
        Err(e) => {
            state.admin.reduce(AdminAction::UsersRejected(rejection_message(&e, USERS_FAILED)));
            Err(e)
        }
    }
}

/// # Errors
///
/// Returns the service error after recording it on the slice.
pub async fn fetch_products(
    state: &mut AppState,
    admin: &AdminService,
    query: &ProductListQuery,
) -> Result<(), ApiError> {
    state.admin.reduce(AdminAction::ProductsPending);
    match admin.products(query).await {
        Ok(page) => {
            state.admin.reduce(AdminAction::ProductsFulfilled(page));
            Ok(())
        }
        Err(e) => {
            state.admin.reduce(AdminAction::ProductsRejected(rejection_message(&e, PRODUCTS_FAILED)));
            Err(e)
        }
    }
}

/// Flip a product's archive flag; `archived` is its current value.
///
/// # Errors
///
/// Returns the service error; the slice is left unchanged.
pub async fn toggle_product_archived(
    state: &mut AppState,
    admin: &AdminService,
    product_id: &str,
    archived: bool,
) -> Result<(), ApiError> {
    admin.set_product_archived(product_id, !archived).await?;
    tracing::info!(product_id, archived = !archived, "product archive status changed");
    state.admin.reduce(AdminAction::ProductArchived { product_id: product_id.to_owned(), archived: !archived });
    Ok(())
}

/// Flip a user's active flag; `active` is its current value.
///
/// # Errors
///
/// Returns the service error; the slice is left unchanged.
pub async fn toggle_user_active(
    state: &mut AppState,
    admin: &AdminService,
    user_id: &str,
    active: bool,
) -> Result<(), ApiError> {
    admin.update_user_status(user_id, !active).await?;
    tracing::info!(user_id, active = !active, "user status changed");
    state.admin.reduce(AdminAction::UserActivated { user_id: user_id.to_owned(), active: !active });
    Ok(())
}

/// # Errors
///
/// Returns the service error; the slice is left unchanged.
pub async fn delete_product(state: &mut AppState, admin: &AdminService, product_id: &str) -> Result<(), ApiError> {
    admin.delete_product(product_id).await?;
    state.admin.reduce(AdminAction::ProductDeleted(product_id.to_owned()));
    Ok(())
}

/// # Errors
///
/// Returns the service error; the slice is left unchanged.
pub async fn delete_user(state: &mut AppState, admin: &AdminService, user_id: &str) -> Result<(), ApiError> {
    admin.delete_user(user_id).await?;
    state.admin.reduce(AdminAction::UserDeleted(user_id.to_owned()));
    Ok(())
}
