//! Dashboard navigation: menu items per role, active-item matching, and the
//! route guard in front of role-restricted pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Admin and partner dashboards share one layout; only the item list
//! differs. Every protected page runs [`guard`] before rendering.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::net::types::Role;
use crate::state::AppState;

pub mod routes {
    pub const LOGIN: &str = "/login";
    pub const DASHBOARD: &str = "/dashboard";
    pub const UNAUTHORIZED: &str = "/unauthorized";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

pub const ADMIN_NAV: [NavItem; 3] = [
    NavItem { label: "Users", path: "/admin/users" },
    NavItem { label: "Products", path: "/admin/products" },
    NavItem { label: "Statistics", path: "/admin/statistics" },
];

pub const PARTNER_NAV: [NavItem; 4] = [
    NavItem { label: "Dashboard", path: routes::DASHBOARD },
    NavItem { label: "Designs", path: "/dashboard/designs" },
    NavItem { label: "Products", path: "/dashboard/products" },
    NavItem { label: "Orders", path: "/dashboard/orders" },
];

/// Sidebar items for `role`. Clients have no dashboard.
#[must_use]
pub fn nav_items(role: Role) -> &'static [NavItem] {
    match role {
        Role::Admin => &ADMIN_NAV,
        Role::Partner => &PARTNER_NAV,
        Role::Client => &[],
    }
}

/// Whether the item at `path` is highlighted while `current` is shown.
/// `/dashboard` only matches exactly, otherwise it would shadow its children.
#[must_use]
pub fn is_active(current: &str, path: &str) -> bool {
    current == path || (path != routes::DASHBOARD && current.starts_with(path))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(&'static str),
}

/// Gate a page on authentication and role. An empty `allowed_roles` admits
/// any signed-in role.
#[must_use]
pub fn guard(state: &AppState, allowed_roles: &[Role]) -> GuardOutcome {
    let Some(role) = state.role() else {
        return GuardOutcome::Redirect(routes::LOGIN);
    };
    if !allowed_roles.is_empty() && !allowed_roles.contains(&role) {
        tracing::debug!(%role, "role not allowed on this page");
        return GuardOutcome::Redirect(routes::UNAUTHORIZED);
    }
    GuardOutcome::Allow
}
