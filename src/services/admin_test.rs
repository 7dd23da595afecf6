use super::*;
use crate::net::http::RequestBody;
use crate::net::types::Role;
use crate::session::SessionStore;
use crate::test_helpers::{MockTransport, api_client, url};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

fn service(transport: &Arc<MockTransport>) -> AdminService {
    let store = SessionStore::in_memory();
    store.persist_token("admin-token").unwrap();
    AdminService::new(api_client(transport, store))
}

fn empty_page() -> serde_json::Value {
    json!({ "content": [], "totalPages": 0, "totalElements": 0, "number": 0, "size": 10 })
}

/// A `UserResponse` as the admin user endpoints render it.
fn user_response(id: i64, active: bool) -> serde_json::Value {
    json!({
        "id": id,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "role": "PARTNER",
        "active": active,
        "createdAt": "2025-03-01T10:30:00"
    })
}

/// A `ProductResponse` as the admin product endpoints render it.
fn product_response(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Mug",
        "description": "Ceramic mug",
        "basePrice": 9.5,
        "category": { "id": 1, "name": "Mugs" },
        "design": {
            "id": 501,
            "name": "Abstract Pattern",
            "description": null,
            "designUrl": "https://cdn.example.com/d/501.png",
            "createdAt": "2025-02-01T08:00:00Z",
            "partnerId": 7
        },
        "variants": [{ "id": 301, "size": "M", "color": "White", "priceAdjustment": 0.0, "stock": 25 }],
        "createdAt": "2025-02-01T08:00:00Z",
        "updatedAt": null
    })
}

/// Spring page envelope around `content`.
fn page_of(content: Vec<serde_json::Value>) -> serde_json::Value {
    let total = content.len();
    json!({ "content": content, "totalPages": 1, "totalElements": total, "number": 0, "size": 10 })
}

fn settings() -> SystemSettings {
    SystemSettings {
        order_email_notifications: true,
        allow_user_registration: true,
        maintenance_mode: false,
        max_products_per_partner: 50,
        max_orders_per_day: 200,
        site_name: "creativePrint".into(),
        company_address: "1 Print Way".into(),
        support_email: "support@example.com".into(),
        currency: "EUR".into(),
        default_language: "en".into(),
    }
}

// =============================================================
// Query strings
// =============================================================

#[tokio::test]
async fn users_without_filters_has_no_query_string() {
    let transport = Arc::new(MockTransport::new().respond(200, empty_page()));

    service(&transport).users(&UserListQuery::default()).await.unwrap();

    assert_eq!(transport.single_request().url, url("/admin/users"));
}

#[tokio::test]
async fn users_sends_only_present_filters() {
    let transport = Arc::new(MockTransport::new().respond(200, empty_page()));
    let query = UserListQuery {
        page: Some(0),
        size: Some(10),
        search: Some("ada".into()),
        role: Some(String::new()),
        status: None,
    };

    service(&transport).users(&query).await.unwrap();

    assert_eq!(transport.single_request().url, url("/admin/users?page=0&size=10&search=ada"));
}

#[tokio::test]
async fn products_maps_category_id_to_camel_case() {
    let transport = Arc::new(MockTransport::new().respond(200, empty_page()));
    let query = ProductListQuery {
        category_id: Some("3".into()),
        status: Some("archived".into()),
        ..ProductListQuery::default()
    };

    service(&transport).products(&query).await.unwrap();

    assert_eq!(transport.single_request().url, url("/admin/products?categoryId=3&status=archived"));
}

// =============================================================
// Dashboard
// =============================================================

#[tokio::test]
async fn dashboard_stats_decodes_server_stats_map() {
    let transport = Arc::new(MockTransport::new().respond(
        200,
        json!({
            "totalUsers": 10,
            "totalProducts": 4,
            "totalOrders": 3,
            "totalRevenue": 99.5,
            "recentOrders": [
                { "id": 12, "customer": "Ada Lovelace", "total": 39.98, "status": "SHIPPED", "date": "2025-03-01T10:30:00Z" }
            ],
            "monthlySales": [{ "month": "Jan", "revenue": 10.0 }, { "month": "Feb", "revenue": 0.0 }]
        }),
    ));

    let stats = service(&transport).dashboard_stats().await.unwrap();

    assert_eq!(stats.total_users, 10);
    assert_eq!(stats.recent_orders[0].id, "12");
    assert_eq!(stats.recent_orders[0].customer, "Ada Lovelace");
    assert_eq!(stats.monthly_sales.len(), 2);
    let request = transport.single_request();
    assert_eq!(request.url, url("/admin/dashboard/stats"));
    assert_eq!(request.bearer.as_deref(), Some("admin-token"));
}

// =============================================================
// Users
// =============================================================

#[tokio::test]
async fn users_decodes_user_response_page() {
    let transport =
        Arc::new(MockTransport::new().respond(200, page_of(vec![user_response(5, true), user_response(6, false)])));

    let page = service(&transport).users(&UserListQuery::default()).await.unwrap();

    assert_eq!(page.total_elements, 2);
    assert_eq!(page.content[0].user.id, "5");
    assert_eq!(page.content[0].user.role, Some(Role::Partner));
    assert_eq!(page.content[0].created_at.as_deref(), Some("2025-03-01T10:30:00"));
    assert!(!page.content[1].active);
}

#[tokio::test]
async fn user_decodes_single_user_response() {
    let transport = Arc::new(MockTransport::new().respond(200, user_response(5, true)));

    let user = service(&transport).user("5").await.unwrap();

    assert_eq!(user.user.email, "ada@example.com");
    assert_eq!(transport.single_request().url, url("/admin/users/5"));
}

#[tokio::test]
async fn user_with_null_names_still_decodes() {
    let transport = Arc::new(MockTransport::new().respond(
        200,
        page_of(vec![json!({
            "id": 7, "firstName": null, "lastName": null, "email": "x@example.com",
            "role": "CLIENT", "active": true, "createdAt": null
        })]),
    ));

    let page = service(&transport).users(&UserListQuery::default()).await.unwrap();

    assert_eq!(page.content[0].user.first_name, "");
    assert_eq!(page.content[0].created_at, None);
}

#[tokio::test]
async fn update_user_status_patches_active_flag() {
    let transport = Arc::new(MockTransport::new().respond(200, user_response(5, false)));

    let user = service(&transport).update_user_status("5", false).await.unwrap();

    assert!(!user.active);
    let request = transport.single_request();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.url, url("/admin/users/5/status"));
    assert_eq!(request.body, RequestBody::Json(json!({ "active": false })));
}

#[tokio::test]
async fn delete_user_issues_delete() {
    let transport = Arc::new(MockTransport::new().respond_raw(204, ""));

    service(&transport).delete_user("5").await.unwrap();

    let request = transport.single_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url, url("/admin/users/5"));
}

// =============================================================
// Products
// =============================================================

#[tokio::test]
async fn products_decode_product_response_page() {
    let transport = Arc::new(MockTransport::new().respond(200, page_of(vec![product_response(8)])));

    let page = service(&transport).products(&ProductListQuery::default()).await.unwrap();

    let product = &page.content[0];
    assert_eq!(product.id, "8");
    assert!((product.base_price - 9.5).abs() < f64::EPSILON);
    assert_eq!(product.category.as_ref().map(|c| c.name.as_str()), Some("Mugs"));
    assert_eq!(product.variants[0].stock, 25);
    assert_eq!(product.archived, None);
}

#[tokio::test]
async fn product_decodes_nested_category_and_design() {
    let transport = Arc::new(MockTransport::new().respond(200, product_response(8)));

    let product = service(&transport).product("8").await.unwrap();

    let category = product.category.unwrap();
    assert_eq!(category.id.as_deref(), Some("1"));
    assert_eq!(category.description, None);
    let design = product.design.unwrap();
    assert_eq!(design.partner_id.as_deref(), Some("7"));
    assert_eq!(design.description, None);
    assert_eq!(product.updated_at, None);
    assert_eq!(transport.single_request().url, url("/admin/products/8"));
}

#[tokio::test]
async fn archive_product_patches_archive_flag() {
    let transport = Arc::new(MockTransport::new().respond(200, product_response(8)));

    let product = service(&transport).set_product_archived("8", true).await.unwrap();

    assert_eq!(product.name, "Mug");
    let request = transport.single_request();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.url, url("/admin/products/8/archive"));
    assert_eq!(request.body, RequestBody::Json(json!({ "archived": true })));
}

#[tokio::test]
async fn delete_product_issues_delete() {
    let transport = Arc::new(MockTransport::new().respond_raw(204, ""));

    service(&transport).delete_product("8").await.unwrap();

    let request = transport.single_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url, url("/admin/products/8"));
}

// =============================================================
// Settings
// =============================================================

#[tokio::test]
async fn settings_decode_camel_case_fields() {
    let transport = Arc::new(MockTransport::new().respond(
        200,
        json!({
            "orderEmailNotifications": true,
            "allowUserRegistration": true,
            "maintenanceMode": false,
            "maxProductsPerPartner": 50,
            "maxOrdersPerDay": 200,
            "siteName": "creativePrint",
            "companyAddress": "1 Print Way",
            "supportEmail": "support@example.com",
            "currency": "EUR",
            "defaultLanguage": "en"
        }),
    ));

    let loaded = service(&transport).settings().await.unwrap();

    assert_eq!(loaded, settings());
    assert_eq!(transport.single_request().url, url("/admin/settings"));
}

#[tokio::test]
async fn update_settings_posts_full_settings() {
    let transport = Arc::new(MockTransport::new().respond(200, serde_json::to_value(settings()).unwrap()));

    let saved = service(&transport).update_settings(&settings()).await.unwrap();

    assert_eq!(saved, settings());
    let request = transport.single_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, url("/admin/settings"));
    let RequestBody::Json(body) = request.body else {
        panic!("expected a JSON body");
    };
    assert_eq!(body["maxProductsPerPartner"], 50);
}

// =============================================================
// Roles & permissions
// =============================================================

#[tokio::test]
async fn roles_decode_server_role_maps() {
    let transport = Arc::new(MockTransport::new().respond(
        200,
        json!([
            { "id": 1, "name": "ADMIN", "description": "Administrator with full access", "permissions": [1, 2, 3, 12] },
            { "id": 2, "name": "CLIENT", "description": "Regular customer", "permissions": [1, 5, 9] }
        ]),
    ));

    let roles = service(&transport).roles().await.unwrap();

    assert_eq!(roles.len(), 2);
    assert_eq!(roles[1].name, "CLIENT");
    assert_eq!(roles[1].permissions, vec![1, 5, 9]);
}

#[tokio::test]
async fn permissions_decode_server_permission_maps() {
    let transport = Arc::new(MockTransport::new().respond(
        200,
        json!([
            { "id": 1, "name": "products.view", "description": "View products" },
            { "id": 12, "name": "admin.access", "description": "Access admin panel" }
        ]),
    ));

    let permissions = service(&transport).permissions().await.unwrap();

    assert_eq!(permissions[1].id, 12);
    assert_eq!(permissions[1].name, "admin.access");
    assert_eq!(transport.single_request().url, url("/admin/permissions"));
}

#[tokio::test]
async fn update_role_permissions_decodes_acknowledgement() {
    let transport =
        Arc::new(MockTransport::new().respond(200, json!({ "roleId": 2, "permissions": [1, 3], "updated": true })));

    let ack = service(&transport).update_role_permissions("2", &[1, 3]).await.unwrap();

    assert_eq!(ack, RolePermissionsUpdate { role_id: 2, permissions: vec![1, 3], updated: true });
    let request = transport.single_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url, url("/admin/roles/2/permissions"));
    assert_eq!(request.body, RequestBody::Json(json!({ "permissions": [1, 3] })));
}

#[tokio::test]
async fn admin_errors_are_returned_unchanged() {
    let transport = Arc::new(MockTransport::new().respond(403, json!({ "message": "Forbidden" })));

    let err = service(&transport).roles().await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.server_message().as_deref(), Some("Forbidden"));
}
