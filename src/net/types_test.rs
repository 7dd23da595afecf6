use super::*;

// =============================================================
// Helpers
// =============================================================

fn account() -> AccountFields {
    AccountFields {
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        password: "Secret#123".to_owned(),
    }
}

fn partner_request() -> RegisterRequest {
    RegisterRequest::Partner(PartnerRegistration {
        account: account(),
        company_name: "Acme".to_owned(),
        business_type: BusinessType::Supplier,
        tax_id: "T1".to_owned(),
        commission_rate: 5.0,
    })
}

// =============================================================
// Role / enums
// =============================================================

#[test]
fn role_serializes_to_screaming_case() {
    assert_eq!(serde_json::to_string(&Role::Client).unwrap(), "\"CLIENT\"");
    assert_eq!(serde_json::to_string(&Role::Partner).unwrap(), "\"PARTNER\"");
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
}

#[test]
fn role_parses_case_insensitively() {
    assert_eq!("partner".parse::<Role>().unwrap(), Role::Partner);
    assert_eq!(" ADMIN ".parse::<Role>().unwrap(), Role::Admin);
}

#[test]
fn role_parse_unknown_errors() {
    let err = "GUEST".parse::<Role>().unwrap_err();
    assert_eq!(err.to_string(), "unknown role: GUEST");
}

#[test]
fn business_type_parses_known_values_only() {
    assert_eq!("supplier".parse::<BusinessType>().unwrap(), BusinessType::Supplier);
    assert!("FARMER".parse::<BusinessType>().is_err());
}

#[test]
fn theme_preference_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ThemePreference::Dark).unwrap(), "\"dark\"");
    assert_eq!(ThemePreference::default(), ThemePreference::System);
}

// =============================================================
// Session
// =============================================================

#[test]
fn session_deserializes_login_response_with_numeric_user_id() {
    let json = serde_json::json!({
        "token": "T",
        "type": "Bearer",
        "role": "CLIENT",
        "userId": 1,
        "firstName": "Ada",
        "expiresAt": "2030-01-01T00:00:00"
    });
    let session: Session = serde_json::from_value(json).unwrap();
    assert_eq!(session.token, "T");
    assert_eq!(session.role, Role::Client);
    assert_eq!(session.user_id.as_deref(), Some("1"));
    assert_eq!(session.first_name.as_deref(), Some("Ada"));
    assert_eq!(session.last_name, None);
}

#[test]
fn session_token_type_defaults_to_bearer() {
    let session: Session = serde_json::from_str(r#"{"token":"T","role":"ADMIN"}"#).unwrap();
    assert_eq!(session.token_type, "Bearer");
    assert_eq!(session.user_id, None);
}

#[test]
fn session_serializes_camel_case_and_skips_absent_fields() {
    let session: Session = serde_json::from_str(r#"{"token":"T","role":"PARTNER","userId":"7"}"#).unwrap();
    let value = serde_json::to_value(&session).unwrap();
    assert_eq!(value["userId"], "7");
    assert_eq!(value["type"], "Bearer");
    assert!(value.get("expiresAt").is_none());
}

#[test]
fn session_expiry_without_offset_is_utc() {
    let session: Session =
        serde_json::from_str(r#"{"token":"T","role":"CLIENT","expiresAt":"2020-01-01T00:00:00"}"#).unwrap();
    assert!(session.is_expired_at(time::OffsetDateTime::now_utc()));
}

#[test]
fn session_expiry_with_offset_in_future_is_live() {
    let session: Session =
        serde_json::from_str(r#"{"token":"T","role":"CLIENT","expiresAt":"2999-01-01T00:00:00Z"}"#).unwrap();
    assert!(!session.is_expired_at(time::OffsetDateTime::now_utc()));
}

#[test]
fn session_without_expiry_never_expires() {
    let session: Session = serde_json::from_str(r#"{"token":"T","role":"CLIENT"}"#).unwrap();
    assert!(!session.is_expired_at(time::OffsetDateTime::now_utc()));
}

#[test]
fn session_with_garbage_expiry_never_expires() {
    let session: Session =
        serde_json::from_str(r#"{"token":"T","role":"CLIENT","expiresAt":"tomorrow"}"#).unwrap();
    assert!(!session.is_expired_at(time::OffsetDateTime::now_utc()));
}

// =============================================================
// RegisterRequest
// =============================================================

#[test]
fn register_endpoint_is_selected_by_variant() {
    let client = RegisterRequest::Client(ClientRegistration {
        account: account(),
        shipping_address: "1 Main St".to_owned(),
        billing_address: None,
        phone_number: "+212600000000".to_owned(),
    });
    let basic = RegisterRequest::Basic(BasicRegistration { account: account(), role: Role::Admin, phone: None });

    assert_eq!(client.endpoint(), "/auth/register-client");
    assert_eq!(partner_request().endpoint(), "/auth/register-partner");
    assert_eq!(basic.endpoint(), "/auth/register");
    assert_eq!(basic.role(), Role::Admin);
}

#[test]
fn partner_request_serializes_flat_camel_case() {
    let value = serde_json::to_value(partner_request()).unwrap();
    assert_eq!(value["firstName"], "Ada");
    assert_eq!(value["companyName"], "Acme");
    assert_eq!(value["businessType"], "SUPPLIER");
    assert_eq!(value["taxId"], "T1");
    assert_eq!(value["commissionRate"], 5.0);
    assert!(value.get("shippingAddress").is_none());
    assert!(value.get("account").is_none());
}

#[test]
fn client_request_omits_missing_billing_address() {
    let request = RegisterRequest::Client(ClientRegistration {
        account: account(),
        shipping_address: "1 Main St".to_owned(),
        billing_address: None,
        phone_number: "+212600000000".to_owned(),
    });
    let value = serde_json::to_value(request).unwrap();
    assert_eq!(value["shippingAddress"], "1 Main St");
    assert!(value.get("billingAddress").is_none());
    assert!(value.get("companyName").is_none());
}

// =============================================================
// Users & profiles
// =============================================================

#[test]
fn user_profile_into_user_maps_picture_to_avatar() {
    let profile: UserProfile = serde_json::from_value(serde_json::json!({
        "id": 42,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "bio": "math",
        "profilePicture": "https://cdn.example.com/a.png",
        "role": "PARTNER"
    }))
    .unwrap();
    let user = profile.into_user("ignored");
    assert_eq!(user.id, "42");
    assert_eq!(user.avatar.as_deref(), Some("https://cdn.example.com/a.png"));
    assert_eq!(user.role, Some(Role::Partner));
    assert_eq!(user.theme_preference, None);
}

#[test]
fn user_profile_into_user_uses_fallback_id() {
    let user = UserProfile::default().into_user("9");
    assert_eq!(user.id, "9");
    assert_eq!(user.first_name, "");
}

#[test]
fn user_id_rejects_non_scalar() {
    let err = serde_json::from_str::<User>(r#"{"id":[1]}"#).unwrap_err();
    assert!(err.to_string().contains("expected string or number id"));
}

// =============================================================
// Admin
// =============================================================

#[test]
fn admin_user_page_deserializes() {
    let page: Page<AdminUser> = serde_json::from_value(serde_json::json!({
        "content": [{
            "id": 3,
            "firstName": "Bo",
            "lastName": "Li",
            "email": "bo@example.com",
            "role": "CLIENT",
            "active": true,
            "createdAt": "2024-05-01T10:00:00"
        }],
        "totalPages": 1,
        "totalElements": 1,
        "number": 0,
        "size": 10
    }))
    .unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].user.id, "3");
    assert!(page.content[0].active);
    assert_eq!(page.total_elements, 1);
}

#[test]
fn admin_stats_tolerate_missing_lists() {
    let stats: AdminStats =
        serde_json::from_str(r#"{"totalUsers":5,"totalProducts":2,"totalOrders":1,"totalRevenue":19.5}"#).unwrap();
    assert_eq!(stats.total_users, 5);
    assert!(stats.recent_orders.is_empty());
    assert!(stats.monthly_sales.is_empty());
}

#[test]
fn admin_user_tolerates_null_names() {
    let user: AdminUser = serde_json::from_value(serde_json::json!({
        "id": 9,
        "firstName": null,
        "lastName": null,
        "email": null,
        "role": "PARTNER",
        "active": false,
        "createdAt": null
    }))
    .unwrap();
    assert_eq!(user.user.first_name, "");
    assert_eq!(user.user.email, "");
    assert_eq!(user.user.role, Some(Role::Partner));
    assert_eq!(user.created_at, None);
}

#[test]
fn admin_product_accepts_legacy_price_key() {
    let product: AdminProduct =
        serde_json::from_str(r#"{"id":"8","name":"Mug","price":12.0,"category":null,"variants":null}"#).unwrap();
    assert!((product.base_price - 12.0).abs() < f64::EPSILON);
    assert_eq!(product.category, None);
    assert!(product.variants.is_empty());
}

// =============================================================
// Orders
// =============================================================

#[test]
fn order_status_round_trips_screaming_case() {
    let status: OrderStatus = serde_json::from_str(r#""IN_PRODUCTION""#).unwrap();
    assert_eq!(status, OrderStatus::InProduction);
    assert_eq!(serde_json::to_value(OrderStatus::PaymentReceived).unwrap(), "PAYMENT_RECEIVED");
}

#[test]
fn order_status_parses_loose_spelling() {
    assert_eq!("in-production".parse::<OrderStatus>().unwrap(), OrderStatus::InProduction);
    assert_eq!("payment received".parse::<OrderStatus>().unwrap(), OrderStatus::PaymentReceived);
    assert!("lost".parse::<OrderStatus>().is_err());
}

#[test]
fn partner_transitions_only_move_forward_one_step() {
    assert!(OrderStatus::PaymentReceived.partner_can_move_to(OrderStatus::InProduction));
    assert!(OrderStatus::InProduction.partner_can_move_to(OrderStatus::Shipped));
    assert!(OrderStatus::Shipped.partner_can_move_to(OrderStatus::Delivered));
    assert!(!OrderStatus::PaymentReceived.partner_can_move_to(OrderStatus::Shipped));
    assert!(!OrderStatus::Pending.partner_can_move_to(OrderStatus::PaymentReceived));
    assert!(!OrderStatus::Delivered.partner_can_move_to(OrderStatus::Refunded));
}

#[test]
fn order_status_labels_are_title_case() {
    assert_eq!(OrderStatus::PendingPayment.label(), "Pending Payment");
    assert_eq!(OrderStatus::Refunded.to_string(), "REFUNDED");
}
