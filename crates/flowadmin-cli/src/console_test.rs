use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::notify::ToastKind;
use crate::test_support::{
    console_for, mount_list, mount_me, product_json, signed_in, store_token,
};

#[tokio::test]
async fn boot_without_token_routes_to_login_without_network() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (mut console, _) = console_for(&server, true);
    assert!(!console.boot().await);
    assert_eq!(console.state.route, Route::Login);
    assert!(console.state.admin.is_none());
}

#[tokio::test]
async fn boot_with_valid_token_caches_profile() {
    let server = MockServer::start().await;
    mount_me(&server, "superadmin").await;

    let (mut console, _) = console_for(&server, true);
    store_token(&console, "good-token");
    assert!(console.boot().await);

    assert_eq!(console.state.route, Route::Console);
    let admin = console.state.admin.as_ref().expect("profile cached in state");
    assert!(admin.is_super_admin());

    let stored = console.session.load().unwrap().expect("session kept");
    assert_eq!(stored.token, "good-token");
    assert_eq!(stored.profile.as_ref().map(AdminProfile::display_name), Some("Riya"));
}

#[tokio::test]
async fn boot_with_rejected_token_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid token" })))
        .expect(1)
        .mount(&server)
        .await;

    let (mut console, _) = console_for(&server, true);
    store_token(&console, "stale-token");
    assert!(!console.boot().await);

    assert_eq!(console.state.route, Route::Login);
    assert!(console.session.load().unwrap().is_none());
}

#[tokio::test]
async fn any_verification_failure_logs_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/me"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (mut console, _) = console_for(&server, true);
    store_token(&console, "token");
    assert!(!console.boot().await);
    assert!(console.session.load().unwrap().is_none());
}

#[tokio::test]
async fn login_stores_token_and_runs_gate() {
    let server = MockServer::start().await;
    mount_me(&server, "admin").await;

    let (mut console, _) = console_for(&server, true);
    assert!(console.login("  fresh-token  ").await);
    assert_eq!(console.state.route, Route::Console);
    assert_eq!(console.session.load().unwrap().unwrap().token, "fresh-token");
}

#[tokio::test]
async fn blank_login_token_is_refused() {
    let server = MockServer::start().await;
    let (mut console, notifier) = console_for(&server, true);
    assert!(!console.login("   ").await);
    assert_eq!(notifier.messages(), vec!["Token is required"]);
}

#[tokio::test]
async fn load_products_replaces_catalog() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([product_json("old")])).await;
    mount_list(&server, json!([product_json("p1"), product_json("p2")]), 1).await;

    assert!(console.load_products().await);
    assert_eq!(notifier.loading_flags(), vec![true, false]);
    assert_eq!(console.state.catalog.len(), 2);
    assert!(console.state.catalog.get("old").is_none());
}

#[tokio::test]
async fn failed_load_keeps_previous_catalog() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([product_json("p1")])).await;
    Mock::given(method("GET"))
        .and(path("/api/products/admin/all"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "db down" })))
        .mount(&server)
        .await;

    assert!(!console.load_products().await);
    assert_eq!(console.state.catalog.len(), 1);
    assert_eq!(notifier.loading_flags(), vec![true, false]);
    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].message, "Failed to load products");
}

#[tokio::test]
async fn unauthorized_anywhere_logs_out() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([product_json("p1")])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/products/admin/p1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(!console.delete_product("p1").await);
    assert_eq!(console.state.route, Route::Login);
    assert!(console.state.catalog.is_empty());
    assert!(console.session.load().unwrap().is_none());
    assert!(notifier.toasts().is_empty(), "auth failures redirect instead of toasting");
}

#[tokio::test]
async fn declined_delete_makes_no_call() {
    let server = MockServer::start().await;
    let (mut console, _) = signed_in(&server, false, json!([product_json("p1")])).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert!(!console.delete_product("p1").await);
    assert_eq!(console.state.catalog.len(), 1);
}

#[tokio::test]
async fn delete_product_reloads_catalog() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([product_json("p1")])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/products/admin/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, json!([]), 1).await;

    assert!(console.delete_product("p1").await);
    assert!(console.state.catalog.is_empty());
    assert_eq!(notifier.messages(), vec!["Product deleted successfully"]);
}

#[tokio::test]
async fn seed_reloads_catalog() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/products/admin/seed"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    mount_list(&server, json!([product_json("p1"), product_json("p2")]), 1).await;

    assert!(console.seed().await);
    assert_eq!(console.state.catalog.stats().total, 2);
    assert_eq!(notifier.messages(), vec!["Database seeded successfully"]);
}

#[tokio::test]
async fn failed_seed_surfaces_server_message() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/products/admin/seed"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "Seeding disabled" })),
        )
        .mount(&server)
        .await;

    assert!(!console.seed().await);
    assert_eq!(notifier.messages(), vec!["Seeding disabled"]);
}

#[tokio::test]
async fn odd_review_date_does_not_empty_the_catalog() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([])).await;
    let mut dated = product_json("p2");
    dated["reviews"] = json!([{
        "_id": "r1", "author": "Asha", "rating": 5, "content": "Good", "date": "2024-01-15"
    }]);
    mount_list(&server, json!([product_json("p1"), dated]), 1).await;

    assert!(console.load_products().await);
    assert_eq!(console.state.catalog.len(), 2);
    let review = &console.state.catalog.get("p2").unwrap().reviews[0];
    assert!(review.date.is_some());
    assert!(notifier.toasts().is_empty());
}

#[tokio::test]
async fn unauthorized_seed_logs_out() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([product_json("p1")])).await;
    Mock::given(method("POST"))
        .and(path("/api/products/admin/seed"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(!console.seed().await);
    assert_eq!(console.state.route, Route::Login);
    assert!(console.session.load().unwrap().is_none());
    assert!(notifier.toasts().is_empty());
}
