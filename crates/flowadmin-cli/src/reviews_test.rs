use serde_json::{json, Value};
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::console::Route;
use crate::test_support::{product_json, signed_in};

fn review_json(id: &str, author: &str, rating: u8) -> Value {
    json!({
        "_id": id,
        "author": author,
        "rating": rating,
        "title": "Works",
        "content": "Helped on long runs",
        "verified": true,
        "date": "2026-10-18T09:30:00Z"
    })
}

fn with_reviews(id: &str, reviews: Vec<Value>) -> Value {
    let mut product = product_json(id);
    product["reviews"] = Value::Array(reviews);
    product
}

async fn forbid_list_reload(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/products/admin/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn reviews_need_a_saved_product_open() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([product_json("p1")])).await;

    assert!(!console.open_add_review());
    console.open_create();
    assert!(!console.open_add_review());
    assert!(!console.submit_review().await);

    assert_eq!(
        notifier.messages(),
        vec!["No product selected", "No product selected", "No product selected"]
    );
}

#[tokio::test]
async fn incomplete_review_is_rejected_locally() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([product_json("p1")])).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    assert!(console.open_edit("p1"));
    assert!(console.open_add_review());
    console.review_draft_mut().unwrap().author = "Asha".to_string();
    assert!(!console.submit_review().await);
    assert_eq!(notifier.messages(), vec!["Please fill in required fields"]);
}

#[tokio::test]
async fn added_review_replaces_cached_product_without_reload() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([product_json("p1")])).await;
    forbid_list_reload(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/products/admin/p1/reviews"))
        .and(body_json(json!({
            "author": "Asha",
            "rating": 4,
            "title": "",
            "content": "Helped on long runs",
            "verified": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "product": with_reviews("p1", vec![review_json("r1", "Asha", 4)])
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(console.open_edit("p1"));
    assert!(console.open_add_review());
    let draft = console.review_draft_mut().unwrap();
    draft.author = "Asha".to_string();
    draft.content = "Helped on long runs".to_string();
    draft.rating.select(4).unwrap();
    assert_eq!(draft.rating.hidden_field(), "4");

    assert!(console.submit_review().await);
    assert_eq!(notifier.messages(), vec!["Review added successfully"]);
    assert!(matches!(console.state.review_editor, ReviewEditorState::Closed));
    assert_eq!(console.editor_reviews().len(), 1);
    assert_eq!(console.state.catalog.get("p1").unwrap().reviews.len(), 1);
}

#[tokio::test]
async fn edited_review_is_prefilled_and_put() {
    let server = MockServer::start().await;
    let product = with_reviews("p1", vec![review_json("r1", "Asha", 4)]);
    let (mut console, notifier) = signed_in(&server, true, json!([product])).await;
    forbid_list_reload(&server).await;
    Mock::given(method("PUT"))
        .and(path("/api/products/admin/p1/reviews/r1"))
        .and(body_json(json!({
            "author": "Asha",
            "rating": 2,
            "title": "Works",
            "content": "Helped on long runs",
            "verified": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product": with_reviews("p1", vec![review_json("r1", "Asha", 2)])
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(console.open_edit("p1"));
    assert!(console.open_edit_review("r1"));
    let draft = console.review_draft_mut().unwrap();
    assert_eq!(draft.rating.value(), 4);
    draft.rating.select(2).unwrap();

    assert!(console.submit_review().await);
    assert_eq!(notifier.messages(), vec!["Review updated successfully"]);
    assert_eq!(console.editor_reviews()[0].rating, 2);
}

#[tokio::test]
async fn unknown_review_cannot_be_edited() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([product_json("p1")])).await;

    assert!(console.open_edit("p1"));
    assert!(!console.open_edit_review("r404"));
    assert_eq!(notifier.messages(), vec!["Review not found"]);
}

#[tokio::test]
async fn declined_review_delete_makes_no_call() {
    let server = MockServer::start().await;
    let product = with_reviews("p1", vec![review_json("r1", "Asha", 4)]);
    let (mut console, _) = signed_in(&server, false, json!([product])).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert!(console.open_edit("p1"));
    assert!(!console.delete_review("r1").await);
    assert_eq!(console.editor_reviews().len(), 1);
}

#[tokio::test]
async fn deleted_review_disappears_from_cache() {
    let server = MockServer::start().await;
    let product = with_reviews("p1", vec![review_json("r1", "Asha", 4)]);
    let (mut console, notifier) = signed_in(&server, true, json!([product])).await;
    forbid_list_reload(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/api/products/admin/p1/reviews/r1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "product": product_json("p1") })),
        )
        .expect(1)
        .mount(&server)
        .await;

    assert!(console.open_edit("p1"));
    assert!(console.delete_review("r1").await);
    assert!(console.editor_reviews().is_empty());
    assert!(console.state.catalog.get("p1").unwrap().reviews.is_empty());
    assert_eq!(notifier.messages(), vec!["Review deleted successfully"]);
}

#[tokio::test]
async fn failed_review_save_uses_fallback() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([product_json("p1")])).await;
    Mock::given(method("POST"))
        .and(path("/api/products/admin/p1/reviews"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(console.open_edit("p1"));
    assert!(console.open_add_review());
    let draft = console.review_draft_mut().unwrap();
    draft.author = "Asha".to_string();
    draft.content = "Nice".to_string();
    draft.rating.select(5).unwrap();

    assert!(!console.submit_review().await);
    assert_eq!(notifier.messages(), vec!["Failed to save review"]);
    assert!(matches!(
        console.state.review_editor,
        ReviewEditorState::Open { .. }
    ));
}

fn assert_signed_out(console: &Console) {
    assert_eq!(console.state.route, Route::Login);
    assert!(console.state.editor.as_open().is_none());
    assert!(matches!(console.state.review_editor, ReviewEditorState::Closed));
    assert!(console.session.load().unwrap().is_none());
}

#[tokio::test]
async fn unauthorized_review_add_logs_out() {
    let server = MockServer::start().await;
    let (mut console, notifier) = signed_in(&server, true, json!([product_json("p1")])).await;
    Mock::given(method("POST"))
        .and(path("/api/products/admin/p1/reviews"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    assert!(console.open_edit("p1"));
    assert!(console.open_add_review());
    let draft = console.review_draft_mut().unwrap();
    draft.author = "Asha".to_string();
    draft.content = "Nice".to_string();
    draft.rating.select(5).unwrap();

    assert!(!console.submit_review().await);
    assert_signed_out(&console);
    assert!(notifier.toasts().is_empty());
}

#[tokio::test]
async fn unauthorized_review_edit_logs_out() {
    let server = MockServer::start().await;
    let product = with_reviews("p1", vec![review_json("r1", "Asha", 4)]);
    let (mut console, _) = signed_in(&server, true, json!([product])).await;
    Mock::given(method("PUT"))
        .and(path("/api/products/admin/p1/reviews/r1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    assert!(console.open_edit("p1"));
    assert!(console.open_edit_review("r1"));
    assert!(!console.submit_review().await);
    assert_signed_out(&console);
}

#[tokio::test]
async fn unauthorized_review_delete_logs_out() {
    let server = MockServer::start().await;
    let product = with_reviews("p1", vec![review_json("r1", "Asha", 4)]);
    let (mut console, _) = signed_in(&server, true, json!([product])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/products/admin/p1/reviews/r1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    assert!(console.open_edit("p1"));
    assert!(!console.delete_review("r1").await);
    assert_signed_out(&console);
    assert!(console.state.catalog.is_empty());
}
