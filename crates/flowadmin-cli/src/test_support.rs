//! Shared fixtures for workflow tests: a console wired to a wiremock server
//! with a recording notifier and a throwaway session file.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use flowadmin_client::AdminClient;
use flowadmin_core::{Endpoints, Product, Session, SessionStore};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::console::Console;
use crate::editor::{Editor, EditorState};
use crate::notify::{FixedAnswer, Notifier, Toast};

/// Keeps every toast and progress tick for assertions.
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
    progress: Mutex<Vec<u8>>,
    loading: Mutex<Vec<bool>>,
}

impl RecordingNotifier {
    pub(crate) fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.toasts().into_iter().map(|t| t.message).collect()
    }

    pub(crate) fn progress_ticks(&self) -> Vec<u8> {
        self.progress.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub(crate) fn loading_flags(&self) -> Vec<bool> {
        self.loading.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }

    fn progress(&self, percent: u8) {
        if let Ok(mut ticks) = self.progress.lock() {
            ticks.push(percent);
        }
    }

    fn loading(&self, active: bool) {
        if let Ok(mut flags) = self.loading.lock() {
            flags.push(active);
        }
    }
}

pub(crate) fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("flowadmin-cli-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    dir
}

/// Console pointed at `server`, answering every confirmation with `answer`.
pub(crate) fn console_for(server: &MockServer, answer: bool) -> (Console, Arc<RecordingNotifier>) {
    let client = AdminClient::new(Endpoints::from_origin(&server.uri()), "flowadmin-test/0.1")
        .expect("client construction should not fail");
    let notifier = Arc::new(RecordingNotifier::default());
    let console = Console::new(
        client,
        SessionStore::new(temp_dir().join("session.json")),
        notifier.clone(),
        Box::new(FixedAnswer(answer)),
    );
    (console, notifier)
}

pub(crate) fn store_token(console: &Console, token: &str) {
    console
        .session
        .save(&Session {
            token: token.to_string(),
            profile: None,
        })
        .expect("session written");
}

pub(crate) async fn mount_me(server: &MockServer, role: &str) {
    Mock::given(method("GET"))
        .and(path("/api/admin/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "name": "Riya", "role": role, "email": "riya@example.com" }
        })))
        .mount(server)
        .await;
}

pub(crate) async fn mount_list(server: &MockServer, products: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/products/admin/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": products })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Console that already passed the auth gate, with `products` cached as if
/// loaded. No list request is made.
pub(crate) async fn signed_in(
    server: &MockServer,
    answer: bool,
    products: Value,
) -> (Console, Arc<RecordingNotifier>) {
    let (mut console, notifier) = console_for(server, answer);
    store_token(&console, "test-token");
    mount_me(server, "admin").await;
    assert!(console.boot().await, "auth gate should pass");
    console.state.catalog.replace_all(parse_products(products));
    (console, notifier)
}

pub(crate) fn parse_products(products: Value) -> Vec<Product> {
    serde_json::from_value(products).expect("fixture products parse")
}

pub(crate) fn product_json(id: &str) -> Value {
    json!({
        "_id": id,
        "name": "Electrolyte Mix",
        "slug": "electrolyte-mix",
        "shortDescription": "Fast hydration",
        "flavours": ["Lemon", "Orange"],
        "packSizes": [
            { "size": "Pack of 10", "sachets": 10, "price": 299, "originalPrice": 349 },
            { "size": "Pack of 30", "sachets": 30, "price": 799 }
        ],
        "ingredients": ["Sodium", "Potassium"],
        "highlights": ["Zero sugar", "Vegan"],
        "media": [],
        "reviews": [],
        "isActive": true,
        "isFeatured": false
    })
}

pub(crate) fn media_json(key: &str, kind: &str, sort_order: i64, primary: bool) -> Value {
    json!({
        "_id": format!("id-{key}"),
        "key": key,
        "url": format!("https://cdn.example.com/{key}"),
        "type": kind,
        "isPrimary": primary,
        "sortOrder": sort_order
    })
}

pub(crate) fn with_media(id: &str, media: Vec<Value>) -> Value {
    let mut product = product_json(id);
    product["media"] = Value::Array(media);
    product
}

pub(crate) fn open_create_editor() -> EditorState {
    EditorState::Open(Editor::create())
}
