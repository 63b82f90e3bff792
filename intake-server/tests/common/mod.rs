#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode, header};
use intake_server::auth::PanelKeys;
use intake_server::catalog::{Catalog, MenuItem, Schedule};
use intake_server::llm::{IntentError, IntentExtractor};
use intake_server::ops::{MemoryToggleStore, OpsState};
use intake_server::sinks::{LeadSink, SinkError};
use intake_server::{AppState, build_app};
use parking_lot::Mutex;
use serde_json::{Value, json};
use shared::models::Lead;
use tower::ServiceExt;

pub const ADMIN_KEY: &str = "admin-test-key";
pub const MANAGER_KEY: &str = "manager-test-key";

pub type FailWith = fn() -> SinkError;

/// Records appended leads; can be told to fail
#[derive(Default)]
pub struct FakeSink {
    pub rows: Mutex<Vec<Lead>>,
    pub calls: AtomicUsize,
    pub fail_with: Mutex<Option<FailWith>>,
}

impl FakeSink {
    pub fn rows(&self) -> Vec<Lead> {
        self.rows.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_with(&self, f: FailWith) {
        *self.fail_with.lock() = Some(f);
    }
}

#[async_trait]
impl LeadSink for FakeSink {
    async fn append(&self, lead: &Lead) -> Result<(), SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(fail) = *self.fail_with.lock() {
            return Err(fail());
        }
        self.rows.lock().push(lead.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Answers every request with a canned reply
pub struct FakeExtractor {
    pub calls: AtomicUsize,
    pub fail: Mutex<bool>,
}

impl Default for FakeExtractor {
    fn default() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: Mutex::new(false),
        }
    }
}

impl FakeExtractor {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IntentExtractor for FakeExtractor {
    async fn extract(&self, text: &str) -> Result<String, IntentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail.lock() {
            return Err(IntentError::Network("connection refused".into()));
        }
        Ok(format!("Got it: {text}. We'll hold a table for you."))
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub sink: Arc<FakeSink>,
    pub model: Arc<FakeExtractor>,
    pub store: Arc<MemoryToggleStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_static_dir(PathBuf::from("/nonexistent-static")).await
    }

    pub async fn with_static_dir(static_dir: PathBuf) -> Self {
        let sink = Arc::new(FakeSink::default());
        let model = Arc::new(FakeExtractor::default());
        let store = Arc::new(MemoryToggleStore::new());
        let ops = OpsState::load(store.clone()).await.unwrap();

        let schedule: Schedule = serde_json::from_value(json!({
            "all": [
                { "date": "2026-06-11", "home": "Mexico", "away": "South Africa", "city": "Mexico City" },
                { "date": "2026-06-14", "home": "Netherlands", "away": "Japan", "city": "Dallas" }
            ],
            "dallas": [
                { "date": "2026-06-14", "home": "Netherlands", "away": "Japan", "city": "Dallas" }
            ]
        }))
        .unwrap();
        let menu = vec![MenuItem {
            name: "Nachos".into(),
            description: None,
            category: Some("Starters".into()),
            price: Some(9.5),
            available: true,
        }];

        let state = AppState::from_parts(
            PanelKeys::new(ADMIN_KEY, MANAGER_KEY),
            sink.clone(),
            model.clone(),
            ops,
            Catalog::new(schedule, menu),
            static_dir,
        );
        Self {
            app: build_app(state.clone()),
            state,
            sink,
            model,
            store,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    pub async fn json(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let (status, bytes) = self.send(req).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, bytes) = self.send(req).await;
        (status, String::from_utf8(bytes).unwrap())
    }

    pub async fn set_toggle(&self, key: &str, access_key: &str, value: Value) -> (StatusCode, Value) {
        self.json(
            "PUT",
            &format!("/api/panel/ops/{key}?key={access_key}"),
            Some(json!({ "value": value })),
        )
        .await
    }
}

pub fn booking(name: &str, phone: &str, party_size: i64) -> Value {
    json!({
        "name": name,
        "phone": phone,
        "date": "2026-06-14",
        "time": "19:00",
        "party_size": party_size,
    })
}
