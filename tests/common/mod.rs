//! Shared test infrastructure for the admin engine and HTTP tests.
//!
//! - `TestStore` wraps the in-memory store, counts calls and can be told to
//!   fail chosen collections.
//! - `Harness` wires every panel against recording collaborators.
//! - Seed helpers write records with explicit timestamps.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};

use ongsite::admin::panels::{self, AdminDeps, AdminPanels};
use ongsite::admin::recorder::{RecordingCharts, RecordingSurface};
use ongsite::admin::router::{PanelController, Ticket};
use ongsite::admin::Router;
use ongsite::models::timestamp;
use ongsite::store::memory::MemoryStore;
use ongsite::store::{
    DocumentStore, Fields, Query, Record, StoreError, DOCUMENTS, DONATIONS, PROJECTS,
};
use ongsite::upload::{PickerConfig, UploadError, UploadedFile, Uploader};

// ============================================================================
// STORE
// ============================================================================

#[derive(Default)]
pub struct TestStore {
    inner: MemoryStore,
    calls: AtomicUsize,
    failing: Mutex<HashSet<String>>,
}

impl TestStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every operation on `collection` fail from now on.
    pub fn fail(&self, collection: &str) {
        self.failing.lock().unwrap().insert(collection.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seed(&self, collection: &str, id: &str, fields: Value) {
        let Value::Object(fields) = fields else {
            panic!("seed fields must be an object");
        };
        self.inner.insert_with_id(collection, id, fields);
    }

    fn enter(&self, collection: &str) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(collection) {
            return Err(StoreError::Unavailable(format!("{collection} is down")));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for TestStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.enter(collection)?;
        self.inner.create(collection, fields).await
    }

    async fn list(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        self.enter(collection)?;
        self.inner.list(collection).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>, StoreError> {
        self.enter(collection)?;
        self.inner.get(collection, id).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.enter(collection)?;
        self.inner.update(collection, id, fields).await
    }

    async fn upsert(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.enter(collection)?;
        self.inner.upsert(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.enter(collection)?;
        self.inner.delete(collection, id).await
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Record>, StoreError> {
        self.enter(collection)?;
        self.inner.query(collection, query).await
    }
}

// ============================================================================
// UPLOADER
// ============================================================================

/// Yields a fixed picker outcome on every call.
pub struct ScriptedUploader {
    outcome: Mutex<Option<Result<Option<UploadedFile>, String>>>,
    pub opened: AtomicUsize,
}

impl ScriptedUploader {
    pub fn picking(file: Option<UploadedFile>) -> Arc<Self> {
        Arc::new(Self { outcome: Mutex::new(Some(Ok(file))), opened: AtomicUsize::new(0) })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self { outcome: Mutex::new(Some(Err(message.to_string()))), opened: AtomicUsize::new(0) })
    }
}

#[async_trait]
impl Uploader for ScriptedUploader {
    async fn open_picker(&self, _config: &PickerConfig) -> Result<Option<UploadedFile>, UploadError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        match self.outcome.lock().unwrap().clone() {
            Some(Ok(file)) => Ok(file),
            Some(Err(message)) => Err(UploadError::Failed(message)),
            None => Ok(None),
        }
    }
}

pub fn uploaded(name: &str) -> UploadedFile {
    UploadedFile {
        name: name.to_string(),
        content_url: format!("https://ucarecdn.com/{name}/"),
        unique_id: format!("uuid-{name}"),
    }
}

// ============================================================================
// PANEL DOUBLE
// ============================================================================

/// Counts activations and teardowns; remembers whether each ticket was live.
#[derive(Default)]
pub struct CountingPanel {
    pub activations: AtomicUsize,
    pub teardowns: AtomicUsize,
    pub live_tickets: Mutex<Vec<bool>>,
}

#[async_trait]
impl PanelController for CountingPanel {
    async fn activate(&self, ticket: Ticket) {
        self.activations.fetch_add(1, Ordering::SeqCst);
        self.live_tickets.lock().unwrap().push(ticket.is_current());
    }

    fn teardown(&self) {
        self.teardowns.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// 2025-08-20 15:30 UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 20, 15, 30, 0).unwrap()
}

pub struct Harness {
    pub router: Router,
    pub panels: AdminPanels,
    pub surface: Arc<RecordingSurface>,
    pub charts: Arc<RecordingCharts>,
}

impl Harness {
    pub fn new(store: Arc<TestStore>) -> Self {
        Self::with(store, RecordingSurface::new(), ScriptedUploader::picking(None))
    }

    pub fn with(store: Arc<TestStore>, surface: RecordingSurface, uploader: Arc<ScriptedUploader>) -> Self {
        let surface = Arc::new(surface);
        let charts = Arc::new(RecordingCharts::new());
        let deps = AdminDeps::new(store, surface.clone(), charts.clone(), uploader, PickerConfig::new("pk-test"))
            .with_clock(fixed_now);
        let (router, panels) = panels::build(deps);
        Harness { router, panels, surface, charts }
    }
}

// ============================================================================
// SEEDS
// ============================================================================

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
}

pub fn seed_document(store: &TestStore, id: &str, category: &str, created: DateTime<Utc>) {
    store.seed(
        DOCUMENTS,
        id,
        json!({
            "title": format!("Documento {id}"),
            "category": category,
            "fileURL": format!("https://ucarecdn.com/{id}/"),
            "fileName": format!("{id}.pdf"),
            "fileUUID": id,
            "createdAt": timestamp(created),
        }),
    );
}

pub fn seed_project(store: &TestStore, id: &str, status: &str, created: DateTime<Utc>) {
    store.seed(
        PROJECTS,
        id,
        json!({
            "title": format!("Projeto {id}"),
            "description": "",
            "status": status,
            "createdAt": timestamp(created),
        }),
    );
}

pub fn seed_donation(store: &TestStore, id: &str, amount: f64, date: NaiveDate) {
    store.seed(
        DONATIONS,
        id,
        json!({
            "donor": "Maria",
            "amount": amount,
            "date": date.format("%Y-%m-%d").to_string(),
        }),
    );
}
