//! Concrete panel controllers and the wiring that registers them.

pub mod dashboard;
pub mod documents;
pub mod institutional;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::chart::ChartSink;
use super::collection::CollectionPanel;
use super::router::Router;
use super::surface::Surface;
use super::Route;
use crate::models::{ContactMessage, Donation, Project};
use crate::store::DocumentStore;
use crate::upload::{PickerConfig, Uploader};

pub use dashboard::DashboardPanel;
pub use documents::DocumentsPanel;
pub use institutional::InstitutionalPanel;

/// Collaborators injected into every panel.
pub struct AdminDeps {
    pub store: Arc<dyn DocumentStore>,
    pub surface: Arc<dyn Surface>,
    pub charts: Arc<dyn ChartSink>,
    pub uploader: Arc<dyn Uploader>,
    pub picker: PickerConfig,
    pub clock: fn() -> DateTime<Utc>,
}

impl AdminDeps {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        surface: Arc<dyn Surface>,
        charts: Arc<dyn ChartSink>,
        uploader: Arc<dyn Uploader>,
        picker: PickerConfig,
    ) -> Self {
        Self { store, surface, charts, uploader, picker, clock: Utc::now }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }
}

pub struct AdminPanels {
    pub dashboard: Arc<DashboardPanel>,
    pub documents: Arc<DocumentsPanel>,
    pub projects: Arc<CollectionPanel<Project>>,
    pub donations: Arc<CollectionPanel<Donation>>,
    pub messages: Arc<CollectionPanel<ContactMessage>>,
    pub institutional: Arc<InstitutionalPanel>,
}

/// Build every panel and a router with each registered under its route.
pub fn build(deps: AdminDeps) -> (Router, AdminPanels) {
    let mut router = Router::new(Arc::clone(&deps.surface));
    let generation = router.generation();

    let panels = AdminPanels {
        dashboard: Arc::new(DashboardPanel::new(
            Arc::clone(&deps.store),
            Arc::clone(&deps.surface),
            Arc::clone(&deps.charts),
            deps.clock,
        )),
        documents: Arc::new(DocumentsPanel::new(
            Arc::clone(&deps.store),
            Arc::clone(&deps.surface),
            generation.clone(),
            Arc::clone(&deps.uploader),
            deps.picker.clone(),
        )),
        projects: Arc::new(CollectionPanel::new(
            Arc::clone(&deps.store),
            Arc::clone(&deps.surface),
            generation.clone(),
        )),
        donations: Arc::new(CollectionPanel::new(
            Arc::clone(&deps.store),
            Arc::clone(&deps.surface),
            generation.clone(),
        )),
        messages: Arc::new(CollectionPanel::new(
            Arc::clone(&deps.store),
            Arc::clone(&deps.surface),
            generation.clone(),
        )),
        institutional: Arc::new(InstitutionalPanel::new(
            Arc::clone(&deps.store),
            Arc::clone(&deps.surface),
            generation,
        )),
    };

    router.register(Route::Dashboard, panels.dashboard.clone());
    router.register(Route::Documents, panels.documents.clone());
    router.register(Route::Projects, panels.projects.clone());
    router.register(Route::Donations, panels.donations.clone());
    router.register(Route::Institutional, panels.institutional.clone());
    router.register(Route::Messages, panels.messages.clone());

    (router, panels)
}
