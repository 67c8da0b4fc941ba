use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::admin::aggregate::{self, RECENT_LIMIT};
use crate::admin::chart::{
    ChartKind, ChartSink, ACTIVITY_CONTAINER, CATEGORY_CONTAINER, DONATIONS_CONTAINER, PALETTE,
    STATUS_CONTAINER,
};
use crate::admin::router::{PanelController, Ticket};
use crate::admin::surface::{ActivityItem, StatCard, Surface, Widget, WidgetContent};
use crate::models::{self, format_brl, ContactMessage, Document, Donation, Entity, Project};
use crate::store::{Direction, DocumentStore, Query, StoreError, DOCUMENTS, PROJECTS};

const LOAD_FAILED: &str = "Erro ao carregar dados.";

/// Summary cards, charts and the recent-activity feed.
pub struct DashboardPanel {
    store: Arc<dyn DocumentStore>,
    surface: Arc<dyn Surface>,
    charts: Arc<dyn ChartSink>,
    clock: fn() -> DateTime<Utc>,
}

fn card<T>(label: &'static str, data: &Result<Vec<T>, StoreError>, value: impl FnOnce(&[T]) -> String) -> StatCard {
    StatCard { label, value: data.as_ref().ok().map(|items| value(items)) }
}

impl DashboardPanel {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        surface: Arc<dyn Surface>,
        charts: Arc<dyn ChartSink>,
        clock: fn() -> DateTime<Utc>,
    ) -> Self {
        Self { store, surface, charts, clock }
    }

    /// Newest documents and projects, fetched independently of the totals.
    async fn fetch_recent(&self) -> Result<Vec<ActivityItem>, StoreError> {
        let query = Query::new().order_by("createdAt", Direction::Desc).limit(RECENT_LIMIT);
        let store = self.store.as_ref();
        let (documents, projects) = tokio::join!(store.query(DOCUMENTS, &query), store.query(PROJECTS, &query));
        let documents = documents?.iter().map(Document::from_record).collect();
        let projects = projects?.iter().map(Project::from_record).collect();
        Ok(aggregate::merge_recent(documents, projects, RECENT_LIMIT))
    }

    fn render_summary(
        &self,
        documents: &Result<Vec<Document>, StoreError>,
        projects: &Result<Vec<Project>, StoreError>,
        messages: &Result<Vec<ContactMessage>, StoreError>,
        donations: &Result<Vec<Donation>, StoreError>,
    ) {
        let cards = vec![
            card("Documentos", documents, |d| d.len().to_string()),
            card("Projetos", projects, |p| p.len().to_string()),
            card("Projetos em execução", projects, |p| aggregate::count_in_progress(p).to_string()),
            card("Mensagens", messages, |m| m.len().to_string()),
            card("Doações", donations, |d| d.len().to_string()),
            card("Total arrecadado", donations, |d| format_brl(aggregate::donation_total(d))),
        ];
        self.surface.render_widget(Widget::Summary, WidgetContent::Summary(cards));
    }

    fn render_categories(&self, documents: &Result<Vec<Document>, StoreError>) {
        let Ok(documents) = documents else {
            self.surface.render_widget(Widget::CategoryChart, WidgetContent::Failed(LOAD_FAILED.into()));
            return;
        };
        let histogram = aggregate::category_histogram(documents);
        self.charts.render(
            CATEGORY_CONTAINER,
            ChartKind::Doughnut,
            &histogram.labels(),
            &histogram.values(),
            &PALETTE,
        );
        self.surface.render_widget(Widget::CategoryChart, WidgetContent::Chart);
    }

    fn render_statuses(&self, projects: &Result<Vec<Project>, StoreError>) {
        let Ok(projects) = projects else {
            self.surface.render_widget(Widget::StatusChart, WidgetContent::Failed(LOAD_FAILED.into()));
            return;
        };
        let histogram = aggregate::status_histogram(projects);
        self.charts.render(STATUS_CONTAINER, ChartKind::Pie, &histogram.labels(), &histogram.values(), &PALETTE);
        self.surface.render_widget(Widget::StatusChart, WidgetContent::Chart);
    }

    fn render_monthly(
        &self,
        documents: &Result<Vec<Document>, StoreError>,
        projects: &Result<Vec<Project>, StoreError>,
        donations: &Result<Vec<Donation>, StoreError>,
    ) {
        let (Ok(documents), Ok(projects), Ok(donations)) = (documents, projects, donations) else {
            self.surface.render_widget(Widget::MonthlyChart, WidgetContent::Failed(LOAD_FAILED.into()));
            return;
        };
        let series = aggregate::monthly_series(documents, projects, donations, (self.clock)());
        self.charts.render(ACTIVITY_CONTAINER, ChartKind::Bar, &series.keys, &series.activity, &PALETTE[..1]);
        self.charts.render(DONATIONS_CONTAINER, ChartKind::Line, &series.keys, &series.donations, &PALETTE[1..2]);
        self.surface.render_widget(Widget::MonthlyChart, WidgetContent::Chart);
    }
}

fn logged<T>(collection: &str, result: Result<T, StoreError>) -> Result<T, StoreError> {
    if let Err(e) = &result {
        log::error!("Dashboard fetch of {collection} failed: {e}");
    }
    result
}

#[async_trait]
impl PanelController for DashboardPanel {
    async fn activate(&self, ticket: Ticket) {
        if !ticket.is_current() {
            return;
        }
        for widget in [
            Widget::Summary,
            Widget::CategoryChart,
            Widget::StatusChart,
            Widget::MonthlyChart,
            Widget::RecentActivity,
        ] {
            self.surface.render_widget(widget, WidgetContent::Loading);
        }

        let store = self.store.as_ref();
        let ((documents, projects, messages, donations), recent) = tokio::join!(
            async {
                tokio::join!(
                    models::find_all::<Document>(store),
                    models::find_all::<Project>(store),
                    models::find_all::<ContactMessage>(store),
                    models::find_all::<Donation>(store),
                )
            },
            self.fetch_recent(),
        );
        if !ticket.is_current() {
            log::debug!("discarding stale dashboard load");
            return;
        }

        let documents = logged("documents", documents);
        let projects = logged("projects", projects);
        let messages = logged("messages", messages);
        let donations = logged("donations", donations);

        self.render_summary(&documents, &projects, &messages, &donations);
        self.render_categories(&documents);
        self.render_statuses(&projects);
        self.render_monthly(&documents, &projects, &donations);

        let feed = match logged("recent activity", recent) {
            Ok(items) => WidgetContent::Recent(items),
            Err(_) => WidgetContent::Failed(LOAD_FAILED.into()),
        };
        self.surface.render_widget(Widget::RecentActivity, feed);
    }
}
