use chrono::{DateTime, Utc};

use super::{Notice, Route};

pub const EMPTY_PLACEHOLDER: &str = "Nenhum registro encontrado.";
pub const LOADING_PLACEHOLDER: &str = "Carregando...";

/// Per-row controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub href: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), href: None }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self { text: text.into(), href: Some(href.into()) }
    }
}

/// One editable input of the inline edit form. `choices` empty means free text.
#[derive(Debug, Clone, PartialEq)]
pub struct EditField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub choices: Vec<&'static str>,
    /// Label of an extra option submitting an empty value.
    pub blank: Option<&'static str>,
}

impl EditField {
    pub fn text(name: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self { name, label, value: value.into(), choices: vec![], blank: None }
    }

    pub fn select(name: &'static str, label: &'static str, value: impl Into<String>, choices: Vec<&'static str>) -> Self {
        Self { name, label, value: value.into(), choices, blank: None }
    }

    pub fn with_blank(mut self, label: &'static str) -> Self {
        self.blank = Some(label);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    pub cells: Vec<Cell>,
    pub actions: Vec<RowAction>,
    pub edit_fields: Vec<EditField>,
}

impl Row {
    pub fn has_edit(&self) -> bool {
        self.actions.contains(&RowAction::Edit)
    }

    pub fn has_delete(&self) -> bool {
        self.actions.contains(&RowAction::Delete)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Loading,
    Rows(Vec<Row>),
    Empty,
    Failed(String),
}

/// Independently rendered dashboard pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Widget {
    Summary,
    CategoryChart,
    StatusChart,
    MonthlyChart,
    RecentActivity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    /// `None` when the backing fetch failed.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityItem {
    pub kind: &'static str,
    pub title: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl ActivityItem {
    pub fn when(&self) -> String {
        self.created_at
            .map(|at| at.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetContent {
    Loading,
    Summary(Vec<StatCard>),
    /// Drawn through the chart sink.
    Chart,
    Recent(Vec<ActivityItem>),
    Failed(String),
}

/// The visible admin page.
pub trait Surface: Send + Sync {
    /// Make `route`'s panel the only visible one.
    fn show_panel(&self, route: Route);
    /// Make `route`'s nav item the only highlighted one.
    fn highlight_nav(&self, route: Route);
    fn set_title(&self, title: &str);
    fn set_loading(&self, visible: bool);
    fn notify(&self, notice: Notice);
    /// Ask the admin to confirm; `false` means declined.
    fn confirm(&self, prompt: &str) -> bool;
    fn render_table(&self, route: Route, body: TableBody);
    fn render_widget(&self, widget: Widget, content: WidgetContent);
    fn set_form_enabled(&self, route: Route, enabled: bool);
    fn set_file_info(&self, text: &str, selected: bool);
    fn fill_form(&self, route: Route, values: Vec<(&'static str, String)>);
}

/// Shows the loading indicator until dropped.
pub struct LoadingGuard<'a> {
    surface: &'a dyn Surface,
}

impl<'a> LoadingGuard<'a> {
    pub fn new(surface: &'a dyn Surface) -> Self {
        surface.set_loading(true);
        Self { surface }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.surface.set_loading(false);
    }
}
