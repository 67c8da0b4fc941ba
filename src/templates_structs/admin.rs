use askama::Template;

use crate::admin::collection::Listed;
use crate::admin::recorder::PageState;
use crate::admin::surface::{
    ActivityItem, Cell, EditField, Row, StatCard, TableBody, Widget, WidgetContent, EMPTY_PLACEHOLDER,
    LOADING_PLACEHOLDER,
};
use crate::admin::{Notice, Route};
use crate::models::{ContactMessage, Document, DocumentCategory, Donation, Project, ProjectStatus};

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub org_name: String,
    pub csrf_token: String,
}

pub struct NavItem {
    pub token: &'static str,
    pub title: String,
    pub nav_id: String,
}

impl NavItem {
    pub fn all() -> Vec<NavItem> {
        Route::ALL
            .iter()
            .map(|route| NavItem { token: route.token(), title: route.title(), nav_id: route.nav_id() })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "admin/shell.html")]
pub struct AdminShellTemplate {
    pub org_name: String,
    pub admin_email: String,
    pub csrf_token: String,
    pub flash: Option<Notice>,
    pub nav: Vec<NavItem>,
    pub picker_key: String,
}

pub struct ChoiceView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl ChoiceView {
    fn new(value: &str, label: &str, current: &str) -> Self {
        ChoiceView { value: value.to_string(), label: label.to_string(), selected: value == current }
    }
}

/// Options for a select: the optional blank entry, the known choices, then the
/// current value when it is none of those, so saving keeps it.
fn choice_views(field: &EditField) -> Vec<ChoiceView> {
    let mut views: Vec<ChoiceView> = field.blank.iter().map(|label| ChoiceView::new("", label, &field.value)).collect();
    views.extend(field.choices.iter().map(|&label| ChoiceView::new(label, label, &field.value)));
    if !views.iter().any(|c| c.selected) {
        views.push(ChoiceView::new(&field.value, &field.value, &field.value));
    }
    views
}

pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    /// Empty for free-text inputs.
    pub choices: Vec<ChoiceView>,
}

pub struct RowView {
    pub id: String,
    pub cells: Vec<Cell>,
    pub has_edit: bool,
    pub has_delete: bool,
    pub fields: Vec<FieldView>,
}

impl From<Row> for RowView {
    fn from(row: Row) -> Self {
        let has_edit = row.has_edit();
        let has_delete = row.has_delete();
        let fields = row
            .edit_fields
            .into_iter()
            .map(|field| FieldView {
                choices: if field.choices.is_empty() { Vec::new() } else { choice_views(&field) },
                name: field.name,
                label: field.label,
                value: field.value,
            })
            .collect();
        RowView { id: row.id, cells: row.cells, has_edit, has_delete, fields }
    }
}

pub struct TableView {
    pub columns: Vec<&'static str>,
    /// Asked by the browser before a delete form is submitted.
    pub confirm_prompt: &'static str,
    pub rows: Vec<RowView>,
    /// Shown in place of rows while loading, when empty, or on failure.
    pub placeholder: Option<String>,
}

impl TableView {
    fn new(route: Route, body: Option<TableBody>) -> Self {
        let (columns, confirm_prompt) = match route {
            Route::Documents => (Document::COLUMNS, Document::TEXT.confirm_delete),
            Route::Projects => (Project::COLUMNS, Project::TEXT.confirm_delete),
            Route::Donations => (Donation::COLUMNS, Donation::TEXT.confirm_delete),
            _ => (ContactMessage::COLUMNS, ContactMessage::TEXT.confirm_delete),
        };
        let (rows, placeholder) = match body.unwrap_or(TableBody::Loading) {
            TableBody::Rows(rows) => (rows.into_iter().map(RowView::from).collect(), None),
            TableBody::Loading => (Vec::new(), Some(LOADING_PLACEHOLDER.to_string())),
            TableBody::Empty => (Vec::new(), Some(EMPTY_PLACEHOLDER.to_string())),
            TableBody::Failed(message) => (Vec::new(), Some(message)),
        };
        TableView { columns: columns.to_vec(), confirm_prompt, rows, placeholder }
    }
}

#[derive(Default)]
pub struct WidgetView {
    pub loading: bool,
    pub error: Option<String>,
}

pub struct DashboardView {
    pub summary: WidgetView,
    pub cards: Vec<StatCard>,
    pub categories: WidgetView,
    pub statuses: WidgetView,
    pub monthly: WidgetView,
    pub recent: WidgetView,
    pub activity: Vec<ActivityItem>,
}

impl DashboardView {
    fn new(state: &PageState) -> Self {
        let view = |widget: Widget| match state.widgets.get(&widget) {
            None | Some(WidgetContent::Loading) => WidgetView { loading: true, error: None },
            Some(WidgetContent::Failed(message)) => WidgetView { loading: false, error: Some(message.clone()) },
            Some(_) => WidgetView::default(),
        };
        let cards = match state.widgets.get(&Widget::Summary) {
            Some(WidgetContent::Summary(cards)) => cards.clone(),
            _ => Vec::new(),
        };
        let activity = match state.widgets.get(&Widget::RecentActivity) {
            Some(WidgetContent::Recent(items)) => items.clone(),
            _ => Vec::new(),
        };
        DashboardView {
            summary: view(Widget::Summary),
            cards,
            categories: view(Widget::CategoryChart),
            statuses: view(Widget::StatusChart),
            monthly: view(Widget::MonthlyChart),
            recent: view(Widget::RecentActivity),
            activity,
        }
    }
}

pub struct InstitutionalView {
    pub mission: String,
    pub vision: String,
    pub board_info: String,
}

impl InstitutionalView {
    fn new(values: &[(&'static str, String)]) -> Self {
        let get = |key: &str| {
            values.iter().find(|(name, _)| *name == key).map(|(_, v)| v.clone()).unwrap_or_default()
        };
        InstitutionalView { mission: get("mission"), vision: get("vision"), board_info: get("board_info") }
    }
}

/// One admin panel as drawn by the engine, served to the shell's script.
#[derive(Template)]
#[template(path = "admin/panel.html")]
pub struct PanelTemplate {
    pub route: &'static str,
    pub title: String,
    pub panel_id: String,
    pub csrf_token: String,
    pub picker_key: String,
    pub notices: Vec<Notice>,
    pub table: Option<TableView>,
    pub dashboard: Option<DashboardView>,
    pub institutional: Option<InstitutionalView>,
    pub file_info: String,
    pub categories: Vec<&'static str>,
    pub statuses: Vec<&'static str>,
    pub charts_json: String,
}

impl PanelTemplate {
    pub fn from_state(
        route: Route,
        mut state: PageState,
        charts_json: String,
        csrf_token: String,
        picker_key: String,
    ) -> Self {
        let table = match route {
            Route::Documents | Route::Projects | Route::Donations | Route::Messages => {
                Some(TableView::new(route, state.tables.remove(&route)))
            }
            _ => None,
        };
        let dashboard = (route == Route::Dashboard).then(|| DashboardView::new(&state));
        let institutional = (route == Route::Institutional)
            .then(|| InstitutionalView::new(state.form_values.get(&route).map(Vec::as_slice).unwrap_or(&[])));
        let file_info = state
            .file_info
            .take()
            .map(|(text, _)| text)
            .unwrap_or_else(|| crate::admin::panels::documents::NO_FILE.to_string());

        PanelTemplate {
            route: route.token(),
            title: if state.title.is_empty() { route.title() } else { state.title },
            panel_id: route.panel_id(),
            csrf_token,
            picker_key,
            notices: state.notices,
            table,
            dashboard,
            institutional,
            file_info,
            categories: DocumentCategory::labels(),
            statuses: ProjectStatus::labels(),
            charts_json,
        }
    }
}
