//! Surface and chart sink that record what the engine drew.
//!
//! Used by the HTTP layer to turn one engine run into a rendered page, and by
//! tests to assert on the visible state.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use serde::Serialize;

use super::chart::{ChartKind, ChartSink};
use super::surface::{Surface, TableBody, Widget, WidgetContent};
use super::{Notice, Route};

#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub visible_panels: BTreeSet<Route>,
    pub highlighted: BTreeSet<Route>,
    pub title: String,
    pub loading: bool,
    /// Every loading indicator transition, in order.
    pub loading_history: Vec<bool>,
    pub notices: Vec<Notice>,
    /// Prompts the admin was asked to confirm.
    pub prompts: Vec<String>,
    pub tables: BTreeMap<Route, TableBody>,
    pub widgets: BTreeMap<Widget, WidgetContent>,
    pub disabled_forms: BTreeSet<Route>,
    pub file_info: Option<(String, bool)>,
    pub form_values: BTreeMap<Route, Vec<(&'static str, String)>>,
}

impl PageState {
    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

pub struct RecordingSurface {
    state: Mutex<PageState>,
    confirm_answer: bool,
}

impl RecordingSurface {
    /// A surface whose confirmation prompts are declined.
    pub fn new() -> Self {
        Self::with_confirmation(false)
    }

    pub fn with_confirmation(answer: bool) -> Self {
        Self { state: Mutex::new(PageState::default()), confirm_answer: answer }
    }

    pub fn snapshot(&self) -> PageState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn with_state(&self, f: impl FnOnce(&mut PageState)) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state);
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RecordingSurface {
    fn show_panel(&self, route: Route) {
        self.with_state(|s| {
            s.visible_panels.clear();
            s.visible_panels.insert(route);
        });
    }

    fn highlight_nav(&self, route: Route) {
        self.with_state(|s| {
            s.highlighted.clear();
            s.highlighted.insert(route);
        });
    }

    fn set_title(&self, title: &str) {
        self.with_state(|s| s.title = title.to_string());
    }

    fn set_loading(&self, visible: bool) {
        self.with_state(|s| {
            s.loading = visible;
            s.loading_history.push(visible);
        });
    }

    fn notify(&self, notice: Notice) {
        self.with_state(|s| s.notices.push(notice));
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.with_state(|s| s.prompts.push(prompt.to_string()));
        self.confirm_answer
    }

    fn render_table(&self, route: Route, body: TableBody) {
        self.with_state(|s| {
            s.tables.insert(route, body);
        });
    }

    fn render_widget(&self, widget: Widget, content: WidgetContent) {
        self.with_state(|s| {
            s.widgets.insert(widget, content);
        });
    }

    fn set_form_enabled(&self, route: Route, enabled: bool) {
        self.with_state(|s| {
            if enabled {
                s.disabled_forms.remove(&route);
            } else {
                s.disabled_forms.insert(route);
            }
        });
    }

    fn set_file_info(&self, text: &str, selected: bool) {
        self.with_state(|s| s.file_info = Some((text.to_string(), selected)));
    }

    fn fill_form(&self, route: Route, values: Vec<(&'static str, String)>) {
        self.with_state(|s| {
            s.form_values.insert(route, values);
        });
    }
}

/// A chart as handed to the sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub container: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<f64>,
    pub palette: Vec<String>,
}

#[derive(Default)]
pub struct RecordingCharts {
    charts: Mutex<Vec<ChartSpec>>,
}

impl RecordingCharts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charts(&self) -> Vec<ChartSpec> {
        self.charts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn find(&self, container: &str) -> Option<ChartSpec> {
        self.charts().into_iter().find(|c| c.container == container)
    }

    /// JSON safe to embed inside a `<script>` element.
    pub fn to_script_json(&self) -> String {
        serde_json::to_string(&self.charts())
            .unwrap_or_else(|_| "[]".to_string())
            .replace('<', "\\u003c")
    }
}

impl ChartSink for RecordingCharts {
    fn render(&self, container_id: &str, kind: ChartKind, labels: &[String], series: &[f64], palette: &[&str]) {
        let spec = ChartSpec {
            container: container_id.to_string(),
            kind,
            labels: labels.to_vec(),
            series: series.to_vec(),
            palette: palette.iter().map(|c| c.to_string()).collect(),
        };
        let mut charts = self.charts.lock().unwrap_or_else(|e| e.into_inner());
        charts.retain(|c| c.container != container_id);
        charts.push(spec);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_json_escapes_angle_brackets() {
        let charts = RecordingCharts::new();
        charts.render("c", ChartKind::Pie, &["</script>".to_string()], &[1.0], &["#fff"]);
        let json = charts.to_script_json();
        assert!(!json.contains("</script>"));
        assert!(json.contains("\\u003c/script>"));
    }

    #[test]
    fn re_rendering_a_container_replaces_it() {
        let charts = RecordingCharts::new();
        charts.render("c", ChartKind::Bar, &[], &[], &[]);
        charts.render("c", ChartKind::Line, &[], &[], &[]);
        assert_eq!(charts.charts().len(), 1);
        assert_eq!(charts.charts()[0].kind, ChartKind::Line);
    }
}
