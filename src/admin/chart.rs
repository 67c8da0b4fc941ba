use serde::Serialize;

pub const CATEGORY_CONTAINER: &str = "grafico-categorias";
pub const STATUS_CONTAINER: &str = "grafico-status";
pub const ACTIVITY_CONTAINER: &str = "grafico-atividade";
pub const DONATIONS_CONTAINER: &str = "grafico-doacoes";

pub const PALETTE: [&str; 6] = ["#1d7874", "#f4a261", "#e76f51", "#2a9d8f", "#264653", "#e9c46a"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
    Pie,
    Bar,
    Line,
}

/// Stateless chart renderer.
pub trait ChartSink: Send + Sync {
    fn render(&self, container_id: &str, kind: ChartKind, labels: &[String], series: &[f64], palette: &[&str]);
}
