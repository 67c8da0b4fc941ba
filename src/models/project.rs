use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::{parse_timestamp, text, Editable, Entity};
use crate::store::{Fields, Record, PROJECTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 2] = [ProjectStatus::InProgress, ProjectStatus::Completed];

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::InProgress => "Em Execução",
            ProjectStatus::Completed => "Concluído",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.label()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn status(&self) -> Option<ProjectStatus> {
        ProjectStatus::from_label(&self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
}

fn validate_form(form: &ProjectForm) -> Result<Fields, Vec<String>> {
    let mut errors = vec![];
    let title = form.title.trim();
    if title.is_empty() {
        errors.push("O título é obrigatório.".to_string());
    }
    let status = ProjectStatus::from_label(form.status.trim());
    if status.is_none() {
        errors.push("Selecione um status válido.".to_string());
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut fields = Fields::new();
    fields.insert("title".into(), Value::from(title));
    fields.insert("description".into(), Value::from(form.description.trim()));
    if let Some(status) = status {
        fields.insert("status".into(), Value::from(status.label()));
    }
    Ok(fields)
}

impl Entity for Project {
    const COLLECTION: &'static str = PROJECTS;
    const CREATED_FIELD: Option<&'static str> = Some("createdAt");
    type Form = ProjectForm;

    fn from_record(record: &Record) -> Self {
        let f = &record.fields;
        Project {
            id: record.id.clone(),
            title: text(f, "title"),
            description: text(f, "description"),
            status: text(f, "status"),
            created_at: parse_timestamp(f.get("createdAt")),
        }
    }

    fn validate(form: &ProjectForm) -> Result<Fields, Vec<String>> {
        validate_form(form)
    }

    fn sort(items: &mut [Self]) {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

impl Editable for Project {
    type EditForm = ProjectForm;

    fn validate_edit(form: &ProjectForm) -> Result<Fields, Vec<String>> {
        validate_form(form)
    }
}
