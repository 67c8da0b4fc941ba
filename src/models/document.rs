use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::{parse_timestamp, text, Editable, Entity};
use crate::store::{Fields, Record, DOCUMENTS};

pub const UNCATEGORIZED: &str = "Sem Categoria";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentCategory {
    Institutional,
    Transparency,
    Accountability,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 3] = [
        DocumentCategory::Institutional,
        DocumentCategory::Transparency,
        DocumentCategory::Accountability,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DocumentCategory::Institutional => "Institucional",
            DocumentCategory::Transparency => "Transparência",
            DocumentCategory::Accountability => "Prestação de Contas",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.label()).collect()
    }
}

/// Uploaded file metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub title: String,
    /// Free text; usually one of [`DocumentCategory`] labels. Empty when unset.
    pub category: String,
    pub file_url: String,
    pub file_name: String,
    pub file_uuid: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Category used for grouping and charts.
    pub fn category_bucket(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() { UNCATEGORIZED } else { trimmed }
    }
}

/// Title/category as typed into the admin form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentForm {
    pub title: String,
    #[serde(default)]
    pub category: String,
}

fn title_and_category(form: &DocumentForm) -> Result<Fields, Vec<String>> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(vec!["O título é obrigatório.".to_string()]);
    }
    let mut fields = Fields::new();
    fields.insert("title".into(), Value::from(title));
    fields.insert("category".into(), Value::from(form.category.trim()));
    Ok(fields)
}

impl Entity for Document {
    const COLLECTION: &'static str = DOCUMENTS;
    const CREATED_FIELD: Option<&'static str> = Some("createdAt");
    type Form = DocumentForm;

    fn from_record(record: &Record) -> Self {
        let f = &record.fields;
        Document {
            id: record.id.clone(),
            title: text(f, "title"),
            category: text(f, "category"),
            file_url: text(f, "fileURL"),
            file_name: text(f, "fileName"),
            file_uuid: text(f, "fileUUID"),
            created_at: parse_timestamp(f.get("createdAt")),
        }
    }

    fn validate(form: &DocumentForm) -> Result<Fields, Vec<String>> {
        title_and_category(form)
    }

    fn sort(items: &mut [Self]) {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

impl Editable for Document {
    type EditForm = DocumentForm;

    fn validate_edit(form: &DocumentForm) -> Result<Fields, Vec<String>> {
        title_and_category(form)
    }
}
