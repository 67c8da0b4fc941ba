use serde::Deserialize;
use serde_json::Value;

use super::text;
use crate::store::{DocumentStore, Fields, StoreError, CONTENT};

/// Id of the singleton record inside the content collection.
pub const RECORD_ID: &str = "institucional";

/// Mission, vision and board text shown on the public site.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstitutionalContent {
    pub mission: String,
    pub vision: String,
    pub board_info: String,
}

impl InstitutionalContent {
    pub fn from_fields(fields: &Fields) -> Self {
        InstitutionalContent {
            mission: text(fields, "mission"),
            vision: text(fields, "vision"),
            board_info: text(fields, "boardInfo"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstitutionalForm {
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub vision: String,
    #[serde(default)]
    pub board_info: String,
}

impl InstitutionalForm {
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("mission".into(), Value::from(self.mission.trim()));
        fields.insert("vision".into(), Value::from(self.vision.trim()));
        fields.insert("boardInfo".into(), Value::from(self.board_info.trim()));
        fields
    }
}

/// Current content; all fields empty before the first save.
pub async fn load(store: &dyn DocumentStore) -> Result<InstitutionalContent, StoreError> {
    let fields = store.get(CONTENT, RECORD_ID).await?.unwrap_or_default();
    Ok(InstitutionalContent::from_fields(&fields))
}

/// Merge the submitted fields into the singleton, creating it if needed.
pub async fn save(store: &dyn DocumentStore, form: &InstitutionalForm) -> Result<(), StoreError> {
    store.upsert(CONTENT, RECORD_ID, form.to_fields()).await
}
