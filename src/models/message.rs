use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::{parse_timestamp, text, Entity};
use crate::auth::validate::{validate_email, validate_required};
use crate::store::{Fields, Record, MESSAGES};

/// Message left through the public contact form.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Entity for ContactMessage {
    const COLLECTION: &'static str = MESSAGES;
    const CREATED_FIELD: Option<&'static str> = Some("submittedAt");
    type Form = ContactForm;

    fn from_record(record: &Record) -> Self {
        let f = &record.fields;
        ContactMessage {
            id: record.id.clone(),
            name: text(f, "name"),
            email: text(f, "email"),
            message: text(f, "message"),
            submitted_at: parse_timestamp(f.get("submittedAt")),
        }
    }

    fn validate(form: &ContactForm) -> Result<Fields, Vec<String>> {
        let errors: Vec<String> = [
            validate_required(&form.name, "Nome", 120),
            validate_email(&form.email),
            validate_required(&form.message, "Mensagem", 5000),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut fields = Fields::new();
        fields.insert("name".into(), Value::from(form.name.trim()));
        fields.insert("email".into(), Value::from(form.email.trim()));
        fields.insert("message".into(), Value::from(form.message.trim()));
        Ok(fields)
    }

    fn sort(items: &mut [Self]) {
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    }
}
