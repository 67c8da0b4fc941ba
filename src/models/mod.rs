pub mod document;
pub mod donation;
pub mod institutional;
pub mod message;
pub mod project;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::store::{DocumentStore, Fields, Record, StoreError};

pub use document::{Document, DocumentCategory, DocumentForm};
pub use donation::{Donation, DonationForm};
pub use institutional::{InstitutionalContent, InstitutionalForm};
pub use message::{ContactForm, ContactMessage};
pub use project::{Project, ProjectForm, ProjectStatus};

/// A record shape stored in one collection.
pub trait Entity: Sized + Send + Sync + 'static {
    const COLLECTION: &'static str;
    /// Field stamped with the server time on insert, if any.
    const CREATED_FIELD: Option<&'static str>;

    /// Input accepted when creating a record.
    type Form: Send + Sync;

    fn from_record(record: &Record) -> Self;

    /// Check the form locally and produce the fields to persist.
    fn validate(form: &Self::Form) -> Result<Fields, Vec<String>>;

    /// Display order for list views. Defaults to store order.
    fn sort(_items: &mut [Self]) {}
}

/// Entities whose title-level fields can be edited after creation.
pub trait Editable: Entity {
    type EditForm: Send + Sync;

    fn validate_edit(form: &Self::EditForm) -> Result<Fields, Vec<String>>;
}

pub async fn find_all<E: Entity>(store: &dyn DocumentStore) -> Result<Vec<E>, StoreError> {
    let records = store.list(E::COLLECTION).await?;
    let mut items: Vec<E> = records.iter().map(E::from_record).collect();
    E::sort(&mut items);
    Ok(items)
}

/// Persist already-validated fields, stamping the creation time.
pub async fn insert<E: Entity>(store: &dyn DocumentStore, mut fields: Fields) -> Result<String, StoreError> {
    if let Some(field) = E::CREATED_FIELD {
        fields.insert(field.to_string(), timestamp(Utc::now()));
    }
    store.create(E::COLLECTION, fields).await
}

/// Canonical timestamp representation: RFC 3339, UTC, millisecond precision.
/// Values in this form sort chronologically as plain strings.
pub fn timestamp(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let s = value?.as_str()?;
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.with_timezone(&Utc))
}

/// String field, empty when missing or not a string.
pub fn text(fields: &Fields, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Format an amount as Brazilian currency, e.g. `R$ 1.234,50`.
pub fn format_brl(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let (units, frac) = (cents / 100, cents % 100);

    let digits = units.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}

/// Uppercase the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn brl_formatting() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(12.5), "R$ 12,50");
        assert_eq!(format_brl(1234.5), "R$ 1.234,50");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
    }

    #[test]
    fn timestamps_round_trip_through_canonical_form() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        let value = timestamp(at);
        assert_eq!(value, Value::String("2025-03-01T12:30:00.000Z".to_string()));
        assert_eq!(parse_timestamp(Some(&value)), Some(at));
        assert_eq!(parse_timestamp(None), None);
    }

    #[test]
    fn capitalize_handles_accents_and_empty() {
        assert_eq!(capitalize("doações"), "Doações");
        assert_eq!(capitalize("ébano"), "Ébano");
        assert_eq!(capitalize(""), "");
    }
}
