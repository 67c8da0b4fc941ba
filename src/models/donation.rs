use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use super::{text, Entity};
use crate::store::{Fields, Record, DONATIONS};

pub const ANONYMOUS: &str = "Anônimo";

#[derive(Debug, Clone, PartialEq)]
pub struct Donation {
    pub id: String,
    pub donor: String,
    pub amount: f64,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonationForm {
    #[serde(default)]
    pub donor: String,
    pub amount: String,
    pub date: String,
}

/// `1.234` or `12.345.678`: dots grouping digits in threes.
fn is_grouped_thousands(input: &str) -> bool {
    let mut groups = input.split('.');
    let head_ok = groups.next().is_some_and(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()));
    let mut tail = groups.peekable();
    head_ok && tail.peek().is_some() && tail.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()))
}

/// Parse a typed amount. Accepts `12.5`, `12,50`, `1.234` and `1.234,50`;
/// a dot before exactly three digits groups thousands.
pub fn parse_amount(input: &str) -> Option<f64> {
    let trimmed = input.trim().trim_start_matches("R$").trim();
    let normalized = if trimmed.contains(',') || is_grouped_thousands(trimmed) {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

fn amount_of(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_amount(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

impl Entity for Donation {
    const COLLECTION: &'static str = DONATIONS;
    const CREATED_FIELD: Option<&'static str> = None;
    type Form = DonationForm;

    fn from_record(record: &Record) -> Self {
        let f = &record.fields;
        let donor = text(f, "donor");
        Donation {
            id: record.id.clone(),
            donor: if donor.trim().is_empty() { ANONYMOUS.to_string() } else { donor },
            amount: amount_of(f.get("amount")),
            date: parse_date(&text(f, "date")),
        }
    }

    fn validate(form: &DonationForm) -> Result<Fields, Vec<String>> {
        let mut errors = vec![];
        let amount = parse_amount(&form.amount);
        match amount {
            Some(v) if v > 0.0 => {}
            _ => errors.push("Informe um valor positivo para a doação.".to_string()),
        }
        let date = parse_date(&form.date);
        if date.is_none() {
            errors.push("Informe uma data válida (AAAA-MM-DD).".to_string());
        }
        let (Some(amount), Some(date)) = (amount, date) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let donor = form.donor.trim();
        let mut fields = Fields::new();
        fields.insert(
            "donor".into(),
            Value::from(if donor.is_empty() { ANONYMOUS } else { donor }),
        );
        fields.insert("amount".into(), Value::from(amount));
        fields.insert("date".into(), Value::from(date.format("%Y-%m-%d").to_string()));
        Ok(fields)
    }

    fn sort(items: &mut [Self]) {
        items.sort_by(|a, b| b.date.cmp(&a.date));
    }
}
