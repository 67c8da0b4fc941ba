//! Dashboard figures computed from fetched collections.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};

use super::surface::ActivityItem;
use crate::models::{Document, Donation, Project, ProjectStatus};

/// Number of calendar months in the trailing series, current month included.
pub const WINDOW_MONTHS: u32 = 6;

/// Size of the recent-activity feed.
pub const RECENT_LIMIT: usize = 5;

/// Category → occurrence count, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    entries: Vec<(String, usize)>,
}

impl Histogram {
    pub fn get(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, n)| *n as f64).collect()
    }
}

/// Documents per category; blank categories land in "Sem Categoria".
pub fn category_histogram(documents: &[Document]) -> Histogram {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for doc in documents {
        *counts.entry(doc.category_bucket().to_string()).or_default() += 1;
    }
    Histogram { entries: counts.into_iter().collect() }
}

/// Projects per known status. Unknown statuses are not counted.
pub fn status_histogram(projects: &[Project]) -> Histogram {
    let entries = ProjectStatus::ALL
        .iter()
        .map(|status| {
            let n = projects.iter().filter(|p| p.status() == Some(*status)).count();
            (status.label().to_string(), n)
        })
        .collect();
    Histogram { entries }
}

pub fn count_in_progress(projects: &[Project]) -> usize {
    projects
        .iter()
        .filter(|p| p.status() == Some(ProjectStatus::InProgress))
        .count()
}

pub fn donation_total(donations: &[Donation]) -> f64 {
    donations.iter().map(|d| d.amount).sum()
}

/// First instant of the series window: midnight UTC on the first day of the
/// month five months before `now`.
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    let first_of_month = today.with_day(1).unwrap_or(today);
    let start = first_of_month
        .checked_sub_months(Months::new(WINDOW_MONTHS - 1))
        .unwrap_or(first_of_month);
    midnight(start).unwrap_or(now)
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn in_window(at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    at >= window_start(now) && at <= now
}

pub fn month_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m").to_string()
}

/// Six-month trailing series keyed by `YYYY-MM`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    pub keys: Vec<String>,
    /// Documents plus projects created in each month.
    pub activity: Vec<f64>,
    /// Donation amount received in each month.
    pub donations: Vec<f64>,
}

pub fn monthly_series(
    documents: &[Document],
    projects: &[Project],
    donations: &[Donation],
    now: DateTime<Utc>,
) -> MonthlySeries {
    let start = window_start(now);
    let mut activity: BTreeMap<String, f64> = BTreeMap::new();
    let mut amounts: BTreeMap<String, f64> = BTreeMap::new();
    for offset in 0..WINDOW_MONTHS {
        if let Some(month) = start.date_naive().checked_add_months(Months::new(offset)) {
            let key = month.format("%Y-%m").to_string();
            activity.insert(key.clone(), 0.0);
            amounts.insert(key, 0.0);
        }
    }

    let created = documents
        .iter()
        .filter_map(|d| d.created_at)
        .chain(projects.iter().filter_map(|p| p.created_at));
    for at in created.filter(|at| in_window(*at, now)) {
        *activity.entry(month_key(at)).or_default() += 1.0;
    }

    for donation in donations {
        let Some(at) = donation.date.and_then(midnight) else {
            continue;
        };
        if in_window(at, now) {
            *amounts.entry(month_key(at)).or_default() += donation.amount;
        }
    }

    MonthlySeries {
        keys: activity.keys().cloned().collect(),
        activity: activity.into_values().collect(),
        donations: amounts.into_values().collect(),
    }
}

/// Merge the newest documents and projects into one feed, newest first.
pub fn merge_recent(documents: Vec<Document>, projects: Vec<Project>, limit: usize) -> Vec<ActivityItem> {
    let mut items: Vec<ActivityItem> = documents
        .into_iter()
        .map(|d| ActivityItem { kind: "Documento", title: d.title, created_at: d.created_at })
        .chain(projects.into_iter().map(|p| ActivityItem {
            kind: "Projeto",
            title: p.title,
            created_at: p.created_at,
        }))
        .collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items.truncate(limit);
    items
}
