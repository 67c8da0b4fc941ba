//! Document store collaborator.
//!
//! Records are schema-less JSON objects grouped into named collections. The
//! rest of the crate only sees the [`DocumentStore`] trait; [`MemoryStore`]
//! backs development and tests, [`PgStore`] keeps records in a JSONB table.

pub mod memory;
pub mod postgres;

use std::cmp::Ordering;
use std::fmt;

use async_trait::async_trait;
use rand::Rng;
use serde_json::Value;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Field map of a single record.
pub type Fields = serde_json::Map<String, Value>;

pub const DOCUMENTS: &str = "documentos";
pub const PROJECTS: &str = "projetos";
pub const DONATIONS: &str = "doacoes";
pub const MESSAGES: &str = "mensagens";
pub const CONTENT: &str = "conteudo";
pub const ADMINS: &str = "administradores";

/// One record within a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub fields: Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Equality filter on a top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Filtered, sorted and bounded read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filter: Option<Filter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filter = Some(Filter { field: field.to_string(), value: value.into() });
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some(OrderBy { field: field.to_string(), direction });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Apply this query to an in-memory sequence of records.
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        let mut out: Vec<Record> = match &self.filter {
            Some(f) => records
                .into_iter()
                .filter(|r| r.fields.get(&f.field) == Some(&f.value))
                .collect(),
            None => records,
        };
        if let Some(order) = &self.order_by {
            // Missing values always sort after present ones.
            out.sort_by(|a, b| {
                let (va, vb) = (a.fields.get(&order.field), b.fields.get(&order.field));
                match (va, vb) {
                    (Some(x), Some(y)) => match order.direction {
                        Direction::Asc => compare_values(x, y),
                        Direction::Desc => compare_values(y, x),
                    },
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            });
        }
        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}

/// Total order over JSON scalars: numbers numerically, strings lexically,
/// mixed kinds by kind rank.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Random 20-character record id.
pub fn new_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 10] = rng.random();
    hex::encode(bytes)
}

#[derive(Debug)]
pub enum StoreError {
    Database(sqlx::Error),
    NotFound { collection: String, id: String },
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(e) => write!(f, "Database error: {e}"),
            StoreError::NotFound { collection, id } => {
                write!(f, "Record {id} not found in {collection}")
            }
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}

/// CRUD capability set over named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new record and return its generated id.
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// All records of a collection in insertion order.
    async fn list(&self, collection: &str) -> Result<Vec<Record>, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>, StoreError>;

    /// Merge `partial` into an existing record. Fails with `NotFound` if absent.
    async fn update(&self, collection: &str, id: &str, partial: Fields) -> Result<(), StoreError>;

    /// Merge `partial` into the record, creating it when absent.
    async fn upsert(&self, collection: &str, id: &str, partial: Fields) -> Result<(), StoreError>;

    /// Remove a record. Removing a missing record is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Record>, StoreError>;
}
