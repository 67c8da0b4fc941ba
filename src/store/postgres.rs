use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{new_id, Direction, DocumentStore, Fields, Query, Record, StoreError};

/// Records kept in the `records` JSONB table (see `migrations/`).
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn into_records(rows: Vec<(String, Json<Fields>)>) -> Vec<Record> {
    rows.into_iter()
        .map(|(id, Json(fields))| Record { id, fields })
        .collect()
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = new_id();
        sqlx::query("INSERT INTO records (collection, id, fields) VALUES ($1, $2, $3)")
            .bind(collection)
            .bind(&id)
            .bind(Json(&fields))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Record>, StoreError> {
        let rows = sqlx::query_as::<_, (String, Json<Fields>)>(
            "SELECT id, fields FROM records WHERE collection = $1 ORDER BY seq",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;
        Ok(into_records(rows))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Fields>, StoreError> {
        let row = sqlx::query_as::<_, (Json<Fields>,)>(
            "SELECT fields FROM records WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(Json(fields),)| fields))
    }

    async fn update(&self, collection: &str, id: &str, partial: Fields) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE records SET fields = fields || $3 WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(Json(&partial))
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn upsert(&self, collection: &str, id: &str, partial: Fields) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO records (collection, id, fields) VALUES ($1, $2, $3) \
             ON CONFLICT (collection, id) DO UPDATE SET fields = records.fields || EXCLUDED.fields",
        )
        .bind(collection)
        .bind(id)
        .bind(Json(&partial))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM records WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Record>, StoreError> {
        let mut sql = String::from("SELECT id, fields FROM records WHERE collection = $1");
        let mut next_param = 2;

        if query.filter.is_some() {
            sql.push_str(&format!(" AND fields -> ${} = ${}", next_param, next_param + 1));
            next_param += 2;
        }
        match &query.order_by {
            Some(order) => {
                let dir = match order.direction {
                    Direction::Asc => "ASC",
                    Direction::Desc => "DESC",
                };
                sql.push_str(&format!(" ORDER BY fields -> ${next_param} {dir} NULLS LAST, seq"));
                next_param += 1;
            }
            None => sql.push_str(" ORDER BY seq"),
        }
        if query.limit.is_some() {
            sql.push_str(&format!(" LIMIT ${next_param}"));
        }

        let mut q = sqlx::query_as::<_, (String, Json<Fields>)>(&sql).bind(collection);
        if let Some(filter) = &query.filter {
            q = q.bind(filter.field.clone()).bind(Json::<Value>(filter.value.clone()));
        }
        if let Some(order) = &query.order_by {
            q = q.bind(order.field.clone());
        }
        if let Some(limit) = query.limit {
            q = q.bind(limit as i64);
        }
        let rows = q.fetch_all(&self.pool).await?;
        Ok(into_records(rows))
    }
}
