//! In-memory document store tests: ordering, merge semantics and queries.

use serde_json::{json, Value};

use ongsite::store::memory::MemoryStore;
use ongsite::store::{Direction, DocumentStore, Fields, Query, StoreError};

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

#[tokio::test]
async fn test_list_keeps_insertion_order() {
    let store = MemoryStore::new();
    let a = store.create("projetos", fields(json!({"title": "A"}))).await.expect("create");
    let b = store.create("projetos", fields(json!({"title": "B"}))).await.expect("create");

    let ids: Vec<String> = store.list("projetos").await.expect("list").into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![a, b]);
    assert!(store.list("doacoes").await.expect("list").is_empty());
}

#[tokio::test]
async fn test_update_merges_and_requires_existing_record() {
    let store = MemoryStore::new();
    let id = store.create("projetos", fields(json!({"title": "A", "status": "Em Execução"}))).await.expect("create");

    store.update("projetos", &id, fields(json!({"status": "Concluído"}))).await.expect("update");
    let stored = store.get("projetos", &id).await.expect("get").expect("missing");
    assert_eq!(stored.get("title"), Some(&json!("A")));
    assert_eq!(stored.get("status"), Some(&json!("Concluído")));

    let missing = store.update("projetos", "nope", Fields::new()).await;
    assert!(matches!(missing, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = MemoryStore::new();
    let id = store.create("mensagens", fields(json!({"name": "Ana"}))).await.expect("create");

    store.delete("mensagens", &id).await.expect("delete");
    store.delete("mensagens", &id).await.expect("second delete");
    assert!(store.get("mensagens", &id).await.expect("get").is_none());
}

#[tokio::test]
async fn test_query_filters_orders_and_limits() {
    let store = MemoryStore::new();
    for (title, created) in [("old", "2025-01-01T00:00:00.000Z"), ("new", "2025-03-01T00:00:00.000Z"), ("mid", "2025-02-01T00:00:00.000Z")] {
        store
            .create("documentos", fields(json!({"title": title, "createdAt": created, "kind": "pdf"})))
            .await
            .expect("create");
    }
    store.create("documentos", fields(json!({"title": "undated", "kind": "pdf"}))).await.expect("create");
    store.create("documentos", fields(json!({"title": "other", "kind": "doc", "createdAt": "2030-01-01T00:00:00.000Z"}))).await.expect("create");

    let query = Query::new().filter("kind", "pdf").order_by("createdAt", Direction::Desc).limit(3);
    let titles: Vec<Value> = store
        .query("documentos", &query)
        .await
        .expect("query")
        .into_iter()
        .map(|r| r.fields["title"].clone())
        .collect();
    assert_eq!(titles, vec![json!("new"), json!("mid"), json!("old")]);
}
