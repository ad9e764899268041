//! Live Round-Trip Tests
//!
//! Exercises the real HTTP transport end to end against an in-process
//! fake engine: an axum server holding documents in a map and answering
//! the store's wire protocol (fetch envelopes, bulk pairs, count scalars,
//! search result sets). Every test spins up its own server.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::runtime::Runtime;
use typesearch::{Document, Engine, QueryBuilder};

// =============================================================================
// Fixture Document
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct WarehouseItem {
    sku: String,
    stock: u64,
    unit_price: f64,
    restocked_at: DateTime<Utc>,
}

impl Document for WarehouseItem {
    fn key(&self) -> String {
        self.sku.clone()
    }
}

fn item(sku: &str, stock: u64, unit_price: f64) -> WarehouseItem {
    WarehouseItem {
        sku: sku.to_string(),
        stock,
        unit_price,
        restocked_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
    }
}

/// Probe carrying only the key, for in-place fetches.
fn probe(sku: &str) -> WarehouseItem {
    item(sku, 0, 0.0)
}

// =============================================================================
// Fake Engine
// =============================================================================

type Store = Arc<Mutex<BTreeMap<String, Value>>>;

fn doc_key(tpath: &str, key: &str) -> String {
    format!("{}/{}", tpath, key)
}

async fn create_index() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"acknowledged": true})))
}

async fn index_stats() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"indices": {}})))
}

async fn put_doc(
    State(store): State<Store>,
    Path((tpath, key)): Path<(String, String)>,
    body: String,
) -> impl IntoResponse {
    let doc: Value = serde_json::from_str(&body).unwrap();
    store.lock().unwrap().insert(doc_key(&tpath, &key), doc);
    (StatusCode::CREATED, Json(json!({"created": true})))
}

async fn get_doc(
    State(store): State<Store>,
    Path((tpath, key)): Path<(String, String)>,
) -> impl IntoResponse {
    match store.lock().unwrap().get(&doc_key(&tpath, &key)) {
        Some(doc) => (
            StatusCode::OK,
            Json(json!({
                "_index": "store",
                "_type": tpath,
                "_id": key,
                "_version": 1,
                "found": true,
                "_source": doc
            })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "_index": "store",
                "_type": tpath,
                "_id": key,
                "found": false
            })),
        ),
    }
}

async fn update_doc(
    State(store): State<Store>,
    Path((tpath, key)): Path<(String, String)>,
    body: String,
) -> impl IntoResponse {
    let patch: Value = serde_json::from_str(&body).unwrap();
    let mut store = store.lock().unwrap();
    match store.get_mut(&doc_key(&tpath, &key)) {
        Some(doc) => {
            if let (Some(fields), Some(patch_fields)) =
                (doc.as_object_mut(), patch["doc"].as_object())
            {
                for (name, value) in patch_fields {
                    fields.insert(name.clone(), value.clone());
                }
            }
            (StatusCode::OK, Json(json!({"ok": true})))
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"ok": false}))),
    }
}

async fn delete_doc(
    State(store): State<Store>,
    Path((tpath, key)): Path<(String, String)>,
) -> impl IntoResponse {
    match store.lock().unwrap().remove(&doc_key(&tpath, &key)) {
        Some(_) => (StatusCode::OK, Json(json!({"found": true}))),
        None => (StatusCode::NOT_FOUND, Json(json!({"found": false}))),
    }
}

async fn bulk_docs(
    State(store): State<Store>,
    Path(tpath): Path<String>,
    body: String,
) -> impl IntoResponse {
    let mut lines = body.lines();
    let mut store = store.lock().unwrap();
    while let (Some(action), Some(doc)) = (lines.next(), lines.next()) {
        let action: Value = serde_json::from_str(action).unwrap();
        let id = action["index"]["_id"].as_str().unwrap().to_string();
        let doc: Value = serde_json::from_str(doc).unwrap();
        store.insert(doc_key(&tpath, &id), doc);
    }
    (StatusCode::OK, Json(json!({"took": 1, "errors": false})))
}

async fn count_docs(State(store): State<Store>, Path(tpath): Path<String>) -> impl IntoResponse {
    let prefix = format!("{}/", tpath);
    let count = store
        .lock()
        .unwrap()
        .keys()
        .filter(|key| key.starts_with(&prefix))
        .count();
    (
        StatusCode::OK,
        Json(json!({
            "count": count,
            "_shards": {"total": 5, "successful": 5, "failed": 0}
        })),
    )
}

/// Matches everything under the path; the fake does not evaluate queries.
async fn search_docs(State(store): State<Store>, Path(tpath): Path<String>) -> impl IntoResponse {
    let prefix = format!("{}/", tpath);
    let store = store.lock().unwrap();
    let hits: Vec<Value> = store
        .iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .map(|(key, doc)| json!({"_id": &key[prefix.len()..], "_source": doc}))
        .collect();
    (
        StatusCode::OK,
        Json(json!({
            "took": 1,
            "hits": {"total": hits.len(), "hits": hits}
        })),
    )
}

fn fake_engine() -> Router {
    let store: Store = Arc::new(Mutex::new(BTreeMap::new()));
    Router::new()
        .route("/store/", put(create_index))
        .route("/store/_stats", get(index_stats))
        .route("/store/:tpath/_search", get(search_docs))
        .route("/store/:tpath/_count", get(count_docs))
        .route("/store/:tpath/_bulk", post(bulk_docs))
        .route(
            "/store/:tpath/:key",
            put(put_doc).get(get_doc).delete(delete_doc),
        )
        .route("/store/:tpath/:key/_update", post(update_doc))
        .with_state(store)
}

/// Boots a fake engine on a random port and connects a handle to it. The
/// runtime must stay alive for the duration of the test.
fn start_engine() -> (Runtime, Engine) {
    let runtime = Runtime::new().unwrap();
    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();
    runtime.spawn(async move {
        axum::serve(listener, fake_engine()).await.unwrap();
    });
    let engine = Engine::connect(&format!("http://{}/store", addr)).unwrap();
    (runtime, engine)
}

// =============================================================================
// Round Trips
// =============================================================================

#[test]
fn insert_then_get_yields_an_equal_object() {
    let (_runtime, engine) = start_engine();
    let stored = item("SKU-1", 30, 18.5);
    engine.insert(&stored).unwrap();

    let mut fetched = probe("SKU-1");
    let found = engine.get(&mut fetched).unwrap();
    assert!(found);
    assert_eq!(fetched, stored);
}

#[test]
fn update_then_get_reflects_the_new_values() {
    let (_runtime, engine) = start_engine();
    let mut stored = item("SKU-1", 30, 18.5);
    engine.insert(&stored).unwrap();

    stored.unit_price += 12.25;
    stored.stock = 7;
    engine.update(&stored).unwrap();

    let mut fetched = probe("SKU-1");
    assert!(engine.get(&mut fetched).unwrap());
    assert_eq!(fetched, stored);
}

#[test]
fn delete_then_get_reports_not_found() {
    let (_runtime, engine) = start_engine();
    let stored = item("SKU-1", 30, 18.5);
    engine.insert(&stored).unwrap();
    engine.delete(&stored).unwrap();

    let mut fetched = probe("SKU-1");
    assert!(!engine.get(&mut fetched).unwrap());
}

#[test]
fn get_of_a_never_inserted_key_reports_not_found() {
    let (_runtime, engine) = start_engine();
    let mut fetched = probe("SKU-404");
    assert!(!engine.get(&mut fetched).unwrap());
}

#[test]
fn count_sees_every_inserted_document() {
    let (_runtime, engine) = start_engine();
    for sku in ["SKU-1", "SKU-2", "SKU-3"] {
        engine.insert(&item(sku, 1, 1.0)).unwrap();
    }
    assert_eq!(engine.count(&probe("any")).unwrap(), 3);
}

#[test]
fn bulk_insert_then_search_rehydrates_every_document() {
    let (_runtime, engine) = start_engine();
    let items = vec![item("SKU-1", 3, 9.99), item("SKU-2", 5, 24.0)];
    engine.bulk_insert(&items).unwrap();

    let results = engine.search(&probe("any"), None).unwrap();
    assert_eq!(results.total, 2);
    assert_eq!(results.hits.len(), 2);
    assert_eq!(results.hits[0].id, "SKU-1");
    assert_eq!(results.hits[0].object, items[0]);
    assert_eq!(results.hits[1].object, items[1]);
}

#[test]
fn search_with_a_built_query_round_trips() {
    let (_runtime, engine) = start_engine();
    engine.insert(&item("SKU-1", 3, 9.99)).unwrap();

    let query = QueryBuilder::new().set_term("sku", "SKU-1").limit(5);
    let results = engine.search(&probe("any"), Some(&query)).unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.hits[0].object.sku, "SKU-1");
}
