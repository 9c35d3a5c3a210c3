//! services/api/tests/scripture.rs
//!
//! Tests the real `BibleApiAdapter` against an in-process stand-in for the
//! scripture API, checking the fallback chain and its failure modes query by
//! query.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};

use api_lib::adapters::BibleApiAdapter;
use devotional_core::ports::{PortError, ScriptureService};

//=========================================================================================
// Fake Scripture API
//=========================================================================================

struct FakeBibleApi {
    /// Every search query received, in order.
    queries: Mutex<Vec<String>>,
    /// References the fake has a passage for.
    known: Vec<String>,
    /// When set, every search answers 500.
    fail_with_500: bool,
}

async fn search_handler(
    State(api): State<Arc<FakeBibleApi>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<serde_json::Value>) {
    if headers.get("api-key").is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "message": "missing api-key" })),
        );
    }

    let query = params.get("query").cloned().unwrap_or_default();
    api.queries.lock().unwrap().push(query.clone());

    if api.fail_with_500 {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "message": "boom" })),
        );
    }

    let passages: Vec<serde_json::Value> = if api.known.contains(&query) {
        vec![serde_json::json!({
            "reference": query,
            "content": format!("Text of {}", query),
        })]
    } else {
        Vec::new()
    };
    (
        StatusCode::OK,
        Json(serde_json::json!({ "data": { "passages": passages } })),
    )
}

/// Binds the fake on an ephemeral port and returns its base URL plus a handle
/// for inspecting the queries it received. Routing the bible id as a literal
/// makes a request for any other bible a 404.
async fn spawn_fake_api(known: &[&str], fail_with_500: bool) -> (String, Arc<FakeBibleApi>) {
    let api = Arc::new(FakeBibleApi {
        queries: Mutex::new(Vec::new()),
        known: known.iter().map(|s| s.to_string()).collect(),
        fail_with_500,
    });

    let router = Router::new()
        .route("/bibles/TEST/search", get(search_handler))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (base_url, api)
}

fn adapter_for(base_url: &str) -> BibleApiAdapter {
    BibleApiAdapter::new(
        reqwest::Client::new(),
        base_url.to_string(),
        "TEST".to_string(),
        Some("test-key".to_string()),
    )
}

//=========================================================================================
// Tests
//=========================================================================================

#[tokio::test]
async fn an_exact_reference_resolves_in_one_query() {
    let (url, api) = spawn_fake_api(&["Psalm 23:1"], false).await;

    // Whitespace is normalized before the first query.
    let passage = adapter_for(&url)
        .fetch_passage(" Psalm   23:1 ")
        .await
        .unwrap();

    assert_eq!(passage.reference, "Psalm 23:1");
    assert_eq!(passage.content, "Text of Psalm 23:1");
    assert_eq!(*api.queries.lock().unwrap(), ["Psalm 23:1"]);
}

#[tokio::test]
async fn an_unknown_reference_widens_to_chapter_then_default() {
    let (url, api) = spawn_fake_api(&["John 3:16"], false).await;

    let passage = adapter_for(&url).fetch_passage("Ezekiel 99:99").await.unwrap();

    assert_eq!(passage.reference, "John 3:16");
    assert_eq!(
        *api.queries.lock().unwrap(),
        ["Ezekiel 99:99", "Ezekiel 99:1", "John 3:16"]
    );
}

#[tokio::test]
async fn the_chapter_fallback_short_circuits_the_default() {
    let (url, api) = spawn_fake_api(&["Ezekiel 34:1"], false).await;

    let passage = adapter_for(&url)
        .fetch_passage("Ezekiel 34:11-16")
        .await
        .unwrap();

    assert_eq!(passage.reference, "Ezekiel 34:1");
    assert_eq!(
        *api.queries.lock().unwrap(),
        ["Ezekiel 34:11-16", "Ezekiel 34:1"]
    );
}

#[tokio::test]
async fn the_default_reference_is_not_queried_twice() {
    let (url, api) = spawn_fake_api(&[], false).await;

    // Looking up the default itself must not append a duplicate third query.
    let err = adapter_for(&url).fetch_passage("John 3:16").await.unwrap_err();

    assert!(matches!(err, PortError::Upstream(_)));
    assert_eq!(*api.queries.lock().unwrap(), ["John 3:16", "John 3:1"]);
}

#[tokio::test]
async fn an_exhausted_chain_is_an_upstream_error() {
    let (url, api) = spawn_fake_api(&[], false).await;

    let err = adapter_for(&url)
        .fetch_passage("Ezekiel 99:99")
        .await
        .unwrap_err();

    match err {
        PortError::Upstream(message) => assert!(message.contains("Ezekiel 99:99")),
        other => panic!("expected an upstream error, got {:?}", other),
    }
    assert_eq!(api.queries.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn an_http_failure_aborts_the_chain() {
    let (url, api) = spawn_fake_api(&["John 3:16"], true).await;

    let err = adapter_for(&url)
        .fetch_passage("Ezekiel 99:99")
        .await
        .unwrap_err();

    assert!(matches!(err, PortError::Upstream(_)));
    // No widening after a failed request; the error surfaces immediately.
    assert_eq!(api.queries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn a_missing_api_key_fails_before_any_request() {
    let (url, api) = spawn_fake_api(&["John 3:16"], false).await;

    let adapter = BibleApiAdapter::new(
        reqwest::Client::new(),
        url,
        "TEST".to_string(),
        None,
    );
    let err = adapter.fetch_passage("John 3:16").await.unwrap_err();

    assert!(matches!(err, PortError::Upstream(_)));
    assert!(api.queries.lock().unwrap().is_empty());
}
