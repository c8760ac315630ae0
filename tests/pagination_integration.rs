//! Integration tests using mock HTTP server
//!
//! Tests the full stack: reqwest transport → deadline → retries → cursor stream

use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tidpage::{Cursor, Error, PageQuery, PageRequest, Pager, PaginationConfig, RetryObserver};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_config(max_retries: u32) -> PaginationConfig {
    PaginationConfig::builder()
        .max_retries(max_retries)
        .retry_delay(Duration::from_millis(5))
        .request_timeout(Duration::from_millis(500))
        .page_delay(Duration::from_millis(5))
        .build()
        .unwrap()
}

#[derive(Default)]
struct CountingObserver {
    retries: AtomicU32,
    exhausted: AtomicU32,
}

impl RetryObserver for CountingObserver {
    fn on_retry(&self, _request: &PageRequest, _error: &Error, _delay: Duration) {
        self.retries.fetch_add(1, Ordering::SeqCst);
    }

    fn on_exhausted(&self, _request: &PageRequest, _error: &Error) {
        self.exhausted.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_paginate_follows_trailing_ids_until_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trades"))
        .and(query_param("tid", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"tid": 99, "type": "sell", "price": 288000, "amount": 0.06},
            {"tid": 100, "type": "buy", "price": 240000, "amount": 0.00092788}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/trades"))
        .and(query_param("tid", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"tid": 200, "type": "buy", "price": 241000, "amount": 0.5}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/trades"))
        .and(query_param("tid", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pager = Pager::http(fast_config(2)).unwrap();
    let mut stream = pager.paginate(PageQuery::new(
        format!("{}/api/trades", mock_server.uri()),
        1u64,
    ));

    let mut pages = Vec::new();
    while let Some(page) = stream.next().await {
        pages.push(page.unwrap());
    }

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].len(), 2);
    assert_eq!(pages[1].records()[0]["tid"], 200);
    assert_eq!(stream.records_yielded(), 3);
}

#[tokio::test]
async fn test_paginate_with_separate_query_param_and_id_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("after", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "name": "a"},
            {"id": 12, "name": "b"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("after", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = PaginationConfig::builder()
        .cursor_param("after")
        .id_field("id")
        .page_delay(Duration::from_millis(5))
        .build()
        .unwrap();
    let pager = Pager::http(config).unwrap();
    let mut stream = pager.paginate(PageQuery::new(mock_server.uri(), 0u64));

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.len(), 2);
    assert!(stream.next().await.is_none());
    assert_eq!(stream.pages_yielded(), 1);
}

#[tokio::test]
async fn test_paginate_surfaces_terminal_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("tid", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"tid": 2}])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("tid", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let pager = Pager::http(fast_config(2)).unwrap();
    let mut stream = pager.paginate(PageQuery::new(mock_server.uri(), 1u64));

    assert!(stream.next().await.unwrap().is_ok());

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, Error::RetriesExhausted { attempts: 2, .. }));
    assert!(matches!(
        err.root_cause(),
        Error::HttpStatus { status: 500, .. }
    ));

    assert!(stream.next().await.is_none());
}

// ============================================================================
// Single page fetch
// ============================================================================

#[tokio::test]
async fn test_fetch_page_retries_until_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("tid", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"tid": 43}])))
        .with_priority(2)
        .mount(&mock_server)
        .await;

    let observer = Arc::new(CountingObserver::default());
    let pager = Pager::http(fast_config(4))
        .unwrap()
        .with_observer(Arc::clone(&observer));

    let page = pager
        .fetch_page(&PageQuery::new(mock_server.uri(), 42u64))
        .await
        .unwrap();

    assert_eq!(page.trailing_id("tid"), Some(Cursor::from(43u64)));
    assert_eq!(observer.retries.load(Ordering::SeqCst), 2);
    assert_eq!(observer.exhausted.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fetch_page_times_out_slow_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"tid": 1}]))
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&mock_server)
        .await;

    let config = PaginationConfig::builder()
        .max_retries(2)
        .retry_delay(Duration::from_millis(5))
        .request_timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let observer = Arc::new(CountingObserver::default());
    let pager = Pager::http(config)
        .unwrap()
        .with_observer(Arc::clone(&observer));

    let err = pager
        .fetch_page(&PageQuery::new(mock_server.uri(), 0u64))
        .await
        .unwrap_err();

    assert!(err.root_cause().is_timeout());
    assert_eq!(observer.retries.load(Ordering::SeqCst), 1);
    assert_eq!(observer.exhausted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fetch_page_empty_body_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let pager = Pager::http(fast_config(1)).unwrap();
    let err = pager
        .fetch_page(&PageQuery::new(mock_server.uri(), 0u64))
        .await
        .unwrap_err();

    assert!(matches!(err.root_cause(), Error::EmptyBody { .. }));
    assert!(err.root_cause().is_transport());
}

#[tokio::test]
async fn test_fetch_raw_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "ok"})))
        .mount(&mock_server)
        .await;

    let pager = Pager::http(PaginationConfig::default()).unwrap();
    let body = pager
        .fetch_raw(&PageQuery::new(mock_server.uri(), 1u64))
        .await
        .unwrap();

    assert_eq!(body, json!({"result": "ok"}));
    assert_eq!(pager.config().max_retries, 4);
}
