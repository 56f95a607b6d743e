//! End-to-end behaviour of the cache-backed fetch pipeline against a mock
//! documentation origin.

#![allow(clippy::unwrap_used, clippy::panic)]

use docfetch_core::{CacheRecord, CacheStore, Error, FetchPipeline, Fetcher, Page, PageExtractor};
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Y Page - Chart Docs</title><style>body { margin: 0 }</style></head>
<body>
  <header>Chart Docs</header>
  <nav><a href="/">Home</a><a href="/api">API</a></nav>
  <main>
    <h1>Y Page</h1>
    <p>The y page explains
       how things work.</p>
    <script>alert(1)</script>
    <p>Second paragraph.</p>
  </main>
  <footer>All rights reserved</footer>
</body>
</html>"#;

fn pipeline(server: &MockServer, cache_dir: &std::path::Path, ttl: i64) -> FetchPipeline {
    FetchPipeline::new(
        server.uri(),
        Fetcher::new().unwrap(),
        PageExtractor::new(15_000, "Chart Docs"),
        CacheStore::new(cache_dir, ttl),
    )
}

async fn mount_page(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/x/y"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HTML))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn first_get_fetches_once_and_second_get_is_served_from_cache() {
    let server = MockServer::start().await;
    mount_page(&server, 1).await;
    let temp = TempDir::new().unwrap();
    let pipeline = pipeline(&server, temp.path(), 3600);

    let first = pipeline.get("x/y").await.unwrap();
    assert!(pipeline.cache().record_path("x/y").exists());

    let second = pipeline.get("x/y").await.unwrap();
    assert_eq!(first, second);

    assert_eq!(first.title, "Y Page");
    assert_eq!(
        first.content,
        "Y Page\n\nThe y page explains how things work.\n\nSecond paragraph."
    );
    assert!(!first.content.contains("alert(1)"));
    assert!(!first.content.contains("All rights reserved"));
    assert_eq!(first.source_url, format!("{}/x/y", server.uri()));
}

#[tokio::test]
async fn cache_survives_a_new_pipeline_instance() {
    let server = MockServer::start().await;
    mount_page(&server, 1).await;
    let temp = TempDir::new().unwrap();

    let first = pipeline(&server, temp.path(), 3600).get("x/y").await.unwrap();
    let restarted = pipeline(&server, temp.path(), 3600).get("x/y").await.unwrap();
    assert_eq!(first, restarted);
}

#[tokio::test]
async fn error_status_fails_with_url_and_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let pipeline = pipeline(&server, temp.path(), 3600);

    let err = pipeline.get("x/y").await.unwrap_err();
    match &err {
        Error::RemoteFetch { url, status, .. } => {
            assert_eq!(url, &format!("{}/x/y", server.uri()));
            assert_eq!(*status, Some(500));
        },
        other => panic!("expected RemoteFetch, got {other:?}"),
    }
    assert!(err.to_string().contains("remote fetch failed"));
    assert!(!pipeline.cache().record_path("x/y").exists());
}

#[tokio::test]
async fn unreachable_origin_fails_with_url_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    // Nothing listens on port 1.
    let pipeline = FetchPipeline::new(
        "http://127.0.0.1:1",
        Fetcher::new().unwrap(),
        PageExtractor::default(),
        CacheStore::new(temp.path(), 3600),
    );

    let err = pipeline.get("x/y").await.unwrap_err();
    match &err {
        Error::RemoteFetch { url, status, .. } => {
            assert_eq!(url, "http://127.0.0.1:1/x/y");
            assert_eq!(*status, None);
        },
        other => panic!("expected RemoteFetch, got {other:?}"),
    }
    assert_eq!(err.category(), "remote_fetch");
    assert!(!pipeline.cache().record_path("x/y").exists());
}

#[tokio::test]
async fn stale_record_triggers_refetch_and_overwrite() {
    let server = MockServer::start().await;
    mount_page(&server, 1).await;
    let temp = TempDir::new().unwrap();
    let ttl = 60;
    let pipeline = pipeline(&server, temp.path(), ttl);

    let stale_at = chrono::Utc::now().timestamp_millis() - ttl * 1000 - 1;
    let old = Page::new("Old", "https://old.example.com/x/y", "outdated");
    pipeline
        .cache()
        .write_record("x/y", &CacheRecord::new(old, stale_at))
        .unwrap();

    let page = pipeline.get("x/y").await.unwrap();
    assert_eq!(page.title, "Y Page");
    assert_eq!(pipeline.cache().read("x/y"), Some(page));
}

#[tokio::test]
async fn fresh_record_is_served_without_network() {
    let server = MockServer::start().await;
    mount_page(&server, 0).await;
    let temp = TempDir::new().unwrap();
    let pipeline = pipeline(&server, temp.path(), 3600);

    let planted = Page::new("Planted", "https://docs.example.com/x/y", "from disk");
    assert!(pipeline.cache().write("x/y", &planted));

    assert_eq!(pipeline.get("x/y").await.unwrap(), planted);
}

#[tokio::test]
async fn disabled_cache_fetches_every_time_and_never_writes() {
    let server = MockServer::start().await;
    mount_page(&server, 2).await;
    let temp = TempDir::new().unwrap();
    let cache_dir = temp.path().join("cache");
    let pipeline = pipeline(&server, &cache_dir, 0);

    pipeline.get("x/y").await.unwrap();
    pipeline.get("x/y").await.unwrap();
    assert!(!cache_dir.exists());
}

#[tokio::test]
async fn unwritable_cache_does_not_fail_the_fetch() {
    let server = MockServer::start().await;
    mount_page(&server, 2).await;
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not-a-dir");
    std::fs::write(&blocker, b"occupied").unwrap();
    let pipeline = pipeline(&server, &blocker, 3600);

    let first = pipeline.get("x/y").await.unwrap();
    let second = pipeline.get("x/y").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn corrupt_record_is_treated_as_miss() {
    let server = MockServer::start().await;
    mount_page(&server, 1).await;
    let temp = TempDir::new().unwrap();
    let pipeline = pipeline(&server, temp.path(), 3600);
    std::fs::write(pipeline.cache().record_path("x/y"), b"\x00garbage").unwrap();

    let page = pipeline.get("x/y").await.unwrap();
    assert_eq!(page.title, "Y Page");
}

#[tokio::test]
async fn long_pages_are_truncated_to_the_cap() {
    let server = MockServer::start().await;
    let body = format!("<main><p>{}</p></main>", "lorem ipsum ".repeat(100));
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let pipeline = FetchPipeline::new(
        server.uri(),
        Fetcher::new().unwrap(),
        PageExtractor::new(50, "Chart Docs"),
        CacheStore::new(temp.path(), 3600),
    );

    let page = pipeline.get("long").await.unwrap();
    assert_eq!(page.content.chars().count(), 50);
    assert!(page.content.starts_with("lorem ipsum lorem"));
}
