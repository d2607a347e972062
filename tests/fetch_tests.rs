use std::path::PathBuf;

use opennic_rank::fetch::{cached_report, report_path};
use opennic_rank::PoolError;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("opennic-rank-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn test_cached_report_fetches_then_reuses_the_dated_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("report body one"))
        .mount(&server)
        .await;

    let dir = scratch_dir("cache");
    let client = reqwest::Client::new();

    let body = cached_report(&client, &server.uri(), &dir, false)
        .await
        .unwrap();
    assert_eq!(body, "report body one");
    assert!(report_path(&dir).is_file());

    // Second call must come from the cache even though the origin changed.
    server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("report body two"))
        .mount(&server)
        .await;

    let body = cached_report(&client, &server.uri(), &dir, false)
        .await
        .unwrap();
    assert_eq!(body, "report body one");

    // Forcing bypasses the cache and rewrites it.
    let body = cached_report(&client, &server.uri(), &dir, true)
        .await
        .unwrap();
    assert_eq!(body, "report body two");
    assert_eq!(
        std::fs::read_to_string(report_path(&dir)).unwrap(),
        "report body two"
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_empty_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  \n"))
        .mount(&server)
        .await;

    let dir = scratch_dir("empty");
    let client = reqwest::Client::new();
    let err = cached_report(&client, &server.uri(), &dir, true)
        .await
        .unwrap_err();

    assert!(matches!(err, PoolError::EmptyReport));
    assert!(!report_path(&dir).is_file());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn test_http_error_status_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = scratch_dir("status");
    let client = reqwest::Client::new();
    let err = cached_report(&client, &server.uri(), &dir, true)
        .await
        .unwrap_err();

    assert!(matches!(err, PoolError::Network(_)));

    std::fs::remove_dir_all(&dir).unwrap();
}
