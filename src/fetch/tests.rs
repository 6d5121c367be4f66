// Fetch module tests.

use super::*;
use crate::error_handling::MobileCheckError;
use httptest::{matchers::*, responders::*, Expectation, Server};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Fails the first `failures` calls, then answers 200.
struct FlakyFetcher {
    failures: u32,
    calls: AtomicU32,
}

#[async_trait]
impl HttpFetcher for FlakyFetcher {
    async fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            Err(FetchError::Other(format!("connection refused (call {call})")))
        } else {
            Ok(HttpResponse {
                status_code: 200,
                body: "<html></html>".to_string(),
                headers: HashMap::new(),
            })
        }
    }
}

fn flaky(failures: u32) -> FlakyFetcher {
    FlakyFetcher {
        failures,
        calls: AtomicU32::new(0),
    }
}

#[tokio::test]
async fn test_fetch_with_retry_succeeds_after_transient_failure() {
    let fetcher = flaky(1);
    let result = fetch_with_retry(&fetcher, "https://example.com", 2, Duration::ZERO).await;
    assert!(result.is_ok());
    assert_eq!(result.status_code, Some(200));
    assert_eq!(result.attempts, 2);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_fetch_with_retry_exhausted_keeps_last_message() {
    let fetcher = flaky(10);
    let result = fetch_with_retry(&fetcher, "https://example.com", 3, Duration::ZERO).await;
    assert!(!result.is_ok());
    assert_eq!(result.error.as_deref(), Some("connection refused (call 3)"));
    assert_eq!(result.attempts, 3);
    assert!(result.html.is_empty());
    assert_eq!(result.status_code, None);
}

/// Answers with a status line, then loses the body.
struct TruncatedBodyFetcher;

#[async_trait]
impl HttpFetcher for TruncatedBodyFetcher {
    async fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
        let source = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        Err(FetchError::UnreadableBody {
            status_code: 502,
            source,
        })
    }
}

#[tokio::test]
async fn test_fetch_with_retry_unreadable_body_keeps_status() {
    let result =
        fetch_with_retry(&TruncatedBodyFetcher, "https://example.com", 2, Duration::ZERO).await;
    assert!(!result.is_ok());
    assert_eq!(result.status_code, Some(502));
    assert_eq!(result.attempts, 2);
    assert!(result
        .error
        .as_deref()
        .is_some_and(|m| m.starts_with("HTTP 502: response body could not be read")));
}

#[tokio::test]
async fn test_fetch_with_retry_zero_attempts_means_one() {
    let fetcher = flaky(10);
    let result = fetch_with_retry(&fetcher, "https://example.com", 0, Duration::ZERO).await;
    assert_eq!(result.attempts, 1);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fetch_with_retry_waits_between_attempts() {
    let fetcher = flaky(1);
    let started = std::time::Instant::now();
    let result =
        fetch_with_retry(&fetcher, "https://example.com", 2, Duration::from_millis(50)).await;
    assert!(result.is_ok());
    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[tokio::test]
async fn test_reqwest_fetcher_error_status_is_a_response() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/missing")).respond_with(
            status_code(404)
                .insert_header("X-Test", "yes")
                .body("<html><title>Not found</title></html>"),
        ),
    );

    let fetcher = ReqwestFetcher::new(&AnalyzerSettings::default()).expect("client should build");
    let response = fetcher
        .get(&server.url("/missing").to_string())
        .await
        .expect("404 is still a response");
    assert_eq!(response.status_code, 404);
    assert!(response.body.contains("Not found"));
    assert_eq!(response.headers.get("x-test").map(String::as_str), Some("yes"));
}

#[tokio::test]
async fn test_reqwest_fetcher_sends_configured_user_agent() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/"),
            request::headers(contains(("user-agent", "radar-test/1.0"))),
        ])
        .respond_with(status_code(200).body("ok")),
    );

    let settings = AnalyzerSettings {
        user_agent: "radar-test/1.0".to_string(),
        ..AnalyzerSettings::default()
    };
    let fetcher = ReqwestFetcher::new(&settings).expect("client should build");
    let response = fetcher.get(&server.url("/").to_string()).await.unwrap();
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_reqwest_fetcher_connection_refused_is_error() {
    // Bind then drop to get a port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = ReqwestFetcher::new(&AnalyzerSettings::default()).unwrap();
    let result = fetcher.get(&format!("http://{addr}/")).await;
    assert!(matches!(result, Err(FetchError::Transport(_))));
}

#[tokio::test]
async fn test_mobile_checker_friendly_verdict() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/run"),
            request::query(url_decoded(contains(("key", "secret")))),
            request::body(json_decoded(eq(
                serde_json::json!({ "url": "https://example.com" })
            ))),
        ])
        .respond_with(json_encoded(
            serde_json::json!({ "mobileFriendliness": "MOBILE_FRIENDLY" }),
        )),
    );

    let checker = GoogleMobileChecker::new(reqwest::Client::new(), "secret")
        .with_endpoint(server.url("/run").to_string());
    assert!(checker.check("https://example.com").await.unwrap());
}

#[tokio::test]
async fn test_mobile_checker_not_friendly_verdict() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/run")).respond_with(json_encoded(
            serde_json::json!({ "mobileFriendliness": "NOT_MOBILE_FRIENDLY" }),
        )),
    );

    let checker = GoogleMobileChecker::new(reqwest::Client::new(), "secret")
        .with_endpoint(server.url("/run").to_string());
    assert!(!checker.check("https://example.com").await.unwrap());
}

#[tokio::test]
async fn test_mobile_checker_error_status() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/run"))
            .respond_with(status_code(403)),
    );

    let checker = GoogleMobileChecker::new(reqwest::Client::new(), "bad-key")
        .with_endpoint(server.url("/run").to_string());
    let err = checker.check("https://example.com").await.unwrap_err();
    assert!(matches!(err, MobileCheckError::Status(403)));
}
