use httpmock::prelude::*;
use std::time::Duration;
use url::Url;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::tools::fetch::headers::browser_headers;
use crate::tools::fetch::{Fetcher, HttpFetcher};

fn fetcher(config: FetchConfig) -> HttpFetcher {
    HttpFetcher::new(config).expect("client builds")
}

fn url(server: &MockServer, path: &str) -> Url {
    Url::parse(&server.url(path)).expect("mock url parses")
}

#[test]
fn browser_headers_carry_user_agent() {
    let headers = browser_headers("TestAgent/1.0");
    assert_eq!(
        headers.get("user-agent").and_then(|v| v.to_str().ok()),
        Some("TestAgent/1.0")
    );
    assert!(headers.contains_key("accept-language"));
}

#[tokio::test]
async fn fetch_returns_page_with_metadata() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/soup");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body("<html><body><h1>Soup</h1></body></html>");
    });

    let page = fetcher(FetchConfig::default())
        .fetch(&url(&server, "/soup"))
        .await
        .expect("fetch succeeds");
    mock.assert();

    assert!(page.html.contains("<h1>Soup</h1>"));
    assert_eq!(page.final_url, server.url("/soup"));
    assert!(page.content_type.starts_with("text/html"));
}

#[tokio::test]
async fn non_success_status_is_http_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404).body("not here");
    });

    let err = fetcher(FetchConfig::default())
        .fetch(&url(&server, "/missing"))
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::HttpError { status: 404 });
}

#[tokio::test]
async fn redirects_are_followed_and_final_url_recorded() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/old");
        then.status(301).header("location", server.url("/new"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/new");
        then.status(200).body("<html>moved</html>");
    });

    let page = fetcher(FetchConfig::default())
        .fetch(&url(&server, "/old"))
        .await
        .expect("redirect followed");
    assert_eq!(page.url, server.url("/old"));
    assert_eq!(page.final_url, server.url("/new"));
}

#[tokio::test]
async fn redirect_chain_over_the_limit_fails() {
    let server = MockServer::start();
    // Six hops: /hop0 -> /hop1 -> ... -> /hop6
    for i in 0..6 {
        let next = server.url(format!("/hop{}", i + 1));
        server.mock(move |when, then| {
            when.method(GET).path(format!("/hop{i}"));
            then.status(302).header("location", next);
        });
    }
    server.mock(|when, then| {
        when.method(GET).path("/hop6");
        then.status(200).body("<html>too far</html>");
    });

    let err = fetcher(FetchConfig::default())
        .fetch(&url(&server, "/hop0"))
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::TooManyRedirects { limit: 5 });
}

#[tokio::test]
async fn redirect_chain_at_the_limit_is_followed() {
    let server = MockServer::start();
    // Five hops: /hop0 -> ... -> /hop5
    for i in 0..5 {
        let next = server.url(format!("/hop{}", i + 1));
        server.mock(move |when, then| {
            when.method(GET).path(format!("/hop{i}"));
            then.status(302).header("location", next);
        });
    }
    server.mock(|when, then| {
        when.method(GET).path("/hop5");
        then.status(200).body("<html>made it</html>");
    });

    let page = fetcher(FetchConfig::default())
        .fetch(&url(&server, "/hop0"))
        .await
        .unwrap();
    assert_eq!(page.final_url, server.url("/hop5"));
    assert!(page.html.contains("made it"));
}

#[tokio::test]
async fn oversized_body_is_too_large() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/huge");
        then.status(200).body("x".repeat(4096));
    });

    let config = FetchConfig {
        max_body_bytes: 1024,
        ..FetchConfig::default()
    };
    let err = fetcher(config)
        .fetch(&url(&server, "/huge"))
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::TooLarge { limit: 1024 });
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow");
        then.status(200)
            .delay(Duration::from_millis(1500))
            .body("<html>late</html>");
    });

    let config = FetchConfig {
        timeout_ms: 200,
        ..FetchConfig::default()
    };
    let err = fetcher(config)
        .fetch(&url(&server, "/slow"))
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::Timeout);
}

#[tokio::test]
async fn latin1_body_is_decoded() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/latin");
        then.status(200)
            .header("content-type", "text/html; charset=iso-8859-1")
            .body(b"<p>cr\xe8me br\xfbl\xe9e</p>".to_vec());
    });

    let page = fetcher(FetchConfig::default())
        .fetch(&url(&server, "/latin"))
        .await
        .expect("fetch succeeds");
    assert!(page.html.contains("crème brûlée"));
}
