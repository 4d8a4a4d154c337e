use super::*;
use anyhow::Result;
use axum::{
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::{net::TcpListener, sync::mpsc};

async fn spawn_server(app: Router) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

/// Echoes the received `email` header back and records it.
async fn spawn_films_server() -> Result<(String, mpsc::UnboundedReceiver<Option<String>>)> {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new().route(
        "/films",
        get(move |headers: HeaderMap| {
            let tx = tx.clone();
            async move {
                let email = headers
                    .get("email")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                let _ = tx.send(email.clone());
                match email {
                    Some(_) => (
                        StatusCode::OK,
                        Json(json!([{ "title": "Dune", "releaseYear": 2021, "isWatched": true }])),
                    ),
                    None => (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "errors": [{ "location": "headers", "param": "email" }] })),
                    ),
                }
            }
        }),
    );
    Ok((spawn_server(app).await?, rx))
}

fn transport_for(base_url: &str) -> HttpTransport {
    HttpTransport::new(&ClientConfig::new(base_url)).expect("transport")
}

#[tokio::test]
async fn fetch_items_attaches_email_header_when_identity_present() {
    let (base_url, mut seen) = spawn_films_server().await.expect("spawn server");
    let transport = transport_for(&base_url);
    let identity = Identity::new("Alice", "alice@example.com").expect("identity");

    let raw = transport
        .fetch_items(Some(&identity))
        .await
        .expect("fetch");

    assert_eq!(seen.recv().await.expect("request"), Some("alice@example.com".to_string()));
    assert_eq!(raw.status, 200);
    assert!(raw.is_success());
    assert_eq!(raw.body[0]["title"], "Dune");
}

#[tokio::test]
async fn fetch_items_without_identity_sends_no_header_and_returns_failure_body() {
    let (base_url, mut seen) = spawn_films_server().await.expect("spawn server");
    let transport = transport_for(&base_url);

    let raw = transport.fetch_items(None).await.expect("fetch");

    assert_eq!(seen.recv().await.expect("request"), None);
    assert_eq!(raw.status, 400);
    assert!(!raw.is_success());
    assert_eq!(raw.body["errors"][0]["param"], "email");
}

#[tokio::test]
async fn fetch_items_maps_non_json_body_to_null() {
    let app = Router::new().route(
        "/films",
        get(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").into_response() }),
    );
    let base_url = spawn_server(app).await.expect("spawn server");

    let raw = transport_for(&base_url)
        .fetch_items(None)
        .await
        .expect("fetch");

    assert_eq!(raw.status, 502);
    assert_eq!(raw.body, Value::Null);
}

#[tokio::test]
async fn fetch_items_rejects_email_unfit_for_a_header() {
    let transport = transport_for("http://127.0.0.1:9");
    let identity = Identity::new("Alice", "alice@example.com\r\nx: y").expect("identity");

    let err = transport
        .fetch_items(Some(&identity))
        .await
        .expect_err("header must be rejected");
    assert!(matches!(err, TransportError::InvalidEmailHeader(_)));
}

#[tokio::test]
async fn probe_succeeds_on_any_completed_response() {
    let app = Router::new().route(
        "/ping",
        post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let base_url = spawn_server(app).await.expect("spawn server");

    transport_for(&base_url)
        .probe_connectivity(&CancellationToken::new())
        .await
        .expect("a 503 still proves the network works");
}

#[tokio::test]
async fn probe_fails_when_nothing_listens() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = transport_for(&format!("http://{addr}"))
        .probe_connectivity(&CancellationToken::new())
        .await
        .expect_err("connection refused");
    match err {
        TransportError::Request { url, .. } => assert_eq!(url, format!("http://{addr}/ping")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn probe_honours_cancellation() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = transport_for("http://127.0.0.1:9")
        .probe_connectivity(&cancel)
        .await
        .expect_err("cancelled");
    assert!(matches!(err, TransportError::Cancelled));
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let app = Router::new().route(
        "/api/films",
        get(|| async { Json(json!([])) }),
    );
    let base_url = spawn_server(app).await.expect("spawn server");
    let transport = transport_for(&format!("{base_url}/api/"));
    assert_eq!(transport.base_url(), format!("{base_url}/api"));

    let raw = transport.fetch_items(None).await.expect("fetch");
    assert_eq!(raw.status, 200);
    assert_eq!(raw.body, json!([]));
}
