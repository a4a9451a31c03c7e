//! End-to-end burst flow against a live in-process worker.
//!
//! The controller router is driven directly (no listener of its own); the
//! worker runs as a real server on an ephemeral loopback port, so requests
//! cross an actual TCP connection with real sleeps on the far side.

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode, header};
use axum::{Router, routing::any};
use clap::Parser;
use stampede_controller::server::burst::dispatcher::{BurstPlan, run_burst};
use stampede_controller::server::config::{CliArgs, ControllerConfig};
use stampede_controller::server::service::handler::{self, AppState};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tower::ServiceExt;

/// Starts a real worker server on an ephemeral port, returns its URL.
async fn spawn_worker() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stampede_worker::server::handler::app())
            .await
            .unwrap();
    });
    format!("http://{addr}/")
}

fn config_with(
    target: &str,
    concurrency: usize,
    duration_ms: u64,
    sleep_ms: u64,
) -> ControllerConfig {
    let args = CliArgs::parse_from([
        "stampede-controller".to_owned(),
        "--worker-address".to_owned(),
        target.to_owned(),
        "--burst-concurrency".to_owned(),
        concurrency.to_string(),
        "--burst-duration-ms".to_owned(),
        duration_ms.to_string(),
        "--worker-sleep-ms".to_owned(),
        sleep_ms.to_string(),
    ]);
    ControllerConfig::try_from(args).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn trigger_blocks_for_the_window_then_acknowledges() {
    let target = spawn_worker().await;
    let state = AppState::new(config_with(&target, 3, 200, 50));

    let start = Instant::now();
    let response = handler::app(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // The ack must not land before the window closes.
    assert!(start.elapsed() >= Duration::from_millis(200));
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_owned();
    assert!(content_type.starts_with("application/json"));
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"{}");
}

#[tokio::test(flavor = "multi_thread")]
async fn trigger_acknowledges_even_when_the_worker_is_down() {
    // Bind and drop a listener so the target actively refuses connections.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let state = AppState::new(config_with(&format!("http://{addr}/"), 2, 150, 50));
    let start = Instant::now();
    let response = handler::app(state)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // A dead worker changes nothing about the trigger contract: the burst
    // runs its full window and the caller still gets `{}`.
    assert!(start.elapsed() >= Duration::from_millis(150));
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"{}");
}

#[tokio::test(flavor = "multi_thread")]
async fn every_sender_reaches_the_worker() {
    let target = spawn_worker().await;
    let config = config_with(&target, 3, 200, 50);

    let report = run_burst(BurstPlan::new(&config), reqwest::Client::new()).await;

    // A 200 ms window over 50 ms sleeps leaves each sender room for several
    // round trips; at least one each is a safe floor.
    assert_eq!(report.senders.len(), 3);
    assert!(report.senders.iter().all(|s| s.sent >= 1));
    assert_eq!(report.failed(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn burst_payload_never_varies() {
    let bodies: Arc<Mutex<Vec<Vec<u8>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = bodies.clone();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let capture = Router::new().route(
        "/",
        any(move |body: Bytes| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(body.to_vec());
                "{}"
            }
        }),
    );
    tokio::spawn(async move {
        axum::serve(listener, capture).await.unwrap();
    });

    let config = config_with(&format!("http://{addr}/"), 2, 120, 35);
    run_burst(BurstPlan::new(&config), reqwest::Client::new()).await;

    let bodies = bodies.lock().unwrap();
    assert!(!bodies.is_empty());
    assert!(bodies.iter().all(|b| b == br#"{"sleep_ms":35}"#));
}
