//! Root-path sleep-and-acknowledge endpoint.
//!
//! The worker's entire HTTP surface is one route: every method on `/`
//! decodes the request body as a [`Work`] payload, sleeps the requested
//! duration, and acknowledges with `{}`. The handler never returns an error
//! status. An undecodable body means a default-length sleep, not a `400`,
//! so a misbehaving load source degrades into default traffic instead of a
//! rejected burst.

use axum::{Json, Router, body::Bytes, extract::DefaultBodyLimit, routing::any};
use stampede_core::{Ack, Work};

/// Builds the worker router: every HTTP method on `/`.
///
/// The default body-size cap is lifted so an oversized payload falls
/// through to the decode fallback instead of a `413`.
pub fn app() -> Router {
    Router::new()
        .route("/", any(handle_work))
        .layer(DefaultBodyLimit::disable())
}

/// Decodes the payload, sleeps, acknowledges.
///
/// The sleep holds this request's connection open for its full length,
/// which is the point: the worker is a stand-in for a slow upstream.
async fn handle_work(body: Bytes) -> Json<Ack> {
    let work = Work::decode_or_default(&body);
    tracing::debug!("Sleeping for {:?}", work.sleep_duration());
    tokio::time::sleep(work.sleep_duration()).await;
    Json(Ack {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use std::time::Instant;
    use tower::ServiceExt;

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn sleeps_at_least_the_requested_duration() {
        let start = Instant::now();
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::from(r#"{"sleep_ms": 40}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(start.elapsed().as_millis() >= 40);
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_owned();
        assert!(content_type.starts_with("application/json"));
        assert_eq!(body_bytes(response).await, b"{}");
    }

    #[tokio::test]
    async fn empty_body_sleeps_the_default() {
        let start = Instant::now();
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(start.elapsed().as_millis() >= 250);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"{}");
    }

    #[tokio::test]
    async fn malformed_body_is_acknowledged_not_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::from("definitely not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"{}");
    }

    #[tokio::test]
    async fn oversized_body_is_acknowledged_not_rejected() {
        // Well past the 2 MB extractor default that would otherwise 413.
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::from(vec![b'x'; 3 * 1024 * 1024]))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"{}");
    }

    #[tokio::test]
    async fn any_method_is_accepted() {
        for method in ["GET", "PUT", "DELETE", "PATCH"] {
            let response = app()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri("/")
                        .body(Body::from(r#"{"sleep_ms": 1}"#))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn unknown_path_is_not_served() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/elsewhere")
                    .body(Body::from(r#"{"sleep_ms": 1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
