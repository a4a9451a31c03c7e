use reqwest::header::CONTENT_TYPE;
use stampede_core::Work;
use tokio_util::sync::CancellationToken;

/// Per-sender accounting, returned when the loop terminates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SenderStats {
    /// Requests the transport delivered, regardless of HTTP status.
    pub sent: u64,
    /// Requests that failed in transport (refused, reset, DNS, TLS).
    pub failed: u64,
}

/// Sender task: POSTs `work` to `target` in a tight loop until cancelled.
///
/// The cancellation check is level-triggered and sits at the top of the
/// loop. An in-flight request is never raced against the deadline, so a
/// slow response defers this sender's exit until the request resolves.
///
/// This function is designed to be spawned as a Tokio task, one per unit of
/// burst concurrency.
///
/// # Arguments
///
/// - `sender_id`: Numeric identifier for this sender (used in logs).
/// - `client`: Shared HTTP client; cheap to clone, connections are pooled.
/// - `work`: The payload, identical for every request of the burst.
/// - `target`: The worker URL requests are POSTed to.
/// - `cancel`: Shared token cancelled at the burst deadline.
///
/// # Termination
///
/// - Cancellation observed at the top of the loop (the normal path).
/// - Payload encoding failure, which stops this sender only. The burst's
///   other senders keep running.
pub async fn sender_loop(
    sender_id: usize,
    client: reqwest::Client,
    work: Work,
    target: reqwest::Url,
    cancel: CancellationToken,
) -> SenderStats {
    tracing::trace!("Sender {sender_id} started");
    let mut stats = SenderStats::default();

    loop {
        if cancel.is_cancelled() {
            tracing::debug!("Quitting sender {sender_id}");
            break;
        }

        // Encoded fresh each iteration. The payload never changes, but
        // keeping serialization on the per-request path keeps its failure
        // handled where it occurs.
        let body = match work.to_wire() {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Sender {sender_id} failed to encode work: {e}");
                break;
            }
        };

        match client
            .post(target.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
        {
            Ok(response) => {
                // Any delivered status counts as sent; the body is dropped
                // unread.
                stats.sent += 1;
                tracing::debug!(
                    "Sender {sender_id} delivered a request ({})",
                    response.status()
                );
            }
            Err(e) => {
                // No backoff: the next attempt goes out immediately.
                stats.failed += 1;
                tracing::warn!("Sender {sender_id} request failed: {e}");
            }
        }
    }

    tracing::trace!("Sender {sender_id} stopped");
    stats
}
