//! Burst trigger endpoint.
//!
//! Every HTTP method on `/` triggers a burst. The handler snapshots a
//! [`BurstPlan`] from the process config, runs it to completion, and only
//! then acknowledges with `{}`. The caller's patience is part of the
//! contract: a trigger takes as long as the burst window (longer if a
//! final request hangs), and callers that give up early take their burst
//! down with them.
//!
//! The trigger never reports burst problems to the caller. Transport
//! failures, a dead worker, even a sender that could not encode its
//! payload all end in the same `200` / `{}`; the log stream carries the
//! details.

use crate::server::burst::dispatcher::{BurstPlan, run_burst};
use crate::server::config::ControllerConfig;
use axum::{Json, Router, extract::State, routing::any};
use stampede_core::Ack;
use std::sync::Arc;

/// Shared state handed to the trigger handler.
#[derive(Clone)]
pub struct AppState {
    /// Immutable process configuration; each trigger snapshots from it.
    pub config: Arc<ControllerConfig>,
    /// One HTTP client for the whole process. Clones share the connection
    /// pool, so concurrent bursts reuse sockets instead of competing for
    /// fresh ones.
    pub client: reqwest::Client,
}

impl AppState {
    /// Builds the process state around `config`.
    ///
    /// The client carries no request timeout. The burst deadline is the
    /// only cutoff, and it must not abort in-flight requests.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config: Arc::new(config),
            client: reqwest::Client::new(),
        }
    }
}

/// Builds the controller router: every HTTP method on `/`.
pub fn app(state: AppState) -> Router {
    Router::new().route("/", any(trigger_burst)).with_state(state)
}

/// Runs one burst and blocks the caller until it completes.
///
/// Concurrent triggers run independent bursts with independent deadlines;
/// they share nothing but the client's connection pool.
#[tracing::instrument(skip_all)]
async fn trigger_burst(State(state): State<AppState>) -> Json<Ack> {
    let plan = BurstPlan::new(&state.config);
    run_burst(plan, state.client.clone()).await;
    Json(Ack {})
}
