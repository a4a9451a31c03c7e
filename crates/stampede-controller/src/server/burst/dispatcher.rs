//! Burst dispatch and completion barrier.
//!
//! This module defines [`BurstPlan`], the immutable snapshot a trigger takes
//! of the process configuration, and [`run_burst`], which turns a plan into
//! N concurrent [`sender_loop`] tasks sharing one [`CancellationToken`].
//!
//! Two properties the rest of the system leans on:
//!
//! - The deadline is computed exactly once, when the plan is built. Nothing
//!   extends it: not failures, not slow responses, not a second trigger.
//! - [`run_burst`] returns only after every spawned sender has terminated.
//!   The trigger response rides on that barrier, so "the controller
//!   answered" always means "the burst is over".

use crate::server::burst::sender::{SenderStats, sender_loop};
use crate::server::config::ControllerConfig;
use core::time::Duration;
use stampede_core::Work;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Immutable description of one burst, snapshotted at trigger time.
///
/// Building the plan is the only moment configuration is read. A config
/// change (a process restart) between triggers changes the next burst, but
/// a running burst is never affected.
#[derive(Clone, Debug)]
pub struct BurstPlan {
    /// Payload every sender POSTs, identical for the whole burst.
    pub work: Work,
    /// URL the senders POST to.
    pub target: reqwest::Url,
    /// Number of senders to spawn.
    pub concurrency: usize,
    /// Absolute cutoff for starting new requests.
    pub deadline: Instant,
    /// Window length, kept for logging.
    pub duration: Duration,
}

impl BurstPlan {
    /// Snapshots a plan from the process configuration.
    ///
    /// The deadline anchors to "now": triggers that arrive later get later
    /// deadlines, and concurrent bursts each carry their own.
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            work: Work::new(config.worker_sleep_ms),
            target: config.worker_url.clone(),
            concurrency: config.burst_concurrency,
            deadline: Instant::now() + config.burst_duration,
            duration: config.burst_duration,
        }
    }
}

/// Outcome of a completed burst: one entry per spawned sender.
#[derive(Debug, Default)]
pub struct BurstReport {
    /// Per-sender accounting, in spawn order.
    pub senders: Vec<SenderStats>,
}

impl BurstReport {
    /// Total requests delivered across all senders.
    pub fn sent(&self) -> u64 {
        self.senders.iter().map(|s| s.sent).sum()
    }

    /// Total transport failures across all senders.
    pub fn failed(&self) -> u64 {
        self.senders.iter().map(|s| s.failed).sum()
    }
}

/// Runs one burst to completion and reports what happened.
///
/// Spawns `plan.concurrency` senders plus a watchdog that cancels the
/// shared token at the deadline, then blocks on the full set of sender
/// handles. A sender that dies early (encode failure, panic) still counts
/// toward the barrier; the remaining senders run out the window.
///
/// If the returned future is dropped before completion (the trigger caller
/// went away), the guard cancels the token and the orphaned senders wind
/// down on their next check.
pub async fn run_burst(plan: BurstPlan, client: reqwest::Client) -> BurstReport {
    tracing::info!(
        "Creating a burst of {} senders for {:?}",
        plan.concurrency,
        plan.duration
    );

    let cancel = CancellationToken::new();
    let _abort_guard = cancel.clone().drop_guard();

    let watchdog = {
        let cancel = cancel.clone();
        let deadline = plan.deadline;
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            cancel.cancel();
        })
    };

    let mut handles = Vec::with_capacity(plan.concurrency);
    for sender_id in 0..plan.concurrency {
        handles.push(tokio::spawn(sender_loop(
            sender_id,
            client.clone(),
            plan.work,
            plan.target.clone(),
            cancel.clone(),
        )));
    }

    // The barrier: every spawned handle is joined, nothing is select!-ed
    // away. With zero senders this resolves immediately.
    let mut report = BurstReport::default();
    for (sender_id, joined) in futures::future::join_all(handles)
        .await
        .into_iter()
        .enumerate()
    {
        match joined {
            Ok(stats) => report.senders.push(stats),
            Err(e) => {
                tracing::error!("Sender {sender_id} task failed: {e}");
                report.senders.push(SenderStats::default());
            }
        }
    }

    // All senders are gone; the deadline timer has nothing left to cancel.
    watchdog.abort();

    tracing::info!(
        "Done bursting traffic to workers: {} sent, {} failed",
        report.sent(),
        report.failed()
    );
    report
}
