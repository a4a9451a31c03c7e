//! Burst execution: one dispatcher fanning out to N sender loops.
//!
//! A burst runs against a single absolute deadline computed at trigger time
//! and ends only when every sender has terminated. The dispatcher owns the
//! shared [`CancellationToken`](tokio_util::sync::CancellationToken); the
//! senders poll it between requests.
//!
//! ## Structure
//!
//! - [`dispatcher`] - snapshots the plan, spawns the senders, joins them all.
//! - [`sender`] - the per-task send loop.

pub mod dispatcher;
pub mod sender;
