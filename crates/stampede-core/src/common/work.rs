//! # Work Payload and Acknowledgment Types
//!
//! This module defines the wire contract between the controller and the
//! worker. Both sides link it so the payload layout is a single, compile-time
//! definition rather than two JSON schemas kept in sync by hand.
//!
//! ## Overview
//!
//! - [`Work`] is the request body the controller sends on every burst
//!   iteration: a single `sleep_ms` field carried as JSON.
//! - [`Work::decode_or_default`] is the worker-side decoder. It never fails:
//!   any body the controller would not produce (empty, unparseable, missing
//!   or negative field, explicit zero) collapses to [`DEFAULT_SLEEP_MS`].
//! - [`Ack`] is the empty `{}` object both HTTP endpoints reply with.
//!
//! ## Constants
//!
//! - [`DEFAULT_SLEEP_MS`] - the fallback delay, used both as the controller's
//!   default `--worker-sleep-ms` and as the worker's substitute for
//!   undecodable payloads.
//!
//! ## Zero means default
//!
//! A payload of `{"sleep_ms": 0}` is treated the same as a missing field:
//! the worker sleeps the default 250 ms. The decoder cannot distinguish an
//! explicit zero from an absent field, so both take the fallback. Callers
//! that want a near-zero delay send `1`.

use crate::common::error::Result;
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Fallback delay in milliseconds.
///
/// Applied by the worker whenever a request body does not decode to a
/// positive `sleep_ms`, and used by the controller as the default for its
/// `--worker-sleep-ms` option.
pub const DEFAULT_SLEEP_MS: u64 = 250;

/// A single unit of work: "sleep this many milliseconds, then acknowledge".
///
/// Serialized as `{"sleep_ms": <int>}` with content type `application/json`.
/// The field is unsigned at the type level, so a negative delay is
/// unrepresentable on the send side and rejected (then defaulted) on the
/// receive side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    /// Requested delay before the worker acknowledges, in milliseconds.
    pub sleep_ms: u64,
}

impl Work {
    /// Creates a payload requesting a `sleep_ms` millisecond delay.
    pub const fn new(sleep_ms: u64) -> Self {
        Self { sleep_ms }
    }

    /// Serializes the payload to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EncodeWork`](crate::Error::EncodeWork) if
    /// serialization fails. The type is structurally infallible to encode,
    /// but the send path treats encoding as fallible so the failure mode
    /// stays explicit and testable.
    pub fn to_wire(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes a request body, substituting the default on any failure.
    ///
    /// Empty bodies, unparseable JSON, a missing or `null` field, a negative
    /// value, and an explicit `0` all yield [`DEFAULT_SLEEP_MS`]. Unknown
    /// fields are ignored. This function never reports an error: the worker
    /// answers every request.
    pub fn decode_or_default(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Self>(bytes) {
            Ok(work) if work.sleep_ms > 0 => work,
            _ => Self::default(),
        }
    }

    /// The requested delay as a [`Duration`].
    pub const fn sleep_duration(&self) -> Duration {
        Duration::from_millis(self.sleep_ms)
    }
}

impl Default for Work {
    fn default() -> Self {
        Self {
            sleep_ms: DEFAULT_SLEEP_MS,
        }
    }
}

/// The empty `{}` acknowledgment body.
///
/// Returned by the worker after its sleep and by the controller once a burst
/// completes. The braced (non-unit) definition matters: serde serializes it
/// as an empty JSON object, not `null`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Ack {}
