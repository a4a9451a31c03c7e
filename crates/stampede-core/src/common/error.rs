//! Error types for the burst harness.
//!
//! This module defines the central `Error` enum, which captures the
//! reportable failure cases shared by the controller and the worker. The
//! harness is deliberately tolerant at runtime (transport failures and
//! malformed payloads are logged or defaulted, never surfaced), so the enum
//! stays small: encoding on the controller's send path and configuration
//! validation at startup.
//!
//! ## Error Cases
//! - `EncodeWork`: Serializing the work payload to its wire form failed.
//! - `InvalidConfig`: A startup option was malformed or out of bounds.

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the burst harness.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Serializing a work payload to its JSON wire form failed.
    #[error("Encode error: {0}")]
    EncodeWork(#[from] serde_json::Error),

    /// A startup option was malformed or out of bounds.
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}
