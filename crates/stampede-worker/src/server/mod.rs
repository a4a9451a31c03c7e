//! HTTP surface and process plumbing for the delay worker.
//!
//! ## Structure
//!
//! - [`config`] - startup options (CLI flags with env fallbacks).
//! - [`handler`] - the root-path sleep-and-acknowledge endpoint.
//! - [`telemetry`] - log subscriber installation.

pub mod config;
pub mod handler;
pub mod telemetry;
