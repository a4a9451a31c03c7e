//! Burst orchestration and HTTP plumbing for the controller.
//!
//! ## Structure
//!
//! - [`config`] - startup options and the immutable process config.
//! - [`service`] - the HTTP trigger surface.
//! - [`burst`] - the dispatcher and sender loops that generate traffic.
//! - [`telemetry`] - log subscriber installation.

pub mod burst;
pub mod config;
pub mod service;
pub mod telemetry;
