//! HTTP trigger surface.
//!
//! The controller exposes a single route. Any request to it starts a burst
//! and blocks until the burst's completion barrier releases.
//!
//! ## Structure
//!
//! - [`handler`] - trigger endpoint and shared state.

pub mod handler;
