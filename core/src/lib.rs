//! # tlsgrade core
//!
//! Orchestrates a remote SSL Labs assessment until it reaches a final state.
//!
//! ## Architecture Overview
//! * **[`analysis`]**: the use case. Validation, capacity gate, lifecycle
//!   state machine and the adaptive poller.
//! * **[`ports`]**: traits the use case depends on.
//! * **[`client`]**, **[`cache`]**, **[`progress`]**: concrete implementations
//!   of those ports.

pub mod analysis;
pub mod cache;
pub mod client;
pub mod ports;
pub mod progress;

pub use analysis::{AnalysisError, AnalysisService};
