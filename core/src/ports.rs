//! # Outbound Ports
//!
//! Contracts for everything the analysis service needs from the outside
//! world. The service only ever talks to these traits; concrete
//! implementations live in [`crate::client`], [`crate::cache`] and
//! [`crate::progress`] (or in the CLI).
//!
//! ## What belongs here?
//! * **Gateways**: the remote assessment API ([`AssessmentClient`]).
//! * **Repositories**: durable per-domain results ([`ResultStore`]).
//! * **Sinks**: best-effort user feedback ([`ProgressReporter`]).
//!
//! Each port carries the error type of its boundary, so callers can tell a
//! rate limit from a corrupt cache file without knowing the adapter.

pub mod assessment_client;
pub mod progress_reporter;
pub mod result_store;

pub use assessment_client::{AssessmentClient, ClientError};
pub use progress_reporter::{EndpointProgress, ProgressReporter};
pub use result_store::{CacheError, ResultStore};
