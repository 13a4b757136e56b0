//! Adapters for [`crate::ports::AssessmentClient`].
//!
//! * [`ssllabs::SslLabsClient`]: the SSL Labs API v2 over HTTPS.

pub mod ssllabs;
mod status;

pub use ssllabs::SslLabsClient;
