//! # tlsgrade common
//!
//! Types shared by every layer of the workspace.
//!
//! * [`domain`]: the validated [`domain::Domain`] an analysis is requested for.
//! * [`models`]: the SSL Labs data model (hosts, endpoints, details, service info).
//! * [`config`]: run settings and the polling [`config::PollPolicy`].

pub mod config;
pub mod domain;
pub mod models;
