//! # SSL Labs Data Model
//!
//! Wire-compatible representations of the SSL Labs API v2 payloads.
//!
//! * [`host::Host`]: the job result for one domain, with its [`host::AnalysisStatus`].
//! * [`host::Endpoint`]: one server address tested for that domain.
//! * [`details::EndpointDetails`]: protocols, suites, certificate and vulnerability data.
//! * [`info::ServiceInfo`]: service version and load, source of [`info::ServiceCapacity`].
//!
//! Every field has a default so partial payloads (a job still resolving DNS,
//! an endpoint without details) decode cleanly, and explicit `null`
//! collections decode as empty.

pub mod details;
pub mod host;
pub mod info;

use serde::{Deserialize, Deserializer};

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
