//! Adapters for [`crate::ports::ResultStore`].
//!
//! * [`fs::FsResultStore`]: one JSON document per domain in a directory.
//! * [`memory::MemoryStore`]: process-local map, for tests and embedding.
//! * [`disabled::DisabledStore`]: remembers nothing.
//!
//! Stored entries are wrapped in a [`CacheEnvelope`] that records the format
//! version and the domain the entry was written for.

pub mod disabled;
pub mod fs;
pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tlsgrade_common::domain::Domain;
use tlsgrade_common::models::host::Host;

use crate::ports::CacheError;

pub use disabled::DisabledStore;
pub use fs::FsResultStore;
pub use memory::MemoryStore;

pub const CACHE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEnvelope {
    pub version: u32,
    pub domain: String,
    pub saved_at: DateTime<Utc>,
    pub host: Host,
}

impl CacheEnvelope {
    /// Wraps `host` for storage under `domain`.
    ///
    /// Fails when the service reported the result for another name, so an
    /// entry never holds a foreign domain's data.
    pub fn seal(domain: &Domain, host: &Host) -> Result<Self, CacheError> {
        if !host.domain.is_empty() && !domain.matches(&host.domain) {
            return Err(CacheError::DomainMismatch {
                expected: domain.to_string(),
                found: host.domain.clone(),
            });
        }

        Ok(Self {
            version: CACHE_FORMAT_VERSION,
            domain: domain.to_string(),
            saved_at: Utc::now(),
            host: host.clone(),
        })
    }

    /// Unwraps an entry read back for `domain`.
    pub fn open(self, domain: &Domain) -> Result<Host, CacheError> {
        if self.version != CACHE_FORMAT_VERSION {
            return Err(CacheError::UnsupportedVersion(self.version));
        }
        if !domain.matches(&self.domain) {
            return Err(CacheError::DomainMismatch {
                expected: domain.to_string(),
                found: self.domain,
            });
        }
        Ok(self.host)
    }
}

/// File-system safe key for `domain`.
///
/// Lowercases the name and replaces anything outside `[a-z0-9.-]` with `_`.
/// A leading dot is replaced too, so a key is never a hidden file or `..`.
pub fn cache_key(domain: &Domain) -> String {
    domain
        .as_str()
        .chars()
        .enumerate()
        .map(|(idx, c)| match c.to_ascii_lowercase() {
            '.' if idx == 0 => '_',
            c @ ('a'..='z' | '0'..='9' | '.' | '-') => c,
            _ => '_',
        })
        .collect()
}
