use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tlsgrade_common::domain::Domain;
use tlsgrade_common::models::host::Host;

/// Failures of a [`ResultStore`]. Never fatal to an analysis run.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("no cached result for {0}")]
    Missing(String),
    #[error("cached result for {domain} is corrupt: {source}")]
    Corrupt {
        domain: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cached result belongs to {found}, expected {expected}")]
    DomainMismatch { expected: String, found: String },
    #[error("unsupported cache format version {0}")]
    UnsupportedVersion(u32),
    #[error("cache I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Durable lookup of the last known result of a domain.
pub trait ResultStore: Send + Sync {
    /// Whether an entry for `domain` exists and belongs to that domain.
    fn exists(&self, domain: &Domain) -> bool;

    fn load(&self, domain: &Domain) -> Result<Host, CacheError>;

    /// Replaces the entry of `domain` with `host`.
    ///
    /// Refuses results that were reported for a different domain.
    fn save(&self, domain: &Domain, host: &Host) -> Result<(), CacheError>;
}
