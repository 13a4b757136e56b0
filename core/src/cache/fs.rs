use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tlsgrade_common::domain::Domain;
use tlsgrade_common::models::host::Host;
use tracing::trace;

use super::{CacheEnvelope, cache_key};
use crate::ports::{CacheError, ResultStore};

/// Stores each domain's last result as `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous entry intact.
#[derive(Debug, Clone)]
pub struct FsResultStore {
    dir: PathBuf,
}

impl FsResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, domain: &Domain) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(domain)))
    }

    fn read_envelope(&self, domain: &Domain) -> Result<CacheEnvelope, CacheError> {
        let path = self.path_for(domain);
        let bytes = fs::read(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => CacheError::Missing(domain.to_string()),
            _ => CacheError::Io { path: path.clone(), source },
        })?;

        serde_json::from_slice(&bytes).map_err(|source| CacheError::Corrupt {
            domain: domain.to_string(),
            source,
        })
    }

    fn write_atomically(&self, path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: io::Error| CacheError::Io { path, source }
        };

        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes).map_err(io_err(&tmp_path))?;
        fs::rename(&tmp_path, path).map_err(io_err(path))
    }
}

impl ResultStore for FsResultStore {
    fn exists(&self, domain: &Domain) -> bool {
        self.read_envelope(domain)
            .is_ok_and(|envelope| domain.matches(&envelope.domain))
    }

    fn load(&self, domain: &Domain) -> Result<Host, CacheError> {
        self.read_envelope(domain)?.open(domain)
    }

    fn save(&self, domain: &Domain, host: &Host) -> Result<(), CacheError> {
        let envelope = CacheEnvelope::seal(domain, host)?;
        let bytes = serde_json::to_vec_pretty(&envelope).map_err(|source| CacheError::Corrupt {
            domain: domain.to_string(),
            source,
        })?;

        let path = self.path_for(domain);
        self.write_atomically(&path, &bytes)?;
        trace!(path = %path.display(), status = %host.status, "cached result");
        Ok(())
    }
}
