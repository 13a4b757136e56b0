use tlsgrade_common::domain::Domain;
use tlsgrade_common::models::host::Host;

use crate::ports::{CacheError, ResultStore};

/// A store that never has anything. Backs `--no-cache`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStore;

impl ResultStore for DisabledStore {
    fn exists(&self, _domain: &Domain) -> bool {
        false
    }

    fn load(&self, domain: &Domain) -> Result<Host, CacheError> {
        Err(CacheError::Missing(domain.to_string()))
    }

    fn save(&self, _domain: &Domain, _host: &Host) -> Result<(), CacheError> {
        Ok(())
    }
}
