use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tlsgrade_common::domain::Domain;
use tlsgrade_common::models::host::Host;

use super::{CacheEnvelope, cache_key};
use crate::ports::{CacheError, ResultStore};

/// Keeps entries in a process-local map, keyed like [`super::FsResultStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, CacheEnvelope>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultStore for MemoryStore {
    fn exists(&self, domain: &Domain) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&cache_key(domain))
            .is_some_and(|envelope| domain.matches(&envelope.domain))
    }

    fn load(&self, domain: &Domain) -> Result<Host, CacheError> {
        let envelope = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&cache_key(domain))
            .cloned()
            .ok_or_else(|| CacheError::Missing(domain.to_string()))?;
        envelope.open(domain)
    }

    fn save(&self, domain: &Domain, host: &Host) -> Result<(), CacheError> {
        let envelope = CacheEnvelope::seal(domain, host)?;
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cache_key(domain), envelope);
        Ok(())
    }
}
