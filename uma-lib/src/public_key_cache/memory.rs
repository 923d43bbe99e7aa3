//! In-memory public key cache.
//!
//! # Thread Safety
//!
//! A single `Mutex` guards the map. Entries are small and immutable once
//! stored, so there is nothing to gain from finer-grained locking. A
//! poisoned lock is recovered rather than propagated since no operation
//! can leave the map half-updated.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use super::traits::PublicKeyCache;
use crate::protocol::PubkeyResponse;

/// Process-local [`PublicKeyCache`]. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryPublicKeyCache {
    entries: Mutex<HashMap<String, PubkeyResponse>>,
}

impl InMemoryPublicKeyCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, PubkeyResponse>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PublicKeyCache for InMemoryPublicKeyCache {
    fn fetch(&self, vasp_domain: &str) -> Option<PubkeyResponse> {
        let now = Utc::now();
        self.lock()
            .get(vasp_domain)
            .filter(|entry| entry.is_valid_at(now))
            .cloned()
    }

    fn add(&self, vasp_domain: &str, keys: PubkeyResponse) {
        self.lock().insert(vasp_domain.to_string(), keys);
    }

    fn remove(&self, vasp_domain: &str) {
        self.lock().remove(vasp_domain);
    }

    fn clear(&self) {
        self.lock().clear();
    }
}
