//! Core trait for public key caches.

use crate::protocol::PubkeyResponse;

/// Storage for counterparty VASP public keys, keyed by domain.
///
/// Implementations must be safe to share across threads; a server may
/// handle many exchanges concurrently against one cache.
pub trait PublicKeyCache: Send + Sync {
    /// Cached keys for `vasp_domain`, if present and not expired.
    ///
    /// An expired entry is reported as a miss but is not evicted.
    fn fetch(&self, vasp_domain: &str) -> Option<PubkeyResponse>;

    /// Store keys for `vasp_domain`, replacing any previous entry.
    fn add(&self, vasp_domain: &str, keys: PubkeyResponse);

    /// Forget the keys for `vasp_domain`.
    fn remove(&self, vasp_domain: &str);

    /// Forget every entry.
    fn clear(&self);
}
