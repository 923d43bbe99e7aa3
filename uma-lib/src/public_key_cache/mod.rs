//! Counterparty public key cache.
//!
//! Keys fetched from a VASP's `/.well-known/lnurlpubkey` endpoint are kept
//! here until they expire. The orchestrator only depends on the
//! [`PublicKeyCache`] trait, so a persistent backend can replace
//! [`InMemoryPublicKeyCache`] without other changes.

mod memory;
mod traits;

pub use memory::InMemoryPublicKeyCache;
pub use traits::PublicKeyCache;
