//! Test utilities for UMA exchanges.
//!
//! This module provides:
//! - Mock collaborators: an HTTP transport serving canned bodies and an
//!   invoice creator that records what it was asked for
//! - Fixtures: sample metadata, currencies, and VASP key sets
//!
//! ## Usage
//!
//! ```rust,ignore
//! use uma_lib::test_utils::{MockTransport, TestVasp};
//! use uma_lib::{fetch_public_key, InMemoryPublicKeyCache};
//!
//! let receiver = TestVasp::new("vasp1.com");
//! let transport = MockTransport::new().with_pubkeys(&receiver.domain, &receiver.pubkey_response());
//! let keys = fetch_public_key("vasp1.com", &InMemoryPublicKeyCache::new(), &transport)?;
//! ```

mod fixtures;
mod mocks;

pub use fixtures::{TestFixtures, TestVasp};
pub use mocks::{MockInvoiceCreator, MockTransport};
