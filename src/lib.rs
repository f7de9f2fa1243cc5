//! Keycard-core implements the identity layer of a federated messaging
//! network: append-only, cryptographically linked chains of signed identity
//! records called *keycards*. A keycard belongs to a user or an organization
//! and is made of [entries][entry::Entry] — flat `Name:Value` records
//! carrying the owner's public keys, contact information, and lifetime
//! metadata, serialized in a fixed canonical byte form that is the sole
//! input to every hash and signature.
//!
//! Each entry is attested at several levels. An organization entry carries
//! an optional custody signature, a hash, and the organization's own
//! signature; a user entry adds the organization's countersignature between
//! custody and hash, and finishes with the user's. Signing at one level
//! invalidates everything above it, which forces the protocol's signing
//! order and makes an entry's compliance a purely local, offline check.
//!
//! Keys are never reused across generations. When keys rotate, the owner
//! [chains][entry::Entry::chain] a successor entry: fields copied, index
//! incremented, fresh keys installed, and a custody signature made with the
//! *previous* generation's signing key. Anyone holding entry N can verify
//! that entry N+1 was authorized by the same owner with no trusted third
//! party involved — the chain is its own audit trail.
//!
//! What this crate provides:
//!
//! * [`entry`] — the entry data model, canonical codec, compliance
//!   validation, progressive signing, hashing, verification, chaining, and
//!   parsing
//! * [`keycard`] — whole-chain container with end-to-end verification and
//!   enveloped text serialization
//! * [`cache`] — a bounded, thread-safe LRU cache of resolved keycards for
//!   server use
//! * [`cstring`] — the `PREFIX:base85data` tagged value every key,
//!   signature, and hash travels as
//! * [`crypto`] — hash algorithm dispatch and key-set generation
//!
//! # Example
//!
//! ```rust
//! use keycard_core::{
//!     crypto,
//!     entry::{Entry, EntryType},
//! };
//!
//! let mut rng = crypto::rng();
//! let keys = crypto::generate_org_keys(&mut rng, true)?;
//!
//! let pvk = keys["Primary-Verification-Key.public"].as_string();
//! let svk = keys["Secondary-Verification-Key.public"].as_string();
//! let ek = keys["Encryption-Key.public"].as_string();
//!
//! let mut entry = Entry::new(EntryType::Organization);
//! entry.set_fields([
//!     ("Name", "Acme Widgets, Inc."),
//!     ("Domain", "example.com"),
//!     ("Contact-Admin", "ae406f54-0923-4401-a47e-a4a6545e989b/example.com"),
//!     ("Primary-Verification-Key", pvk.as_str()),
//!     ("Secondary-Verification-Key", svk.as_str()),
//!     ("Encryption-Key", ek.as_str()),
//! ]);
//!
//! // hash, then sign over the hash
//! entry.generate_hash("BLAKE3-256")?;
//! entry.sign(&keys["Primary-Verification-Key.private"], "Organization")?;
//! assert!(entry.is_compliant());
//!
//! // a year later: rotate keys, keeping the secondary on its own schedule
//! let (next, _next_keys) =
//!     entry.chain(&keys["Primary-Verification-Key.private"], false, &mut rng)?;
//! next.verify_chain(&entry)?;
//! # Ok::<(), keycard_core::error::Error>(())
//! ```

pub mod base85;
pub mod cache;
pub mod crypto;
pub mod cstring;
pub mod entry;
pub mod error;
pub mod keycard;
mod validate;

pub use cache::KeycardCache;
pub use crypto::{generate_org_keys, generate_user_keys, HashAlgorithm};
pub use cstring::CryptoString;
pub use entry::{Entry, EntryType};
pub use error::{Error, Result};
pub use keycard::Keycard;
