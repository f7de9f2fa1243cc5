//! The main error enum for the crate lives here, and documents the various
//! conditions that can arise while building, signing, parsing, and verifying
//! keycard entries.

use thiserror::Error;

/// This is our error enum. It contains an entry for any part of the system in
/// which an expectation is not met or a problem occurs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An entry's index does not immediately follow its predecessor's, so the
    /// two cannot form a chain link.
    #[error("entry index does not immediately follow the previous entry")]
    ChainDiscontinuity,

    /// A crypto string failed to decode from its base-85 payload.
    #[error("crypto string data does not decode")]
    CryptoStringDecode,

    /// A string is not in `PREFIX:data` form, or its prefix/payload is empty
    /// or malformed.
    #[error("bad crypto string format")]
    CryptoStringFormat,

    /// An entry envelope opened with a BEGIN marker but did not close with
    /// the matching END marker.
    #[error("mismatched entry envelope header/footer")]
    EnvelopeMismatch,

    /// Two entries (or an entry and a keycard) disagree about whether they
    /// describe a User or an Organization.
    #[error("entry type mismatch")]
    EntryTypeMismatch,

    /// A field is present but its value violates the field's grammar.
    #[error("invalid format for field {0}")]
    InvalidFieldFormat(String),

    /// Key generation during rotation did not produce a key required by the
    /// entry's key table.
    #[error("rotation did not generate required key {0}")]
    KeyRotationIncomplete(String),

    /// Structural failure in serialized entry text. Carries the offending
    /// line number within the block being parsed.
    #[error("malformed entry data near line {0}")]
    MalformedInput(usize),

    /// A required field is absent or empty.
    #[error("missing required field {0}")]
    MissingField(String),

    /// An operation that requires a fully compliant entry was handed one that
    /// is not.
    #[error("entry is not compliant")]
    NotCompliant,

    /// There is no signature (or hash) in the named slot, so there is nothing
    /// to verify. Distinct from [`SignatureInvalid`][Error::SignatureInvalid]:
    /// absence means "nothing to check", not "check failed".
    #[error("signature slot {0} is empty")]
    SignatureAbsent(String),

    /// A signature is present and well-formed but does not verify against
    /// the supplied key and canonical bytes.
    #[error("signature in slot {0} does not verify")]
    SignatureInvalid(String),

    /// A signature line names a slot the entry type does not define.
    #[error("{0} is not a valid signature type")]
    UnknownSignatureType(String),

    /// A signing key, verification key, or hash algorithm outside the
    /// supported set was supplied.
    #[error("unsupported algorithm {0}")]
    UnsupportedAlgorithm(String),
}

/// Wraps `std::result::Result` around our `Error` enum
pub type Result<T> = std::result::Result<T, Error>;
