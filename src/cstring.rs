//! `CryptoString` couples a binary value with the name of the algorithm it
//! belongs to, in the wire form `PREFIX:base85data`, for example
//! `ED25519:6lXjej0C~!F5seOLnSK` followed by the rest of the payload. Every
//! key, signature, and hash an entry carries is one of these. The engine
//! treats the payload as opaque; whether 32 bytes make a *good* ED25519 key
//! is the caller's problem, but the string must always split and decode
//! cleanly.

use crate::{
    base85,
    error::{Error, Result},
};
use getset::Getters;
use std::str::FromStr;

/// Algorithm prefixes are capital letters, digits, and dashes, at most 24
/// characters, not counting the colon separator.
const MAX_PREFIX_LEN: usize = 24;

fn prefix_is_valid(prefix: &str) -> bool {
    !prefix.is_empty()
        && prefix.len() <= MAX_PREFIX_LEN
        && prefix.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-')
}

/// An algorithm-tagged, base-85-encoded binary string.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct CryptoString {
    /// The algorithm tag, e.g. `ED25519`, `CURVE25519`, `BLAKE3-256`.
    prefix: String,
    /// The base-85 payload.
    data: String,
}

impl CryptoString {
    /// Assemble a CryptoString from an already-encoded payload.
    pub fn from_parts(prefix: &str, data: &str) -> Result<Self> {
        if !prefix_is_valid(prefix) || data.is_empty() {
            return Err(Error::CryptoStringFormat);
        }
        Ok(Self {
            prefix: prefix.to_string(),
            data: data.to_string(),
        })
    }

    /// Assemble a CryptoString by encoding raw bytes.
    pub fn from_bytes(prefix: &str, data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::CryptoStringFormat);
        }
        Self::from_parts(prefix, &base85::encode(data))
    }

    /// The full `PREFIX:data` form.
    pub fn as_string(&self) -> String {
        format!("{}:{}", self.prefix, self.data)
    }

    /// True if the string is structurally sound and its payload decodes.
    pub fn is_valid(&self) -> bool {
        prefix_is_valid(&self.prefix) && !self.data.is_empty() && self.raw_data().is_ok()
    }

    /// Decode the payload back into raw bytes.
    pub fn raw_data(&self) -> Result<Vec<u8>> {
        base85::decode(&self.data)
    }
}

impl FromStr for CryptoString {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self> {
        let (prefix, data) = string.split_once(':').ok_or(Error::CryptoStringFormat)?;
        Self::from_parts(prefix, data)
    }
}

impl std::fmt::Display for CryptoString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.prefix, self.data)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn parse_and_stringify() {
        let cs = CryptoString::from_str("ED25519:VPaz").unwrap();
        assert_eq!(cs.prefix(), "ED25519");
        assert_eq!(cs.data(), "VPaz");
        assert_eq!(cs.as_string(), "ED25519:VPaz");
        assert_eq!(format!("{}", cs), "ED25519:VPaz");
        assert_eq!(cs.raw_data().unwrap(), b"abc".to_vec());
        assert!(cs.is_valid());
    }

    #[test]
    fn from_bytes_round_trips() {
        let payload: Vec<u8> = (0u8..32).collect();
        let cs = CryptoString::from_bytes("CURVE25519", &payload).unwrap();
        assert_eq!(cs.prefix(), "CURVE25519");
        assert_eq!(cs.raw_data().unwrap(), payload);
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in [
            "",
            "ED25519",           // no separator
            ":VPaz",             // empty prefix
            "ED25519:",          // empty payload
            "ed25519:VPaz",      // lowercase prefix
            "ED_25519:VPaz",     // illegal prefix character
            "ABCDEFGHIJKLMNOPQRSTUVWXY:VPaz", // prefix too long
        ] {
            assert_eq!(
                CryptoString::from_str(bad).err(),
                Some(Error::CryptoStringFormat),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn undecodable_payload_is_invalid_but_parseable() {
        // structure is fine, payload is not decodable base-85
        let cs = CryptoString::from_str("ED25519:ab\u{7f}cd");
        // DEL is outside the alphabet but split still succeeds
        let cs = cs.unwrap();
        assert!(!cs.is_valid());
        assert_eq!(cs.raw_data().err(), Some(Error::CryptoStringDecode));
    }
}
