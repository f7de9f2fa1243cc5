//! Hashing and key generation for keycard entries.
//!
//! The wire format names its algorithms as CryptoString prefixes, so the
//! dispatch here is by prefix string and deliberately exhaustive: adding a
//! fifth hash algorithm means touching this file and nothing else. Key
//! generation never reads process-wide state; every generating function
//! takes `&mut rng` so callers control the entropy source.

use crate::{
    cstring::CryptoString,
    error::{Error, Result},
};
use rand::{rngs::OsRng, CryptoRng, RngCore, SeedableRng};
use sha2::Digest;
use std::collections::HashMap;

type Blake2b256 = blake2::Blake2b<blake2::digest::consts::U32>;

/// A convenience function that returns a ChaCha20 CSRNG seeded with OS random
/// bytes. Use this if you want a strong random number generator and your
/// platform provides good entropy; otherwise bring your own [`RngCore`].
pub fn rng() -> rand_chacha::ChaCha20Rng {
    let mut seed_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut seed_bytes);
    rand_chacha::ChaCha20Rng::from_seed(seed_bytes)
}

#[cfg(test)]
pub(crate) fn test_rng() -> rand_chacha::ChaCha20Rng {
    rand_chacha::ChaCha20Rng::seed_from_u64(0x6b65796361726421)
}

/// The set of digest algorithms an entry hash may use. The choice travels in
/// the hash's own prefix, so verification of old entries keeps working after
/// the preferred algorithm moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Blake3_256,
    Blake2b256,
    Sha256,
    Sha3_256,
}

impl HashAlgorithm {
    /// Map a wire prefix to an algorithm. Anything outside the supported set
    /// is a hard error, never silently defaulted.
    pub fn from_prefix(prefix: &str) -> Result<Self> {
        match prefix {
            "BLAKE3-256" => Ok(Self::Blake3_256),
            "BLAKE2B-256" => Ok(Self::Blake2b256),
            "SHA-256" => Ok(Self::Sha256),
            "SHA3-256" => Ok(Self::Sha3_256),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }

    /// The CryptoString prefix this algorithm is known by on the wire.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Blake3_256 => "BLAKE3-256",
            Self::Blake2b256 => "BLAKE2B-256",
            Self::Sha256 => "SHA-256",
            Self::Sha3_256 => "SHA3-256",
        }
    }

    /// Hash a message, returning the 32-byte digest.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Blake3_256 => blake3::hash(data).as_bytes().to_vec(),
            Self::Blake2b256 => Blake2b256::digest(data).to_vec(),
            Self::Sha256 => sha2::Sha256::digest(data).to_vec(),
            Self::Sha3_256 => sha3::Sha3_256::digest(data).to_vec(),
        }
    }

    /// Hash a message and package the digest as a prefixed CryptoString.
    pub fn hash_to_cstring(&self, data: &[u8]) -> Result<CryptoString> {
        CryptoString::from_bytes(self.prefix(), &self.digest(data))
    }
}

fn new_signing_pair<R: RngCore + CryptoRng>(rng: &mut R) -> Result<(CryptoString, CryptoString)> {
    let signing = ed25519_consensus::SigningKey::new(&mut *rng);
    let public = signing.verification_key();
    Ok((
        CryptoString::from_bytes("ED25519", &public.to_bytes())?,
        // the 32-byte seed, not the expanded key, is what travels
        CryptoString::from_bytes("ED25519", &signing.to_bytes())?,
    ))
}

fn new_encryption_pair<R: RngCore + CryptoRng>(rng: &mut R) -> Result<(CryptoString, CryptoString)> {
    let secret = crypto_box::SecretKey::generate(rng);
    let public = secret.public_key();
    Ok((
        CryptoString::from_bytes("CURVE25519", public.as_bytes())?,
        CryptoString::from_bytes("CURVE25519", &secret.to_bytes())?,
    ))
}

fn insert_pair(
    out: &mut HashMap<String, CryptoString>,
    field: &str,
    pair: (CryptoString, CryptoString),
) {
    out.insert(format!("{field}.public"), pair.0);
    out.insert(format!("{field}.private"), pair.1);
}

/// Generate a full set of user keys. Each key appears twice in the output,
/// once under `<FieldName>.public` and once under `<FieldName>.private`, so
/// the caller can install the public half into an entry and retain the
/// private half for signing and decryption.
pub fn generate_user_keys<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> Result<HashMap<String, CryptoString>> {
    let mut out = HashMap::with_capacity(8);
    insert_pair(&mut out, "Verification-Key", new_signing_pair(rng)?);
    insert_pair(&mut out, "Contact-Request-Verification-Key", new_signing_pair(rng)?);
    insert_pair(&mut out, "Contact-Request-Encryption-Key", new_encryption_pair(rng)?);
    insert_pair(&mut out, "Encryption-Key", new_encryption_pair(rng)?);
    Ok(out)
}

/// Generate a set of organization keys. The secondary verification key is on
/// its own rotation schedule and is generated only when `rotate_optional` is
/// set; the policy for when that should happen belongs to the caller.
pub fn generate_org_keys<R: RngCore + CryptoRng>(
    rng: &mut R,
    rotate_optional: bool,
) -> Result<HashMap<String, CryptoString>> {
    let mut out = HashMap::with_capacity(if rotate_optional { 6 } else { 4 });
    insert_pair(&mut out, "Primary-Verification-Key", new_signing_pair(rng)?);
    insert_pair(&mut out, "Encryption-Key", new_encryption_pair(rng)?);
    if rotate_optional {
        insert_pair(&mut out, "Secondary-Verification-Key", new_signing_pair(rng)?);
    }
    Ok(out)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn hash_algorithm_prefix_round_trip() {
        for prefix in ["BLAKE3-256", "BLAKE2B-256", "SHA-256", "SHA3-256"] {
            let algo = HashAlgorithm::from_prefix(prefix).unwrap();
            assert_eq!(algo.prefix(), prefix);
        }
        assert_eq!(
            HashAlgorithm::from_prefix("MD5").err(),
            Some(Error::UnsupportedAlgorithm("MD5".to_string()))
        );
    }

    #[test]
    fn digests_are_256_bit_and_distinct() {
        let msg = b"have you tried turning the org off and on again";
        let algos = [
            HashAlgorithm::Blake3_256,
            HashAlgorithm::Blake2b256,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha3_256,
        ];
        let mut digests = Vec::new();
        for algo in algos {
            let digest = algo.digest(msg);
            assert_eq!(digest.len(), 32);
            assert_eq!(algo.digest(msg), digest); // deterministic
            digests.push(digest);
        }
        for i in 0..digests.len() {
            for j in (i + 1)..digests.len() {
                assert_ne!(digests[i], digests[j]);
            }
        }
    }

    #[test]
    fn user_keyset_is_complete() {
        let mut rng = test_rng();
        let keys = generate_user_keys(&mut rng).unwrap();
        for field in [
            "Verification-Key",
            "Contact-Request-Verification-Key",
            "Contact-Request-Encryption-Key",
            "Encryption-Key",
        ] {
            let public = &keys[&format!("{field}.public")];
            let private = &keys[&format!("{field}.private")];
            assert_eq!(public.raw_data().unwrap().len(), 32);
            assert_eq!(private.raw_data().unwrap().len(), 32);
            assert_ne!(public, private);
        }
        assert_eq!(keys["Verification-Key.public"].prefix(), "ED25519");
        assert_eq!(keys["Encryption-Key.public"].prefix(), "CURVE25519");
    }

    #[test]
    fn org_keyset_rotates_secondary_only_on_request() {
        let mut rng = test_rng();
        let keys = generate_org_keys(&mut rng, false).unwrap();
        assert!(keys.contains_key("Primary-Verification-Key.public"));
        assert!(keys.contains_key("Encryption-Key.private"));
        assert!(!keys.contains_key("Secondary-Verification-Key.public"));

        let keys = generate_org_keys(&mut rng, true).unwrap();
        assert!(keys.contains_key("Secondary-Verification-Key.public"));
        assert!(keys.contains_key("Secondary-Verification-Key.private"));
    }

    #[test]
    fn generated_signing_pairs_actually_sign() {
        let mut rng = test_rng();
        let keys = generate_user_keys(&mut rng).unwrap();
        let seed: [u8; 32] = keys["Verification-Key.private"]
            .raw_data()
            .unwrap()
            .try_into()
            .unwrap();
        let signing = ed25519_consensus::SigningKey::from(seed);
        let public: [u8; 32] = keys["Verification-Key.public"]
            .raw_data()
            .unwrap()
            .try_into()
            .unwrap();
        assert_eq!(signing.verification_key().to_bytes(), public);
    }
}
