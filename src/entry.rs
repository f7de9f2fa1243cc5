//! The keycard entry engine: data model, canonical serialization, progressive
//! multi-level signing, compliance, verification, and key rotation.
//!
//! An [`Entry`] is one record in an owner's keycard chain. Its canonical byte
//! form — and *only* that byte form — is what ever gets hashed or signed, so
//! the codec here is deliberately rigid: fixed per-type field order, CRLF
//! line endings, one trailing empty line. A signature slot's *level* encodes
//! how much of the entry it attests to; adding a signature at level L
//! invalidates everything at level L and above, which is what makes the
//! signing order (Custody, then the organization's countersignature, then
//! the hash, then the user) a protocol rule rather than a convention.
//!
//! Entries are built by a type-specific factory, mutated field-by-field,
//! then signed level by level until compliant. A compliant entry is never
//! edited again; [`Entry::chain`] derives its successor with fresh keys and
//! a custody signature from the predecessor's key.

use crate::{
    crypto::{self, HashAlgorithm},
    cstring::CryptoString,
    error::{Error, Result},
    validate,
};
use chrono::{Duration, Utc};
use getset::{CopyGetters, Getters};
use rand::{CryptoRng, RngCore};
use std::collections::HashMap;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Envelope marker opening a serialized entry block.
pub const ENTRY_BEGIN: &str = "----- BEGIN ENTRY -----";
/// Envelope marker closing a serialized entry block.
pub const ENTRY_END: &str = "----- END ENTRY -----";

/// The kind of account an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    User,
    Organization,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Organization => "Organization",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a signature slot holds: a detached signature or the entry hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureKind {
    Signature,
    Hash,
}

/// What a rotating key field is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPurpose {
    Signing,
    Encryption,
}

/// Descriptive information about one signature slot. `level` indicates
/// order: a slot with level 2 is attached to the entry after a level 1 slot,
/// and its value covers everything at lower levels.
#[derive(Debug, Clone, Copy, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct SigInfo {
    name: &'static str,
    level: usize,
    optional: bool,
    kind: SignatureKind,
}

/// Describes one public-key field subject to rotation.
#[derive(Debug, Clone, Copy, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct KeyInfo {
    field_name: &'static str,
    purpose: KeyPurpose,
    optional: bool,
}

const ORG_FIELD_NAMES: &[&str] = &[
    "Index",
    "Name",
    "Domain",
    "Contact-Admin",
    "Contact-Abuse",
    "Contact-Support",
    "Language",
    "Primary-Verification-Key",
    "Secondary-Verification-Key",
    "Encryption-Key",
    "Time-To-Live",
    "Expires",
    "Timestamp",
];

const ORG_REQUIRED_FIELDS: &[&str] = &[
    "Index",
    "Name",
    "Domain",
    "Contact-Admin",
    "Primary-Verification-Key",
    "Encryption-Key",
    "Time-To-Live",
    "Expires",
    "Timestamp",
];

const ORG_SIGNATURE_INFO: &[SigInfo] = &[
    SigInfo { name: "Custody", level: 1, optional: true, kind: SignatureKind::Signature },
    SigInfo { name: "Hashes", level: 2, optional: false, kind: SignatureKind::Hash },
    SigInfo { name: "Organization", level: 3, optional: false, kind: SignatureKind::Signature },
];

const ORG_KEY_INFO: &[KeyInfo] = &[
    KeyInfo { field_name: "Primary-Verification-Key", purpose: KeyPurpose::Signing, optional: false },
    KeyInfo { field_name: "Secondary-Verification-Key", purpose: KeyPurpose::Signing, optional: true },
    KeyInfo { field_name: "Encryption-Key", purpose: KeyPurpose::Encryption, optional: false },
];

const USER_FIELD_NAMES: &[&str] = &[
    "Index",
    "Name",
    "User-ID",
    "Workspace-ID",
    "Domain",
    "Contact-Request-Verification-Key",
    "Contact-Request-Encryption-Key",
    "Encryption-Key",
    "Verification-Key",
    "Time-To-Live",
    "Expires",
    "Timestamp",
];

const USER_REQUIRED_FIELDS: &[&str] = &[
    "Index",
    "Workspace-ID",
    "Domain",
    "Contact-Request-Verification-Key",
    "Contact-Request-Encryption-Key",
    "Encryption-Key",
    "Verification-Key",
    "Time-To-Live",
    "Expires",
    "Timestamp",
];

const USER_SIGNATURE_INFO: &[SigInfo] = &[
    SigInfo { name: "Custody", level: 1, optional: true, kind: SignatureKind::Signature },
    SigInfo { name: "Organization", level: 2, optional: false, kind: SignatureKind::Signature },
    SigInfo { name: "Hashes", level: 3, optional: false, kind: SignatureKind::Hash },
    SigInfo { name: "User", level: 4, optional: false, kind: SignatureKind::Signature },
];

const USER_KEY_INFO: &[KeyInfo] = &[
    KeyInfo { field_name: "Contact-Request-Verification-Key", purpose: KeyPurpose::Signing, optional: false },
    KeyInfo { field_name: "Contact-Request-Encryption-Key", purpose: KeyPurpose::Encryption, optional: false },
    KeyInfo { field_name: "Encryption-Key", purpose: KeyPurpose::Encryption, optional: false },
    KeyInfo { field_name: "Verification-Key", purpose: KeyPurpose::Signing, optional: false },
];

/// One record in a keycard chain.
///
/// The per-type descriptor tables (field order, required set, signature
/// slots, rotating keys) are fixed data derived from `entry_type`, not
/// per-instance state.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct Entry {
    #[getset(get_copy = "pub")]
    entry_type: EntryType,
    #[getset(get = "pub")]
    fields: HashMap<String, String>,
    #[getset(get = "pub")]
    signatures: HashMap<String, String>,
    #[getset(get = "pub")]
    prev_hash: String,
    #[getset(get = "pub")]
    hash: String,
}

impl Entry {
    /// Create a new entry with the standard defaults: Index 1, a 30-day
    /// time-to-live, the type's default expiration window, and the current
    /// UTC time.
    pub fn new(entry_type: EntryType) -> Self {
        let mut entry = Self {
            entry_type,
            fields: HashMap::new(),
            signatures: HashMap::new(),
            prev_hash: String::new(),
            hash: String::new(),
        };
        entry.fields.insert("Index".to_string(), "1".to_string());
        entry.fields.insert("Time-To-Live".to_string(), "30".to_string());
        entry.fields.insert(
            "Expires".to_string(),
            expiration_string(default_expiration_days(entry_type)),
        );
        entry.fields.insert(
            "Timestamp".to_string(),
            Utc::now().format("%Y%m%dT%H%M%SZ").to_string(),
        );
        entry
    }

    /// The fixed serialization order of every field name this entry type
    /// recognizes.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self.entry_type {
            EntryType::Organization => ORG_FIELD_NAMES,
            EntryType::User => USER_FIELD_NAMES,
        }
    }

    /// The fields that must be present for data compliance.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self.entry_type {
            EntryType::Organization => ORG_REQUIRED_FIELDS,
            EntryType::User => USER_REQUIRED_FIELDS,
        }
    }

    /// The ordered signature slot descriptors for this entry type.
    pub fn signature_info(&self) -> &'static [SigInfo] {
        match self.entry_type {
            EntryType::Organization => ORG_SIGNATURE_INFO,
            EntryType::User => USER_SIGNATURE_INFO,
        }
    }

    /// The public-key fields subject to rotation.
    pub fn key_info(&self) -> &'static [KeyInfo] {
        match self.entry_type {
            EntryType::Organization => ORG_KEY_INFO,
            EntryType::User => USER_KEY_INFO,
        }
    }

    /// Look up a field, treating empty values as absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Look up a signature slot's stored value, treating empty as absent.
    pub fn signature(&self, slot: &str) -> Option<&str> {
        self.signatures
            .get(slot)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Set one field. Any kind of editing invalidates the signatures and the
    /// hash.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::MissingField("field name".to_string()));
        }
        self.fields.insert(name.to_string(), value.to_string());
        self.signatures.clear();
        self.hash.clear();
        Ok(())
    }

    /// Set multiple fields at once. Signatures are cleared first, not last,
    /// so a caller supplying signature values through other means afterward
    /// is not undone.
    pub fn set_fields<I, K, V>(&mut self, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.signatures.clear();
        self.hash.clear();
        for (name, value) in fields {
            self.fields.insert(name.into(), value.into());
        }
    }

    /// Set a custom expiration, `None` meaning the type's standard window
    /// (90 days for users, a year for organizations). Values are clamped to
    /// the 1095-day protocol maximum.
    pub fn set_expiration(&mut self, numdays: Option<u16>) {
        let days = numdays
            .map(i64::from)
            .unwrap_or_else(|| default_expiration_days(self.entry_type))
            .min(validate::MAX_EXPIRATION_DAYS);
        self.fields
            .insert("Expires".to_string(), expiration_string(days));
        self.signatures.clear();
        self.hash.clear();
    }

    /// True if the entry's expiration date has passed.
    pub fn is_expired(&self) -> Result<bool> {
        let value = self
            .field("Expires")
            .ok_or_else(|| Error::MissingField("Expires".to_string()))?;
        let expires = validate::parse_expires(value)?;
        Ok(Utc::now().date_naive() > expires)
    }

    /// Install predecessor-hash metadata. The `Previous-Hash` line is part
    /// of the hash slot's canonical output, so the hash and everything above
    /// it are invalidated.
    pub fn set_prev_hash(&mut self, value: &str) {
        self.prev_hash = value.to_string();
        if let Some(index) = self.hash_slot_index() {
            self.clear_slots_from(index);
        }
    }

    fn slot_index(&self, name: &str) -> Option<usize> {
        self.signature_info().iter().position(|item| item.name == name)
    }

    fn hash_slot_index(&self) -> Option<usize> {
        self.signature_info()
            .iter()
            .position(|item| item.kind == SignatureKind::Hash)
    }

    // Once a slot changes, it and every slot after it are no longer valid.
    fn clear_slots_from(&mut self, index: usize) {
        let info = self.signature_info();
        for item in &info[index..] {
            match item.kind {
                SignatureKind::Signature => {
                    self.signatures.remove(item.name);
                }
                SignatureKind::Hash => self.hash.clear(),
            }
        }
    }

    /// Produce the entry's canonical byte form up to the given signature
    /// level: the `Type:` line, every named field with a non-empty value in
    /// fixed order, then each signature slot below the level cutoff. Each
    /// line is CRLF-terminated with one trailing empty line. `None` (or an
    /// out-of-range level) means the full serialization.
    ///
    /// These bytes are the single source of truth for hashing and signing;
    /// any divergence here invalidates every signature ever produced.
    pub fn canonical_bytes(&self, siglevel: Option<usize>) -> Vec<u8> {
        let info = self.signature_info();
        let effective = match siglevel {
            Some(level) if level <= info.len() => level,
            _ => info[info.len() - 1].level,
        };

        let mut out = String::new();
        out.push_str("Type:");
        out.push_str(self.entry_type.as_str());
        out.push_str("\r\n");

        for name in self.field_names() {
            if let Some(value) = self.field(name) {
                out.push_str(name);
                out.push(':');
                out.push_str(value);
                out.push_str("\r\n");
            }
        }

        for item in &info[..effective] {
            match item.kind {
                SignatureKind::Hash => {
                    if !self.prev_hash.is_empty() {
                        out.push_str("Previous-Hash:");
                        out.push_str(&self.prev_hash);
                        out.push_str("\r\n");
                    }
                    if !self.hash.is_empty() {
                        out.push_str("Hash:");
                        out.push_str(&self.hash);
                        out.push_str("\r\n");
                    }
                }
                SignatureKind::Signature => {
                    if let Some(value) = self.signature(item.name) {
                        out.push_str(item.name);
                        out.push_str("-Signature:");
                        out.push_str(value);
                        out.push_str("\r\n");
                    }
                }
            }
        }

        out.into_bytes()
    }

    /// Check every data-field rule for this entry type, returning the first
    /// violated one.
    pub fn validate(&self) -> Result<()> {
        validate::validate_fields(self.entry_type, &self.fields, self.required_fields())
    }

    /// True if the data fields alone are valid (ignoring signature state).
    pub fn is_data_compliant(&self) -> bool {
        self.validate().is_ok()
    }

    /// True if the entry is fully compliant: valid data fields plus a value
    /// in every non-optional signature slot.
    pub fn is_compliant(&self) -> bool {
        if !self.is_data_compliant() {
            return false;
        }
        self.signature_info().iter().all(|item| {
            item.optional
                || match item.kind {
                    SignatureKind::Hash => !self.hash.is_empty(),
                    SignatureKind::Signature => self.signature(item.name).is_some(),
                }
        })
    }

    /// Cryptographically sign the named slot with an ED25519 seed key.
    ///
    /// The slot and every slot at an equal or greater level are cleared
    /// first — they can no longer be valid once an earlier level changes —
    /// and the signature is computed over the canonical bytes up to this
    /// slot's own boundary, so it never covers itself. The entry hash counts
    /// as a slot here: signing an Organization slot clears the hash and the
    /// User signature both.
    pub fn sign(&mut self, signing_key: &CryptoString, sigtype: &str) -> Result<()> {
        if signing_key.prefix() != "ED25519" {
            return Err(Error::UnsupportedAlgorithm(signing_key.prefix().clone()));
        }
        let index = self
            .slot_index(sigtype)
            .ok_or_else(|| Error::UnknownSignatureType(sigtype.to_string()))?;
        self.clear_slots_from(index);

        // We pass around 32-byte ed25519 seeds, not expanded private keys.
        let seed_bytes = Zeroizing::new(signing_key.raw_data()?);
        let seed: [u8; 32] = seed_bytes
            .as_slice()
            .try_into()
            .map_err(|_| Error::CryptoStringDecode)?;
        let signing = ed25519_consensus::SigningKey::from(seed);

        let signature = signing.sign(&self.canonical_bytes(Some(index + 1)));
        let encoded = CryptoString::from_bytes("ED25519", &signature.to_bytes())?;
        self.signatures
            .insert(sigtype.to_string(), encoded.as_string());
        Ok(())
    }

    /// Generate the entry hash, which covers the expected signatures and the
    /// previous hash if one is set. Supported algorithms are `BLAKE3-256`,
    /// `BLAKE2B-256`, `SHA-256`, and `SHA3-256`; anything else is a hard
    /// error.
    pub fn generate_hash(&mut self, algorithm: &str) -> Result<()> {
        let algo = HashAlgorithm::from_prefix(algorithm)?;
        let index = self
            .hash_slot_index()
            .ok_or_else(|| Error::UnknownSignatureType("Hashes".to_string()))?;
        let level = self.signature_info()[index].level;
        self.clear_slots_from(index);

        let digest = algo.hash_to_cstring(&self.canonical_bytes(Some(level)))?;
        self.hash = digest.as_string();
        Ok(())
    }

    /// Verify the named signature slot against the given ED25519 public key.
    ///
    /// Structural problems — empty slot, undecodable signature, an algorithm
    /// outside the supported set — are distinct errors, so callers can tell
    /// "nothing to check" from "check failed". A well-formed signature that
    /// does not match comes back as [`Error::SignatureInvalid`].
    pub fn verify_signature(&self, verify_key: &CryptoString, sigtype: &str) -> Result<()> {
        if verify_key.prefix() != "ED25519" {
            return Err(Error::UnsupportedAlgorithm(verify_key.prefix().clone()));
        }
        let index = self
            .slot_index(sigtype)
            .ok_or_else(|| Error::UnknownSignatureType(sigtype.to_string()))?;
        let level = self.signature_info()[index].level;

        let stored = self
            .signature(sigtype)
            .ok_or_else(|| Error::SignatureAbsent(sigtype.to_string()))?;
        let sig = CryptoString::from_str(stored)?;
        if sig.prefix() != "ED25519" {
            return Err(Error::UnsupportedAlgorithm(sig.prefix().clone()));
        }
        let sig_bytes: [u8; 64] = sig
            .raw_data()?
            .as_slice()
            .try_into()
            .map_err(|_| Error::CryptoStringDecode)?;

        let key_bytes: [u8; 32] = verify_key
            .raw_data()?
            .as_slice()
            .try_into()
            .map_err(|_| Error::CryptoStringDecode)?;
        let public = ed25519_consensus::VerificationKey::try_from(key_bytes)
            .map_err(|_| Error::CryptoStringDecode)?;

        // the bytes as they were before this slot was added
        public
            .verify(
                &ed25519_consensus::Signature::from(sig_bytes),
                &self.canonical_bytes(Some(level - 1)),
            )
            .map_err(|_| Error::SignatureInvalid(sigtype.to_string()))
    }

    /// Verify the chain of custody between this entry and its predecessor:
    /// same type, index exactly one greater, and a Custody signature that
    /// verifies against the predecessor's signing-capable key.
    pub fn verify_chain(&self, previous: &Entry) -> Result<()> {
        if previous.entry_type != self.entry_type {
            return Err(Error::EntryTypeMismatch);
        }
        if self.signature("Custody").is_none() {
            return Err(Error::SignatureAbsent("Custody".to_string()));
        }

        let prev_index = previous.index()?;
        if self.index()? != prev_index + 1 {
            return Err(Error::ChainDiscontinuity);
        }

        let verify_field = custody_key_field(self.entry_type);
        let key_value = previous
            .field(verify_field)
            .ok_or_else(|| Error::MissingField(verify_field.to_string()))?;
        let key = CryptoString::from_str(key_value)?;

        self.verify_signature(&key, "Custody")
    }

    /// Create this entry's successor: a new entry of the same type with the
    /// fields copied, the index incremented by exactly one, a freshly
    /// generated key set installed, the predecessor's hash carried as
    /// metadata, and a Custody signature made with `custody_key` — the
    /// *predecessor's* signing key, which is what lets a verifier prove
    /// continuity.
    ///
    /// The result is deliberately only partially signed; the caller must
    /// complete the remaining slots before the successor is compliant. The
    /// returned map holds each generated key twice, under
    /// `<FieldName>.public` and `<FieldName>.private`.
    ///
    /// Required key fields are always rotated. Optional ones (an
    /// organization's secondary verification key) are rotated only when
    /// `rotate_optional` is set; when that should happen is the caller's
    /// policy, not ours.
    pub fn chain<R: RngCore + CryptoRng>(
        &self,
        custody_key: &CryptoString,
        rotate_optional: bool,
        rng: &mut R,
    ) -> Result<(Entry, HashMap<String, CryptoString>)> {
        if custody_key.prefix() != "ED25519" {
            return Err(Error::UnsupportedAlgorithm(custody_key.prefix().clone()));
        }
        if !self.is_compliant() {
            return Err(Error::NotCompliant);
        }

        let mut new_entry = Entry::new(self.entry_type);
        for (name, value) in &self.fields {
            new_entry.fields.insert(name.clone(), value.clone());
        }
        new_entry
            .fields
            .insert("Index".to_string(), (self.index()? + 1).to_string());
        new_entry.prev_hash = self.hash.clone();

        let out_keys = match self.entry_type {
            EntryType::User => crypto::generate_user_keys(rng)?,
            EntryType::Organization => crypto::generate_org_keys(rng, rotate_optional)?,
        };

        for info in self.key_info() {
            match out_keys.get(&format!("{}.public", info.field_name())) {
                Some(key) => {
                    new_entry
                        .fields
                        .insert(info.field_name().to_string(), key.as_string());
                }
                None if !info.optional() => {
                    return Err(Error::KeyRotationIncomplete(info.field_name().to_string()));
                }
                None => {}
            }
        }

        new_entry.sign(custody_key, "Custody")?;
        Ok((new_entry, out_keys))
    }

    /// Build an entry from a serialized text block.
    ///
    /// CAUTION: the input is untrusted. Lines are parsed into an
    /// intermediate list and validated structurally before any entry is
    /// constructed, so a rejected parse never leaves a half-populated object
    /// behind. Field *format* checking is the validator's job, invoked
    /// separately by the caller.
    pub fn parse(text: &str) -> Result<Entry> {
        let mut lines: Vec<&str> = text.split("\r\n").collect();
        if lines.last() == Some(&"") {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(Error::MalformedInput(0));
        }

        // optional envelope; a header without the matching footer is fatal
        let mut start = 0;
        let mut end = lines.len();
        if lines[0].trim() == ENTRY_BEGIN {
            if lines[end - 1].trim() != ENTRY_END {
                return Err(Error::EnvelopeMismatch);
            }
            start += 1;
            end -= 1;
        }

        let type_line = lines[start..end]
            .iter()
            .map(|line| line.trim())
            .find(|line| !line.is_empty())
            .ok_or(Error::MalformedInput(0))?;
        let entry_type = match type_line {
            "Type:User" => EntryType::User,
            "Type:Organization" => EntryType::Organization,
            _ => return Err(Error::EntryTypeMismatch),
        };

        // First pass: split every line into the intermediate representation.
        let mut pairs: Vec<(usize, &str, &str)> = Vec::with_capacity(end - start);
        for (linenum, raw) in lines[start..end].iter().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or(Error::MalformedInput(linenum + 1))?;
            pairs.push((linenum + 1, name, value));
        }

        // Second pass: route and validate; nothing touches an Entry until
        // the whole block is known good.
        let signature_info = match entry_type {
            EntryType::Organization => ORG_SIGNATURE_INFO,
            EntryType::User => USER_SIGNATURE_INFO,
        };
        let mut fields: HashMap<String, String> = HashMap::new();
        let mut signatures: HashMap<String, String> = HashMap::new();
        let mut prev_hash = String::new();
        let mut hash = String::new();

        for (_linenum, name, value) in &pairs {
            if *name == "Type" {
                if *value != entry_type.as_str() {
                    return Err(Error::EntryTypeMismatch);
                }
            } else if let Some(slot) = name.strip_suffix("-Signature") {
                let known = signature_info
                    .iter()
                    .any(|item| item.name == slot && item.kind == SignatureKind::Signature);
                if !known {
                    return Err(Error::UnknownSignatureType(slot.to_string()));
                }
                signatures.insert(slot.to_string(), value.to_string());
            } else if *name == "Hash" {
                hash = value.to_string();
            } else if *name == "Previous-Hash" {
                prev_hash = value.to_string();
            } else {
                fields.insert(name.to_string(), value.to_string());
            }
        }

        Ok(Entry {
            entry_type,
            fields,
            signatures,
            prev_hash,
            hash,
        })
    }

    /// The entry's position in its keycard chain.
    pub fn index(&self) -> Result<u64> {
        self.field("Index")
            .ok_or_else(|| Error::MissingField("Index".to_string()))?
            .parse()
            .map_err(|_| Error::InvalidFieldFormat("Index".to_string()))
    }
}

/// Two entries are equal when their full canonical serializations are
/// byte-identical — the same definition the signatures themselves use.
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.entry_type == other.entry_type
            && self.canonical_bytes(None) == other.canonical_bytes(None)
    }
}

impl Eq for Entry {}

fn default_expiration_days(entry_type: EntryType) -> i64 {
    match entry_type {
        EntryType::Organization => 365,
        EntryType::User => 90,
    }
}

fn expiration_string(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days))
        .format("%Y%m%d")
        .to_string()
}

/// The predecessor field whose key must have signed a successor's creation.
fn custody_key_field(entry_type: EntryType) -> &'static str {
    match entry_type {
        EntryType::Organization => "Primary-Verification-Key",
        EntryType::User => "Contact-Request-Verification-Key",
    }
}
