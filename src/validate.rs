//! Field grammar validation for keycard entries.
//!
//! Everything here is fail-fast: the first violated rule comes back as a
//! typed error naming the field, so the session layer can tell a client
//! exactly what to fix. The boolean compliance predicates on `Entry` are
//! thin wrappers over these checks.
//!
//! Note that this only checks data format; it does not fail if the entry's
//! `Expires` field is past due. Expiry is a liveness question, not a
//! well-formedness one.

use crate::{
    cstring::CryptoString,
    entry::EntryType,
    error::{Error, Result},
};
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::OnceLock;

/// The hard ceiling on any single field value, in bytes.
pub(crate) const MAX_FIELD_LEN: usize = 6144;

/// The furthest out an expiration date may be, in days.
pub(crate) const MAX_EXPIRATION_DAYS: i64 = 1095;

macro_rules! static_pattern {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static PAT: OnceLock<Regex> = OnceLock::new();
            PAT.get_or_init(|| Regex::new($pattern).expect("hardcoded pattern"))
        }
    };
}

// UUID (dashes optional) followed by a slash and a dotted domain.
static_pattern!(
    contact_address_pattern,
    r"^[\da-fA-F]{8}-?[\da-fA-F]{4}-?[\da-fA-F]{4}-?[\da-fA-F]{4}-?[\da-fA-F]{12}/([a-zA-Z0-9]+\.)+[a-zA-Z0-9]+$"
);
static_pattern!(
    workspace_id_pattern,
    r"^[\da-fA-F]{8}-?[\da-fA-F]{4}-?[\da-fA-F]{4}-?[\da-fA-F]{4}-?[\da-fA-F]{12}$"
);
static_pattern!(domain_pattern, r"^([a-zA-Z0-9]+\.)+[a-zA-Z0-9]+$");
static_pattern!(language_pattern, r"^[a-zA-Z]{2,3}(,[a-zA-Z]{2,3})*$");
static_pattern!(ttl_pattern, r"^[0-9]{1,2}$");

fn invalid(field: &str) -> Error {
    Error::InvalidFieldFormat(field.to_string())
}

fn required<'a>(fields: &'a HashMap<String, String>, name: &str) -> Result<&'a str> {
    fields
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::MissingField(name.to_string()))
}

/// Parse a `YYYYMMDD` expiration date.
pub(crate) fn parse_expires(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y%m%d").map_err(|_| invalid("Expires"))
}

/// Parse a `YYYYMMDDTHHMMSSZ` timestamp.
pub(crate) fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%SZ").map_err(|_| invalid("Timestamp"))
}

fn validate_index(fields: &HashMap<String, String>) -> Result<()> {
    let value = required(fields, "Index")?;
    match value.parse::<u64>() {
        Ok(index) if index >= 1 => Ok(()),
        _ => Err(invalid("Index")),
    }
}

// A name must contain at least one printable code point and be at most 64
// code points long.
fn validate_name(field: &str, value: &str) -> Result<()> {
    if !value.chars().any(|c| !c.is_whitespace()) {
        return Err(invalid(field));
    }
    if value.chars().count() > 64 {
        return Err(invalid(field));
    }
    Ok(())
}

fn validate_contact_address(field: &str, value: &str) -> Result<()> {
    if contact_address_pattern().is_match(value) {
        Ok(())
    } else {
        Err(invalid(field))
    }
}

// We can't verify key material here, but the field must at least parse and
// decode as a prefixed crypto string.
fn validate_key_field(field: &str, value: &str) -> Result<()> {
    let key = CryptoString::from_str(value).map_err(|_| invalid(field))?;
    key.raw_data().map_err(|_| invalid(field))?;
    Ok(())
}

fn validate_ttl(fields: &HashMap<String, String>) -> Result<()> {
    let value = required(fields, "Time-To-Live")?;
    if !ttl_pattern().is_match(value) {
        return Err(invalid("Time-To-Live"));
    }
    match value.parse::<u8>() {
        Ok(days) if (1..=30).contains(&days) => Ok(()),
        _ => Err(invalid("Time-To-Live")),
    }
}

fn validate_expires(fields: &HashMap<String, String>) -> Result<()> {
    let date = parse_expires(required(fields, "Expires")?)?;
    let horizon = Utc::now().date_naive() + Duration::days(MAX_EXPIRATION_DAYS);
    if date > horizon {
        return Err(invalid("Expires"));
    }
    Ok(())
}

fn validate_timestamp(fields: &HashMap<String, String>) -> Result<()> {
    let stamp = parse_timestamp(required(fields, "Timestamp")?)?;
    if stamp > Utc::now().naive_utc() {
        return Err(invalid("Timestamp"));
    }
    Ok(())
}

fn validate_org_fields(fields: &HashMap<String, String>) -> Result<()> {
    validate_index(fields)?;
    validate_name("Name", required(fields, "Name")?)?;
    if !domain_pattern().is_match(required(fields, "Domain")?) {
        return Err(invalid("Domain"));
    }
    validate_contact_address("Contact-Admin", required(fields, "Contact-Admin")?)?;
    validate_key_field("Primary-Verification-Key", required(fields, "Primary-Verification-Key")?)?;
    validate_key_field("Encryption-Key", required(fields, "Encryption-Key")?)?;
    validate_ttl(fields)?;
    validate_expires(fields)?;
    validate_timestamp(fields)?;

    for field in ["Contact-Abuse", "Contact-Support"] {
        if let Some(value) = fields.get(field) {
            validate_contact_address(field, value)?;
        }
    }
    if let Some(value) = fields.get("Language") {
        if !language_pattern().is_match(value) {
            return Err(invalid("Language"));
        }
    }
    if let Some(value) = fields.get("Secondary-Verification-Key") {
        validate_key_field("Secondary-Verification-Key", value)?;
    }
    Ok(())
}

fn validate_user_fields(fields: &HashMap<String, String>) -> Result<()> {
    validate_index(fields)?;

    let workspace = required(fields, "Workspace-ID")?;
    if (workspace.len() != 36 && workspace.len() != 32)
        || !workspace_id_pattern().is_match(workspace)
    {
        return Err(invalid("Workspace-ID"));
    }

    if !domain_pattern().is_match(required(fields, "Domain")?) {
        return Err(invalid("Domain"));
    }

    for field in [
        "Contact-Request-Verification-Key",
        "Contact-Request-Encryption-Key",
        "Encryption-Key",
        "Verification-Key",
    ] {
        validate_key_field(field, required(fields, field)?)?;
    }

    validate_ttl(fields)?;
    validate_expires(fields)?;
    validate_timestamp(fields)?;

    if let Some(value) = fields.get("Name") {
        validate_name("Name", value)?;
    }
    if let Some(value) = fields.get("User-ID") {
        if value.chars().any(char::is_whitespace)
            || value.contains(['\\', '/', '"'])
            || value.chars().count() > 64
        {
            return Err(invalid("User-ID"));
        }
    }
    Ok(())
}

/// Validate every field rule for an entry of the given type: required-field
/// presence and whitespace hygiene, the global size ceiling, and the
/// type-specific grammar. Returns the first violated rule.
pub(crate) fn validate_fields(
    entry_type: EntryType,
    fields: &HashMap<String, String>,
    required_fields: &[&str],
) -> Result<()> {
    for name in required_fields {
        let value = required(fields, name)?;
        if value != value.trim() {
            return Err(invalid(name));
        }
    }

    // A present field may not be empty and may not exceed the size ceiling.
    for (name, value) in fields {
        if value.is_empty() {
            return Err(Error::MissingField(name.clone()));
        }
        if value.len() > MAX_FIELD_LEN {
            return Err(invalid(name));
        }
    }

    match entry_type {
        EntryType::Organization => validate_org_fields(fields),
        EntryType::User => validate_user_fields(fields),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn base_fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn ttl_bounds() {
        for (value, ok) in [("0", false), ("1", true), ("30", true), ("31", false), ("x", false)] {
            let fields = base_fields(&[("Time-To-Live", value)]);
            assert_eq!(validate_ttl(&fields).is_ok(), ok, "ttl {}", value);
        }
    }

    #[test]
    fn expires_horizon() {
        let today = Utc::now().date_naive();
        let tomorrow = (today + Duration::days(1)).format("%Y%m%d").to_string();
        let too_far = (today + Duration::days(1096)).format("%Y%m%d").to_string();
        let at_limit = (today + Duration::days(1095)).format("%Y%m%d").to_string();

        assert!(validate_expires(&base_fields(&[("Expires", &tomorrow)])).is_ok());
        assert!(validate_expires(&base_fields(&[("Expires", &at_limit)])).is_ok());
        assert!(validate_expires(&base_fields(&[("Expires", &too_far)])).is_err());
        assert!(validate_expires(&base_fields(&[("Expires", "2024-01-01")])).is_err());
        assert!(validate_expires(&base_fields(&[("Expires", "20241301")])).is_err());
    }

    #[test]
    fn timestamp_must_not_be_in_the_future() {
        let now = Utc::now().naive_utc();
        let past = (now - Duration::hours(1)).format("%Y%m%dT%H%M%SZ").to_string();
        let future = (now + Duration::hours(1)).format("%Y%m%dT%H%M%SZ").to_string();

        assert!(validate_timestamp(&base_fields(&[("Timestamp", &past)])).is_ok());
        assert!(validate_timestamp(&base_fields(&[("Timestamp", &future)])).is_err());
        assert!(validate_timestamp(&base_fields(&[("Timestamp", "20240101")])).is_err());
    }

    #[test]
    fn name_rules() {
        assert!(validate_name("Name", "Corbin Simons").is_ok());
        assert!(validate_name("Name", "   ").is_err());
        assert!(validate_name("Name", &"x".repeat(64)).is_ok());
        assert!(validate_name("Name", &"x".repeat(65)).is_err());
        // code points, not bytes
        assert!(validate_name("Name", &"é".repeat(64)).is_ok());
    }

    #[test]
    fn contact_address_grammar() {
        assert!(validate_contact_address(
            "Contact-Admin",
            "ae406f54-0923-4401-a47e-a4a6545e989b/example.com"
        )
        .is_ok());
        assert!(validate_contact_address(
            "Contact-Admin",
            "ae406f5409234401a47ea4a6545e989b/example.com"
        )
        .is_ok());
        assert!(validate_contact_address("Contact-Admin", "admin/example.com").is_err());
        assert!(validate_contact_address(
            "Contact-Admin",
            "ae406f54-0923-4401-a47e-a4a6545e989b"
        )
        .is_err());
    }

    #[test]
    fn workspace_and_domain_grammar() {
        assert!(workspace_id_pattern().is_match("11111111-2222-3333-4444-555555555555"));
        assert!(workspace_id_pattern().is_match("11111111222233334444555555555555"));
        assert!(!workspace_id_pattern().is_match("not-a-uuid"));
        assert!(domain_pattern().is_match("example.com"));
        assert!(domain_pattern().is_match("mail.example.co.uk"));
        assert!(!domain_pattern().is_match("example"));
        assert!(!domain_pattern().is_match(".example.com"));
        assert!(!domain_pattern().is_match("exa mple.com"));
    }

    #[test]
    fn language_grammar() {
        for (value, ok) in [("en", true), ("eng", true), ("en,fr,de", true), ("e", false), ("en;fr", false)] {
            assert_eq!(language_pattern().is_match(value), ok, "language {}", value);
        }
    }
}
