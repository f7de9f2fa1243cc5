//! A keycard is one owner's complete entry chain, oldest first. The
//! container enforces the structural rules — uniform type, contiguous
//! one-based indices — at append time, and can verify the whole chain of
//! custody in one call. Serialization wraps each entry's canonical bytes in
//! `----- BEGIN ENTRY -----` / `----- END ENTRY -----` envelopes so cards
//! survive being pasted through things that mangle blank lines.

use crate::{
    entry::{Entry, EntryType, ENTRY_BEGIN, ENTRY_END},
    error::{Error, Result},
};
use getset::{CopyGetters, Getters};

/// An owner's full chain of entries.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Keycard {
    #[getset(get_copy = "pub")]
    card_type: EntryType,
    #[getset(get = "pub")]
    entries: Vec<Entry>,
}

impl Keycard {
    pub fn new(card_type: EntryType) -> Self {
        Self {
            card_type,
            entries: Vec::new(),
        }
    }

    /// The most recent entry, which is the one holding the owner's current
    /// keys.
    pub fn current(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Append the next entry in the chain. The entry must match the card's
    /// type and carry an index exactly one past the current tip.
    pub fn append(&mut self, entry: Entry) -> Result<()> {
        if entry.entry_type() != self.card_type {
            return Err(Error::EntryTypeMismatch);
        }
        if entry.index()? != self.entries.len() as u64 + 1 {
            return Err(Error::ChainDiscontinuity);
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Verify the card end to end: every entry fully compliant and every
    /// consecutive pair linked by a valid custody signature. The root entry
    /// has no predecessor, so it carries no custody obligation here; trusting
    /// it is the resolver's out-of-band problem.
    pub fn verify(&self) -> Result<()> {
        for entry in &self.entries {
            if !entry.is_compliant() {
                return Err(Error::NotCompliant);
            }
        }
        for pair in self.entries.windows(2) {
            pair[1].verify_chain(&pair[0])?;
        }
        Ok(())
    }

    /// Serialize the whole card as enveloped entry blocks.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(ENTRY_BEGIN);
            out.push_str("\r\n");
            // canonical bytes are valid UTF-8 by construction
            out.push_str(&String::from_utf8_lossy(&entry.canonical_bytes(None)));
            out.push_str(ENTRY_END);
            out.push_str("\r\n");
        }
        out
    }

    /// Parse a serialized card. Every entry block must be enveloped, parse
    /// cleanly, and match the type of the first; indices must be contiguous
    /// from 1. An unbalanced envelope anywhere rejects the whole card.
    pub fn parse(text: &str) -> Result<Keycard> {
        let mut card: Option<Keycard> = None;
        let mut block: Option<String> = None;

        for line in text.split("\r\n") {
            let trimmed = line.trim();
            if trimmed == ENTRY_BEGIN {
                if block.is_some() {
                    return Err(Error::EnvelopeMismatch);
                }
                block = Some(String::new());
            } else if trimmed == ENTRY_END {
                let accumulated = block.take().ok_or(Error::EnvelopeMismatch)?;
                let entry = Entry::parse(&accumulated)?;
                let chain = card.get_or_insert_with(|| Keycard::new(entry.entry_type()));
                chain.append(entry)?;
            } else if let Some(accumulated) = block.as_mut() {
                accumulated.push_str(line);
                accumulated.push_str("\r\n");
            } else if !trimmed.is_empty() {
                return Err(Error::EnvelopeMismatch);
            }
        }
        if block.is_some() {
            return Err(Error::EnvelopeMismatch);
        }
        card.ok_or(Error::MalformedInput(0))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::crypto::{self, test_rng};
    use crate::entry::tests::{complete_user_entry, user_entry};

    /// A verified three-entry user card plus the org signing key used
    /// throughout it.
    pub(crate) fn three_entry_card() -> Keycard {
        let mut rng = test_rng();
        let (mut entry, mut keys) = user_entry(&mut rng);
        let org_keys = crypto::generate_org_keys(&mut rng, false).unwrap();
        let org_signing = &org_keys["Primary-Verification-Key.private"];
        complete_user_entry(&mut entry, org_signing, &keys);

        let mut card = Keycard::new(EntryType::User);
        card.append(entry.clone()).unwrap();

        for _ in 0..2 {
            let custody = keys["Contact-Request-Verification-Key.private"].clone();
            let (mut next, next_keys) = entry.chain(&custody, false, &mut rng).unwrap();
            next.sign(org_signing, "Organization").unwrap();
            next.generate_hash("BLAKE2B-256").unwrap();
            next.sign(&next_keys["Verification-Key.private"], "User")
                .unwrap();
            card.append(next.clone()).unwrap();
            entry = next;
            keys = next_keys;
        }
        card
    }

    #[test]
    fn append_enforces_type_and_contiguity() {
        let mut rng = test_rng();
        let mut card = Keycard::new(EntryType::Organization);

        let (user, _) = user_entry(&mut rng);
        assert_eq!(card.append(user).err(), Some(Error::EntryTypeMismatch));

        let (mut org, _) = crate::entry::tests::org_entry(&mut rng);
        org.set_field("Index", "2").unwrap();
        assert_eq!(
            card.append(org.clone()).err(),
            Some(Error::ChainDiscontinuity)
        );

        org.set_field("Index", "1").unwrap();
        card.append(org).unwrap();
        assert_eq!(card.entries().len(), 1);
        assert_eq!(card.current().unwrap().index().unwrap(), 1);
    }

    #[test]
    fn verify_walks_the_whole_chain() {
        let card = three_entry_card();
        card.verify().unwrap();
        assert_eq!(card.entries().len(), 3);
        assert_eq!(card.current().unwrap().index().unwrap(), 3);

        // dropping a middle entry's custody signature breaks verification
        let mut broken = card.clone();
        let mut middle = broken.entries[1].clone();
        middle.set_field("Name", "Someone Else").unwrap();
        broken.entries[1] = middle;
        assert!(broken.verify().is_err());
    }

    #[test]
    fn text_round_trip() {
        let card = three_entry_card();
        let text = card.to_text();
        assert!(text.starts_with(ENTRY_BEGIN));

        let parsed = Keycard::parse(&text).unwrap();
        assert_eq!(parsed, card);
        parsed.verify().unwrap();
    }

    #[test]
    fn parse_rejects_broken_envelopes() {
        let card = three_entry_card();
        let text = card.to_text();

        // unterminated final block
        let truncated = &text[..text.len() - ENTRY_END.len() - 2];
        assert_eq!(
            Keycard::parse(truncated).err(),
            Some(Error::EnvelopeMismatch)
        );

        // stray footer
        let stray = format!("{}\r\n{}", ENTRY_END, text);
        assert_eq!(Keycard::parse(&stray).err(), Some(Error::EnvelopeMismatch));

        // content outside any envelope
        let loose = format!("Type:User\r\n{}", text);
        assert_eq!(Keycard::parse(&loose).err(), Some(Error::EnvelopeMismatch));

        // nothing at all
        assert_eq!(Keycard::parse("").err(), Some(Error::MalformedInput(0)));
    }

    #[test]
    fn parse_rejects_mixed_types_and_index_gaps() {
        let card = three_entry_card();
        let mut rng = test_rng();
        let (org, _) = crate::entry::tests::org_entry(&mut rng);

        let mut text = card.to_text();
        text.push_str(ENTRY_BEGIN);
        text.push_str("\r\n");
        text.push_str(&String::from_utf8_lossy(&org.canonical_bytes(None)));
        text.push_str(ENTRY_END);
        text.push_str("\r\n");
        assert_eq!(Keycard::parse(&text).err(), Some(Error::EntryTypeMismatch));

        // duplicating the last block creates an index gap at append time
        let blocks = card.to_text();
        let last_block_start = blocks.rfind(ENTRY_BEGIN).unwrap();
        let duplicated = format!("{}{}", blocks, &blocks[last_block_start..]);
        assert_eq!(
            Keycard::parse(&duplicated).err(),
            Some(Error::ChainDiscontinuity)
        );
    }
}
