//! A bounded, thread-safe, least-recently-used cache of resolved keycards.
//!
//! Resolution is expensive — network round trips plus a full chain
//! verification — so a server keeps recently seen cards warm, keyed by owner
//! (a workspace address or a domain). Lookups hand out clones: a snapshot
//! the caller may mutate freely without racing other sessions, at the cost
//! of a copy. Cards are small, so the copy is the right trade.

use crate::keycard::Keycard;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

struct Inner {
    cards: HashMap<String, Keycard>,
    // front is the coldest owner, back the hottest
    order: VecDeque<String>,
}

/// A fixed-capacity keycard cache with LRU eviction.
pub struct KeycardCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl KeycardCache {
    /// Create a cache holding at most `capacity` cards. A zero capacity is
    /// treated as one; a cache that can hold nothing isn't a cache.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Inner {
                cards: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            }),
            capacity,
        }
    }

    /// Insert or replace the card for an owner, marking it most recently
    /// used. At capacity, exactly one card — the least recently used — is
    /// evicted to make room.
    pub fn insert(&self, owner: &str, card: Keycard) {
        let mut inner = self.inner.lock();
        if inner.cards.contains_key(owner) {
            promote(&mut inner.order, owner);
        } else {
            if inner.cards.len() >= self.capacity {
                if let Some(coldest) = inner.order.pop_front() {
                    inner.cards.remove(&coldest);
                }
            }
            inner.order.push_back(owner.to_string());
        }
        inner.cards.insert(owner.to_string(), card);
    }

    /// Fetch a snapshot of an owner's card, promoting it to most recently
    /// used. Misses cost nothing.
    pub fn get(&self, owner: &str) -> Option<Keycard> {
        let mut inner = self.inner.lock();
        let card = inner.cards.get(owner).cloned()?;
        promote(&mut inner.order, owner);
        Some(card)
    }

    /// Drop an owner's card, if cached. Used when a resolver learns a card
    /// has been superseded.
    pub fn remove(&self, owner: &str) -> Option<Keycard> {
        let mut inner = self.inner.lock();
        let card = inner.cards.remove(owner)?;
        inner.order.retain(|entry| entry != owner);
        Some(card)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn promote(order: &mut VecDeque<String>, owner: &str) {
    order.retain(|entry| entry != owner);
    order.push_back(owner.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryType;
    use crate::keycard::tests::three_entry_card;

    fn empty_card() -> Keycard {
        Keycard::new(EntryType::User)
    }

    #[test]
    fn eviction_is_least_recently_used() {
        let cache = KeycardCache::new(2);
        cache.insert("alice/example.com", empty_card());
        cache.insert("bob/example.com", empty_card());

        // touching alice makes bob the coldest
        assert!(cache.get("alice/example.com").is_some());
        cache.insert("carol/example.com", empty_card());

        assert_eq!(cache.len(), 2);
        assert!(cache.get("bob/example.com").is_none());
        assert!(cache.get("alice/example.com").is_some());
        assert!(cache.get("carol/example.com").is_some());
    }

    #[test]
    fn exactly_one_card_evicted_at_capacity() {
        let cache = KeycardCache::new(3);
        for owner in ["a", "b", "c"] {
            cache.insert(owner, empty_card());
        }
        cache.insert("d", empty_card());
        assert_eq!(cache.len(), 3);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn reinsert_updates_without_evicting() {
        let cache = KeycardCache::new(2);
        cache.insert("alice", empty_card());
        cache.insert("bob", empty_card());
        cache.insert("alice", three_entry_card());

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("alice").unwrap().entries().len(), 3);
        assert!(cache.get("bob").is_some());
    }

    #[test]
    fn lookups_are_snapshots() {
        let cache = KeycardCache::new(4);
        cache.insert("alice", three_entry_card());

        // growing the snapshot must not reach into the cache
        let mut snapshot = cache.get("alice").unwrap();
        let mut fourth = crate::entry::Entry::new(EntryType::User);
        fourth.set_field("Index", "4").unwrap();
        snapshot.append(fourth).unwrap();
        assert_eq!(snapshot.entries().len(), 4);
        assert_eq!(cache.get("alice").unwrap().entries().len(), 3);
    }

    #[test]
    fn remove_forgets_the_owner() {
        let cache = KeycardCache::new(2);
        cache.insert("alice", empty_card());
        assert!(cache.remove("alice").is_some());
        assert!(cache.remove("alice").is_none());
        assert!(cache.is_empty());

        // removal also vacates the LRU slot
        cache.insert("bob", empty_card());
        cache.insert("carol", empty_card());
        assert_eq!(cache.len(), 2);
    }
}
