// src/crawl/visited.rs
// =============================================================================
// The set of addresses this crawl has already claimed.
//
// test_and_mark() checks AND inserts under one lock. Doing the check and the
// insert as two separate steps would let two tasks that discover the same
// link at the same moment both see "not visited" and both fetch it.
//
// Addresses are only ever added; the set lives exactly as long as one crawl.
// =============================================================================

use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct VisitedSet {
    addresses: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `address` as visited and returns whether it already was.
    ///
    /// `false` means the caller is the first (and only) task to claim it.
    pub fn test_and_mark(&self, address: &str) -> bool {
        // A poisoned lock only means another task panicked mid-insert;
        // the set itself is still a valid set, so keep going with it
        let mut addresses = self
            .addresses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // insert() returns false when the value was already there
        !addresses.insert(address.to_string())
    }

    #[cfg(test)]
    pub fn contains(&self, address: &str) -> bool {
        self.addresses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(address)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.addresses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why std::sync::Mutex and not tokio::sync::Mutex?
//    - We never hold the lock across an .await
//    - The critical section is one HashSet::insert, so a plain Mutex is
//      cheaper and can't be held while a task is suspended
//
// 2. Why does insert() do the "test" for us?
//    - HashSet::insert returns true if the value was newly added
//    - So one call both checks membership and records the address
// -----------------------------------------------------------------------------
