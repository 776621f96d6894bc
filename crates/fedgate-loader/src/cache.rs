//! Last-seen SDL cache
//!
//! Owned by the caller (typically the polling scheduler) and passed by
//! mutable reference into each round, so its lifetime spans rounds.

use std::collections::HashMap;

/// Keyed store of the last SDL text seen per subgraph.
///
/// Entries are only ever added or overwritten. A subgraph that disappears
/// from a later round's descriptor list leaves its entry behind; the loader
/// does not garbage-collect, and stale entries are harmless because lookups
/// are keyed by the current round's subgraph names.
#[derive(Debug, Clone, Default)]
pub struct SdlCache {
    entries: HashMap<String, String>,
}

impl SdlCache {
    /// Create an empty cache.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last-seen SDL for `name`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Record `sdl` as the last-seen text for `name`.
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, sdl: impl Into<String>) {
        self.entries.insert(name.into(), sdl.into());
    }

    /// Whether an entry exists for `name`.
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of cached entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no subgraph has been seen yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_previous_entry() {
        let mut cache = SdlCache::new();
        cache.insert("reviews", "type A { id: ID }");
        cache.insert("reviews", "type B { id: ID }");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("reviews"), Some("type B { id: ID }"));
    }

    #[test]
    fn entries_are_never_removed() {
        let mut cache = SdlCache::new();
        cache.insert("reviews", "type A { id: ID }");
        cache.insert("products", "type P { id: ID }");
        // No removal API exists; both entries persist.
        assert!(cache.contains("reviews"));
        assert!(cache.contains("products"));
    }
}
