//! Memo of resolved accent colors.
//!
//! Keys are normalized color strings, values the triple they resolved to.
//! Colors are treated as pure functions of their string form, so the map is
//! unbounded and entries are never invalidated individually; the owner
//! clears it wholesale on teardown.

use ahash::AHashMap;

use crate::color::HslTriple;

#[derive(Debug, Default)]
pub struct ColorCache {
    entries: AHashMap<String, HslTriple>,
}

impl ColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a normalized color.
    pub fn get(&self, key: &str) -> Option<HslTriple> {
        self.entries.get(key).copied()
    }

    /// Insert a resolved color. Last writer wins; since values are
    /// deterministic for a key, overwriting is harmless.
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: String, value: HslTriple) -> Option<HslTriple> {
        self.entries.insert(key, value)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_insert_get() {
        let mut cache = ColorCache::new();
        cache.insert("#FF0000".to_string(), HslTriple::new(0, 100, 50));
        cache.insert("#00FF00".to_string(), HslTriple::new(120, 100, 50));

        assert_eq!(cache.get("#FF0000"), Some(HslTriple::new(0, 100, 50)));
        assert_eq!(cache.get("#00FF00"), Some(HslTriple::new(120, 100, 50)));
        assert_eq!(cache.get("#0000FF"), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_keys_are_exact() {
        let mut cache = ColorCache::new();
        cache.insert("#abc".to_string(), HslTriple::new(210, 25, 73));
        assert!(cache.contains_key("#abc"));
        assert!(!cache.contains_key("abc"));
        assert!(!cache.contains_key("#ABC"));
    }

    #[test]
    fn test_last_writer_wins() {
        let mut cache = ColorCache::new();
        let first = cache.insert("#000".to_string(), HslTriple::new(0, 0, 0));
        let second = cache.insert("#000".to_string(), HslTriple::new(1, 1, 1));
        assert_eq!(first, None);
        assert_eq!(second, Some(HslTriple::new(0, 0, 0)));
        assert_eq!(cache.get("#000"), Some(HslTriple::new(1, 1, 1)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = ColorCache::new();
        cache.insert("#fff".to_string(), HslTriple::new(0, 0, 100));
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("#fff"), None);
    }
}
