// core/src/lookup.rs
//
// Inverted spool map: canonical id string -> word.

use crate::error::{NormalizeError, Result};
use crate::model::SpoolMap;
use indexmap::IndexMap;
use tracing::warn;

/// Id that always resolves to [`DEFAULT_ZERO_WORD`] unless configured otherwise.
pub const ZERO_ID: &str = "0";
pub const DEFAULT_ZERO_WORD: &str = "you";

/// Id -> word lookup built by inverting a [`SpoolMap`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdToWord {
    words: IndexMap<String, String>,
}

impl IdToWord {
    /// Invert `spool`. When two words share an id the later one wins.
    pub fn invert(spool: &SpoolMap) -> Self {
        let mut words = IndexMap::with_capacity(spool.len() + 1);
        for (word, id) in spool {
            if let Some(previous) = words.insert(id.clone(), word.clone()) {
                warn!(id = %id, dropped = %previous, kept = %word, "duplicate id in spool_map");
            }
        }
        Self { words }
    }

    /// Invert `spool` and pin id "0" to "you".
    pub fn with_default_override(spool: &SpoolMap) -> Self {
        let mut lookup = Self::invert(spool);
        lookup.set_override(ZERO_ID, DEFAULT_ZERO_WORD);
        lookup
    }

    /// Force `id` to resolve to `word`, replacing whatever the spool map said.
    pub fn set_override(&mut self, id: impl Into<String>, word: impl Into<String>) {
        self.words.insert(id.into(), word.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.words.get(id).map(String::as_str)
    }

    /// Resolve `id`, failing with [`NormalizeError::UnknownId`].
    pub fn resolve(&self, id: &str, context: impl FnOnce() -> String) -> Result<&str> {
        self.get(id).ok_or_else(|| NormalizeError::UnknownId {
            id: id.to_string(),
            context: context(),
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spool(pairs: &[(&str, &str)]) -> SpoolMap {
        pairs
            .iter()
            .map(|(w, id)| (w.to_string(), id.to_string()))
            .collect()
    }

    #[test]
    fn test_inversion() {
        let lookup = IdToWord::invert(&spool(&[("cat", "1"), ("dog", "2")]));
        assert_eq!(lookup.get("1"), Some("cat"));
        assert_eq!(lookup.get("2"), Some("dog"));
        assert_eq!(lookup.get("0"), None);
        assert_eq!(lookup.len(), 2);
        assert!(!lookup.is_empty());
        assert!(IdToWord::invert(&SpoolMap::new()).is_empty());
    }

    #[test]
    fn test_duplicate_ids_last_wins() {
        let lookup = IdToWord::invert(&spool(&[("cat", "1"), ("kitten", "1")]));
        assert_eq!(lookup.get("1"), Some("kitten"));
        assert_eq!(lookup.len(), 1);
    }

    #[test]
    fn test_zero_override_beats_spool_map() {
        let lookup = IdToWord::with_default_override(&spool(&[("hello", "0"), ("cat", "1")]));
        assert_eq!(lookup.get("0"), Some("you"));
        assert_eq!(lookup.get("1"), Some("cat"));

        let lookup = IdToWord::with_default_override(&SpoolMap::new());
        assert_eq!(lookup.get("0"), Some("you"));
    }

    #[test]
    fn test_resolve_unknown() {
        let lookup = IdToWord::with_default_override(&SpoolMap::new());
        let err = lookup.resolve("5", || "row `1`".to_string()).unwrap_err();
        assert!(matches!(err, NormalizeError::UnknownId { ref id, .. } if id == "5"));
    }
}
