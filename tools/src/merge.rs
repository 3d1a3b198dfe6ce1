use anyhow::Result;
use std::path::Path;
use tracing::info;
use wordfreq_core::WordFrequencyMap;

/// Fold the maps at `paths` left to right with [`WordFrequencyMap::merge`].
///
/// A missing or corrupt input counts as an empty map, the same way the
/// bot treats its own map file on startup.
pub fn merge_files<P: AsRef<Path>>(paths: &[P]) -> Result<WordFrequencyMap> {
    let mut merged = WordFrequencyMap::new();
    for path in paths {
        let path = path.as_ref();
        let map = WordFrequencyMap::load_or_empty(path)?;
        info!(path = %path.display(), words = map.len(), "merging");
        merged.merge(&map);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn folds_left_to_right() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        let third = dir.path().join("third.json");
        fs::write(&first, r#"{"cat": {"dog": 0.5, "you": 0.5}}"#).unwrap();
        fs::write(&second, r#"{"cat": {"dog": 1.0}, "dog": {"cat": 1.0}}"#).unwrap();
        fs::write(&third, r#"{"cat": {"dog": 0.25}}"#).unwrap();

        let merged = merge_files(&[&first, &second, &third]).unwrap();
        // ((0.5 + 1.0) / 2 + 0.25) / 2
        assert_eq!(merged.probability("cat", "dog"), Some(0.5));
        assert_eq!(merged.probability("cat", "you"), Some(0.5));
        assert_eq!(merged.probability("dog", "cat"), Some(1.0));
        assert_eq!(merged.words().collect::<Vec<_>>(), vec!["cat", "dog"]);
    }

    #[test]
    fn missing_inputs_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.json");
        fs::write(&present, r#"{"a": {"b": 1.0}}"#).unwrap();

        let merged = merge_files(&[dir.path().join("absent.json"), present]).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.probability("a", "b"), Some(1.0));
    }
}
