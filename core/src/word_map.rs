// core/src/word_map.rs
//
// Word-level transition map: word -> next word -> probability.
// This is the artifact the chat bot's Markov chain loads, so it also
// carries the consumer-side operations (reading back, merging).

use crate::error::{NormalizeError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// next word -> probability, in insertion order.
pub type TransitionRow = IndexMap<String, f64>;

/// Normalized word-to-word mapping.
///
/// Serializes as a flat JSON object of objects. Key order is insertion
/// order at both levels, never sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordFrequencyMap {
    rows: IndexMap<String, TransitionRow>,
}

impl WordFrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row. A row already present under `word` is replaced in
    /// place and returned; its position does not move.
    pub fn insert_row(&mut self, word: String, row: TransitionRow) -> Option<TransitionRow> {
        self.rows.insert(word, row)
    }

    pub fn row(&self, word: &str) -> Option<&TransitionRow> {
        self.rows.get(word)
    }

    /// P(next | word), or `None` when the pair was never observed.
    pub fn probability(&self, word: &str, next: &str) -> Option<f64> {
        self.rows.get(word).and_then(|row| row.get(next)).copied()
    }

    /// Sum of a row's weights; 1.0 up to rounding for a freshly normalized row.
    pub fn row_sum(&self, word: &str) -> Option<f64> {
        self.rows.get(word).map(|row| row.values().sum())
    }

    /// Number of source words
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of (word, next) pairs across all rows
    pub fn total_transitions(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TransitionRow)> {
        self.rows.iter()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Fold `other` into `self`.
    ///
    /// Pairs present in both maps get the mean of the two weights. Pairs
    /// only in `other` are appended with their weight unchanged.
    pub fn merge(&mut self, other: &WordFrequencyMap) {
        for (word, other_row) in &other.rows {
            let row = self.rows.entry(word.clone()).or_default();
            for (next, &weight) in other_row {
                match row.get_mut(next) {
                    Some(existing) => *existing = (*existing + weight) / 2.0,
                    None => {
                        row.insert(next.clone(), weight);
                    }
                }
            }
        }
    }

    /// Pretty-printed JSON with `indent` spaces per level.
    pub fn to_json_bytes(&self, indent: usize) -> Result<Vec<u8>> {
        let indent = " ".repeat(indent);
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).map_err(NormalizeError::Serialize)?;
        Ok(buf)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|source| NormalizeError::Parse { path: None, source })
    }

    /// Write the map to `path`.
    ///
    /// Bytes go to a temporary file next to `path` which is then renamed
    /// over it, so a failed write never leaves a truncated map behind.
    pub fn save<P: AsRef<Path>>(&self, path: P, indent: usize) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_json_bytes(indent)?;
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let temp = NamedTempFile::new_in(parent).map_err(|e| NormalizeError::io(parent, e))?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            writer
                .write_all(&bytes)
                .and_then(|_| writer.flush())
                .map_err(|e| NormalizeError::io(temp.path(), e))?;
        }
        temp.persist(path)
            .map_err(|e| NormalizeError::io(path, e.error))?;

        info!(
            path = %path.display(),
            words = self.len(),
            transitions = self.total_transitions(),
            "wrote word frequency map"
        );
        Ok(())
    }

    /// Read a map previously written by [`WordFrequencyMap::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| NormalizeError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| NormalizeError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// Like [`WordFrequencyMap::load`], but a missing or unreadable map
    /// yields an empty one. Other I/O errors still fail.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::load(&path) {
            Ok(map) => Ok(map),
            Err(NormalizeError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                warn!(path = %path.as_ref().display(), "no word map found; starting empty");
                Ok(Self::new())
            }
            Err(NormalizeError::Parse { .. }) => {
                warn!(path = %path.as_ref().display(), "word map is not valid JSON; starting empty");
                Ok(Self::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl FromIterator<(String, TransitionRow)> for WordFrequencyMap {
    fn from_iter<I: IntoIterator<Item = (String, TransitionRow)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
