// core/src/normalize.rs
//
// Row normalization: raw counts -> P(target | source), re-keyed by word.

use crate::error::{NormalizeError, Result};
use crate::lookup::IdToWord;
use crate::model::{FrequencyMatrix, FrequencyRow};
use crate::word_map::{TransitionRow, WordFrequencyMap};
use tracing::{debug, warn};

/// Normalize one row.
///
/// Returns the source word and its distribution over target words. Fails
/// on any unresolvable id and on a row whose counts sum to zero (this
/// includes an empty row).
pub fn normalize_row<'a>(
    source_id: &str,
    row: &FrequencyRow,
    lookup: &'a IdToWord,
) -> Result<(&'a str, TransitionRow)> {
    let source_word = lookup.resolve(source_id, || "freq_mat as a source".to_string())?;

    let total: f64 = row.values().sum();
    if total == 0.0 {
        return Err(NormalizeError::ZeroTotal {
            source_id: source_id.to_string(),
        });
    }

    let mut probs = TransitionRow::with_capacity(row.len());
    for (target_id, &count) in row {
        let target_word =
            lookup.resolve(target_id, || format!("row `{}` as a target", source_id))?;
        if probs.insert(target_word.to_string(), count / total).is_some() {
            warn!(row = %source_id, word = %target_word, "two target ids share a word; keeping the later one");
        }
    }

    debug!(row = %source_id, word = %source_word, total, targets = probs.len(), "normalized row");
    Ok((source_word, probs))
}

/// Normalize every row of `matrix`, preserving row order.
///
/// Nothing is returned unless every row succeeds.
pub fn normalize_matrix(matrix: &FrequencyMatrix, lookup: &IdToWord) -> Result<WordFrequencyMap> {
    let mut out = WordFrequencyMap::new();
    for (source_id, row) in matrix {
        let (word, probs) = normalize_row(source_id, row, lookup)?;
        if out.insert_row(word.to_string(), probs).is_some() {
            warn!(row = %source_id, word = %word, "two source ids share a word; keeping the later row");
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpoolMap;

    fn lookup(pairs: &[(&str, &str)]) -> IdToWord {
        let spool: SpoolMap = pairs
            .iter()
            .map(|(w, id)| (w.to_string(), id.to_string()))
            .collect();
        IdToWord::with_default_override(&spool)
    }

    fn counts(pairs: &[(&str, f64)]) -> FrequencyRow {
        pairs.iter().map(|(id, n)| (id.to_string(), *n)).collect()
    }

    #[test]
    fn test_row_probabilities() {
        let lookup = lookup(&[("cat", "1"), ("dog", "2")]);
        let (word, probs) = normalize_row("1", &counts(&[("2", 3.0), ("0", 1.0)]), &lookup).unwrap();
        assert_eq!(word, "cat");
        assert_eq!(probs["dog"], 0.75);
        assert_eq!(probs["you"], 0.25);
        assert_eq!(probs.keys().collect::<Vec<_>>(), vec!["dog", "you"]);
    }

    #[test]
    fn test_zero_rows_fail() {
        let lookup = lookup(&[("cat", "1"), ("dog", "2")]);

        let err = normalize_row("1", &counts(&[("2", 0.0), ("0", 0.0)]), &lookup).unwrap_err();
        assert!(matches!(err, NormalizeError::ZeroTotal { ref source_id } if source_id == "1"));

        let err = normalize_row("1", &FrequencyRow::new(), &lookup).unwrap_err();
        assert!(matches!(err, NormalizeError::ZeroTotal { .. }));
    }

    #[test]
    fn test_unknown_ids_fail() {
        let lookup = lookup(&[("cat", "1")]);

        let err = normalize_row("1", &counts(&[("5", 1.0)]), &lookup).unwrap_err();
        assert!(matches!(err, NormalizeError::UnknownId { ref id, .. } if id == "5"));

        let err = normalize_row("9", &counts(&[("1", 1.0)]), &lookup).unwrap_err();
        assert!(matches!(err, NormalizeError::UnknownId { ref id, .. } if id == "9"));
    }

    #[test]
    fn test_source_id_zero_is_you() {
        let lookup = lookup(&[("hello", "0"), ("cat", "1")]);
        let (word, probs) = normalize_row("0", &counts(&[("1", 2.0)]), &lookup).unwrap();
        assert_eq!(word, "you");
        assert_eq!(probs["cat"], 1.0);
    }

    #[test]
    fn test_matrix_failure_returns_nothing() {
        let lookup = lookup(&[("cat", "1"), ("dog", "2")]);
        let mut matrix = FrequencyMatrix::new();
        matrix.insert("1".into(), counts(&[("2", 1.0)]));
        matrix.insert("2".into(), counts(&[("1", 0.0)]));
        assert!(normalize_matrix(&matrix, &lookup).is_err());
    }
}
