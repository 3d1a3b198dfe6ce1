use wordfreq_core::WordFrequencyMap;

/// Transitions of `word` by descending probability, at most `limit` of them.
/// `None` when the word has no row.
pub fn top_transitions<'a>(
    map: &'a WordFrequencyMap,
    word: &str,
    limit: Option<usize>,
) -> Option<Vec<(&'a str, f64)>> {
    let row = map.row(word)?;
    let mut entries: Vec<(&str, f64)> = row.iter().map(|(w, p)| (w.as_str(), *p)).collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries.truncate(limit.unwrap_or(entries.len()));
    Some(entries)
}

/// Text printed by `show_word_row`.
pub fn render_row(map: &WordFrequencyMap, word: &str, limit: Option<usize>) -> String {
    let Some(entries) = top_transitions(map, word, limit) else {
        return format!("Word '{}' not found", word);
    };
    let total = map.row(word).map_or(0, |r| r.len());
    let mut out = format!("'{}' has {} transitions:", word, total);
    for (i, (next, p)) in entries.iter().enumerate() {
        out.push_str(&format!("\n  {}. {} ({:.4})", i + 1, next, p));
    }
    out
}
