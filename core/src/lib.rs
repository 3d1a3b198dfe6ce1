//! wordfreq-core
//!
//! Turns a precomputed co-occurrence model (an id-keyed `spool_map` plus a
//! sparse id-to-id `freq_mat` of raw counts) into a word-to-word
//! probability map that a Markov text generator can load directly.
//!
//! Public API:
//! - `Model` - parsed and validated input model
//! - `IdToWord` - inverted spool map with fixed id overrides
//! - `normalize_row` / `normalize_matrix` - counts to probabilities
//! - `WordFrequencyMap` - output map: save, load, merge
//! - `Config` - paths, indent and overrides
//! - `run` - the whole load -> normalize -> save pass
use std::path::PathBuf;
use tracing::{info, warn};

pub mod error;
pub use error::{NormalizeError, Result};

pub mod config;
pub use config::Config;

pub mod model;
pub use model::{FrequencyMatrix, FrequencyRow, Model, SpoolMap};

pub mod lookup;
pub use lookup::{IdToWord, DEFAULT_ZERO_WORD, ZERO_ID};

pub mod normalize;
pub use normalize::{normalize_matrix, normalize_row};

pub mod word_map;
pub use word_map::{TransitionRow, WordFrequencyMap};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub words: usize,
    pub transitions: usize,
}

/// Build the id lookup for `model`, applying the configured overrides.
///
/// Id "0" always resolves to "you"; it is pinned after the configured
/// overrides so no config can rebind it.
pub fn build_lookup(model: &Model, config: &Config) -> IdToWord {
    let mut lookup = IdToWord::invert(&model.spool_map);
    for (id, word) in &config.id_overrides {
        if id == ZERO_ID {
            warn!(word = %word, "id 0 is fixed to \"{}\"; ignoring override", DEFAULT_ZERO_WORD);
            continue;
        }
        lookup.set_override(id.clone(), word.clone());
    }
    lookup.set_override(ZERO_ID, DEFAULT_ZERO_WORD);
    lookup
}

/// Normalize an in-memory model without touching the filesystem.
pub fn transform(model: &Model, config: &Config) -> Result<WordFrequencyMap> {
    let lookup = build_lookup(model, config);
    normalize_matrix(&model.freq_mat, &lookup)
}

/// Load `config.input`, normalize every row, write `config.output`.
///
/// The output file is only touched after every row has been normalized.
pub fn run(config: &Config) -> Result<RunSummary> {
    let model = Model::load(&config.input)?;
    let map = transform(&model, config)?;
    map.save(&config.output, config.indent)?;

    let summary = RunSummary {
        output: config.output.clone(),
        words: map.len(),
        transitions: map.total_transitions(),
    };
    info!(
        input = %config.input.display(),
        output = %summary.output.display(),
        words = summary.words,
        transitions = summary.transitions,
        "normalization complete"
    );
    Ok(summary)
}
