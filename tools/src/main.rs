use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use wordfreq_core::Config;
use wordfreq_tools::logging;

/// Normalize a gerry co-occurrence model into a word-to-word probability map.
#[derive(Parser)]
struct Args {
    /// TOML config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model file with `spool_map` and `freq_mat` [default: gerryModel.json]
    #[arg(long)]
    input: Option<PathBuf>,

    /// Where to write the word map [default: word_freq_map.json]
    #[arg(long)]
    output: Option<PathBuf>,

    /// Spaces per indentation level [default: 4]
    #[arg(long)]
    indent: Option<usize>,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load_toml(path)?,
            None => Config::default(),
        };
        if let Some(input) = self.input {
            cfg.input = input;
        }
        if let Some(output) = self.output {
            cfg.output = output;
        }
        if let Some(indent) = self.indent {
            cfg.indent = indent;
        }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    logging::init_logging();
    let cfg = Args::parse().into_config()?;
    tracing::debug!(?cfg, "resolved configuration");

    let summary = wordfreq_core::run(&cfg)
        .with_context(|| format!("normalizing {}", cfg.input.display()))?;

    println!(
        "Wrote {} words ({} transitions) to {}",
        summary.words,
        summary.transitions,
        summary.output.display()
    );
    Ok(())
}
