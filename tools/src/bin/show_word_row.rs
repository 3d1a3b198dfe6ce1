use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use wordfreq_core::WordFrequencyMap;
use wordfreq_tools::{logging, rows};

#[derive(Parser)]
struct Opts {
    /// Word map written by renormalize
    map: PathBuf,

    /// Source word to show
    word: String,

    /// Show at most this many transitions
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    logging::init_logging();
    let opts = Opts::parse();
    let map = WordFrequencyMap::load(&opts.map)
        .with_context(|| format!("loading {}", opts.map.display()))?;

    println!("{}", rows::render_row(&map, &opts.word, opts.limit));
    Ok(())
}
