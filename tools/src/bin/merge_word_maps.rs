use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use wordfreq_tools::{logging, merge};

#[derive(Parser)]
struct Opts {
    /// Word maps to merge, folded left to right
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Output word map
    #[arg(short, long, default_value = "word_freq_map.json")]
    out: PathBuf,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 4)]
    indent: usize,
}

fn main() -> Result<()> {
    logging::init_logging();
    let opts = Opts::parse();

    let merged = merge::merge_files(opts.inputs.as_slice())?;
    merged
        .save(&opts.out, opts.indent)
        .with_context(|| format!("writing {}", opts.out.display()))?;
    println!(
        "merged {} maps into {} words at {}",
        opts.inputs.len(),
        merged.len(),
        opts.out.display()
    );
    Ok(())
}
