use anyhow::{Context, Result};
use clap::Parser;
use ghost_solver::utils::prefix_free;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Removes every word whose stem is already a word, leaving a list Ghost can use.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Word list to filter (one word per line); reads standard input when omitted
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let content = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("Failed to read word list from stdin")?,
    };

    let filtered = prefix_free(content.lines()).context("Word list is not usable")?;

    let mut out = BufWriter::new(io::stdout().lock());
    for word in &filtered.kept {
        writeln!(out, "{}", word)?;
    }
    out.flush()?;

    log::info!(
        "kept {} words, dropped {} that extend a shorter word",
        filtered.kept.len(),
        filtered.dropped.len()
    );
    Ok(())
}
