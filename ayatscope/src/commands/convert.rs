//! `ayatscope convert`: raw `surah|ayat|text` dump to CSV.

use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter};

use super::AppContext;
use crate::cli::ConvertCommand;

pub fn run_convert(cmd: &ConvertCommand, ctx: &AppContext) -> Result<()> {
    let corpus = ctx.load_corpus(&cmd.input_file)?;

    match &cmd.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            corpus
                .write_csv(BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} verses to {}", corpus.len(), path.display());
            ctx.success_msg(format!("Converted {} verses to {}.", corpus.len(), path.display()));
        }
        None => {
            corpus
                .write_csv(io::stdout().lock())
                .context("Failed to write CSV to stdout")?;
        }
    }
    Ok(())
}
