//! `ayatscope report`: full analysis as JSON.

use anyhow::{Context, Result};
use std::fs;

use ayatscope_core::run_analysis;

use super::{print_json, AppContext};
use crate::cli::ReportCommand;

pub fn run_report(cmd: &ReportCommand, ctx: &AppContext) -> Result<()> {
    let corpus = ctx.load_corpus(&cmd.input_file)?;
    let report = run_analysis(&corpus, &ctx.catalog, &ctx.config)
        .with_context(|| format!("Analysis of {} failed", cmd.input_file.display()))?;

    match &cmd.output {
        Some(path) => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            ctx.success_msg(format!("Report {} written to {}.", report.run_id, path.display()));
            Ok(())
        }
        None => print_json(&report),
    }
}
