//! `ayatscope entropy`: per-verse and per-surah Shannon entropy.

use anyhow::{ensure, Result};
use log::debug;

use ayatscope_core::analysis::entropy_pairs;
use ayatscope_core::{aggregate_by_group, score_verses, AnalysisError, TokenLevel};

use super::{print_json, stdout_colors, AppContext};
use crate::cli::EntropyCommand;
use crate::ui::output_format;

pub fn run_entropy(cmd: &EntropyCommand, ctx: &AppContext) -> Result<()> {
    let corpus = ctx.load_corpus(&cmd.input_file)?;
    ensure!(!corpus.is_empty(), AnalysisError::EmptyCorpus);

    let level = cmd.level.map(TokenLevel::from).unwrap_or(ctx.config.token_level);
    debug!("Scoring {} verses at {:?} level.", corpus.len(), level);
    let verses = score_verses(&corpus, level);

    if cmd.verses {
        if cmd.json {
            return print_json(&verses);
        }
        output_format::print_header(&mut std::io::stdout(), "Verse entropy", &ctx.theme, stdout_colors())?;
        println!("{}", output_format::verse_table(&verses));
        return Ok(());
    }

    let groups = aggregate_by_group(entropy_pairs(&verses), &ctx.catalog)?;
    if cmd.json {
        return print_json(&groups);
    }
    output_format::print_header(&mut std::io::stdout(), "Mean entropy per surah", &ctx.theme, stdout_colors())?;
    println!("{}", output_format::group_table(&groups));
    ctx.info_msg(format!("{} verses in {} surahs.", verses.len(), groups.len()));
    Ok(())
}
