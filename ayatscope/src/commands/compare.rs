//! `ayatscope compare`: Makkiyah vs Madaniyah significance test.

use anyhow::{ensure, Result};
use std::io;

use ayatscope_core::analysis::entropy_pairs;
use ayatscope_core::{aggregate_by_category, compare_categories, score_verses, AnalysisError, Category, TokenLevel};

use super::{print_json, stdout_colors, AppContext};
use crate::cli::CompareCommand;
use crate::ui::output_format;
use crate::ui::theme::ThemeEntry;

pub fn run_compare(cmd: &CompareCommand, ctx: &AppContext) -> Result<()> {
    let corpus = ctx.load_corpus(&cmd.input_file)?;
    ensure!(!corpus.is_empty(), AnalysisError::EmptyCorpus);

    let level = cmd.level.map(TokenLevel::from).unwrap_or(ctx.config.token_level);
    let equal_variance = !cmd.welch && ctx.config.comparison.equal_variance;

    let verses = score_verses(&corpus, level);
    let breakdown = aggregate_by_category(entropy_pairs(&verses), &ctx.catalog)?;
    let comparison = compare_categories(&breakdown, equal_variance);

    if cmd.json {
        return print_json(&comparison);
    }

    let colors = stdout_colors();
    let mut stdout = io::stdout();
    output_format::print_header(&mut stdout, "Entropy by category", &ctx.theme, colors)?;
    println!("{}", output_format::category_table(&comparison));

    let means: Vec<String> = Category::ALL
        .iter()
        .filter_map(|&category| comparison.stat_for(category))
        .map(|stat| {
            let text = format!("{} {:.4}", stat.category.label(), stat.mean_entropy);
            output_format::paint(&text, ThemeEntry::for_category(stat.category), &ctx.theme, colors)
        })
        .collect();
    println!("Mean entropy: {}", means.join(" vs "));

    match output_format::format_t_test(&comparison, &ctx.theme, colors) {
        Some(line) => println!("{line}"),
        None => ctx.warn_msg(
            "t-test undefined: each category needs at least two verses and non-zero variance.",
        ),
    }
    Ok(())
}
