//! `ayatscope transitions`: successor distribution of one word.

use anyhow::{bail, ensure, Result};
use log::debug;
use serde::Serialize;
use std::io;

use ayatscope_core::{tokenize_corpus, AnalysisError, StreamMode, TokenLevel, TransitionTable};
use ayatscope_entropy::tokenizer::tokenize_words;

use super::{print_json, stdout_colors, AppContext};
use crate::cli::TransitionsCommand;
use crate::ui::output_format;

#[derive(Debug, Serialize)]
struct SuccessorEntry<'a> {
    token: &'a str,
    probability: f64,
}

#[derive(Debug, Serialize)]
struct TransitionsOutput<'a> {
    word: &'a str,
    stream_mode: StreamMode,
    /// Distinct successors before truncation to `successors`.
    successor_count: usize,
    successors: Vec<SuccessorEntry<'a>>,
}

/// Normalizes `raw` exactly like corpus text; it must yield one word.
fn query_word(raw: &str) -> Result<String> {
    let mut tokens = tokenize_words(raw);
    match tokens.len() {
        1 => Ok(tokens.remove(0)),
        0 => bail!("'{}' contains no word characters.", raw),
        n => bail!("'{}' normalizes to {} words; give a single word.", raw, n),
    }
}

pub fn run_transitions(cmd: &TransitionsCommand, ctx: &AppContext) -> Result<()> {
    let word = query_word(&cmd.word)?;
    let corpus = ctx.load_corpus(&cmd.input_file)?;
    ensure!(!corpus.is_empty(), AnalysisError::EmptyCorpus);

    let stream_mode = if cmd.per_verse {
        StreamMode::PerVerse
    } else {
        ctx.config.transitions.stream_mode
    };
    let top = cmd
        .top
        .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
        .unwrap_or(ctx.config.transitions.top_successors);

    let sequences = tokenize_corpus(&corpus, TokenLevel::Word);
    let table = TransitionTable::from_sequences(&sequences, stream_mode);
    debug!(
        "Transition table: {} tokens, {} bigrams, {} transitions.",
        table.vocabulary_size(),
        table.bigram_count(),
        table.transition_count()
    );
    let distribution = table.successors(&word);

    if cmd.json {
        let output = TransitionsOutput {
            word: &word,
            stream_mode,
            successor_count: distribution.len(),
            successors: distribution
                .top(top)
                .iter()
                .map(|&(token, probability)| SuccessorEntry { token, probability })
                .collect(),
        };
        return print_json(&output);
    }

    if distribution.is_empty() {
        ctx.info_msg(format!("No successors observed for '{word}'."));
        return Ok(());
    }

    let title = format!("Words following '{word}'");
    output_format::print_header(&mut io::stdout(), &title, &ctx.theme, stdout_colors())?;
    println!("{}", output_format::successor_table(&distribution, top));
    if distribution.len() > top {
        ctx.info_msg(format!("Showing {} of {} successors.", top, distribution.len()));
    }
    Ok(())
}
