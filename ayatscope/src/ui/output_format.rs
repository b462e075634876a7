//! Themed status messages and result tables.
//!
//! Messages go to stderr so stdout stays clean for tables, CSV and JSON.
//! Colour is applied only when the caller says the stream supports it.

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use owo_colors::OwoColorize;

use ayatscope_core::{CategoryComparison, GroupStat, SuccessorDistribution, VerseStat};

use super::theme::{color_for, ThemeEntry, ThemeMap};

/// Significance level used to colour p-values.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Renders `text` in the colour of `entry` when `enable_colors` is set.
pub fn paint(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    match color_for(theme, entry) {
        Some(color) if enable_colors => text.color(color).to_string(),
        _ => text.to_string(),
    }
}

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    let line = format!("{prefix}{msg}");
    writeln!(writer, "{}", paint(&line, entry, theme, enable_colors))
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "", msg, ThemeEntry::Info, theme, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "", msg, ThemeEntry::Success, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "Warning: ", msg, ThemeEntry::Warn, theme, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "Error: ", msg, ThemeEntry::Error, theme, enable_colors)
}

pub fn print_header<W: Write>(writer: &mut W, title: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(title, ThemeEntry::Header, theme, enable_colors))
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
    table
}

fn number(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

fn entropy_cell(value: f64) -> Cell {
    number(format!("{value:.4}"))
}

/// One row per surah.
pub fn group_table(groups: &[GroupStat]) -> Table {
    let mut table = new_table(&["Surah", "Name", "Category", "Verses", "Mean entropy"]);
    for group in groups {
        table.add_row(vec![
            number(group.group_id),
            Cell::new(group.name.as_deref().unwrap_or("-")),
            Cell::new(group.category.label()),
            number(group.verse_count),
            entropy_cell(group.mean_entropy),
        ]);
    }
    table
}

/// One row per verse.
pub fn verse_table(verses: &[VerseStat]) -> Table {
    let mut table = new_table(&["Surah", "Ayat", "Tokens", "Entropy"]);
    for verse in verses {
        table.add_row(vec![
            number(verse.group_id),
            number(verse.index_in_group),
            number(verse.token_count),
            entropy_cell(verse.entropy),
        ]);
    }
    table
}

/// One row per category.
pub fn category_table(comparison: &CategoryComparison) -> Table {
    let mut table = new_table(&["Category", "Surahs", "Verses", "Mean entropy", "Std dev"]);
    for stat in &comparison.categories {
        table.add_row(vec![
            Cell::new(stat.category.label()),
            number(stat.group_count),
            number(stat.verse_count),
            entropy_cell(stat.mean_entropy),
            entropy_cell(stat.std_dev),
        ]);
    }
    table
}

/// Ranked successors with their conditional probabilities.
pub fn successor_table(distribution: &SuccessorDistribution<'_>, top: usize) -> Table {
    let mut table = new_table(&["#", "Next word", "Probability"]);
    for (rank, (token, probability)) in distribution.top(top).iter().enumerate() {
        table.add_row(vec![
            number(rank + 1),
            Cell::new(token),
            number(format!("{probability:.4}")),
        ]);
    }
    table
}

/// Formats the t-test line, or `None` when the test is undefined.
pub fn format_t_test(comparison: &CategoryComparison, theme: &ThemeMap, enable_colors: bool) -> Option<String> {
    let test = comparison.t_test?;
    let kind = if test.equal_variance { "Student" } else { "Welch" };
    let entry = if test.p_value < SIGNIFICANCE_LEVEL {
        ThemeEntry::Significant
    } else {
        ThemeEntry::NotSignificant
    };
    let p_value = paint(&format!("p = {:.4}", test.p_value), entry, theme, enable_colors);
    Some(format!(
        "{kind} t-test (Makkiyah vs Madaniyah): t = {:.4}, df = {:.2}, {p_value}",
        test.t_statistic, test.degrees_of_freedom
    ))
}
