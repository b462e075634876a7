//! Subcommand implementations and the state they share.

pub mod compare;
pub mod convert;
pub mod entropy;
pub mod report;
pub mod transitions;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::io;
use std::path::Path;

use ayatscope_core::{AnalysisConfig, Corpus, SurahCatalog};

use crate::cli::{Cli, Commands};
use crate::ui::output_format;
use crate::ui::theme::{build_theme_map, ThemeMap};

/// Everything a subcommand needs besides its own arguments.
pub struct AppContext {
    pub config: AnalysisConfig,
    pub catalog: SurahCatalog,
    pub theme: ThemeMap,
    pub quiet: bool,
}

impl AppContext {
    /// Resolves config, catalog and theme from the global flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = AnalysisConfig::load_or_default(cli.config.as_deref())
            .context("Failed to load analysis configuration")?;
        if let Some(catalog) = &cli.catalog {
            config.catalog_path = Some(catalog.clone());
        }
        let catalog = config.load_catalog().context("Failed to load surah catalog")?;
        let theme = build_theme_map(cli.theme.as_deref()).context("Theme error")?;
        debug!("Resolved configuration: {:?}", config);

        Ok(Self {
            config,
            catalog,
            theme,
            quiet: cli.quiet,
        })
    }

    pub fn info_msg(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        let colors = io::stderr().is_terminal();
        let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), &self.theme, colors);
    }

    pub fn success_msg(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        let colors = io::stderr().is_terminal();
        let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), &self.theme, colors);
    }

    pub fn warn_msg(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        let colors = io::stderr().is_terminal();
        let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), &self.theme, colors);
    }

    /// Loads a corpus and reports skipped rows.
    pub fn load_corpus(&self, path: &Path) -> Result<Corpus> {
        let (corpus, summary) = Corpus::load(path)
            .with_context(|| format!("Failed to load corpus {}", path.display()))?;
        if summary.skipped > 0 {
            self.warn_msg(format!(
                "{} malformed rows in {} were skipped.",
                summary.skipped,
                path.display()
            ));
        }
        Ok(corpus)
    }
}

/// Dispatches the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::from_cli(&cli)?;
    match cli.command {
        Commands::Convert(cmd) => convert::run_convert(&cmd, &ctx),
        Commands::Entropy(cmd) => entropy::run_entropy(&cmd, &ctx),
        Commands::Compare(cmd) => compare::run_compare(&cmd, &ctx),
        Commands::Transitions(cmd) => transitions::run_transitions(&cmd, &ctx),
        Commands::Report(cmd) => report::run_report(&cmd, &ctx),
    }
}

pub(crate) fn stdout_colors() -> bool {
    io::stdout().is_terminal()
}

/// Pretty-prints `value` as JSON to stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
