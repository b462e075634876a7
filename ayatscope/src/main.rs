// ayatscope/src/main.rs
//! ayatscope entry point.
//!
//! Parses the command line, sets up logging and hands off to the selected
//! subcommand. Errors are printed once, with their full context chain.

use std::io;
use std::process::ExitCode;

use ayatscope::cli::Cli;
use ayatscope::logger;
use ayatscope::ui::output_format::print_error_message;
use ayatscope::ui::theme::ThemeStyle;
use clap::Parser;
use is_terminal::IsTerminal;
use log::LevelFilter;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match ayatscope::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The user theme may be what failed to load.
            let theme = ThemeStyle::default_theme_map();
            let colors = io::stderr().is_terminal();
            let _ = print_error_message(&mut io::stderr(), &format!("{err:#}"), &theme, colors);
            ExitCode::FAILURE
        }
    }
}
