//! Logger setup for the ayatscope binary.
//!
//! License: MIT OR Apache-2.0

use env_logger::Env;
use log::LevelFilter;

/// Initializes `env_logger`.
///
/// An explicit `level` wins over `RUST_LOG`; with `None`, `RUST_LOG` applies
/// and falls back to `warn`. Calling this more than once is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp(None).format_target(false);
    if let Some(level) = level {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}
