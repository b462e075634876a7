// ayatscope/src/lib.rs
//! # ayatscope CLI Application
//!
//! This crate provides the terminal interface for `ayatscope-core`: argument
//! parsing, logger setup, themed tables and the subcommand implementations.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

pub use commands::run;
