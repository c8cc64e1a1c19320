//! Command handlers for the CLI subcommands.

pub mod screen;
