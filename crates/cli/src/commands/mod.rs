//! CLI subcommand implementations.

pub mod codes;
