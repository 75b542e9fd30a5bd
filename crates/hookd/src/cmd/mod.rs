//! CLI subcommands

pub mod send_github;
pub mod serve;
