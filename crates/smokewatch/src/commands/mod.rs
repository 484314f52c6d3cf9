//! Subcommand implementations

pub mod publish;
pub mod watch;
