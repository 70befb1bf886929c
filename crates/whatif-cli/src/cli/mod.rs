use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `whatif` binary.
#[derive(Debug, Parser)]
#[command(
    name = "whatif",
    version,
    about = "whatif - counterfactual security-control analysis over a threat ontology"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Knowledge base document (.toml or .json); overrides `general.kb_path`
    #[arg(long, global = true)]
    pub kb: Option<PathBuf>,

    /// Require names to match on word boundaries when validating
    #[arg(long, global = true)]
    pub strict: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            kb: self.kb.clone(),
            strict: self.strict,
        }
    }
}
