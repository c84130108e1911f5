//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `transform`: Wrap source-language text in `t(...)`, add hooks and
//!   imports, and write the translation catalogs
//! - `extract`: Only collect text and write the catalogs
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Transform(cmd)) => cmd.args.common.verbose,
            Some(Command::Extract(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by `transform` and `extract`.
/// Every flag overrides the matching config file value.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Path to the config file (default: search upwards for auto-i18n.config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Source language code: ko, ja, zh or en
    #[arg(long, value_name = "CODE")]
    pub language: Option<String>,

    /// Process all text in a file, not only components and hooks
    #[arg(long)]
    pub aggressive: bool,

    /// Acquire `t` through `useTranslation()` instead of importing it
    #[arg(long)]
    pub hook: bool,

    /// Add a `__comment_<n>` entry naming each group in the catalog
    #[arg(long)]
    pub comment: bool,

    /// Write `.snap` files next to the originals instead of overwriting them
    #[arg(long)]
    pub dry: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct TransformArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Collect text and write catalogs without changing source files
    #[arg(long)]
    pub extract_only: bool,
}

#[derive(Debug, Args)]
pub struct TransformCommand {
    #[command(flatten)]
    pub args: TransformArgs,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the extracted occurrences as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Wrap text in t(...), insert hooks and imports, and write catalogs
    Transform(TransformCommand),
    /// Extract text into catalogs without changing source files
    Extract(ExtractCommand),
    /// Initialize a new auto-i18n.config.json configuration file
    Init,
}
