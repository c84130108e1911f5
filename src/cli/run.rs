use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult,
        codemod::{extract, transform},
        init::init,
    },
};

/// Dispatch to the command handler.
///
/// `Err` means the run itself failed (config, catalog output); per-file
/// failures are part of the returned result.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Transform(cmd)) => transform(cmd),
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
