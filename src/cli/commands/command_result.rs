use std::path::PathBuf;

use crate::core::{extractor::TextOccurrence, pipeline::FileFailure};

use super::super::exit_status::ExitStatus;

#[derive(Debug)]
pub enum CommandSummary {
    Codemod(CodemodSummary),
    Init(InitSummary),
}

#[derive(Debug, Default)]
pub struct CodemodSummary {
    pub extract_only: bool,
    pub dry: bool,
    pub files_scanned: usize,
    pub files_written: usize,
    pub wraps: usize,
    pub texts_extracted: usize,
    pub catalogs: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    /// Set when the occurrences should be printed as JSON.
    pub occurrences: Option<Vec<TextOccurrence>>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Files that failed; any makes the exit status `Failure`.
    pub failure_count: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        let failure_count = match &summary {
            CommandSummary::Codemod(codemod) => codemod.failures.len(),
            CommandSummary::Init(init) => usize::from(!init.created),
        };
        Self {
            summary,
            failure_count,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.failure_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
