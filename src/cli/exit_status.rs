use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): every file was processed
/// - `Failure` (1): at least one file could not be read, parsed, scaffolded
///   or written; the other files were still processed
/// - `Error` (2): the run itself failed (bad config, unwritable catalog, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
