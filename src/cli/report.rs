//! Report formatting and printing utilities.
//!
//! Failed files are printed in cargo-style format, followed by a one-line
//! summary of what the run did. Kept separate from the core so the library
//! can be used without any terminal output.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CodemodSummary, CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::pipeline::FileFailure;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

/// Print a command result to a custom writer.
pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Codemod(summary) => print_codemod(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

/// Print failed files in cargo-style format.
pub fn report_failures<W: Write>(failures: &[FileFailure], writer: &mut W) {
    if failures.is_empty() {
        return;
    }

    let max_line_width = failures
        .iter()
        .filter_map(|f| f.error.location())
        .map(|(line, _)| line.to_string().len())
        .max()
        .unwrap_or(1);

    for failure in failures {
        print_failure(failure, writer, max_line_width);
    }

    let _ = writeln!(
        writer,
        "{} {} {} could not be processed",
        FAILURE_MARK.red(),
        failures.len(),
        if failures.len() == 1 { "file" } else { "files" }
    );
}

// ============================================================
// Internal Functions
// ============================================================

fn print_failure<W: Write>(failure: &FileFailure, writer: &mut W, max_line_width: usize) {
    let _ = writeln!(writer, "{}: {}", "error".bold().red(), failure.error);

    let Some((line, col)) = failure.error.location() else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), failure.path);
        let _ = writeln!(writer);
        return;
    };
    let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), failure.path, line, col);

    if let Some(source_line) = &failure.source_line {
        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret under the column (col is 1-based)
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            "^".red(),
            width = max_line_width,
            padding = caret_padding
        );
    }
    let _ = writeln!(writer);
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn print_codemod<W: Write>(summary: &CodemodSummary, writer: &mut W) {
    if let Some(occurrences) = &summary.occurrences {
        match serde_json::to_string_pretty(occurrences) {
            Ok(json) => {
                let _ = writeln!(writer, "{}", json);
            }
            Err(e) => tracing::warn!("failed to serialize occurrences: {}", e),
        }
    }

    report_failures(&summary.failures, writer);

    let files = if summary.extract_only {
        format!("Scanned {}", plural(summary.files_scanned, "file"))
    } else {
        format!(
            "Transformed {} of {} ({})",
            plural(summary.files_written, "file"),
            summary.files_scanned,
            plural(summary.wraps, "text")
        )
    };
    let _ = writeln!(
        writer,
        "{} {}, extracted {}, wrote {}{}",
        SUCCESS_MARK.green(),
        files,
        plural(summary.texts_extracted, "text"),
        plural(summary.catalogs.len(), "catalog"),
        if summary.dry { " (dry run)" } else { "" }
    );

    for path in &summary.catalogs {
        let _ = writeln!(writer, "  {} {}", "-".dimmed(), path.display());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{}: {} already exists",
            "error".bold().red(),
            CONFIG_FILE_NAME
        );
    }
}

// ============================================================
// Tests
// ============================================================
