//! `transform` and `extract`: scan, process every file, write catalogs.

use std::env;

use anyhow::{Context, Result};

use super::{CodemodSummary, CommandResult, CommandSummary};
use crate::{
    cli::args::{CommonArgs, ExtractCommand, TransformCommand},
    config::{CallingConvention, ConfigLoadResult, load_config, load_config_file},
    core::{
        catalog::{Catalog, CatalogOptions, write_catalogs},
        file_scanner::scan_files,
        language::Classifier,
        pipeline::{ProcessOptions, process_files},
    },
};

pub fn transform(cmd: TransformCommand) -> Result<CommandResult> {
    let TransformCommand { args } = cmd;
    run(&args.common, args.extract_only, false)
}

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ExtractCommand { args } = cmd;
    run(&args.common, true, args.json)
}

/// Load the config file and lay the command-line flags over it.
pub fn load_settings(common: &CommonArgs, extract_only: bool) -> Result<ConfigLoadResult> {
    let mut loaded = match &common.config {
        Some(path) => load_config_file(path)?,
        None => {
            let cwd = env::current_dir().context("Failed to read the working directory")?;
            load_config(&cwd)?
        }
    };

    let config = &mut loaded.config;
    if let Some(language) = &common.language {
        config.source_language = language.clone();
    }
    if common.hook {
        config.calling_convention = Some(CallingConvention::Hook);
    }
    config.aggressive |= common.aggressive;
    config.comment |= common.comment;
    config.dry |= common.dry;
    config.extract_only |= extract_only;

    Ok(loaded)
}

fn run(common: &CommonArgs, extract_only: bool, print_json: bool) -> Result<CommandResult> {
    let ConfigLoadResult {
        config, base_dir, ..
    } = load_settings(common, extract_only)?;

    let classifier = Classifier::for_code(&config.source_language);
    if classifier.language().is_none() {
        tracing::warn!(
            "unknown source language '{}', no text will be matched",
            config.source_language
        );
    }

    let scan = scan_files(&base_dir, &config.include, &config.exclude, &config.ext);
    tracing::debug!(files = scan.files.len(), skipped = scan.skipped_count, "scanned");

    let options = ProcessOptions {
        base_dir: &base_dir,
        classifier: &classifier,
        module_source: &config.translation_module_source,
        use_hook: config.use_hook(),
        aggressive: config.aggressive,
        extract_only: config.extract_only,
        dry: config.dry,
    };
    let report = process_files(&scan.files, &options);

    let catalog = Catalog::build(
        &report.occurrences,
        config.comment,
        &config.default_translation,
    );
    let output_dir = base_dir.join(&config.output_dir);
    let catalogs = write_catalogs(
        &catalog,
        &CatalogOptions {
            output_dir: &output_dir,
            output_file_name: &config.output_file_name,
            locales: &config.locales,
            mode: config.output_json_mode,
            dry: config.dry,
        },
    )?;

    let summary = CodemodSummary {
        extract_only: config.extract_only,
        dry: config.dry,
        files_scanned: report.files_scanned,
        files_written: report.files_written,
        wraps: report.wraps,
        texts_extracted: report.occurrences.len(),
        catalogs: catalogs
            .into_iter()
            .map(|path| match path.strip_prefix(&base_dir) {
                Ok(relative) => relative.to_path_buf(),
                Err(_) => path,
            })
            .collect(),
        failures: report.failures,
        occurrences: print_json.then_some(report.occurrences),
    };
    Ok(CommandResult::new(CommandSummary::Codemod(summary)))
}
