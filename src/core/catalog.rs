//! Translation catalog generation and output.
//!
//! Keys of already-wrapped text come first as a flat section. Unwrapped text
//! follows, grouped by container path in first-seen order, each group
//! optionally introduced by a `__comment_<n>` entry naming the container.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{extractor::TextOccurrence, parsers::json::read_catalog};

static COMMENT_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^(\s+)"(__comment_\d+)":"#).unwrap());

/// How a catalog file is produced from freshly extracted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    /// Overwrite the file.
    #[default]
    Create,
    /// Keep existing entries; they win over fresh ones.
    Merge,
    /// Compute only.
    Dry,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    entries: Map<String, Value>,
}

impl Catalog {
    pub fn build(occurrences: &[TextOccurrence], comment: bool, default_translation: &str) -> Self {
        let mut entries = Map::new();
        let default = || Value::String(default_translation.to_string());

        for occurrence in occurrences.iter().filter(|o| o.is_already_wrapped) {
            entries.insert(occurrence.normalized_key.clone(), default());
        }

        let mut groups: Vec<(&str, Vec<&TextOccurrence>)> = Vec::new();
        for occurrence in occurrences.iter().filter(|o| !o.is_already_wrapped) {
            match groups
                .iter_mut()
                .find(|(container, _)| *container == occurrence.container_path)
            {
                Some((_, members)) => members.push(occurrence),
                None => groups.push((&occurrence.container_path, vec![occurrence])),
            }
        }

        for (index, (container, members)) in groups.into_iter().enumerate() {
            if comment {
                entries.insert(
                    format!("__comment_{}", index),
                    Value::String(container.to_string()),
                );
            }
            for occurrence in members {
                entries.insert(occurrence.normalized_key.clone(), default());
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Number of translation keys, comment entries excluded.
    pub fn key_count(&self) -> usize {
        self.entries
            .keys()
            .filter(|key| !is_comment_key(key))
            .count()
    }

    /// Lay `existing` over the fresh entries. Existing values win, fresh-only
    /// keys keep their order, existing-only keys are appended.
    pub fn merged_with(&self, existing: Map<String, Value>) -> Self {
        let mut entries = self.entries.clone();
        for (key, value) in existing {
            entries.insert(key, value);
        }
        Self { entries }
    }

    /// 2-space JSON with a trailing newline and a blank line before every
    /// comment entry.
    pub fn render(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(&Value::Object(self.entries.clone()))
            .context("Failed to serialize catalog")?;
        let spaced = COMMENT_KEY_REGEX.replace_all(&json, "\n$1\"$2\":");
        Ok(format!("{}\n", spaced))
    }
}

fn is_comment_key(key: &str) -> bool {
    key.strip_prefix("__comment_")
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
}

/// Where and how catalogs are written.
#[derive(Debug, Clone)]
pub struct CatalogOptions<'a> {
    pub output_dir: &'a Path,
    pub output_file_name: &'a str,
    pub locales: &'a [String],
    pub mode: CatalogMode,
    /// Write `<file>.snap` instead of the file itself.
    pub dry: bool,
}

impl CatalogOptions<'_> {
    pub fn path_for(&self, locale: &str) -> PathBuf {
        self.output_dir.join(locale).join(self.output_file_name)
    }
}

/// Write one catalog per locale and return the paths written.
pub fn write_catalogs(catalog: &Catalog, options: &CatalogOptions) -> Result<Vec<PathBuf>> {
    if options.mode == CatalogMode::Dry {
        tracing::debug!(keys = catalog.key_count(), "dry catalog mode, nothing written");
        return Ok(Vec::new());
    }

    let mut written = Vec::with_capacity(options.locales.len());
    for locale in options.locales {
        let path = options.path_for(locale);

        let merged;
        let content = match options.mode {
            CatalogMode::Merge => match read_catalog(&path)? {
                Some(existing) => {
                    merged = catalog.merged_with(existing);
                    &merged
                }
                None => catalog,
            },
            _ => catalog,
        };

        let target = if options.dry {
            snapshot_path(&path)
        } else {
            path
        };
        save(&target, &content.render()?)?;
        tracing::info!(path = %target.display(), keys = content.key_count(), "catalog written");
        written.push(target);
    }
    Ok(written)
}

/// `<path>.snap`, used by dry runs.
pub fn snapshot_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".snap");
    PathBuf::from(name)
}

fn save(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}
