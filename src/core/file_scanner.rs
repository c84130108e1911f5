use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted, without duplicates.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Exclude entries, split by how they match.
struct Excludes {
    /// Literal entries joined to the base; excluded by path prefix.
    literal_paths: Vec<PathBuf>,
    /// Matched against the full path and the base-relative path.
    patterns: Vec<Pattern>,
}

impl Excludes {
    fn new(base_dir: &Path, excludes: &[String]) -> Self {
        let mut literal_paths = Vec::new();
        let mut patterns = Vec::new();

        for p in excludes {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => patterns.push(pattern),
                    Err(e) => tracing::warn!("invalid exclude pattern '{}': {}", p, e),
                }
            } else {
                literal_paths.push(base_dir.join(p));
            }
        }

        Self {
            literal_paths,
            patterns,
        }
    }

    fn matches(&self, base_dir: &Path, path: &Path) -> bool {
        if self
            .literal_paths
            .iter()
            .any(|excluded| path.starts_with(excluded))
        {
            return true;
        }

        let relative = path.strip_prefix(base_dir).unwrap_or(path);
        self.patterns
            .iter()
            .any(|p| p.matches_path(path) || p.matches_path(relative))
    }
}

pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    excludes: &[String],
    extensions: &[String],
) -> ScanResult {
    let excludes = Excludes::new(base_dir, excludes);
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut skipped_count = 0;

    let roots: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                // Glob mode: expand to matching files and directories
                let full_pattern = base_dir.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten()),
                    Err(e) => tracing::warn!("invalid include pattern '{}': {}", inc, e),
                }
            } else {
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    tracing::warn!("include path does not exist: {}", path.display());
                }
            }
        }
        paths
    };

    for root in roots {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    tracing::warn!("cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if excludes.matches(base_dir, path) {
                continue;
            }

            if path.is_file() && has_extension(path, extensions) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
