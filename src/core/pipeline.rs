//! Per-file processing and the parallel batch driver.
//!
//! Each file is an independent unit: read, parse, extract and, unless only
//! extracting, find contexts, wrap, insert scaffolding and write back. A
//! failing file is recorded and the others carry on.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;

use super::{
    catalog::snapshot_path,
    error::{FileError, InsertionError},
    extractor::{TextOccurrence, extract},
    finder::find_contexts,
    insertion::{InsertOptions, Inserter},
    language::Classifier,
    parsers::parse_source,
    tree::SourceTree,
    wrapper::TextWrapper,
};

#[derive(Debug, Clone, Copy)]
pub struct ProcessOptions<'a> {
    /// Paths are reported relative to this directory.
    pub base_dir: &'a Path,
    pub classifier: &'a Classifier,
    pub module_source: &'a str,
    pub use_hook: bool,
    pub aggressive: bool,
    pub extract_only: bool,
    /// Write `<file>.snap` instead of the file itself.
    pub dry: bool,
}

impl<'a> ProcessOptions<'a> {
    fn insert_options(&self) -> InsertOptions<'a> {
        InsertOptions {
            module_source: self.module_source,
            use_hook: self.use_hook,
            aggressive: self.aggressive,
        }
    }
}

/// Wrap the tree's text and add the scaffolding it needs. Returns whether
/// the wrapper changed anything.
pub fn transform(tree: &mut SourceTree, options: &ProcessOptions) -> Result<bool, InsertionError> {
    let contexts = find_contexts(&tree.module, options.aggressive);
    let changed = TextWrapper::new(&contexts, options.classifier).wrap(tree);
    Inserter::new(&contexts, options.insert_options()).insert(tree)?;
    Ok(changed)
}

#[derive(Debug)]
pub struct FileFailure {
    /// Path relative to the base directory.
    pub path: String,
    pub error: FileError,
    /// Text of the offending line, when the error has a location.
    pub source_line: Option<String>,
}

#[derive(Debug, Default)]
struct FileOutcome {
    occurrences: Vec<TextOccurrence>,
    wraps: usize,
    written: bool,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub files_scanned: usize,
    pub files_written: usize,
    pub wraps: usize,
    /// In file order, then source order.
    pub occurrences: Vec<TextOccurrence>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

pub fn process_files(files: &[PathBuf], options: &ProcessOptions) -> BatchReport {
    let results: Vec<Result<FileOutcome, FileFailure>> = files
        .par_iter()
        .map(|path| process_file(path, options))
        .collect();

    let mut report = BatchReport {
        files_scanned: files.len(),
        ..BatchReport::default()
    };
    for result in results {
        match result {
            Ok(outcome) => {
                report.wraps += outcome.wraps;
                report.files_written += usize::from(outcome.written);
                report.occurrences.extend(outcome.occurrences);
            }
            Err(failure) => report.failures.push(failure),
        }
    }
    report
}

fn display_path(base_dir: &Path, path: &Path) -> String {
    path.strip_prefix(base_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn process_file(path: &Path, options: &ProcessOptions) -> Result<FileOutcome, FileFailure> {
    let shown = display_path(options.base_dir, path);
    let fail = |error: FileError, source_line: Option<String>| {
        tracing::warn!(file = %shown, "skipping file: {}", error);
        FileFailure {
            path: shown.clone(),
            error,
            source_line,
        }
    };

    let code = fs::read_to_string(path).map_err(|e| fail(FileError::Read(e), None))?;
    let mut tree = match parse_source(code.clone(), &shown) {
        Ok(tree) => tree,
        Err(err) => {
            let line = code.lines().nth(err.line.saturating_sub(1)).map(String::from);
            return Err(fail(FileError::Parse(err), line));
        }
    };

    let occurrences = extract(&tree, options.classifier);
    tracing::debug!(file = %shown, occurrences = occurrences.len(), "extracted");

    if options.extract_only {
        return Ok(FileOutcome {
            occurrences,
            ..FileOutcome::default()
        });
    }

    transform(&mut tree, options).map_err(|e| fail(FileError::Insertion(e), None))?;
    let wraps = tree.rewrites().wrap_count();

    let written = tree.is_modified();
    if written {
        let target = if options.dry {
            snapshot_path(path)
        } else {
            path.to_path_buf()
        };
        fs::write(&target, tree.print()).map_err(|e| fail(FileError::Write(e), None))?;
        tracing::debug!(file = %shown, wraps, "written");
    }

    Ok(FileOutcome {
        occurrences,
        wraps,
        written,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::core::language::Language;

    fn options<'a>(base: &'a Path, classifier: &'a Classifier) -> ProcessOptions<'a> {
        ProcessOptions {
            base_dir: base,
            classifier,
            module_source: "react-i18next",
            use_hook: true,
            aggressive: false,
            extract_only: false,
            dry: false,
        }
    }

    #[test]
    fn test_batch_isolates_failures() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("Good.tsx");
        let bad = dir.path().join("Bad.tsx");
        fs::write(&good, "const Good = () => <p>안녕</p>;").unwrap();
        fs::write(&bad, "const Bad = () => <p>안녕</p>;\nconst = ;\n").unwrap();

        let classifier = Classifier::new(Language::Ko);
        let report = process_files(&[bad.clone(), good.clone()], &options(dir.path(), &classifier));

        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.files_written, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, "Bad.tsx");
        assert_eq!(report.failures[0].error.location().map(|(line, _)| line), Some(2));
        assert_eq!(report.failures[0].source_line.as_deref(), Some("const = ;"));

        assert_eq!(
            fs::read_to_string(&good).unwrap(),
            "import { useTranslation } from \"react-i18next\";\nconst Good = () => { const { t } = useTranslation(); return <p>{t(\"안녕\")}</p>; };"
        );
        assert_eq!(report.occurrences.len(), 1);
        assert_eq!(report.occurrences[0].container_path, "Good.tsx/Good");
    }

    #[test]
    fn test_extract_only_leaves_files_alone() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.tsx");
        let code = "const A = () => <p>{t(\"안녕\")}</p>;";
        fs::write(&file, code).unwrap();

        let classifier = Classifier::new(Language::Ko);
        let report = process_files(
            &[file.clone()],
            &ProcessOptions {
                extract_only: true,
                ..options(dir.path(), &classifier)
            },
        );

        assert_eq!(report.files_written, 0);
        assert_eq!(fs::read_to_string(&file).unwrap(), code);
        assert!(report.occurrences[0].is_already_wrapped);
    }

    #[test]
    fn test_dry_run_writes_snapshot() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.tsx");
        let code = "const A = () => <p>안녕</p>;";
        fs::write(&file, code).unwrap();

        let classifier = Classifier::new(Language::Ko);
        let report = process_files(
            &[file.clone()],
            &ProcessOptions {
                dry: true,
                ..options(dir.path(), &classifier)
            },
        );

        assert_eq!(report.files_written, 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), code);
        let snapshot = fs::read_to_string(dir.path().join("a.tsx.snap")).unwrap();
        assert!(snapshot.contains("{t(\"안녕\")}"));
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Page.tsx");
        fs::write(
            &file,
            "export function Page() {\n  return <h1>{`${name}님 환영합니다`}</h1>;\n}\n",
        )
        .unwrap();

        let classifier = Classifier::new(Language::Ko);
        let opts = options(dir.path(), &classifier);
        let first = process_files(&[file.clone()], &opts);
        assert_eq!(first.files_written, 1);
        let once = fs::read_to_string(&file).unwrap();

        let second = process_files(&[file.clone()], &opts);
        assert_eq!(second.files_written, 0);
        assert_eq!(fs::read_to_string(&file).unwrap(), once);
        assert_eq!(second.occurrences[0].normalized_key, "{{name}}님 환영합니다");
        assert!(second.occurrences[0].is_already_wrapped);
    }

    #[test]
    fn test_untranslated_components_are_not_rewritten() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Hello.tsx");
        let code = "const Hello = () => <p>hello</p>;\nconst useName = () => \"name\";\n";
        fs::write(&file, code).unwrap();

        let classifier = Classifier::new(Language::Ko);
        for aggressive in [false, true] {
            let report = process_files(
                &[file.clone()],
                &ProcessOptions {
                    aggressive,
                    ..options(dir.path(), &classifier)
                },
            );
            assert_eq!(report.files_written, 0);
            assert_eq!(report.wraps, 0);
        }
        assert_eq!(fs::read_to_string(&file).unwrap(), code);
    }

    #[test]
    fn test_hook_for_existing_call_rewrites_the_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Done.tsx");
        fs::write(&file, "const Done = () => <p>{t(\"완료\")}</p>;").unwrap();

        let classifier = Classifier::new(Language::Ko);
        let report = process_files(&[file.clone()], &options(dir.path(), &classifier));

        assert_eq!(report.files_written, 1);
        assert_eq!(report.wraps, 0);
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "import { useTranslation } from \"react-i18next\";\nconst Done = () => { const { t } = useTranslation(); return <p>{t(\"완료\")}</p>; };"
        );
    }

    #[test]
    fn test_missing_file_is_a_read_failure() {
        let dir = tempdir().unwrap();
        let classifier = Classifier::new(Language::Ko);
        let report = process_files(
            &[dir.path().join("gone.tsx")],
            &options(dir.path(), &classifier),
        );
        assert!(report.has_failures());
        assert!(matches!(report.failures[0].error, FileError::Read(_)));
    }
}
