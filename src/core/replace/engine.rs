//! Replacement engine — apply the table to text, files, and whole selections.
//!
//! Every pair runs in table order against the evolving content using plain
//! non-overlapping, left-to-right substring replacement. A file is only
//! written when its final content differs from what was read.

use std::path::Path;

use crate::error::Result;
use crate::local_files::{FileSystem, WriteMode};
use crate::output::{FileOutcome, FileStatus, RunReport, RunSummary};

use super::selector::FileSelector;
use super::table::ReplacementTable;

/// How a run writes changed files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    pub mode: WriteMode,
    /// Copy the original to `<file>.bak` before overwriting.
    pub backup: bool,
    /// Compute outcomes without touching the disk.
    pub dry_run: bool,
}

/// Text after the table ran over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub content: String,
    /// Occurrences replaced, summed over all pairs.
    pub replacements: usize,
}

/// Apply every pair of the table, in order, to `content`.
pub fn apply_table(content: &str, table: &ReplacementTable) -> Applied {
    let mut current = content.to_string();
    let mut replacements = 0;

    for pair in table.pairs() {
        let count = current.matches(pair.old.as_str()).count();
        if count == 0 {
            continue;
        }
        replacements += count;
        current = current.replace(pair.old.as_str(), &pair.new);
    }

    Applied {
        content: current,
        replacements,
    }
}

/// Read, transform and conditionally write one file.
///
/// Errors abort this file only; nothing is written when reading or
/// decoding fails.
pub fn process_file(
    fs: &dyn FileSystem,
    path: &Path,
    table: &ReplacementTable,
    options: WriteOptions,
) -> Result<FileOutcome> {
    let original = fs.read_text(path)?;
    let applied = apply_table(&original, table);

    let display = path.display().to_string();

    // Replacements can cancel out (e.g. a pair mapping text onto itself),
    // so compare content rather than trusting the count.
    if applied.content == original {
        return Ok(FileOutcome {
            path: display,
            status: FileStatus::Unchanged,
            replacements: 0,
            backup: None,
            error: None,
            error_code: None,
        });
    }

    if options.dry_run {
        return Ok(FileOutcome {
            path: display,
            status: FileStatus::WouldUpdate,
            replacements: applied.replacements,
            backup: None,
            error: None,
            error_code: None,
        });
    }

    let backup = if options.backup {
        Some(fs.backup(path)?.display().to_string())
    } else {
        None
    };

    fs.write_text(path, &applied.content, options.mode)?;

    Ok(FileOutcome {
        path: display,
        status: FileStatus::Updated,
        replacements: applied.replacements,
        backup,
        error: None,
        error_code: None,
    })
}

/// Process every selected file, calling `on_outcome` as each one finishes.
///
/// A failing file is recorded and the run moves on. Only a selector that
/// cannot enumerate its root fails the run as a whole.
pub fn run_with<F>(
    fs: &dyn FileSystem,
    selector: &FileSelector,
    table: &ReplacementTable,
    options: WriteOptions,
    mut on_outcome: F,
) -> Result<RunReport>
where
    F: FnMut(&FileOutcome),
{
    let selection = selector.select()?;

    log_status!(
        "replace",
        "{} *.{} file(s) under {}",
        selection.files.len(),
        selector.extension(),
        selector.root().display()
    );

    let mut files = Vec::new();
    let mut summary = RunSummary::default();

    for err in &selection.errors {
        let path = err.details["path"].as_str().unwrap_or_default().to_string();
        let outcome = FileOutcome::failed(path, err);
        on_outcome(&outcome);
        summary.failed += 1;
        files.push(outcome);
    }

    for path in &selection.files {
        let outcome = match process_file(fs, path, table, options) {
            Ok(outcome) => outcome,
            Err(err) => FileOutcome::failed(path.display().to_string(), &err),
        };

        on_outcome(&outcome);
        summary.record(&outcome);

        if outcome.status != FileStatus::Unchanged {
            files.push(outcome);
        }
    }

    Ok(RunReport {
        root: selector.root().display().to_string(),
        extension: selector.extension().to_string(),
        dry_run: options.dry_run,
        files,
        summary,
    })
}

/// Process every selected file without a progress callback.
pub fn run(
    fs: &dyn FileSystem,
    selector: &FileSelector,
    table: &ReplacementTable,
    options: WriteOptions,
) -> Result<RunReport> {
    run_with(fs, selector, table, options, |_| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorCode, FileOperation};
    use crate::local_files::LocalFs;
    use crate::replace::ReplacementPair;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn table(pairs: &[(&str, &str)]) -> ReplacementTable {
        ReplacementTable::new(
            pairs
                .iter()
                .map(|(old, new)| ReplacementPair::new(*old, *new))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn later_pairs_see_earlier_output() {
        let applied = apply_table("AB", &table(&[("AB", "X"), ("X", "Y")]));
        assert_eq!(applied.content, "Y");
        assert_eq!(applied.replacements, 2);
    }

    #[test]
    fn earlier_longer_pattern_consumes_match() {
        let applied = apply_table(
            "Personnel Registry",
            &table(&[("Personnel Registry", "Driver Directory"), ("Personnel", "Driver")]),
        );
        assert_eq!(applied.content, "Driver Directory");
        assert_eq!(applied.replacements, 1);
    }

    #[test]
    fn shorter_pattern_first_wins_when_listed_first() {
        let applied = apply_table(
            "Personnel Registry",
            &table(&[("Personnel", "Driver"), ("Personnel Registry", "Driver Directory")]),
        );
        assert_eq!(applied.content, "Driver Registry");
    }

    #[test]
    fn replacement_does_not_overlap() {
        let applied = apply_table("aaa", &table(&[("aa", "b")]));
        assert_eq!(applied.content, "ba");
        assert_eq!(applied.replacements, 1);
    }

    #[test]
    fn scan_resumes_after_inserted_text() {
        let applied = apply_table("ab", &table(&[("a", "aa")]));
        assert_eq!(applied.content, "aab");
    }

    #[test]
    fn builtin_table_rewrites_jsx_snippet() {
        let source = "<h1>Trip Dispatch Console</h1>\n<option>Select Personnel Registry...</option>\n<th>Personnel</th><button>Modify</button>\n";
        let applied = apply_table(source, &ReplacementTable::builtin());

        assert_eq!(
            applied.content,
            "<h1>Trip Management</h1>\n<option>Select Driver...</option>\n<th>Driver</th><button>Edit</button>\n"
        );
        assert_eq!(apply_table(&applied.content, &ReplacementTable::builtin()).replacements, 0);
    }

    #[test]
    fn process_file_leaves_unmatched_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Plain.jsx");
        std::fs::write(&path, "export default () => null;\n").unwrap();
        let before = std::fs::metadata(&path).unwrap().modified().unwrap();

        let outcome = process_file(
            &LocalFs::new(),
            &path,
            &table(&[("Modify", "Edit")]),
            WriteOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome.status, FileStatus::Unchanged);
        assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn process_file_self_mapping_is_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Same.jsx");
        std::fs::write(&path, "Fleet").unwrap();

        let outcome = process_file(
            &LocalFs::new(),
            &path,
            &table(&[("Fleet", "Fleet")]),
            WriteOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome.status, FileStatus::Unchanged);
    }

    #[test]
    fn process_file_dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("App.jsx");
        std::fs::write(&path, "Modify").unwrap();

        let outcome = process_file(
            &LocalFs::new(),
            &path,
            &table(&[("Modify", "Edit")]),
            WriteOptions {
                dry_run: true,
                ..WriteOptions::default()
            },
        )
        .unwrap();

        assert_eq!(outcome.status, FileStatus::WouldUpdate);
        assert_eq!(outcome.replacements, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Modify");
    }

    #[test]
    fn process_file_with_backup_keeps_original() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("App.jsx");
        std::fs::write(&path, "Modify").unwrap();

        let outcome = process_file(
            &LocalFs::new(),
            &path,
            &table(&[("Modify", "Edit")]),
            WriteOptions {
                backup: true,
                mode: WriteMode::Atomic,
                ..WriteOptions::default()
            },
        )
        .unwrap();

        assert_eq!(outcome.status, FileStatus::Updated);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Edit");
        let backup = PathBuf::from(outcome.backup.unwrap());
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "Modify");
    }

    #[test]
    fn process_file_invalid_utf8_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Bad.jsx");
        let bytes = [b'M', b'o', b'd', b'i', b'f', b'y', 0xff];
        std::fs::write(&path, bytes).unwrap();

        let err = process_file(
            &LocalFs::new(),
            &path,
            &table(&[("Modify", "Edit")]),
            WriteOptions::default(),
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::FileEncodingInvalid);
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn existing_backup_blocks_the_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("App.jsx");
        std::fs::write(&path, "Modify").unwrap();
        std::fs::write(dir.path().join("App.jsx.bak"), "first original").unwrap();

        let err = process_file(
            &LocalFs::new(),
            &path,
            &table(&[("Modify", "Edit")]),
            WriteOptions {
                backup: true,
                ..WriteOptions::default()
            },
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::FileAccessFailed);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Modify");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("App.jsx.bak")).unwrap(),
            "first original"
        );
    }

    /// Local reads, writes refused for one file name.
    struct ReadOnlyFor {
        name: &'static str,
        writes: RefCell<Vec<PathBuf>>,
    }

    impl FileSystem for ReadOnlyFor {
        fn read_text(&self, path: &Path) -> Result<String> {
            LocalFs::new().read_text(path)
        }

        fn write_text(&self, path: &Path, content: &str, mode: WriteMode) -> Result<()> {
            if path.file_name().and_then(|n| n.to_str()) == Some(self.name) {
                return Err(Error::file_access(
                    path,
                    FileOperation::Write,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            self.writes.borrow_mut().push(path.to_path_buf());
            LocalFs::new().write_text(path, content, mode)
        }

        fn backup(&self, path: &Path) -> Result<PathBuf> {
            LocalFs::new().backup(path)
        }
    }

    #[test]
    fn run_continues_past_failed_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("A.jsx"), "Modify").unwrap();
        std::fs::write(dir.path().join("B.jsx"), "Modify").unwrap();
        std::fs::write(dir.path().join("C.jsx"), "nothing here").unwrap();

        let fs = ReadOnlyFor {
            name: "A.jsx",
            writes: RefCell::new(Vec::new()),
        };
        let selector = FileSelector::new(dir.path(), "jsx", Vec::new()).unwrap();
        let mut seen = Vec::new();

        let report = run_with(
            &fs,
            &selector,
            &table(&[("Modify", "Edit")]),
            WriteOptions::default(),
            |outcome| seen.push(outcome.status),
        )
        .unwrap();

        assert_eq!(report.summary.scanned, 3);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.updated, 1);
        assert_eq!(report.summary.unchanged, 1);
        assert_eq!(seen.len(), 3);
        assert_eq!(report.files.len(), 2);

        let failed = report
            .files
            .iter()
            .find(|f| f.status == FileStatus::Failed)
            .unwrap();
        assert!(failed.path.ends_with("A.jsx"));
        assert_eq!(failed.error_code.as_deref(), Some("file.access_failed"));

        assert_eq!(std::fs::read_to_string(dir.path().join("A.jsx")).unwrap(), "Modify");
        assert_eq!(std::fs::read_to_string(dir.path().join("B.jsx")).unwrap(), "Edit");
        assert_eq!(fs.writes.borrow().len(), 1);
    }
}
