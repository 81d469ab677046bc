//! Public output types for replacer runs.
//!
//! These are produced by the engine and serialized by the CLI, either as
//! the line report or inside the JSON envelope.

use serde::Serialize;

use crate::error::Error;

/// Terminal state of one file in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Unchanged,
    Updated,
    /// Content would change, but the run is a dry run.
    WouldUpdate,
    Failed,
}

/// Outcome for a single file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub path: String,
    pub status: FileStatus,
    pub replacements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl FileOutcome {
    pub fn failed(path: String, err: &Error) -> Self {
        Self {
            path,
            status: FileStatus::Failed,
            replacements: 0,
            backup: None,
            error: Some(err.message.clone()),
            error_code: Some(err.code.as_str().to_string()),
        }
    }
}

/// Totals across a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub scanned: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub replacements: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.scanned += 1;
        match outcome.status {
            FileStatus::Unchanged => self.unchanged += 1,
            FileStatus::Updated | FileStatus::WouldUpdate => self.updated += 1,
            FileStatus::Failed => self.failed += 1,
        }
        self.replacements += outcome.replacements;
    }
}

/// Full result of one replacer run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub root: String,
    pub extension: String,
    pub dry_run: bool,
    /// Changed and failed files, in processing order. Unchanged files are
    /// only counted in the summary.
    pub files: Vec<FileOutcome>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    pub fn has_changes(&self) -> bool {
        self.summary.updated > 0
    }
}
