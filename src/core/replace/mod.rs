//! Bulk literal replacement — rename terminology across a file tree.
//!
//! Selects files by root + extension, runs an ordered table of literal
//! `old` → `new` pairs over each one, and writes back only what changed.

mod engine;
mod selector;
mod table;

pub use engine::{apply_table, process_file, run, run_with, Applied, WriteOptions};
pub use selector::{FileSelector, Selection};
pub use table::{ReplacementPair, ReplacementTable};
