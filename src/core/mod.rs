// Public modules
pub mod config;
pub mod error;
pub mod local_files;
pub mod output;
pub mod replace;

// Public modules for CLI access
pub mod defaults;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{FileOutcome, FileStatus, RunReport, RunSummary};
