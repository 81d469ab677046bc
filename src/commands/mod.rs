use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

use relabel::config::{self, LoadedConfig, Overrides};

pub mod apply;
pub mod table;

pub type CmdResult<T> = relabel::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// Commands print their own line report unless this is set.
    pub json: bool,
}

/// Config file selection shared by every command.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Config file (JSON or TOML). Defaults to ./relabel.json or ./relabel.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> relabel::Result<LoadedConfig> {
        let cwd = std::env::current_dir().map_err(|e| {
            relabel::Error::internal_io(e.to_string(), Some("resolve current directory".to_string()))
        })?;
        config::discover(self.config.as_deref(), &cwd)
    }
}

/// Which files to touch and how to write them.
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Directory to scan recursively (overrides config `root`)
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// File extension to select, e.g. jsx (overrides config `extension`)
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Glob of root-relative paths to skip (repeatable, adds to config `exclude`)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Write through a temp file and rename it into place
    #[arg(long)]
    pub atomic: bool,

    /// Keep a <file>.bak copy of every file before overwriting it.
    /// A file whose .bak already exists is reported as failed and left unwritten
    #[arg(long)]
    pub backup: bool,
}

impl TargetArgs {
    pub fn overrides(&self, dry_run: bool) -> Overrides {
        Overrides {
            root: self.root.clone(),
            extension: self.extension.clone(),
            exclude: self.exclude.clone(),
            atomic: self.atomic,
            backup: self.backup,
            dry_run,
        }
    }
}

/// Write one report line to stdout, ignoring a closed pipe.
pub(crate) fn emit_line(line: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", line);
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (relabel::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Apply(args) => dispatch!(args, global, apply),
        crate::Commands::Check(args) => {
            crate::output::map_cmd_result_to_json(apply::run_check(args, global))
        }
        crate::Commands::Table(args) => dispatch!(args, global, table),
    }
}
