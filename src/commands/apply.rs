use clap::Args;
use serde::Serialize;

use relabel::config;
use relabel::log_status;
use relabel::local_files;
use relabel::replace;
use relabel::{FileOutcome, FileStatus, RunReport};

use super::{emit_line, CmdResult, GlobalArgs, TargetArgs};

#[derive(Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    target: TargetArgs,

    /// Report what would change without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    target: TargetArgs,
}

#[derive(Serialize)]
pub struct ApplyOutput {
    pub command: &'static str,
    #[serde(flatten)]
    pub report: RunReport,
}

pub fn run(args: ApplyArgs, global: &GlobalArgs) -> CmdResult<ApplyOutput> {
    let report = execute(&args.target, args.dry_run, global)?;
    let exit_code = if report.has_failures() { 1 } else { 0 };

    Ok((
        ApplyOutput {
            command: "apply",
            report,
        },
        exit_code,
    ))
}

/// Dry run that exits non-zero when any file would change or fails.
pub fn run_check(args: CheckArgs, global: &GlobalArgs) -> CmdResult<ApplyOutput> {
    let report = execute(&args.target, true, global)?;
    let exit_code = if report.has_failures() || report.has_changes() {
        1
    } else {
        0
    };

    Ok((
        ApplyOutput {
            command: "check",
            report,
        },
        exit_code,
    ))
}

fn execute(target: &TargetArgs, dry_run: bool, global: &GlobalArgs) -> relabel::Result<RunReport> {
    let loaded = target.config.load()?;
    let settings = config::resolve(&loaded, &target.overrides(dry_run))?;

    log_status!(
        "apply",
        "{} replacement pair(s), {} write{}{}",
        settings.table.len(),
        match settings.options.mode {
            local_files::WriteMode::InPlace => "in-place",
            local_files::WriteMode::Atomic => "atomic",
        },
        if settings.options.backup { ", with backups" } else { "" },
        if dry_run { ", dry run" } else { "" }
    );

    let fs = local_files::local();
    let report = replace::run_with(
        &fs,
        &settings.selector,
        &settings.table,
        settings.options,
        |outcome| {
            if !global.json {
                print_outcome(outcome);
            }
        },
    )?;

    if !global.json {
        emit_line("Done");
    }

    Ok(report)
}

fn print_outcome(outcome: &FileOutcome) {
    match outcome.status {
        FileStatus::Unchanged => {}
        FileStatus::Updated => emit_line(&format!("Updated {}", outcome.path)),
        FileStatus::WouldUpdate => emit_line(&format!("Would update {}", outcome.path)),
        FileStatus::Failed => eprintln!(
            "Failed {}: {}",
            outcome.path,
            outcome.error.as_deref().unwrap_or("unknown error")
        ),
    }
}
