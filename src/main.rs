use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;

use commands::{apply, table};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Text,
}

#[derive(Parser)]
#[command(name = "relabel")]
#[command(version = VERSION)]
#[command(about = "Rename product terminology across UI source files")]
struct Cli {
    /// Print a JSON response envelope instead of the line report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the replacement table to every selected file
    Apply(apply::ApplyArgs),
    /// Report files that would change; exits 1 if any would
    Check(apply::CheckArgs),
    /// Show the effective replacement table
    Table(table::TableArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let mode = if cli.json {
        ResponseMode::Json
    } else {
        ResponseMode::Text
    };
    let global = GlobalArgs { json: cli.json };

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    match mode {
        ResponseMode::Json => {
            if let Err(err) = output::print_json_result(json_result) {
                output::print_text_error(&err);
                return std::process::ExitCode::from(exit_code_to_u8(
                    output::exit_code_for_error(err.code),
                ));
            }
        }
        ResponseMode::Text => {
            if let Err(err) = json_result {
                output::print_text_error(&err);
            }
        }
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
