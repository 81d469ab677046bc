use clap::Args;
use serde::Serialize;

use relabel::config;
use relabel::replace::ReplacementTable;

use super::{emit_line, CmdResult, ConfigArgs, GlobalArgs};

#[derive(Args)]
pub struct TableArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOutput {
    pub command: &'static str,
    /// "builtin" or the config file path.
    pub source: String,
    pub replacements: ReplacementTable,
}

pub fn run(args: TableArgs, global: &GlobalArgs) -> CmdResult<TableOutput> {
    let loaded = args.config.load()?;
    let table = config::table_for(&loaded.config)?;

    let source = match (&loaded.config.replacements, &loaded.source) {
        (Some(_), Some(path)) => path.display().to_string(),
        _ => "builtin".to_string(),
    };

    if !global.json {
        for pair in table.pairs() {
            emit_line(&format!("{} => {}", pair.old, pair.new));
        }
    }

    Ok((
        TableOutput {
            command: "table",
            source,
            replacements: table,
        },
        0,
    ))
}
