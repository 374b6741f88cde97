use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "wi")]
#[command(about = "Work item MCP operator CLI: contract checks and listing")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Log progress to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}
