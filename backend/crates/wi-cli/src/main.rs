//! wi - work item operator CLI
//!
//! # Examples
//!
//! ```bash
//! # Run the list_work_items contract against a scratch database
//! wi contract
//!
//! # Tighter budget, more samples, against an existing file
//! wi contract --database .wi/scratch.db --samples 500 --budget-ms 50
//!
//! # First page of active tasks
//! wi list --type task --status active --pretty
//! ```

use wi_cli::{Cli, CliError, Commands, logger, runner};
use wi_config::Config;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = logger::initialize(cli.verbose) {
        eprintln!("Error initializing logger: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> wi_cli::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    match cli.command {
        Commands::Contract(args) => {
            let report = runner::run_contract(&args, config).await?;
            println!("{}", report);
            report.into_result()?;
            Ok(())
        }
        Commands::List(args) => {
            let page = runner::run_list(&args, config).await?;
            let output = if cli.pretty {
                serde_json::to_string_pretty(&page)
            } else {
                serde_json::to_string(&page)
            };
            let json = output
                .map_err(|e| CliError::output(format!("Error serializing response: {}", e)))?;
            println!("{}", json);
            Ok(())
        }
    }
}
