use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the list_work_items contract suite
    ///
    /// Seeds the contract fixture into a scratch in-memory database, or into
    /// --database when given, then runs every check. Exits 1 on violations.
    Contract(ContractArgs),

    /// List work items as JSON through the list_work_items tool
    List(ListArgs),
}

#[derive(Args, Debug, Default)]
pub struct ContractArgs {
    /// SQLite database to seed and test instead of a scratch one
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Number of calls sampled for the latency budget
    #[arg(long)]
    pub samples: Option<usize>,

    /// p95 latency budget in milliseconds
    #[arg(long)]
    pub budget_ms: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// SQLite database (defaults to the configured path)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// project, session, task or research
    #[arg(long = "type")]
    pub item_type: Option<String>,

    /// active, completed or blocked
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub parent_id: Option<String>,

    /// Include soft-deleted items
    #[arg(long)]
    pub include_deleted: bool,

    /// Page size (1-100)
    #[arg(long, allow_hyphen_values = true)]
    pub limit: Option<i64>,

    #[arg(long, allow_hyphen_values = true)]
    pub offset: Option<i64>,
}
