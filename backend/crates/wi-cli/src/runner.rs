use crate::commands::{ContractArgs, ListArgs};
use crate::{CliError, Result as CliErrorResult};

use wi_config::Config;
use wi_contract::{
    ContractFixture, ContractReport, ContractSuite, FixtureSeeder, LatencyBudget, ListWorkItemsCall,
    WorkItemLister,
};
use wi_core::ListWorkItemsRequest;
use wi_mcp::ToolRouter;

use std::sync::Arc;
use std::time::Duration;

use log::info;
use serde_json::Value;
use sqlx::SqlitePool;

/// Seed the fixture, run the suite and return its report
pub async fn run_contract(args: &ContractArgs, config: Config) -> CliErrorResult<ContractReport> {
    let pool = match &args.database {
        Some(path) => wi_db::open_pool(path, config.database.max_connections).await?,
        None => wi_db::open_in_memory().await?,
    };

    let mut budget = LatencyBudget::from_config(&config.performance);
    if let Some(samples) = args.samples {
        budget.samples = samples;
    }
    if let Some(budget_ms) = args.budget_ms {
        budget.p95 = Duration::from_millis(budget_ms);
    }

    let fixture = pool.seed(&ContractFixture::standard()).await?;
    let router = ToolRouter::new(pool, Arc::new(config));

    info!(
        "Running contract suite: p95 budget {}ms over {} calls",
        budget.p95.as_millis(),
        budget.samples
    );
    Ok(ContractSuite::new(&router, &fixture)
        .with_budget(budget)
        .run()
        .await)
}

/// One page from the configured (or given) database
pub async fn run_list(args: &ListArgs, config: Config) -> CliErrorResult<Value> {
    let pool = open_list_pool(args, &config).await?;
    list_page(pool, args, config).await
}

async fn open_list_pool(args: &ListArgs, config: &Config) -> CliErrorResult<SqlitePool> {
    let path = match &args.database {
        Some(path) => path.clone(),
        None => config.database_path()?,
    };
    Ok(wi_db::open_pool(&path, config.database.max_connections).await?)
}

pub async fn list_page(pool: SqlitePool, args: &ListArgs, config: Config) -> CliErrorResult<Value> {
    let router = ToolRouter::new(pool, Arc::new(config));
    let call = ListWorkItemsCall::from(ListWorkItemsRequest {
        item_type: args.item_type.clone(),
        status: args.status.clone(),
        parent_id: args.parent_id.clone(),
        include_deleted: args.include_deleted.then_some(true),
        limit: args.limit,
        offset: args.offset,
    });

    router
        .list_work_items(&call)
        .await
        .map_err(|rejection| CliError::Tool {
            code: rejection.code,
            message: rejection.message,
        })
}
