use crate::tools::{
    self, ToolDefinition, ToolName, create_work_item, list_work_items, query_work_item,
    update_work_item,
};
use crate::{Metrics, MetricsTimer, Result as ToolErrorResult, ToolError};

use wi_config::Config;

use error_location::ErrorLocation;
use std::panic::Location;
use std::str::FromStr;
use std::sync::Arc;

use log::{error, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::SqlitePool;

/// Routes `tools/call` requests to the tool implementations
#[derive(Clone)]
pub struct ToolRouter {
    pool: SqlitePool,
    config: Arc<Config>,
    metrics: Metrics,
}

impl ToolRouter {
    pub fn new(pool: SqlitePool, config: Arc<Config>) -> Self {
        Self {
            pool,
            config,
            metrics: Metrics::new(),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        tools::definitions()
    }

    /// Run the named tool. `Null` arguments are treated as an empty object.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> ToolErrorResult<Value> {
        let tool = match ToolName::from_str(name) {
            Ok(tool) => tool,
            Err(e) => {
                warn!("Rejected call to unknown tool '{}'", name);
                self.metrics.tool_failed("unknown", e.kind());
                return Err(e);
            }
        };
        let arguments = match arguments {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        info!("-> {}", tool);
        self.metrics.tool_called(tool.as_str());
        let timer = MetricsTimer::new(self.metrics.clone(), tool.as_str());

        let result = self.dispatch(tool, arguments).await;
        let elapsed = timer.finish();

        match &result {
            Ok(_) => info!("<- {} completed in {}ms", tool, elapsed.as_millis()),
            Err(e) => {
                self.metrics.tool_failed(tool.as_str(), e.kind());
                if e.is_internal() {
                    error!("<- {} failed in {}ms: {}", tool, elapsed.as_millis(), e);
                } else {
                    warn!(
                        "<- {} rejected in {}ms: {}",
                        tool,
                        elapsed.as_millis(),
                        e.client_message()
                    );
                }
            }
        }

        result
    }

    async fn dispatch(&self, tool: ToolName, arguments: Value) -> ToolErrorResult<Value> {
        match tool {
            ToolName::ListWorkItems => {
                let request = parse_arguments(tool, arguments)?;
                to_value(list_work_items::execute(&self.pool, &self.config, request).await?)
            }
            ToolName::CreateWorkItem => {
                let args = parse_arguments(tool, arguments)?;
                to_value(create_work_item::execute(&self.pool, &self.config, args).await?)
            }
            ToolName::UpdateWorkItem => {
                let args = parse_arguments(tool, arguments)?;
                to_value(update_work_item::execute(&self.pool, &self.config, args).await?)
            }
            ToolName::QueryWorkItem => {
                let args = parse_arguments(tool, arguments)?;
                to_value(query_work_item::execute(&self.pool, args).await?)
            }
        }
    }
}

#[track_caller]
fn parse_arguments<T: DeserializeOwned>(tool: ToolName, arguments: Value) -> ToolErrorResult<T> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.as_str(),
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

fn to_value<T: Serialize>(response: T) -> ToolErrorResult<Value> {
    Ok(serde_json::to_value(response)?)
}
