use wi_core::ListWorkItemsRequest;
use wi_mcp::{ToolError, ToolName, ToolRouter};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Arguments for one `list_work_items` call.
///
/// Values are passed through untouched, so out-of-range limits and
/// offsets reach the implementation under test.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListWorkItemsCall {
    request: ListWorkItemsRequest,
}

impl ListWorkItemsCall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_type(mut self, item_type: impl Into<String>) -> Self {
        self.request.item_type = Some(item_type.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.request.status = Some(status.into());
        self
    }

    pub fn parent_id(mut self, parent_id: Uuid) -> Self {
        self.request.parent_id = Some(parent_id.to_string());
        self
    }

    pub fn include_deleted(mut self, include_deleted: bool) -> Self {
        self.request.include_deleted = Some(include_deleted);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.request.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.request.offset = Some(offset);
        self
    }

    pub fn request(&self) -> &ListWorkItemsRequest {
        &self.request
    }

    /// JSON arguments as sent in `tools/call`
    pub fn to_arguments(&self) -> Value {
        serde_json::to_value(&self.request).unwrap_or_else(|_| Value::Object(Default::default()))
    }
}

impl From<ListWorkItemsRequest> for ListWorkItemsCall {
    fn from(request: ListWorkItemsRequest) -> Self {
        Self { request }
    }
}

/// Structured error returned by an implementation that refused a call
#[derive(Error, Debug, Clone, PartialEq)]
#[error("rejected with code {code}: {message}")]
pub struct ToolRejection {
    pub code: i64,
    pub message: String,
    /// Offending argument, when the implementation names one
    pub field: Option<String>,
}

impl From<&ToolError> for ToolRejection {
    fn from(err: &ToolError) -> Self {
        Self {
            code: err.code(),
            message: err.client_message(),
            field: err
                .data()
                .and_then(|data| data.get("field").and_then(Value::as_str).map(str::to_owned)),
        }
    }
}

/// Anything that can answer `list_work_items`
#[async_trait]
pub trait WorkItemLister: Send + Sync {
    async fn list_work_items(&self, call: &ListWorkItemsCall) -> Result<Value, ToolRejection>;
}

#[async_trait]
impl WorkItemLister for ToolRouter {
    async fn list_work_items(&self, call: &ListWorkItemsCall) -> Result<Value, ToolRejection> {
        self.call_tool(ToolName::ListWorkItems.as_str(), call.to_arguments())
            .await
            .map_err(|e| ToolRejection::from(&e))
    }
}
