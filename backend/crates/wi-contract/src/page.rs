use wi_core::{ListWorkItemsResponse, WorkItemStatus, WorkItemType};

use std::str::FromStr;

use serde_json::Value;
use uuid::Uuid;

/// The fields of a listed item the contract inspects
#[derive(Debug, Clone, PartialEq)]
pub struct ListedItem {
    pub id: Uuid,
    pub item_type: WorkItemType,
    pub status: WorkItemStatus,
    pub parent_id: Option<Uuid>,
    pub deleted: bool,
}

/// A decoded `list_work_items` response
#[derive(Debug, Clone, PartialEq)]
pub struct ListedPage {
    pub items: Vec<ListedItem>,
    pub total_count: i64,
    pub has_more: bool,
    pub limit: i64,
    pub offset: i64,
}

impl ListedPage {
    /// Decode and shape-check a raw response. Every problem found is
    /// returned, not just the first.
    pub fn parse(value: &Value) -> Result<Self, Vec<String>> {
        let response: ListWorkItemsResponse = serde_json::from_value(value.clone())
            .map_err(|e| vec![format!("response does not match the schema: {}", e)])?;

        let mut problems = Vec::new();
        if response.total_count < 0 {
            problems.push(format!("total_count is negative: {}", response.total_count));
        }
        if response.offset < 0 {
            problems.push(format!("offset is negative: {}", response.offset));
        }
        if !(wi_core::MIN_LIMIT..=wi_core::MAX_LIMIT).contains(&response.limit) {
            problems.push(format!("limit {} outside [1, 100]", response.limit));
        }

        let mut items = Vec::with_capacity(response.items.len());
        for (index, dto) in response.items.into_iter().enumerate() {
            let id = Uuid::parse_str(&dto.id)
                .map_err(|_| format!("items[{}].id is not a UUID: {}", index, dto.id));
            let item_type = WorkItemType::from_str(&dto.item_type)
                .map_err(|_| format!("items[{}].item_type invalid: {}", index, dto.item_type));
            let status = WorkItemStatus::from_str(&dto.status)
                .map_err(|_| format!("items[{}].status invalid: {}", index, dto.status));
            let parent_id = dto
                .parent_id
                .as_deref()
                .map(Uuid::parse_str)
                .transpose()
                .map_err(|_| format!("items[{}].parent_id is not a UUID", index));

            match (id, item_type, status, parent_id) {
                (Ok(id), Ok(item_type), Ok(status), Ok(parent_id)) => items.push(ListedItem {
                    id,
                    item_type,
                    status,
                    parent_id,
                    deleted: dto.deleted_at.is_some(),
                }),
                (id, item_type, status, parent_id) => {
                    problems.extend(id.err());
                    problems.extend(item_type.err());
                    problems.extend(status.err());
                    problems.extend(parent_id.err());
                }
            }
        }

        if !problems.is_empty() {
            return Err(problems);
        }

        Ok(Self {
            items,
            total_count: response.total_count,
            has_more: response.has_more,
            limit: response.limit,
            offset: response.offset,
        })
    }

    /// `has_more` as the pagination formula defines it, for the offset
    /// that was requested rather than the one echoed back
    pub fn expected_has_more(&self, requested_offset: i64) -> bool {
        requested_offset + (self.items.len() as i64) < self.total_count
    }
}
