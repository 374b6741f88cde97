use crate::{DbError, Result as DbErrorResult};

use wi_core::{
    PaginatedWorkItems, Pagination, WorkItem, WorkItemFilter, WorkItemStatus, WorkItemType,
};

use error_location::ErrorLocation;
use std::fmt::Display;
use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

const COLUMNS: &str = "id, version, item_type, title, description, notes, status, \
     parent_id, path, depth, branch_name, commit_hash, pr_number, metadata, \
     created_at, updated_at, created_by, deleted_at";

pub struct WorkItemRepository;

impl WorkItemRepository {
    pub async fn create<'e, E>(executor: E, work_item: &WorkItem) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO work_items (
                    id, version, item_type, title, description, notes, status,
                    parent_id, path, depth, branch_name, commit_hash, pr_number, metadata,
                    created_at, updated_at, created_by, deleted_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(work_item.id.to_string())
        .bind(work_item.version)
        .bind(work_item.item_type.as_str())
        .bind(work_item.title.as_str())
        .bind(work_item.description.as_deref())
        .bind(work_item.notes.as_deref())
        .bind(work_item.status.as_str())
        .bind(work_item.parent_id.map(|id| id.to_string()))
        .bind(work_item.path.as_str())
        .bind(work_item.depth)
        .bind(work_item.branch_name.as_deref())
        .bind(work_item.commit_hash.as_deref())
        .bind(work_item.pr_number)
        .bind(work_item.metadata.to_string())
        .bind(work_item.created_at.timestamp_millis())
        .bind(work_item.updated_at.timestamp_millis())
        .bind(work_item.created_by.as_str())
        .bind(work_item.deleted_at.map(|dt| dt.timestamp_millis()))
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Find a work item by id. Soft-deleted rows are returned too.
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<WorkItem>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query(&format!("SELECT {} FROM work_items WHERE id = ?", COLUMNS))
            .bind(id.to_string())
            .fetch_optional(executor)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    /// Persist `work_item` if the stored version still equals `expected_version`.
    ///
    /// Returns the stored item with its version bumped. A missing row gives
    /// `DbError::NotFound`; a stale version gives `DbError::VersionConflict`
    /// carrying the version currently stored.
    pub async fn update<'e, E>(
        executor: E,
        work_item: &WorkItem,
        expected_version: i32,
    ) -> DbErrorResult<WorkItem>
    where
        E: sqlx::Executor<'e, Database = Sqlite> + Copy,
    {
        let result = sqlx::query(
            r#"
                UPDATE work_items
                SET title = ?, description = ?, notes = ?, status = ?,
                    parent_id = ?, path = ?, depth = ?,
                    branch_name = ?, commit_hash = ?, pr_number = ?, metadata = ?,
                    updated_at = ?, deleted_at = ?, version = version + 1
                WHERE id = ? AND version = ?
            "#,
        )
        .bind(work_item.title.as_str())
        .bind(work_item.description.as_deref())
        .bind(work_item.notes.as_deref())
        .bind(work_item.status.as_str())
        .bind(work_item.parent_id.map(|id| id.to_string()))
        .bind(work_item.path.as_str())
        .bind(work_item.depth)
        .bind(work_item.branch_name.as_deref())
        .bind(work_item.commit_hash.as_deref())
        .bind(work_item.pr_number)
        .bind(work_item.metadata.to_string())
        .bind(work_item.updated_at.timestamp_millis())
        .bind(work_item.deleted_at.map(|dt| dt.timestamp_millis()))
        .bind(work_item.id.to_string())
        .bind(expected_version)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            let current: Option<i32> =
                sqlx::query_scalar("SELECT version FROM work_items WHERE id = ?")
                    .bind(work_item.id.to_string())
                    .fetch_optional(executor)
                    .await?;

            return Err(match current {
                None => DbError::not_found(work_item.id),
                Some(current_version) => DbError::VersionConflict {
                    id: work_item.id,
                    expected_version,
                    current_version,
                    location: ErrorLocation::from(Location::caller()),
                },
            });
        }

        Ok(WorkItem {
            version: expected_version + 1,
            ..work_item.clone()
        })
    }

    /// Mark a live work item deleted. Returns false when the item is missing
    /// or already deleted.
    pub async fn soft_delete<'e, E>(
        executor: E,
        id: Uuid,
        deleted_at: DateTime<Utc>,
    ) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let millis = deleted_at.timestamp_millis();

        let result = sqlx::query(
            r#"
                UPDATE work_items
                SET deleted_at = ?, updated_at = ?, version = version + 1
                WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(millis)
        .bind(millis)
        .bind(id.to_string())
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// One page of items matching `filter`, newest first, plus the total
    /// count of matches. Both queries share the same predicates.
    pub async fn list(
        pool: &SqlitePool,
        filter: &WorkItemFilter,
        pagination: Pagination,
    ) -> DbErrorResult<PaginatedWorkItems> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM work_items");
        push_filter(&mut count, filter);
        let total_count: i64 = count.build_query_scalar().fetch_one(pool).await?;

        if total_count <= pagination.offset() {
            return Ok(PaginatedWorkItems::new(Vec::new(), total_count, pagination));
        }

        let mut page = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM work_items", COLUMNS));
        push_filter(&mut page, filter);
        page.push(" ORDER BY created_at DESC, id ASC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows = page.build().fetch_all(pool).await?;
        let items = rows.iter().map(map_row).collect::<DbErrorResult<Vec<_>>>()?;

        Ok(PaginatedWorkItems::new(items, total_count, pagination))
    }

    /// Ancestors of `work_item` from the root down, resolved through its path.
    pub async fn find_ancestors<'e, E>(
        executor: E,
        work_item: &WorkItem,
    ) -> DbErrorResult<Vec<WorkItem>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let self_id = work_item.id.to_string();
        let ancestor_ids: Vec<&str> = work_item
            .path
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != self_id)
            .collect();

        if ancestor_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM work_items WHERE id IN (",
            COLUMNS
        ));
        let mut ids = query.separated(", ");
        for id in ancestor_ids {
            ids.push_bind(id.to_string());
        }
        ids.push_unseparated(") ORDER BY depth ASC");

        let rows = query.build().fetch_all(executor).await?;
        rows.iter().map(map_row).collect()
    }

    /// Live descendants of `work_item` at most `max_depth` levels below it,
    /// shallowest first.
    pub async fn find_descendants<'e, E>(
        executor: E,
        work_item: &WorkItem,
        max_depth: i32,
    ) -> DbErrorResult<Vec<WorkItem>>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM work_items \
             WHERE path LIKE ? AND depth <= ? AND deleted_at IS NULL \
             ORDER BY depth ASC, created_at DESC, id ASC",
            COLUMNS
        ))
        .bind(format!("{}/%", work_item.path))
        .bind(work_item.depth + max_depth)
        .fetch_all(executor)
        .await?;

        rows.iter().map(map_row).collect()
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: &WorkItemFilter) {
    query.push(" WHERE 1 = 1");

    if !filter.include_deleted {
        query.push(" AND deleted_at IS NULL");
    }
    if let Some(item_type) = filter.item_type {
        query.push(" AND item_type = ").push_bind(item_type.as_str());
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }
    if let Some(parent_id) = filter.parent_id {
        query.push(" AND parent_id = ").push_bind(parent_id.to_string());
    }
}

fn map_row(row: &SqliteRow) -> DbErrorResult<WorkItem> {
    Ok(WorkItem {
        id: parse_uuid("id", row.try_get("id")?)?,
        version: row.try_get("version")?,
        item_type: WorkItemType::from_str(row.try_get("item_type")?)
            .map_err(|e| invalid("item_type", e))?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        notes: row.try_get("notes")?,
        status: WorkItemStatus::from_str(row.try_get("status")?)
            .map_err(|e| invalid("status", e))?,
        parent_id: row
            .try_get::<Option<&str>, _>("parent_id")?
            .map(|raw| parse_uuid("parent_id", raw))
            .transpose()?,
        path: row.try_get("path")?,
        depth: row.try_get("depth")?,
        branch_name: row.try_get("branch_name")?,
        commit_hash: row.try_get("commit_hash")?,
        pr_number: row.try_get("pr_number")?,
        metadata: serde_json::from_str(row.try_get("metadata")?)
            .map_err(|e| invalid("metadata", e))?,
        created_at: from_millis("created_at", row.try_get("created_at")?)?,
        updated_at: from_millis("updated_at", row.try_get("updated_at")?)?,
        created_by: row.try_get("created_by")?,
        deleted_at: row
            .try_get::<Option<i64>, _>("deleted_at")?
            .map(|ms| from_millis("deleted_at", ms))
            .transpose()?,
    })
}

#[track_caller]
fn invalid(column: &'static str, err: impl Display) -> DbError {
    DbError::InvalidRow {
        column,
        message: err.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

fn parse_uuid(column: &'static str, raw: &str) -> DbErrorResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| invalid(column, e))
}

fn from_millis(column: &'static str, millis: i64) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| invalid(column, format!("timestamp {} out of range", millis)))
}
