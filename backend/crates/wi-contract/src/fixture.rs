use crate::{HarnessError, Result as HarnessResult};

use wi_core::{WorkItem, WorkItemStatus, WorkItemType};
use wi_db::WorkItemRepository;

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{Duration, SubsecRound, Utc};
use log::info;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Number of unparented filler tasks in the standard fixture
pub const BULK_TASKS: usize = 60;

/// One item of a fixture, addressed by a stable key
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureItem {
    pub key: String,
    pub item_type: WorkItemType,
    pub status: WorkItemStatus,
    /// Key of the parent, which must appear earlier in the fixture
    pub parent: Option<String>,
    pub deleted: bool,
}

impl FixtureItem {
    fn new(key: impl Into<String>, item_type: WorkItemType, status: WorkItemStatus) -> Self {
        Self {
            key: key.into(),
            item_type,
            status,
            parent: None,
            deleted: false,
        }
    }

    fn under(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    fn deleted(mut self) -> Self {
        self.deleted = true;
        self
    }
}

/// Deterministic dataset the contract checks run against
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContractFixture {
    items: Vec<FixtureItem>,
}

impl ContractFixture {
    pub fn new(items: Vec<FixtureItem>) -> Self {
        Self { items }
    }

    /// Every type and status, a two-level hierarchy under `project-alpha`,
    /// soft-deleted items at several levels, and enough rows to span pages.
    pub fn standard() -> Self {
        use WorkItemStatus::{Active, Blocked, Completed};
        use WorkItemType::{Project, Research, Session, Task};

        let mut items = vec![
            FixtureItem::new("project-alpha", Project, Active),
            FixtureItem::new("project-beta", Project, Completed),
            FixtureItem::new("project-gamma", Project, Blocked).deleted(),
            FixtureItem::new("session-1", Session, Active).under("project-alpha"),
            FixtureItem::new("session-2", Session, Completed).under("project-alpha"),
            FixtureItem::new("session-3", Session, Active)
                .under("project-alpha")
                .deleted(),
            FixtureItem::new("task-1", Task, Active).under("session-1"),
            FixtureItem::new("task-2", Task, Blocked).under("session-1"),
            FixtureItem::new("task-3", Task, Completed).under("session-1"),
            FixtureItem::new("task-4", Task, Active)
                .under("session-1")
                .deleted(),
            FixtureItem::new("research-1", Research, Active),
            FixtureItem::new("research-2", Research, Completed),
            FixtureItem::new("research-3", Research, Blocked),
            FixtureItem::new("research-4", Research, Active).deleted(),
            FixtureItem::new("research-5", Research, Active).under("project-beta"),
        ];

        let statuses = [Active, Completed, Blocked];
        for i in 0..BULK_TASKS {
            items.push(FixtureItem::new(
                format!("bulk-task-{}", i),
                Task,
                statuses[i % statuses.len()],
            ));
        }

        Self { items }
    }

    pub fn items(&self) -> &[FixtureItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A fixture after seeding, with the ids assigned to each key
#[derive(Debug, Clone)]
pub struct SeededFixture {
    items: Vec<FixtureItem>,
    ids: HashMap<String, Uuid>,
}

impl SeededFixture {
    pub fn new(items: Vec<FixtureItem>, ids: HashMap<String, Uuid>) -> Self {
        Self { items, ids }
    }

    pub fn id(&self, key: &str) -> Option<Uuid> {
        self.ids.get(key).copied()
    }

    pub fn items(&self) -> &[FixtureItem] {
        &self.items
    }

    /// Ids of seeded items matching `predicate`
    pub fn ids_where(&self, predicate: impl Fn(&FixtureItem) -> bool) -> HashSet<Uuid> {
        self.items
            .iter()
            .filter(|item| predicate(item))
            .filter_map(|item| self.id(&item.key))
            .collect()
    }

    pub fn live_ids_where(&self, predicate: impl Fn(&FixtureItem) -> bool) -> HashSet<Uuid> {
        self.ids_where(|item| !item.deleted && predicate(item))
    }

    pub fn deleted_ids(&self) -> HashSet<Uuid> {
        self.ids_where(|item| item.deleted)
    }

    /// Live seeded items whose parent is `parent_key`
    pub fn live_children_of(&self, parent_key: &str) -> HashSet<Uuid> {
        self.live_ids_where(|item| item.parent.as_deref() == Some(parent_key))
    }

    /// First key that has at least one live child
    pub fn parent_with_children(&self) -> Option<&str> {
        self.items
            .iter()
            .map(|item| item.key.as_str())
            .find(|key| !self.live_children_of(key).is_empty())
    }
}

/// Writes a fixture into a backing store
#[async_trait]
pub trait FixtureSeeder: Send + Sync {
    async fn seed(&self, fixture: &ContractFixture) -> HarnessResult<SeededFixture>;
}

#[async_trait]
impl FixtureSeeder for SqlitePool {
    /// Inserts the fixture in one transaction. Items are one millisecond
    /// apart, newest first, so listing order matches fixture order.
    async fn seed(&self, fixture: &ContractFixture) -> HarnessResult<SeededFixture> {
        let base = Utc::now().trunc_subsecs(3);
        let mut created: HashMap<String, WorkItem> = HashMap::with_capacity(fixture.len());
        let mut tx = self.begin().await?;

        for (index, entry) in fixture.items().iter().enumerate() {
            if created.contains_key(&entry.key) {
                return Err(HarnessError::fixture(format!("duplicate key {}", entry.key)));
            }

            let parent = match &entry.parent {
                None => None,
                Some(key) => Some(created.get(key).ok_or_else(|| {
                    HarnessError::fixture(format!(
                        "{} references parent {} before it is defined",
                        entry.key, key
                    ))
                })?),
            };

            let mut item = WorkItem::new(
                entry.item_type,
                format!("Contract {}", entry.key),
                metadata_for(entry.item_type),
                parent,
                "contract-harness".to_string(),
            )?;
            item.status = entry.status;
            item.created_at = base - Duration::milliseconds(index as i64);
            item.updated_at = item.created_at;
            if entry.deleted {
                item.deleted_at = Some(base);
            }

            WorkItemRepository::create(&mut *tx, &item).await?;
            created.insert(entry.key.clone(), item);
        }

        tx.commit().await?;
        info!("Seeded contract fixture with {} items", created.len());

        let ids = created
            .into_iter()
            .map(|(key, item)| (key, item.id))
            .collect();
        Ok(SeededFixture::new(fixture.items().to_vec(), ids))
    }
}

/// Minimal valid metadata for each type
pub fn metadata_for(item_type: WorkItemType) -> Value {
    match item_type {
        WorkItemType::Project => json!({
            "description": "Contract fixture project",
            "target_quarter": "2026-Q1",
            "constitutional_principles": []
        }),
        WorkItemType::Session => json!({
            "token_budget": 200000,
            "prompts_count": 0,
            "yaml_frontmatter": {}
        }),
        WorkItemType::Task => json!({ "estimated_hours": 1.5 }),
        WorkItemType::Research => json!({
            "research_questions": ["Does the contract hold?"],
            "references": []
        }),
    }
}
