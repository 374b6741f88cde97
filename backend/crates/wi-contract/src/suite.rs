use crate::{
    CheckOutcome, ContractReport, LatencyBudget, LatencySample, LatencySummary, ListWorkItemsCall,
    ListedItem, ListedPage, SeededFixture, WorkItemLister,
};

use wi_core::{MAX_LIMIT, MIN_LIMIT, WorkItemStatus, WorkItemType};

use std::collections::HashSet;
use std::future::Future;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use uuid::Uuid;

/// Checks in the order they run
pub const CHECK_NAMES: [&str; 11] = [
    "response_schema",
    "filter_item_type",
    "filter_status",
    "filter_parent_id",
    "filter_combination",
    "soft_delete_default_exclusion",
    "soft_delete_include_flag",
    "pagination_bounds",
    "pagination_consistency",
    "empty_result",
    "latency_budget",
];

/// Guards page walks against implementations that never stop paging
const MAX_WALK_PAGES: usize = 1_000;
/// Small page size used to force many pages
const SMALL_PAGE: i64 = 7;

/// Every page of one query, plus what went wrong while paging
#[derive(Debug, Default)]
struct Walk {
    items: Vec<ListedItem>,
    total_count: i64,
    violations: Vec<String>,
}

impl Walk {
    fn ids(&self) -> HashSet<Uuid> {
        self.items.iter().map(|item| item.id).collect()
    }
}

/// Runs the `list_work_items` contract against a lister seeded with a fixture
pub struct ContractSuite<'a, L: WorkItemLister + ?Sized> {
    lister: &'a L,
    fixture: &'a SeededFixture,
    budget: LatencyBudget,
}

impl<'a, L: WorkItemLister + ?Sized> ContractSuite<'a, L> {
    pub fn new(lister: &'a L, fixture: &'a SeededFixture) -> Self {
        Self {
            lister,
            fixture,
            budget: LatencyBudget::default(),
        }
    }

    pub fn with_budget(mut self, budget: LatencyBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Run every check in order. Violations are collected, never raised.
    pub async fn run(&self) -> ContractReport {
        let mut outcomes = Vec::with_capacity(CHECK_NAMES.len());

        outcomes.push(timed("response_schema", self.check_response_schema()).await);
        outcomes.push(timed("filter_item_type", self.check_filter_item_type()).await);
        outcomes.push(timed("filter_status", self.check_filter_status()).await);
        outcomes.push(timed("filter_parent_id", self.check_filter_parent_id()).await);
        outcomes.push(timed("filter_combination", self.check_filter_combination()).await);
        outcomes.push(
            timed(
                "soft_delete_default_exclusion",
                self.check_soft_delete_default_exclusion(),
            )
            .await,
        );
        outcomes.push(timed("soft_delete_include_flag", self.check_soft_delete_include_flag()).await);
        outcomes.push(timed("pagination_bounds", self.check_pagination_bounds()).await);
        outcomes.push(timed("pagination_consistency", self.check_pagination_consistency()).await);
        outcomes.push(timed("empty_result", self.check_empty_result()).await);

        let start = Instant::now();
        let (violations, latency) = self.check_latency_budget().await;
        outcomes.push(finish("latency_budget", violations, start.elapsed()));

        let report = ContractReport { outcomes, latency };
        if report.passed() {
            info!("Contract passed: all {} checks", report.outcomes.len());
        } else {
            warn!("Contract failed: {:?}", report.failed_checks());
        }
        report
    }

    async fn check_response_schema(&self) -> Vec<String> {
        let mut violations = Vec::new();

        let calls = [
            ListWorkItemsCall::new(),
            ListWorkItemsCall::new().include_deleted(true).limit(MAX_LIMIT),
        ];
        for call in calls {
            match self.fetch(&call).await {
                Ok(page) => {
                    let requested_offset = call.request().offset.unwrap_or(0);
                    if page.offset != requested_offset {
                        violations.push(format!(
                            "offset echoed as {}, requested {}",
                            page.offset, requested_offset
                        ));
                    }
                    if let Some(limit) = call.request().limit
                        && page.limit != limit
                    {
                        violations.push(format!(
                            "limit echoed as {}, requested {}",
                            page.limit, limit
                        ));
                    }
                    if page.items.len() as i64 > page.limit {
                        violations.push(format!(
                            "{} items returned with limit {}",
                            page.items.len(),
                            page.limit
                        ));
                    }
                    if page.has_more != page.expected_has_more(requested_offset) {
                        violations.push(has_more_message(&page, requested_offset));
                    }
                }
                Err(problems) => violations.extend(problems),
            }
        }

        violations
    }

    async fn check_filter_item_type(&self) -> Vec<String> {
        let mut violations = Vec::new();

        for item_type in WorkItemType::ALL {
            let walk = self
                .walk(ListWorkItemsCall::new().item_type(item_type.as_str()), MAX_LIMIT)
                .await;
            violations.extend(walk.violations.iter().cloned());

            for item in walk.items.iter().filter(|i| i.item_type != item_type) {
                violations.push(format!(
                    "item_type={} returned {} item {}",
                    item_type, item.item_type, item.id
                ));
            }
            violations.extend(deleted_leaks(&walk, &format!("item_type={}", item_type)));

            let expected = self.fixture.live_ids_where(|i| i.item_type == item_type);
            violations.extend(missing(&expected, &walk.ids(), &format!("item_type={}", item_type)));
        }

        violations
    }

    async fn check_filter_status(&self) -> Vec<String> {
        let mut violations = Vec::new();

        for status in WorkItemStatus::ALL {
            let walk = self
                .walk(ListWorkItemsCall::new().status(status.as_str()), MAX_LIMIT)
                .await;
            violations.extend(walk.violations.iter().cloned());

            for item in walk.items.iter().filter(|i| i.status != status) {
                violations.push(format!(
                    "status={} returned {} item {}",
                    status, item.status, item.id
                ));
            }
            violations.extend(deleted_leaks(&walk, &format!("status={}", status)));

            let expected = self.fixture.live_ids_where(|i| i.status == status);
            violations.extend(missing(&expected, &walk.ids(), &format!("status={}", status)));
        }

        violations
    }

    async fn check_filter_parent_id(&self) -> Vec<String> {
        let Some((parent_key, parent_id)) = self
            .fixture
            .parent_with_children()
            .and_then(|key| self.fixture.id(key).map(|id| (key, id)))
        else {
            return vec!["fixture has no parent with live children".to_string()];
        };

        let walk = self
            .walk(ListWorkItemsCall::new().parent_id(parent_id), MAX_LIMIT)
            .await;
        let mut violations = walk.violations.clone();

        for item in walk.items.iter().filter(|i| i.parent_id != Some(parent_id)) {
            violations.push(format!(
                "parent_id={} returned item {} with parent {:?}",
                parent_key, item.id, item.parent_id
            ));
        }

        let expected = self.fixture.live_children_of(parent_key);
        let returned = walk.ids();
        if returned != expected {
            violations.push(format!(
                "parent_id={} returned {} items, expected exactly {}",
                parent_key,
                returned.len(),
                expected.len()
            ));
        }

        violations
    }

    /// Two or more filters at once: every returned item satisfies all of
    /// them, and every seeded item matching all of them is returned.
    async fn check_filter_combination(&self) -> Vec<String> {
        let mut violations = Vec::new();

        for item_type in WorkItemType::ALL {
            for status in WorkItemStatus::ALL {
                let call = ListWorkItemsCall::new()
                    .item_type(item_type.as_str())
                    .status(status.as_str());
                let context = format!("item_type={}&status={}", item_type, status);
                let expected = self
                    .fixture
                    .live_ids_where(|i| i.item_type == item_type && i.status == status);
                violations.extend(
                    self.combined(call, &context, &expected, |item| {
                        item.item_type == item_type && item.status == status && !item.deleted
                    })
                    .await,
                );
            }

            let call = ListWorkItemsCall::new()
                .item_type(item_type.as_str())
                .include_deleted(true);
            let context = format!("item_type={}&include_deleted=true", item_type);
            let expected = self.fixture.ids_where(|i| i.item_type == item_type);
            violations.extend(
                self.combined(call, &context, &expected, |item| item.item_type == item_type)
                    .await,
            );
        }

        let parents: Vec<(&str, Uuid)> = self
            .fixture
            .items()
            .iter()
            .filter(|item| !self.fixture.live_children_of(&item.key).is_empty())
            .filter_map(|item| self.fixture.id(&item.key).map(|id| (item.key.as_str(), id)))
            .collect();
        if parents.is_empty() {
            violations.push("fixture has no parent with live children".to_string());
        }

        for (parent_key, parent_id) in parents {
            for item_type in WorkItemType::ALL {
                let call = ListWorkItemsCall::new()
                    .parent_id(parent_id)
                    .item_type(item_type.as_str());
                let context = format!("parent_id={}&item_type={}", parent_key, item_type);
                let expected = self.fixture.live_ids_where(|i| {
                    i.parent.as_deref() == Some(parent_key) && i.item_type == item_type
                });
                violations.extend(
                    self.combined(call, &context, &expected, |item| {
                        item.parent_id == Some(parent_id)
                            && item.item_type == item_type
                            && !item.deleted
                    })
                    .await,
                );
            }

            for status in WorkItemStatus::ALL {
                let call = ListWorkItemsCall::new()
                    .parent_id(parent_id)
                    .status(status.as_str());
                let context = format!("parent_id={}&status={}", parent_key, status);
                let expected = self.fixture.live_ids_where(|i| {
                    i.parent.as_deref() == Some(parent_key) && i.status == status
                });
                violations.extend(
                    self.combined(call, &context, &expected, |item| {
                        item.parent_id == Some(parent_id) && item.status == status && !item.deleted
                    })
                    .await,
                );
            }
        }

        violations
    }

    async fn check_soft_delete_default_exclusion(&self) -> Vec<String> {
        let walk = self.walk(ListWorkItemsCall::new(), MAX_LIMIT).await;
        let mut violations = walk.violations.clone();

        violations.extend(deleted_leaks(&walk, "default listing"));

        let returned = walk.ids();
        for id in self.fixture.deleted_ids().intersection(&returned) {
            violations.push(format!("deleted item {} listed without include_deleted", id));
        }

        let expected = self.fixture.live_ids_where(|_| true);
        violations.extend(missing(&expected, &returned, "default listing"));

        violations
    }

    async fn check_soft_delete_include_flag(&self) -> Vec<String> {
        let live = self.walk(ListWorkItemsCall::new(), MAX_LIMIT).await;
        let all = self
            .walk(ListWorkItemsCall::new().include_deleted(true), MAX_LIMIT)
            .await;

        let mut violations = all.violations.clone();
        let deleted = self.fixture.deleted_ids();
        violations.extend(missing(&deleted, &all.ids(), "include_deleted=true"));

        let hidden = all.total_count - live.total_count;
        if hidden < deleted.len() as i64 {
            violations.push(format!(
                "include_deleted=true counts {} more items than the default, expected at least {}",
                hidden,
                deleted.len()
            ));
        }

        violations
    }

    async fn check_pagination_bounds(&self) -> Vec<String> {
        let mut violations = Vec::new();

        let rejected = [
            (ListWorkItemsCall::new().limit(MIN_LIMIT - 1), "limit", "limit=0"),
            (ListWorkItemsCall::new().limit(MAX_LIMIT + 1), "limit", "limit=101"),
            (ListWorkItemsCall::new().limit(-1), "limit", "limit=-1"),
            (ListWorkItemsCall::new().offset(-1), "offset", "offset=-1"),
        ];
        for (call, field, label) in rejected {
            match self.lister.list_work_items(&call).await {
                Ok(value) => {
                    let echoed = value.get("limit").cloned().unwrap_or_default();
                    violations.push(format!(
                        "{} was accepted instead of rejected (response limit {})",
                        label, echoed
                    ));
                }
                Err(rejection) => {
                    debug!("{} rejected: {}", label, rejection);
                    if let Some(actual) = rejection.field.as_deref()
                        && actual != field
                    {
                        violations.push(format!(
                            "{} rejected on field {}, expected {}",
                            label, actual, field
                        ));
                    }
                }
            }
        }

        for limit in [MIN_LIMIT, MAX_LIMIT] {
            let call = ListWorkItemsCall::new().limit(limit);
            match self.fetch(&call).await {
                Ok(page) if page.items.len() as i64 > limit => violations.push(format!(
                    "limit={} returned {} items",
                    limit,
                    page.items.len()
                )),
                Ok(_) => {}
                Err(problems) => violations.extend(problems),
            }
        }

        violations
    }

    async fn check_pagination_consistency(&self) -> Vec<String> {
        let small = self.walk(ListWorkItemsCall::new(), SMALL_PAGE).await;
        let large = self.walk(ListWorkItemsCall::new(), MAX_LIMIT).await;

        let mut violations = small.violations.clone();
        violations.extend(large.violations.iter().cloned());

        if small.total_count != large.total_count {
            violations.push(format!(
                "total_count depends on page size: {} with limit {}, {} with limit {}",
                small.total_count, SMALL_PAGE, large.total_count, MAX_LIMIT
            ));
        }
        if small.ids() != large.ids() {
            violations.push(format!(
                "paging with limit {} and limit {} returned different item sets",
                SMALL_PAGE, MAX_LIMIT
            ));
        }

        violations
    }

    async fn check_empty_result(&self) -> Vec<String> {
        let mut violations = Vec::new();

        let unknown_parent = ListWorkItemsCall::new().parent_id(Uuid::new_v4());
        match self.fetch(&unknown_parent).await {
            Ok(page) => {
                if !page.items.is_empty() || page.total_count != 0 || page.has_more {
                    violations.push(format!(
                        "unmatched filter returned {} items, total_count {}, has_more {}",
                        page.items.len(),
                        page.total_count,
                        page.has_more
                    ));
                }
            }
            Err(problems) => violations.extend(problems),
        }

        // Past the last page: empty, but total_count still reflects the filter
        let total = match self.fetch(&ListWorkItemsCall::new().limit(MIN_LIMIT)).await {
            Ok(page) => page.total_count,
            Err(problems) => {
                violations.extend(problems);
                return violations;
            }
        };
        match self.fetch(&ListWorkItemsCall::new().offset(total + 10)).await {
            Ok(page) => {
                if !page.items.is_empty() || page.has_more {
                    violations.push(format!(
                        "offset past the end returned {} items, has_more {}",
                        page.items.len(),
                        page.has_more
                    ));
                }
                if page.total_count != total {
                    violations.push(format!(
                        "offset past the end reported total_count {}, expected {}",
                        page.total_count, total
                    ));
                }
            }
            Err(problems) => violations.extend(problems),
        }

        violations
    }

    async fn check_latency_budget(&self) -> (Vec<String>, Option<LatencySummary>) {
        let mut violations = Vec::new();
        let mut sample = LatencySample::with_capacity(self.budget.samples);

        let mut mix = vec![
            ListWorkItemsCall::new(),
            ListWorkItemsCall::new().item_type(WorkItemType::Task.as_str()),
            ListWorkItemsCall::new().status(WorkItemStatus::Active.as_str()),
            ListWorkItemsCall::new().include_deleted(true).limit(MAX_LIMIT),
            ListWorkItemsCall::new().limit(10).offset(20),
        ];
        if let Some(parent_id) = self
            .fixture
            .parent_with_children()
            .and_then(|key| self.fixture.id(key))
        {
            mix.push(ListWorkItemsCall::new().parent_id(parent_id));
        }

        for call in mix.iter().cycle().take(self.budget.samples) {
            let start = Instant::now();
            let result = self.lister.list_work_items(call).await;
            sample.record(start.elapsed());

            if let Err(rejection) = result {
                violations.push(format!("sampled call {:?} rejected: {}", call.request(), rejection));
                break;
            }
        }

        violations.extend(self.budget.violation(&sample));

        let summary = sample.p95().zip(sample.max()).map(|(p95, max)| LatencySummary {
            p95,
            max,
            samples: sample.len(),
            budget: self.budget.p95,
        });

        (violations, summary)
    }

    /// One call, decoded. Rejections and schema problems become messages.
    async fn fetch(&self, call: &ListWorkItemsCall) -> Result<ListedPage, Vec<String>> {
        let value = self
            .lister
            .list_work_items(call)
            .await
            .map_err(|rejection| vec![format!("{:?} rejected: {}", call.request(), rejection)])?;

        ListedPage::parse(&value)
    }

    /// Walk one combined query, flag items failing `matches` and seeded
    /// matches that never showed up
    async fn combined(
        &self,
        call: ListWorkItemsCall,
        context: &str,
        expected: &HashSet<Uuid>,
        matches: impl Fn(&ListedItem) -> bool,
    ) -> Vec<String> {
        let walk = self.walk(call, MAX_LIMIT).await;
        let mut violations = walk.violations.clone();

        let mismatched = walk.items.iter().filter(|item| !matches(item)).count();
        if mismatched > 0 {
            violations.push(format!(
                "{} returned {} items not matching every filter",
                context, mismatched
            ));
        }
        violations.extend(missing(expected, &walk.ids(), context));

        violations
    }

    /// Page through `call` with `page_size`, checking every page on the way
    async fn walk(&self, call: ListWorkItemsCall, page_size: i64) -> Walk {
        let mut walk = Walk::default();
        let mut seen = HashSet::new();
        let mut offset = 0;

        for page_number in 0..MAX_WALK_PAGES {
            let page = match self.fetch(&call.clone().limit(page_size).offset(offset)).await {
                Ok(page) => page,
                Err(problems) => {
                    walk.violations.extend(problems);
                    return walk;
                }
            };

            if page_number == 0 {
                walk.total_count = page.total_count;
            } else if page.total_count != walk.total_count {
                walk.violations.push(format!(
                    "total_count changed from {} to {} at offset {}",
                    walk.total_count, page.total_count, offset
                ));
            }
            if page.items.len() as i64 > page_size {
                walk.violations.push(format!(
                    "page at offset {} has {} items, limit {}",
                    offset,
                    page.items.len(),
                    page_size
                ));
            }
            if page.offset != offset {
                walk.violations.push(format!(
                    "page requested at offset {} echoed offset {}",
                    offset, page.offset
                ));
            }
            if page.has_more != page.expected_has_more(offset) {
                walk.violations.push(has_more_message(&page, offset));
            }

            for item in &page.items {
                if !seen.insert(item.id) {
                    walk.violations
                        .push(format!("item {} appeared on more than one page", item.id));
                }
            }

            let done = !page.has_more || page.items.is_empty();
            walk.items.extend(page.items);
            if done {
                if walk.items.len() as i64 != walk.total_count {
                    walk.violations.push(format!(
                        "paging returned {} items in total, total_count is {}",
                        walk.items.len(),
                        walk.total_count
                    ));
                }
                return walk;
            }
            offset += page_size;
        }

        walk.violations
            .push(format!("paging did not finish within {} pages", MAX_WALK_PAGES));
        walk
    }
}

async fn timed<F>(name: &'static str, check: F) -> CheckOutcome
where
    F: Future<Output = Vec<String>>,
{
    let start = Instant::now();
    let violations = check.await;
    finish(name, violations, start.elapsed())
}

fn finish(name: &'static str, violations: Vec<String>, elapsed: Duration) -> CheckOutcome {
    if violations.is_empty() {
        info!("[PASS] {} in {}ms", name, elapsed.as_millis());
    } else {
        warn!(
            "[FAIL] {} in {}ms: {} violation(s)",
            name,
            elapsed.as_millis(),
            violations.len()
        );
    }

    CheckOutcome {
        name,
        violations,
        elapsed,
    }
}

fn has_more_message(page: &ListedPage, requested_offset: i64) -> String {
    format!(
        "has_more={} but offset {} + {} items vs total_count {}",
        page.has_more,
        requested_offset,
        page.items.len(),
        page.total_count
    )
}

fn deleted_leaks(walk: &Walk, context: &str) -> Vec<String> {
    walk.items
        .iter()
        .filter(|item| item.deleted)
        .map(|item| format!("{} returned deleted item {}", context, item.id))
        .collect()
}

fn missing(expected: &HashSet<Uuid>, returned: &HashSet<Uuid>, context: &str) -> Vec<String> {
    let absent = expected.difference(returned).count();
    if absent == 0 {
        return Vec::new();
    }
    vec![format!(
        "{} is missing {} of {} seeded matching items",
        context,
        absent,
        expected.len()
    )]
}
