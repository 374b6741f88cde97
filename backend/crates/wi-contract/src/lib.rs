//! Contract harness for the `list_work_items` tool.
//!
//! The suite seeds a known dataset, then drives any [`WorkItemLister`]
//! through filter, soft-delete, pagination and latency checks, collecting
//! every violation into a [`ContractReport`].

pub mod error;
pub mod fixture;
pub mod latency;
pub mod lister;
pub mod page;
pub mod report;
pub mod suite;

#[cfg(test)]
mod tests;

pub use error::{HarnessError, Result};
pub use fixture::{ContractFixture, FixtureItem, FixtureSeeder, SeededFixture};
pub use latency::{LatencyBudget, LatencySample};
pub use lister::{ListWorkItemsCall, ToolRejection, WorkItemLister};
pub use page::{ListedItem, ListedPage};
pub use report::{CheckOutcome, ContractFailure, ContractReport, LatencySummary};
pub use suite::{CHECK_NAMES, ContractSuite};
