#![allow(dead_code)]

use wi_config::Config;
use wi_contract::{ContractFixture, FixtureSeeder, SeededFixture};
use wi_mcp::ToolRouter;

use std::sync::Arc;

/// Router over an in-memory database seeded with the standard fixture
pub async fn seeded_router() -> (ToolRouter, SeededFixture) {
    let pool = wi_db::open_in_memory()
        .await
        .expect("Failed to create test pool");
    let seeded = pool
        .seed(&ContractFixture::standard())
        .await
        .expect("Failed to seed fixture");

    (ToolRouter::new(pool, Arc::new(Config::default())), seeded)
}
