use crate::runner::{list_page, run_contract, run_list};
use crate::{CliError, ContractArgs, ListArgs};

use wi_config::Config;
use wi_mcp::error_codes::INVALID_PARAMS;

use googletest::prelude::*;
use serde_json::json;

#[tokio::test]
async fn given_scratch_database_when_contract_runs_then_passes() {
    // Given
    let args = ContractArgs {
        samples: Some(20),
        ..Default::default()
    };

    // When
    let report = run_contract(&args, Config::default()).await.unwrap();

    // Then
    assert_that!(report.passed(), eq(true), "{}", report);
    assert_that!(report.latency.as_ref().map(|l| l.samples), some(eq(20)));
}

#[tokio::test]
async fn given_database_file_when_contract_runs_then_fixture_persisted() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("contract").join("wi.db");
    let args = ContractArgs {
        database: Some(path.clone()),
        samples: Some(20),
        budget_ms: Some(1_000),
    };

    let report = run_contract(&args, Config::default()).await.unwrap();

    assert_that!(report.passed(), eq(true), "{}", report);
    assert_that!(path.exists(), eq(true));
}

#[tokio::test]
async fn given_empty_database_when_listing_then_empty_page() {
    let pool = wi_db::open_in_memory().await.unwrap();

    let page = list_page(pool, &ListArgs::default(), Config::default())
        .await
        .unwrap();

    assert_that!(page["items"], eq(&json!([])));
    assert_that!(page["total_count"], eq(&json!(0)));
    assert_that!(page["has_more"], eq(&json!(false)));
}

#[tokio::test]
async fn given_limit_zero_when_listing_then_tool_error_with_invalid_params() {
    let temp = tempfile::TempDir::new().unwrap();
    let args = ListArgs {
        database: Some(temp.path().join("wi.db")),
        limit: Some(0),
        ..Default::default()
    };

    let err = run_list(&args, Config::default()).await.unwrap_err();

    assert_that!(err.exit_code(), eq(2));
    let CliError::Tool { code, .. } = err else {
        panic!("expected tool error, got {}", err);
    };
    assert_that!(code, eq(INVALID_PARAMS));
}
