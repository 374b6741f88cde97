use crate::{CoreError, WorkItemMetadata, WorkItemType};

use googletest::prelude::*;
use serde_json::json;

#[test]
fn given_valid_project_metadata_when_parsed_then_ok() {
    let value = json!({
        "description": "Semantic code search",
        "target_quarter": "2025-Q1",
        "constitutional_principles": ["Simplicity Over Features"]
    });

    let metadata = WorkItemMetadata::parse(WorkItemType::Project, &value).unwrap();

    assert!(matches!(metadata, WorkItemMetadata::Project(_)));
    assert_that!(metadata.to_value()["target_quarter"], eq(&json!("2025-Q1")));
}

#[test]
fn given_malformed_quarter_when_parsed_then_invalid_metadata() {
    for quarter in ["2025-Q5", "25-Q1", "2025Q1", "2025-q1"] {
        let value = json!({ "description": "x", "target_quarter": quarter });

        let result = WorkItemMetadata::parse(WorkItemType::Project, &value);

        assert!(
            matches!(result, Err(CoreError::InvalidMetadata { item_type: "project", .. })),
            "quarter {} should be rejected",
            quarter
        );
    }
}

#[test]
fn given_project_metadata_without_description_when_parsed_then_error() {
    let result = WorkItemMetadata::parse(WorkItemType::Project, &json!({}));
    assert_that!(result, err(anything()));
}

#[test]
fn given_session_token_budget_out_of_range_when_parsed_then_error() {
    for budget in [999, 1_000_001] {
        let value = json!({
            "token_budget": budget,
            "prompts_count": 0,
            "yaml_frontmatter": {}
        });

        let result = WorkItemMetadata::parse(WorkItemType::Session, &value);

        assert_that!(result, err(anything()));
    }
}

#[test]
fn given_session_at_budget_bounds_when_parsed_then_ok() {
    for budget in [1_000, 1_000_000] {
        let value = json!({
            "token_budget": budget,
            "prompts_count": 3,
            "yaml_frontmatter": { "model": "x" }
        });

        assert_that!(
            WorkItemMetadata::parse(WorkItemType::Session, &value),
            ok(anything())
        );
    }
}

#[test]
fn given_empty_task_metadata_when_parsed_then_ok() {
    assert_that!(
        WorkItemMetadata::parse(WorkItemType::Task, &json!({})),
        ok(anything())
    );
}

#[test]
fn given_negative_hours_when_parsed_then_error() {
    let result = WorkItemMetadata::parse(WorkItemType::Task, &json!({ "actual_hours": -1.0 }));
    assert_that!(result, err(anything()));
}

#[test]
fn given_overlong_findings_summary_when_parsed_then_error() {
    let value = json!({ "findings_summary": "x".repeat(2001) });

    let result = WorkItemMetadata::parse(WorkItemType::Research, &value);

    assert_that!(result, err(anything()));
}

#[test]
fn given_invalid_metadata_error_then_field_is_metadata() {
    let err = WorkItemMetadata::parse(WorkItemType::Project, &json!({})).unwrap_err();
    assert_that!(err.field(), some(eq("metadata")));
}
