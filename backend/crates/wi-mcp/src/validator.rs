use crate::{Result as ToolErrorResult, ToolError};

use wi_core::{MAX_BRANCH_NAME_LENGTH, MAX_CREATED_BY_LENGTH};

use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

const COMMIT_HASH_LENGTH: usize = 40;
const NOW_KEYWORD: &str = "NOW()";

/// Validates tool arguments that the domain types do not cover
pub struct InputValidator;

impl InputValidator {
    /// Title must be non-blank and at most `max_length` characters
    #[track_caller]
    pub fn validate_title(title: &str, max_length: usize) -> ToolErrorResult<()> {
        if title.trim().is_empty() {
            return Err(ToolError::validation("title", "Work item title cannot be empty"));
        }

        let length = title.chars().count();
        if length > max_length {
            return Err(ToolError::validation(
                "title",
                format!(
                    "Work item title too long (max {} characters): {}",
                    max_length, length
                ),
            ));
        }

        Ok(())
    }

    #[track_caller]
    pub fn validate_uuid(value: &str, field: &'static str) -> ToolErrorResult<Uuid> {
        Uuid::from_str(value)
            .map_err(|_| ToolError::validation(field, format!("Invalid {} format: {}", field, value)))
    }

    /// Client identifier such as `created_by` or `updated_by`
    #[track_caller]
    pub fn validate_client_id(value: &str, field: &'static str) -> ToolErrorResult<()> {
        if value.trim().is_empty() {
            return Err(ToolError::validation(field, format!("{} cannot be empty", field)));
        }

        if value.chars().count() > MAX_CREATED_BY_LENGTH {
            return Err(ToolError::validation(
                field,
                format!("{} exceeds {} characters", field, MAX_CREATED_BY_LENGTH),
            ));
        }

        Ok(())
    }

    #[track_caller]
    pub fn validate_branch_name(branch_name: &str) -> ToolErrorResult<()> {
        if branch_name.trim().is_empty() || branch_name.chars().count() > MAX_BRANCH_NAME_LENGTH {
            return Err(ToolError::validation(
                "branch_name",
                format!("branch_name must be 1-{} characters", MAX_BRANCH_NAME_LENGTH),
            ));
        }

        Ok(())
    }

    /// Full 40-character lowercase hex SHA-1
    #[track_caller]
    pub fn validate_commit_hash(commit_hash: &str) -> ToolErrorResult<()> {
        let valid = commit_hash.len() == COMMIT_HASH_LENGTH
            && commit_hash
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

        if !valid {
            return Err(ToolError::validation(
                "commit_hash",
                format!(
                    "commit_hash must be {} lowercase hex characters",
                    COMMIT_HASH_LENGTH
                ),
            ));
        }

        Ok(())
    }

    #[track_caller]
    pub fn validate_pr_number(pr_number: i64) -> ToolErrorResult<i32> {
        i32::try_from(pr_number)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| {
                ToolError::validation("pr_number", format!("pr_number must be >= 1, got {}", pr_number))
            })
    }

    /// Expected version for optimistic locking, at least 1
    #[track_caller]
    pub fn validate_version(version: i64) -> ToolErrorResult<i32> {
        i32::try_from(version)
            .ok()
            .filter(|v| *v >= 1)
            .ok_or_else(|| {
                ToolError::validation("version", format!("Invalid version: {}. Must be >= 1", version))
            })
    }

    /// RFC 3339 timestamp, or `NOW()` (any case) for the current time
    #[track_caller]
    pub fn parse_deleted_at(value: &str, now: DateTime<Utc>) -> ToolErrorResult<DateTime<Utc>> {
        if value.eq_ignore_ascii_case(NOW_KEYWORD) {
            return Ok(now.trunc_subsecs(3));
        }

        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(3))
            .map_err(|_| {
                ToolError::validation(
                    "deleted_at",
                    format!(
                        "Invalid deleted_at format: {}. Use RFC 3339 or '{}'",
                        value, NOW_KEYWORD
                    ),
                )
            })
    }
}
