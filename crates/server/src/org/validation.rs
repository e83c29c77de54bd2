//! # Validation Layer
//!
//! Candidate records are trimmed, checked with `validator`, and (for
//! departments) checked for a sibling with the same name before they reach
//! the store.

use chrono::{DateTime, Utc};
use error::{AppError, Result};
use sea_orm::ConnectionTrait;
use validator::{Validate, ValidationError};

use super::store;

/// Longest accepted name, counted in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// A department about to be inserted or updated.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct DepartmentDraft {
    #[validate(
        length(min = 1, message = "name cannot be empty"),
        custom(function = "name_within_limit")
    )]
    pub name:      String,
    pub parent_id: Option<i32>,
}

/// An employee about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct EmployeeDraft {
    #[validate(
        length(min = 1, message = "full_name cannot be empty"),
        custom(function = "full_name_within_limit")
    )]
    pub full_name: String,
    #[validate(
        length(min = 1, message = "position cannot be empty"),
        custom(function = "position_within_limit")
    )]
    pub position:  String,
    pub hired_at:  Option<DateTime<Utc>>,
}

fn within_limit(value: &str, message: &'static str) -> std::result::Result<(), ValidationError> {
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::new("length").with_message(message.into()));
    }
    Ok(())
}

fn name_within_limit(value: &str) -> std::result::Result<(), ValidationError> {
    within_limit(value, "name too long (max 200)")
}

fn full_name_within_limit(value: &str) -> std::result::Result<(), ValidationError> {
    within_limit(value, "full_name too long (max 200)")
}

fn position_within_limit(value: &str) -> std::result::Result<(), ValidationError> {
    within_limit(value, "position too long (max 200)")
}

/// Trim and validate a department, then reject a duplicate sibling name.
///
/// `own_id` is the department being updated, if any, so it does not collide
/// with itself. The draft keeps its trimmed name on success and on failure.
pub async fn normalize_department<C>(db: &C, draft: &mut DepartmentDraft, own_id: Option<i32>) -> Result<()>
where
    C: ConnectionTrait,
{
    draft.name = draft.name.trim().to_string();
    draft.validate()?;

    if store::sibling_name_taken(db, draft.parent_id, &draft.name, own_id).await? {
        return Err(AppError::validation(
            "department name must be unique within the same parent",
        ));
    }
    Ok(())
}

/// Trim and validate an employee.
pub fn normalize_employee(draft: &mut EmployeeDraft) -> Result<()> {
    draft.full_name = draft.full_name.trim().to_string();
    draft.position = draft.position.trim().to_string();
    draft.validate()?;
    Ok(())
}
