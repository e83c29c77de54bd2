//! # Deletion Orchestrator
//!
//! Deletes a department either with its whole subtree or after handing its
//! direct children and employees to another department. Both paths run in
//! one transaction; a transaction dropped before commit rolls back.

use std::collections::HashSet;

use error::{AppError, Result};
use sea_orm::TransactionTrait;
use tracing::info;

use super::{cycle, store};

/// How a department is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Remove the department, every descendant and their employees
    Cascade,
    /// Move direct children and employees to `target`, then remove the department
    Reassign { target: i32 },
}

impl DeleteMode {
    /// Build a mode from the `mode` and `reassign_to_department_id` query values.
    ///
    /// A missing mode means cascade; a target given with cascade is ignored.
    pub fn parse(mode: Option<&str>, target: Option<i32>) -> Result<Self> {
        match (mode.unwrap_or("cascade"), target) {
            ("cascade", _) => Ok(Self::Cascade),
            ("reassign", Some(target)) => {
                Ok(Self::Reassign {
                    target,
                })
            },
            ("reassign", None) => {
                Err(AppError::bad_request(
                    "reassign_to_department_id is required for reassign mode",
                ))
            },
            _ => Err(AppError::bad_request("mode must be 'cascade' or 'reassign'")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "cascade",
            Self::Reassign {
                ..
            } => "reassign",
        }
    }
}

/// Rows touched by a deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub moved_employees:   u64,
    pub moved_departments: u64,
}

/// Delete department `id` according to `mode`.
///
/// # Errors
///
/// - not found when the department or the reassign target is missing
/// - validation when the target is the department itself or already has a
///   child named like one of the moved children
/// - conflict when the target lies inside the deleted subtree
pub async fn delete_department<C>(db: &C, id: i32, mode: DeleteMode) -> Result<DeletionOutcome>
where
    C: TransactionTrait,
{
    let txn = db.begin().await?;

    if store::find_department(&txn, id).await?.is_none() {
        return Err(AppError::not_found("department not found"));
    }

    let outcome = match mode {
        DeleteMode::Cascade => DeletionOutcome::default(),
        DeleteMode::Reassign {
            target,
        } => {
            if target == id {
                return Err(AppError::validation(
                    "cannot reassign to the department being deleted",
                ));
            }
            if store::find_department(&txn, target).await?.is_none() {
                return Err(AppError::not_found("reassign target department not found"));
            }
            if cycle::subtree_contains(&txn, id, target).await? {
                return Err(AppError::conflict(
                    "cannot reassign to a department inside the deleted subtree",
                ));
            }

            let existing: HashSet<String> = store::child_departments(&txn, &[target])
                .await?
                .into_iter()
                .filter(|d| d.id != id)
                .map(|d| d.name)
                .collect();
            let moving = store::child_departments(&txn, &[id]).await?;
            if let Some(clash) = moving.iter().find(|d| existing.contains(&d.name)) {
                return Err(AppError::validation(format!(
                    "department name must be unique within the same parent: '{}' already exists under the target",
                    clash.name
                )));
            }

            DeletionOutcome {
                moved_employees:   store::move_employees(&txn, id, target).await?,
                moved_departments: store::move_children(&txn, id, target).await?,
            }
        },
    };

    store::remove_department(&txn, id).await?;
    txn.commit().await?;

    info!(
        department_id = id,
        mode = mode.as_str(),
        moved_employees = outcome.moved_employees,
        moved_departments = outcome.moved_departments,
        "Department deleted"
    );
    Ok(outcome)
}
