//! # Cycle Checker
//!
//! Decides whether a department may move under a proposed parent without
//! breaking the tree.

use std::collections::HashSet;

use error::{AppError, Result};
use sea_orm::ConnectionTrait;

use super::store;

/// Fail with a conflict when moving `department_id` under `new_parent` would
/// create a cycle. Moving to the root scope is always safe.
pub async fn check_reparent<C>(db: &C, department_id: i32, new_parent: Option<i32>) -> Result<()>
where
    C: ConnectionTrait,
{
    let Some(new_parent) = new_parent else {
        return Ok(());
    };

    if new_parent == department_id {
        return Err(AppError::conflict("cannot be parent of itself"));
    }
    if subtree_contains(db, department_id, new_parent).await? {
        return Err(AppError::conflict(
            "cannot move department inside its own subtree",
        ));
    }
    Ok(())
}

/// Whether `needle` is a strict descendant of `root`.
///
/// Walks the tree breadth-first, one query per level, starting from the
/// direct children of `root`.
pub async fn subtree_contains<C>(db: &C, root: i32, needle: i32) -> Result<bool>
where
    C: ConnectionTrait,
{
    let mut visited = HashSet::from([root]);
    let mut frontier = vec![root];

    while !frontier.is_empty() {
        let children = store::child_departments(db, &frontier).await?;
        frontier = Vec::with_capacity(children.len());
        for child in children {
            if child.id == needle {
                return Ok(true);
            }
            if visited.insert(child.id) {
                frontier.push(child.id);
            }
        }
    }
    Ok(false)
}
