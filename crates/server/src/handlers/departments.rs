//! # Department Handlers
//!
//! HTTP request handlers for department CRUD and subtree reads.

use axum::Json;
use error::{AppError, Result};
use logging::measure_duration;
use sea_orm::TransactionTrait;
use tracing::info;

use crate::{
    dto::departments::{
        CreateDepartmentRequest,
        DeleteDepartmentParams,
        DepartmentResponse,
        DepartmentTreeParams,
        DepartmentTreeResponse,
        UpdateDepartmentRequest,
    },
    org::{self, store, DepartmentDraft},
    AppState,
};

/// Create a department, optionally under a parent
///
/// The created department response
pub async fn create_department_handler(
    state: &AppState,
    req: CreateDepartmentRequest,
) -> Result<Json<DepartmentResponse>> {
    let txn = state.db.begin().await?;

    if let Some(parent_id) = req.parent_id &&
        store::find_department(&txn, parent_id).await?.is_none()
    {
        return Err(AppError::not_found("parent department not found"));
    }

    let mut draft = DepartmentDraft {
        name:      req.name,
        parent_id: req.parent_id,
    };
    org::normalize_department(&txn, &mut draft, None).await?;

    let created = store::insert_department(&txn, &draft).await?;
    txn.commit().await?;

    info!(department_id = created.id, parent_id = ?created.parent_id, "Department created");

    Ok(Json(created.into()))
}

/// Get a department with its subtree
///
/// The nested department response
pub async fn get_department_handler(
    state: &AppState,
    department_id: i32,
    params: DepartmentTreeParams,
) -> Result<Json<DepartmentTreeResponse>> {
    let query = params.into_tree_query(state.settings.max_tree_depth)?;

    let tree = measure_duration!("orgtree::tree", "assemble_tree", {
        org::assemble_tree(&state.db, department_id, &query).await?
    });

    Ok(Json(tree))
}

/// Rename and/or move a department
///
/// The updated department response
pub async fn update_department_handler(
    state: &AppState,
    department_id: i32,
    req: UpdateDepartmentRequest,
) -> Result<Json<DepartmentResponse>> {
    let txn = state.db.begin().await?;

    let existing = store::find_department(&txn, department_id)
        .await?
        .ok_or_else(|| AppError::not_found("department not found"))?;

    let parent_id = match req.parent_id {
        None => existing.parent_id,
        Some(None) => None,
        Some(Some(parent_id)) => {
            if store::find_department(&txn, parent_id).await?.is_none() {
                return Err(AppError::not_found("parent department not found"));
            }
            org::check_reparent(&txn, department_id, Some(parent_id)).await?;
            Some(parent_id)
        },
    };

    let mut draft = DepartmentDraft {
        name: req.name.unwrap_or_else(|| existing.name.clone()),
        parent_id,
    };
    org::normalize_department(&txn, &mut draft, Some(department_id)).await?;

    let updated = store::update_department(&txn, existing, &draft).await?;
    txn.commit().await?;

    info!(department_id = updated.id, parent_id = ?updated.parent_id, "Department updated");

    Ok(Json(updated.into()))
}

/// Delete a department in cascade or reassign mode
pub async fn delete_department_handler(
    state: &AppState,
    department_id: i32,
    params: DeleteDepartmentParams,
) -> Result<()> {
    let mode = params.into_delete_mode()?;
    org::delete_department(&state.db, department_id, mode).await?;
    Ok(())
}
