//! # Employee Handlers

use axum::Json;
use error::{AppError, Result};
use tracing::info;

use crate::{
    dto::employees::{CreateEmployeeRequest, EmployeeResponse},
    org::{self, store, EmployeeDraft},
    AppState,
};

/// Create an employee inside an existing department
///
/// The created employee response
pub async fn create_employee_handler(
    state: &AppState,
    department_id: i32,
    req: CreateEmployeeRequest,
) -> Result<Json<EmployeeResponse>> {
    if store::find_department(&state.db, department_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("department not found"));
    }

    let mut draft = EmployeeDraft::from(req);
    org::normalize_employee(&mut draft)?;

    let created = store::insert_employee(&state.db, department_id, &draft).await?;

    info!(employee_id = created.id, department_id, "Employee created");

    Ok(Json(created.into()))
}
