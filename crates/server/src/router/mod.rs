//! # API Router Configuration
//!
//! Configures API routes and the middleware stack for orgtree.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path,
        Query,
        Request,
        State as AxumState,
    },
    http::StatusCode,
    middleware::{self, Next},
    routing::{get, post},
    Json,
    Router,
};
use error::{AppError, Result};

use crate::{
    dto::{
        departments::{
            CreateDepartmentRequest,
            DeleteDepartmentParams,
            DepartmentResponse,
            DepartmentTreeParams,
            DepartmentTreeResponse,
            UpdateDepartmentRequest,
        },
        employees::{CreateEmployeeRequest, EmployeeResponse},
    },
    handlers::{departments, employees},
    middleware::{
        request_log::request_log_middleware,
        security_headers::security_headers_middleware,
        timeout::timeout_middleware,
    },
    AppState,
};

type Extracted<T, R> = std::result::Result<T, R>;

/// Creates the API router with all department routes
///
/// # Arguments
///
/// * `state` - Application state containing DB pool and settings
///
/// # Returns
///
/// Configured Axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/departments", post(create_department))
        .route("/departments/", post(create_department))
        .route(
            "/departments/{id}",
            get(get_department)
                .patch(update_department)
                .delete(delete_department),
        )
        .route("/departments/{id}/employees", post(create_employee))
        .route("/departments/{id}/employees/", post(create_employee))
        .with_state(state)
}

/// Maps a non-integer `{id}` segment to the API's error message
fn department_id(path: Extracted<Path<i32>, PathRejection>) -> Result<i32> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::bad_request("invalid department id"))
}

/// Wrapper handler for department creation
async fn create_department(
    AxumState(state): AxumState<AppState>,
    body: Extracted<Json<CreateDepartmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DepartmentResponse>)> {
    let Json(req) = body?;
    let created = departments::create_department_handler(&state, req).await?;
    Ok((StatusCode::CREATED, created))
}

/// Wrapper handler for subtree reads
async fn get_department(
    AxumState(state): AxumState<AppState>,
    path: Extracted<Path<i32>, PathRejection>,
    query: Extracted<Query<DepartmentTreeParams>, QueryRejection>,
) -> Result<Json<DepartmentTreeResponse>> {
    let id = department_id(path)?;
    let Query(params) = query?;
    departments::get_department_handler(&state, id, params).await
}

/// Wrapper handler for department updates
async fn update_department(
    AxumState(state): AxumState<AppState>,
    path: Extracted<Path<i32>, PathRejection>,
    body: Extracted<Json<UpdateDepartmentRequest>, JsonRejection>,
) -> Result<Json<DepartmentResponse>> {
    let id = department_id(path)?;
    let Json(req) = body?;
    departments::update_department_handler(&state, id, req).await
}

/// Wrapper handler for department deletion
async fn delete_department(
    AxumState(state): AxumState<AppState>,
    path: Extracted<Path<i32>, PathRejection>,
    query: Extracted<Query<DeleteDepartmentParams>, QueryRejection>,
) -> Result<StatusCode> {
    let id = department_id(path)?;
    let Query(params) = query?;
    departments::delete_department_handler(&state, id, params).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Wrapper handler for employee creation
async fn create_employee(
    AxumState(state): AxumState<AppState>,
    path: Extracted<Path<i32>, PathRejection>,
    body: Extracted<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EmployeeResponse>)> {
    let id = department_id(path)?;
    let Json(req) = body?;
    let created = employees::create_employee_handler(&state, id, req).await?;
    Ok((StatusCode::CREATED, created))
}

/// Unknown routes answer with the regular error body
async fn route_not_found() -> AppError { AppError::not_found("route not found") }

/// Known routes answer an unsupported method with the regular error body
async fn method_not_allowed() -> AppError { AppError::method_not_allowed("method not allowed") }

/// Creates the health check router
pub fn create_health_router() -> Router { Router::new().route("/health", get(|| async { "OK" })) }

/// Creates the main application router
///
/// # Arguments
///
/// * `state` - Application state containing DB pool and settings
///
/// # Returns
///
/// Main router with health checks, API routes and the middleware stack
pub fn create_app_router(state: AppState) -> Router {
    let timeout = state.settings.request_timeout;

    Router::new()
        .merge(create_health_router())
        .merge(create_router(state))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(middleware::from_fn(move |req: Request, next: Next| {
            timeout_middleware(req, next, timeout)
        }))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_log_middleware))
}
