//! # Entity Store
//!
//! Thin query helpers over the `departments` and `employees` tables.

use chrono::Utc;
use entity::{departments, employees};
use error::Result;
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    EntityTrait,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    Set,
};

use super::{
    tree::EmployeeSort,
    validation::{DepartmentDraft, EmployeeDraft},
};

/// Find a department by id.
pub async fn find_department<C>(db: &C, id: i32) -> Result<Option<departments::Model>>
where
    C: ConnectionTrait,
{
    Ok(departments::Entity::find_by_id(id).one(db).await?)
}

/// Insert a validated department.
pub async fn insert_department<C>(db: &C, draft: &DepartmentDraft) -> Result<departments::Model>
where
    C: ConnectionTrait,
{
    let department = departments::ActiveModel {
        name: Set(draft.name.clone()),
        parent_id: Set(draft.parent_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(department.insert(db).await?)
}

/// Write a validated name and parent onto an existing department.
pub async fn update_department<C>(
    db: &C,
    existing: departments::Model,
    draft: &DepartmentDraft,
) -> Result<departments::Model>
where
    C: ConnectionTrait,
{
    let mut department: departments::ActiveModel = existing.into();
    department.name = Set(draft.name.clone());
    department.parent_id = Set(draft.parent_id);
    Ok(department.update(db).await?)
}

/// Insert a validated employee under `department_id`.
pub async fn insert_employee<C>(db: &C, department_id: i32, draft: &EmployeeDraft) -> Result<employees::Model>
where
    C: ConnectionTrait,
{
    let employee = employees::ActiveModel {
        department_id: Set(department_id),
        full_name: Set(draft.full_name.clone()),
        position: Set(draft.position.clone()),
        hired_at: Set(draft.hired_at),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(employee.insert(db).await?)
}

/// Whether another department under `parent_id` already uses `name`.
///
/// `None` scopes the lookup to root departments. `exclude` skips the
/// department being updated.
pub async fn sibling_name_taken<C>(db: &C, parent_id: Option<i32>, name: &str, exclude: Option<i32>) -> Result<bool>
where
    C: ConnectionTrait,
{
    let mut query = departments::Entity::find().filter(departments::Column::Name.eq(name));
    query = match parent_id {
        Some(parent_id) => query.filter(departments::Column::ParentId.eq(parent_id)),
        None => query.filter(departments::Column::ParentId.is_null()),
    };
    if let Some(id) = exclude {
        query = query.filter(departments::Column::Id.ne(id));
    }
    Ok(query.count(db).await? > 0)
}

/// Direct children of every department in `parent_ids`, ordered by id.
pub async fn child_departments<C>(db: &C, parent_ids: &[i32]) -> Result<Vec<departments::Model>>
where
    C: ConnectionTrait,
{
    if parent_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(departments::Entity::find()
        .filter(departments::Column::ParentId.is_in(parent_ids.iter().copied()))
        .order_by_asc(departments::Column::Id)
        .all(db)
        .await?)
}

/// Employees of every department in `department_ids`, ordered by `sort` then id.
pub async fn employees_in<C>(db: &C, department_ids: &[i32], sort: EmployeeSort) -> Result<Vec<employees::Model>>
where
    C: ConnectionTrait,
{
    if department_ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = employees::Entity::find().filter(employees::Column::DepartmentId.is_in(department_ids.iter().copied()));
    let query = match sort {
        EmployeeSort::FullName => query.order_by_asc(employees::Column::FullName),
        EmployeeSort::CreatedAt => query.order_by_asc(employees::Column::CreatedAt),
    };
    Ok(query.order_by_asc(employees::Column::Id).all(db).await?)
}

/// Point every employee of `from` at `to`. Returns the number of rows moved.
pub async fn move_employees<C>(db: &C, from: i32, to: i32) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = employees::Entity::update_many()
        .col_expr(employees::Column::DepartmentId, Expr::value(to))
        .filter(employees::Column::DepartmentId.eq(from))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Re-parent every direct child of `from` under `to`. Returns the number of rows moved.
pub async fn move_children<C>(db: &C, from: i32, to: i32) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = departments::Entity::update_many()
        .col_expr(departments::Column::ParentId, Expr::value(to))
        .filter(departments::Column::ParentId.eq(from))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Delete one department row. Descendants and employees follow through the
/// foreign keys.
pub async fn remove_department<C>(db: &C, id: i32) -> Result<u64>
where
    C: ConnectionTrait,
{
    Ok(departments::Entity::delete_by_id(id).exec(db).await?.rows_affected)
}

/// Number of employees attached to `department_id`.
pub async fn count_employees<C>(db: &C, department_id: i32) -> Result<u64>
where
    C: ConnectionTrait,
{
    Ok(employees::Entity::find()
        .filter(employees::Column::DepartmentId.eq(department_id))
        .count(db)
        .await?)
}
