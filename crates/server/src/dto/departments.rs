//! # Department Data Transfer Objects
//!
//! Request, query and response types for department endpoints.

use chrono::{DateTime, Utc};
use error::{AppError, Result};
use serde::{Deserialize, Deserializer, Serialize};

use super::employees::EmployeeResponse;
use crate::org::{DeleteMode, EmployeeSort, TreeQuery};

/// Request to create a department
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateDepartmentRequest {
    /// Department name, unique among its siblings
    pub name:      String,
    /// Parent department; absent or null creates a root department
    #[serde(default)]
    pub parent_id: Option<i32>,
}

/// Request to rename and/or move a department
///
/// `parent_id` distinguishes an absent key (keep the current parent) from an
/// explicit `null` (move to the root scope).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateDepartmentRequest {
    #[serde(default)]
    pub name:      Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub parent_id: Option<Option<i32>>,
}

/// Wraps any present value, including `null`, in `Some`.
fn deserialize_some<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Flat department record returned by create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentResponse {
    pub id:         i32,
    pub name:       String,
    pub parent_id:  Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<entity::departments::Model> for DepartmentResponse {
    fn from(model: entity::departments::Model) -> Self {
        Self {
            id:         model.id,
            name:       model.name,
            parent_id:  model.parent_id,
            created_at: model.created_at,
        }
    }
}

/// One node of a department subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentTreeResponse {
    pub id:         i32,
    pub name:       String,
    pub parent_id:  Option<i32>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub employees:  Vec<EmployeeResponse>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children:   Vec<DepartmentTreeResponse>,
}

/// Query string of `GET /departments/{id}`
///
/// Values are kept as raw strings so each one can be reported with its own message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DepartmentTreeParams {
    pub depth:             Option<String>,
    pub include_employees: Option<String>,
    pub sort_employees:    Option<String>,
}

impl DepartmentTreeParams {
    /// Resolve defaults and bounds into a [`TreeQuery`].
    ///
    /// # Errors
    ///
    /// Returns a bad request error naming the first parameter that does not parse.
    pub fn into_tree_query(self, max_depth: u32) -> Result<TreeQuery> {
        let depth = match non_empty(self.depth.as_deref()) {
            None => 1,
            Some(raw) => {
                raw.parse::<u32>()
                    .ok()
                    .filter(|depth| (1 ..= max_depth).contains(depth))
                    .ok_or_else(|| {
                        AppError::bad_request(format!(
                            "depth must be integer between 1 and {}",
                            max_depth
                        ))
                    })?
            },
        };

        let include_employees = match non_empty(self.include_employees.as_deref()) {
            None => true,
            Some(raw) => parse_bool(raw).ok_or_else(|| AppError::bad_request("include_employees must be boolean"))?,
        };

        let sort = match non_empty(self.sort_employees.as_deref()) {
            None => EmployeeSort::default(),
            Some(raw) => raw.parse()?,
        };

        Ok(TreeQuery {
            depth,
            include_employees,
            sort,
        })
    }
}

/// Query string of `DELETE /departments/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteDepartmentParams {
    pub mode:                      Option<String>,
    pub reassign_to_department_id: Option<String>,
}

impl DeleteDepartmentParams {
    /// Resolve the deletion mode, defaulting to cascade.
    pub fn into_delete_mode(self) -> Result<DeleteMode> {
        let target = non_empty(self.reassign_to_department_id.as_deref())
            .map(|raw| {
                raw.parse::<i32>()
                    .map_err(|_| AppError::bad_request("invalid reassign_to_department_id"))
            })
            .transpose()?;
        DeleteMode::parse(non_empty(self.mode.as_deref()), target)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> { value.filter(|v| !v.is_empty()) }

/// Accepts `1`/`0`, `t`/`f` and `true`/`false` in lower, upper and title case.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
