//! # Employee Data Transfer Objects
//!
//! Request and response types for employee endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::org::EmployeeDraft;

/// Request to create an employee under a department
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Employee's full name
    pub full_name: String,
    /// Job title
    pub position:  String,
    /// Hire date as an RFC 3339 timestamp
    #[serde(default)]
    pub hired_at:  Option<DateTime<Utc>>,
}

impl From<CreateEmployeeRequest> for EmployeeDraft {
    fn from(req: CreateEmployeeRequest) -> Self {
        Self {
            full_name: req.full_name,
            position:  req.position,
            hired_at:  req.hired_at,
        }
    }
}

/// Response for a single employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id:            i32,
    pub department_id: i32,
    pub full_name:     String,
    pub position:      String,
    pub hired_at:      Option<DateTime<Utc>>,
    pub created_at:    DateTime<Utc>,
}

impl From<entity::employees::Model> for EmployeeResponse {
    fn from(model: entity::employees::Model) -> Self {
        Self {
            id:            model.id,
            department_id: model.department_id,
            full_name:     model.full_name,
            position:      model.position,
            hired_at:      model.hired_at,
            created_at:    model.created_at,
        }
    }
}
