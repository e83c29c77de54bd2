//! # Department Tree Domain
//!
//! Persistence helpers, validation, cycle detection, subtree assembly and
//! deletion for the department tree. Every function takes the connection it
//! works on, so callers decide whether it runs inside a transaction.

pub mod cycle;
pub mod deletion;
pub mod store;
pub mod tree;
pub mod validation;

pub use cycle::{check_reparent, subtree_contains};
pub use deletion::{delete_department, DeleteMode, DeletionOutcome};
pub use tree::{assemble_tree, EmployeeSort, TreeQuery};
pub use validation::{normalize_department, normalize_employee, DepartmentDraft, EmployeeDraft};

#[cfg(test)]
pub(crate) mod testing {
    use chrono::Utc;
    use entity::{departments, employees};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

    pub async fn database() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    pub async fn department(db: &DatabaseConnection, name: &str, parent_id: Option<i32>) -> departments::Model {
        departments::ActiveModel {
            name: Set(name.to_string()),
            parent_id: Set(parent_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    pub async fn employee(db: &DatabaseConnection, department_id: i32, full_name: &str) -> employees::Model {
        employees::ActiveModel {
            department_id: Set(department_id),
            full_name: Set(full_name.to_string()),
            position: Set("Engineer".to_string()),
            hired_at: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }
}
