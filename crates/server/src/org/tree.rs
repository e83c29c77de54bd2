//! # Tree Assembler
//!
//! Loads a bounded-depth subtree level by level, attaches employees, and
//! renders the nested response.
//!
//! Loaded departments live in a flat arena indexed by id; children and
//! employees are kept as arena indices / rows per slot, so rendering is a
//! recursion over indices bounded by the requested depth.

use std::{collections::HashMap, str::FromStr};

use entity::{departments, employees};
use error::{AppError, Result};
use sea_orm::ConnectionTrait;

use super::store;
use crate::dto::{departments::DepartmentTreeResponse, employees::EmployeeResponse};

/// Ordering of employees inside each department.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmployeeSort {
    #[default]
    FullName,
    CreatedAt,
}

impl FromStr for EmployeeSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full_name" => Ok(Self::FullName),
            "created_at" => Ok(Self::CreatedAt),
            _ => {
                Err(AppError::bad_request(
                    "sort_employees must be 'full_name' or 'created_at'",
                ))
            },
        }
    }
}

/// Parameters of one subtree read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeQuery {
    /// Levels below the root to load and render
    pub depth:             u32,
    pub include_employees: bool,
    pub sort:              EmployeeSort,
}

impl Default for TreeQuery {
    fn default() -> Self {
        Self {
            depth:             1,
            include_employees: true,
            sort:              EmployeeSort::default(),
        }
    }
}

struct Slot {
    department: departments::Model,
    children:   Vec<usize>,
    employees:  Vec<employees::Model>,
}

#[derive(Default)]
struct Arena {
    slots: Vec<Slot>,
    index: HashMap<i32, usize>,
}

impl Arena {
    /// Adds a department unless it was already loaded. Returns whether it was new.
    fn insert(&mut self, department: departments::Model) -> bool {
        if self.index.contains_key(&department.id) {
            return false;
        }
        self.index.insert(department.id, self.slots.len());
        self.slots.push(Slot {
            department,
            children: Vec::new(),
            employees: Vec::new(),
        });
        true
    }

    fn ids(&self) -> Vec<i32> { self.slots.iter().map(|slot| slot.department.id).collect() }

    /// Links every slot but the root to its loaded parent, in load order.
    fn link(&mut self) {
        for position in 1 .. self.slots.len() {
            let parent = self.slots[position]
                .department
                .parent_id
                .and_then(|parent_id| self.index.get(&parent_id).copied());
            if let Some(parent) = parent {
                self.slots[parent].children.push(position);
            }
        }
    }

    fn attach(&mut self, employees: Vec<employees::Model>) {
        for employee in employees {
            if let Some(&position) = self.index.get(&employee.department_id) {
                self.slots[position].employees.push(employee);
            }
        }
    }

    fn render(&self, position: usize, level: u32, query: &TreeQuery) -> DepartmentTreeResponse {
        let slot = &self.slots[position];
        let employees = if query.include_employees {
            slot.employees
                .iter()
                .cloned()
                .map(EmployeeResponse::from)
                .collect()
        }
        else {
            Vec::new()
        };
        let children = if level < query.depth {
            slot.children
                .iter()
                .map(|&child| self.render(child, level + 1, query))
                .collect()
        }
        else {
            Vec::new()
        };

        DepartmentTreeResponse {
            id: slot.department.id,
            name: slot.department.name.clone(),
            parent_id: slot.department.parent_id,
            created_at: slot.department.created_at,
            employees,
            children,
        }
    }
}

/// Assemble the subtree rooted at `root_id`.
///
/// # Errors
///
/// Returns not found when the root does not exist.
pub async fn assemble_tree<C>(db: &C, root_id: i32, query: &TreeQuery) -> Result<DepartmentTreeResponse>
where
    C: ConnectionTrait,
{
    let root = store::find_department(db, root_id)
        .await?
        .ok_or_else(|| AppError::not_found("department not found"))?;

    let mut arena = Arena::default();
    arena.insert(root);

    let mut frontier = vec![root_id];
    for _ in 0 .. query.depth {
        if frontier.is_empty() {
            break;
        }
        let children = store::child_departments(db, &frontier).await?;
        frontier = children
            .into_iter()
            .filter_map(|child| {
                let id = child.id;
                arena.insert(child).then_some(id)
            })
            .collect();
    }
    arena.link();

    if query.include_employees {
        let employees = store::employees_in(db, &arena.ids(), query.sort).await?;
        arena.attach(employees);
    }

    Ok(arena.render(0, 0, query))
}
