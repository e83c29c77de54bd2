//! Entity definitions for orgtree
//!
//! This crate contains Sea-ORM entity definitions for the database models.

pub mod departments;
pub use departments::Entity as Departments;
pub mod employees;
pub use employees::Entity as Employees;
