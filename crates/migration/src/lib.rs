//! # Orgtree Migrations
//!
//! Schema migrations for the department tree and the connection helpers the
//! CLI and the HTTP server share.

pub use sea_orm_migration::prelude::*;

pub mod db;
mod m20260301_000001_create_departments_table;
mod m20260301_000002_create_employees_table;

pub use db::{DatabaseConfig, SslMode};

/// Applies the orgtree schema in order.
#[derive(Debug)]
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_departments_table::Migration),
            Box::new(m20260301_000002_create_employees_table::Migration),
        ]
    }
}
