//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel row structs and
//! domain types. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module. Connections come from a
//! `bb8` pool via `diesel-async`, and every database error is mapped onto the
//! matching port error.
//!
//! # Example
//!
//! ```ignore
//! use carnet::outbound::persistence::{DbPool, DieselCategoryRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/carnet")).await?;
//! let categories = DieselCategoryRepository::new(pool);
//! ```

mod diesel_category_repository;
mod diesel_contact_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
