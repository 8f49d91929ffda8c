//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Implements the domain's `ProfileRepository` port over `diesel-async`
//! connections pooled by `bb8`.
//!
//! - **Thin adapter**: the repository only translates between Diesel rows
//!   and domain types. Validation lives in the domain.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: Diesel and pool failures become
//!   `ProfileRepositoryError` variants, with constraint violations mapped by
//!   name.
//!
//! # Example
//!
//! ```no_run
//! use profile_service::outbound::persistence::{DbPool, DieselProfileRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), profile_service::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/profiles")).await?;
//! let repository = DieselProfileRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_profile_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_profile_repository::DieselProfileRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError, PooledConn};
