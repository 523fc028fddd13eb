//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Implements the `PatientRepository` port over `diesel-async` with a `bb8`
//! connection pool. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module; only the repository, the pool
//! and the migration runner are exported.
//!
//! ```ignore
//! use patient_registry::outbound::persistence::{DbPool, DieselPatientRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/medical-consulting")).await?;
//! let repo = DieselPatientRepository::new(pool);
//! ```

mod diesel_patient_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_patient_repository::DieselPatientRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, DbPool, PoolConfig, PoolError};
