//! Infrastructure Database Layer
//!
//! PostgreSQL adapter for the motor insurance core. Provides connection
//! pool management, embedded schema migrations, and [`PgMotorStore`], the
//! SQLx-backed implementation of the `MotorStore` port.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PgMotorStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/motor")).await?;
//! infra_db::run_migrations(&pool).await?;
//! let store = PgMotorStore::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod store;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use store::PgMotorStore;
