//! # Database Crate
//!
//! The application's persistence layer. Everything above this crate talks to
//! storage through the generic [`Repository`] trait and never sees SQL.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: Applies the embedded migrations so the schema is up-to-date.
//! - `Repository`: Generic CRUD over any [`core_types::BaseEntity`].
//! - `PgRepository`: The PostgreSQL implementation, driven by [`PgEntity`] metadata.
//! - `MemoryRepository`: A process-local implementation for development and tests.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::MemoryRepository;
pub use repository::{PgEntity, PgRepository, Repository};
