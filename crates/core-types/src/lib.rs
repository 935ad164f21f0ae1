//! # Core Types
//!
//! The domain model shared by every other crate: the `Student` entity, its
//! id-less write model, the `BaseEntity` trait the generic repository is
//! bounded on, and the rules a student must satisfy before it is persisted.

pub mod entity;
pub mod error;
pub mod student;
pub mod validation;

// Re-export the core types to provide a clean public API.
pub use entity::BaseEntity;
pub use error::{ValidationErrors, ValidationFailure};
pub use student::{Student, StudentPayload};
pub use validation::{StudentValidator, Validate};
