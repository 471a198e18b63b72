//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Lookup, update or delete by id with no matching row
    NotFound,
    /// Uniqueness or foreign-key constraint violation
    Conflict(String),
    /// Invalid input rejected before reaching the store
    Validation(String),
    /// Store failure (connection loss, timeout); propagated as-is, never retried
    Database(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Conflict(msg) => write!(f, "Constraint violation: {}", msg),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer).
// Constraint violations must surface typed, not as a generic failure.
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                DomainError::Conflict(msg)
            }
            _ => DomainError::Database(e.to_string()),
        }
    }
}
