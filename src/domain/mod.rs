//! Domain layer - business-level error types.
//!
//! No framework dependencies beyond the error conversion from the
//! persistence layer.

pub mod errors;

pub use errors::DomainError;
