//! Infrastructure layer - framework implementations
//!
//! This layer contains:
//! - Database connection, migrations and the unit of work (db)
//! - Configuration loading (config)
//! - Demo seed data (seed)
//! - Repository implementations (repositories)

pub mod config;
pub mod db;
pub mod repositories;
pub mod seed;

pub use repositories::*;
