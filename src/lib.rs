//! Customer/order data-access core.
//!
//! Repositories mediate all reads and writes against the relational
//! store, staged writes are committed through an explicit
//! [`db::UnitOfWork`](infrastructure::db::UnitOfWork), and entities pass
//! through the [`mapper`] before leaving the core. HTTP transport,
//! validation wiring and logging bootstrap are the caller's concern.

pub mod domain;
pub mod infrastructure;
pub mod mapper;
pub mod models;

pub use infrastructure::config;
pub use infrastructure::db;
pub use infrastructure::repositories;
pub use infrastructure::seed;
