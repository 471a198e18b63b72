//! Repository implementations using SeaORM
//!
//! Reads run against the shared connection; staging writes take a
//! [`UnitOfWork`](crate::infrastructure::db::UnitOfWork) and become
//! durable only when the caller commits it.

pub mod address_repository;
pub mod customer_repository;
pub mod order_repository;
pub mod statistics_repository;

pub use address_repository::{AddressRepository, CreateAddressInput, UpdateAddressInput};
pub use customer_repository::{
    CreateCustomerInput, CustomerRepository, PrimaryAddressInput, UpdateCustomerInput,
};
pub use order_repository::{
    CreateOrderInput, LinkCustomerInput, OrderRepository, UpdateOrderInput,
};
pub use statistics_repository::{CustomerStats, CustomerTypeStats, StatisticsRepository};
