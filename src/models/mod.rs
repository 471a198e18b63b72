pub mod address;
pub mod customer;
pub mod customer_order;
pub mod order;
pub mod validation;

pub use address::AddressType;
pub use customer::CustomerType;
pub use order::OrderStatus;

/// Customer with its address set and resolved order count.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerWithDetails {
    pub customer: customer::Model,
    pub addresses: Vec<address::Model>,
    pub order_count: usize,
}

/// Customer with eagerly resolved addresses and linked orders.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerWithAssociations {
    pub customer: customer::Model,
    pub addresses: Vec<address::Model>,
    pub orders: Vec<order::Model>,
}

/// Order with its join rows and the linked customers.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithCustomers {
    pub order: order::Model,
    pub customers: Vec<(customer_order::Model, customer::Model)>,
}
