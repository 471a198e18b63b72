//! Projection of entity graphs into flat, transport-ready DTOs.
//!
//! Pure functions, no I/O. Missing optional inputs fall back to empty
//! string / zero; nothing here can fail.

use serde::{Deserialize, Serialize};

use crate::models::{
    CustomerWithDetails, OrderWithCustomers, address, customer, customer_order, order,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDto {
    pub customer_id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub customer_type: String,
    pub created_at: String,
    pub is_active: bool,
    pub addresses: Vec<AddressDto>,
    pub total_orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressDto {
    pub address_id: i32,
    pub address_type: String,
    pub full_address: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDto {
    pub order_id: i32,
    pub order_number: String,
    pub order_date: String,
    pub total_amount: f64,
    pub status: String,
    pub description: Option<String>,
    pub customers: Vec<CustomerSummaryDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummaryDto {
    pub customer_id: i32,
    pub full_name: String,
    pub email: String,
    pub role: String,
}

pub fn full_name(customer: &customer::Model) -> String {
    format!("{} {}", customer.first_name, customer.last_name)
}

pub fn full_address(address: &address::Model) -> String {
    format!(
        "{}, {}, {} {}",
        address.street, address.city, address.state, address.zip_code
    )
}

pub fn address_to_dto(address: &address::Model) -> AddressDto {
    AddressDto {
        address_id: address.id,
        address_type: address.address_type.clone(),
        full_address: full_address(address),
        is_primary: address.is_primary,
    }
}

pub fn customer_to_dto(
    customer: &customer::Model,
    addresses: &[address::Model],
    order_count: usize,
) -> CustomerDto {
    CustomerDto {
        customer_id: customer.id,
        full_name: full_name(customer),
        email: customer.email.clone(),
        phone: customer.phone.clone().unwrap_or_default(),
        customer_type: customer.customer_type.clone().unwrap_or_default(),
        created_at: customer.created_at.clone(),
        is_active: customer.is_active,
        addresses: addresses.iter().map(address_to_dto).collect(),
        total_orders: order_count,
    }
}

pub fn customer_details_to_dto(details: &CustomerWithDetails) -> CustomerDto {
    customer_to_dto(&details.customer, &details.addresses, details.order_count)
}

pub fn customer_summary(customer: &customer::Model, link: &customer_order::Model) -> CustomerSummaryDto {
    CustomerSummaryDto {
        customer_id: customer.id,
        full_name: full_name(customer),
        email: customer.email.clone(),
        role: link.role.clone(),
    }
}

pub fn order_to_dto(graph: &OrderWithCustomers) -> OrderDto {
    let order: &order::Model = &graph.order;
    OrderDto {
        order_id: order.id,
        order_number: order.order_number.clone(),
        order_date: order.order_date.clone(),
        total_amount: order.total_amount,
        status: order.status.clone(),
        description: order.description.clone(),
        customers: graph
            .customers
            .iter()
            .map(|(link, customer)| customer_summary(customer, link))
            .collect(),
    }
}
