//! SeaORM implementation of the customer repository.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};
use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::db::UnitOfWork;
use crate::models::address::{self, AddressType, Entity as Address};
use crate::models::customer::{self, CustomerType, Entity as Customer};
use crate::models::customer_order::{self, Entity as CustomerOrder};
use crate::models::order::{self, Entity as Order};
use crate::models::{CustomerWithAssociations, CustomerWithDetails};

/// Input for creating a customer, optionally with its primary address
/// staged in the same unit of work.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub customer_type: CustomerType,
    pub notes: Option<String>,
    pub primary_address: Option<PrimaryAddressInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryAddressInput {
    #[serde(default)]
    pub address_type: AddressType,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: Option<String>,
}

/// Full-field overwrite; `created_at` stays untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomerInput {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub customer_type: CustomerType,
    pub notes: Option<String>,
    pub is_active: bool,
}

pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All active customers with their address set and order count.
    /// Ordering is store-default.
    pub async fn list_active(&self) -> Result<Vec<CustomerWithDetails>, DomainError> {
        let with_addresses = Customer::find()
            .filter(customer::Column::IsActive.eq(true))
            .find_with_related(Address)
            .all(&self.db)
            .await?;

        // One query for all order counts instead of one per customer.
        let ids: Vec<i32> = with_addresses.iter().map(|(c, _)| c.id).collect();
        let mut counts: HashMap<i32, usize> = HashMap::new();
        if !ids.is_empty() {
            let links = CustomerOrder::find()
                .filter(customer_order::Column::CustomerId.is_in(ids))
                .all(&self.db)
                .await?;
            for link in links {
                *counts.entry(link.customer_id).or_insert(0) += 1;
            }
        }

        Ok(with_addresses
            .into_iter()
            .map(|(c, addresses)| {
                let order_count = counts.get(&c.id).copied().unwrap_or(0);
                CustomerWithDetails {
                    customer: c,
                    addresses,
                    order_count,
                }
            })
            .collect())
    }

    /// Lookup by id; inactive customers remain retrievable.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<customer::Model>, DomainError> {
        Ok(Customer::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get_by_id_with_associations(
        &self,
        id: i32,
    ) -> Result<Option<CustomerWithAssociations>, DomainError> {
        let Some(found) = Customer::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let addresses = Address::find()
            .filter(address::Column::CustomerId.eq(id))
            .all(&self.db)
            .await?;

        let links = CustomerOrder::find()
            .filter(customer_order::Column::CustomerId.eq(id))
            .all(&self.db)
            .await?;
        let mut order_ids: Vec<i32> = links.iter().map(|l| l.order_id).collect();
        order_ids.sort_unstable();
        order_ids.dedup();

        let orders = if order_ids.is_empty() {
            Vec::new()
        } else {
            Order::find()
                .filter(order::Column::Id.is_in(order_ids))
                .all(&self.db)
                .await?
        };

        Ok(Some(CustomerWithAssociations {
            customer: found,
            addresses,
            orders,
        }))
    }

    /// Active customers whose first name, last name or email contains
    /// `text` as a case-sensitive substring. SQLite's LIKE folds ASCII
    /// case, so the match runs in memory over the active rows.
    pub async fn search(&self, text: &str) -> Result<Vec<customer::Model>, DomainError> {
        let active = Customer::find()
            .filter(customer::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;

        Ok(active
            .into_iter()
            .filter(|c| {
                c.first_name.contains(text)
                    || c.last_name.contains(text)
                    || c.email.contains(text)
            })
            .collect())
    }

    pub async fn filter_by_type(
        &self,
        customer_type: &CustomerType,
    ) -> Result<Vec<customer::Model>, DomainError> {
        Ok(Customer::find()
            .filter(customer::Column::IsActive.eq(true))
            .filter(customer::Column::CustomerType.eq(customer_type.as_str()))
            .all(&self.db)
            .await?)
    }

    /// Exact email match, any active state.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<customer::Model>, DomainError> {
        Ok(Customer::find()
            .filter(customer::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    /// Uniqueness probe over active and inactive customers; `exclude_id`
    /// ignores that customer's own row during update-in-place.
    pub async fn email_exists(
        &self,
        email: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DomainError> {
        email_taken(&self.db, email, exclude_id).await
    }

    /// Stages a customer insert; a primary-address payload is staged in
    /// the same unit of work so one commit persists both atomically.
    pub async fn create(
        &self,
        uow: &UnitOfWork,
        input: CreateCustomerInput,
    ) -> Result<customer::Model, DomainError> {
        if email_taken(uow.conn(), &input.email, None).await? {
            return Err(DomainError::Conflict(format!(
                "email {} is already registered",
                input.email
            )));
        }

        let now = chrono::Utc::now().to_rfc3339();

        let created = customer::ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            phone: Set(input.phone),
            customer_type: Set(Some(input.customer_type.as_str().to_owned())),
            notes: Set(input.notes),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(uow.conn())
        .await?;

        if let Some(primary) = input.primary_address {
            address::ActiveModel {
                customer_id: Set(created.id),
                address_type: Set(primary.address_type.as_str().to_owned()),
                street: Set(primary.street),
                city: Set(primary.city),
                state: Set(primary.state),
                zip_code: Set(primary.zip_code),
                country: Set(primary.country.unwrap_or_else(|| "USA".to_owned())),
                is_primary: Set(true),
                ..Default::default()
            }
            .insert(uow.conn())
            .await?;
        }

        Ok(created)
    }

    /// Stages a full-field overwrite and refreshes `updated_at`.
    pub async fn update(
        &self,
        uow: &UnitOfWork,
        input: UpdateCustomerInput,
    ) -> Result<customer::Model, DomainError> {
        let existing = Customer::find_by_id(input.id)
            .one(uow.conn())
            .await?
            .ok_or(DomainError::NotFound)?;

        if email_taken(uow.conn(), &input.email, Some(input.id)).await? {
            return Err(DomainError::Conflict(format!(
                "email {} is already registered",
                input.email
            )));
        }

        let mut active: customer::ActiveModel = existing.into();
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.email = Set(input.email);
        active.phone = Set(input.phone);
        active.customer_type = Set(Some(input.customer_type.as_str().to_owned()));
        active.notes = Set(input.notes);
        active.is_active = Set(input.is_active);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        Ok(active.update(uow.conn()).await?)
    }

    /// Stages `is_active = false` plus a timestamp refresh. Idempotent:
    /// deleting an already-inactive customer succeeds silently.
    pub async fn soft_delete(&self, uow: &UnitOfWork, id: i32) -> Result<(), DomainError> {
        let existing = Customer::find_by_id(id)
            .one(uow.conn())
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: customer::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(uow.conn()).await?;

        Ok(())
    }
}

async fn email_taken<C: ConnectionTrait>(
    conn: &C,
    email: &str,
    exclude_id: Option<i32>,
) -> Result<bool, DomainError> {
    let mut query = Customer::find().filter(customer::Column::Email.eq(email));
    if let Some(id) = exclude_id {
        query = query.filter(customer::Column::Id.ne(id));
    }
    Ok(query.count(conn).await? > 0)
}
