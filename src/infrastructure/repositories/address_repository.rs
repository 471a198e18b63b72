//! SeaORM implementation of the address repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::db::UnitOfWork;
use crate::models::address::{self, AddressType, Entity as Address};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAddressInput {
    pub customer_id: i32,
    #[serde(default)]
    pub address_type: AddressType,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Full-field overwrite; the owning customer is immutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAddressInput {
    pub id: i32,
    #[serde(default)]
    pub address_type: AddressType,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: Option<String>,
    pub is_primary: bool,
}

pub struct AddressRepository {
    db: DatabaseConnection,
}

impl AddressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_by_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<address::Model>, DomainError> {
        Ok(Address::find()
            .filter(address::Column::CustomerId.eq(customer_id))
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<address::Model>, DomainError> {
        Ok(Address::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create(
        &self,
        uow: &UnitOfWork,
        input: CreateAddressInput,
    ) -> Result<address::Model, DomainError> {
        Ok(address::ActiveModel {
            customer_id: Set(input.customer_id),
            address_type: Set(input.address_type.as_str().to_owned()),
            street: Set(input.street),
            city: Set(input.city),
            state: Set(input.state),
            zip_code: Set(input.zip_code),
            country: Set(input.country.unwrap_or_else(|| "USA".to_owned())),
            is_primary: Set(input.is_primary),
            ..Default::default()
        }
        .insert(uow.conn())
        .await?)
    }

    pub async fn update(
        &self,
        uow: &UnitOfWork,
        input: UpdateAddressInput,
    ) -> Result<address::Model, DomainError> {
        let existing = Address::find_by_id(input.id)
            .one(uow.conn())
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: address::ActiveModel = existing.into();
        active.address_type = Set(input.address_type.as_str().to_owned());
        active.street = Set(input.street);
        active.city = Set(input.city);
        active.state = Set(input.state);
        active.zip_code = Set(input.zip_code);
        if let Some(country) = input.country {
            active.country = Set(country);
        }
        active.is_primary = Set(input.is_primary);

        Ok(active.update(uow.conn()).await?)
    }

    pub async fn delete(&self, uow: &UnitOfWork, id: i32) -> Result<(), DomainError> {
        let result = Address::delete_by_id(id).exec(uow.conn()).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    /// Makes `address_id` the customer's single primary address.
    ///
    /// The invariant spans the customer's whole address set, so this is
    /// a read-then-bulk-write inside one transaction; no window with
    /// zero or multiple primaries is ever observable. NotFound when the
    /// address does not belong to the customer.
    pub async fn set_primary(&self, customer_id: i32, address_id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let addresses = Address::find()
            .filter(address::Column::CustomerId.eq(customer_id))
            .all(&txn)
            .await?;

        if !addresses.iter().any(|a| a.id == address_id) {
            txn.rollback().await?;
            return Err(DomainError::NotFound);
        }

        for found in addresses {
            let make_primary = found.id == address_id;
            if found.is_primary != make_primary {
                let mut active: address::ActiveModel = found.into();
                active.is_primary = Set(make_primary);
                active.update(&txn).await?;
            }
        }

        txn.commit().await?;
        Ok(())
    }
}
