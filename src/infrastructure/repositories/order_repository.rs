//! SeaORM implementation of the order repository and the
//! customer-order join.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::db::UnitOfWork;
use crate::models::customer::{self, Entity as Customer};
use crate::models::customer_order::{self, Entity as CustomerOrder};
use crate::models::order::{self, Entity as Order, OrderStatus};
use crate::models::OrderWithCustomers;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderInput {
    pub order_number: String,
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub description: Option<String>,
    /// Customers linked with role "Primary" in the same unit of work.
    #[serde(default)]
    pub customer_ids: Vec<i32>,
}

/// Full-field overwrite; `order_date` is set at creation and kept.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderInput {
    pub id: i32,
    pub order_number: String,
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub description: Option<String>,
}

/// A staged join row; duplicate (customer_id, order_id) pairs are not
/// rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkCustomerInput {
    pub customer_id: i32,
    pub order_id: i32,
    pub role: String,
}

pub struct OrderRepository {
    db: DatabaseConnection,
}

impl OrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All orders with their join rows and linked customers resolved.
    pub async fn list_all(&self) -> Result<Vec<OrderWithCustomers>, DomainError> {
        let with_links = Order::find()
            .find_with_related(CustomerOrder)
            .all(&self.db)
            .await?;

        self.attach_customers(with_links).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<OrderWithCustomers>, DomainError> {
        let Some(found) = Order::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let links = CustomerOrder::find()
            .filter(customer_order::Column::OrderId.eq(id))
            .all(&self.db)
            .await?;

        let mut resolved = self.attach_customers(vec![(found, links)]).await?;
        Ok(resolved.pop())
    }

    /// Orders having at least one join row for `customer_id`; each order
    /// appears once regardless of link multiplicity.
    pub async fn list_by_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<order::Model>, DomainError> {
        let links = CustomerOrder::find()
            .filter(customer_order::Column::CustomerId.eq(customer_id))
            .all(&self.db)
            .await?;

        let mut order_ids: Vec<i32> = links.iter().map(|l| l.order_id).collect();
        order_ids.sort_unstable();
        order_ids.dedup();

        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(Order::find()
            .filter(order::Column::Id.is_in(order_ids))
            .all(&self.db)
            .await?)
    }

    /// Stages the order insert plus one "Primary"-role link per listed
    /// customer, all in the same unit of work.
    pub async fn create(
        &self,
        uow: &UnitOfWork,
        input: CreateOrderInput,
    ) -> Result<order::Model, DomainError> {
        let created = order::ActiveModel {
            order_number: Set(input.order_number),
            order_date: Set(chrono::Utc::now().to_rfc3339()),
            total_amount: Set(input.total_amount),
            status: Set(input.status.as_str().to_owned()),
            description: Set(input.description),
            ..Default::default()
        }
        .insert(uow.conn())
        .await?;

        for customer_id in input.customer_ids {
            customer_order::ActiveModel {
                customer_id: Set(customer_id),
                order_id: Set(created.id),
                role: Set("Primary".to_owned()),
                ..Default::default()
            }
            .insert(uow.conn())
            .await?;
        }

        Ok(created)
    }

    pub async fn update(
        &self,
        uow: &UnitOfWork,
        input: UpdateOrderInput,
    ) -> Result<order::Model, DomainError> {
        let existing = Order::find_by_id(input.id)
            .one(uow.conn())
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: order::ActiveModel = existing.into();
        active.order_number = Set(input.order_number);
        active.total_amount = Set(input.total_amount);
        active.status = Set(input.status.as_str().to_owned());
        active.description = Set(input.description);

        Ok(active.update(uow.conn()).await?)
    }

    /// Hard delete; join rows go in the same unit of work so no orphaned
    /// link survives a commit.
    pub async fn delete(&self, uow: &UnitOfWork, id: i32) -> Result<(), DomainError> {
        if Order::find_by_id(id).one(uow.conn()).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        CustomerOrder::delete_many()
            .filter(customer_order::Column::OrderId.eq(id))
            .exec(uow.conn())
            .await?;

        Order::delete_by_id(id).exec(uow.conn()).await?;
        Ok(())
    }

    /// Stages a new join row. Duplicate pairs are allowed; callers that
    /// need exactly-once linkage must check first.
    pub async fn link_customer(
        &self,
        uow: &UnitOfWork,
        input: LinkCustomerInput,
    ) -> Result<customer_order::Model, DomainError> {
        Ok(customer_order::ActiveModel {
            customer_id: Set(input.customer_id),
            order_id: Set(input.order_id),
            role: Set(input.role),
            ..Default::default()
        }
        .insert(uow.conn())
        .await?)
    }

    /// Resolves the linked customers for a batch of orders with two
    /// queries total.
    async fn attach_customers(
        &self,
        with_links: Vec<(order::Model, Vec<customer_order::Model>)>,
    ) -> Result<Vec<OrderWithCustomers>, DomainError> {
        let mut customer_ids: Vec<i32> = with_links
            .iter()
            .flat_map(|(_, links)| links.iter().map(|l| l.customer_id))
            .collect();
        customer_ids.sort_unstable();
        customer_ids.dedup();

        let mut customers: HashMap<i32, customer::Model> = HashMap::new();
        if !customer_ids.is_empty() {
            let found = Customer::find()
                .filter(customer::Column::Id.is_in(customer_ids))
                .all(&self.db)
                .await?;
            for model in found {
                customers.insert(model.id, model);
            }
        }

        Ok(with_links
            .into_iter()
            .map(|(found, links)| OrderWithCustomers {
                order: found,
                customers: links
                    .into_iter()
                    .filter_map(|link| {
                        customers
                            .get(&link.customer_id)
                            .cloned()
                            .map(|c| (link, c))
                    })
                    .collect(),
            })
            .collect())
    }
}
