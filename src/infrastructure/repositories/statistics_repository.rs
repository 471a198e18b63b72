//! Read-only cross-entity rollups.
//!
//! Every metric is computed fresh from the store on each call; nothing
//! here mutates state or caches.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};
use serde::Serialize;

use crate::domain::DomainError;
use crate::models::customer::{self, Entity as Customer};
use crate::models::order::{self, Entity as Order};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerTypeStats {
    pub customer_type: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerStats {
    pub total_customers: u64,
    pub active_customers: u64,
    pub inactive_customers: u64,
    pub total_orders: u64,
    pub total_revenue: f64,
    pub customer_type_breakdown: Vec<CustomerTypeStats>,
}

pub struct StatisticsRepository {
    db: DatabaseConnection,
}

impl StatisticsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Count over all customers regardless of active state.
    pub async fn total_customers(&self) -> Result<u64, DomainError> {
        Ok(Customer::find().count(&self.db).await?)
    }

    pub async fn active_customers(&self) -> Result<u64, DomainError> {
        Ok(Customer::find()
            .filter(customer::Column::IsActive.eq(true))
            .count(&self.db)
            .await?)
    }

    /// Derived from one pair of reads, never queried separately, so it
    /// stays consistent with the other two counts.
    pub async fn inactive_customers(&self) -> Result<u64, DomainError> {
        let total = self.total_customers().await?;
        let active = self.active_customers().await?;
        Ok(total.saturating_sub(active))
    }

    pub async fn total_orders(&self) -> Result<u64, DomainError> {
        Ok(Order::find().count(&self.db).await?)
    }

    /// Sum of `total_amount` over all orders; 0 over zero rows.
    pub async fn total_revenue(&self) -> Result<f64, DomainError> {
        let total = Order::find()
            .select_only()
            .column_as(order::Column::TotalAmount.sum(), "total")
            .into_tuple::<Option<f64>>()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or(0.0))
    }

    /// Active customers grouped by type; rows without a type land in the
    /// "Unknown" bucket. Sorted count-descending, then by name, for
    /// deterministic output.
    pub async fn customer_type_breakdown(&self) -> Result<Vec<CustomerTypeStats>, DomainError> {
        let active = Customer::find()
            .filter(customer::Column::IsActive.eq(true))
            .all(&self.db)
            .await?;

        let mut buckets: HashMap<String, u64> = HashMap::new();
        for found in active {
            let key = found
                .customer_type
                .unwrap_or_else(|| "Unknown".to_owned());
            *buckets.entry(key).or_insert(0) += 1;
        }

        let mut breakdown: Vec<CustomerTypeStats> = buckets
            .into_iter()
            .map(|(customer_type, count)| CustomerTypeStats {
                customer_type,
                count,
            })
            .collect();

        breakdown.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.customer_type.cmp(&b.customer_type))
        });

        Ok(breakdown)
    }

    /// One snapshot of every metric. Each field is fetched as an
    /// independent query, so the snapshot as a whole is not
    /// transactionally consistent under concurrent writes; accepted
    /// trade-off, `inactive` is still derived from its own pair of
    /// reads.
    pub async fn full_statistics(&self) -> Result<CustomerStats, DomainError> {
        let total_customers = self.total_customers().await?;
        let active_customers = self.active_customers().await?;

        Ok(CustomerStats {
            total_customers,
            active_customers,
            inactive_customers: total_customers.saturating_sub(active_customers),
            total_orders: self.total_orders().await?,
            total_revenue: self.total_revenue().await?,
            customer_type_breakdown: self.customer_type_breakdown().await?,
        })
    }
}
