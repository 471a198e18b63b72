use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub customer_type: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::address::Entity")]
    Address,
    #[sea_orm(has_many = "super::customer_order::Entity")]
    CustomerOrder,
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::customer_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Open customer-type enumeration backed by the `customer_type` column.
///
/// The column stays free text; unrecognized values round-trip through
/// `Other` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CustomerType {
    Individual,
    Business,
    Premium,
    Other(String),
}

impl CustomerType {
    pub fn as_str(&self) -> &str {
        match self {
            CustomerType::Individual => "Individual",
            CustomerType::Business => "Business",
            CustomerType::Premium => "Premium",
            CustomerType::Other(s) => s,
        }
    }
}

impl Default for CustomerType {
    fn default() -> Self {
        CustomerType::Individual
    }
}

impl From<String> for CustomerType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Individual" => CustomerType::Individual,
            "Business" => CustomerType::Business,
            "Premium" => CustomerType::Premium,
            _ => CustomerType::Other(s),
        }
    }
}

impl From<CustomerType> for String {
    fn from(t: CustomerType) -> Self {
        t.as_str().to_owned()
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
