use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Owning customer; immutable after creation.
    pub customer_id: i32,
    pub address_type: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_primary: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Customer,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Open address-type enumeration ("Home"/"Work"/free text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AddressType {
    Home,
    Work,
    Other(String),
}

impl AddressType {
    pub fn as_str(&self) -> &str {
        match self {
            AddressType::Home => "Home",
            AddressType::Work => "Work",
            AddressType::Other(s) => s,
        }
    }
}

impl Default for AddressType {
    fn default() -> Self {
        AddressType::Home
    }
}

impl From<String> for AddressType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Home" => AddressType::Home,
            "Work" => AddressType::Work,
            _ => AddressType::Other(s),
        }
    }
}

impl From<AddressType> for String {
    fn from(t: AddressType) -> Self {
        t.as_str().to_owned()
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
