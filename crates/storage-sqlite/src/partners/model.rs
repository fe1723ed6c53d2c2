//! Database models for partners.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use lendpool_core::partners::{Partner, PartnerUpdate};

use crate::errors::StorageError;
use crate::utils::parse_decimal;

/// Database model for partners
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::partners)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PartnerDB {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub description: Option<String>,
    pub profession: Option<String>,
    pub cash: String,
    pub capital: String,
    pub working_capital: String,
    pub active_inventory_count: i32,
    pub version: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Balance columns written by the ledger engines.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::partners)]
pub struct PartnerBalancesDB {
    pub cash: String,
    pub capital: String,
    pub working_capital: String,
    pub active_inventory_count: i32,
    pub version: i64,
    pub updated_at: NaiveDateTime,
}

/// Profile columns editable by users.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::partners)]
#[diesel(treat_none_as_null = true)]
pub struct PartnerProfileDB {
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub description: Option<String>,
    pub profession: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<PartnerDB> for Partner {
    type Error = StorageError;

    fn try_from(db: PartnerDB) -> Result<Self, Self::Error> {
        Ok(Self {
            cash: parse_decimal("partners.cash", &db.cash)?,
            capital: parse_decimal("partners.capital", &db.capital)?,
            working_capital: parse_decimal("partners.working_capital", &db.working_capital)?,
            id: db.id,
            name: db.name,
            phone_number: db.phone_number,
            address: db.address,
            description: db.description,
            profession: db.profession,
            active_inventory_count: db.active_inventory_count,
            version: db.version,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<&Partner> for PartnerDB {
    fn from(partner: &Partner) -> Self {
        Self {
            id: partner.id.clone(),
            name: partner.name.clone(),
            phone_number: partner.phone_number.clone(),
            address: partner.address.clone(),
            description: partner.description.clone(),
            profession: partner.profession.clone(),
            cash: partner.cash.to_string(),
            capital: partner.capital.to_string(),
            working_capital: partner.working_capital.to_string(),
            active_inventory_count: partner.active_inventory_count,
            version: partner.version,
            created_at: partner.created_at,
            updated_at: partner.updated_at,
        }
    }
}

impl PartnerBalancesDB {
    /// Balances of `partner` stamped with the next version.
    pub fn next_version(partner: &Partner, now: NaiveDateTime) -> Self {
        Self {
            cash: partner.cash.to_string(),
            capital: partner.capital.to_string(),
            working_capital: partner.working_capital.to_string(),
            active_inventory_count: partner.active_inventory_count,
            version: partner.version + 1,
            updated_at: now,
        }
    }
}

impl PartnerProfileDB {
    pub fn from_update(update: PartnerUpdate, now: NaiveDateTime) -> Self {
        Self {
            name: update.name,
            phone_number: update.phone_number,
            address: update.address,
            description: update.description,
            profession: update.profession,
            updated_at: now,
        }
    }
}
