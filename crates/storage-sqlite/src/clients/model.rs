//! Database models for clients.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use lendpool_core::clients::{Client, NewClient};

use crate::errors::StorageError;
use crate::utils::parse_optional_decimal;

/// Database model for clients
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
#[diesel(table_name = crate::schema::clients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClientDB {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub description: Option<String>,
    pub profession: Option<String>,
    pub credit_limit: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Columns replaced by a client update.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
pub struct ClientChangesDB {
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub description: Option<String>,
    pub profession: Option<String>,
    pub credit_limit: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ClientDB> for Client {
    type Error = StorageError;

    fn try_from(db: ClientDB) -> Result<Self, Self::Error> {
        Ok(Self {
            credit_limit: parse_optional_decimal("clients.credit_limit", db.credit_limit.as_deref())?,
            id: db.id,
            name: db.name,
            phone_number: db.phone_number,
            address: db.address,
            description: db.description,
            profession: db.profession,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl ClientDB {
    pub fn from_new(new_client: NewClient, now: NaiveDateTime) -> Self {
        Self {
            id: new_client.id.trim().to_string(),
            name: new_client.name,
            phone_number: new_client.phone_number,
            address: new_client.address,
            description: new_client.description,
            profession: new_client.profession,
            credit_limit: new_client.credit_limit.map(|d| d.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

impl ClientChangesDB {
    pub fn from_update(update: NewClient, now: NaiveDateTime) -> Self {
        Self {
            name: update.name,
            phone_number: update.phone_number,
            address: update.address,
            description: update.description,
            profession: update.profession,
            credit_limit: update.credit_limit.map(|d| d.to_string()),
            updated_at: now,
        }
    }
}
