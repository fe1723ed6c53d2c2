//! Client domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{FieldErrors, Result};

/// The borrower who receives a financed product and owes its installments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub description: Option<String>,
    pub profession: Option<String>,
    pub credit_limit: Option<Decimal>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a client, also used for full updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub description: Option<String>,
    pub profession: Option<String>,
    pub credit_limit: Option<Decimal>,
}

impl NewClient {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors.require_non_empty("id", &self.id);
        errors.require_non_empty("name", &self.name);
        errors.require_non_empty("phoneNumber", &self.phone_number);
        errors.require_non_empty("address", &self.address);
        if let Some(limit) = self.credit_limit {
            errors.require_non_negative("creditLimit", limit);
        }
        errors.finish()
    }
}

pub type ClientUpdate = NewClient;
