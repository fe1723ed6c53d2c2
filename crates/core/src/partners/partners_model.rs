//! Partner domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, FieldErrors, Result};
use crate::utils::decimal_utils::round_money;

/// An investor contributing cash to the funding pool.
///
/// `cash` is immediately spendable liquidity, `capital` is total equity
/// (grows with realized interest) and `working_capital` is the part of capital
/// committed to unpaid product principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub description: Option<String>,
    pub profession: Option<String>,
    pub cash: Decimal,
    pub capital: Decimal,
    pub working_capital: Decimal,
    pub active_inventory_count: i32,
    /// Bumped by the store on every balance write.
    pub version: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Partner {
    /// Moves `share` from cash into working capital for a newly funded product.
    pub fn commit_funding(&mut self, share: Decimal) -> Result<()> {
        if share > self.cash {
            return Err(Error::InsufficientFunds {
                partner_id: self.id.clone(),
                requested: share,
                available: self.cash,
            });
        }
        self.cash = round_money(self.cash - share);
        self.working_capital = round_money(self.working_capital + share);
        self.active_inventory_count += 1;
        Ok(())
    }

    /// Credits one installment split: the whole amount becomes cash, the part
    /// above `principal` is realized interest and the principal is released
    /// from working capital.
    pub fn settle_installment(&mut self, amount: Decimal, principal: Decimal) {
        self.cash = round_money(self.cash + amount);
        self.capital = round_money(self.capital + (amount - principal));
        self.working_capital = round_money(self.working_capital - principal);
    }

    pub fn deposit(&mut self, amount: Decimal) {
        self.cash = round_money(self.cash + amount);
        self.capital = round_money(self.capital + amount);
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<()> {
        if amount > self.cash {
            return Err(Error::InsufficientFunds {
                partner_id: self.id.clone(),
                requested: amount,
                available: self.cash,
            });
        }
        self.cash = round_money(self.cash - amount);
        self.capital = round_money(self.capital - amount);
        Ok(())
    }
}

/// Input model for registering a partner.
///
/// The opening cash balance equals the contributed capital.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPartner {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub description: Option<String>,
    pub profession: Option<String>,
    pub capital: Decimal,
}

impl NewPartner {
    pub fn validate(&self) -> Result<()> {
        self.field_errors().finish()
    }

    pub(crate) fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require_non_empty("id", &self.id);
        errors.require_non_empty("name", &self.name);
        errors.require_non_empty("phoneNumber", &self.phone_number);
        errors.require_non_empty("address", &self.address);
        errors.require_non_negative("capital", self.capital);
        errors
    }

    /// Builds the partner row with its opening balances.
    pub fn into_partner(self, now: NaiveDateTime) -> Partner {
        let capital = round_money(self.capital);
        Partner {
            id: self.id.trim().to_string(),
            name: self.name,
            phone_number: self.phone_number,
            address: self.address,
            description: self.description,
            profession: self.profession,
            cash: capital,
            capital,
            working_capital: Decimal::ZERO,
            active_inventory_count: 0,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Profile update for a partner. Balances are owned by the ledger engines
/// and cannot be edited through this model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerUpdate {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub description: Option<String>,
    pub profession: Option<String>,
}

impl PartnerUpdate {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors.require_non_empty("id", &self.id);
        errors.require_non_empty("name", &self.name);
        errors.require_non_empty("phoneNumber", &self.phone_number);
        errors.require_non_empty("address", &self.address);
        errors.finish()
    }
}
