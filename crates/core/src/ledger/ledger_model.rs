//! Ledger entities: products, their transaction schedule, per-partner
//! sub-transactions and allocation records.
//!
//! Entities reference each other only through id fields; navigation goes
//! through the store.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::FUNDING_SEQUENCE;
use crate::errors::{FieldErrors, Result};

/// Generates a time-ordered identifier for a new ledger row.
pub fn new_ledger_id() -> String {
    Uuid::now_v7().to_string()
}

/// A financed purchase, funded by partner cash and repaid by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: Option<String>,
    pub cost: Decimal,
    pub cash_price: Decimal,
    pub cash_paid: Decimal,
    pub total_price: Decimal,
    pub duration: i32,
    pub installment: Decimal,
    pub remaining_months: i32,
    /// Rate the product was priced with.
    pub rate: Decimal,
    pub description: Option<String>,
    pub client_id: String,
    pub created_at: NaiveDateTime,
}

impl Product {
    /// Principal recovered by each installment.
    pub fn principal_per_installment(&self) -> Decimal {
        if self.duration <= 0 {
            return Decimal::ZERO;
        }
        self.cash_price / Decimal::from(self.duration)
    }
}

/// Administrative update. Monetary fields are fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub remaining_months: i32,
}

impl ProductUpdate {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors.require_non_empty("id", &self.id);
        if self.remaining_months < 0 {
            errors.push("remainingMonths", "must not be negative");
        }
        errors.finish()
    }
}

/// A scheduled cash movement tied to a product.
///
/// `is_debit == false` marks the funding transaction that moved partner cash
/// into the product; `is_debit == true` marks an installment owed by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub product_id: String,
    /// 0 for funding, 1..=duration for installments.
    pub sequence: i32,
    pub amount: Decimal,
    pub is_debit: bool,
    pub is_paid: bool,
    pub date: NaiveDateTime,
}

impl Transaction {
    pub fn funding(product_id: &str, amount: Decimal, date: NaiveDateTime) -> Self {
        Self {
            id: new_ledger_id(),
            product_id: product_id.to_string(),
            sequence: FUNDING_SEQUENCE,
            amount,
            is_debit: false,
            is_paid: true,
            date,
        }
    }

    pub fn installment(
        product_id: &str,
        sequence: i32,
        amount: Decimal,
        due: NaiveDateTime,
    ) -> Self {
        Self {
            id: new_ledger_id(),
            product_id: product_id.to_string(),
            sequence,
            amount,
            is_debit: true,
            is_paid: false,
            date: due,
        }
    }

    pub fn is_installment(&self) -> bool {
        self.is_debit
    }
}

/// One partner's split of a transaction amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTransaction {
    pub id: String,
    pub transaction_id: String,
    pub partner_id: String,
    pub amount: Decimal,
}

impl SubTransaction {
    pub fn new(transaction_id: &str, partner_id: &str, amount: Decimal) -> Self {
        Self {
            id: new_ledger_id(),
            transaction_id: transaction_id.to_string(),
            partner_id: partner_id.to_string(),
            amount,
        }
    }
}

/// A partner's fixed share of one product, snapshotted at funding time.
///
/// The percentage never changes afterwards and is the only input used to
/// split the product's installments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerProduct {
    pub id: String,
    pub product_id: String,
    pub partner_id: String,
    pub percentage: Decimal,
}

impl PartnerProduct {
    pub fn new(product_id: &str, partner_id: &str, percentage: Decimal) -> Self {
        Self {
            id: new_ledger_id(),
            product_id: product_id.to_string(),
            partner_id: partner_id.to_string(),
            percentage,
        }
    }
}
