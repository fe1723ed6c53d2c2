//! Capital deposit/withdrawal log models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::new_ledger_id;

/// Append-only record of a partner capital movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentLogEntry {
    pub id: String,
    pub partner_id: String,
    /// `true` for a deposit, `false` for a withdrawal.
    pub is_deposit: bool,
    pub amount: Decimal,
    pub date: NaiveDateTime,
}

impl InvestmentLogEntry {
    pub fn deposit(partner_id: &str, amount: Decimal, date: NaiveDateTime) -> Self {
        Self::new(partner_id, true, amount, date)
    }

    pub fn withdrawal(partner_id: &str, amount: Decimal, date: NaiveDateTime) -> Self {
        Self::new(partner_id, false, amount, date)
    }

    fn new(partner_id: &str, is_deposit: bool, amount: Decimal, date: NaiveDateTime) -> Self {
        Self {
            id: new_ledger_id(),
            partner_id: partner_id.to_string(),
            is_deposit,
            amount,
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResult {
    pub partner_id: String,
    pub new_cash: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawResult {
    pub partner_id: String,
    pub remaining_cash: Decimal,
}
