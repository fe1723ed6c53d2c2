//! Interest rate domain model.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The single active per-period interest rate applied to financed balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRate {
    pub id: String,
    pub rate: Decimal,
    pub last_updated: NaiveDateTime,
}
