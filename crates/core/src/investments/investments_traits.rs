use async_trait::async_trait;
use rust_decimal::Decimal;

use super::investments_model::{DepositResult, InvestmentLogEntry, WithdrawResult};
use crate::errors::Result;

#[async_trait]
pub trait InvestmentServiceTrait: Send + Sync {
    /// Adds `amount` to the partner's cash and capital.
    async fn deposit(&self, partner_id: &str, amount: Decimal) -> Result<DepositResult>;

    /// Removes `amount` from the partner's cash and capital.
    async fn withdraw(&self, partner_id: &str, amount: Decimal) -> Result<WithdrawResult>;

    fn list_entries(&self, partner_id: &str) -> Result<Vec<InvestmentLogEntry>>;
}
