use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::investments_model::{DepositResult, InvestmentLogEntry, WithdrawResult};
use super::investments_traits::InvestmentServiceTrait;
use crate::errors::{FieldErrors, Result};
use crate::ledger::{LedgerRepositoryTrait, LedgerStoreTrait};
use crate::utils::decimal_utils::round_money;
use crate::utils::time_utils::now_naive;

/// Records partner capital movements.
///
/// Each call is a single-partner unit of work: the balance change and the log
/// entry commit together.
pub struct InvestmentService<S> {
    ledger: Arc<S>,
}

impl<S> InvestmentService<S>
where
    S: LedgerStoreTrait + LedgerRepositoryTrait + 'static,
{
    pub fn new(ledger: Arc<S>) -> Self {
        Self { ledger }
    }

    fn validate(partner_id: &str, amount: Decimal) -> Result<Decimal> {
        let mut errors = FieldErrors::new();
        errors.require_non_empty("partnerId", partner_id);
        errors.require_positive("amount", amount);
        errors.finish()?;
        Ok(round_money(amount))
    }
}

#[async_trait::async_trait]
impl<S> InvestmentServiceTrait for InvestmentService<S>
where
    S: LedgerStoreTrait + LedgerRepositoryTrait + 'static,
{
    async fn deposit(&self, partner_id: &str, amount: Decimal) -> Result<DepositResult> {
        let amount = Self::validate(partner_id, amount)?;
        let partner_id = partner_id.to_string();
        debug!("Depositing {} for partner {}", amount, partner_id);

        let result = self
            .ledger
            .atomic(move |uow| {
                let mut partner = uow.get_partner(&partner_id)?;
                partner.deposit(amount);
                let partner = uow.save_partner_balances(&partner)?;
                uow.append_investment_entry(&InvestmentLogEntry::deposit(
                    &partner.id,
                    amount,
                    now_naive(),
                ))?;
                Ok(DepositResult {
                    partner_id: partner.id,
                    new_cash: partner.cash,
                })
            })
            .await?;

        info!(
            "Deposit of {} committed for partner {}, cash now {}",
            amount, result.partner_id, result.new_cash
        );
        Ok(result)
    }

    async fn withdraw(&self, partner_id: &str, amount: Decimal) -> Result<WithdrawResult> {
        let amount = Self::validate(partner_id, amount)?;
        let partner_id = partner_id.to_string();
        debug!("Withdrawing {} for partner {}", amount, partner_id);

        let result = self
            .ledger
            .atomic(move |uow| {
                let mut partner = uow.get_partner(&partner_id)?;
                partner.withdraw(amount)?;
                let partner = uow.save_partner_balances(&partner)?;
                uow.append_investment_entry(&InvestmentLogEntry::withdrawal(
                    &partner.id,
                    amount,
                    now_naive(),
                ))?;
                Ok(WithdrawResult {
                    partner_id: partner.id,
                    remaining_cash: partner.cash,
                })
            })
            .await?;

        info!(
            "Withdrawal of {} committed for partner {}, cash now {}",
            amount, result.partner_id, result.remaining_cash
        );
        Ok(result)
    }

    fn list_entries(&self, partner_id: &str) -> Result<Vec<InvestmentLogEntry>> {
        self.ledger.list_investment_entries(partner_id)
    }
}
