//! Splits installment payments across the partners that funded a product.

use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::installment_model::{InstallmentSplit, PartnerInstallmentShare};
use crate::errors::{EntityKind, Error, Result, ValidationError};
use crate::ledger::{PartnerProduct, Product, Transaction};
use crate::partners::Partner;
use crate::utils::decimal_utils::{covers_whole, round_money, settle_residual};

/// Pure installment arithmetic. Persistence is left to the caller's unit of work.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallmentProcessor;

impl InstallmentProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Fails unless `transaction` is an unpaid installment.
    pub fn ensure_payable(&self, transaction: &Transaction) -> Result<()> {
        if !transaction.is_installment() {
            return Err(ValidationError::InvalidInput(format!(
                "Transaction {} is a funding transaction, not an installment",
                transaction.id
            ))
            .into());
        }
        if transaction.is_paid {
            return Err(Error::AlreadyPaid(transaction.id.clone()));
        }
        Ok(())
    }

    /// Splits the installment amount by the snapshotted allocation percentages.
    ///
    /// When the percentages cover the whole product, rounding residue is
    /// pushed onto the largest share so the split sums to the installment.
    /// An under-funded product keeps `amount × percentage` per share and the
    /// uncovered part stays unallocated.
    pub fn split(
        &self,
        product: &Product,
        transaction: &Transaction,
        allocations: &[PartnerProduct],
    ) -> Result<InstallmentSplit> {
        if allocations.is_empty() {
            return Err(Error::NoAllocation(product.id.clone()));
        }

        let principal_per_installment = product.principal_per_installment();
        let mut amounts = Vec::with_capacity(allocations.len());
        let mut principals = Vec::with_capacity(allocations.len());
        for allocation in allocations {
            amounts.push(round_money(transaction.amount * allocation.percentage));
            principals.push(round_money(principal_per_installment * allocation.percentage));
        }

        let percentages: Vec<Decimal> = allocations.iter().map(|a| a.percentage).collect();
        if covers_whole(&percentages) {
            settle_residual(transaction.amount, &mut amounts);
            settle_residual(round_money(principal_per_installment), &mut principals);
        }

        let shares = allocations
            .iter()
            .zip(amounts.into_iter().zip(principals))
            .map(|(allocation, (amount, principal))| PartnerInstallmentShare {
                partner_id: allocation.partner_id.clone(),
                percentage: allocation.percentage,
                amount,
                principal,
                interest: amount - principal,
            })
            .collect();

        let split = InstallmentSplit {
            transaction_id: transaction.id.clone(),
            product_id: product.id.clone(),
            amount: transaction.amount,
            principal_per_installment,
            shares,
        };
        debug!(
            "Installment {} of product {} split across {} partner(s): principal {}, interest {}",
            split.transaction_id,
            split.product_id,
            split.shares.len(),
            split.total_principal(),
            split.total_interest()
        );
        Ok(split)
    }

    /// Credits every share to its partner and returns the updated partners in
    /// share order.
    pub fn apply(&self, split: &InstallmentSplit, partners: &[Partner]) -> Result<Vec<Partner>> {
        let by_id: HashMap<&str, &Partner> = partners.iter().map(|p| (p.id.as_str(), p)).collect();
        split
            .shares
            .iter()
            .map(|share| {
                let mut partner = by_id
                    .get(share.partner_id.as_str())
                    .map(|p| (*p).clone())
                    .ok_or_else(|| {
                        Error::not_found(EntityKind::Partner, &share.partner_id)
                    })?;
                partner.settle_installment(share.amount, share.principal);
                Ok(partner)
            })
            .collect()
    }
}
