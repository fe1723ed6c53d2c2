//! Proportional allocation of a product's funding cost across partners.

use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::allocation_model::{
    AllocationPlan, AllocationPolicy, AllocationRecords, PartnerShare, SkippedPartner,
};
use crate::errors::{Error, FieldErrors, Result};
use crate::ledger::{PartnerProduct, SubTransaction, Transaction};
use crate::partners::Partner;
use crate::utils::decimal_utils::{round_money, round_percentage, settle_residual};

/// Splits funding amounts across the partner pool by cash share.
///
/// Stateless apart from its policy; safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationEngine {
    policy: AllocationPolicy,
}

impl AllocationEngine {
    pub fn new(policy: AllocationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AllocationPolicy {
        self.policy
    }

    /// Computes each partner's share of `funding_amount` without mutating anything.
    ///
    /// Percentages come from the cash snapshot in `partners`; partners are
    /// processed in ascending id order. Partners without cash, and partners
    /// whose share rounds to zero at money precision, get no allocation record
    /// and no inventory count.
    pub fn plan(&self, funding_amount: Decimal, partners: &[Partner]) -> Result<AllocationPlan> {
        self.plan_with_snapshot(funding_amount, partners, partners)
    }

    /// Like [`plan`](Self::plan), but takes percentages and the pool total from
    /// `snapshot` while checking coverage against the cash in `current`.
    ///
    /// A partner absent from `current` counts as having no cash. With a
    /// consistent snapshot every exact share is below the partner's cash, so
    /// only balances that moved after the snapshot reach the shortfall policy.
    pub fn plan_with_snapshot(
        &self,
        funding_amount: Decimal,
        snapshot: &[Partner],
        current: &[Partner],
    ) -> Result<AllocationPlan> {
        let mut errors = FieldErrors::new();
        errors.require_positive("cost", funding_amount);
        errors.finish()?;

        let pool_total: Decimal = snapshot.iter().map(|p| p.cash).sum();
        if pool_total <= Decimal::ZERO || funding_amount >= pool_total {
            return Err(Error::InsufficientPool {
                requested: funding_amount,
                available: pool_total,
            });
        }

        let live_cash: HashMap<&str, Decimal> =
            current.iter().map(|p| (p.id.as_str(), p.cash)).collect();
        let cash_of = |id: &str| live_cash.get(id).copied().unwrap_or(Decimal::ZERO);

        let mut candidates: Vec<&Partner> =
            snapshot.iter().filter(|p| p.cash > Decimal::ZERO).collect();
        candidates.sort_by(|a, b| a.id.cmp(&b.id));

        let mut skipped = Vec::new();
        let mut base = pool_total;
        let shares = loop {
            let mut covered = Vec::with_capacity(candidates.len());
            let mut short = Vec::new();
            for partner in &candidates {
                let required = funding_amount * partner.cash / base;
                let amount = round_money(required);
                if amount.is_zero() {
                    continue;
                }
                let cash = cash_of(partner.id.as_str());
                if cash < required {
                    short.push(SkippedPartner {
                        partner_id: partner.id.clone(),
                        cash,
                        required: amount,
                    });
                } else {
                    covered.push(PartnerShare {
                        partner_id: partner.id.clone(),
                        percentage: round_percentage(partner.cash / base),
                        amount: amount.min(cash),
                    });
                }
            }

            if short.is_empty() {
                break covered;
            }

            match self.policy {
                AllocationPolicy::SkipShortfall => {
                    skipped.extend(short);
                    break covered;
                }
                AllocationPolicy::RejectShortfall => {
                    let first = &short[0];
                    return Err(Error::InsufficientFunds {
                        partner_id: first.partner_id.clone(),
                        requested: first.required,
                        available: first.cash,
                    });
                }
                AllocationPolicy::Renormalize => {
                    candidates.retain(|p| !short.iter().any(|s| s.partner_id == p.id));
                    skipped.extend(short);
                    base = candidates.iter().map(|p| p.cash).sum();
                    if base <= Decimal::ZERO || funding_amount >= base {
                        return Err(Error::InsufficientPool {
                            requested: funding_amount,
                            available: base,
                        });
                    }
                }
            }
        };

        let mut plan = AllocationPlan {
            funding_amount,
            pool_total,
            shares,
            skipped,
        };

        if plan.is_fully_funded() || self.policy == AllocationPolicy::Renormalize {
            settle_funding_residual(&mut plan, cash_of);
        }

        if !plan.skipped.is_empty() {
            warn!(
                "Allocation of {} left {} partner(s) out, shortfall {} (policy {:?})",
                funding_amount,
                plan.skipped.len(),
                plan.shortfall(),
                self.policy
            );
        }
        debug!(
            "Allocation plan: {} of {} across {} partner(s), pool {}",
            plan.allocated_total(),
            funding_amount,
            plan.shares.len(),
            pool_total
        );
        Ok(plan)
    }

    /// Turns a plan into allocation records and funding sub-transactions, and
    /// debits each participating partner.
    pub fn apply(
        &self,
        plan: &AllocationPlan,
        funding: &Transaction,
        partners: &[Partner],
    ) -> Result<AllocationRecords> {
        let by_id: HashMap<&str, &Partner> = partners.iter().map(|p| (p.id.as_str(), p)).collect();

        let mut records = AllocationRecords {
            allocations: Vec::with_capacity(plan.shares.len()),
            sub_transactions: Vec::with_capacity(plan.shares.len()),
            partners: Vec::with_capacity(plan.shares.len()),
        };

        for share in &plan.shares {
            let mut partner = by_id
                .get(share.partner_id.as_str())
                .map(|p| (*p).clone())
                .ok_or_else(|| {
                    Error::Unexpected(format!(
                        "Partner {} missing from allocation snapshot",
                        share.partner_id
                    ))
                })?;
            partner.commit_funding(share.amount)?;

            records.allocations.push(PartnerProduct::new(
                &funding.product_id,
                &share.partner_id,
                share.percentage,
            ));
            records.sub_transactions.push(SubTransaction::new(
                &funding.id,
                &share.partner_id,
                share.amount,
            ));
            records.partners.push(partner);
        }

        Ok(records)
    }
}

/// Makes rounded shares of a fully funded plan sum to the funding amount,
/// as long as the adjusted partner can still cover its share.
fn settle_funding_residual(plan: &mut AllocationPlan, cash_of: impl Fn(&str) -> Decimal) {
    let mut amounts: Vec<Decimal> = plan.shares.iter().map(|s| s.amount).collect();
    let Some(index) = settle_residual(plan.funding_amount, &mut amounts) else {
        return;
    };
    let share = &mut plan.shares[index];
    if amounts[index] <= cash_of(share.partner_id.as_str()) && amounts[index] >= Decimal::ZERO {
        share.amount = amounts[index];
    }
}
