//! Allocation plan models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{PartnerProduct, SubTransaction};
use crate::partners::Partner;

/// What to do with a partner whose cash cannot cover its proportional share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationPolicy {
    /// Leave the partner out and accept an under-funded product. The shortfall
    /// is reported on the plan; percentages are not rescaled.
    #[default]
    SkipShortfall,
    /// Fail the whole allocation.
    RejectShortfall,
    /// Leave the partner out and recompute percentages over the remaining
    /// partners until every share is covered.
    Renormalize,
}

/// One participating partner's slice of a funding amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerShare {
    pub partner_id: String,
    pub percentage: Decimal,
    pub amount: Decimal,
}

/// A partner left out of an allocation because its cash was short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedPartner {
    pub partner_id: String,
    pub cash: Decimal,
    pub required: Decimal,
}

/// Result of splitting a funding amount across the pool, before any write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPlan {
    pub funding_amount: Decimal,
    /// Pool cash snapshot taken before any mutation.
    pub pool_total: Decimal,
    pub shares: Vec<PartnerShare>,
    pub skipped: Vec<SkippedPartner>,
}

impl AllocationPlan {
    pub fn allocated_total(&self) -> Decimal {
        self.shares.iter().map(|s| s.amount).sum()
    }

    pub fn percentage_total(&self) -> Decimal {
        self.shares.iter().map(|s| s.percentage).sum()
    }

    /// Funding left uncovered by skipped partners.
    pub fn shortfall(&self) -> Decimal {
        (self.funding_amount - self.allocated_total()).max(Decimal::ZERO)
    }

    pub fn is_fully_funded(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Rows and balance changes produced by applying a plan to a product.
#[derive(Debug, Clone)]
pub struct AllocationRecords {
    pub allocations: Vec<PartnerProduct>,
    pub sub_transactions: Vec<SubTransaction>,
    /// Participating partners with their debited balances.
    pub partners: Vec<Partner>,
}
