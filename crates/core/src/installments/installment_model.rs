use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::SubTransaction;

/// One partner's part of a single installment payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerInstallmentShare {
    pub partner_id: String,
    pub percentage: Decimal,
    /// Credited to the partner's cash.
    pub amount: Decimal,
    /// Released from working capital.
    pub principal: Decimal,
    /// Realized into capital.
    pub interest: Decimal,
}

/// An installment split across the product's allocation records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentSplit {
    pub transaction_id: String,
    pub product_id: String,
    pub amount: Decimal,
    pub principal_per_installment: Decimal,
    pub shares: Vec<PartnerInstallmentShare>,
}

impl InstallmentSplit {
    pub fn total_amount(&self) -> Decimal {
        self.shares.iter().map(|s| s.amount).sum()
    }

    pub fn total_principal(&self) -> Decimal {
        self.shares.iter().map(|s| s.principal).sum()
    }

    pub fn total_interest(&self) -> Decimal {
        self.shares.iter().map(|s| s.interest).sum()
    }

    pub fn partner_ids(&self) -> Vec<String> {
        self.shares.iter().map(|s| s.partner_id.clone()).collect()
    }

    /// One sub-transaction per share, tied to the installment transaction.
    pub fn sub_transactions(&self) -> Vec<SubTransaction> {
        self.shares
            .iter()
            .map(|s| SubTransaction::new(&self.transaction_id, &s.partner_id, s.amount))
            .collect()
    }
}
