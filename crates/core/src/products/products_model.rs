//! Product creation input, pricing and operation results.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocation::{AllocationPlan, SkippedPartner};
use crate::errors::{FieldErrors, Result};
use crate::ledger::{new_ledger_id, Product, Transaction};
use crate::utils::decimal_utils::round_money;
use crate::utils::time_utils::monthly_due_dates;

/// Input model for financing a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: Option<String>,
    /// Amount drawn from the partner pool.
    pub cost: Decimal,
    pub cash_price: Decimal,
    /// Down payment made by the client.
    pub cash_paid: Decimal,
    /// Number of monthly installments.
    pub duration: i32,
    pub client_id: String,
    pub description: Option<String>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        errors.require_positive("cost", self.cost);
        errors.require_positive("cashPrice", self.cash_price);
        errors.require_non_negative("cashPaid", self.cash_paid);
        if self.cash_paid > self.cash_price {
            errors.push("cashPaid", "must not exceed cashPrice");
        }
        if self.duration < 1 {
            errors.push("duration", "must be at least one month");
        }
        errors.require_non_empty("clientId", &self.client_id);
        errors.finish()
    }

    /// Prices the product at `rate` and builds the row to insert.
    pub fn into_product(self, rate: Decimal, now: NaiveDateTime) -> Product {
        let cash_price = round_money(self.cash_price);
        let cash_paid = round_money(self.cash_paid);
        let pricing = ProductPricing::derive(cash_price, cash_paid, rate, self.duration);
        Product {
            id: new_ledger_id(),
            name: self.name,
            cost: round_money(self.cost),
            cash_price,
            cash_paid,
            total_price: pricing.total_price,
            duration: self.duration,
            installment: pricing.installment,
            remaining_months: self.duration,
            rate,
            description: self.description,
            client_id: self.client_id.trim().to_string(),
            created_at: now,
        }
    }
}

/// Flat-rate pricing of a financed product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductPricing {
    pub total_price: Decimal,
    pub installment: Decimal,
}

impl ProductPricing {
    /// `total = cash_price + (cash_price - cash_paid) * rate * duration`,
    /// repaid in `duration` equal installments.
    pub fn derive(cash_price: Decimal, cash_paid: Decimal, rate: Decimal, duration: i32) -> Self {
        let months = Decimal::from(duration.max(1));
        let total_price = round_money(cash_price + (cash_price - cash_paid) * rate * months);
        Self {
            total_price,
            installment: round_money(total_price / months),
        }
    }
}

/// Funding transaction first, then one unpaid installment per month.
pub fn build_schedule(product: &Product) -> Vec<Transaction> {
    let months = product.duration.max(0) as u32;
    let mut schedule = Vec::with_capacity(months as usize + 1);
    schedule.push(Transaction::funding(
        &product.id,
        product.cost,
        product.created_at,
    ));
    for (sequence, due) in (1..).zip(monthly_due_dates(product.created_at, months)) {
        schedule.push(Transaction::installment(
            &product.id,
            sequence,
            product.installment,
            due,
        ));
    }
    schedule
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductResult {
    pub product_id: String,
    pub funded_partner_count: usize,
    pub allocated_total: Decimal,
    /// Non-zero only when partners were skipped.
    pub shortfall: Decimal,
    pub skipped_partners: Vec<SkippedPartner>,
}

impl CreateProductResult {
    pub fn from_plan(product_id: &str, plan: &AllocationPlan) -> Self {
        Self {
            product_id: product_id.to_string(),
            funded_partner_count: plan.shares.len(),
            allocated_total: plan.allocated_total(),
            shortfall: plan.shortfall(),
            skipped_partners: plan.skipped.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayInstallmentResult {
    pub transaction_id: String,
    pub product_id: String,
    pub sub_transaction_count: usize,
    pub total_principal: Decimal,
    pub total_interest: Decimal,
}
