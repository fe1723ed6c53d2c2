//! Database models for products, their schedule, allocations and the
//! investment log.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use lendpool_core::investments::InvestmentLogEntry;
use lendpool_core::ledger::{PartnerProduct, Product, SubTransaction, Transaction};

use crate::errors::StorageError;
use crate::utils::parse_decimal;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductDB {
    pub id: String,
    pub name: Option<String>,
    pub cost: String,
    pub cash_price: String,
    pub cash_paid: String,
    pub total_price: String,
    pub duration: i32,
    pub installment: String,
    pub remaining_months: i32,
    pub rate: String,
    pub description: Option<String>,
    pub client_id: String,
    pub created_at: NaiveDateTime,
}

/// Administrative columns; money columns are never updated.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct ProductChangesDB {
    pub name: Option<String>,
    pub description: Option<String>,
    pub remaining_months: i32,
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub product_id: String,
    pub sequence: i32,
    pub amount: String,
    pub is_debit: bool,
    pub is_paid: bool,
    pub date: NaiveDateTime,
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::sub_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SubTransactionDB {
    pub id: String,
    pub transaction_id: String,
    pub partner_id: String,
    pub amount: String,
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::partner_products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PartnerProductDB {
    pub id: String,
    pub product_id: String,
    pub partner_id: String,
    pub percentage: String,
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::investment_log)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentLogDB {
    pub id: String,
    pub partner_id: String,
    pub is_deposit: bool,
    pub amount: String,
    pub date: NaiveDateTime,
}

// Conversion to domain models

impl TryFrom<ProductDB> for Product {
    type Error = StorageError;

    fn try_from(db: ProductDB) -> Result<Self, Self::Error> {
        Ok(Self {
            cost: parse_decimal("products.cost", &db.cost)?,
            cash_price: parse_decimal("products.cash_price", &db.cash_price)?,
            cash_paid: parse_decimal("products.cash_paid", &db.cash_paid)?,
            total_price: parse_decimal("products.total_price", &db.total_price)?,
            installment: parse_decimal("products.installment", &db.installment)?,
            rate: parse_decimal("products.rate", &db.rate)?,
            id: db.id,
            name: db.name,
            duration: db.duration,
            remaining_months: db.remaining_months,
            description: db.description,
            client_id: db.client_id,
            created_at: db.created_at,
        })
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: parse_decimal("transactions.amount", &db.amount)?,
            id: db.id,
            product_id: db.product_id,
            sequence: db.sequence,
            is_debit: db.is_debit,
            is_paid: db.is_paid,
            date: db.date,
        })
    }
}

impl TryFrom<SubTransactionDB> for SubTransaction {
    type Error = StorageError;

    fn try_from(db: SubTransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: parse_decimal("sub_transactions.amount", &db.amount)?,
            id: db.id,
            transaction_id: db.transaction_id,
            partner_id: db.partner_id,
        })
    }
}

impl TryFrom<PartnerProductDB> for PartnerProduct {
    type Error = StorageError;

    fn try_from(db: PartnerProductDB) -> Result<Self, Self::Error> {
        Ok(Self {
            percentage: parse_decimal("partner_products.percentage", &db.percentage)?,
            id: db.id,
            product_id: db.product_id,
            partner_id: db.partner_id,
        })
    }
}

impl TryFrom<InvestmentLogDB> for InvestmentLogEntry {
    type Error = StorageError;

    fn try_from(db: InvestmentLogDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: parse_decimal("investment_log.amount", &db.amount)?,
            id: db.id,
            partner_id: db.partner_id,
            is_deposit: db.is_deposit,
            date: db.date,
        })
    }
}

// Conversion from domain models

impl From<&Product> for ProductDB {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            cost: product.cost.to_string(),
            cash_price: product.cash_price.to_string(),
            cash_paid: product.cash_paid.to_string(),
            total_price: product.total_price.to_string(),
            duration: product.duration,
            installment: product.installment.to_string(),
            remaining_months: product.remaining_months,
            rate: product.rate.to_string(),
            description: product.description.clone(),
            client_id: product.client_id.clone(),
            created_at: product.created_at,
        }
    }
}

impl From<&Transaction> for TransactionDB {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id.clone(),
            product_id: transaction.product_id.clone(),
            sequence: transaction.sequence,
            amount: transaction.amount.to_string(),
            is_debit: transaction.is_debit,
            is_paid: transaction.is_paid,
            date: transaction.date,
        }
    }
}

impl From<&SubTransaction> for SubTransactionDB {
    fn from(sub: &SubTransaction) -> Self {
        Self {
            id: sub.id.clone(),
            transaction_id: sub.transaction_id.clone(),
            partner_id: sub.partner_id.clone(),
            amount: sub.amount.to_string(),
        }
    }
}

impl From<&PartnerProduct> for PartnerProductDB {
    fn from(allocation: &PartnerProduct) -> Self {
        Self {
            id: allocation.id.clone(),
            product_id: allocation.product_id.clone(),
            partner_id: allocation.partner_id.clone(),
            percentage: allocation.percentage.to_string(),
        }
    }
}

impl From<&InvestmentLogEntry> for InvestmentLogDB {
    fn from(entry: &InvestmentLogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            partner_id: entry.partner_id.clone(),
            is_deposit: entry.is_deposit,
            amount: entry.amount.to_string(),
            date: entry.date,
        }
    }
}
