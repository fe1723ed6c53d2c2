//! Ledger queries shared by units of work and the read side.

use diesel::prelude::*;
use diesel::SqliteConnection;

use lendpool_core::errors::{EntityKind, Error};
use lendpool_core::investments::InvestmentLogEntry;
use lendpool_core::ledger::{PartnerProduct, Product, SubTransaction, Transaction};
use lendpool_core::Result;

use super::model::{InvestmentLogDB, PartnerProductDB, ProductDB, SubTransactionDB, TransactionDB};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{investment_log, partner_products, products, sub_transactions, transactions};

fn convert<D, T>(rows: Vec<D>) -> Result<Vec<T>>
where
    T: TryFrom<D, Error = StorageError>,
{
    rows.into_iter()
        .map(|row| T::try_from(row).map_err(Error::from))
        .collect()
}

pub(crate) fn load_product(conn: &mut SqliteConnection, product_id: &str) -> Result<Product> {
    let row = products::table
        .find(product_id)
        .select(ProductDB::as_select())
        .first::<ProductDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found(EntityKind::Product, product_id))?;
    Ok(Product::try_from(row)?)
}

pub(crate) fn load_products(conn: &mut SqliteConnection) -> Result<Vec<Product>> {
    let rows = products::table
        .order((products::created_at.desc(), products::id.desc()))
        .select(ProductDB::as_select())
        .load::<ProductDB>(conn)
        .into_core()?;
    convert(rows)
}

pub(crate) fn load_products_for_partner(
    conn: &mut SqliteConnection,
    partner_id: &str,
) -> Result<Vec<Product>> {
    let rows = products::table
        .inner_join(partner_products::table)
        .filter(partner_products::partner_id.eq(partner_id))
        .order((products::created_at.desc(), products::id.desc()))
        .select(ProductDB::as_select())
        .load::<ProductDB>(conn)
        .into_core()?;
    convert(rows)
}

pub(crate) fn load_transaction(
    conn: &mut SqliteConnection,
    transaction_id: &str,
) -> Result<Transaction> {
    let row = transactions::table
        .find(transaction_id)
        .select(TransactionDB::as_select())
        .first::<TransactionDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found(EntityKind::Transaction, transaction_id))?;
    Ok(Transaction::try_from(row)?)
}

pub(crate) fn load_transactions(
    conn: &mut SqliteConnection,
    product_id: &str,
) -> Result<Vec<Transaction>> {
    let rows = transactions::table
        .filter(transactions::product_id.eq(product_id))
        .order(transactions::sequence.asc())
        .select(TransactionDB::as_select())
        .load::<TransactionDB>(conn)
        .into_core()?;
    convert(rows)
}

pub(crate) fn load_sub_transactions(
    conn: &mut SqliteConnection,
    transaction_id: &str,
) -> Result<Vec<SubTransaction>> {
    let rows = sub_transactions::table
        .filter(sub_transactions::transaction_id.eq(transaction_id))
        .order(sub_transactions::partner_id.asc())
        .select(SubTransactionDB::as_select())
        .load::<SubTransactionDB>(conn)
        .into_core()?;
    convert(rows)
}

/// Allocation records of a product in ascending partner id order.
pub(crate) fn load_allocations(
    conn: &mut SqliteConnection,
    product_id: &str,
) -> Result<Vec<PartnerProduct>> {
    let rows = partner_products::table
        .filter(partner_products::product_id.eq(product_id))
        .order(partner_products::partner_id.asc())
        .select(PartnerProductDB::as_select())
        .load::<PartnerProductDB>(conn)
        .into_core()?;
    convert(rows)
}

pub(crate) fn load_investment_entries(
    conn: &mut SqliteConnection,
    partner_id: &str,
) -> Result<Vec<InvestmentLogEntry>> {
    let rows = investment_log::table
        .filter(investment_log::partner_id.eq(partner_id))
        .order((investment_log::date.desc(), investment_log::id.desc()))
        .select(InvestmentLogDB::as_select())
        .load::<InvestmentLogDB>(conn)
        .into_core()?;
    convert(rows)
}
