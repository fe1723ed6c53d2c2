use diesel::prelude::*;
use diesel::SqliteConnection;

use lendpool_core::errors::Error;
use lendpool_core::investments::InvestmentLogEntry;
use lendpool_core::ledger::{LedgerUnitOfWork, PartnerProduct, Product, SubTransaction, Transaction};
use lendpool_core::partners::Partner;
use lendpool_core::Result;

use super::model::{InvestmentLogDB, PartnerProductDB, ProductDB, SubTransactionDB, TransactionDB};
use super::queries;
use crate::errors::StorageError;
use crate::partners;
use crate::schema::{investment_log, partner_products, products, sub_transactions, transactions};
use crate::utils::chunk_for_sqlite;

/// A unit of work bound to the writer's connection while its IMMEDIATE
/// transaction is open.
pub struct SqliteUnitOfWork<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SqliteUnitOfWork<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl LedgerUnitOfWork for SqliteUnitOfWork<'_> {
    fn list_partners(&mut self) -> Result<Vec<Partner>> {
        partners::load_partners(self.conn)
    }

    fn get_partner(&mut self, partner_id: &str) -> Result<Partner> {
        partners::load_partner(self.conn, partner_id)
    }

    fn get_partners(&mut self, partner_ids: &[String]) -> Result<Vec<Partner>> {
        partners::load_partners_by_ids(self.conn, partner_ids)
    }

    fn save_partner_balances(&mut self, partner: &Partner) -> Result<Partner> {
        partners::save_balances(self.conn, partner)
    }

    fn insert_product(&mut self, product: &Product) -> Result<()> {
        diesel::insert_into(products::table)
            .values(&ProductDB::from(product))
            .execute(self.conn)
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn get_product(&mut self, product_id: &str) -> Result<Product> {
        queries::load_product(self.conn, product_id)
    }

    fn insert_transactions(&mut self, schedule: &[Transaction]) -> Result<()> {
        let rows: Vec<TransactionDB> = schedule.iter().map(TransactionDB::from).collect();
        for chunk in chunk_for_sqlite(&rows) {
            diesel::insert_into(transactions::table)
                .values(chunk)
                .execute(self.conn)
                .map_err(StorageError::from)?;
        }
        Ok(())
    }

    fn get_transaction(&mut self, transaction_id: &str) -> Result<Transaction> {
        queries::load_transaction(self.conn, transaction_id)
    }

    fn mark_transaction_paid(&mut self, transaction_id: &str) -> Result<()> {
        let updated = diesel::update(
            transactions::table
                .filter(transactions::id.eq(transaction_id))
                .filter(transactions::is_paid.eq(false)),
        )
        .set(transactions::is_paid.eq(true))
        .execute(self.conn)
        .map_err(StorageError::from)?;

        if updated == 0 {
            // Either missing or already paid.
            queries::load_transaction(self.conn, transaction_id)?;
            return Err(Error::AlreadyPaid(transaction_id.to_string()));
        }
        Ok(())
    }

    fn insert_allocations(&mut self, allocations: &[PartnerProduct]) -> Result<()> {
        let rows: Vec<PartnerProductDB> = allocations.iter().map(PartnerProductDB::from).collect();
        for chunk in chunk_for_sqlite(&rows) {
            diesel::insert_into(partner_products::table)
                .values(chunk)
                .execute(self.conn)
                .map_err(StorageError::from)?;
        }
        Ok(())
    }

    fn list_allocations(&mut self, product_id: &str) -> Result<Vec<PartnerProduct>> {
        queries::load_allocations(self.conn, product_id)
    }

    fn insert_sub_transactions(&mut self, subs: &[SubTransaction]) -> Result<()> {
        let rows: Vec<SubTransactionDB> = subs.iter().map(SubTransactionDB::from).collect();
        for chunk in chunk_for_sqlite(&rows) {
            diesel::insert_into(sub_transactions::table)
                .values(chunk)
                .execute(self.conn)
                .map_err(StorageError::from)?;
        }
        Ok(())
    }

    fn append_investment_entry(&mut self, entry: &InvestmentLogEntry) -> Result<()> {
        diesel::insert_into(investment_log::table)
            .values(&InvestmentLogDB::from(entry))
            .execute(self.conn)
            .map_err(StorageError::from)?;
        Ok(())
    }
}
