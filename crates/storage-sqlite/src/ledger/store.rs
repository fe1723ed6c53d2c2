use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use lendpool_core::errors::{EntityKind, Error};
use lendpool_core::investments::InvestmentLogEntry;
use lendpool_core::ledger::{
    LedgerRepositoryTrait, LedgerStoreTrait, LedgerUnitOfWork, PartnerProduct, Product,
    ProductUpdate, SubTransaction, Transaction,
};
use lendpool_core::Result;

use super::model::ProductChangesDB;
use super::queries;
use super::unit_of_work::SqliteUnitOfWork;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::products;

/// SQLite-backed ledger.
///
/// Units of work go through the single writer, each in its own IMMEDIATE
/// transaction. Reads use pooled connections and only see committed units.
pub struct SqliteLedgerStore {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SqliteLedgerStore {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        SqliteLedgerStore { pool, writer }
    }
}

#[async_trait]
impl LedgerStoreTrait for SqliteLedgerStore {
    async fn atomic<F, T>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerUnitOfWork) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<T> {
                let mut uow = SqliteUnitOfWork::new(conn);
                work(&mut uow)
            })
            .await
    }
}

#[async_trait]
impl LedgerRepositoryTrait for SqliteLedgerStore {
    fn get_product(&self, product_id: &str) -> Result<Product> {
        let mut conn = get_connection(&self.pool)?;
        queries::load_product(&mut conn, product_id)
    }

    fn list_products(&self) -> Result<Vec<Product>> {
        let mut conn = get_connection(&self.pool)?;
        queries::load_products(&mut conn)
    }

    fn list_products_for_partner(&self, partner_id: &str) -> Result<Vec<Product>> {
        let mut conn = get_connection(&self.pool)?;
        queries::load_products_for_partner(&mut conn, partner_id)
    }

    fn list_transactions(&self, product_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        queries::load_transactions(&mut conn, product_id)
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        queries::load_transaction(&mut conn, transaction_id)
    }

    fn list_sub_transactions(&self, transaction_id: &str) -> Result<Vec<SubTransaction>> {
        let mut conn = get_connection(&self.pool)?;
        queries::load_sub_transactions(&mut conn, transaction_id)
    }

    fn list_allocations(&self, product_id: &str) -> Result<Vec<PartnerProduct>> {
        let mut conn = get_connection(&self.pool)?;
        queries::load_allocations(&mut conn, product_id)
    }

    fn list_investment_entries(&self, partner_id: &str) -> Result<Vec<InvestmentLogEntry>> {
        let mut conn = get_connection(&self.pool)?;
        queries::load_investment_entries(&mut conn, partner_id)
    }

    async fn update_product(&self, update: ProductUpdate) -> Result<Product> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Product> {
                let changes = ProductChangesDB {
                    name: update.name,
                    description: update.description,
                    remaining_months: update.remaining_months,
                };
                let updated = diesel::update(products::table.find(&update.id))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(Error::not_found(EntityKind::Product, update.id));
                }
                queries::load_product(conn, &update.id)
            })
            .await
    }
}
