//! LedgerStore contract.
//!
//! Every mutation of ledger state happens inside one
//! [`LedgerStoreTrait::atomic`] call: the closure receives a
//! [`LedgerUnitOfWork`], and either all of its writes are committed or none
//! are. Reads outside of units of work go through [`LedgerRepositoryTrait`].

use async_trait::async_trait;

use super::ledger_model::{PartnerProduct, Product, ProductUpdate, SubTransaction, Transaction};
use crate::errors::Result;
use crate::investments::InvestmentLogEntry;
use crate::partners::Partner;

/// Reads and writes available inside a single atomic unit of work.
///
/// Implementations must serialize units that touch the same partner row, so
/// that balances read here are not stale when written back.
pub trait LedgerUnitOfWork {
    /// All partners in ascending id order.
    fn list_partners(&mut self) -> Result<Vec<Partner>>;

    fn get_partner(&mut self, partner_id: &str) -> Result<Partner>;

    /// Loads the given partners, failing with `NotFound` if any is missing.
    fn get_partners(&mut self, partner_ids: &[String]) -> Result<Vec<Partner>>;

    /// Writes cash, capital, working capital and inventory count.
    ///
    /// Fails with `ConcurrentModification` when the stored version differs
    /// from `partner.version`. Returns the partner with its new version.
    fn save_partner_balances(&mut self, partner: &Partner) -> Result<Partner>;

    fn insert_product(&mut self, product: &Product) -> Result<()>;

    fn get_product(&mut self, product_id: &str) -> Result<Product>;

    fn insert_transactions(&mut self, transactions: &[Transaction]) -> Result<()>;

    fn get_transaction(&mut self, transaction_id: &str) -> Result<Transaction>;

    /// Flips `is_paid` from false to true; `AlreadyPaid` if it was already set.
    fn mark_transaction_paid(&mut self, transaction_id: &str) -> Result<()>;

    fn insert_allocations(&mut self, allocations: &[PartnerProduct]) -> Result<()>;

    fn list_allocations(&mut self, product_id: &str) -> Result<Vec<PartnerProduct>>;

    fn insert_sub_transactions(&mut self, sub_transactions: &[SubTransaction]) -> Result<()>;

    fn append_investment_entry(&mut self, entry: &InvestmentLogEntry) -> Result<()>;
}

/// Atomic multi-entity commits against the ledger.
#[async_trait]
pub trait LedgerStoreTrait: Send + Sync {
    /// Runs `work` as one unit. An `Err` from `work` rolls back every write it
    /// made and is returned unchanged.
    async fn atomic<F, T>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerUnitOfWork) -> Result<T> + Send + 'static,
        T: Send + 'static;
}

/// Read-side lookups by id and by foreign key.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    fn get_product(&self, product_id: &str) -> Result<Product>;

    /// Products, newest first.
    fn list_products(&self) -> Result<Vec<Product>>;

    /// Products the partner holds an allocation in.
    fn list_products_for_partner(&self, partner_id: &str) -> Result<Vec<Product>>;

    /// Schedule of a product ordered by sequence (funding first).
    fn list_transactions(&self, product_id: &str) -> Result<Vec<Transaction>>;

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    fn list_sub_transactions(&self, transaction_id: &str) -> Result<Vec<SubTransaction>>;

    fn list_allocations(&self, product_id: &str) -> Result<Vec<PartnerProduct>>;

    /// Deposits and withdrawals of a partner, newest first.
    fn list_investment_entries(&self, partner_id: &str) -> Result<Vec<InvestmentLogEntry>>;

    async fn update_product(&self, update: ProductUpdate) -> Result<Product>;
}
