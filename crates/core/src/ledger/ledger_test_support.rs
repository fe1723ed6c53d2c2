//! In-memory ledger used by the service tests.
//!
//! Each unit of work runs against a clone of the state and only replaces it
//! on success, so a failing unit leaves nothing behind.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use super::ledger_model::{PartnerProduct, Product, ProductUpdate, SubTransaction, Transaction};
use super::ledger_traits::{LedgerRepositoryTrait, LedgerStoreTrait, LedgerUnitOfWork};
use crate::clients::ClientDirectoryTrait;
use crate::errors::{DatabaseError, EntityKind, Error, Result};
use crate::investments::InvestmentLogEntry;
use crate::partners::{NewPartner, Partner};
use crate::rates::RateProviderTrait;

/// Write operations a test can make fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    SavePartner,
    InsertSubTransactions,
    MarkPaid,
    AppendEntry,
}

#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    pub partners: BTreeMap<String, Partner>,
    pub products: Vec<Product>,
    pub transactions: Vec<Transaction>,
    pub sub_transactions: Vec<SubTransaction>,
    pub allocations: Vec<PartnerProduct>,
    pub investment_log: Vec<InvestmentLogEntry>,
}

#[derive(Default)]
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
    clients: Mutex<HashSet<String>>,
    rate: Mutex<Option<Decimal>>,
    fail_point: Mutex<Option<FailPoint>>,
}

impl InMemoryLedger {
    pub fn with_partners(partners: &[(&str, Decimal)]) -> Self {
        let ledger = Self::default();
        {
            let mut state = ledger.state.lock().unwrap();
            for (id, cash) in partners {
                let partner = NewPartner {
                    id: id.to_string(),
                    name: format!("Partner {}", id),
                    phone_number: "0100000000".to_string(),
                    address: "Cairo".to_string(),
                    description: None,
                    profession: None,
                    capital: *cash,
                }
                .into_partner(NaiveDateTime::default());
                state.partners.insert(partner.id.clone(), partner);
            }
        }
        ledger
    }

    pub fn add_client(&self, client_id: &str) {
        self.clients.lock().unwrap().insert(client_id.to_string());
    }

    pub fn set_rate(&self, rate: Decimal) {
        *self.rate.lock().unwrap() = Some(rate);
    }

    pub fn fail_on(&self, point: FailPoint) {
        *self.fail_point.lock().unwrap() = Some(point);
    }

    pub fn clear_failure(&self) {
        *self.fail_point.lock().unwrap() = None;
    }

    pub fn partner(&self, partner_id: &str) -> Partner {
        self.state.lock().unwrap().partners[partner_id].clone()
    }

    pub fn snapshot(&self) -> LedgerState {
        self.state.lock().unwrap().clone()
    }
}

struct InMemoryUnitOfWork {
    state: LedgerState,
    fail_point: Option<FailPoint>,
}

impl InMemoryUnitOfWork {
    fn check(&self, point: FailPoint) -> Result<()> {
        if self.fail_point == Some(point) {
            return Err(DatabaseError::QueryFailed(format!("injected failure at {:?}", point)).into());
        }
        Ok(())
    }
}

impl LedgerUnitOfWork for InMemoryUnitOfWork {
    fn list_partners(&mut self) -> Result<Vec<Partner>> {
        Ok(self.state.partners.values().cloned().collect())
    }

    fn get_partner(&mut self, partner_id: &str) -> Result<Partner> {
        self.state
            .partners
            .get(partner_id)
            .cloned()
            .ok_or_else(|| Error::not_found(EntityKind::Partner, partner_id))
    }

    fn get_partners(&mut self, partner_ids: &[String]) -> Result<Vec<Partner>> {
        partner_ids.iter().map(|id| self.get_partner(id)).collect()
    }

    fn save_partner_balances(&mut self, partner: &Partner) -> Result<Partner> {
        self.check(FailPoint::SavePartner)?;
        let stored = self
            .state
            .partners
            .get_mut(&partner.id)
            .ok_or_else(|| Error::not_found(EntityKind::Partner, &partner.id))?;
        if stored.version != partner.version {
            return Err(DatabaseError::ConcurrentModification(partner.id.clone()).into());
        }
        stored.cash = partner.cash;
        stored.capital = partner.capital;
        stored.working_capital = partner.working_capital;
        stored.active_inventory_count = partner.active_inventory_count;
        stored.version += 1;
        Ok(stored.clone())
    }

    fn insert_product(&mut self, product: &Product) -> Result<()> {
        self.state.products.push(product.clone());
        Ok(())
    }

    fn get_product(&mut self, product_id: &str) -> Result<Product> {
        find_product(&self.state, product_id)
    }

    fn insert_transactions(&mut self, transactions: &[Transaction]) -> Result<()> {
        self.state.transactions.extend_from_slice(transactions);
        Ok(())
    }

    fn get_transaction(&mut self, transaction_id: &str) -> Result<Transaction> {
        find_transaction(&self.state, transaction_id)
    }

    fn mark_transaction_paid(&mut self, transaction_id: &str) -> Result<()> {
        self.check(FailPoint::MarkPaid)?;
        let transaction = self
            .state
            .transactions
            .iter_mut()
            .find(|t| t.id == transaction_id)
            .ok_or_else(|| Error::not_found(EntityKind::Transaction, transaction_id))?;
        if transaction.is_paid {
            return Err(Error::AlreadyPaid(transaction_id.to_string()));
        }
        transaction.is_paid = true;
        Ok(())
    }

    fn insert_allocations(&mut self, allocations: &[PartnerProduct]) -> Result<()> {
        self.state.allocations.extend_from_slice(allocations);
        Ok(())
    }

    fn list_allocations(&mut self, product_id: &str) -> Result<Vec<PartnerProduct>> {
        Ok(allocations_of(&self.state, product_id))
    }

    fn insert_sub_transactions(&mut self, sub_transactions: &[SubTransaction]) -> Result<()> {
        self.check(FailPoint::InsertSubTransactions)?;
        self.state.sub_transactions.extend_from_slice(sub_transactions);
        Ok(())
    }

    fn append_investment_entry(&mut self, entry: &InvestmentLogEntry) -> Result<()> {
        self.check(FailPoint::AppendEntry)?;
        self.state.investment_log.push(entry.clone());
        Ok(())
    }
}

fn find_product(state: &LedgerState, product_id: &str) -> Result<Product> {
    state
        .products
        .iter()
        .find(|p| p.id == product_id)
        .cloned()
        .ok_or_else(|| Error::not_found(EntityKind::Product, product_id))
}

fn find_transaction(state: &LedgerState, transaction_id: &str) -> Result<Transaction> {
    state
        .transactions
        .iter()
        .find(|t| t.id == transaction_id)
        .cloned()
        .ok_or_else(|| Error::not_found(EntityKind::Transaction, transaction_id))
}

fn allocations_of(state: &LedgerState, product_id: &str) -> Vec<PartnerProduct> {
    let mut allocations: Vec<PartnerProduct> = state
        .allocations
        .iter()
        .filter(|a| a.product_id == product_id)
        .cloned()
        .collect();
    allocations.sort_by(|a, b| a.partner_id.cmp(&b.partner_id));
    allocations
}

#[async_trait]
impl LedgerStoreTrait for InMemoryLedger {
    async fn atomic<F, T>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut dyn LedgerUnitOfWork) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let fail_point = *self.fail_point.lock().unwrap();
        let mut state = self.state.lock().unwrap();
        let mut uow = InMemoryUnitOfWork {
            state: state.clone(),
            fail_point,
        };
        let value = work(&mut uow)?;
        *state = uow.state;
        Ok(value)
    }
}

#[async_trait]
impl LedgerRepositoryTrait for InMemoryLedger {
    fn get_product(&self, product_id: &str) -> Result<Product> {
        find_product(&self.state.lock().unwrap(), product_id)
    }

    fn list_products(&self) -> Result<Vec<Product>> {
        let mut products = self.state.lock().unwrap().products.clone();
        products.reverse();
        Ok(products)
    }

    fn list_products_for_partner(&self, partner_id: &str) -> Result<Vec<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .rev()
            .filter(|p| {
                state
                    .allocations
                    .iter()
                    .any(|a| a.product_id == p.id && a.partner_id == partner_id)
            })
            .cloned()
            .collect())
    }

    fn list_transactions(&self, product_id: &str) -> Result<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .state
            .lock()
            .unwrap()
            .transactions
            .iter()
            .filter(|t| t.product_id == product_id)
            .cloned()
            .collect();
        transactions.sort_by_key(|t| t.sequence);
        Ok(transactions)
    }

    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        find_transaction(&self.state.lock().unwrap(), transaction_id)
    }

    fn list_sub_transactions(&self, transaction_id: &str) -> Result<Vec<SubTransaction>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .sub_transactions
            .iter()
            .filter(|s| s.transaction_id == transaction_id)
            .cloned()
            .collect())
    }

    fn list_allocations(&self, product_id: &str) -> Result<Vec<PartnerProduct>> {
        Ok(allocations_of(&self.state.lock().unwrap(), product_id))
    }

    fn list_investment_entries(&self, partner_id: &str) -> Result<Vec<InvestmentLogEntry>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .investment_log
            .iter()
            .rev()
            .filter(|e| e.partner_id == partner_id)
            .cloned()
            .collect())
    }

    async fn update_product(&self, update: ProductUpdate) -> Result<Product> {
        let mut state = self.state.lock().unwrap();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == update.id)
            .ok_or_else(|| Error::not_found(EntityKind::Product, &update.id))?;
        product.name = update.name;
        product.description = update.description;
        product.remaining_months = update.remaining_months;
        Ok(product.clone())
    }
}

impl ClientDirectoryTrait for InMemoryLedger {
    fn client_exists(&self, client_id: &str) -> Result<bool> {
        Ok(self.clients.lock().unwrap().contains(client_id))
    }
}

impl RateProviderTrait for InMemoryLedger {
    fn current_rate(&self) -> Result<Decimal> {
        Ok(self.rate.lock().unwrap().unwrap_or(Decimal::ZERO))
    }
}
