//! Ledger module - product schedule entities and the atomic store contract.

mod ledger_model;
mod ledger_traits;

#[cfg(test)]
pub(crate) mod ledger_test_support;

pub use ledger_model::{
    new_ledger_id, PartnerProduct, Product, ProductUpdate, SubTransaction, Transaction,
};
pub use ledger_traits::{LedgerRepositoryTrait, LedgerStoreTrait, LedgerUnitOfWork};
