//! Lendpool Core - domain entities, engines, services, and traits.
//!
//! This crate holds the ledger logic of a partner-funded lending pool: how a
//! product's cost is split across partner cash, and how each installment is
//! paid back out. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod allocation;
pub mod clients;
pub mod constants;
pub mod errors;
pub mod installments;
pub mod investments;
pub mod ledger;
pub mod partners;
pub mod products;
pub mod rates;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
