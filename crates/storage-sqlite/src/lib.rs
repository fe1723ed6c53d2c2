//! SQLite storage implementation for the lending pool ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `lendpool-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The atomic ledger store and repository implementations
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod config;
pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod clients;
pub mod ledger;
pub mod partners;
pub mod rates;

// Re-export database utilities
pub use config::StorageConfig;
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use clients::ClientRepository;
pub use ledger::SqliteLedgerStore;
pub use partners::PartnerRepository;
pub use rates::InterestRateRepository;

// Re-export from lendpool-core for convenience
pub use lendpool_core::errors::{DatabaseError, Error, Result};
