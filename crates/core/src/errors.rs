//! Core error types for the lending pool ledger.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger entities that can be looked up by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Partner,
    Client,
    Product,
    Transaction,
    InterestRate,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Partner => "Partner",
            EntityKind::Client => "Client",
            EntityKind::Product => "Product",
            EntityKind::Transaction => "Transaction",
            EntityKind::InterestRate => "Interest rate",
        };
        f.write_str(name)
    }
}

/// Root error type for the ledger.
///
/// Database-specific errors are wrapped in string form to keep this type
/// database-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} '{id}' not found")]
    NotFound { entity: EntityKind, id: String },

    #[error("Insufficient pool cash: requested {requested}, available {available}")]
    InsufficientPool {
        requested: Decimal,
        available: Decimal,
    },

    #[error(
        "Insufficient funds for partner {partner_id}: requested {requested}, available {available}"
    )]
    InsufficientFunds {
        partner_id: String,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Transaction {0} is already paid")]
    AlreadyPaid(String),

    #[error("Product {0} has no partner allocations")]
    NoAllocation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Classifies the error for callers that only need the failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Database(DatabaseError::NotFound(_)) => ErrorKind::NotFound,
            Error::Database(_) => ErrorKind::Persistence,
            Error::Validation(_) => ErrorKind::Validation,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::InsufficientPool { .. } => ErrorKind::InsufficientPool,
            Error::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Error::AlreadyPaid(_) => ErrorKind::AlreadyPaid,
            Error::NoAllocation(_) => ErrorKind::NoAllocation,
            Error::Unexpected(_) => ErrorKind::Persistence,
        }
    }
}

/// Failure categories exposed to the request-handling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Validation,
    NotFound,
    InsufficientPool,
    InsufficientFunds,
    AlreadyPaid,
    NoAllocation,
    Persistence,
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A row changed between read and write inside a unit of work.
    #[error("Concurrent modification of {0}")]
    ConcurrentModification(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be decoded.
    #[error("Corrupt stored value: {0}")]
    CorruptValue(String),
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{}", format_field_errors(.0))]
    Fields(Vec<FieldError>),
}

impl ValidationError {
    /// Field-level errors carried by this validation failure, if any.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ValidationError::Fields(errors) => errors,
            _ => &[],
        }
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collects field errors and turns them into a single validation failure.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn require_non_empty(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "must not be empty");
        }
    }

    pub fn require_positive(&mut self, field: &str, value: Decimal) {
        if value <= Decimal::ZERO {
            self.push(field, "must be greater than zero");
        }
    }

    pub fn require_non_negative(&mut self, field: &str, value: Decimal) {
        if value < Decimal::ZERO {
            self.push(field, "must not be negative");
        }
    }

    /// Appends `other` with every field name prefixed by `[index].`.
    pub fn extend_indexed(&mut self, index: usize, other: FieldErrors) {
        self.0.extend(
            other
                .0
                .into_iter()
                .map(|e| FieldError::new(format!("[{}].{}", index, e.field), e.message)),
        );
    }

    /// `Ok(())` when nothing was collected.
    pub fn finish(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(ValidationError::Fields(self.0)))
        }
    }
}
