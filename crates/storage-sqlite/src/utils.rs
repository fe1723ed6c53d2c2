//! Utility functions for SQLite storage operations.
//!
//! Chunking helpers to stay under SQLite's parameter limit, and strict
//! decimal decoding for amounts stored as TEXT.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;

/// Maximum number of parameters for SQLite IN (...) queries.
///
/// SQLite has a compile-time limit on the number of parameters in a SQL statement,
/// typically around 999 (SQLITE_MAX_VARIABLE_NUMBER). We use 500 to leave room
/// for other parameters in the query.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Chunk a slice into smaller slices for batch SQLite queries.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Decodes a stored decimal. A malformed value is an error, never zero.
pub fn parse_decimal(column: &str, value: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value.trim())
        .map_err(|e| StorageError::CorruptValue(format!("{} = '{}': {}", column, value, e)))
}

pub fn parse_optional_decimal(
    column: &str,
    value: Option<&str>,
) -> Result<Option<Decimal>, StorageError> {
    value.map(|v| parse_decimal(column, v)).transpose()
}
