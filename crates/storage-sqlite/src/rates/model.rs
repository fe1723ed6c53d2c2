//! Database model for the interest rate.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use lendpool_core::rates::InterestRate;

use crate::errors::StorageError;
use crate::utils::parse_decimal;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::interest_rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InterestRateDB {
    pub id: String,
    pub rate: String,
    pub last_updated: NaiveDateTime,
}

impl TryFrom<InterestRateDB> for InterestRate {
    type Error = StorageError;

    fn try_from(db: InterestRateDB) -> Result<Self, Self::Error> {
        Ok(Self {
            rate: parse_decimal("interest_rates.rate", &db.rate)?,
            id: db.id,
            last_updated: db.last_updated,
        })
    }
}
