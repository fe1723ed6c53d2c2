use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use lendpool_core::rates::{InterestRate, InterestRateRepositoryTrait};
use lendpool_core::utils::time_utils::now_naive;
use lendpool_core::Result;

use super::model::InterestRateDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::interest_rates;

pub struct InterestRateRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl InterestRateRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        InterestRateRepository { pool, writer }
    }
}

#[async_trait]
impl InterestRateRepositoryTrait for InterestRateRepository {
    fn get_current(&self) -> Result<Option<InterestRate>> {
        let mut conn = get_connection(&self.pool)?;
        let row = interest_rates::table
            .order(interest_rates::last_updated.desc())
            .select(InterestRateDB::as_select())
            .first::<InterestRateDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(InterestRate::try_from).transpose()?)
    }

    async fn replace(&self, rate: Decimal) -> Result<InterestRate> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<InterestRate> {
                diesel::delete(interest_rates::table)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let row = InterestRateDB {
                    id: Uuid::new_v4().to_string(),
                    rate: rate.to_string(),
                    last_updated: now_naive(),
                };
                diesel::insert_into(interest_rates::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(InterestRate::try_from(row)?)
            })
            .await
    }
}
