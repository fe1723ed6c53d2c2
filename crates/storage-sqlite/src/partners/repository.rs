use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use lendpool_core::errors::{DatabaseError, EntityKind, Error};
use lendpool_core::partners::{Partner, PartnerRepositoryTrait, PartnerUpdate};
use lendpool_core::utils::time_utils::now_naive;
use lendpool_core::Result;

use super::model::{PartnerBalancesDB, PartnerDB, PartnerProfileDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::partners;
use crate::utils::chunk_for_sqlite;

pub struct PartnerRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PartnerRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        PartnerRepository { pool, writer }
    }
}

pub(crate) fn load_partner(conn: &mut SqliteConnection, partner_id: &str) -> Result<Partner> {
    let row = partners::table
        .find(partner_id)
        .select(PartnerDB::as_select())
        .first::<PartnerDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found(EntityKind::Partner, partner_id))?;
    Ok(Partner::try_from(row)?)
}

pub(crate) fn load_partners(conn: &mut SqliteConnection) -> Result<Vec<Partner>> {
    partners::table
        .order(partners::id.asc())
        .select(PartnerDB::as_select())
        .load::<PartnerDB>(conn)
        .into_core()?
        .into_iter()
        .map(|row| Partner::try_from(row).map_err(Error::from))
        .collect()
}

/// Loads `partner_ids` in the given order; any missing id is `NotFound`.
pub(crate) fn load_partners_by_ids(
    conn: &mut SqliteConnection,
    partner_ids: &[String],
) -> Result<Vec<Partner>> {
    let mut found = Vec::with_capacity(partner_ids.len());
    for chunk in chunk_for_sqlite(partner_ids) {
        let rows = partners::table
            .filter(partners::id.eq_any(chunk))
            .select(PartnerDB::as_select())
            .load::<PartnerDB>(conn)
            .into_core()?;
        for row in rows {
            found.push(Partner::try_from(row)?);
        }
    }
    partner_ids
        .iter()
        .map(|id| {
            found
                .iter()
                .find(|p| &p.id == id)
                .cloned()
                .ok_or_else(|| Error::not_found(EntityKind::Partner, id))
        })
        .collect()
}

/// Writes balances if the stored version still matches `partner.version`.
pub(crate) fn save_balances(conn: &mut SqliteConnection, partner: &Partner) -> Result<Partner> {
    let changes = PartnerBalancesDB::next_version(partner, now_naive());
    let updated = diesel::update(
        partners::table
            .filter(partners::id.eq(&partner.id))
            .filter(partners::version.eq(partner.version)),
    )
    .set(&changes)
    .execute(conn)
    .into_core()?;

    if updated == 0 {
        // Distinguish a missing row from a stale version.
        load_partner(conn, &partner.id)?;
        return Err(DatabaseError::ConcurrentModification(format!("partner {}", partner.id)).into());
    }
    load_partner(conn, &partner.id)
}

#[async_trait]
impl PartnerRepositoryTrait for PartnerRepository {
    async fn create_many(&self, new_partners: Vec<Partner>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let rows: Vec<PartnerDB> = new_partners.iter().map(PartnerDB::from).collect();
                let mut inserted = 0;
                for chunk in chunk_for_sqlite(&rows) {
                    inserted += diesel::insert_into(partners::table)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(inserted)
            })
            .await
    }

    async fn update_profile(&self, update: PartnerUpdate) -> Result<Partner> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Partner> {
                let partner_id = update.id.clone();
                let changes = PartnerProfileDB::from_update(update, now_naive());
                let updated = diesel::update(partners::table.find(&partner_id))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(Error::not_found(EntityKind::Partner, partner_id));
                }
                load_partner(conn, &partner_id)
            })
            .await
    }

    async fn delete(&self, partner_id: &str) -> Result<usize> {
        let partner_id = partner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(partners::table.find(partner_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, partner_id: &str) -> Result<Partner> {
        let mut conn = get_connection(&self.pool)?;
        load_partner(&mut conn, partner_id)
    }

    fn list(&self) -> Result<Vec<Partner>> {
        let mut conn = get_connection(&self.pool)?;
        load_partners(&mut conn)
    }
}
