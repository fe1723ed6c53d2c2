use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use lendpool_core::clients::{Client, ClientRepositoryTrait, ClientUpdate, NewClient};
use lendpool_core::errors::{EntityKind, Error};
use lendpool_core::utils::time_utils::now_naive;
use lendpool_core::Result;

use super::model::{ClientChangesDB, ClientDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::clients;

pub struct ClientRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ClientRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ClientRepository { pool, writer }
    }
}

fn load_client(conn: &mut SqliteConnection, client_id: &str) -> Result<Client> {
    let row = clients::table
        .find(client_id)
        .select(ClientDB::as_select())
        .first::<ClientDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found(EntityKind::Client, client_id))?;
    Ok(Client::try_from(row)?)
}

#[async_trait]
impl ClientRepositoryTrait for ClientRepository {
    async fn create(&self, new_client: NewClient) -> Result<Client> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Client> {
                let row = ClientDB::from_new(new_client, now_naive());
                let inserted = diesel::insert_into(clients::table)
                    .values(&row)
                    .returning(ClientDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Client::try_from(inserted)?)
            })
            .await
    }

    async fn update(&self, update: ClientUpdate) -> Result<Client> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Client> {
                let client_id = update.id.trim().to_string();
                let changes = ClientChangesDB::from_update(update, now_naive());
                let updated = diesel::update(clients::table.find(&client_id))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(Error::not_found(EntityKind::Client, client_id));
                }
                load_client(conn, &client_id)
            })
            .await
    }

    async fn delete(&self, client_id: &str) -> Result<usize> {
        let client_id = client_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(clients::table.find(client_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_by_id(&self, client_id: &str) -> Result<Client> {
        let mut conn = get_connection(&self.pool)?;
        load_client(&mut conn, client_id)
    }

    fn list(&self) -> Result<Vec<Client>> {
        let mut conn = get_connection(&self.pool)?;
        clients::table
            .order(clients::name.asc())
            .select(ClientDB::as_select())
            .load::<ClientDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(|row| Client::try_from(row).map_err(Error::from))
            .collect()
    }

    fn exists(&self, client_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        diesel::select(exists(clients::table.find(client_id)))
            .get_result::<bool>(&mut conn)
            .into_core()
    }
}
