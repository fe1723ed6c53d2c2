use log::info;
use std::sync::Arc;

use super::clients_model::{Client, ClientUpdate, NewClient};
use super::clients_traits::{ClientDirectoryTrait, ClientRepositoryTrait, ClientServiceTrait};
use crate::errors::{EntityKind, Error, Result};

/// Service for the client directory.
pub struct ClientService {
    repository: Arc<dyn ClientRepositoryTrait>,
}

impl ClientService {
    pub fn new(repository: Arc<dyn ClientRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl ClientServiceTrait for ClientService {
    async fn create_client(&self, new_client: NewClient) -> Result<Client> {
        new_client.validate()?;
        let client = self.repository.create(new_client).await?;
        info!("Client {} created", client.id);
        Ok(client)
    }

    async fn update_client(&self, update: ClientUpdate) -> Result<Client> {
        update.validate()?;
        self.repository.update(update).await
    }

    async fn delete_client(&self, client_id: &str) -> Result<()> {
        if self.repository.delete(client_id).await? == 0 {
            return Err(Error::not_found(EntityKind::Client, client_id));
        }
        Ok(())
    }

    fn get_client(&self, client_id: &str) -> Result<Client> {
        self.repository.get_by_id(client_id)
    }

    fn list_clients(&self) -> Result<Vec<Client>> {
        self.repository.list()
    }
}

impl ClientDirectoryTrait for ClientService {
    fn client_exists(&self, client_id: &str) -> Result<bool> {
        self.repository.exists(client_id)
    }
}
