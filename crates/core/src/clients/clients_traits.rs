//! Client repository, directory and service traits.

use async_trait::async_trait;

use super::clients_model::{Client, ClientUpdate, NewClient};
use crate::errors::Result;

#[async_trait]
pub trait ClientRepositoryTrait: Send + Sync {
    async fn create(&self, new_client: NewClient) -> Result<Client>;
    async fn update(&self, update: ClientUpdate) -> Result<Client>;
    async fn delete(&self, client_id: &str) -> Result<usize>;
    fn get_by_id(&self, client_id: &str) -> Result<Client>;
    fn list(&self) -> Result<Vec<Client>>;
    fn exists(&self, client_id: &str) -> Result<bool>;
}

/// Existence check consumed by product creation.
pub trait ClientDirectoryTrait: Send + Sync {
    fn client_exists(&self, client_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait ClientServiceTrait: Send + Sync {
    async fn create_client(&self, new_client: NewClient) -> Result<Client>;
    async fn update_client(&self, update: ClientUpdate) -> Result<Client>;
    async fn delete_client(&self, client_id: &str) -> Result<()>;
    fn get_client(&self, client_id: &str) -> Result<Client>;
    fn list_clients(&self) -> Result<Vec<Client>>;
}
