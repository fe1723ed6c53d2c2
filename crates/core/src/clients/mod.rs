//! Clients module - the directory of borrowers.

mod clients_model;
mod clients_service;
mod clients_traits;

pub use clients_model::{Client, ClientUpdate, NewClient};
pub use clients_service::ClientService;
pub use clients_traits::{ClientDirectoryTrait, ClientRepositoryTrait, ClientServiceTrait};
