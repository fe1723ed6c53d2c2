//! Shared fixture: a migrated ledger database in a temporary directory.

#![allow(dead_code)]

use rust_decimal::Decimal;
use std::sync::Arc;
use tempfile::TempDir;

use lendpool_core::clients::{ClientService, ClientServiceTrait, NewClient};
use lendpool_core::investments::InvestmentService;
use lendpool_core::partners::{NewPartner, PartnerService, PartnerServiceTrait};
use lendpool_core::products::{NewProduct, ProductService};
use lendpool_core::rates::{InterestRateService, InterestRateServiceTrait};
use lendpool_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, ClientRepository, DbPool,
    InterestRateRepository, PartnerRepository, SqliteLedgerStore, StorageConfig,
};

pub struct Ledger {
    // Keeps the database directory alive for the test.
    _dir: TempDir,
    pub pool: Arc<DbPool>,
    pub store: Arc<SqliteLedgerStore>,
    pub partners: PartnerService,
    pub clients: Arc<ClientService>,
    pub rates: Arc<InterestRateService>,
    pub products: ProductService<SqliteLedgerStore>,
    pub investments: InvestmentService<SqliteLedgerStore>,
}

pub async fn setup() -> Ledger {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::new(dir.path().to_str().unwrap());
    init(&config).unwrap();
    let pool = create_pool(&config).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone());

    let store = Arc::new(SqliteLedgerStore::new(pool.clone(), writer.clone()));
    let partners = PartnerService::new(Arc::new(PartnerRepository::new(
        pool.clone(),
        writer.clone(),
    )));
    let clients = Arc::new(ClientService::new(Arc::new(ClientRepository::new(
        pool.clone(),
        writer.clone(),
    ))));
    let rates = Arc::new(InterestRateService::new(Arc::new(
        InterestRateRepository::new(pool.clone(), writer.clone()),
    )));
    let products = ProductService::new(store.clone(), clients.clone(), rates.clone());
    let investments = InvestmentService::new(store.clone());

    Ledger {
        _dir: dir,
        pool,
        store,
        partners,
        clients,
        rates,
        products,
        investments,
    }
}

pub fn new_partner(id: &str, capital: Decimal) -> NewPartner {
    NewPartner {
        id: id.to_string(),
        name: format!("Partner {}", id),
        phone_number: "0100000000".to_string(),
        address: "Cairo".to_string(),
        description: None,
        profession: Some("Trader".to_string()),
        capital,
    }
}

pub fn new_client(id: &str) -> NewClient {
    NewClient {
        id: id.to_string(),
        name: format!("Client {}", id),
        phone_number: "0111111111".to_string(),
        address: "Giza".to_string(),
        description: None,
        profession: None,
        credit_limit: None,
    }
}

pub fn fridge(client_id: &str) -> NewProduct {
    NewProduct {
        name: Some("Fridge".to_string()),
        cost: Decimal::from(500),
        cash_price: Decimal::from(1200),
        cash_paid: Decimal::ZERO,
        duration: 2,
        client_id: client_id.to_string(),
        description: None,
    }
}

/// Two partners A(600) and B(400), client C-1, rate 0.01.
pub async fn seed_scenario(ledger: &Ledger) {
    ledger
        .partners
        .create_partners(vec![
            new_partner("A", Decimal::from(600)),
            new_partner("B", Decimal::from(400)),
        ])
        .await
        .unwrap();
    ledger.clients.create_client(new_client("C-1")).await.unwrap();
    ledger
        .rates
        .set_rate(Decimal::new(1, 2))
        .await
        .unwrap();
}
