mod model;
mod queries;
mod store;
mod unit_of_work;

pub use model::{
    InvestmentLogDB, PartnerProductDB, ProductChangesDB, ProductDB, SubTransactionDB,
    TransactionDB,
};
pub use store::SqliteLedgerStore;
pub use unit_of_work::SqliteUnitOfWork;
