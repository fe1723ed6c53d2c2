mod model;
mod repository;

pub use model::{ClientChangesDB, ClientDB};
pub use repository::ClientRepository;
