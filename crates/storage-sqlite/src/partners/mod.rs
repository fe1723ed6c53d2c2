mod model;
mod repository;

pub use model::{PartnerBalancesDB, PartnerDB, PartnerProfileDB};
pub use repository::PartnerRepository;

pub(crate) use repository::{load_partner, load_partners, load_partners_by_ids, save_balances};
