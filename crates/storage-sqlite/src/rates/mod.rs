mod model;
mod repository;

pub use model::InterestRateDB;
pub use repository::InterestRateRepository;
