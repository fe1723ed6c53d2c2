//! Interest rate module.

mod rates_model;
mod rates_service;
mod rates_traits;

pub use rates_model::InterestRate;
pub use rates_service::InterestRateService;
pub use rates_traits::{InterestRateRepositoryTrait, InterestRateServiceTrait, RateProviderTrait};
