//! Interest rate repository, provider and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::rates_model::InterestRate;
use crate::errors::Result;

#[async_trait]
pub trait InterestRateRepositoryTrait: Send + Sync {
    fn get_current(&self) -> Result<Option<InterestRate>>;

    /// Replaces the active rate.
    async fn replace(&self, rate: Decimal) -> Result<InterestRate>;
}

/// Source of the rate used when pricing a new product.
///
/// Called once per product creation; implementations must not cache.
pub trait RateProviderTrait: Send + Sync {
    fn current_rate(&self) -> Result<Decimal>;
}

#[async_trait]
pub trait InterestRateServiceTrait: Send + Sync {
    fn get_rate(&self) -> Result<Option<InterestRate>>;
    async fn set_rate(&self, rate: Decimal) -> Result<InterestRate>;
}
