use log::{info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::rates_model::InterestRate;
use super::rates_traits::{InterestRateRepositoryTrait, InterestRateServiceTrait, RateProviderTrait};
use crate::errors::{FieldErrors, Result};

pub struct InterestRateService {
    repository: Arc<dyn InterestRateRepositoryTrait>,
}

impl InterestRateService {
    pub fn new(repository: Arc<dyn InterestRateRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl InterestRateServiceTrait for InterestRateService {
    fn get_rate(&self) -> Result<Option<InterestRate>> {
        self.repository.get_current()
    }

    async fn set_rate(&self, rate: Decimal) -> Result<InterestRate> {
        let mut errors = FieldErrors::new();
        errors.require_non_negative("rate", rate);
        errors.finish()?;

        let stored = self.repository.replace(rate).await?;
        info!("Interest rate set to {}", stored.rate);
        Ok(stored)
    }
}

impl RateProviderTrait for InterestRateService {
    fn current_rate(&self) -> Result<Decimal> {
        match self.repository.get_current()? {
            Some(rate) => Ok(rate.rate),
            None => {
                warn!("No interest rate configured, pricing with a zero rate");
                Ok(Decimal::ZERO)
            }
        }
    }
}
