use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;

use super::partners_model::{NewPartner, Partner, PartnerUpdate};
use super::partners_traits::{PartnerRepositoryTrait, PartnerServiceTrait};
use crate::errors::{EntityKind, Error, FieldErrors, Result};
use crate::utils::time_utils::now_naive;

/// Service for registering and maintaining partners.
pub struct PartnerService {
    repository: Arc<dyn PartnerRepositoryTrait>,
}

impl PartnerService {
    pub fn new(repository: Arc<dyn PartnerRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl PartnerServiceTrait for PartnerService {
    async fn create_partner(&self, new_partner: NewPartner) -> Result<Partner> {
        new_partner.validate()?;
        let partner = new_partner.into_partner(now_naive());
        debug!(
            "Registering partner {} with capital {}",
            partner.id, partner.capital
        );
        self.repository.create_many(vec![partner.clone()]).await?;
        info!("Partner {} registered", partner.id);
        Ok(partner)
    }

    async fn create_partners(&self, new_partners: Vec<NewPartner>) -> Result<usize> {
        let mut errors = FieldErrors::new();
        if new_partners.is_empty() {
            errors.push("partners", "must contain at least one partner");
        }

        let mut seen = HashSet::new();
        for (index, partner) in new_partners.iter().enumerate() {
            let mut partner_errors = partner.field_errors();
            if !seen.insert(partner.id.trim().to_string()) {
                partner_errors.push("id", "is duplicated within the batch");
            }
            errors.extend_indexed(index, partner_errors);
        }
        errors.finish()?;

        let now = now_naive();
        let partners: Vec<Partner> = new_partners
            .into_iter()
            .map(|p| p.into_partner(now))
            .collect();
        let inserted = self.repository.create_many(partners).await?;
        info!("Registered {} partners", inserted);
        Ok(inserted)
    }

    async fn update_partner(&self, update: PartnerUpdate) -> Result<Partner> {
        update.validate()?;
        self.repository.update_profile(update).await
    }

    async fn delete_partner(&self, partner_id: &str) -> Result<()> {
        let deleted = self.repository.delete(partner_id).await?;
        if deleted == 0 {
            return Err(Error::not_found(EntityKind::Partner, partner_id));
        }
        info!("Partner {} deleted", partner_id);
        Ok(())
    }

    fn get_partner(&self, partner_id: &str) -> Result<Partner> {
        self.repository.get_by_id(partner_id)
    }

    fn list_partners(&self) -> Result<Vec<Partner>> {
        self.repository.list()
    }
}
