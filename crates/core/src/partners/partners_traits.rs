//! Partner repository and service traits.

use async_trait::async_trait;

use super::partners_model::{NewPartner, Partner, PartnerUpdate};
use crate::errors::Result;

/// Persistence contract for partner records outside of ledger units of work.
///
/// Balance columns are only ever written through
/// [`LedgerUnitOfWork`](crate::ledger::LedgerUnitOfWork); this repository
/// handles registration and profile data.
#[async_trait]
pub trait PartnerRepositoryTrait: Send + Sync {
    /// Inserts all partners in one transaction; none are stored on failure.
    async fn create_many(&self, partners: Vec<Partner>) -> Result<usize>;

    /// Updates profile fields and returns the stored partner.
    async fn update_profile(&self, update: PartnerUpdate) -> Result<Partner>;

    /// Deletes a partner, returning the number of deleted rows.
    async fn delete(&self, partner_id: &str) -> Result<usize>;

    fn get_by_id(&self, partner_id: &str) -> Result<Partner>;

    /// Lists partners in ascending id order.
    fn list(&self) -> Result<Vec<Partner>>;
}

#[async_trait]
pub trait PartnerServiceTrait: Send + Sync {
    async fn create_partner(&self, new_partner: NewPartner) -> Result<Partner>;

    /// Registers a batch; validation failures are reported per index.
    async fn create_partners(&self, new_partners: Vec<NewPartner>) -> Result<usize>;

    async fn update_partner(&self, update: PartnerUpdate) -> Result<Partner>;

    async fn delete_partner(&self, partner_id: &str) -> Result<()>;

    fn get_partner(&self, partner_id: &str) -> Result<Partner>;

    fn list_partners(&self) -> Result<Vec<Partner>>;
}
