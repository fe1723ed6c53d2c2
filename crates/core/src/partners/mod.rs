//! Partners module - domain models, services, and traits.

mod partners_model;
mod partners_service;
mod partners_traits;


pub use partners_model::{NewPartner, Partner, PartnerUpdate};
pub use partners_service::PartnerService;
pub use partners_traits::{PartnerRepositoryTrait, PartnerServiceTrait};
