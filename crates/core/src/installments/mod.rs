//! Installment processing - pays one scheduled installment out to partners.

mod installment_model;
mod installment_processor;

pub use installment_model::{InstallmentSplit, PartnerInstallmentShare};
pub use installment_processor::InstallmentProcessor;
