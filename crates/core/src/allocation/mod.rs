//! Allocation engine - splits a product's cost across the partner pool.

mod allocation_engine;
mod allocation_model;

pub use allocation_engine::AllocationEngine;
pub use allocation_model::{
    AllocationPlan, AllocationPolicy, AllocationRecords, PartnerShare, SkippedPartner,
};
