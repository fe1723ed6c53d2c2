//! Products module - financing, installment payment and the product read side.

mod products_model;
mod products_service;
mod products_traits;

#[cfg(test)]
mod products_service_tests;

pub use products_model::{
    build_schedule, CreateProductResult, NewProduct, PayInstallmentResult, ProductPricing,
};
pub use products_service::ProductService;
pub use products_traits::ProductServiceTrait;
