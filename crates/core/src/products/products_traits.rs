use async_trait::async_trait;

use super::products_model::{CreateProductResult, NewProduct, PayInstallmentResult};
use crate::errors::Result;
use crate::ledger::{PartnerProduct, Product, ProductUpdate, SubTransaction, Transaction};

/// Product financing, installment payment and the product read side.
#[async_trait]
pub trait ProductServiceTrait: Send + Sync {
    /// Prices the product, writes its schedule and funds it from the partner
    /// pool in one unit of work.
    async fn create_product(&self, new_product: NewProduct) -> Result<CreateProductResult>;

    /// Pays one installment out to the product's partners.
    async fn pay_installment(&self, transaction_id: &str) -> Result<PayInstallmentResult>;

    async fn update_product(&self, update: ProductUpdate) -> Result<Product>;

    fn get_product(&self, product_id: &str) -> Result<Product>;
    fn list_products(&self) -> Result<Vec<Product>>;
    fn list_products_for_partner(&self, partner_id: &str) -> Result<Vec<Product>>;
    fn get_schedule(&self, product_id: &str) -> Result<Vec<Transaction>>;
    fn list_sub_transactions(&self, transaction_id: &str) -> Result<Vec<SubTransaction>>;
    fn list_allocations(&self, product_id: &str) -> Result<Vec<PartnerProduct>>;
}
