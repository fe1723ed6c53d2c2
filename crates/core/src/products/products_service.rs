use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::products_model::{build_schedule, CreateProductResult, NewProduct, PayInstallmentResult};
use super::products_traits::ProductServiceTrait;
use crate::allocation::{AllocationEngine, AllocationPolicy};
use crate::clients::ClientDirectoryTrait;
use crate::errors::{EntityKind, Error, FieldErrors, Result};
use crate::installments::InstallmentProcessor;
use crate::ledger::{
    LedgerRepositoryTrait, LedgerStoreTrait, PartnerProduct, Product, ProductUpdate,
    SubTransaction, Transaction,
};
use crate::rates::RateProviderTrait;
use crate::utils::time_utils::now_naive;

/// Finances products from the partner pool and pays their installments out.
pub struct ProductService<S> {
    ledger: Arc<S>,
    clients: Arc<dyn ClientDirectoryTrait>,
    rates: Arc<dyn RateProviderTrait>,
    engine: AllocationEngine,
    processor: InstallmentProcessor,
}

impl<S> ProductService<S>
where
    S: LedgerStoreTrait + LedgerRepositoryTrait + 'static,
{
    pub fn new(
        ledger: Arc<S>,
        clients: Arc<dyn ClientDirectoryTrait>,
        rates: Arc<dyn RateProviderTrait>,
    ) -> Self {
        Self::with_policy(ledger, clients, rates, AllocationPolicy::default())
    }

    pub fn with_policy(
        ledger: Arc<S>,
        clients: Arc<dyn ClientDirectoryTrait>,
        rates: Arc<dyn RateProviderTrait>,
        policy: AllocationPolicy,
    ) -> Self {
        Self {
            ledger,
            clients,
            rates,
            engine: AllocationEngine::new(policy),
            processor: InstallmentProcessor::new(),
        }
    }
}

#[async_trait::async_trait]
impl<S> ProductServiceTrait for ProductService<S>
where
    S: LedgerStoreTrait + LedgerRepositoryTrait + 'static,
{
    async fn create_product(&self, new_product: NewProduct) -> Result<CreateProductResult> {
        new_product.validate()?;
        if !self.clients.client_exists(new_product.client_id.trim())? {
            return Err(Error::not_found(
                EntityKind::Client,
                new_product.client_id.trim(),
            ));
        }

        let rate = self.rates.current_rate()?;
        let product = new_product.into_product(rate, now_naive());
        let schedule = build_schedule(&product);
        debug!(
            "Pricing product {} at rate {}: total {}, {} x {}",
            product.id, rate, product.total_price, product.duration, product.installment
        );

        let engine = self.engine;
        let result = self
            .ledger
            .atomic(move |uow| {
                let partners = uow.list_partners()?;
                let plan = engine.plan(product.cost, &partners)?;
                if plan.shares.is_empty() {
                    return Err(Error::InsufficientPool {
                        requested: product.cost,
                        available: Decimal::ZERO,
                    });
                }

                uow.insert_product(&product)?;
                uow.insert_transactions(&schedule)?;

                let funding = schedule.first().ok_or_else(|| {
                    Error::Unexpected(format!("Product {} has no funding transaction", product.id))
                })?;
                let records = engine.apply(&plan, funding, &partners)?;
                for partner in &records.partners {
                    uow.save_partner_balances(partner)?;
                }
                uow.insert_allocations(&records.allocations)?;
                uow.insert_sub_transactions(&records.sub_transactions)?;

                Ok(CreateProductResult::from_plan(&product.id, &plan))
            })
            .await?;

        if !result.skipped_partners.is_empty() {
            warn!(
                "Product {} is under-funded by {} ({} partner(s) skipped)",
                result.product_id,
                result.shortfall,
                result.skipped_partners.len()
            );
        }
        info!(
            "Product {} funded by {} partner(s) for {}",
            result.product_id, result.funded_partner_count, result.allocated_total
        );
        Ok(result)
    }

    async fn pay_installment(&self, transaction_id: &str) -> Result<PayInstallmentResult> {
        let mut errors = FieldErrors::new();
        errors.require_non_empty("transactionId", transaction_id);
        errors.finish()?;

        let transaction_id = transaction_id.trim().to_string();
        let processor = self.processor;
        let result = self
            .ledger
            .atomic(move |uow| {
                let transaction = uow.get_transaction(&transaction_id)?;
                processor.ensure_payable(&transaction)?;
                let product = uow.get_product(&transaction.product_id)?;
                let allocations = uow.list_allocations(&product.id)?;
                let split = processor.split(&product, &transaction, &allocations)?;

                let partners = uow.get_partners(&split.partner_ids())?;
                for partner in processor.apply(&split, &partners)? {
                    uow.save_partner_balances(&partner)?;
                }
                uow.insert_sub_transactions(&split.sub_transactions())?;
                uow.mark_transaction_paid(&transaction.id)?;

                Ok(PayInstallmentResult {
                    transaction_id: transaction.id,
                    product_id: product.id,
                    sub_transaction_count: split.shares.len(),
                    total_principal: split.total_principal(),
                    total_interest: split.total_interest(),
                })
            })
            .await?;

        info!(
            "Installment {} of product {} paid to {} partner(s): principal {}, interest {}",
            result.transaction_id,
            result.product_id,
            result.sub_transaction_count,
            result.total_principal,
            result.total_interest
        );
        Ok(result)
    }

    async fn update_product(&self, update: ProductUpdate) -> Result<Product> {
        update.validate()?;
        let product = self.ledger.update_product(update).await?;
        info!("Product {} updated", product.id);
        Ok(product)
    }

    fn get_product(&self, product_id: &str) -> Result<Product> {
        self.ledger.get_product(product_id)
    }

    fn list_products(&self) -> Result<Vec<Product>> {
        self.ledger.list_products()
    }

    fn list_products_for_partner(&self, partner_id: &str) -> Result<Vec<Product>> {
        self.ledger.list_products_for_partner(partner_id)
    }

    fn get_schedule(&self, product_id: &str) -> Result<Vec<Transaction>> {
        let product = self.ledger.get_product(product_id)?;
        self.ledger.list_transactions(&product.id)
    }

    fn list_sub_transactions(&self, transaction_id: &str) -> Result<Vec<SubTransaction>> {
        self.ledger.list_sub_transactions(transaction_id)
    }

    fn list_allocations(&self, product_id: &str) -> Result<Vec<PartnerProduct>> {
        self.ledger.list_allocations(product_id)
    }
}
