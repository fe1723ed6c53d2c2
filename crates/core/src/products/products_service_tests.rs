//! Tests for product financing and installment payment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::allocation::AllocationPolicy;
use crate::errors::{EntityKind, Error, ErrorKind};
use crate::investments::{InvestmentService, InvestmentServiceTrait};
use crate::ledger::ledger_test_support::{FailPoint, InMemoryLedger};
use crate::ledger::{LedgerStoreTrait, Product, ProductUpdate, Transaction};
use crate::products::{NewProduct, ProductService, ProductServiceTrait};
use crate::utils::time_utils::now_naive;

fn setup(partners: &[(&str, Decimal)]) -> (Arc<InMemoryLedger>, ProductService<InMemoryLedger>) {
    setup_with_policy(partners, AllocationPolicy::default())
}

fn setup_with_policy(
    partners: &[(&str, Decimal)],
    policy: AllocationPolicy,
) -> (Arc<InMemoryLedger>, ProductService<InMemoryLedger>) {
    let ledger = Arc::new(InMemoryLedger::with_partners(partners));
    ledger.add_client("C-1");
    ledger.set_rate(dec!(0.01));
    let service = ProductService::with_policy(ledger.clone(), ledger.clone(), ledger.clone(), policy);
    (ledger, service)
}

fn fridge() -> NewProduct {
    NewProduct {
        name: Some("Fridge".to_string()),
        cost: dec!(500),
        cash_price: dec!(1200),
        cash_paid: Decimal::ZERO,
        duration: 2,
        client_id: "C-1".to_string(),
        description: None,
    }
}

fn first_installment(service: &ProductService<InMemoryLedger>, product_id: &str) -> Transaction {
    service.get_schedule(product_id).unwrap()[1].clone()
}

// ==================== CreateProduct ====================

#[tokio::test]
async fn test_create_product_allocates_proportionally() {
    let (ledger, service) = setup(&[("A", dec!(600)), ("B", dec!(400))]);

    let result = service.create_product(fridge()).await.unwrap();

    assert_eq!(result.funded_partner_count, 2);
    assert_eq!(result.allocated_total, dec!(500));
    assert_eq!(result.shortfall, Decimal::ZERO);
    assert!(result.skipped_partners.is_empty());

    let product = service.get_product(&result.product_id).unwrap();
    assert_eq!(product.total_price, dec!(1224));
    assert_eq!(product.installment, dec!(612));
    assert_eq!(product.remaining_months, 2);
    assert_eq!(product.rate, dec!(0.01));

    let allocations = service.list_allocations(&result.product_id).unwrap();
    let percentages: Vec<(String, Decimal)> = allocations
        .iter()
        .map(|a| (a.partner_id.clone(), a.percentage))
        .collect();
    assert_eq!(
        percentages,
        vec![("A".to_string(), dec!(0.6)), ("B".to_string(), dec!(0.4))]
    );

    let schedule = service.get_schedule(&result.product_id).unwrap();
    assert_eq!(schedule.len(), 3);
    let funding_subs = service.list_sub_transactions(&schedule[0].id).unwrap();
    let amounts: Vec<Decimal> = funding_subs.iter().map(|s| s.amount).collect();
    assert_eq!(amounts, vec![dec!(300), dec!(200)]);

    let a = ledger.partner("A");
    assert_eq!(a.cash, dec!(300));
    assert_eq!(a.working_capital, dec!(300));
    assert_eq!(a.active_inventory_count, 1);
    let b = ledger.partner("B");
    assert_eq!(b.cash, dec!(200));
    assert_eq!(b.working_capital, dec!(200));
    assert_eq!(b.active_inventory_count, 1);
}

#[tokio::test]
async fn test_create_product_without_rate_prices_at_cash_price() {
    let ledger = Arc::new(InMemoryLedger::with_partners(&[("A", dec!(1000))]));
    ledger.add_client("C-1");
    let service = ProductService::new(ledger.clone(), ledger.clone(), ledger.clone());

    let result = service.create_product(fridge()).await.unwrap();
    let product = service.get_product(&result.product_id).unwrap();
    assert_eq!(product.rate, Decimal::ZERO);
    assert_eq!(product.total_price, dec!(1200));
    assert_eq!(product.installment, dec!(600));
}

#[tokio::test]
async fn test_create_product_pool_gate_persists_nothing() {
    let (ledger, service) = setup(&[("A", dec!(600)), ("B", dec!(400))]);
    let mut input = fridge();
    input.cost = dec!(1000);

    let err = service.create_product(input).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientPool);

    let state = ledger.snapshot();
    assert!(state.products.is_empty());
    assert!(state.transactions.is_empty());
    assert!(state.allocations.is_empty());
    assert_eq!(ledger.partner("A").cash, dec!(600));
    assert_eq!(ledger.partner("B").cash, dec!(400));
}

#[tokio::test]
async fn test_create_product_unknown_client() {
    let (ledger, service) = setup(&[("A", dec!(600))]);
    let mut input = fridge();
    input.client_id = "C-404".to_string();

    let err = service.create_product(input).await.unwrap_err();
    match err {
        Error::NotFound { entity, id } => {
            assert_eq!(entity, EntityKind::Client);
            assert_eq!(id, "C-404");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(ledger.snapshot().products.is_empty());
}

#[tokio::test]
async fn test_create_product_validation_runs_first() {
    let (ledger, service) = setup(&[("A", dec!(600))]);
    let mut input = fridge();
    input.duration = 0;

    let err = service.create_product(input).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(ledger.snapshot().products.is_empty());
}

#[tokio::test]
async fn test_create_product_rolls_back_on_write_failure() {
    let (ledger, service) = setup(&[("A", dec!(600)), ("B", dec!(400))]);
    ledger.fail_on(FailPoint::InsertSubTransactions);

    let err = service.create_product(fridge()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persistence);

    let state = ledger.snapshot();
    assert!(state.products.is_empty());
    assert!(state.transactions.is_empty());
    assert!(state.allocations.is_empty());
    let a = ledger.partner("A");
    assert_eq!(a.cash, dec!(600));
    assert_eq!(a.working_capital, Decimal::ZERO);
    assert_eq!(a.active_inventory_count, 0);
    assert_eq!(a.version, 0);
}

#[tokio::test]
async fn test_create_product_near_full_draw_funds_every_partner() {
    for policy in [
        AllocationPolicy::SkipShortfall,
        AllocationPolicy::RejectShortfall,
        AllocationPolicy::Renormalize,
    ] {
        let (ledger, service) =
            setup_with_policy(&[("X", dec!(0.2)), ("Y", dec!(299999.8))], policy);
        let mut input = fridge();
        input.cost = dec!(299999.7);

        let result = service.create_product(input).await.unwrap();

        assert_eq!(result.funded_partner_count, 2, "{policy:?}");
        assert!(result.skipped_partners.is_empty());
        assert_eq!(result.shortfall, Decimal::ZERO);
        assert_eq!(result.allocated_total, dec!(299999.7));
        let x = ledger.partner("X");
        assert_eq!(x.cash, Decimal::ZERO);
        assert_eq!(x.working_capital, dec!(0.2));
        assert_eq!(x.active_inventory_count, 1);
        assert_eq!(ledger.partner("Y").cash, dec!(0.3));
        assert_eq!(service.list_allocations(&result.product_id).unwrap().len(), 2);
    }
}

// ==================== PayInstallment ====================

#[tokio::test]
async fn test_pay_installment_splits_principal_and_interest() {
    let (ledger, service) = setup(&[("A", dec!(600)), ("B", dec!(400))]);
    let created = service.create_product(fridge()).await.unwrap();
    let installment = first_installment(&service, &created.product_id);

    let result = service.pay_installment(&installment.id).await.unwrap();

    assert_eq!(result.product_id, created.product_id);
    assert_eq!(result.sub_transaction_count, 2);
    assert_eq!(result.total_principal, dec!(600));
    assert_eq!(result.total_interest, dec!(12));

    let subs = service.list_sub_transactions(&installment.id).unwrap();
    let amounts: Vec<Decimal> = subs.iter().map(|s| s.amount).collect();
    assert_eq!(amounts, vec![dec!(367.2), dec!(244.8)]);

    let a = ledger.partner("A");
    assert_eq!(a.cash, dec!(667.2));
    assert_eq!(a.capital, dec!(607.2));
    assert_eq!(a.working_capital, dec!(-60));
    let b = ledger.partner("B");
    assert_eq!(b.cash, dec!(444.8));
    assert_eq!(b.capital, dec!(404.8));
    assert_eq!(b.working_capital, dec!(-40));

    assert!(service.get_schedule(&created.product_id).unwrap()[1].is_paid);
}

#[tokio::test]
async fn test_pay_installment_twice_is_rejected_without_mutation() {
    let (ledger, service) = setup(&[("A", dec!(600)), ("B", dec!(400))]);
    let created = service.create_product(fridge()).await.unwrap();
    let installment = first_installment(&service, &created.product_id);
    service.pay_installment(&installment.id).await.unwrap();
    let before = ledger.snapshot();

    let err = service.pay_installment(&installment.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyPaid);

    let after = ledger.snapshot();
    assert_eq!(after.partners, before.partners);
    assert_eq!(after.sub_transactions, before.sub_transactions);
}

#[tokio::test]
async fn test_pay_funding_transaction_is_rejected() {
    let (_ledger, service) = setup(&[("A", dec!(600))]);
    let created = service.create_product(fridge()).await.unwrap();
    let funding = service.get_schedule(&created.product_id).unwrap()[0].clone();

    let err = service.pay_installment(&funding.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_pay_unknown_transaction() {
    let (_ledger, service) = setup(&[("A", dec!(600))]);
    let err = service.pay_installment("missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = service.pay_installment("  ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_pay_installment_without_allocations() {
    let (ledger, service) = setup(&[("A", dec!(600))]);
    let product = fridge().into_product(dec!(0.01), now_naive());
    let installment = Transaction::installment(&product.id, 1, dec!(612), now_naive());
    let installment_id = installment.id.clone();
    let product_id = product.id.clone();
    ledger
        .atomic(move |uow| {
            uow.insert_product(&product)?;
            uow.insert_transactions(&[installment])
        })
        .await
        .unwrap();

    let err = service.pay_installment(&installment_id).await.unwrap_err();
    match err {
        Error::NoAllocation(id) => assert_eq!(id, product_id),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_pay_installment_rolls_back_then_succeeds() {
    let (ledger, service) = setup(&[("A", dec!(600)), ("B", dec!(400))]);
    let created = service.create_product(fridge()).await.unwrap();
    let installment = first_installment(&service, &created.product_id);
    let before = ledger.snapshot();

    ledger.fail_on(FailPoint::MarkPaid);
    let err = service.pay_installment(&installment.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persistence);
    let after = ledger.snapshot();
    assert_eq!(after.partners, before.partners);
    assert!(service.list_sub_transactions(&installment.id).unwrap().is_empty());
    assert!(!service.get_schedule(&created.product_id).unwrap()[1].is_paid);

    ledger.clear_failure();
    service.pay_installment(&installment.id).await.unwrap();
    assert_eq!(ledger.partner("A").cash, dec!(667.2));
}

#[tokio::test]
async fn test_allocation_percentages_survive_later_deposits() {
    let (ledger, service) = setup(&[("A", dec!(600)), ("B", dec!(400))]);
    let created = service.create_product(fridge()).await.unwrap();

    let investments = InvestmentService::new(ledger.clone());
    investments.deposit("B", dec!(10000)).await.unwrap();

    let installment = first_installment(&service, &created.product_id);
    service.pay_installment(&installment.id).await.unwrap();

    let subs = service.list_sub_transactions(&installment.id).unwrap();
    let amounts: Vec<Decimal> = subs.iter().map(|s| s.amount).collect();
    assert_eq!(amounts, vec![dec!(367.2), dec!(244.8)]);
    let percentages: Vec<Decimal> = service
        .list_allocations(&created.product_id)
        .unwrap()
        .iter()
        .map(|a| a.percentage)
        .collect();
    assert_eq!(percentages, vec![dec!(0.6), dec!(0.4)]);
}

// ==================== Read side ====================

#[tokio::test]
async fn test_products_listed_per_partner() {
    let (_ledger, service) = setup(&[("A", dec!(6000)), ("B", dec!(4000))]);
    let first = service.create_product(fridge()).await.unwrap();
    let second = service.create_product(fridge()).await.unwrap();

    let all: Vec<String> = service
        .list_products()
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(all, vec![second.product_id.clone(), first.product_id.clone()]);
    assert_eq!(service.list_products_for_partner("A").unwrap().len(), 2);
    assert!(service.list_products_for_partner("Z").unwrap().is_empty());
}

#[tokio::test]
async fn test_schedule_of_unknown_product() {
    let (_ledger, service) = setup(&[("A", dec!(600))]);
    let err = service.get_schedule("missing").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_update_product_keeps_money_fields() {
    let (_ledger, service) = setup(&[("A", dec!(600))]);
    let created = service.create_product(fridge()).await.unwrap();
    let before: Product = service.get_product(&created.product_id).unwrap();

    let updated = service
        .update_product(ProductUpdate {
            id: created.product_id.clone(),
            name: Some("Washer".to_string()),
            description: Some("Second hand".to_string()),
            remaining_months: 1,
        })
        .await
        .unwrap();

    assert_eq!(updated.name.as_deref(), Some("Washer"));
    assert_eq!(updated.remaining_months, 1);
    assert_eq!(updated.total_price, before.total_price);
    assert_eq!(updated.installment, before.installment);
    assert_eq!(updated.cost, before.cost);
}
