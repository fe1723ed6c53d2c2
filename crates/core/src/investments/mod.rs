//! Investment log - partner capital deposits and withdrawals.

mod investments_model;
mod investments_service;
mod investments_traits;


pub use investments_model::{DepositResult, InvestmentLogEntry, WithdrawResult};
pub use investments_service::InvestmentService;
pub use investments_traits::InvestmentServiceTrait;
