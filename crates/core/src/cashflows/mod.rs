//! Cashflows module - account mapping, cashflow aggregation and boundary valuation.

mod account_mapper;
mod boundary_valuator;
mod cashflow_aggregator;
mod cashflow_model;
mod cashflow_service;


pub use account_mapper::{AccountMapper, AccountMappingConfig, AccountMappingRule};
pub use boundary_valuator::BoundaryValuator;
pub use cashflow_aggregator::CashflowAggregator;
pub use cashflow_model::{Cashflow, CashflowKind, CashflowsByAssetAccount};
pub use cashflow_service::CashflowService;
