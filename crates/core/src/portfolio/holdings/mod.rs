//! Holdings module - aggregation engine, models and service.

mod holdings_calculator;
mod holdings_model;
mod holdings_service;


pub(crate) use holdings_calculator::percent_of;
pub use holdings_calculator::compute_holdings;
pub use holdings_model::{Holding, HoldingsFilter, LedgerSnapshot, PositionKey};
pub use holdings_service::{HoldingsService, HoldingsServiceTrait};
