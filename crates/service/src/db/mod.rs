//! SeaORM queries backing the repository implementations.
pub mod company_store;
pub mod stock_market_store;
