use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::company::{repository::{CompanyRepository, SeaOrmCompanyRepository}, service::CompanyService};
use service::stock_market::{
    repository::{SeaOrmStockMarketRepository, StockMarketRepository},
    service::StockMarketService,
};

#[derive(Clone)]
pub struct CompanyState {
    pub companies: Arc<CompanyService<dyn CompanyRepository>>,
}

impl CompanyState {
    pub fn new(repo: Arc<dyn CompanyRepository>) -> Self {
        Self { companies: Arc::new(CompanyService::new(repo)) }
    }

    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmCompanyRepository { db }))
    }
}

#[derive(Clone)]
pub struct StockState {
    pub stock_markets: Arc<StockMarketService<dyn StockMarketRepository>>,
}

impl StockState {
    pub fn new(repo: Arc<dyn StockMarketRepository>) -> Self {
        Self { stock_markets: Arc::new(StockMarketService::new(repo)) }
    }

    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmStockMarketRepository { db }))
    }
}
