use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::stock_market;
use super::domain::StockMarketInput;
use crate::errors::ServiceError;

#[async_trait]
pub trait StockMarketRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<stock_market::Model>, ServiceError>;
    async fn list_by_company(&self, company_id: i64) -> Result<Vec<stock_market::Model>, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn create(&self, input: &StockMarketInput) -> Result<stock_market::Model, ServiceError>;
    async fn replace(&self, id: i64, input: &StockMarketInput) -> Result<Option<stock_market::Model>, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmStockMarketRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl StockMarketRepository for SeaOrmStockMarketRepository {
    async fn list(&self) -> Result<Vec<stock_market::Model>, ServiceError> {
        crate::db::stock_market_store::list_stock_markets(&self.db).await
    }

    async fn list_by_company(&self, company_id: i64) -> Result<Vec<stock_market::Model>, ServiceError> {
        crate::db::stock_market_store::list_by_company(&self.db, company_id).await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(crate::db::stock_market_store::get_stock_market(&self.db, id).await?.is_some())
    }

    async fn create(&self, input: &StockMarketInput) -> Result<stock_market::Model, ServiceError> {
        crate::db::stock_market_store::create_stock_market(&self.db, input).await
    }

    async fn replace(&self, id: i64, input: &StockMarketInput) -> Result<Option<stock_market::Model>, ServiceError> {
        crate::db::stock_market_store::replace_stock_market(&self.db, id, input).await
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        crate::db::stock_market_store::delete_stock_market(&self.db, id).await
    }
}

/// In-memory repository for tests.
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i64, stock_market::Model>,
        last_id: i64,
    }

    #[derive(Default)]
    pub struct MockStockMarketRepository {
        state: Mutex<State>,
    }

    fn row(id: i64, input: &StockMarketInput) -> stock_market::Model {
        stock_market::Model {
            id,
            date: input.date,
            open_value: input.open_value,
            close_value: input.close_value,
            volume: input.volume,
            company_id: input.company_id,
        }
    }

    #[async_trait]
    impl StockMarketRepository for MockStockMarketRepository {
        async fn list(&self) -> Result<Vec<stock_market::Model>, ServiceError> {
            Ok(self.state.lock().await.rows.values().cloned().collect())
        }

        async fn list_by_company(&self, company_id: i64) -> Result<Vec<stock_market::Model>, ServiceError> {
            let state = self.state.lock().await;
            Ok(state.rows.values().filter(|r| r.company_id == company_id).cloned().collect())
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.state.lock().await.rows.contains_key(&id))
        }

        async fn create(&self, input: &StockMarketInput) -> Result<stock_market::Model, ServiceError> {
            let mut state = self.state.lock().await;
            state.last_id += 1;
            let created = row(state.last_id, input);
            state.rows.insert(created.id, created.clone());
            Ok(created)
        }

        async fn replace(&self, id: i64, input: &StockMarketInput) -> Result<Option<stock_market::Model>, ServiceError> {
            let mut state = self.state.lock().await;
            match state.rows.get_mut(&id) {
                Some(existing) => {
                    *existing = row(id, input);
                    Ok(Some(existing.clone()))
                }
                None => Ok(None),
            }
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.state.lock().await.rows.remove(&id).is_some())
        }
    }
}
