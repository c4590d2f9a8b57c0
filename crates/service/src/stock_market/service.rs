use std::sync::Arc;
use tracing::{info, instrument};

use models::stock_market;
use super::domain::{StockMarketInput, PRICE_UPDATE_NOTICE};
use super::repository::StockMarketRepository;
use crate::errors::ServiceError;

/// Quotation CRUD. No uniqueness or referential checks happen here; the
/// database decides whether `company_id` is acceptable.
pub struct StockMarketService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: StockMarketRepository + ?Sized> StockMarketService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<stock_market::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn list_by_company(&self, company_id: i64) -> Result<Vec<stock_market::Model>, ServiceError> {
        self.repo.list_by_company(company_id).await
    }

    /// Always inserts a new row, whatever `input.id` says.
    #[instrument(skip(self, input), fields(company_id = input.company_id))]
    pub async fn create(&self, mut input: StockMarketInput) -> Result<stock_market::Model, ServiceError> {
        if let Some(client_id) = input.id.take() {
            info!(client_id, "discarding client-supplied stock market id");
        }
        let created = self.repo.create(&input).await?;
        info!(id = created.id, "stock market created");
        Ok(created)
    }

    /// Overwrite all fields of an existing row.
    #[instrument(skip(self, input), fields(id = id))]
    pub async fn replace(&self, id: i64, input: StockMarketInput) -> Result<stock_market::Model, ServiceError> {
        let updated = self
            .repo
            .replace(id, &input)
            .await?
            .ok_or_else(|| ServiceError::not_found("stock market", id))?;
        info!(id, "stock market replaced");
        Ok(updated)
    }

    #[instrument(skip(self), fields(id = id))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? || !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("stock market", id));
        }
        info!(id, "stock market deleted");
        Ok(())
    }

    /// Static text for the price-update placeholder.
    pub fn price_update_notice(&self, company_id: i64) -> &'static str {
        info!(company_id, "price update requested");
        PRICE_UPDATE_NOTICE
    }
}
