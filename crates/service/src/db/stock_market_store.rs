use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};
use models::stock_market;
use crate::errors::ServiceError;
use crate::stock_market::domain::StockMarketInput;

/// List all quotations in id order.
pub async fn list_stock_markets<C: ConnectionTrait>(db: &C) -> Result<Vec<stock_market::Model>, ServiceError> {
    Ok(stock_market::Entity::find().order_by_asc(stock_market::Column::Id).all(db).await?)
}

/// Quotations of one company; empty when it has none.
pub async fn list_by_company<C: ConnectionTrait>(db: &C, company_id: i64) -> Result<Vec<stock_market::Model>, ServiceError> {
    Ok(stock_market::find_by_company(db, company_id).await?)
}

/// Get quotation by id.
pub async fn get_stock_market<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<stock_market::Model>, ServiceError> {
    Ok(stock_market::Entity::find_by_id(id).one(db).await?)
}

/// Insert a quotation. `input.id` is never written.
pub async fn create_stock_market<C: ConnectionTrait>(db: &C, input: &StockMarketInput) -> Result<stock_market::Model, ServiceError> {
    let am = stock_market::ActiveModel {
        id: NotSet,
        date: Set(input.date),
        open_value: Set(input.open_value),
        close_value: Set(input.close_value),
        volume: Set(input.volume),
        company_id: Set(input.company_id),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite every column of an existing quotation; `Ok(None)` if absent.
pub async fn replace_stock_market<C: ConnectionTrait>(db: &C, id: i64, input: &StockMarketInput) -> Result<Option<stock_market::Model>, ServiceError> {
    let Some(found) = stock_market::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut am: stock_market::ActiveModel = found.into();
    am.date = Set(input.date);
    am.open_value = Set(input.open_value);
    am.close_value = Set(input.close_value);
    am.volume = Set(input.volume);
    am.company_id = Set(input.company_id);
    Ok(Some(am.update(db).await?))
}

/// Delete quotation; `Ok(false)` when no row had that id.
pub async fn delete_stock_market<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, ServiceError> {
    let res = stock_market::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
