use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct CompanyDoc {
    pub id: i64,
    pub name: String,
    pub sector: Option<String>,
    pub country: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct NewCompanyDoc {
    /// Ignored; the store assigns ids.
    pub id: Option<i64>,
    pub name: String,
    pub sector: Option<String>,
    pub country: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CompanyPatchDoc {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub country: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMarketDoc {
    pub id: i64,
    pub date: chrono::NaiveDate,
    pub open_value: f64,
    pub close_value: f64,
    pub volume: i64,
    pub company_id: i64,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMarketInputDoc {
    /// Ignored on create and replace.
    pub id: Option<i64>,
    pub date: chrono::NaiveDate,
    pub open_value: f64,
    pub close_value: f64,
    pub volume: i64,
    pub company_id: i64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::companies::list,
        crate::routes::companies::get,
        crate::routes::companies::create,
        crate::routes::companies::update,
        crate::routes::companies::delete,
    ),
    components(schemas(HealthResponse, CompanyDoc, NewCompanyDoc, CompanyPatchDoc)),
    tags((name = "health"), (name = "companies"))
)]
pub struct CompanyApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::stock_markets::list,
        crate::routes::stock_markets::list_by_company,
        crate::routes::stock_markets::price_update,
        crate::routes::stock_markets::create,
        crate::routes::stock_markets::replace,
        crate::routes::stock_markets::delete,
    ),
    components(schemas(HealthResponse, StockMarketDoc, StockMarketInputDoc)),
    tags((name = "health"), (name = "stock_markets"))
)]
pub struct StockMarketApiDoc;
