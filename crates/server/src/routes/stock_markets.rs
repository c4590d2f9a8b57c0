use axum::{extract::{Path, State}, http::StatusCode, Json};
use tracing::{error, instrument, warn};

use models::stock_market;
use service::errors::ServiceError;
use service::stock_market::domain::StockMarketInput;

use crate::errors::JsonApiError;
use crate::state::StockState;

fn to_api_error(operation: &'static str, err: ServiceError) -> JsonApiError {
    match err {
        ServiceError::NotFound(msg) => {
            warn!(operation, error = %msg, "stock market not found");
            JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg))
        }
        // companyId pointing nowhere, or any other constraint the store enforces
        ServiceError::Conflict(msg) | ServiceError::Referenced(msg) => {
            warn!(operation, error = %msg, "stock market write rejected by store");
            JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(msg))
        }
        ServiceError::Validation(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg)),
        ServiceError::Db(msg) => {
            error!(operation, error = %msg, "stock market store failure");
            JsonApiError::internal(msg)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/stockMarkets",
    tag = "stock_markets",
    responses((status = 200, description = "All quotations", body = [crate::openapi::StockMarketDoc]))
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<StockState>) -> Result<Json<Vec<stock_market::Model>>, JsonApiError> {
    state.stock_markets.list().await.map(Json).map_err(|e| to_api_error("list_stock_markets", e))
}

/// Quotations of one company; an empty list when it has none.
#[utoipa::path(
    get,
    path = "/api/stockMarkets/company/{companyId}",
    tag = "stock_markets",
    params(("companyId" = i64, Path, description = "Company id")),
    responses(
        (status = 200, description = "Quotations of the company", body = [crate::openapi::StockMarketDoc]),
        (status = 400, description = "Non-numeric company id")
    )
)]
#[instrument(skip(state))]
pub async fn list_by_company(
    State(state): State<StockState>,
    Path(company_id): Path<i64>,
) -> Result<Json<Vec<stock_market::Model>>, JsonApiError> {
    state
        .stock_markets
        .list_by_company(company_id)
        .await
        .map(Json)
        .map_err(|e| to_api_error("list_stock_markets_by_company", e))
}

#[utoipa::path(
    get,
    path = "/api/stockMarkets/company/{companyId}/price-update",
    tag = "stock_markets",
    params(("companyId" = i64, Path, description = "Company id")),
    responses((status = 200, description = "Informational notice", body = String, content_type = "text/plain"))
)]
pub async fn price_update(State(state): State<StockState>, Path(company_id): Path<i64>) -> &'static str {
    state.stock_markets.price_update_notice(company_id)
}

/// Insert a quotation. A client-supplied id is discarded.
#[utoipa::path(
    post,
    path = "/api/stockMarkets",
    tag = "stock_markets",
    request_body = crate::openapi::StockMarketInputDoc,
    responses(
        (status = 200, description = "Quotation stored", body = crate::openapi::StockMarketDoc),
        (status = 409, description = "companyId does not reference a company"),
        (status = 422, description = "Missing or mistyped field")
    )
)]
#[instrument(skip(state))]
pub async fn create(
    State(state): State<StockState>,
    Json(input): Json<StockMarketInput>,
) -> Result<Json<stock_market::Model>, JsonApiError> {
    state.stock_markets.create(input).await.map(Json).map_err(|e| to_api_error("create_stock_market", e))
}

#[utoipa::path(
    put,
    path = "/api/stockMarkets/{id}",
    tag = "stock_markets",
    params(("id" = i64, Path, description = "Quotation id")),
    request_body = crate::openapi::StockMarketInputDoc,
    responses(
        (status = 200, description = "Quotation replaced", body = crate::openapi::StockMarketDoc),
        (status = 404, description = "No such quotation"),
        (status = 409, description = "companyId does not reference a company"),
        (status = 422, description = "Missing or mistyped field")
    )
)]
#[instrument(skip(state))]
pub async fn replace(
    State(state): State<StockState>,
    Path(id): Path<i64>,
    Json(input): Json<StockMarketInput>,
) -> Result<Json<stock_market::Model>, JsonApiError> {
    state.stock_markets.replace(id, input).await.map(Json).map_err(|e| to_api_error("replace_stock_market", e))
}

#[utoipa::path(
    delete,
    path = "/api/stockMarkets/{id}",
    tag = "stock_markets",
    params(("id" = i64, Path, description = "Quotation id")),
    responses(
        (status = 200, description = "Quotation deleted"),
        (status = 404, description = "No such quotation")
    )
)]
#[instrument(skip(state))]
pub async fn delete(State(state): State<StockState>, Path(id): Path<i64>) -> StatusCode {
    match state.stock_markets.delete(id).await {
        Ok(()) => StatusCode::OK,
        Err(ServiceError::NotFound(_)) => {
            warn!(operation = "delete_stock_market", id, "stock market not found");
            StatusCode::NOT_FOUND
        }
        Err(e) => {
            error!(operation = "delete_stock_market", id, error = %e, "stock market delete failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
