use axum::{extract::{Path, State}, http::StatusCode, Json};
use tracing::{error, instrument, warn};

use models::company;
use service::company::domain::{parse_company_id, CompanyPatch, NewCompany};
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::state::CompanyState;

const REFERENCED_MESSAGE: &str = "Cannot delete company: It is referenced by other records";
const DELETE_FAILED_MESSAGE: &str = "Failed to delete company";

fn to_api_error(operation: &'static str, err: ServiceError) -> JsonApiError {
    match err {
        ServiceError::Validation(msg) => {
            warn!(operation, error = %msg, "rejected company payload");
            JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg))
        }
        ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
        ServiceError::Conflict(msg) | ServiceError::Referenced(msg) => {
            warn!(operation, error = %msg, "company conflict");
            JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(msg))
        }
        ServiceError::Db(msg) => {
            error!(operation, error = %msg, "company store failure");
            JsonApiError::internal(msg)
        }
    }
}

/// `/companies/` carries no id segment; treat it as empty text.
fn path_text(raw_id: Option<Path<String>>) -> String {
    raw_id.map(|Path(raw)| raw).unwrap_or_default()
}

fn parse_id(operation: &'static str, raw: &str) -> Result<i64, JsonApiError> {
    parse_company_id(raw).map_err(|e| {
        warn!(operation, id = %raw, error = %e, "rejected company id");
        JsonApiError::from(e)
    })
}

/// List all companies ordered by id.
#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    responses(
        (status = 200, description = "All companies", body = [crate::openapi::CompanyDoc]),
        (status = 500, description = "Store failure")
    )
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<CompanyState>) -> Result<Json<Vec<company::Model>>, JsonApiError> {
    state.companies.list().await.map(Json).map_err(|e| to_api_error("list_companies", e))
}

#[utoipa::path(
    get,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = String, Path, description = "Numeric company id")),
    responses(
        (status = 200, description = "Company found", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such company")
    )
)]
#[instrument(skip(state))]
pub async fn get(
    State(state): State<CompanyState>,
    raw_id: Option<Path<String>>,
) -> Result<Json<company::Model>, JsonApiError> {
    let raw_id = path_text(raw_id);
    let id = parse_id("get_company", &raw_id)?;
    state.companies.get(id).await.map(Json).map_err(|e| to_api_error("get_company", e))
}

/// Create a company. Any `id` in the body is ignored.
#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    request_body = crate::openapi::NewCompanyDoc,
    responses(
        (status = 201, description = "Company created", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Name missing or blank"),
        (status = 409, description = "Name already taken")
    )
)]
#[instrument(skip(state))]
pub async fn create(
    State(state): State<CompanyState>,
    Json(input): Json<NewCompany>,
) -> Result<(StatusCode, Json<company::Model>), JsonApiError> {
    let created = state.companies.create(input).await.map_err(|e| to_api_error("create_company", e))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update. An unknown id answers 500, not 404.
#[utoipa::path(
    put,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = String, Path, description = "Numeric company id")),
    request_body = crate::openapi::CompanyPatchDoc,
    responses(
        (status = 200, description = "Company updated", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Malformed id"),
        (status = 409, description = "New name already taken"),
        (status = 500, description = "Unknown id or store failure")
    )
)]
#[instrument(skip(state))]
pub async fn update(
    State(state): State<CompanyState>,
    raw_id: Option<Path<String>>,
    Json(patch): Json<CompanyPatch>,
) -> Result<Json<company::Model>, JsonApiError> {
    let raw_id = path_text(raw_id);
    let id = parse_id("update_company", &raw_id)?;
    match state.companies.update(id, patch).await {
        Ok(updated) => Ok(Json(updated)),
        Err(ServiceError::NotFound(msg)) => {
            error!(operation = "update_company", id, error = %msg, "update of unknown company");
            Err(JsonApiError::internal(msg))
        }
        Err(e) => Err(to_api_error("update_company", e)),
    }
}

/// Delete a company. Errors are plain text.
#[utoipa::path(
    delete,
    path = "/companies/{id}",
    tag = "companies",
    params(("id" = String, Path, description = "Numeric company id")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 400, description = "Malformed id", body = String),
        (status = 404, description = "No such company", body = String),
        (status = 409, description = "Company still referenced by stock market rows", body = String),
        (status = 500, description = "Store failure", body = String)
    )
)]
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<CompanyState>,
    raw_id: Option<Path<String>>,
) -> Result<StatusCode, (StatusCode, String)> {
    let raw_id = path_text(raw_id);
    let id = parse_company_id(&raw_id).map_err(|e| {
        warn!(operation = "delete_company", id = %raw_id, error = %e, "rejected company id");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;
    match state.companies.delete(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(ServiceError::NotFound(_)) => {
            warn!(operation = "delete_company", id, "company not found");
            Err((StatusCode::NOT_FOUND, format!("Company not found with ID: {id}")))
        }
        Err(ServiceError::Referenced(detail)) => {
            warn!(operation = "delete_company", id, error = %detail, "company still referenced");
            Err((StatusCode::CONFLICT, REFERENCED_MESSAGE.to_string()))
        }
        Err(e) => {
            error!(operation = "delete_company", id, error = %e, "company delete failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, DELETE_FAILED_MESSAGE.to_string()))
        }
    }
}
