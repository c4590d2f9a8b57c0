use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use configs::ServiceKind;

use crate::openapi::{CompanyApiDoc, StockMarketApiDoc};
use crate::state::{CompanyState, StockState};

pub mod companies;
pub mod stock_markets;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> (axum::http::StatusCode, String) {
    common::metrics::encode_metrics()
}

async fn track_metrics(State(service): State<&'static str>, req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let started = Instant::now();
    let response = next.run(req).await;
    common::metrics::observe_request(service, &method, response.status().as_u16(), started.elapsed().as_secs_f64());
    response
}

/// Routes every service exposes next to its own API.
fn operational_routes(doc: utoipa::openapi::OpenApi) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route(
            "/api-docs/openapi.json",
            get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        )
}

/// Request span, metrics and the given CORS policy around `router`.
fn with_observability(router: Router, kind: ServiceKind, cors: Option<CorsLayer>) -> Router {
    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };
    router
        .layer(middleware::from_fn_with_state(kind.name(), track_metrics))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

/// Company service: `/companies` CRUD, reachable from any origin.
pub fn build_company_router(state: CompanyState) -> Router {
    let api = Router::new()
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/:id",
            get(companies::get).put(companies::update).delete(companies::delete),
        )
        // empty id, rejected as 400 by the same handlers
        .route(
            "/companies/",
            get(companies::get).put(companies::update).delete(companies::delete),
        )
        .with_state(state);

    let app = api.merge(operational_routes(CompanyApiDoc::openapi()));
    with_observability(app, ServiceKind::Company, Some(CorsLayer::very_permissive()))
}

/// Stock service: `/api/stockMarkets` CRUD plus the price-update notice.
pub fn build_stock_router(state: StockState) -> Router {
    let api = Router::new()
        .route("/api/stockMarkets", get(stock_markets::list).post(stock_markets::create))
        .route(
            "/api/stockMarkets/:id",
            axum::routing::put(stock_markets::replace).delete(stock_markets::delete),
        )
        .route("/api/stockMarkets/company/:company_id", get(stock_markets::list_by_company))
        .route(
            "/api/stockMarkets/company/:company_id/price-update",
            get(stock_markets::price_update),
        )
        .with_state(state);

    let app = api.merge(operational_routes(StockMarketApiDoc::openapi()));
    with_observability(app, ServiceKind::Stock, None)
}
