use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use server::{routes::build_company_router, state::CompanyState};
use service::company::repository::mock::MockCompanyRepository;

fn app() -> (Arc<MockCompanyRepository>, Router) {
    let repo = Arc::new(MockCompanyRepository::default());
    (repo.clone(), build_company_router(CompanyState::new(repo)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn json_of(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn create_returns_201_and_get_returns_the_same_entity() {
    let (_, app) = app();
    let (status, body) = send(&app, "POST", "/companies", Some(json!({
        "id": 999, "name": "Acme", "sector": "Tech", "country": "US"
    }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let created = json_of(&body);
    let id = created["id"].as_i64().unwrap();
    assert_ne!(id, 999);

    let (status, body) = send(&app, "GET", &format!("/companies/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), created);
}

#[tokio::test]
async fn duplicate_or_blank_names_are_rejected() {
    let (_, app) = app();
    let (status, _) = send(&app, "POST", "/companies", Some(json!({"name": "Acme"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/companies", Some(json!({"name": "Acme"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json_of(&body)["error"], "Conflict");

    let (status, _) = send(&app, "POST", "/companies", Some(json!({"name": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "POST", "/companies", Some(json!({"sector": "Tech"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", "/companies", None).await;
    assert_eq!(json_of(&body).as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_ids_are_400_and_never_reach_the_store() {
    let (repo, app) = app();
    for raw in ["undefined", "null", "NULL", "abc", "1.5"] {
        let (status, _) = send(&app, "GET", &format!("/companies/{raw}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "GET {raw}");
        let (status, _) = send(&app, "PUT", &format!("/companies/{raw}"), Some(json!({"sector": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "PUT {raw}");
    }

    let (status, body) = send(&app, "DELETE", "/companies/undefined", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body).unwrap(), "Invalid company ID");

    let (status, body) = send(&app, "DELETE", "/companies/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body).unwrap(), "Company ID must be a number");

    // no id segment at all
    let (status, body) = send(&app, "GET", "/companies/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&body)["detail"], "Invalid company ID");
    let (status, _) = send(&app, "PUT", "/companies/", Some(json!({"sector": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = send(&app, "DELETE", "/companies/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body).unwrap(), "Invalid company ID");

    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn sector_only_put_changes_only_sector() {
    let (_, app) = app();
    let (_, body) = send(&app, "POST", "/companies", Some(json!({
        "name": "Acme", "sector": "Tech", "country": "US"
    }))).await;
    let id = json_of(&body)["id"].as_i64().unwrap();

    let (status, body) = send(&app, "PUT", &format!("/companies/{id}"), Some(json!({"sector": "Energy"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!({"id": id, "name": "Acme", "sector": "Energy", "country": "US"}));
}

#[tokio::test]
async fn put_on_unknown_id_is_500() {
    let (_, app) = app();
    let (status, _) = send(&app, "PUT", "/companies/41", Some(json!({"name": "Ghost"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn rename_onto_taken_name_is_409() {
    let (_, app) = app();
    let (_, body) = send(&app, "POST", "/companies", Some(json!({"name": "Acme"}))).await;
    let id = json_of(&body)["id"].as_i64().unwrap();
    send(&app, "POST", "/companies", Some(json!({"name": "Globex"}))).await;

    let (status, _) = send(&app, "PUT", &format!("/companies/{id}"), Some(json!({"name": "Globex"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_referenced_then_unreferenced() {
    let (repo, app) = app();
    let (_, body) = send(&app, "POST", "/companies", Some(json!({"name": "Acme"}))).await;
    let kept = json_of(&body)["id"].as_i64().unwrap();
    let (_, body) = send(&app, "POST", "/companies", Some(json!({"name": "Globex"}))).await;
    let gone = json_of(&body)["id"].as_i64().unwrap();
    repo.mark_referenced(kept).await;

    let (status, body) = send(&app, "DELETE", &format!("/companies/{kept}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(String::from_utf8(body).unwrap().contains("referenced"));

    let (status, body) = send(&app, "DELETE", &format!("/companies/{gone}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, "GET", &format!("/companies/{gone}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", &format!("/companies/{gone}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), format!("Company not found with ID: {gone}"));
}

#[tokio::test]
async fn any_origin_is_allowed() {
    let (_, app) = app();
    let req = Request::builder()
        .uri("/companies")
        .header(header::ORIGIN, "http://frontend.example")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn operational_routes_are_served() {
    let (_, app) = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!({"status": "ok"}));

    send(&app, "GET", "/companies", None).await;
    let (status, body) = send(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("market_http_requests_total"));

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json_of(&body)["paths"].get("/companies/{id}").is_some());
}
