use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::{self, ServerAuthConfig, ServerState};
use service::auth::issue_token;
use service::errors::Reference;
use service::subscription::{
    validator::mock::StaticValidator, SeaOrmSubscriptionRepository, SubscriptionService,
};

const SECRET: &str = "test-secret";

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

struct TestApp {
    router: Router,
    customers: Arc<StaticValidator>,
    vehicles: Arc<StaticValidator>,
}

/// Known customers: 1, 2. Known vehicles: 7, 8.
async fn build_app() -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;
    let customers = Arc::new(StaticValidator::new(Reference::Customer, [1, 2]));
    let vehicles = Arc::new(StaticValidator::new(Reference::Vehicle, [7, 8]));
    let svc = SubscriptionService::new(
        Arc::new(SeaOrmSubscriptionRepository::new(db)),
        customers.clone(),
        vehicles.clone(),
    );
    let state = ServerState {
        subscriptions: Arc::new(svc),
        auth: ServerAuthConfig { jwt_secret: SECRET.into() },
    };
    Ok(TestApp { router: routes::build_router(state, cors()), customers, vehicles })
}

fn token() -> String {
    issue_token(SECRET, "test-suite", chrono::Duration::minutes(10)).expect("issue token")
}

fn payload(customer_id: i64, vehicle_id: i64) -> Value {
    json!({
        "customer_id": customer_id,
        "vehicle_id": vehicle_id,
        "term": 36,
        "price_per_month": 299.99,
        "start_month": "2024-01",
        "end_month": "2026-12",
        "restance": false,
        "contract_information": "Includes winter tyres"
    })
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token()))
        .body(Body::from(serde_json::to_vec(body).expect("encode body")))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token()))
        .body(Body::empty())
        .expect("request")
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

async fn count(app: &Router) -> anyhow::Result<usize> {
    let (status, body) = send(app, get("/abonnement")).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body.as_array().map(|a| a.len()).unwrap_or_default())
}

#[tokio::test]
async fn index_is_public_descriptor() -> anyhow::Result<()> {
    let app = build_app().await?;
    let req = Request::builder().uri("/").body(Body::empty())?;
    let (status, body) = send(&app.router, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({
        "service": "Abonnement",
        "version": "1.0.0",
        "description": "A RESTful API for managing abonnement"
    }));
    Ok(())
}

#[tokio::test]
async fn fresh_store_lists_empty() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app.router, get("/abonnement")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_then_get_returns_payload_plus_id() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app.router, post("/abonnement", &payload(1, 7))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].is_string());
    let id = body["subscription_id"].as_i64().expect("id");

    let (status, got) = send(&app.router, get(&format!("/abonnement/{}", id))).await?;
    assert_eq!(status, StatusCode::OK);
    let mut expected = payload(1, 7);
    expected["subscription_id"] = json!(id);
    assert_eq!(got, expected);
    assert_eq!(got["price_per_month"], json!(299.99));
    Ok(())
}

#[tokio::test]
async fn add_suffix_creates_too() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, _) = send(&app.router, post("/abonnement/add", &payload(2, 8))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(count(&app.router).await?, 1);
    Ok(())
}

#[tokio::test]
async fn sequential_creates_get_increasing_ids() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, a) = send(&app.router, post("/abonnement", &payload(1, 7))).await?;
    let (_, b) = send(&app.router, post("/abonnement", &payload(1, 7))).await?;
    let (a, b) = (a["subscription_id"].as_i64().unwrap(), b["subscription_id"].as_i64().unwrap());
    assert!(b > a);

    let (_, list) = send(&app.router, get("/abonnement")).await?;
    let ids: Vec<i64> = list.as_array().unwrap().iter().map(|s| s["subscription_id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![a, b]);
    Ok(())
}

#[tokio::test]
async fn missing_field_is_bad_request_without_write() -> anyhow::Result<()> {
    let app = build_app().await?;
    let mut body = payload(1, 7);
    body.as_object_mut().unwrap().remove("restance");
    let (status, resp) = send(&app.router, post("/abonnement", &body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["message"].as_str().unwrap().contains("restance"));
    assert_eq!(count(&app.router).await?, 0);
    Ok(())
}

#[tokio::test]
async fn unknown_customer_is_not_found_without_write() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, resp) = send(&app.router, post("/abonnement", &payload(42, 7))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["message"], "customer not found");
    assert_eq!(app.vehicles.calls(), 0);
    assert_eq!(count(&app.router).await?, 0);
    Ok(())
}

#[tokio::test]
async fn unknown_vehicle_is_not_found_without_write() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, resp) = send(&app.router, post("/abonnement", &payload(1, 99))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(resp["message"], "vehicle not found");
    assert_eq!(app.customers.calls(), 1);
    assert_eq!(count(&app.router).await?, 0);
    Ok(())
}

#[tokio::test]
async fn unknown_id_is_not_found() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app.router, get("/abonnement/12345")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn id_beyond_assignable_range_is_not_found() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app.router, get("/abonnement/99999999999")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "subscription not found");
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app.router, get("/abonnement/abc")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid Path");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> anyhow::Result<()> {
    let app = build_app().await?;
    let req = Request::builder()
        .method("POST")
        .uri("/abonnement")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token()))
        .body(Body::from("{not json"))?;
    let (status, body) = send(&app.router, req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid Body");
    Ok(())
}

#[tokio::test]
async fn missing_token_is_unauthorized_and_handler_never_runs() -> anyhow::Result<()> {
    let app = build_app().await?;
    let req = Request::builder()
        .method("POST")
        .uri("/abonnement")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload(1, 7))?))?;
    let (status, body) = send(&app.router, req).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(app.customers.calls(), 0);
    assert_eq!(count(&app.router).await?, 0);
    Ok(())
}

#[tokio::test]
async fn foreign_signature_is_unauthorized() -> anyhow::Result<()> {
    let app = build_app().await?;
    let forged = issue_token("someone-else", "intruder", chrono::Duration::minutes(10))?;
    let req = Request::builder()
        .uri("/abonnement/1")
        .header(header::AUTHORIZATION, format!("Bearer {}", forged))
        .body(Body::empty())?;
    let (status, _) = send(&app.router, req).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn health_and_openapi_are_public() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app.router, Request::builder().uri("/health").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = send(&app.router, Request::builder().uri("/api-docs/openapi.json").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/abonnement"].is_object());
    Ok(())
}
