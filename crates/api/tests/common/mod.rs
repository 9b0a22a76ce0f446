#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{Days, NaiveDate};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use tablehost_api::config::ServerConfig;
use tablehost_api::media::MediaUploader;
use tablehost_api::routes;
use tablehost_api::state::AppState;
use tablehost_api::ws::WsManager;
use tablehost_core::api_keys::{hash_api_key, API_KEY_HEADER};
use tablehost_events::EventBus;

/// The plaintext key every helper request carries.
pub const TEST_API_KEY: &str = "test-api-key";

/// Build a test `ServerConfig` with safe defaults.
///
/// Dates are evaluated in UTC and uploads are disabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        api_key_hash: hash_api_key(TEST_API_KEY),
        timezone: chrono_tz::UTC,
        media: None,
    }
}

/// Build the full application router with all middleware layers.
///
/// Mirrors the router construction in `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(pool, None, Arc::new(EventBus::default()))
}

/// Same as [`build_test_app`] with an image uploader installed.
pub fn build_test_app_with_media(pool: PgPool, media: Arc<dyn MediaUploader>) -> Router {
    build_app(pool, Some(media), Arc::new(EventBus::default()))
}

/// Same as [`build_test_app`] sharing the given bus, so tests can observe
/// published events.
pub fn build_test_app_with_bus(pool: PgPool, event_bus: Arc<EventBus>) -> Router {
    build_app(pool, None, event_bus)
}

fn build_app(pool: PgPool, media: Option<Arc<dyn MediaUploader>>, event_bus: Arc<EventBus>) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus,
        media,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)])
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes(state.clone()))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers (all carry the API key)
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(API_KEY_HEADER, TEST_API_KEY);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// A date `days` after today (UTC), as `YYYY-MM-DD`.
pub fn days_from_today(days: u64) -> String {
    let today: NaiveDate = chrono::Utc::now().date_naive();
    (today + Days::new(days)).to_string()
}

pub fn days_before_today(days: u64) -> String {
    let today: NaiveDate = chrono::Utc::now().date_naive();
    (today - Days::new(days)).to_string()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Public ids of a minimal dining room: one restaurant offering a Dinner
/// shift (18:00-23:00), one floorplan, one reservable element, one
/// decorative element and two four-top tables.
pub struct DiningRoom {
    pub restaurant_id: String,
    pub shift_id: String,
    pub floorplan_id: String,
    pub element_id: String,
    pub decor_element_id: String,
    pub table_ids: Vec<String>,
}

/// POST and return the created `data.id`, asserting 201.
pub async fn create(pool: &PgPool, uri: &str, body: Value) -> String {
    let response = post_json(build_test_app(pool.clone()), uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

pub async fn seed_dining_room(pool: &PgPool) -> DiningRoom {
    let restaurant_id = create(pool, "/api/v1/restaurants", json!({"name": "Casa Lola"})).await;
    let shift_id = create(
        pool,
        "/api/v1/shifts",
        json!({"name": "Dinner", "startTime": "18:00:00", "endTime": "23:00:00"}),
    )
    .await;
    create(
        pool,
        &format!("/api/v1/restaurants/{restaurant_id}/shifts"),
        json!({"shiftId": shift_id}),
    )
    .await;

    let floorplan_id = create(
        pool,
        &format!("/api/v1/restaurants/{restaurant_id}/floorplans"),
        json!({"name": "Main room"}),
    )
    .await;
    let element_id = create(
        pool,
        "/api/v1/elements",
        json!({"name": "Square four", "tableType": "square", "purpose": "Reservable"}),
    )
    .await;
    let decor_element_id = create(
        pool,
        "/api/v1/elements",
        json!({"name": "Plant", "tableType": "decor", "purpose": "Decorative"}),
    )
    .await;

    let mut table_ids = Vec::new();
    for name in ["T1", "T2"] {
        table_ids.push(
            create(
                pool,
                &format!("/api/v1/floorplans/{floorplan_id}/tables"),
                json!({"elementId": element_id, "tableName": name, "minCapacity": 2, "maxCapacity": 4}),
            )
            .await,
        );
    }

    DiningRoom {
        restaurant_id,
        shift_id,
        floorplan_id,
        element_id,
        decor_element_id,
        table_ids,
    }
}
