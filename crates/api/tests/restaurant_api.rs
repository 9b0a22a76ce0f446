//! HTTP-level tests for restaurants, shifts, elements, floorplans and
//! placed tables.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json, seed_dining_room};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Restaurants
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_restaurant_returns_201_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/restaurants", json!({"name": "Casa Lola"})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["statusCode"], 201);
    assert_eq!(json["message"], "Restaurant created");
    assert_eq!(json["data"]["name"], "Casa Lola");
    assert!(json["data"]["id"].is_string(), "public id goes out as a uuid string");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_restaurant_with_empty_name_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/restaurants", json!({"name": ""})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "VALIDATION_ERROR");
    assert!(json["errorDetails"]["name"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_json_returns_400_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/restaurants", json!({"title": "no name"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "BAD_REQUEST");
    assert!(json["data"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_restaurant_get_update_delete(pool: PgPool) {
    let id = common::create(&pool, "/api/v1/restaurants", json!({"name": "Old"})).await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/restaurants/{id}"),
        json!({"name": "New"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "New");

    let response = get(common::build_test_app(pool.clone()), "/api/v1/restaurants").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/restaurants/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].is_null());

    let response = get(common::build_test_app(pool), &format!("/api/v1/restaurants/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "NOT_FOUND");
    assert_eq!(json["errorMessage"], format!("Restaurant {id} not found"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_restaurant_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/restaurants/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Shifts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_attach_shift_twice_is_idempotent(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let uri = format!("/api/v1/restaurants/{}/shifts", room.restaurant_id);

    let response = post_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"shiftId": room.shift_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(common::build_test_app(pool), &uri).await;
    let json = body_json(response).await;
    let shifts = json["data"].as_array().unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0]["name"], "Dinner");
    assert_eq!(shifts[0]["startTime"], "18:00:00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_detach_shift(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let uri = format!(
        "/api/v1/restaurants/{}/shifts/{}",
        room.restaurant_id, room.shift_id
    );

    let response = delete(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_shift_with_equal_start_and_end_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/shifts",
        json!({"name": "Nothing", "startTime": "12:00:00", "endTime": "12:00:00"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_overnight_shift_is_accepted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/shifts",
        json!({"name": "Late", "startTime": "22:00:00", "endTime": "02:00:00"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_element_in_use_cannot_be_deleted(pool: PgPool) {
    let room = seed_dining_room(&pool).await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/elements/{}", room.element_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/elements/{}", room.decor_element_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_element_purpose_serializes_by_name(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/elements/{}", room.element_id),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["purpose"], "Reservable");
    assert_eq!(json["data"]["tableType"], "square");
}

// ---------------------------------------------------------------------------
// Floorplans and tables
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_floorplan_layout_lists_tables(pool: PgPool) {
    let room = seed_dining_room(&pool).await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/floorplans/{}", room.floorplan_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Main room");
    assert_eq!(json["data"]["restaurantPublicId"], room.restaurant_id);
    let tables = json["data"]["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0]["elementName"], "Square four");
    assert!(json["data"]["combinedTables"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_table_name_is_invalid_argument(pool: PgPool) {
    let room = seed_dining_room(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/floorplans/{}/tables", room.floorplan_id),
        json!({"elementId": room.element_id, "tableName": "T1"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "INVALID_ARGUMENT");
    assert!(json["errorMessage"].as_str().unwrap().contains("T1"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_table_capacity_defaults(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let uri = format!("/api/v1/floorplans/{}/tables", room.floorplan_id);

    let response = post_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"elementId": room.element_id, "tableName": "Bar 1"}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["minCapacity"], 1);
    assert_eq!(json["data"]["maxCapacity"], 1);

    let response = post_json(
        common::build_test_app(pool),
        &uri,
        json!({"elementId": room.decor_element_id, "tableName": "Ficus"}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["minCapacity"], 0);
    assert_eq!(json["data"]["purpose"], "Decorative");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reservable_table_with_zero_capacity_is_rejected(pool: PgPool) {
    let room = seed_dining_room(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/floorplans/{}/tables", room.floorplan_id),
        json!({"elementId": room.element_id, "tableName": "T9", "minCapacity": 0, "maxCapacity": 2}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_table_capacity_above_seat_limit_is_rejected(pool: PgPool) {
    let room = seed_dining_room(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/floorplans/{}/tables", room.floorplan_id),
        json!({"elementId": room.element_id, "tableName": "T9", "minCapacity": 2, "maxCapacity": 2000000000}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_table_geometry_and_capacity(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let uri = format!("/api/v1/tables/{}", room.table_ids[0]);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"x": 120.5, "rotation": 45.0, "maxCapacity": 6}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["x"], 120.5);
    assert_eq!(json["data"]["minCapacity"], 2);
    assert_eq!(json["data"]["maxCapacity"], 6);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"minCapacity": 8}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Renaming onto a sibling's label is refused; keeping its own is fine.
    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"tableName": "T2"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(common::build_test_app(pool), &uri, json!({"tableName": "T1"})).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_floorplan_removes_tables(pool: PgPool) {
    let room = seed_dining_room(&pool).await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/floorplans/{}", room.floorplan_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/tables/{}", room.table_ids[0]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
