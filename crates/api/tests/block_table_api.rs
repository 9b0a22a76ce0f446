//! HTTP-level tests for blocking tables.

mod common;

use axum::http::StatusCode;
use common::{body_json, days_before_today, days_from_today, delete, get, post_json, put_json, seed_dining_room};
use serde_json::{json, Value};
use sqlx::PgPool;

fn window(start_date: &str, start_time: &str, end_date: &str, end_time: &str) -> Value {
    json!({
        "startDate": start_date,
        "startTime": start_time,
        "endDate": end_date,
        "endTime": end_time,
    })
}

async fn book_upcoming_on_table(pool: &PgPool, room: &common::DiningRoom, date: &str, time: &str) -> String {
    let reservation_id = common::create(
        pool,
        &format!("/api/v1/restaurants/{}/reservations", room.restaurant_id),
        json!({
            "shiftId": room.shift_id,
            "reservationDate": date,
            "reservationTime": time,
            "partySize": 2,
            "status": "Upcoming",
        }),
    )
    .await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/reservations/{reservation_id}/table"),
        json!({"tableId": room.table_ids[0]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    reservation_id
}

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_block_inside_dinner_succeeds(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let date = days_from_today(7);

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/tables/{}/blocks", room.table_ids[0]),
        json!({
            "startDate": date,
            "startTime": "19:00:00",
            "endDate": date,
            "endTime": "20:00:00",
            "notes": "Private tasting",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["startTime"], "19:00:00");
    assert_eq!(json["data"]["notes"], "Private tasting");
    assert_eq!(json["data"]["table"]["tableName"], "T1");
    assert_eq!(json["data"]["table"]["elementName"], "Square four");
    assert_eq!(json["data"]["table"]["floorplanPublicId"], room.floorplan_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_block_over_upcoming_reservation_conflicts(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let date = days_from_today(7);
    book_upcoming_on_table(&pool, &room, &date, "19:30:00").await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/tables/{}/blocks", room.table_ids[0]),
        window(&date, "19:00:00", &date, "20:00:00"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["message"], "CONFLICT");
    let message = json["errorMessage"].as_str().unwrap();
    assert!(message.contains("19:30"), "got: {message}");
    assert!(message.contains(&date), "got: {message}");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reservation_at_block_end_conflicts(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let date = days_from_today(3);
    book_upcoming_on_table(&pool, &room, &date, "20:00:00").await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/tables/{}/blocks", room.table_ids[0]),
        window(&date, "19:00:00", &date, "20:00:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_upcoming_reservation_does_not_conflict(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let date = days_from_today(3);
    let reservation_id = book_upcoming_on_table(&pool, &room, &date, "19:30:00").await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/reservations/{reservation_id}/status"),
        json!({"status": "Cancelled"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/tables/{}/blocks", room.table_ids[0]),
        window(&date, "19:00:00", &date, "20:00:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reservation_on_other_table_does_not_conflict(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let date = days_from_today(3);
    book_upcoming_on_table(&pool, &room, &date, "19:30:00").await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/tables/{}/blocks", room.table_ids[1]),
        window(&date, "19:00:00", &date, "20:00:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_temporal_rejections(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let uri = format!("/api/v1/tables/{}/blocks", room.table_ids[0]);
    let date = days_from_today(2);
    let next = days_from_today(3);

    let cases = [
        window(&date, "20:00:00", &date, "20:00:00"),
        window(&date, "21:00:00", &date, "20:00:00"),
        window(&next, "19:00:00", &date, "20:00:00"),
        window(&days_before_today(1), "19:00:00", &days_before_today(1), "20:00:00"),
    ];

    for body in cases {
        let response = post_json(common::build_test_app(pool.clone()), &uri, body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(body_json(response).await["message"], "INVALID_ARGUMENT");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_block_outside_shift_hours_is_rejected(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let date = days_from_today(2);

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/tables/{}/blocks", room.table_ids[0]),
        window(&date, "17:00:00", &date, "19:00:00"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errorMessage"].as_str().unwrap().contains("outside shift hours"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_restaurant_without_shifts_cannot_block(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/restaurants/{}/shifts/{}", room.restaurant_id, room.shift_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let date = days_from_today(2);
    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/tables/{}/blocks", room.table_ids[0]),
        window(&date, "19:00:00", &date, "20:00:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_decorative_table_cannot_be_blocked(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let plant = common::create(
        &pool,
        &format!("/api/v1/floorplans/{}/tables", room.floorplan_id),
        json!({"elementId": room.decor_element_id, "tableName": "Plant"}),
    )
    .await;
    let date = days_from_today(2);

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/tables/{plant}/blocks"),
        window(&date, "19:00:00", &date, "20:00:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_block_unknown_table_returns_404(pool: PgPool) {
    let date = days_from_today(2);
    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/tables/{}/blocks", uuid::Uuid::new_v4()),
        window(&date, "19:00:00", &date, "20:00:00"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// List and unblock
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_and_unblock(pool: PgPool) {
    let room = seed_dining_room(&pool).await;
    let date = days_from_today(5);
    let uri = format!("/api/v1/tables/{}/blocks", room.table_ids[0]);
    let block_id = common::create(&pool, &uri, window(&date, "19:00:00", &date, "20:00:00")).await;

    let response = get(common::build_test_app(pool.clone()), &uri).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["id"], block_id);

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/blocks/{block_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/v1/blocks/{block_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(common::build_test_app(pool), &uri).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}
