//! Unit tests for `WsManager` and the notification router.
//!
//! These exercise the connection manager directly, without performing any
//! HTTP upgrades.

use std::sync::Arc;

use axum::extract::ws::Message;
use tablehost_api::notifications::NotificationRouter;
use tablehost_api::ws::WsManager;
use tablehost_events::{DomainEvent, EventBus, EventKind, Topic};
use uuid::Uuid;

fn text(message: Message) -> serde_json::Value {
    match message {
        Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
        other => panic!("Expected a text frame, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Connection bookkeeping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn add_and_remove_track_the_count() {
    let manager = WsManager::new();

    let _rx = manager.add("conn-1".to_string()).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn remove_unknown_id_is_noop() {
    let manager = WsManager::new();
    let _rx = manager.add("conn-1".to_string()).await;

    manager.remove("nonexistent").await;

    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn new_connection_starts_on_all() {
    let manager = WsManager::new();
    let _rx = manager.add("conn-1".to_string()).await;

    assert_eq!(manager.topics("conn-1").await, Some(vec![Topic::All]));
}

// ---------------------------------------------------------------------------
// Topic subscriptions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn subscribe_and_unsubscribe_change_topics() {
    let manager = WsManager::new();
    let _rx = manager.add("conn-1".to_string()).await;
    let restaurant = Topic::Restaurant(Uuid::new_v4());

    assert!(manager.subscribe("conn-1", restaurant).await);
    assert!(manager.unsubscribe("conn-1", Topic::All).await);

    assert_eq!(manager.topics("conn-1").await, Some(vec![restaurant]));
}

#[tokio::test]
async fn subscribe_unknown_connection_returns_false() {
    let manager = WsManager::new();

    assert!(!manager.subscribe("ghost", Topic::All).await);
    assert!(!manager.unsubscribe("ghost", Topic::All).await);
}

#[tokio::test]
async fn send_to_topics_delivers_once_per_connection() {
    let manager = WsManager::new();
    let restaurant = Topic::Restaurant(Uuid::new_v4());

    let mut rx_both = manager.add("both".to_string()).await;
    manager.subscribe("both", restaurant).await;

    let mut rx_other = manager.add("other".to_string()).await;
    manager.unsubscribe("other", Topic::All).await;
    manager
        .subscribe("other", Topic::Restaurant(Uuid::new_v4()))
        .await;

    let sent = manager
        .send_to_topics(&[Topic::All, restaurant], Message::Text("hello".into()))
        .await;

    assert_eq!(sent, 1);
    assert!(rx_both.try_recv().is_ok());
    assert!(rx_both.try_recv().is_err(), "must not be delivered twice");
    assert!(rx_other.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Delivery failures, ping and shutdown
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_topics_skips_closed_channels() {
    let manager = WsManager::new();
    let mut live = manager.add("live".to_string()).await;
    drop(manager.add("gone".to_string()).await);

    let delivered = manager
        .send_to_topics(&[Topic::All], Message::Text("hello".into()))
        .await;

    assert_eq!(delivered, 1);
    assert!(matches!(live.try_recv().unwrap(), Message::Text(t) if t.as_str() == "hello"));
}

#[tokio::test]
async fn ping_all_sends_ping_frames() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string()).await;

    assert!(manager.ping_all().await.is_empty());

    assert!(matches!(rx.try_recv().unwrap(), Message::Ping(_)));
}

#[tokio::test]
async fn ping_all_drops_connections_with_closed_channels() {
    let manager = WsManager::new();
    let _live = manager.add("live".to_string()).await;
    drop(manager.add("gone".to_string()).await);

    assert_eq!(manager.ping_all().await, vec!["gone".to_string()]);
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string()).await;

    manager.shutdown_all().await;

    assert!(matches!(rx.try_recv().unwrap(), Message::Close(None)));
    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Notification router
// ---------------------------------------------------------------------------

#[tokio::test]
async fn router_frames_event_for_matching_subscribers() {
    let manager = Arc::new(WsManager::new());
    let restaurant = Uuid::new_v4();
    let table = Uuid::new_v4();

    let mut rx_room = manager.add("room".to_string()).await;
    manager.unsubscribe("room", Topic::All).await;
    manager.subscribe("room", Topic::Restaurant(restaurant)).await;

    let mut rx_elsewhere = manager.add("elsewhere".to_string()).await;
    manager.unsubscribe("elsewhere", Topic::All).await;
    manager
        .subscribe("elsewhere", Topic::Restaurant(Uuid::new_v4()))
        .await;

    let router = NotificationRouter::new(Arc::clone(&manager));
    let event = DomainEvent::new(EventKind::TableBlocked)
        .with_restaurant(restaurant)
        .with_table(table);

    assert_eq!(router.route_event(&event).await, 1);

    let frame = text(rx_room.try_recv().unwrap());
    assert_eq!(frame["type"], "event");
    assert_eq!(frame["event"], "table.blocked");
    assert_eq!(frame["restaurantId"], restaurant.to_string());
    assert_eq!(frame["tableId"], table.to_string());
    assert!(frame["timestamp"].is_string());

    assert!(rx_elsewhere.try_recv().is_err());
}

#[tokio::test]
async fn router_stops_when_bus_is_dropped() {
    let manager = Arc::new(WsManager::new());
    let mut rx = manager.add("conn-1".to_string()).await;

    let bus = EventBus::default();
    let handle = tokio::spawn(NotificationRouter::new(Arc::clone(&manager)).run(bus.subscribe()));

    bus.publish(DomainEvent::new(EventKind::ClientCreated).with_client(Uuid::new_v4()));
    drop(bus);

    tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("router should exit once the bus is closed")
        .unwrap();

    let frame = text(rx.try_recv().unwrap());
    assert_eq!(frame["event"], "client.created");
}
