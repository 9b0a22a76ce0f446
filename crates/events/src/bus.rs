//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`DomainEvent`]s. It is
//! shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tablehost_core::types::PublicId;
use tokio::sync::broadcast;

use crate::topic::Topic;

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// What happened. Serialized as a dot-separated name, e.g. `"table.blocked"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "restaurant.created")]
    RestaurantCreated,
    #[serde(rename = "restaurant.updated")]
    RestaurantUpdated,
    #[serde(rename = "restaurant.deleted")]
    RestaurantDeleted,
    #[serde(rename = "restaurant.shift_attached")]
    RestaurantShiftAttached,
    #[serde(rename = "restaurant.shift_detached")]
    RestaurantShiftDetached,
    #[serde(rename = "shift.created")]
    ShiftCreated,
    #[serde(rename = "shift.updated")]
    ShiftUpdated,
    #[serde(rename = "shift.deleted")]
    ShiftDeleted,
    #[serde(rename = "element.created")]
    ElementCreated,
    #[serde(rename = "element.updated")]
    ElementUpdated,
    #[serde(rename = "element.deleted")]
    ElementDeleted,
    #[serde(rename = "floorplan.created")]
    FloorplanCreated,
    #[serde(rename = "floorplan.updated")]
    FloorplanUpdated,
    #[serde(rename = "floorplan.deleted")]
    FloorplanDeleted,
    #[serde(rename = "table.created")]
    TableCreated,
    #[serde(rename = "table.updated")]
    TableUpdated,
    #[serde(rename = "table.deleted")]
    TableDeleted,
    #[serde(rename = "table.blocked")]
    TableBlocked,
    #[serde(rename = "table.unblocked")]
    TableUnblocked,
    #[serde(rename = "combined_table.created")]
    CombinedTableCreated,
    #[serde(rename = "combined_table.updated")]
    CombinedTableUpdated,
    #[serde(rename = "combined_table.deleted")]
    CombinedTableDeleted,
    #[serde(rename = "reservation.created")]
    ReservationCreated,
    #[serde(rename = "reservation.updated")]
    ReservationUpdated,
    #[serde(rename = "reservation.status_changed")]
    ReservationStatusChanged,
    #[serde(rename = "reservation.table_assigned")]
    ReservationTableAssigned,
    #[serde(rename = "reservation.table_unassigned")]
    ReservationTableUnassigned,
    #[serde(rename = "reservation.deleted")]
    ReservationDeleted,
    #[serde(rename = "client.created")]
    ClientCreated,
    #[serde(rename = "client.updated")]
    ClientUpdated,
    #[serde(rename = "client.deleted")]
    ClientDeleted,
    #[serde(rename = "client.blacklisted")]
    ClientBlacklisted,
    #[serde(rename = "client.unblacklisted")]
    ClientUnblacklisted,
}

// ---------------------------------------------------------------------------
// DomainEvent
// ---------------------------------------------------------------------------

/// A change notification.
///
/// Constructed via [`DomainEvent::new`] and enriched with the `with_*`
/// builders. Only public ids travel; subscribers re-fetch what they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    pub event: EventKind,
    pub restaurant_id: Option<PublicId>,
    pub floorplan_id: Option<PublicId>,
    pub table_id: Option<PublicId>,
    pub reservation_id: Option<PublicId>,
    pub client_id: Option<PublicId>,
    /// The primary entity the event is about, when it is not one of the
    /// ids above (shift, element, block, combined table, blacklist row).
    pub entity_id: Option<PublicId>,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent {
    pub fn new(event: EventKind) -> Self {
        Self {
            event,
            restaurant_id: None,
            floorplan_id: None,
            table_id: None,
            reservation_id: None,
            client_id: None,
            entity_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_restaurant(mut self, id: PublicId) -> Self {
        self.restaurant_id = Some(id);
        self
    }

    pub fn with_floorplan(mut self, id: PublicId) -> Self {
        self.floorplan_id = Some(id);
        self
    }

    pub fn with_table(mut self, id: PublicId) -> Self {
        self.table_id = Some(id);
        self
    }

    pub fn with_reservation(mut self, id: PublicId) -> Self {
        self.reservation_id = Some(id);
        self
    }

    pub fn with_client(mut self, id: PublicId) -> Self {
        self.client_id = Some(id);
        self
    }

    pub fn with_entity(mut self, id: PublicId) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Every topic this event is delivered to. Always includes
    /// [`Topic::All`].
    pub fn topics(&self) -> Vec<Topic> {
        let mut topics = vec![Topic::All];
        topics.extend(self.restaurant_id.map(Topic::Restaurant));
        topics.extend(self.floorplan_id.map(Topic::Floorplan));
        topics.extend(self.reservation_id.map(Topic::Reservation));
        topics.extend(self.client_id.map(Topic::Client));
        topics
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`DomainEvent`].
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no active subscribers the event is silently dropped.
    pub fn publish(&self, event: DomainEvent) {
        tracing::trace!(event = ?event.event, "Publishing domain event");
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
