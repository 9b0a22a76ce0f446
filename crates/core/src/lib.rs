//! Domain primitives and pure business rules for the reservation backend.
//!
//! Nothing in here touches the database or the network: handlers load
//! entities, hand plain values to these rules and persist the outcome.

pub mod api_keys;
pub mod assignment;
pub mod capacity;
pub mod combined_table;
pub mod error;
pub mod table_block;
pub mod time;
pub mod types;
