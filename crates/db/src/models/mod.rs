//! Row models and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching a (possibly joined) row. The
//!   internal surrogate keys are never serialized; `public_id` goes out as `id`.
//! - `Deserialize` + `Validate` DTOs for create and update commands.

pub mod black_list;
pub mod block_table;
pub mod client;
pub mod combined_table;
pub mod element;
pub mod floorplan;
pub mod reservation;
pub mod restaurant;
pub mod shift;
pub mod status;
pub mod table;
