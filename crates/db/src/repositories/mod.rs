//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Every "with related" query shape is its
//! own named method; joined column lists live in per-repository constants.

pub mod black_list_repo;
pub mod block_table_repo;
pub mod client_repo;
pub mod combined_table_repo;
pub mod element_repo;
pub mod floorplan_repo;
pub mod reservation_repo;
pub mod restaurant_repo;
pub mod shift_repo;
pub mod table_repo;

pub use black_list_repo::BlackListRepo;
pub use block_table_repo::BlockTableRepo;
pub use client_repo::ClientRepo;
pub use combined_table_repo::CombinedTableRepo;
pub use element_repo::ElementRepo;
pub use floorplan_repo::FloorplanRepo;
pub use reservation_repo::ReservationRepo;
pub use restaurant_repo::RestaurantRepo;
pub use shift_repo::ShiftRepo;
pub use table_repo::TableRepo;
