//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod artwork_repo;
pub mod group_repo;

pub use artwork_repo::ArtworkRepo;
pub use group_repo::GroupRepo;
