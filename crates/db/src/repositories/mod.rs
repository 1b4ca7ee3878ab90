//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument. [`PgProgressionStore`] is the
//! exception: it owns a pool so it can stand behind the core store trait.

pub mod follow_repo;
pub mod progression_repo;
pub mod rps_game_repo;
pub mod user_repo;

pub use follow_repo::FollowRepo;
pub use progression_repo::PgProgressionStore;
pub use rps_game_repo::RpsGameRepo;
pub use user_repo::UserRepo;
