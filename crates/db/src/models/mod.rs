//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts where the table takes inserts
//! - A `Serialize` response shape when the row must not leave the API as-is

pub mod follow;
pub mod progression;
pub mod rps_game;
pub mod user;
