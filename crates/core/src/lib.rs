//! Domain types and pure logic for the arcade backend.
//!
//! Nothing in this crate talks to a database or the network. Persistence is
//! reached through the [`progression::store::ProgressionStore`] trait so the
//! same rules run against PostgreSQL in production and an in-memory store in
//! tests.

pub mod error;
pub mod follow;
pub mod progression;
pub mod rps;
pub mod types;
pub mod user;
