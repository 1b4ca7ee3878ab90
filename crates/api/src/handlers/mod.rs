pub mod admin;
pub mod auth;
pub mod follows;
pub mod games;
pub mod progression;
pub mod users;
