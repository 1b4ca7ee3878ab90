//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireOperator`] -- Requires the operator flag.

pub mod auth;
pub mod rbac;
