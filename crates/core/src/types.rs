//! Shared primitive aliases.

/// User, follow, and game ids are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Timestamps are stored as `TIMESTAMPTZ` and always handled in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
