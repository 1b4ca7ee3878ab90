//! Follow-graph rules.

use crate::error::CoreError;
use crate::types::DbId;

/// A user may follow anyone except themselves.
pub fn validate_follow(follower_id: DbId, followed_id: DbId) -> Result<(), CoreError> {
    if follower_id == followed_id {
        return Err(CoreError::Validation("You cannot follow yourself".into()));
    }
    Ok(())
}
