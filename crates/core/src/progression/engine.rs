//! Award service: load, compute, conditional write.

use std::sync::Arc;

use super::award::{apply_award, AwardOutcome};
use super::store::ProgressionStore;
use super::{ProgressionError, ProgressionRecord};
use crate::types::DbId;

/// Applies XP awards through a [`ProgressionStore`].
///
/// The engine never retries. A lost race comes back as
/// [`ProgressionError::Conflict`] and the caller decides whether to try again.
#[derive(Clone)]
pub struct ProgressionEngine {
    store: Arc<dyn ProgressionStore>,
}

impl ProgressionEngine {
    pub fn new(store: Arc<dyn ProgressionStore>) -> Self {
        Self { store }
    }

    /// Current progression for a user.
    pub async fn progression(&self, user_id: DbId) -> Result<ProgressionRecord, ProgressionError> {
        self.store
            .load(user_id)
            .await?
            .ok_or(ProgressionError::NotFound { user_id })
    }

    /// Award `xp_awarded` to both tracks of `user_id`.
    ///
    /// Negative amounts are rejected before the store is touched. An award
    /// that changes nothing (exhausted budgets, zero XP) is not written.
    pub async fn award_xp(
        &self,
        user_id: DbId,
        xp_awarded: i32,
    ) -> Result<AwardOutcome, ProgressionError> {
        if xp_awarded < 0 {
            return Err(ProgressionError::InvariantViolation(format!(
                "XP award must not be negative, got {xp_awarded}"
            )));
        }

        let snapshot = self.progression(user_id).await?;
        let mut outcome = apply_award(&snapshot, xp_awarded)?;

        if outcome.is_noop() {
            tracing::debug!(user_id, xp_awarded, "Award skipped: nothing to apply");
            return Ok(outcome);
        }

        outcome.record = self
            .store
            .update_fields(user_id, snapshot.progress_version, &outcome.record.fields())
            .await?;

        tracing::debug!(
            user_id,
            xp_awarded,
            applied = outcome.primary.applied,
            buddy_applied = outcome.buddy.applied,
            discarded = outcome.primary.discarded,
            "XP awarded"
        );
        if outcome.primary.leveled_up {
            tracing::info!(user_id, level = outcome.record.level, "Level up");
        }
        if outcome.buddy.leveled_up {
            tracing::info!(
                user_id,
                buddy_level = outcome.record.buddy_level,
                "Buddy level up"
            );
        }

        Ok(outcome)
    }
}
