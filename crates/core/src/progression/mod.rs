//! Experience, level, and buddy progression.
//!
//! Every user carries two parallel tracks:
//!
//! - the **primary** track (`level`, `experience_points`), which needs
//!   `level * 100` XP per level-up;
//! - the **buddy** track (`buddy_level`, `buddy_experience_points`), which
//!   needs `buddy_level * 10_000` XP per level-up.
//!
//! Each track has a daily XP budget that awards draw down and the daily sweep
//! replenishes. The buddy level selects the budget tier and, from level 10,
//! doubles every award.
//!
//! - [`award`] -- pure award computation.
//! - [`engine`] -- load / compute / conditional-write service.
//! - [`sweeper`] -- daily budget reset across all users.
//! - [`store`] -- persistence seam.
//! - [`memory`] -- in-memory store.

pub mod award;
pub mod engine;
pub mod memory;
pub mod store;
pub mod sweeper;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

pub use award::{apply_award, AwardOutcome, TrackAward};
pub use engine::ProgressionEngine;
pub use store::{DailyBudgets, ProgressionFields, ProgressionStore, RecordFilter};
pub use sweeper::{DailyCapSweeper, SweepReport, TierSweep};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// XP needed per primary level (`level * XP_PER_LEVEL`).
pub const XP_PER_LEVEL: i64 = 100;

/// XP needed per buddy level (`buddy_level * BUDDY_XP_PER_LEVEL`).
pub const BUDDY_XP_PER_LEVEL: i64 = 10_000;

/// Buddy level from which every award is doubled.
pub const DOUBLE_REWARD_BUDDY_LEVEL: i32 = 10;

/// Starting values for a freshly registered user. Must match the column
/// defaults in the `users` migration.
pub const DEFAULT_LEVEL: i32 = 1;
pub const DEFAULT_BUDDY_LEVEL: i32 = 1;
pub const DEFAULT_EXPERIENCE_FOR_DAY: i32 = 1000;
pub const DEFAULT_BUDDY_EXPERIENCE_FOR_DAY: i32 = 2000;

// ---------------------------------------------------------------------------
// Budget tiers
// ---------------------------------------------------------------------------

/// One row of the daily budget schedule.
///
/// A user qualifies for a tier when `buddy_level >= min_buddy_level`; the
/// highest qualifying tier wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapTier {
    pub min_buddy_level: i32,
    pub experience_for_day: i32,
    pub buddy_experience_for_day: i32,
}

impl CapTier {
    pub const fn budgets(&self) -> DailyBudgets {
        DailyBudgets {
            experience_for_day: self.experience_for_day,
            buddy_experience_for_day: self.buddy_experience_for_day,
        }
    }
}

/// Daily budget schedule in ascending `min_buddy_level` order.
///
/// Level 10 has no row of its own: its budgets equal level 9 and its only
/// unlock is the reward multiplier.
pub const CAP_TIERS: &[CapTier] = &[
    CapTier {
        min_buddy_level: 1,
        experience_for_day: 1000,
        buddy_experience_for_day: 2000,
    },
    CapTier {
        min_buddy_level: 2,
        experience_for_day: 1500,
        buddy_experience_for_day: 2000,
    },
    CapTier {
        min_buddy_level: 5,
        experience_for_day: 1500,
        buddy_experience_for_day: 2500,
    },
    CapTier {
        min_buddy_level: 6,
        experience_for_day: 2000,
        buddy_experience_for_day: 2500,
    },
    CapTier {
        min_buddy_level: 9,
        experience_for_day: 2000,
        buddy_experience_for_day: 3000,
    },
];

/// Daily budgets a user with the given buddy level is reset to.
pub fn daily_budgets_for(buddy_level: i32) -> DailyBudgets {
    CAP_TIERS
        .iter()
        .rev()
        .find(|tier| buddy_level >= tier.min_buddy_level)
        .unwrap_or(&CAP_TIERS[0])
        .budgets()
}

// ---------------------------------------------------------------------------
// Derived quantities
// ---------------------------------------------------------------------------

/// XP required to advance from `level` to `level + 1`.
pub fn xp_to_level_up(level: i32) -> i64 {
    i64::from(level) * XP_PER_LEVEL
}

/// Buddy XP required to advance from `buddy_level` to `buddy_level + 1`.
pub fn buddy_xp_to_level_up(buddy_level: i32) -> i64 {
    i64::from(buddy_level) * BUDDY_XP_PER_LEVEL
}

/// Factor applied to every award for a user with this buddy level.
pub fn reward_multiplier(buddy_level: i32) -> i64 {
    if buddy_level >= DOUBLE_REWARD_BUDDY_LEVEL {
        2
    } else {
        1
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Progression columns of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRecord {
    pub user_id: DbId,
    pub level: i32,
    pub experience_points: i32,
    /// Remaining primary-track XP budget for the current day.
    pub experience_for_day: i32,
    pub buddy_level: i32,
    pub buddy_experience_points: i32,
    /// Remaining buddy-track XP budget for the current day.
    pub buddy_experience_for_day: i32,
    /// Bumped on every write; the conditional update compares against it.
    pub progress_version: i64,
}

impl ProgressionRecord {
    /// A record with registration defaults.
    pub fn new(user_id: DbId) -> Self {
        Self {
            user_id,
            level: DEFAULT_LEVEL,
            experience_points: 0,
            experience_for_day: DEFAULT_EXPERIENCE_FOR_DAY,
            buddy_level: DEFAULT_BUDDY_LEVEL,
            buddy_experience_points: 0,
            buddy_experience_for_day: DEFAULT_BUDDY_EXPERIENCE_FOR_DAY,
            progress_version: 0,
        }
    }

    /// The mutable progression fields, as written back by the engine.
    pub fn fields(&self) -> ProgressionFields {
        ProgressionFields {
            level: self.level,
            experience_points: self.experience_points,
            experience_for_day: self.experience_for_day,
            buddy_level: self.buddy_level,
            buddy_experience_points: self.buddy_experience_points,
            buddy_experience_for_day: self.buddy_experience_for_day,
        }
    }

    /// Check the invariants every stored record must satisfy.
    pub fn validate(&self) -> Result<(), ProgressionError> {
        if self.level < 1 || self.buddy_level < 1 {
            return Err(ProgressionError::InvariantViolation(format!(
                "user {} has level {} / buddy level {}; both must be at least 1",
                self.user_id, self.level, self.buddy_level
            )));
        }
        if self.experience_points < 0
            || self.buddy_experience_points < 0
            || self.experience_for_day < 0
            || self.buddy_experience_for_day < 0
        {
            return Err(ProgressionError::InvariantViolation(format!(
                "user {} has a negative XP or budget value",
                self.user_id
            )));
        }
        if i64::from(self.experience_points) >= xp_to_level_up(self.level)
            || i64::from(self.buddy_experience_points) >= buddy_xp_to_level_up(self.buddy_level)
        {
            return Err(ProgressionError::InvariantViolation(format!(
                "user {} holds XP at or above its level-up threshold",
                self.user_id
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure modes of the progression engine and its store.
#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    #[error("User not found: {user_id}")]
    NotFound { user_id: DbId },

    /// Input or stored state the algorithm refuses to process.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// The record changed between load and write. Safe to retry.
    #[error("Concurrent progression update for user {user_id}")]
    Conflict { user_id: DbId },

    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ProgressionError {
    /// Wrap a backend error.
    pub fn storage(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage(err.into())
    }
}
