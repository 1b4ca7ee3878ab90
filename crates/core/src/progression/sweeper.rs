//! Daily budget reset across every user.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::Mutex;

use super::store::{ProgressionStore, RecordFilter};
use super::{ProgressionError, CAP_TIERS};

/// Rows touched by one tier of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierSweep {
    pub min_buddy_level: i32,
    pub rows: u64,
}

/// Summary of a completed sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Users reset to the base tier (every user).
    pub users_reset: u64,
    /// Rows rewritten per tier, in application order.
    pub tiers: Vec<TierSweep>,
    pub elapsed_ms: u64,
}

/// Resets daily XP budgets to each user's tier baseline.
///
/// The base tier is written to every row, then each higher tier overwrites
/// the rows that qualify for it, lowest threshold first. Sweeps are
/// serialized: a second call waits for the first to finish.
pub struct DailyCapSweeper {
    store: Arc<dyn ProgressionStore>,
    running: Mutex<()>,
}

impl DailyCapSweeper {
    pub fn new(store: Arc<dyn ProgressionStore>) -> Self {
        Self {
            store,
            running: Mutex::new(()),
        }
    }

    /// Overwrite both daily budgets for every user.
    ///
    /// Safe to re-run after a partial failure: the result depends only on
    /// each user's buddy level.
    pub async fn reset_all_daily_caps(&self) -> Result<SweepReport, ProgressionError> {
        let _guard = self.running.lock().await;
        let started = Instant::now();

        let mut tiers = Vec::with_capacity(CAP_TIERS.len());
        for (index, tier) in CAP_TIERS.iter().enumerate() {
            let filter = if index == 0 {
                RecordFilter::All
            } else {
                RecordFilter::BuddyLevelAtLeast(tier.min_buddy_level)
            };
            let rows = self.store.update_where(filter, tier.budgets()).await?;
            tracing::debug!(min_buddy_level = tier.min_buddy_level, rows, "Daily caps tier applied");
            tiers.push(TierSweep {
                min_buddy_level: tier.min_buddy_level,
                rows,
            });
        }

        let report = SweepReport {
            users_reset: tiers.first().map_or(0, |t| t.rows),
            tiers,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        tracing::info!(
            users_reset = report.users_reset,
            elapsed_ms = report.elapsed_ms,
            "Daily caps reset"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::memory::InMemoryProgressionStore;
    use crate::progression::ProgressionRecord;

    async fn seeded_store() -> Arc<InMemoryProgressionStore> {
        let store = Arc::new(InMemoryProgressionStore::new());
        for (user_id, buddy_level) in [(1, 1), (2, 2), (3, 5), (4, 6), (5, 9), (6, 10)] {
            store
                .insert(ProgressionRecord {
                    buddy_level,
                    experience_for_day: 3,
                    buddy_experience_for_day: 0,
                    experience_points: 42,
                    ..ProgressionRecord::new(user_id)
                })
                .await;
        }
        store
    }

    #[tokio::test]
    async fn resets_each_user_to_tier_baseline() {
        let store = seeded_store().await;
        let sweeper = DailyCapSweeper::new(store.clone());

        let report = sweeper.reset_all_daily_caps().await.unwrap();
        assert_eq!(report.users_reset, 6);

        let expected = [
            (1, 1000, 2000),
            (2, 1500, 2000),
            (3, 1500, 2500),
            (4, 2000, 2500),
            (5, 2000, 3000),
            (6, 2000, 3000),
        ];
        for (user_id, day, buddy_day) in expected {
            let record = store.get(user_id).await.unwrap();
            assert_eq!(record.experience_for_day, day, "user {user_id}");
            assert_eq!(record.buddy_experience_for_day, buddy_day, "user {user_id}");
            assert_eq!(record.experience_points, 42, "XP must not be touched");
        }
    }

    #[tokio::test]
    async fn sweep_is_idempotent() {
        let store = seeded_store().await;
        let sweeper = DailyCapSweeper::new(store.clone());

        sweeper.reset_all_daily_caps().await.unwrap();
        let mut once = Vec::new();
        for user_id in 1..=6 {
            let r = store.get(user_id).await.unwrap();
            once.push((r.experience_for_day, r.buddy_experience_for_day, r.level));
        }

        sweeper.reset_all_daily_caps().await.unwrap();
        for (index, user_id) in (1..=6).enumerate() {
            let r = store.get(user_id).await.unwrap();
            assert_eq!(
                (r.experience_for_day, r.buddy_experience_for_day, r.level),
                once[index]
            );
        }
    }

    #[tokio::test]
    async fn tier_rows_follow_thresholds() {
        let store = seeded_store().await;
        let sweeper = DailyCapSweeper::new(store);

        let report = sweeper.reset_all_daily_caps().await.unwrap();
        let rows: Vec<(i32, u64)> = report
            .tiers
            .iter()
            .map(|t| (t.min_buddy_level, t.rows))
            .collect();
        assert_eq!(rows, vec![(1, 6), (2, 5), (5, 4), (6, 3), (9, 2)]);
    }

    #[tokio::test]
    async fn empty_store_sweeps_cleanly() {
        let sweeper = DailyCapSweeper::new(Arc::new(InMemoryProgressionStore::new()));
        let report = sweeper.reset_all_daily_caps().await.unwrap();
        assert_eq!(report.users_reset, 0);
    }

    #[tokio::test]
    async fn sweep_makes_pending_award_conflict() {
        let store = seeded_store().await;
        let snapshot = store.get(1).await.unwrap();

        DailyCapSweeper::new(store.clone())
            .reset_all_daily_caps()
            .await
            .unwrap();

        let result = store
            .update_fields(1, snapshot.progress_version, &snapshot.fields())
            .await;
        assert!(matches!(result, Err(ProgressionError::Conflict { .. })));
    }
}
