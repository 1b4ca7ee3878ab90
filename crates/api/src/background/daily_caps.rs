//! Scheduled daily XP budget reset.
//!
//! Runs [`DailyCapSweeper::reset_all_daily_caps`] on wall-clock boundaries:
//! multiples of the period counted from the Unix epoch in UTC. With the
//! default 24 hour period that is every UTC midnight, regardless of when the
//! process started or how often it restarts.

use std::sync::Arc;
use std::time::Duration;

use arcade_core::progression::DailyCapSweeper;
use chrono::{DateTime, Utc};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Run the daily cap reset loop until `cancel` is triggered.
pub async fn run(sweeper: Arc<DailyCapSweeper>, period: Duration, cancel: CancellationToken) {
    run_aligned(sweeper, period, Utc::now(), cancel).await;
}

/// Time from `now` until the next multiple of `period` since the epoch.
/// Zero when `now` sits exactly on a boundary.
pub fn delay_until_next_boundary(now: DateTime<Utc>, period: Duration) -> Duration {
    let period_ms = period.as_millis().max(1);
    let now_ms = u128::try_from(now.timestamp_millis()).unwrap_or(0);
    let remaining = (period_ms - now_ms % period_ms) % period_ms;
    Duration::from_millis(u64::try_from(remaining).unwrap_or(u64::MAX))
}

/// A failed sweep is logged and retried at the next boundary; the sweep is
/// idempotent so a partial run is repaired by the next one.
async fn run_aligned(
    sweeper: Arc<DailyCapSweeper>,
    period: Duration,
    started_at: DateTime<Utc>,
    cancel: CancellationToken,
) {
    let first = delay_until_next_boundary(started_at, period);
    tracing::info!(
        interval_secs = period.as_secs(),
        first_sweep_in_secs = first.as_secs(),
        "Daily cap reset job started"
    );

    let mut interval = interval_at(Instant::now() + first, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Daily cap reset job stopping");
                break;
            }
            _ = interval.tick() => {
                match sweeper.reset_all_daily_caps().await {
                    Ok(report) => {
                        tracing::info!(
                            users_reset = report.users_reset,
                            elapsed_ms = report.elapsed_ms,
                            "Daily cap reset: sweep complete"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Daily cap reset: sweep failed");
                    }
                }
            }
        }
    }
}
