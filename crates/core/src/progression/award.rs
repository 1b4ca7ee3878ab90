//! Pure award computation.
//!
//! [`apply_award`] turns a record snapshot and an XP amount into the record
//! that should be written back. It performs no I/O.

use serde::Serialize;

use super::{buddy_xp_to_level_up, reward_multiplier, xp_to_level_up, ProgressionError, ProgressionRecord};

/// What happened to one track during an award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackAward {
    /// Awarded XP after the multiplier.
    pub requested: i64,
    /// XP that fit in the daily budget and was added to the track.
    pub applied: i32,
    /// XP that exceeded the daily budget and was dropped.
    pub discarded: i64,
    pub leveled_up: bool,
}

/// Result of one award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AwardOutcome {
    /// The record after the award. `progress_version` is the stored version
    /// once the engine has written it.
    pub record: ProgressionRecord,
    pub multiplier: i64,
    pub primary: TrackAward,
    pub buddy: TrackAward,
}

impl AwardOutcome {
    /// Whether the award changed anything worth writing.
    pub fn is_noop(&self) -> bool {
        self.primary.applied == 0
            && self.buddy.applied == 0
            && !self.primary.leveled_up
            && !self.buddy.leveled_up
    }
}

/// Level, XP, and remaining budget of one track.
#[derive(Debug, Clone, Copy)]
struct Track {
    level: i32,
    xp: i32,
    for_day: i32,
}

/// Apply `xp_awarded` to both tracks of `record`.
///
/// The multiplied amount is clamped to each track's remaining budget; the
/// clamped total decides the level-up. A track gains at most one level per
/// call and keeps `total % threshold` as its new XP.
pub fn apply_award(
    record: &ProgressionRecord,
    xp_awarded: i32,
) -> Result<AwardOutcome, ProgressionError> {
    if xp_awarded < 0 {
        return Err(ProgressionError::InvariantViolation(format!(
            "XP award must not be negative, got {xp_awarded}"
        )));
    }
    record.validate()?;

    let multiplier = reward_multiplier(record.buddy_level);
    let requested = i64::from(xp_awarded) * multiplier;

    let (primary_track, primary) = advance(
        Track {
            level: record.level,
            xp: record.experience_points,
            for_day: record.experience_for_day,
        },
        requested,
        xp_to_level_up(record.level),
    )?;
    let (buddy_track, buddy) = advance(
        Track {
            level: record.buddy_level,
            xp: record.buddy_experience_points,
            for_day: record.buddy_experience_for_day,
        },
        requested,
        buddy_xp_to_level_up(record.buddy_level),
    )?;

    Ok(AwardOutcome {
        record: ProgressionRecord {
            level: primary_track.level,
            experience_points: primary_track.xp,
            experience_for_day: primary_track.for_day,
            buddy_level: buddy_track.level,
            buddy_experience_points: buddy_track.xp,
            buddy_experience_for_day: buddy_track.for_day,
            ..*record
        },
        multiplier,
        primary,
        buddy,
    })
}

fn advance(
    track: Track,
    requested: i64,
    threshold: i64,
) -> Result<(Track, TrackAward), ProgressionError> {
    let budget = i64::from(track.for_day);
    let applied = requested.min(budget);
    let total = i64::from(track.xp) + applied;

    let leveled_up = total >= threshold;
    let (level, xp) = if leveled_up {
        let next = track.level.checked_add(1).ok_or_else(|| {
            ProgressionError::InvariantViolation("level counter overflow".into())
        })?;
        (next, total % threshold)
    } else {
        (track.level, total)
    };

    let advanced = Track {
        level,
        xp: to_i32(xp, "experience points")?,
        for_day: to_i32(budget - applied, "daily budget")?,
    };
    let award = TrackAward {
        requested,
        applied: to_i32(applied, "applied XP")?,
        discarded: requested - applied,
        leveled_up,
    };
    Ok((advanced, award))
}

fn to_i32(value: i64, what: &str) -> Result<i32, ProgressionError> {
    i32::try_from(value)
        .map_err(|_| ProgressionError::InvariantViolation(format!("{what} out of range: {value}")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn record() -> ProgressionRecord {
        ProgressionRecord::new(1)
    }

    #[test]
    fn level_up_carries_remainder() {
        let before = ProgressionRecord {
            experience_points: 90,
            ..record()
        };
        let outcome = apply_award(&before, 20).unwrap();

        assert_eq!(outcome.record.level, 2);
        assert_eq!(outcome.record.experience_points, 10);
        assert_eq!(outcome.record.experience_for_day, 980);
        assert!(outcome.primary.leveled_up);
        assert!(!outcome.buddy.leveled_up);
    }

    #[test]
    fn award_is_truncated_to_remaining_budget() {
        let before = ProgressionRecord {
            experience_for_day: 5,
            ..record()
        };
        let outcome = apply_award(&before, 50).unwrap();

        assert_eq!(outcome.record.experience_points, 5);
        assert_eq!(outcome.record.experience_for_day, 0);
        assert_eq!(outcome.primary.applied, 5);
        assert_eq!(outcome.primary.discarded, 45);
        assert_eq!(outcome.record.level, 1);
    }

    #[test]
    fn buddy_level_ten_doubles_the_award() {
        let before = ProgressionRecord {
            buddy_level: 10,
            experience_for_day: 100,
            experience_points: 5,
            level: 3,
            ..record()
        };
        let outcome = apply_award(&before, 40).unwrap();

        assert_eq!(outcome.multiplier, 2);
        assert_eq!(outcome.primary.requested, 80);
        assert_eq!(outcome.record.experience_for_day, 20);
        assert_eq!(outcome.record.experience_points, 85);
        assert_eq!(outcome.record.buddy_experience_points, 80);
        assert_eq!(outcome.record.buddy_experience_for_day, 1920);
    }

    #[test]
    fn clamped_total_decides_level_up() {
        // 95 + 50 would cross 100, but only 3 XP fit in the budget.
        let before = ProgressionRecord {
            experience_points: 95,
            experience_for_day: 3,
            ..record()
        };
        let outcome = apply_award(&before, 50).unwrap();

        assert_eq!(outcome.record.level, 1);
        assert_eq!(outcome.record.experience_points, 98);
        assert!(!outcome.primary.leveled_up);
    }

    #[test]
    fn at_most_one_level_per_award() {
        let before = ProgressionRecord {
            experience_points: 50,
            ..record()
        };
        // 50 + 400 = 450 would be four levels; only one is granted.
        let outcome = apply_award(&before, 400).unwrap();

        assert_eq!(outcome.record.level, 2);
        assert_eq!(outcome.record.experience_points, 50);
        assert!(outcome.record.validate().is_ok());
    }

    #[test]
    fn buddy_track_levels_independently() {
        let before = ProgressionRecord {
            buddy_experience_points: 9_990,
            ..record()
        };
        let outcome = apply_award(&before, 30).unwrap();

        assert_eq!(outcome.record.buddy_level, 2);
        assert_eq!(outcome.record.buddy_experience_points, 20);
        assert_eq!(outcome.record.buddy_experience_for_day, 1970);
        assert!(outcome.buddy.leveled_up);
        assert_eq!(outcome.record.level, 1);
    }

    #[test]
    fn exhausted_budget_applies_nothing() {
        let before = ProgressionRecord {
            experience_for_day: 0,
            buddy_experience_for_day: 0,
            ..record()
        };
        let outcome = apply_award(&before, 25).unwrap();

        assert!(outcome.is_noop());
        assert_eq!(outcome.record, before);
    }

    #[test]
    fn zero_award_is_a_noop() {
        let outcome = apply_award(&record(), 0).unwrap();
        assert!(outcome.is_noop());
    }

    #[test]
    fn negative_award_is_rejected() {
        assert_matches!(
            apply_award(&record(), -1),
            Err(ProgressionError::InvariantViolation(_))
        );
    }

    #[test]
    fn corrupt_snapshot_is_rejected() {
        let before = ProgressionRecord {
            experience_for_day: -4,
            ..record()
        };
        assert_matches!(
            apply_award(&before, 10),
            Err(ProgressionError::InvariantViolation(_))
        );
    }

    #[test]
    fn huge_award_is_bounded_by_budget() {
        let before = ProgressionRecord {
            buddy_level: 10,
            ..record()
        };
        let outcome = apply_award(&before, i32::MAX).unwrap();

        assert_eq!(outcome.primary.requested, i64::from(i32::MAX) * 2);
        assert_eq!(outcome.record.experience_for_day, 0);
        assert_eq!(outcome.record.buddy_experience_for_day, 0);
    }

    #[test]
    fn invariants_hold_across_award_sequences() {
        let mut current = record();
        let awards = [0, 7, 93, 250, 1, 999, 64, 300, 45, 12, 500, 2];
        let mut spent = 0_i64;

        for (round, xp) in awards.iter().cycle().take(60).enumerate() {
            if round % 20 == 0 {
                let budgets = crate::progression::daily_budgets_for(current.buddy_level);
                current.experience_for_day = budgets.experience_for_day;
                current.buddy_experience_for_day = budgets.buddy_experience_for_day;
                spent = 0;
            }
            let outcome = apply_award(&current, *xp).unwrap();
            current = outcome.record;
            spent += i64::from(outcome.primary.applied);

            assert!(current.experience_for_day >= 0);
            assert!(current.buddy_experience_for_day >= 0);
            assert!(current.experience_points >= 0);
            assert!(i64::from(current.experience_points) < xp_to_level_up(current.level));
            assert!(
                i64::from(current.buddy_experience_points)
                    < buddy_xp_to_level_up(current.buddy_level)
            );
            assert!(spent <= 2000);
        }
    }
}
