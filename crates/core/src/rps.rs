//! Rock-Paper-Scissors rules, streaks, and XP rewards.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// XP awarded for winning a round.
pub const RPS_WIN_XP: i32 = 50;

/// XP awarded for a drawn round.
pub const RPS_DRAW_XP: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RpsChoice {
    Rock,
    Paper,
    Scissors,
}

impl RpsChoice {
    pub const ALL: [RpsChoice; 3] = [Self::Rock, Self::Paper, Self::Scissors];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        }
    }

    /// The choice this one defeats.
    pub fn beats(self) -> Self {
        match self {
            Self::Rock => Self::Scissors,
            Self::Paper => Self::Rock,
            Self::Scissors => Self::Paper,
        }
    }

    /// Uniformly random choice for the house player.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for RpsChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RpsChoice {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rock" => Ok(Self::Rock),
            "paper" => Ok(Self::Paper),
            "scissors" => Ok(Self::Scissors),
            other => Err(CoreError::Validation(format!(
                "Invalid choice '{other}'. Must be one of: rock, paper, scissors"
            ))),
        }
    }
}

/// Result of a round from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RpsOutcome {
    Win,
    Draw,
    Loss,
}

impl RpsOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Draw => "draw",
            Self::Loss => "loss",
        }
    }

    /// XP the player earns for this outcome.
    pub fn xp_reward(self) -> i32 {
        match self {
            Self::Win => RPS_WIN_XP,
            Self::Draw => RPS_DRAW_XP,
            Self::Loss => 0,
        }
    }
}

impl FromStr for RpsOutcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win" => Ok(Self::Win),
            "draw" => Ok(Self::Draw),
            "loss" => Ok(Self::Loss),
            other => Err(CoreError::Internal(format!("Unknown RPS outcome '{other}'"))),
        }
    }
}

/// Decide a round.
pub fn play(player: RpsChoice, house: RpsChoice) -> RpsOutcome {
    if player == house {
        RpsOutcome::Draw
    } else if player.beats() == house {
        RpsOutcome::Win
    } else {
        RpsOutcome::Loss
    }
}

/// Win streak after a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub current: i32,
    pub highest: i32,
}

impl Streak {
    /// A win extends the streak, a draw keeps it, a loss resets it.
    pub fn after(self, outcome: RpsOutcome) -> Self {
        let current = match outcome {
            RpsOutcome::Win => self.current.saturating_add(1),
            RpsOutcome::Draw => self.current,
            RpsOutcome::Loss => 0,
        };
        Self {
            current,
            highest: self.highest.max(current),
        }
    }
}
