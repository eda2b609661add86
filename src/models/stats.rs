//! Derived statistics models.
//!
//! Every comparison result is its own optional value so a UI can hide
//! the ones without data independently.

use serde::{Deserialize, Serialize};

use super::Game;

/// 1-indexed position of a game by descending score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    pub rank: usize,
    pub total: usize,
}

/// Rank among games sharing a total difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyRank {
    pub rank: usize,
    pub total: usize,
    pub difficulty: i32,
}

/// Where a per-player value sits between the lowest and highest seen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeStats {
    pub min: f64,
    pub max: f64,
    pub current: f64,
    /// 0 at `min`, 100 at `max`, 50 when the range is a single point
    pub percentage: f64,
}

/// Where a score sits between the lowest and highest seen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: i32,
    pub max: i32,
    pub current: i32,
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<i32>,
}

/// Win/loss tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLossRecord {
    pub wins: u32,
    pub losses: u32,
}

impl WinLossRecord {
    /// Tally wins; everything else is a loss.
    pub fn tally<'a>(games: impl IntoIterator<Item = &'a Game>) -> Self {
        games
            .into_iter()
            .fold(Self::default(), |mut record, game| {
                if game.win {
                    record.wins += 1;
                } else {
                    record.losses += 1;
                }
                record
            })
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses
    }

    /// Win rate (0.0 to 1.0).
    pub fn win_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.wins as f64 / self.total() as f64
        }
    }
}

/// Score spread for one spirit combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboScoreStats {
    pub high: i32,
    pub low: i32,
    pub average: i32,
}

/// Which games count as "same adversary, same difficulty".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdversaryMatch {
    /// Same adversary at the same adversary difficulty
    #[default]
    AdversaryDifficulty,
    /// Same adversary at the same adversary plus scenario difficulty
    TotalDifficulty,
}

impl std::fmt::Display for AdversaryMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdversaryMatch::AdversaryDifficulty => write!(f, "adversary_difficulty"),
            AdversaryMatch::TotalDifficulty => write!(f, "total_difficulty"),
        }
    }
}

/// Knobs for the comparison engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOptions {
    #[serde(default)]
    pub adversary_match: AdversaryMatch,
}

/// Every statistic comparing one game to the rest of its history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameComparison {
    pub score: i32,
    pub highest_score: Option<Game>,
    pub overall_rank: Rank,
    pub difficulty_rank: Option<DifficultyRank>,
    pub blight_stats: Option<RangeStats>,
    pub dahan_stats: Option<RangeStats>,
    pub same_adversary_difficulty_record: Option<WinLossRecord>,
    pub same_adversary_record: Option<WinLossRecord>,
    pub same_spirits_record: Option<WinLossRecord>,
    pub same_spirits_and_adversary_record: Option<WinLossRecord>,
    pub spirit_combo_score_stats: Option<ComboScoreStats>,
    pub overall_score_range: Option<ScoreRange>,
    pub same_difficulty_score_range: Option<ScoreRange>,
}

/// Statistics shown alongside one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameReport {
    /// Nothing else to compare against yet
    FirstGame { score: i32 },
    Compared(GameComparison),
}

impl GameReport {
    pub fn score(&self) -> i32 {
        match self {
            GameReport::FirstGame { score } => *score,
            GameReport::Compared(c) => c.score,
        }
    }

    pub fn comparison(&self) -> Option<&GameComparison> {
        match self {
            GameReport::FirstGame { .. } => None,
            GameReport::Compared(c) => Some(c),
        }
    }
}

/// How often a spirit combination was played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboUsage {
    /// Canonical combo key
    pub key: String,
    pub spirits: Vec<String>,
    pub games: u32,
    pub wins: u32,
}

/// How often an adversary was faced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdversaryUsage {
    pub name: String,
    pub games: u32,
    pub wins: u32,
}

/// Aggregate view over a profile's games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub total_games: u32,
    pub record: WinLossRecord,
    pub win_rate: f64,
    pub average_score: Option<i32>,
    pub highest_score: Option<i32>,
    pub top_spirit_combos: Vec<ComboUsage>,
    pub top_adversaries: Vec<AdversaryUsage>,
}
