//! Comparative statistics for one game against the rest of its history.
//!
//! Every function takes the current game and `history`, the comparison
//! games with the current game already removed. Each one decides for
//! itself whether the current game joins the aggregate:
//!
//! | statistic                              | current folded in |
//! |----------------------------------------|-------------------|
//! | `highest_score`                        | no                |
//! | `overall_rank`, `same_difficulty_rank` | yes               |
//! | `blight_stats`, `dahan_stats`          | widens min/max    |
//! | win/loss records                       | yes               |
//! | `spirit_combo_score_stats`             | yes               |
//!
//! Functions that gate on "is there any other data" check the filtered
//! history before the current game is added back.

use std::iter;

use tracing::debug;

use super::round_half_up;
use super::spirits::are_spirits_same;
use crate::models::{
    AdversaryMatch, ComboScoreStats, ComparisonOptions, DifficultyRank, Game, GameComparison,
    GameReport, Rank, RangeStats, ScoreRange, WinLossRecord,
};

/// Adversary plus scenario difficulty, absent counting as zero.
pub fn total_difficulty(game: &Game) -> i32 {
    game.total_difficulty()
}

/// Rank `current` by descending score among `others` plus itself.
/// Ties keep their input order, so the current game sorts after earlier
/// games with the same score.
fn rank_within<'a>(current: &'a Game, others: impl IntoIterator<Item = &'a Game>) -> Rank {
    let mut sorted: Vec<&Game> = others.into_iter().chain(iter::once(current)).collect();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    let total = sorted.len();
    let rank = sorted
        .iter()
        .position(|g| g.id == current.id)
        .map_or(total, |i| i + 1);
    Rank { rank, total }
}

fn percentage(current: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (current - min) / (max - min) * 100.0
    } else {
        50.0
    }
}

fn range_of(values: impl IntoIterator<Item = f64>, current: f64) -> Option<RangeStats> {
    let (min, max) = values.into_iter().fold(None, |acc: Option<(f64, f64)>, v| {
        Some(match acc {
            Some((min, max)) => (min.min(v), max.max(v)),
            None => (v, v),
        })
    })?;
    let min = min.min(current);
    let max = max.max(current);
    Some(RangeStats {
        min,
        max,
        current,
        percentage: percentage(current, min, max),
    })
}

fn score_range_of<'a>(
    games: impl IntoIterator<Item = &'a Game>,
    current: &Game,
    difficulty: Option<i32>,
) -> Option<ScoreRange> {
    let (min, max) = games.into_iter().fold(None, |acc: Option<(i32, i32)>, g| {
        Some(match acc {
            Some((min, max)) => (min.min(g.score), max.max(g.score)),
            None => (g.score, g.score),
        })
    })?;
    let min = min.min(current.score);
    let max = max.max(current.score);
    Some(ScoreRange {
        min,
        max,
        current: current.score,
        percentage: percentage(current.score as f64, min as f64, max as f64),
        difficulty,
    })
}

/// The highest-scoring game in the history; the first one wins ties.
pub fn highest_score(history: &[Game]) -> Option<&Game> {
    history
        .iter()
        .reduce(|best, g| if g.score > best.score { g } else { best })
}

/// Rank of the current game among every game, itself included.
pub fn overall_rank(current: &Game, history: &[Game]) -> Rank {
    rank_within(current, history)
}

/// Rank among games with the same total difficulty, itself included.
/// `None` when no other game shares the difficulty.
pub fn same_difficulty_rank(current: &Game, history: &[Game]) -> Option<DifficultyRank> {
    let difficulty = total_difficulty(current);
    let same: Vec<&Game> = history
        .iter()
        .filter(|g| total_difficulty(g) == difficulty)
        .collect();

    if same.is_empty() {
        return None;
    }

    let Rank { rank, total } = rank_within(current, same);
    Some(DifficultyRank {
        rank,
        total,
        difficulty,
    })
}

/// Blight per player against the history's range.
pub fn blight_stats(current: &Game, history: &[Game]) -> Option<RangeStats> {
    range_of(
        history.iter().map(Game::blight_per_player),
        current.blight_per_player(),
    )
}

/// Dahan per player against the history's range.
pub fn dahan_stats(current: &Game, history: &[Game]) -> Option<RangeStats> {
    range_of(
        history.iter().map(Game::dahan_per_player),
        current.dahan_per_player(),
    )
}

/// Record against the same adversary at the same difficulty, current
/// game included. `None` without an adversary or without another
/// matching game.
pub fn same_adversary_difficulty_record(
    current: &Game,
    history: &[Game],
    options: &ComparisonOptions,
) -> Option<WinLossRecord> {
    let adversary = current.adversary.as_deref()?;

    let matches: Vec<&Game> = history
        .iter()
        .filter(|g| g.adversary.as_deref() == Some(adversary))
        .filter(|g| match options.adversary_match {
            AdversaryMatch::AdversaryDifficulty => {
                g.adversary_difficulty == current.adversary_difficulty
            }
            AdversaryMatch::TotalDifficulty => total_difficulty(g) == total_difficulty(current),
        })
        .collect();

    if matches.is_empty() {
        return None;
    }

    Some(WinLossRecord::tally(
        matches.into_iter().chain(iter::once(current)),
    ))
}

/// Record against the same adversary at any difficulty, current game
/// included. `None` without an adversary.
pub fn same_adversary_record(current: &Game, history: &[Game]) -> Option<WinLossRecord> {
    let adversary = current.adversary.as_deref()?;
    let matches: Vec<&Game> = history
        .iter()
        .chain(iter::once(current))
        .filter(|g| g.adversary.as_deref() == Some(adversary))
        .collect();

    if matches.is_empty() {
        return None;
    }
    Some(WinLossRecord::tally(matches))
}

/// Record with the same spirit combination, current game included.
pub fn same_spirits_record(current: &Game, history: &[Game]) -> Option<WinLossRecord> {
    let matches: Vec<&Game> = history
        .iter()
        .chain(iter::once(current))
        .filter(|g| are_spirits_same(&g.spirits, &current.spirits))
        .collect();

    if matches.is_empty() {
        return None;
    }
    Some(WinLossRecord::tally(matches))
}

/// Record with the same spirits against the same adversary, current
/// game included. `None` without an adversary.
pub fn same_spirits_and_adversary_record(
    current: &Game,
    history: &[Game],
) -> Option<WinLossRecord> {
    let adversary = current.adversary.as_deref()?;
    let matches: Vec<&Game> = history
        .iter()
        .chain(iter::once(current))
        .filter(|g| {
            g.adversary.as_deref() == Some(adversary)
                && are_spirits_same(&g.spirits, &current.spirits)
        })
        .collect();

    if matches.is_empty() {
        return None;
    }
    Some(WinLossRecord::tally(matches))
}

/// High, low and rounded average score for the same spirits at the same
/// total difficulty, current game included.
pub fn spirit_combo_score_stats(current: &Game, history: &[Game]) -> Option<ComboScoreStats> {
    let difficulty = total_difficulty(current);
    let scores: Vec<i32> = history
        .iter()
        .chain(iter::once(current))
        .filter(|g| {
            are_spirits_same(&g.spirits, &current.spirits) && total_difficulty(g) == difficulty
        })
        .map(|g| g.score)
        .collect();

    let high = *scores.iter().max()?;
    let low = *scores.iter().min()?;
    let sum: i64 = scores.iter().map(|&s| s as i64).sum();
    let average = round_half_up(sum as f64 / scores.len() as f64);

    Some(ComboScoreStats { high, low, average })
}

/// Score against the history's range.
pub fn overall_score_range(current: &Game, history: &[Game]) -> Option<ScoreRange> {
    score_range_of(history, current, None)
}

/// Score against the range of games at the same total difficulty.
pub fn same_difficulty_score_range(current: &Game, history: &[Game]) -> Option<ScoreRange> {
    let difficulty = total_difficulty(current);
    score_range_of(
        history
            .iter()
            .filter(|g| total_difficulty(g) == difficulty),
        current,
        Some(difficulty),
    )
}

/// Every comparison statistic for a non-empty history.
pub fn compare_game(
    current: &Game,
    history: &[Game],
    options: &ComparisonOptions,
) -> GameComparison {
    GameComparison {
        score: current.score,
        highest_score: highest_score(history).cloned(),
        overall_rank: overall_rank(current, history),
        difficulty_rank: same_difficulty_rank(current, history),
        blight_stats: blight_stats(current, history),
        dahan_stats: dahan_stats(current, history),
        same_adversary_difficulty_record: same_adversary_difficulty_record(
            current, history, options,
        ),
        same_adversary_record: same_adversary_record(current, history),
        same_spirits_record: same_spirits_record(current, history),
        same_spirits_and_adversary_record: same_spirits_and_adversary_record(current, history),
        spirit_combo_score_stats: spirit_combo_score_stats(current, history),
        overall_score_range: overall_score_range(current, history),
        same_difficulty_score_range: same_difficulty_score_range(current, history),
    }
}

/// Report for a game viewed against `all_games`, which may still contain
/// the game itself.
pub fn game_report(current: &Game, all_games: &[Game], options: &ComparisonOptions) -> GameReport {
    let history: Vec<Game> = all_games
        .iter()
        .filter(|g| g.id != current.id)
        .cloned()
        .collect();

    if history.is_empty() {
        debug!("Game {} has no history to compare against", current.id);
        return GameReport::FirstGame {
            score: current.score,
        };
    }

    debug!(
        "Comparing game {} against {} games ({})",
        current.id,
        history.len(),
        options.adversary_match
    );
    GameReport::Compared(compare_game(current, &history, options))
}
