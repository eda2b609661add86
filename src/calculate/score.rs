//! Score for a single game.

use crate::models::{Game, GameDraft};

/// The facts a score is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreInput {
    pub win: bool,
    pub adversary_difficulty: Option<i32>,
    pub scenario_difficulty: Option<i32>,
    pub invader_cards: u32,
    pub dahan: u32,
    pub blight: u32,
    /// Must be at least 1
    pub player_count: u32,
}

impl From<&GameDraft> for ScoreInput {
    fn from(draft: &GameDraft) -> Self {
        Self {
            win: draft.win,
            adversary_difficulty: draft.adversary_difficulty,
            scenario_difficulty: draft.scenario_difficulty,
            invader_cards: draft.invader_cards,
            dahan: draft.dahan,
            blight: draft.blight,
            player_count: draft.players.len() as u32,
        }
    }
}

impl From<&Game> for ScoreInput {
    fn from(game: &Game) -> Self {
        Self {
            win: game.win,
            adversary_difficulty: game.adversary_difficulty,
            scenario_difficulty: game.scenario_difficulty,
            invader_cards: game.invader_cards,
            dahan: game.dahan,
            blight: game.blight,
            player_count: game.players.len() as u32,
        }
    }
}

/// Calculate the score of one game.
///
/// Victory: `5 * difficulty + 10 + 2 * invader_cards + dahan/players - blight/players`.
/// Defeat: `2 * difficulty + invader_cards + dahan/players - blight/players`.
///
/// Difficulty is adversary plus scenario difficulty with absent values as
/// zero. The per-player terms use floor division, with at least one
/// player. Results beyond the `i32` range saturate.
pub fn calculate_score(input: &ScoreInput) -> i32 {
    let players = i64::from(input.player_count.max(1));
    let difficulty = i64::from(input.adversary_difficulty.unwrap_or(0))
        + i64::from(input.scenario_difficulty.unwrap_or(0));
    let cards = i64::from(input.invader_cards);
    let board = i64::from(input.dahan) / players - i64::from(input.blight) / players;

    let score = if input.win {
        5 * difficulty + 10 + 2 * cards + board
    } else {
        2 * difficulty + cards + board
    };
    score.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
