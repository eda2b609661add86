//! Game session model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{EntityId, GameId, ProfileId};
use crate::calculate::{calculate_score, ScoreInput};

/// Reasons a game draft is rejected before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameValidationError {
    #[error("At least one player is required")]
    NoPlayers,

    #[error("At least one spirit is required")]
    NoSpirits,

    #[error("Each player needs exactly one spirit ({players} players, {spirits} spirits)")]
    PlayerSpiritMismatch { players: usize, spirits: usize },

    #[error("Adversary difficulty given without an adversary")]
    DifficultyWithoutAdversary,

    #[error("Scenario difficulty given without a scenario")]
    DifficultyWithoutScenario,

    #[error("Adversary difficulty cannot be negative: {0}")]
    NegativeDifficulty(i32),

    #[error("Difficulty {0} is outside -{max}..={max}", max = MAX_DIFFICULTY)]
    DifficultyOutOfRange(i32),

    #[error("{field} count {value} exceeds {max}", max = MAX_BOARD_COUNT)]
    CountOutOfRange { field: &'static str, value: u32 },
}

/// Largest adversary or scenario difficulty a game may record. The
/// hardest catalog entry is 11.
pub const MAX_DIFFICULTY: i32 = 30;

/// Largest invader card, dahan or blight count a game may record.
pub const MAX_BOARD_COUNT: u32 = 999;

/// The facts a user records about one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDraft {
    /// Calendar day the game was played
    pub date: NaiveDate,

    /// Player names, in seat order
    pub players: Vec<String>,

    /// Spirit played by each player
    pub spirits: Vec<String>,

    /// Whether the spirits won
    pub win: bool,

    #[serde(default)]
    pub adversary: Option<String>,

    #[serde(default)]
    pub adversary_difficulty: Option<i32>,

    #[serde(default)]
    pub scenario: Option<String>,

    /// May be negative
    #[serde(default)]
    pub scenario_difficulty: Option<i32>,

    /// Invader cards left in the deck
    #[serde(default)]
    pub invader_cards: u32,

    /// Dahan remaining on the island
    #[serde(default)]
    pub dahan: u32,

    /// Blight on the island
    #[serde(default)]
    pub blight: u32,

    #[serde(default)]
    pub notes: String,

    /// Stored picture paths
    #[serde(default)]
    pub pictures: Vec<String>,
}

fn trimmed_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn trimmed_opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl GameDraft {
    /// Create a draft with the required facts; everything else empty.
    pub fn new(date: NaiveDate, players: Vec<String>, spirits: Vec<String>, win: bool) -> Self {
        Self {
            date,
            players,
            spirits,
            win,
            adversary: None,
            adversary_difficulty: None,
            scenario: None,
            scenario_difficulty: None,
            invader_cards: 0,
            dahan: 0,
            blight: 0,
            notes: String::new(),
            pictures: Vec::new(),
        }
    }

    /// Builder method to set the adversary.
    pub fn with_adversary(mut self, name: &str, difficulty: Option<i32>) -> Self {
        self.adversary = Some(name.to_string());
        self.adversary_difficulty = difficulty;
        self
    }

    /// Builder method to set the scenario.
    pub fn with_scenario(mut self, name: &str, difficulty: Option<i32>) -> Self {
        self.scenario = Some(name.to_string());
        self.scenario_difficulty = difficulty;
        self
    }

    /// Builder method to set the end-of-game board counts.
    pub fn with_counts(mut self, invader_cards: u32, dahan: u32, blight: u32) -> Self {
        self.invader_cards = invader_cards;
        self.dahan = dahan;
        self.blight = blight;
        self
    }

    /// Trim free-text fields and drop blank entries.
    pub fn normalized(self) -> Self {
        Self {
            players: trimmed_list(self.players),
            spirits: trimmed_list(self.spirits),
            adversary: trimmed_opt(self.adversary),
            scenario: trimmed_opt(self.scenario),
            notes: self.notes.trim().to_string(),
            pictures: trimmed_list(self.pictures),
            ..self
        }
    }

    /// Check the draft can be scored and stored.
    pub fn validate(&self) -> Result<(), GameValidationError> {
        if self.players.is_empty() {
            return Err(GameValidationError::NoPlayers);
        }
        if self.spirits.is_empty() {
            return Err(GameValidationError::NoSpirits);
        }
        if self.players.len() != self.spirits.len() {
            return Err(GameValidationError::PlayerSpiritMismatch {
                players: self.players.len(),
                spirits: self.spirits.len(),
            });
        }
        if self.adversary.is_none() && self.adversary_difficulty.is_some() {
            return Err(GameValidationError::DifficultyWithoutAdversary);
        }
        if self.scenario.is_none() && self.scenario_difficulty.is_some() {
            return Err(GameValidationError::DifficultyWithoutScenario);
        }
        if let Some(d) = self.adversary_difficulty {
            if d < 0 {
                return Err(GameValidationError::NegativeDifficulty(d));
            }
        }
        for d in [self.adversary_difficulty, self.scenario_difficulty]
            .into_iter()
            .flatten()
        {
            if !(-MAX_DIFFICULTY..=MAX_DIFFICULTY).contains(&d) {
                return Err(GameValidationError::DifficultyOutOfRange(d));
            }
        }
        for (field, value) in [
            ("Invader card", self.invader_cards),
            ("Dahan", self.dahan),
            ("Blight", self.blight),
        ] {
            if value > MAX_BOARD_COUNT {
                return Err(GameValidationError::CountOutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Score this draft would receive.
    pub fn score(&self) -> i32 {
        calculate_score(&ScoreInput::from(self))
    }
}

/// A stored game session with its precomputed score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,

    /// Owning profile
    pub profile_id: ProfileId,

    pub date: NaiveDate,
    pub players: Vec<String>,
    pub spirits: Vec<String>,
    pub win: bool,
    pub adversary: Option<String>,
    pub adversary_difficulty: Option<i32>,
    pub scenario: Option<String>,
    pub scenario_difficulty: Option<i32>,
    pub invader_cards: u32,
    pub dahan: u32,
    pub blight: u32,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub pictures: Vec<String>,

    /// Computed when the game is written, never on read
    pub score: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    /// Build a new game from a validated draft, scoring it once.
    pub fn from_draft(profile_id: ProfileId, draft: GameDraft) -> Self {
        let now = Utc::now();
        let score = draft.score();
        Self {
            id: EntityId::random(),
            profile_id,
            date: draft.date,
            players: draft.players,
            spirits: draft.spirits,
            win: draft.win,
            adversary: draft.adversary,
            adversary_difficulty: draft.adversary_difficulty,
            scenario: draft.scenario,
            scenario_difficulty: draft.scenario_difficulty,
            invader_cards: draft.invader_cards,
            dahan: draft.dahan,
            blight: draft.blight,
            notes: draft.notes,
            pictures: draft.pictures,
            score,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every user field with the draft and rescore.
    pub fn apply_draft(&mut self, draft: GameDraft) {
        let id = self.id.clone();
        let profile_id = self.profile_id.clone();
        let created_at = self.created_at;
        *self = Self {
            id,
            created_at,
            ..Self::from_draft(profile_id, draft)
        };
    }

    /// Adversary plus scenario difficulty, absent counting as zero.
    pub fn total_difficulty(&self) -> i32 {
        self.adversary_difficulty.unwrap_or(0) + self.scenario_difficulty.unwrap_or(0)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Blight per player.
    pub fn blight_per_player(&self) -> f64 {
        self.blight as f64 / self.player_count().max(1) as f64
    }

    /// Dahan per player.
    pub fn dahan_per_player(&self) -> f64 {
        self.dahan as f64 / self.player_count().max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn draft() -> GameDraft {
        GameDraft::new(
            date(),
            vec!["Ana".to_string(), "Ben".to_string()],
            vec!["Lightning's Swift Strike".to_string(), "River Surges in Sunlight".to_string()],
            true,
        )
        .with_adversary("England", Some(4))
        .with_counts(3, 7, 10)
    }

    #[test]
    fn test_normalized_trims_and_drops_blanks() {
        let mut d = draft();
        d.players = vec!["  Ana ".to_string(), "".to_string(), "Ben".to_string()];
        d.spirits = vec![" Thunderspeaker".to_string(), "   ".to_string(), "Ocean".to_string()];
        d.adversary = Some("   ".to_string());
        d.adversary_difficulty = None;
        d.notes = "  close one  ".to_string();

        let n = d.normalized();
        assert_eq!(n.players, vec!["Ana", "Ben"]);
        assert_eq!(n.spirits, vec!["Thunderspeaker", "Ocean"]);
        assert_eq!(n.adversary, None);
        assert_eq!(n.notes, "close one");
    }

    #[test]
    fn test_validate_ok() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_validate_requires_players() {
        let mut d = draft();
        d.players.clear();
        assert_eq!(d.validate(), Err(GameValidationError::NoPlayers));
    }

    #[test]
    fn test_validate_requires_spirits() {
        let mut d = draft();
        d.spirits.clear();
        assert_eq!(d.validate(), Err(GameValidationError::NoSpirits));
    }

    #[test]
    fn test_validate_one_spirit_per_player() {
        let mut d = draft();
        d.spirits.pop();
        assert_eq!(
            d.validate(),
            Err(GameValidationError::PlayerSpiritMismatch {
                players: 2,
                spirits: 1
            })
        );
    }

    #[test]
    fn test_validate_difficulty_needs_adversary() {
        let mut d = draft();
        d.adversary = None;
        assert_eq!(
            d.validate(),
            Err(GameValidationError::DifficultyWithoutAdversary)
        );
    }

    #[test]
    fn test_validate_difficulty_needs_scenario() {
        let mut d = draft();
        d.scenario_difficulty = Some(2);
        assert_eq!(
            d.validate(),
            Err(GameValidationError::DifficultyWithoutScenario)
        );
    }

    #[test]
    fn test_validate_adversary_without_difficulty_ok() {
        let d = draft().with_adversary("Sweden", None);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_validate_negative_scenario_difficulty_ok() {
        let d = draft().with_scenario("Destiny Unfolds", Some(-1));
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_validate_negative_adversary_difficulty_rejected() {
        let d = draft().with_adversary("England", Some(-2));
        assert_eq!(d.validate(), Err(GameValidationError::NegativeDifficulty(-2)));
    }

    #[test]
    fn test_validate_rejects_huge_difficulty() {
        let d = draft().with_adversary("England", Some(i32::MAX / 2));
        assert_eq!(
            d.validate(),
            Err(GameValidationError::DifficultyOutOfRange(i32::MAX / 2))
        );

        let d = draft().with_scenario("Blitz", Some(-(MAX_DIFFICULTY + 1)));
        assert_eq!(
            d.validate(),
            Err(GameValidationError::DifficultyOutOfRange(-31))
        );

        let d = draft().with_adversary("England", Some(MAX_DIFFICULTY));
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_huge_counts() {
        let d = draft().with_counts(3, u32::MAX, 0);
        assert_eq!(
            d.validate(),
            Err(GameValidationError::CountOutOfRange {
                field: "Dahan",
                value: u32::MAX
            })
        );
        assert!(draft().with_counts(MAX_BOARD_COUNT, 0, 0).validate().is_ok());
    }

    #[test]
    fn test_from_draft_scores_once() {
        let game = Game::from_draft("profile-1".into(), draft());
        // 5*4 + 10 + 2*3 + 7/2 - 10/2
        assert_eq!(game.score, 34);
        assert_eq!(game.created_at, game.updated_at);
        assert_eq!(game.profile_id.as_str(), "profile-1");
    }

    #[test]
    fn test_apply_draft_replaces_and_rescores() {
        let mut game = Game::from_draft("profile-1".into(), draft());
        let id = game.id.clone();
        let created = game.created_at;

        let mut edited = draft();
        edited.win = false;
        edited.notes = "lost on the last turn".to_string();
        game.apply_draft(edited);

        assert_eq!(game.id, id);
        assert_eq!(game.created_at, created);
        assert!(!game.win);
        // 2*4 + 3 + 3 - 5
        assert_eq!(game.score, 9);
        assert_eq!(game.notes, "lost on the last turn");
    }

    #[test]
    fn test_total_difficulty_treats_absent_as_zero() {
        let mut game = Game::from_draft("p".into(), draft());
        assert_eq!(game.total_difficulty(), 4);
        game.adversary_difficulty = None;
        assert_eq!(game.total_difficulty(), 0);
        game.scenario_difficulty = Some(-1);
        assert_eq!(game.total_difficulty(), -1);
    }

    #[test]
    fn test_per_player_normalisation() {
        let game = Game::from_draft("p".into(), draft());
        assert_eq!(game.blight_per_player(), 5.0);
        assert_eq!(game.dahan_per_player(), 3.5);
    }

    #[test]
    fn test_game_serialization() {
        let game = Game::from_draft("p".into(), draft());
        let json = serde_json::to_string(&game).unwrap();
        let back: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(game, back);
    }
}
