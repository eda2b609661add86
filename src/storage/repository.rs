//! Profile and game repository.
//!
//! Scores are computed once when a game is written and stored with it;
//! reads return the stored score unchanged.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use super::media::{delete_pictures, is_media_path};
use super::{RecordFile, RecordKind, StorageConfig, StorageError};
use crate::calculate::game_report;
use crate::models::{
    ComparisonOptions, EntityId, Game, GameDraft, GameReport, Profile, ProfileId,
};

/// Persistent store for profiles and their games.
#[derive(Debug, Clone)]
pub struct GameStore {
    config: StorageConfig,
}

impl GameStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn read_profiles(&self) -> Result<Vec<Profile>, StorageError> {
        RecordFile::of(&self.config, RecordKind::Profile).read_all()
    }

    fn write_profiles(&self, profiles: &[Profile]) -> Result<usize, StorageError> {
        RecordFile::of(&self.config, RecordKind::Profile).write_all(profiles)
    }

    /// Pictures must be files this store imported into its media directory.
    fn check_pictures(&self, draft: &GameDraft) -> Result<(), StorageError> {
        match draft
            .pictures
            .iter()
            .find(|p| !is_media_path(&self.config, Path::new(p.as_str())))
        {
            Some(outside) => Err(StorageError::InvalidPath(outside.clone())),
            None => Ok(()),
        }
    }

    fn read_games(&self) -> Result<Vec<Game>, StorageError> {
        RecordFile::of(&self.config, RecordKind::Game).read_all()
    }

    fn write_games(&self, games: &[Game]) -> Result<usize, StorageError> {
        RecordFile::of(&self.config, RecordKind::Game).write_all(games)
    }

    // ── Profiles ─────────────────────────────────────────────────

    /// Create a profile with a trimmed, non-empty name.
    pub fn create_profile(&self, name: &str) -> Result<Profile, StorageError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::InvalidInput(
                "Profile name must not be empty".to_string(),
            ));
        }

        let profile = Profile::new(name.to_string());
        RecordFile::of(&self.config, RecordKind::Profile).append(&profile)?;
        info!("Created profile {} ({})", profile.name, profile.id);
        Ok(profile)
    }

    /// All profiles, most recently used first.
    pub fn list_profiles(&self) -> Result<Vec<Profile>, StorageError> {
        let mut profiles = self.read_profiles()?;
        profiles.sort_by(|a, b| b.last_used_at.cmp(&a.last_used_at));
        Ok(profiles)
    }

    pub fn get_profile(&self, id: &ProfileId) -> Result<Profile, StorageError> {
        self.read_profiles()?
            .into_iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| StorageError::profile_not_found(id.as_str()))
    }

    /// Mark a profile as the one in use.
    pub fn touch_profile(&self, id: &ProfileId) -> Result<Profile, StorageError> {
        let mut profiles = self.read_profiles()?;
        let profile = profiles
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| StorageError::profile_not_found(id.as_str()))?;
        profile.touch();
        let touched = profile.clone();
        self.write_profiles(&profiles)?;
        Ok(touched)
    }

    /// Delete a profile along with its games and their pictures.
    pub fn delete_profile(&self, id: &ProfileId) -> Result<(), StorageError> {
        let mut profiles = self.read_profiles()?;
        let before = profiles.len();
        profiles.retain(|p| &p.id != id);
        if profiles.len() == before {
            return Err(StorageError::profile_not_found(id.as_str()));
        }

        let (removed, kept): (Vec<Game>, Vec<Game>) = self
            .read_games()?
            .into_iter()
            .partition(|g| &g.profile_id == id);

        self.write_games(&kept)?;
        self.write_profiles(&profiles)?;

        let pictures: Vec<String> = removed.iter().flat_map(|g| g.pictures.clone()).collect();
        delete_pictures(&self.config, &pictures);

        info!("Deleted profile {} and {} games", id, removed.len());
        Ok(())
    }

    // ── Games ────────────────────────────────────────────────────

    /// Validate, score and store a new game.
    pub fn create_game(&self, profile_id: &ProfileId, draft: GameDraft) -> Result<Game, StorageError> {
        let draft = draft.normalized();
        draft.validate()?;
        self.check_pictures(&draft)?;
        self.get_profile(profile_id)?;

        let game = Game::from_draft(profile_id.clone(), draft);
        RecordFile::of(&self.config, RecordKind::Game).append(&game)?;
        info!(
            "Created game {} for profile {} (score {})",
            game.id, profile_id, game.score
        );
        Ok(game)
    }

    pub fn get_game(&self, id: &EntityId) -> Result<Game, StorageError> {
        self.read_games()?
            .into_iter()
            .find(|g| &g.id == id)
            .ok_or_else(|| StorageError::game_not_found(id.as_str()))
    }

    /// Replace a game's recorded facts and rescore it.
    pub fn update_game(&self, id: &EntityId, draft: GameDraft) -> Result<Game, StorageError> {
        let draft = draft.normalized();
        draft.validate()?;
        self.check_pictures(&draft)?;

        let mut games = self.read_games()?;
        let game = games
            .iter_mut()
            .find(|g| &g.id == id)
            .ok_or_else(|| StorageError::game_not_found(id.as_str()))?;

        let kept: HashSet<&str> = draft.pictures.iter().map(String::as_str).collect();
        let dropped: Vec<String> = game
            .pictures
            .iter()
            .filter(|p| !kept.contains(p.as_str()))
            .cloned()
            .collect();

        let old_score = game.score;
        game.apply_draft(draft);
        let updated = game.clone();
        self.write_games(&games)?;
        delete_pictures(&self.config, &dropped);

        info!(
            "Updated game {} (score {} -> {})",
            updated.id, old_score, updated.score
        );
        Ok(updated)
    }

    /// Delete a game and its pictures.
    pub fn delete_game(&self, id: &EntityId) -> Result<Game, StorageError> {
        let mut games = self.read_games()?;
        let index = games
            .iter()
            .position(|g| &g.id == id)
            .ok_or_else(|| StorageError::game_not_found(id.as_str()))?;
        let removed = games.remove(index);

        self.write_games(&games)?;
        delete_pictures(&self.config, &removed.pictures);

        info!("Deleted game {}", removed.id);
        Ok(removed)
    }

    /// Games for one profile, or every profile when `profile_id` is `None`.
    /// Newest first.
    pub fn list_games(&self, profile_id: Option<&ProfileId>) -> Result<Vec<Game>, StorageError> {
        let mut games = self.read_games()?;
        if let Some(pid) = profile_id {
            games.retain(|g| &g.profile_id == pid);
        }
        games.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        debug!("Listed {} games", games.len());
        Ok(games)
    }

    /// Every game in scope except `current`.
    pub fn comparison_pool(
        &self,
        current: &Game,
        profile_id: Option<&ProfileId>,
    ) -> Result<Vec<Game>, StorageError> {
        let mut games = self.list_games(profile_id)?;
        games.retain(|g| g.id != current.id);
        Ok(games)
    }

    /// Load a game and compare it against its profile's history, or
    /// against every profile's games.
    pub fn game_report(
        &self,
        id: &EntityId,
        all_profiles: bool,
        options: &ComparisonOptions,
    ) -> Result<(Game, GameReport), StorageError> {
        let game = self.get_game(id)?;
        let scope = if all_profiles {
            None
        } else {
            Some(&game.profile_id)
        };
        let history = self.comparison_pool(&game, scope)?;
        let report = game_report(&game, &history, options);
        Ok((game, report))
    }
}
