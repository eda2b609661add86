//! Player profile model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, ProfileId};

/// A profile that owns a history of games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,

    /// Display name
    pub name: String,

    pub created_at: DateTime<Utc>,

    /// Updated whenever the profile is selected
    pub last_used_at: DateTime<Utc>,
}

impl Profile {
    /// Create a new profile with a random ID.
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::random(),
            name,
            created_at: now,
            last_used_at: now,
        }
    }

    /// Mark the profile as used now.
    pub fn touch(&mut self) {
        self.last_used_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_creation() {
        let profile = Profile::new("Morgan".to_string());
        assert_eq!(profile.name, "Morgan");
        assert_eq!(profile.created_at, profile.last_used_at);
    }

    #[test]
    fn test_touch_moves_last_used_forward() {
        let mut profile = Profile::new("Morgan".to_string());
        let before = profile.last_used_at;
        profile.touch();
        assert!(profile.last_used_at >= before);
        assert_eq!(profile.created_at, before);
    }

    #[test]
    fn test_profile_serialization() {
        let profile = Profile::new("Morgan".to_string());
        let json = serde_json::to_string(&profile).unwrap();
        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, back);
    }
}
