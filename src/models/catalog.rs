//! Adversary and scenario reference tables.

use serde::Serialize;

/// One challenge level of an adversary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdversaryLevel {
    pub level: u8,
    pub name: &'static str,
    pub difficulty: i32,
}

/// An adversary with its levels 0 through 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Adversary {
    pub name: &'static str,
    /// Short display name
    pub label: &'static str,
    pub levels: [AdversaryLevel; 7],
}

impl Adversary {
    /// Difficulty number of a level, if the level exists.
    pub fn difficulty_at(&self, level: u8) -> Option<i32> {
        self.levels
            .iter()
            .find(|l| l.level == level)
            .map(|l| l.difficulty)
    }
}

/// A scenario and its fixed difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub name: &'static str,
    pub difficulty: i32,
}

const fn lvl(level: u8, name: &'static str, difficulty: i32) -> AdversaryLevel {
    AdversaryLevel {
        level,
        name,
        difficulty,
    }
}

pub const ADVERSARIES: &[Adversary] = &[
    Adversary {
        name: "The Kingdom of Brandenberg-Prussia",
        label: "Brandenberg-Prussia",
        levels: [
            lvl(0, "Base Adversary", 1),
            lvl(1, "Fast Start", 2),
            lvl(2, "Surge of Colonists", 4),
            lvl(3, "Efficient", 6),
            lvl(4, "Aggressive Timetable", 7),
            lvl(5, "Ruthlessly Efficient", 9),
            lvl(6, "Terrifingly Efficient", 10),
        ],
    },
    Adversary {
        name: "The Kingdom of England",
        label: "England",
        levels: [
            lvl(0, "Base Adversary", 1),
            lvl(1, "Indentured Servants Earn Land", 3),
            lvl(2, "Criminals and Malcontents", 4),
            lvl(3, "High Immigration (I)", 6),
            lvl(4, "High Immigration (Full)", 7),
            lvl(5, "Local Autonomy", 9),
            lvl(6, "Independent Resolve", 11),
        ],
    },
    Adversary {
        name: "The Kingdom of Sweden",
        label: "Sweden",
        levels: [
            lvl(0, "Base Adversary", 1),
            lvl(1, "Heavy Mining", 2),
            lvl(2, "Population Pressure at Home", 3),
            lvl(3, "Fine Steel for Tools and Guns", 5),
            lvl(4, "Royal Backing", 6),
            lvl(5, "Mining Rush", 7),
            lvl(6, "Prospecting Outpost", 8),
        ],
    },
    Adversary {
        name: "The Kingdom of France (Plantation Colony)",
        label: "France",
        levels: [
            lvl(0, "Base Adversary", 2),
            lvl(1, "Frontier Explorers", 3),
            lvl(2, "Slave Labor", 5),
            lvl(3, "Early Plantation", 7),
            lvl(4, "Triangle Trade", 8),
            lvl(5, "Slow-Healing Ecosystem", 9),
            lvl(6, "Persistent Explorers", 10),
        ],
    },
    Adversary {
        name: "The Habsburg Monarchy (Livestock Colony)",
        label: "Habsburg",
        levels: [
            lvl(0, "Base Adversary", 2),
            lvl(1, "Migratory Herders", 3),
            lvl(2, "More Rural than Urban", 5),
            lvl(3, "Fast Spread", 6),
            lvl(4, "Herds Thrive in Verdant Lands", 8),
            lvl(5, "Wave of Immigration", 9),
            lvl(6, "Far-Flung Herds", 10),
        ],
    },
    Adversary {
        name: "The Tsardom of Russia",
        label: "Russia",
        levels: [
            lvl(0, "Base Adversary", 1),
            lvl(1, "Hunters Bring Home Shell and Hide", 3),
            lvl(2, "A sense for Impending Disaster", 4),
            lvl(3, "Competition Among Hunters", 6),
            lvl(4, "Accelerated Exploitation", 7),
            lvl(5, "Entrench in the Face of Fear", 9),
            lvl(6, "Pressure for Fast Profit", 11),
        ],
    },
    Adversary {
        name: "The Kingdom of Scotland",
        label: "Scotland",
        levels: [
            lvl(0, "Base Adversary", 1),
            lvl(1, "Trading Port", 3),
            lvl(2, "Seize Opportunity", 4),
            lvl(3, "Chart the Coastline", 6),
            lvl(4, "Ambition of a Minor Nation", 7),
            lvl(5, "Runoff and Bilgewater", 8),
            lvl(6, "Exports Fuel Inward Growth", 10),
        ],
    },
    Adversary {
        name: "Habsburg Mining Expidition",
        label: "Mining Expidition",
        levels: [
            lvl(0, "Base Adversary", 1),
            lvl(1, "Avarice Rewarded", 3),
            lvl(2, "Miners Come From Far and Wide", 4),
            lvl(3, "Mining Boom (I)", 5),
            lvl(4, "Untapped Salt Deposits", 7),
            lvl(5, "Mining Boom (II)", 9),
            lvl(6, "The Empire Ascendant", 10),
        ],
    },
];

pub const SCENARIOS: &[Scenario] = &[
    Scenario { name: "Blitz", difficulty: 0 },
    Scenario { name: "Guard the Isle's Heart", difficulty: 0 },
    Scenario { name: "Rituals of Terror", difficulty: 3 },
    Scenario { name: "Dahan Insurrection", difficulty: 4 },
    Scenario { name: "Second Wave", difficulty: 1 },
    Scenario { name: "Powers Long Forgotten", difficulty: 1 },
    Scenario { name: "Ward the Shores", difficulty: 2 },
    Scenario { name: "Rituals of the Destroying Flame", difficulty: 3 },
    Scenario { name: "Elemental Invocation", difficulty: 1 },
    Scenario { name: "Despicable Theft", difficulty: 2 },
    Scenario { name: "The Great River", difficulty: 3 },
    Scenario { name: "A Diversity of Spirits", difficulty: 0 },
    Scenario { name: "Varied Terrains", difficulty: 2 },
    Scenario { name: "Destiny Unfolds", difficulty: -1 },
    Scenario { name: "Surges of Colonization", difficulty: 2 },
    Scenario { name: "Surges of Colonization (Larger Surges)", difficulty: 7 },
];

/// Look up an adversary by full name or label, ignoring case.
pub fn find_adversary(name: &str) -> Option<&'static Adversary> {
    let name = name.trim();
    ADVERSARIES
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(name) || a.label.eq_ignore_ascii_case(name))
}

/// Look up a scenario by name, ignoring case.
pub fn find_scenario(name: &str) -> Option<&'static Scenario> {
    let name = name.trim();
    SCENARIOS.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_adversary_by_label() {
        let england = find_adversary("england").unwrap();
        assert_eq!(england.name, "The Kingdom of England");
        assert_eq!(england.difficulty_at(6), Some(11));
    }

    #[test]
    fn test_find_adversary_by_full_name() {
        let sweden = find_adversary("The Kingdom of Sweden").unwrap();
        assert_eq!(sweden.difficulty_at(3), Some(5));
        assert_eq!(sweden.difficulty_at(7), None);
    }

    #[test]
    fn test_find_unknown_adversary() {
        assert!(find_adversary("Atlantis").is_none());
    }

    #[test]
    fn test_levels_are_ordered() {
        for adversary in ADVERSARIES {
            for (i, level) in adversary.levels.iter().enumerate() {
                assert_eq!(level.level as usize, i, "{}", adversary.label);
            }
            assert!(adversary
                .levels
                .windows(2)
                .all(|w| w[0].difficulty < w[1].difficulty));
        }
    }

    #[test]
    fn test_destiny_unfolds_is_negative() {
        assert_eq!(find_scenario("destiny unfolds").unwrap().difficulty, -1);
    }
}
