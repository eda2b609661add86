//! Aggregate statistics over a whole profile.

use std::collections::HashMap;

use super::round_half_up;
use super::spirits::spirit_combo_key;
use crate::models::{AdversaryUsage, ComboUsage, Game, ProfileSummary, WinLossRecord};

/// How many combos and adversaries a summary lists.
pub const SUMMARY_TOP_N: usize = 5;

/// Summarise a set of games.
pub fn profile_summary(games: &[Game]) -> ProfileSummary {
    let record = WinLossRecord::tally(games);

    let average_score = if games.is_empty() {
        None
    } else {
        let sum: i64 = games.iter().map(|g| g.score as i64).sum();
        Some(round_half_up(sum as f64 / games.len() as f64))
    };

    let mut combos: HashMap<String, ComboUsage> = HashMap::new();
    let mut adversaries: HashMap<&str, AdversaryUsage> = HashMap::new();

    for game in games {
        let key = spirit_combo_key(&game.spirits);
        let combo = combos.entry(key.clone()).or_insert_with(|| {
            let mut spirits = game.spirits.clone();
            spirits.sort();
            ComboUsage {
                key,
                spirits,
                games: 0,
                wins: 0,
            }
        });
        combo.games += 1;
        combo.wins += u32::from(game.win);

        if let Some(name) = game.adversary.as_deref() {
            let usage = adversaries.entry(name).or_insert_with(|| AdversaryUsage {
                name: name.to_string(),
                games: 0,
                wins: 0,
            });
            usage.games += 1;
            usage.wins += u32::from(game.win);
        }
    }

    let mut top_spirit_combos: Vec<ComboUsage> = combos.into_values().collect();
    top_spirit_combos.sort_by(|a, b| b.games.cmp(&a.games).then_with(|| a.key.cmp(&b.key)));
    top_spirit_combos.truncate(SUMMARY_TOP_N);

    let mut top_adversaries: Vec<AdversaryUsage> = adversaries.into_values().collect();
    top_adversaries.sort_by(|a, b| b.games.cmp(&a.games).then_with(|| a.name.cmp(&b.name)));
    top_adversaries.truncate(SUMMARY_TOP_N);

    ProfileSummary {
        total_games: games.len() as u32,
        record,
        win_rate: record.win_rate(),
        average_score,
        highest_score: games.iter().map(|g| g.score).max(),
        top_spirit_combos,
        top_adversaries,
    }
}
