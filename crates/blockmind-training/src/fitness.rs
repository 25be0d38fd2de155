//! Per-game statistics and the fitness formula.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One finished game's statistics, keyed by game number in the stats file.
///
/// Field names match the wire format the stats file has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "Moves")]
    pub moves: u64,
    #[serde(rename = "Score")]
    pub score: u64,
    #[serde(rename = "Max_Combo")]
    pub max_combo: u32,
}

/// The accumulated stats for one game-batch, keyed by game number.
pub type GameStats = BTreeMap<String, GameRecord>;

/// Fitness of a game-batch: `mean(moves) + 0.4 * mean(max_combo) +
/// 0.001 * mean(score)`. An empty batch scores 0.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn calc_fitness(stats: &GameStats) -> f64 {
    if stats.is_empty() {
        return 0.0;
    }
    let games = stats.len() as f64;
    let moves: u64 = stats.values().map(|g| g.moves).sum();
    let score: u64 = stats.values().map(|g| g.score).sum();
    let combo: u64 = stats.values().map(|g| u64::from(g.max_combo)).sum();
    moves as f64 / games + 0.4 * (combo as f64 / games) + 0.001 * (score as f64 / games)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats_score_zero() {
        assert_eq!(calc_fitness(&GameStats::new()), 0.0);
    }

    #[test]
    fn test_fitness_averages_across_games() {
        let mut stats = GameStats::new();
        stats.insert(
            "1".to_owned(),
            GameRecord {
                moves: 10,
                score: 1000,
                max_combo: 5,
            },
        );
        stats.insert(
            "2".to_owned(),
            GameRecord {
                moves: 20,
                score: 3000,
                max_combo: 5,
            },
        );
        // mean moves 15, mean combo 5, mean score 2000
        let expected = 15.0 + 0.4 * 5.0 + 0.001 * 2000.0;
        assert!((calc_fitness(&stats) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_record_wire_field_names() {
        let record = GameRecord {
            moves: 3,
            score: 70,
            max_combo: 1,
        };
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "Moves": 3, "Score": 70, "Max_Combo": 1 })
        );
    }
}
