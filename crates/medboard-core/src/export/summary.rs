//! End-of-game results export.

use serde::{Deserialize, Serialize};

use crate::engine::{GameEngine, GameStatistics, RankingEntry};

/// Results of a game, suitable for archiving or sharing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    /// Export metadata
    pub metadata: SummaryMetadata,
    /// Final (or current) leaderboard
    pub rankings: Vec<RankingEntry>,
    /// Totals across all hospitals
    pub statistics: GameStatistics,
}

/// Summary export metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetadata {
    /// Game session ID
    pub game_id: Option<String>,
    /// Rounds played
    pub rounds_played: u32,
    /// Configured round limit
    pub max_rounds: u32,
    /// Whether the game had finished at export time
    pub completed: bool,
    /// Export timestamp
    pub exported_at: String,
}

impl GameSummary {
    /// Snapshot the engine's current results.
    pub fn from_engine(engine: &GameEngine) -> Self {
        Self {
            metadata: SummaryMetadata {
                game_id: engine.game_id().map(str::to_string),
                rounds_played: engine.current_round(),
                max_rounds: engine.settings().max_rounds,
                completed: engine.is_game_over(),
                exported_at: chrono::Utc::now().to_rfc3339(),
            },
            rankings: engine.get_rankings(),
            statistics: engine.game_statistics(),
        }
    }

    /// Winning hospital, if the game is complete.
    pub fn winner(&self) -> Option<&RankingEntry> {
        if !self.metadata.completed {
            return None;
        }
        self.rankings.first()
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the leaderboard to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("rank,hospital,score,admitted,referred,accuracy\n");

        for entry in &self.rankings {
            csv.push_str(&format!(
                "{},{},{},{},{},{:.1}\n",
                entry.rank,
                escape_csv(&entry.name),
                entry.score,
                entry.admitted,
                entry.referred,
                entry.diagnosis_accuracy,
            ));
        }

        csv
    }
}

/// Escape a string for CSV.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
