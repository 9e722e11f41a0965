//! Leaderboard entries.

use serde::{Deserialize, Serialize};

use crate::models::Hospital;

/// One row of the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankingEntry {
    /// 1-based position
    pub rank: usize,
    pub name: String,
    pub score: i64,
    pub admitted: usize,
    pub referred: u32,
    pub diagnosis_accuracy: f64,
}

impl RankingEntry {
    /// Medal for the podium, otherwise the rank number.
    pub fn medal(&self) -> String {
        match self.rank {
            1 => "🥇".to_string(),
            2 => "🥈".to_string(),
            3 => "🥉".to_string(),
            n => n.to_string(),
        }
    }
}

/// Rank hospitals by score, highest first.
///
/// Equal scores keep registration order.
pub fn rank_hospitals(hospitals: &[Hospital]) -> Vec<RankingEntry> {
    let mut ranked: Vec<&Hospital> = hospitals.iter().collect();
    ranked.sort_by(|a, b| b.score().cmp(&a.score()));

    ranked
        .into_iter()
        .enumerate()
        .map(|(i, hospital)| RankingEntry {
            rank: i + 1,
            name: hospital.name().to_string(),
            score: hospital.score(),
            admitted: hospital.admitted_patients().len(),
            referred: hospital.referred_count(),
            diagnosis_accuracy: hospital.diagnosis_accuracy(),
        })
        .collect()
}
