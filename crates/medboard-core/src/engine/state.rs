//! Read-only snapshots for displays.

use serde::{Deserialize, Serialize};

use crate::models::Hospital;

use super::ranking::RankingEntry;

/// Snapshot of the whole game, computed fresh on each call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub game_id: Option<String>,
    pub round: u32,
    pub max_rounds: u32,
    /// Hospital names in registration order
    pub active_hospitals: Vec<String>,
    pub game_active: bool,
    /// Hospitals still owing a diagnosis this round
    pub remaining_patients: usize,
    pub game_over: bool,
    pub rankings: Vec<RankingEntry>,
}

/// Totals across all hospitals.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStatistics {
    pub total_admitted: usize,
    pub total_referred: u32,
    pub total_diagnoses: u32,
}

impl GameStatistics {
    pub fn collect(hospitals: &[Hospital]) -> Self {
        hospitals.iter().fold(Self::default(), |mut acc, h| {
            acc.total_admitted += h.admitted_patients().len();
            acc.total_referred += h.referred_count();
            acc.total_diagnoses += h.diagnosis_correct() + h.diagnosis_wrong();
            acc
        })
    }
}

/// Bed usage in one department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentBeds {
    pub department: String,
    pub occupied: u32,
    pub total: u32,
    pub available: u32,
    pub occupancy_rate: f64,
}

/// Bed usage across one hospital's departments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HospitalBeds {
    pub hospital: String,
    pub departments: Vec<DepartmentBeds>,
}

impl From<&Hospital> for HospitalBeds {
    fn from(hospital: &Hospital) -> Self {
        Self {
            hospital: hospital.name().to_string(),
            departments: hospital
                .departments()
                .iter()
                .map(|d| DepartmentBeds {
                    department: d.name().to_string(),
                    occupied: d.occupied_beds(),
                    total: d.total_beds(),
                    available: d.available_beds(),
                    occupancy_rate: d.occupancy_rate(),
                })
                .collect(),
        }
    }
}
