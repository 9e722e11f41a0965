//! Medboard Core Library
//!
//! Turn-based hospital triage game engine. Teams run competing hospitals;
//! each round every hospital receives a random patient and must pick the
//! department to admit them to.
//!
//! # Round flow
//!
//! ```text
//! initialize_game(teams)
//!         │
//!         ▼
//! start_new_round ──► one InFlightPatient per hospital
//!         │
//!         ▼
//! submit_diagnosis(hospital, department, time)
//!         │
//!         ├── correct + free bed ──► admit   (+points, +1 if under 15s)
//!         ├── correct + full     ──► refer   (-1)
//!         └── wrong department   ──► misdiagnose (-points/2)
//!         │
//!         ▼
//! get_rankings / get_game_state
//! ```
//!
//! # Modules
//!
//! - [`config`]: Department and case tables, session settings
//! - [`models`]: Domain types (Hospital, DepartmentRecord, InFlightPatient, etc.)
//! - [`engine`]: Round state machine, scoring and rankings
//! - [`export`]: End-of-game summary export

pub mod config;
pub mod engine;
pub mod export;
pub mod models;

// Re-export commonly used types
pub use config::{CaseTemplate, DepartmentDef, Difficulty, GameSettings, DEPARTMENTS, PATIENT_CASES};
pub use engine::{EngineError, GameEngine, GamePhase, GameState, RankingEntry};
pub use export::GameSummary;
pub use models::{AdmittedPatient, DiagnosisOutcome, Hospital, HospitalStats, InFlightPatient};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MedboardError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Game state error: {0}")]
    GameState(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<EngineError> for MedboardError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::NotInitialized | EngineError::MaxRoundsReached(_) => {
                MedboardError::GameState(e.to_string())
            }
            _ => MedboardError::InvalidInput(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for MedboardError {
    fn from(e: serde_json::Error) -> Self {
        MedboardError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedboardError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedboardError::GameState(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a game session. Pass a seed for a reproducible case draw.
#[uniffi::export]
pub fn new_game_session(seed: Option<u64>) -> Arc<MedboardCore> {
    let engine = match seed {
        Some(seed) => GameEngine::with_seed(seed),
        None => GameEngine::new(),
    };
    Arc::new(MedboardCore {
        engine: Arc::new(Mutex::new(engine)),
    })
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe engine wrapper for FFI.
///
/// Every call holds the lock for its whole duration, so mutations from
/// several UI threads are applied one at a time.
#[derive(uniffi::Object)]
pub struct MedboardCore {
    engine: Arc<Mutex<GameEngine>>,
}

#[uniffi::export]
impl MedboardCore {
    // =========================================================================
    // Game Lifecycle
    // =========================================================================

    /// Register teams and reset the game.
    pub fn initialize_game(&self, team_names: Vec<String>) -> Result<(), MedboardError> {
        let mut engine = self.engine.lock()?;
        engine.initialize_game(team_names.as_slice())?;
        Ok(())
    }

    /// Start the next round, returning its number.
    pub fn start_new_round(&self) -> Result<u32, MedboardError> {
        let mut engine = self.engine.lock()?;
        Ok(engine.start_new_round()?)
    }

    /// Drop all teams and return to setup.
    pub fn reset(&self) -> Result<(), MedboardError> {
        let mut engine = self.engine.lock()?;
        engine.reset();
        Ok(())
    }

    // =========================================================================
    // Diagnosis
    // =========================================================================

    /// Submit a diagnosis timed at the moment of the call.
    pub fn submit_diagnosis(
        &self,
        hospital_name: String,
        department: String,
    ) -> Result<FfiDiagnosisOutcome, MedboardError> {
        let mut engine = self.engine.lock()?;
        let outcome = engine.submit_diagnosis(&hospital_name, &department, chrono::Utc::now());
        Ok(outcome.into())
    }

    /// Submit a diagnosis timed at `unix_millis`.
    pub fn submit_diagnosis_at(
        &self,
        hospital_name: String,
        department: String,
        unix_millis: i64,
    ) -> Result<FfiDiagnosisOutcome, MedboardError> {
        let submitted = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(unix_millis)
            .ok_or_else(|| {
                MedboardError::InvalidInput(format!("timestamp out of range: {}", unix_millis))
            })?;
        let mut engine = self.engine.lock()?;
        let outcome = engine.submit_diagnosis(&hospital_name, &department, submitted);
        Ok(outcome.into())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Patient the hospital has to diagnose, if any.
    pub fn current_patient(
        &self,
        hospital_name: String,
    ) -> Result<Option<FfiPatient>, MedboardError> {
        let engine = self.engine.lock()?;
        Ok(engine.current_patient(&hospital_name).map(|p| p.into()))
    }

    /// Leaderboard, highest score first.
    pub fn get_rankings(&self) -> Result<Vec<FfiRankingEntry>, MedboardError> {
        let engine = self.engine.lock()?;
        Ok(engine.get_rankings().into_iter().map(|r| r.into()).collect())
    }

    /// Full game snapshot.
    pub fn get_game_state(&self) -> Result<FfiGameState, MedboardError> {
        let engine = self.engine.lock()?;
        Ok(FfiGameState::new(engine.get_game_state(), &engine.phase()))
    }

    /// Most recent activity log entries, newest first.
    pub fn game_log(&self, limit: u32) -> Result<Vec<String>, MedboardError> {
        let engine = self.engine.lock()?;
        Ok(engine.recent_log(limit as usize))
    }

    /// Export game results as JSON.
    pub fn export_summary_json(&self) -> Result<String, MedboardError> {
        let engine = self.engine.lock()?;
        Ok(GameSummary::from_engine(&engine).to_json()?)
    }
}

fn phase_label(phase: &GamePhase) -> &'static str {
    match phase {
        GamePhase::Setup => "setup",
        GamePhase::AwaitingRoundStart => "awaiting_round_start",
        GamePhase::RoundInProgress { .. } => "round_in_progress",
        GamePhase::RoundComplete => "round_complete",
        GamePhase::GameOver => "game_over",
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe diagnosis outcome.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDiagnosisOutcome {
    pub success: bool,
    pub correct: bool,
    pub admitted: bool,
    pub points: i64,
    pub time_bonus: bool,
    pub message: String,
}

impl From<DiagnosisOutcome> for FfiDiagnosisOutcome {
    fn from(outcome: DiagnosisOutcome) -> Self {
        Self {
            success: outcome.success,
            correct: outcome.correct,
            admitted: outcome.admitted,
            points: outcome.points,
            time_bonus: outcome.time_bonus,
            message: outcome.message,
        }
    }
}

/// FFI-safe in-flight patient. The correct department is not exposed.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub hospital: String,
    pub round: u32,
    pub complaint: String,
    pub difficulty: String,
    pub points: u32,
    pub options: Vec<String>,
}

impl From<&InFlightPatient> for FfiPatient {
    fn from(patient: &InFlightPatient) -> Self {
        Self {
            id: patient.id.clone(),
            hospital: patient.hospital.clone(),
            round: patient.round,
            complaint: patient.complaint.clone(),
            difficulty: patient.difficulty.to_string(),
            points: patient.points,
            options: patient.options.clone(),
        }
    }
}

/// FFI-safe ranking entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRankingEntry {
    pub rank: u32,
    pub medal: String,
    pub name: String,
    pub score: i64,
    pub admitted: u32,
    pub referred: u32,
    pub diagnosis_accuracy: f64,
}

impl From<RankingEntry> for FfiRankingEntry {
    fn from(entry: RankingEntry) -> Self {
        Self {
            rank: entry.rank as u32,
            medal: entry.medal(),
            name: entry.name,
            score: entry.score,
            admitted: entry.admitted as u32,
            referred: entry.referred,
            diagnosis_accuracy: entry.diagnosis_accuracy,
        }
    }
}

/// FFI-safe game state.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiGameState {
    pub game_id: Option<String>,
    pub phase: String,
    pub round: u32,
    pub max_rounds: u32,
    pub active_hospitals: Vec<String>,
    pub game_active: bool,
    pub remaining_patients: u32,
    pub game_over: bool,
    pub rankings: Vec<FfiRankingEntry>,
}

impl FfiGameState {
    fn new(state: GameState, phase: &GamePhase) -> Self {
        Self {
            game_id: state.game_id,
            phase: phase_label(phase).to_string(),
            round: state.round,
            max_rounds: state.max_rounds,
            active_hospitals: state.active_hospitals,
            game_active: state.game_active,
            remaining_patients: state.remaining_patients as u32,
            game_over: state.game_over,
            rankings: state.rankings.into_iter().map(|r| r.into()).collect(),
        }
    }
}
