//! Game engine: rounds, diagnoses and rankings.
//!
//! A round draws one case per hospital. Each hospital then submits a single
//! department choice, which is scored as an admission, a referral (correct but
//! no bed), or a misdiagnosis.

mod activity_log;
mod phase;
mod ranking;
mod state;

pub use activity_log::*;
pub use phase::*;
pub use ranking::*;
pub use state::*;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use crate::config::{
    validate_case_table, ConfigError, GameSettings, DEPARTMENTS, PATIENT_CASES, REFERRAL_PENALTY,
    TIME_BONUS,
};
use crate::models::{DiagnosisOutcome, Hospital, InFlightPatient};

/// Engine errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Expected between {min} and {max} teams, got {count}")]
    TeamCount { count: usize, min: usize, max: usize },

    #[error("Team names must be unique: {0}")]
    DuplicateTeam(String),

    #[error("Team names must not be empty")]
    EmptyTeamName,

    #[error("Game has not been initialized")]
    NotInitialized,

    #[error("Maximum of {0} rounds reached")]
    MaxRoundsReached(u32),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Owns all mutable state of one game session.
pub struct GameEngine {
    settings: GameSettings,
    game_id: Option<String>,
    /// Registration order
    hospitals: Vec<Hospital>,
    /// Hospital name -> position in `hospitals`
    index: HashMap<String, usize>,
    current_round: u32,
    active: bool,
    current_patients: HashMap<String, InFlightPatient>,
    diagnosis_timers: HashMap<String, DateTime<Utc>>,
    log: ActivityLog,
    rng: StdRng,
}

impl GameEngine {
    /// Engine with default settings and an entropy-seeded case draw.
    pub fn new() -> Self {
        Self::build(GameSettings::default(), StdRng::from_entropy())
    }

    /// Engine with default settings and a reproducible case draw.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(GameSettings::default(), StdRng::seed_from_u64(seed))
    }

    /// Engine with custom session settings.
    pub fn with_settings(settings: GameSettings, seed: Option<u64>) -> EngineResult<Self> {
        settings.validate()?;
        validate_case_table(DEPARTMENTS, PATIENT_CASES)?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::build(settings, rng))
    }

    fn build(settings: GameSettings, rng: StdRng) -> Self {
        debug_assert!(settings.validate().is_ok());
        debug_assert!(validate_case_table(DEPARTMENTS, PATIENT_CASES).is_ok());
        Self {
            log: ActivityLog::new(settings.log_capacity),
            settings,
            game_id: None,
            hospitals: Vec::new(),
            index: HashMap::new(),
            current_round: 0,
            active: false,
            current_patients: HashMap::new(),
            diagnosis_timers: HashMap::new(),
            rng,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Register teams and reset all round state.
    ///
    /// Names must be non-empty, unique, and within the configured team bounds.
    /// On error the engine is left as it was.
    pub fn initialize_game<S: AsRef<str>>(&mut self, team_names: &[S]) -> EngineResult<()> {
        let count = team_names.len();
        if count < self.settings.min_teams || count > self.settings.max_teams {
            return Err(EngineError::TeamCount {
                count,
                min: self.settings.min_teams,
                max: self.settings.max_teams,
            });
        }

        let mut seen = HashSet::new();
        for name in team_names {
            let name: &str = name.as_ref();
            if name.is_empty() {
                return Err(EngineError::EmptyTeamName);
            }
            if !seen.insert(name) {
                return Err(EngineError::DuplicateTeam(name.to_string()));
            }
        }

        let names: Vec<String> = team_names.iter().map(|n| n.as_ref().to_string()).collect();
        self.hospitals = names.iter().map(|name| Hospital::new(name.as_str())).collect();
        self.index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        self.current_round = 0;
        self.active = true;
        self.current_patients.clear();
        self.diagnosis_timers.clear();
        self.log.clear();

        let game_id = uuid::Uuid::new_v4().to_string();
        log::info!("Game {} initialized with {} teams", game_id, count);
        self.game_id = Some(game_id);

        self.add_to_log(&format!(
            "Game started with {} teams: {}",
            count,
            names.join(", ")
        ));
        Ok(())
    }

    /// Drop all teams and return to setup.
    pub fn reset(&mut self) {
        if let Some(id) = &self.game_id {
            log::info!("Game {} reset after round {}", id, self.current_round);
        }
        self.game_id = None;
        self.hospitals.clear();
        self.index.clear();
        self.current_round = 0;
        self.active = false;
        self.current_patients.clear();
        self.diagnosis_timers.clear();
        self.log.clear();
    }

    // =========================================================================
    // Rounds
    // =========================================================================

    /// Start the next round now. See [`GameEngine::start_new_round_at`].
    pub fn start_new_round(&mut self) -> EngineResult<u32> {
        self.start_new_round_at(Utc::now())
    }

    /// Start the next round with patients issued at `now`.
    ///
    /// Every hospital gets a fresh case. Patients still pending from the
    /// previous round are replaced. Returns the new round number.
    pub fn start_new_round_at(&mut self, now: DateTime<Utc>) -> EngineResult<u32> {
        if !self.active {
            return Err(EngineError::NotInitialized);
        }
        if self.current_round >= self.settings.max_rounds {
            return Err(EngineError::MaxRoundsReached(self.settings.max_rounds));
        }
        if !self.current_patients.is_empty() {
            log::warn!(
                "Round {} superseded with {} diagnoses outstanding",
                self.current_round,
                self.current_patients.len()
            );
        }

        let round = self.current_round + 1;
        let mut patients = HashMap::with_capacity(self.hospitals.len());
        for hospital in &self.hospitals {
            let Some(template) = PATIENT_CASES.choose(&mut self.rng) else {
                return Err(ConfigError::InvalidCase("case table is empty".into()).into());
            };
            let patient = InFlightPatient::from_template(template, hospital.name(), round);
            log::debug!("{} -> {} ({})", patient.id, patient.complaint, patient.correct_dept);
            patients.insert(hospital.name().to_string(), patient);
        }

        self.current_round = round;
        for name in patients.keys() {
            self.diagnosis_timers.insert(name.clone(), now);
        }
        self.current_patients = patients;

        log::info!("Round {} started", round);
        self.add_to_log(&format!("Round {} started - New patients arrived", round));
        Ok(round)
    }

    // =========================================================================
    // Diagnosis
    // =========================================================================

    /// Resolve `hospital_name`'s pending patient with `chosen_department`.
    ///
    /// Unknown hospitals and hospitals with nothing pending get
    /// [`DiagnosisOutcome::invalid`] and nothing changes. Otherwise the
    /// patient is consumed, whatever the verdict.
    pub fn submit_diagnosis(
        &mut self,
        hospital_name: &str,
        chosen_department: &str,
        submission_time: DateTime<Utc>,
    ) -> DiagnosisOutcome {
        let Some(&idx) = self.index.get(hospital_name) else {
            log::debug!("Diagnosis for unknown hospital {}", hospital_name);
            return DiagnosisOutcome::invalid();
        };
        let Some(patient) = self.current_patients.remove(hospital_name) else {
            log::debug!("{} has no pending patient", hospital_name);
            return DiagnosisOutcome::invalid();
        };

        let bonus = match self.diagnosis_timers.get(hospital_name) {
            Some(issued) if submission_time - *issued < self.bonus_window() => TIME_BONUS,
            _ => 0,
        };

        let hospital = &mut self.hospitals[idx];
        let (outcome, entry) = if patient.is_correct(chosen_department) {
            match hospital.admit_patient(&patient, chosen_department) {
                Ok(true) => {
                    hospital.award_bonus(bonus);
                    (
                        DiagnosisOutcome::admitted(chosen_department, patient.points, bonus),
                        format!(
                            "{}: Correct diagnosis - {} → {}",
                            hospital_name, patient.complaint, chosen_department
                        ),
                    )
                }
                Ok(false) => {
                    hospital.refer_patient(&patient);
                    (
                        DiagnosisOutcome::referred(chosen_department, REFERRAL_PENALTY),
                        format!(
                            "{}: Correct diagnosis but no beds - patient referred",
                            hospital_name
                        ),
                    )
                }
                Err(e) => {
                    log::error!("{}: cannot admit {}: {}", hospital_name, patient.id, e);
                    self.current_patients.insert(hospital_name.to_string(), patient);
                    return DiagnosisOutcome {
                        message: e.to_string(),
                        ..DiagnosisOutcome::invalid()
                    };
                }
            }
        } else {
            hospital.misdiagnose(&patient);
            (
                DiagnosisOutcome::misdiagnosed(
                    &patient.correct_dept,
                    patient.misdiagnosis_penalty(),
                ),
                format!(
                    "{}: Wrong diagnosis - thought {}, actual {}",
                    hospital_name, chosen_department, patient.correct_dept
                ),
            )
        };

        log::info!(
            "{} resolved {}: correct={} admitted={} points={}",
            hospital_name,
            patient.id,
            outcome.correct,
            outcome.admitted,
            outcome.points
        );
        self.add_to_log(&entry);
        outcome
    }

    fn bonus_window(&self) -> Duration {
        Duration::try_seconds(self.settings.bonus_window_secs).unwrap_or_else(Duration::zero)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Leaderboard, highest score first; ties keep registration order.
    pub fn get_rankings(&self) -> Vec<RankingEntry> {
        rank_hospitals(&self.hospitals)
    }

    /// Append a timestamped entry to the activity log.
    pub fn add_to_log(&mut self, message: &str) {
        self.log.push(message);
    }

    pub fn get_game_state(&self) -> GameState {
        GameState {
            game_id: self.game_id.clone(),
            round: self.current_round,
            max_rounds: self.settings.max_rounds,
            active_hospitals: self.hospitals.iter().map(|h| h.name().to_string()).collect(),
            game_active: self.active,
            remaining_patients: self.current_patients.len(),
            game_over: self.is_game_over(),
            rankings: self.get_rankings(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        if !self.active {
            return GamePhase::Setup;
        }

        let pending: Vec<String> = self
            .hospitals
            .iter()
            .filter(|h| self.current_patients.contains_key(h.name()))
            .map(|h| h.name().to_string())
            .collect();

        if !pending.is_empty() {
            GamePhase::RoundInProgress { pending }
        } else if self.current_round >= self.settings.max_rounds {
            GamePhase::GameOver
        } else if self.current_round == 0 {
            GamePhase::AwaitingRoundStart
        } else {
            GamePhase::RoundComplete
        }
    }

    /// Final round played and every diagnosis in.
    pub fn is_game_over(&self) -> bool {
        self.active
            && self.current_round >= self.settings.max_rounds
            && self.current_patients.is_empty()
    }

    /// Top-ranked hospital, once the game is over.
    pub fn winner(&self) -> Option<RankingEntry> {
        if !self.is_game_over() {
            return None;
        }
        self.get_rankings().into_iter().next()
    }

    pub fn current_patient(&self, hospital_name: &str) -> Option<&InFlightPatient> {
        self.current_patients.get(hospital_name)
    }

    /// When the hospital's current (or last) patient was issued.
    pub fn round_started_at(&self, hospital_name: &str) -> Option<DateTime<Utc>> {
        self.diagnosis_timers.get(hospital_name).copied()
    }

    /// Seconds left on the advisory countdown, measured from the earliest
    /// pending patient. `None` when nothing is pending.
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        let earliest = self
            .current_patients
            .keys()
            .filter_map(|name| self.diagnosis_timers.get(name))
            .min()?;
        let elapsed = (now - *earliest).num_seconds();
        Some(
            self.settings
                .diagnosis_time_limit_secs
                .saturating_sub(elapsed)
                .max(0),
        )
    }

    pub fn bed_overview(&self) -> Vec<HospitalBeds> {
        self.hospitals.iter().map(HospitalBeds::from).collect()
    }

    pub fn game_statistics(&self) -> GameStatistics {
        GameStatistics::collect(&self.hospitals)
    }

    /// Up to `n` log entries, newest first.
    pub fn recent_log(&self, n: usize) -> Vec<String> {
        self.log.recent(n)
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    pub fn hospital(&self, name: &str) -> Option<&Hospital> {
        self.index.get(name).map(|&i| &self.hospitals[i])
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(names: &[&str]) -> (GameEngine, DateTime<Utc>) {
        let mut engine = GameEngine::with_seed(7);
        engine.initialize_game(names).unwrap();
        let t0 = Utc::now();
        engine.start_new_round_at(t0).unwrap();
        (engine, t0)
    }

    #[test]
    fn test_initialize_game() {
        let mut engine = GameEngine::with_seed(1);
        assert_eq!(engine.phase(), GamePhase::Setup);

        engine.initialize_game(&["Mercy", "General", "St. Luke"]).unwrap();

        assert_eq!(engine.current_round(), 0);
        assert_eq!(engine.hospitals().len(), 3);
        assert_eq!(engine.hospitals()[2].name(), "St. Luke");
        assert_eq!(engine.phase(), GamePhase::AwaitingRoundStart);
        assert_eq!(engine.log().len(), 1);
        assert!(engine.recent_log(1)[0].ends_with("Game started with 3 teams: Mercy, General, St. Luke"));
        assert_eq!(engine.game_id().unwrap().len(), 36);
    }

    #[test]
    fn test_initialize_rejects_bad_teams() {
        let mut engine = GameEngine::with_seed(1);
        assert_eq!(
            engine.initialize_game(&["Solo"]),
            Err(EngineError::TeamCount { count: 1, min: 2, max: 6 })
        );
        assert_eq!(
            engine.initialize_game(&["A", "B", "A"]),
            Err(EngineError::DuplicateTeam("A".into()))
        );
        assert_eq!(engine.initialize_game(&["A", ""]), Err(EngineError::EmptyTeamName));
        assert!(!engine.is_active());
        assert!(engine.hospitals().is_empty());
    }

    #[test]
    fn test_start_round_requires_init() {
        let mut engine = GameEngine::with_seed(1);
        assert_eq!(engine.start_new_round(), Err(EngineError::NotInitialized));
    }

    #[test]
    fn test_start_round_issues_patients() {
        let (engine, t0) = started(&["Mercy", "General"]);

        assert_eq!(engine.current_round(), 1);
        let patient = engine.current_patient("Mercy").unwrap();
        assert_eq!(patient.id, "P001_MER");
        assert_eq!(patient.hospital, "Mercy");
        assert_eq!(patient.round, 1);
        assert!(patient.options.contains(&patient.correct_dept));
        assert_eq!(engine.current_patient("General").unwrap().id, "P001_GEN");
        assert_eq!(engine.round_started_at("Mercy"), Some(t0));
        assert_eq!(
            engine.phase(),
            GamePhase::RoundInProgress {
                pending: vec!["Mercy".into(), "General".into()]
            }
        );
    }

    #[test]
    fn test_same_seed_same_cases() {
        let (a, _) = started(&["Mercy", "General"]);
        let (b, _) = started(&["Mercy", "General"]);
        assert_eq!(a.current_patient("Mercy"), b.current_patient("Mercy"));
        assert_eq!(a.current_patient("General"), b.current_patient("General"));
    }

    #[test]
    fn test_bonus_window_is_strict() {
        let (mut engine, t0) = started(&["Mercy", "General"]);

        let dept = engine.current_patient("Mercy").unwrap().correct_dept.clone();
        let points = engine.current_patient("Mercy").unwrap().points as i64;
        let outcome = engine.submit_diagnosis("Mercy", &dept, t0 + Duration::seconds(15));
        assert!(!outcome.time_bonus);
        assert_eq!(outcome.points, points);

        let dept = engine.current_patient("General").unwrap().correct_dept.clone();
        let points = engine.current_patient("General").unwrap().points as i64;
        let outcome = engine.submit_diagnosis("General", &dept, t0 + Duration::milliseconds(14_999));
        assert!(outcome.time_bonus);
        assert_eq!(outcome.points, points + 1);
        assert_eq!(engine.hospital("General").unwrap().score(), points + 1);
    }

    #[test]
    fn test_round_cycle_to_game_over() {
        let settings = GameSettings {
            max_rounds: 2,
            ..GameSettings::default()
        };
        let mut engine = GameEngine::with_settings(settings, Some(3)).unwrap();
        engine.initialize_game(&["A", "B"]).unwrap();

        for _ in 0..2 {
            let now = Utc::now();
            engine.start_new_round_at(now).unwrap();
            for name in ["A", "B"] {
                assert!(engine.submit_diagnosis(name, "Emergency", now).success);
            }
        }

        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert!(engine.is_game_over());
        assert!(engine.winner().is_some());
        assert_eq!(engine.start_new_round(), Err(EngineError::MaxRoundsReached(2)));
        assert_eq!(engine.current_round(), 2);
    }

    #[test]
    fn test_round_complete_phase() {
        let (mut engine, t0) = started(&["A", "B"]);
        engine.submit_diagnosis("A", "ICU", t0);
        assert_eq!(
            engine.phase(),
            GamePhase::RoundInProgress { pending: vec!["B".into()] }
        );
        engine.submit_diagnosis("B", "ICU", t0);
        assert_eq!(engine.phase(), GamePhase::RoundComplete);
        assert!(engine.winner().is_none());
    }

    #[test]
    fn test_superseded_round_replaces_patients() {
        let (mut engine, _) = started(&["Mercy", "General"]);
        engine.start_new_round().unwrap();
        assert_eq!(engine.current_round(), 2);
        assert_eq!(engine.current_patient("Mercy").unwrap().id, "P002_MER");
        assert_eq!(engine.get_game_state().remaining_patients, 2);
    }

    #[test]
    fn test_seconds_remaining() {
        let (mut engine, t0) = started(&["A", "B"]);
        assert_eq!(engine.seconds_remaining(t0 + Duration::seconds(10)), Some(20));
        assert_eq!(engine.seconds_remaining(t0 + Duration::seconds(45)), Some(0));

        engine.submit_diagnosis("A", "ICU", t0);
        engine.submit_diagnosis("B", "ICU", t0);
        assert_eq!(engine.seconds_remaining(t0), None);
    }

    #[test]
    fn test_failed_admission_keeps_patient_pending() {
        let (mut engine, t0) = started(&["A", "B"]);
        if let Some(patient) = engine.current_patients.get_mut("A") {
            patient.correct_dept = "Radiology".into();
        }
        let before = engine.hospital("A").unwrap().get_stats();
        let log_len = engine.log().len();

        let outcome = engine.submit_diagnosis("A", "Radiology", t0);

        assert!(!outcome.success);
        assert!(outcome.message.contains("Radiology"));
        assert_eq!(engine.current_patient("A").unwrap().correct_dept, "Radiology");
        assert_eq!(engine.hospital("A").unwrap().get_stats(), before);
        assert_eq!(engine.log().len(), log_len);
    }

    #[test]
    fn test_extreme_timestamps_do_not_panic() {
        let (mut engine, t0) = started(&["A", "B"]);
        assert_eq!(
            engine.seconds_remaining(t0 - Duration::days(365 * 1000)),
            Some(30 + 365 * 1000 * 86_400)
        );
        let dept = engine.current_patient("A").unwrap().correct_dept.clone();
        let outcome = engine.submit_diagnosis("A", &dept, t0 + Duration::days(365 * 1000));
        assert!(outcome.admitted);
        assert!(!outcome.time_bonus);
    }

    #[test]
    fn test_with_settings_rejects_unbounded_bonus_window() {
        let settings = GameSettings {
            bonus_window_secs: i64::MAX,
            ..GameSettings::default()
        };
        assert!(matches!(
            GameEngine::with_settings(settings, Some(1)),
            Err(EngineError::Config(ConfigError::InvalidSettings(_)))
        ));
    }

    #[test]
    fn test_default_constructors_match_validated_path() {
        assert!(GameEngine::with_settings(GameSettings::default(), Some(1)).is_ok());
        assert_eq!(GameEngine::with_seed(1).settings(), &GameSettings::default());
        assert_eq!(GameEngine::new().settings(), &GameSettings::default());
    }

    #[test]
    fn test_reset() {
        let (mut engine, _) = started(&["A", "B"]);
        engine.reset();
        assert_eq!(engine.phase(), GamePhase::Setup);
        assert!(engine.hospitals().is_empty());
        assert!(engine.log().is_empty());
        assert!(engine.game_id().is_none());
    }
}
