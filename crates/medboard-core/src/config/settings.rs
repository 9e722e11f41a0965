//! Session settings.

use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigResult};

/// Longest timing window a session may configure.
pub const MAX_WINDOW_SECS: i64 = 24 * 60 * 60;

/// Bounds the host applies to a game session.
///
/// Scoring rules are fixed; these only size the session. Every field has a
/// default, so a partial JSON document is enough to override one of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameSettings {
    /// Rounds before the game is over
    pub max_rounds: u32,
    /// Fewest teams a game can start with
    pub min_teams: usize,
    /// Most teams a game can start with
    pub max_teams: usize,
    /// Submissions strictly faster than this earn the time bonus
    pub bonus_window_secs: i64,
    /// Advisory countdown shown to players; submissions past it are still scored
    pub diagnosis_time_limit_secs: i64,
    /// Activity log entries retained
    pub log_capacity: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_rounds: 15,
            min_teams: 2,
            max_teams: 6,
            bonus_window_secs: 15,
            diagnosis_time_limit_secs: 30,
            log_capacity: 50,
        }
    }
}

impl GameSettings {
    /// Parse settings from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let settings: GameSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the bounds are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_teams == 0 {
            return Err(ConfigError::InvalidSettings("min_teams must be at least 1".into()));
        }
        if self.min_teams > self.max_teams {
            return Err(ConfigError::InvalidSettings(format!(
                "min_teams ({}) exceeds max_teams ({})",
                self.min_teams, self.max_teams
            )));
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::InvalidSettings("max_rounds must be positive".into()));
        }
        for (field, value) in [
            ("bonus_window_secs", self.bonus_window_secs),
            ("diagnosis_time_limit_secs", self.diagnosis_time_limit_secs),
        ] {
            if !(0..=MAX_WINDOW_SECS).contains(&value) {
                return Err(ConfigError::InvalidSettings(format!(
                    "{} must be between 0 and {}, got {}",
                    field, MAX_WINDOW_SECS, value
                )));
            }
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::InvalidSettings("log_capacity must be positive".into()));
        }
        Ok(())
    }
}
