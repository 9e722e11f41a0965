//! Static game configuration: departments, patient cases, and session settings.

mod cases;
mod departments;
mod settings;

pub use cases::*;
pub use departments::*;
pub use settings::*;

use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid case table: {0}")]
    InvalidCase(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Points deducted when a correctly diagnosed patient has to be referred elsewhere.
pub const REFERRAL_PENALTY: i64 = 1;

/// Points awarded for an admission submitted inside the bonus window.
pub const TIME_BONUS: i64 = 1;

/// Check that every case only references configured departments.
pub fn validate_case_table(departments: &[DepartmentDef], cases: &[CaseTemplate]) -> ConfigResult<()> {
    if cases.is_empty() {
        return Err(ConfigError::InvalidCase("case table is empty".into()));
    }

    let known = |name: &str| departments.iter().any(|d| d.name == name);

    for case in cases {
        if case.points == 0 {
            return Err(ConfigError::InvalidCase(format!(
                "'{}' is worth zero points",
                case.complaint
            )));
        }
        if !known(case.correct_dept) {
            return Err(ConfigError::InvalidCase(format!(
                "'{}' targets unknown department {}",
                case.complaint, case.correct_dept
            )));
        }
        if !case.options.contains(&case.correct_dept) {
            return Err(ConfigError::InvalidCase(format!(
                "'{}' does not offer its correct department",
                case.complaint
            )));
        }
        if let Some(bad) = case.options.iter().find(|opt| !known(opt)) {
            return Err(ConfigError::InvalidCase(format!(
                "'{}' offers unknown department {}",
                case.complaint, bad
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_consistent() {
        assert!(validate_case_table(DEPARTMENTS, PATIENT_CASES).is_ok());
    }

    #[test]
    fn test_rejects_unknown_option() {
        let cases = [CaseTemplate {
            complaint: "Toothache",
            correct_dept: "Emergency",
            difficulty: Difficulty::Easy,
            points: 3,
            options: &["Emergency", "Dentistry"],
        }];
        let err = validate_case_table(DEPARTMENTS, &cases).unwrap_err();
        assert!(err.to_string().contains("Dentistry"));
    }

    #[test]
    fn test_rejects_missing_correct_option() {
        let cases = [CaseTemplate {
            complaint: "Sprained wrist",
            correct_dept: "Orthopedics",
            difficulty: Difficulty::Easy,
            points: 3,
            options: &["Emergency", "Surgery"],
        }];
        assert!(matches!(
            validate_case_table(DEPARTMENTS, &cases),
            Err(ConfigError::InvalidCase(_))
        ));
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(validate_case_table(DEPARTMENTS, &[]).is_err());
    }
}
