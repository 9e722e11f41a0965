//! Result of resolving one diagnosis.

use serde::{Deserialize, Serialize};

/// What happened when a hospital submitted a diagnosis.
///
/// Check `success` first: a failed lookup leaves every other field at its default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiagnosisOutcome {
    /// False when the hospital or its pending patient could not be found
    pub success: bool,
    /// Department choice matched the case
    pub correct: bool,
    /// Patient got a bed
    pub admitted: bool,
    /// Score change, time bonus included
    pub points: i64,
    /// Submission landed inside the bonus window and earned the bonus
    pub time_bonus: bool,
    /// Human-readable summary for display
    pub message: String,
}

impl DiagnosisOutcome {
    /// Outcome for an unknown hospital or a hospital with nothing to diagnose.
    pub fn invalid() -> Self {
        Self {
            message: "Invalid hospital or patient".into(),
            ..Default::default()
        }
    }

    pub(crate) fn admitted(department: &str, base_points: u32, bonus: i64) -> Self {
        let mut message = format!(
            "✓ Correct diagnosis! Patient admitted to {}. +{} points",
            department, base_points
        );
        if bonus > 0 {
            message.push_str(&format!(" (+{} quick diagnosis bonus)", bonus));
        }
        Self {
            success: true,
            correct: true,
            admitted: true,
            points: base_points as i64 + bonus,
            time_bonus: bonus > 0,
            message,
        }
    }

    pub(crate) fn referred(department: &str, penalty: i64) -> Self {
        Self {
            success: true,
            correct: true,
            admitted: false,
            points: -penalty,
            time_bonus: false,
            message: format!(
                "✓ Correct diagnosis but no beds in {}. Patient referred. -{} point",
                department, penalty
            ),
        }
    }

    pub(crate) fn misdiagnosed(correct_dept: &str, penalty: i64) -> Self {
        Self {
            success: true,
            correct: false,
            admitted: false,
            points: -penalty,
            time_bonus: false,
            message: format!(
                "✗ Wrong diagnosis! Should be {}. -{} points",
                correct_dept, penalty
            ),
        }
    }
}
