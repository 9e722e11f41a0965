//! Patient case templates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How hard a case is to diagnose.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable patient case that rounds draw from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CaseTemplate {
    /// Presenting complaint shown to players
    pub complaint: &'static str,
    /// Department that counts as the correct diagnosis
    pub correct_dept: &'static str,
    /// Difficulty label
    pub difficulty: Difficulty,
    /// Points for a correct admission
    pub points: u32,
    /// Selectable departments (correct one plus distractors)
    pub options: &'static [&'static str],
}

/// Cases drawn uniformly, with replacement, at every round start.
pub const PATIENT_CASES: &[CaseTemplate] = &[
    CaseTemplate {
        complaint: "Severe chest pain radiating to left arm",
        correct_dept: "Cardiology",
        difficulty: Difficulty::Medium,
        points: 4,
        options: &["Cardiology", "Emergency", "Surgery"],
    },
    CaseTemplate {
        complaint: "High fever and rash in child",
        correct_dept: "Pediatrics",
        difficulty: Difficulty::Easy,
        points: 3,
        options: &["Pediatrics", "Emergency", "ICU"],
    },
    CaseTemplate {
        complaint: "Compound fracture of femur",
        correct_dept: "Orthopedics",
        difficulty: Difficulty::Medium,
        points: 4,
        options: &["Orthopedics", "Surgery", "Emergency"],
    },
    CaseTemplate {
        complaint: "Difficulty breathing and low oxygen",
        correct_dept: "ICU",
        difficulty: Difficulty::Hard,
        points: 5,
        options: &["ICU", "Emergency", "Cardiology"],
    },
    CaseTemplate {
        complaint: "Appendicitis symptoms",
        correct_dept: "Surgery",
        difficulty: Difficulty::Medium,
        points: 4,
        options: &["Surgery", "Emergency", "ICU"],
    },
    CaseTemplate {
        complaint: "Multiple trauma from car accident",
        correct_dept: "Emergency",
        difficulty: Difficulty::Hard,
        points: 5,
        options: &["Emergency", "Surgery", "ICU"],
    },
    CaseTemplate {
        complaint: "Burn injuries 30% body surface",
        correct_dept: "Surgery",
        difficulty: Difficulty::Hard,
        points: 5,
        options: &["Surgery", "Emergency", "ICU"],
    },
    CaseTemplate {
        complaint: "Neonatal jaundice",
        correct_dept: "Pediatrics",
        difficulty: Difficulty::Easy,
        points: 3,
        options: &["Pediatrics", "Emergency", "ICU"],
    },
    CaseTemplate {
        complaint: "Heart attack symptoms",
        correct_dept: "Cardiology",
        difficulty: Difficulty::Medium,
        points: 4,
        options: &["Cardiology", "Emergency", "ICU"],
    },
    CaseTemplate {
        complaint: "Dislocated shoulder",
        correct_dept: "Orthopedics",
        difficulty: Difficulty::Easy,
        points: 3,
        options: &["Orthopedics", "Emergency", "Surgery"],
    },
];
