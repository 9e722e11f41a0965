//! Patient models.

use serde::{Deserialize, Serialize};

use crate::config::{CaseTemplate, Difficulty};

/// Status of an admitted patient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PatientStatus {
    /// Occupying a bed
    Admitted,
    /// Bed freed
    Discharged,
}

/// A patient placed into a department bed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdmittedPatient {
    /// Presenting complaint
    pub complaint: String,
    /// Department the patient was admitted to
    pub department: String,
    /// Points the admission earned (excluding any time bonus)
    pub points: u32,
    /// Admission timestamp (RFC 3339)
    pub admission_time: String,
    /// Current status
    pub status: PatientStatus,
}

impl AdmittedPatient {
    /// Build the admission record for `patient` in `department`, stamped now.
    pub fn admit(patient: &InFlightPatient, department: &str) -> Self {
        Self {
            complaint: patient.complaint.clone(),
            department: department.to_string(),
            points: patient.points,
            admission_time: chrono::Utc::now().to_rfc3339(),
            status: PatientStatus::Admitted,
        }
    }
}

/// The case a hospital has to diagnose this round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InFlightPatient {
    /// Round-scoped ID, e.g. `P003_HOS`
    pub id: String,
    /// Hospital the patient arrived at
    pub hospital: String,
    /// Round the patient arrived in
    pub round: u32,
    /// Presenting complaint
    pub complaint: String,
    /// Department that counts as the correct diagnosis
    pub correct_dept: String,
    /// Difficulty label
    pub difficulty: Difficulty,
    /// Points for a correct admission
    pub points: u32,
    /// Departments offered to the players
    pub options: Vec<String>,
}

impl InFlightPatient {
    /// Instantiate a case template for one hospital and round.
    pub fn from_template(template: &CaseTemplate, hospital: &str, round: u32) -> Self {
        Self {
            id: patient_id(round, hospital),
            hospital: hospital.to_string(),
            round,
            complaint: template.complaint.to_string(),
            correct_dept: template.correct_dept.to_string(),
            difficulty: template.difficulty,
            points: template.points,
            options: template.options.iter().map(|o| o.to_string()).collect(),
        }
    }

    /// Check a department choice against the correct one.
    pub fn is_correct(&self, department: &str) -> bool {
        self.correct_dept == department
    }

    /// Points lost on a wrong diagnosis (half, rounded down).
    pub fn misdiagnosis_penalty(&self) -> i64 {
        (self.points / 2) as i64
    }
}

/// Build `P{round:03}_{PREFIX}` where the prefix is the hospital's first three characters.
pub fn patient_id(round: u32, hospital: &str) -> String {
    let prefix: String = hospital.chars().take(3).collect::<String>().to_uppercase();
    format!("P{:03}_{}", round, prefix)
}
