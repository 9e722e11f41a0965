//! Hospital teams and their scoring bookkeeping.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{DepartmentDef, DEPARTMENTS, REFERRAL_PENALTY};

use super::department::DepartmentRecord;
use super::patient::{AdmittedPatient, InFlightPatient};

/// Hospital errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HospitalError {
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    #[error("No patient at index {index} in {department}")]
    PatientNotFound { department: String, index: usize },
}

pub type HospitalResult<T> = Result<T, HospitalError>;

/// Point-in-time statistics for one hospital.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HospitalStats {
    pub name: String,
    pub score: i64,
    /// Patients admitted over the whole game
    pub admitted: usize,
    pub referred: u32,
    /// Correct diagnoses as a percentage of all diagnoses (0 before any)
    pub diagnosis_accuracy: f64,
    /// Occupied beds as a percentage of all beds
    pub bed_occupancy_rate: f64,
}

/// A competing team with its own beds, score and diagnosis history.
#[derive(Debug, Clone, Serialize)]
pub struct Hospital {
    name: String,
    score: i64,
    departments: Vec<DepartmentRecord>,
    admitted_patients: Vec<AdmittedPatient>,
    referred_count: u32,
    diagnosis_correct: u32,
    diagnosis_wrong: u32,
}

impl Hospital {
    /// Create a hospital with the standard departments.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_departments(name, DEPARTMENTS)
    }

    /// Create a hospital with an explicit department set.
    pub fn with_departments(name: impl Into<String>, departments: &[DepartmentDef]) -> Self {
        Self {
            name: name.into(),
            score: 0,
            departments: departments.iter().map(DepartmentRecord::new).collect(),
            admitted_patients: Vec::new(),
            referred_count: 0,
            diagnosis_correct: 0,
            diagnosis_wrong: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn referred_count(&self) -> u32 {
        self.referred_count
    }

    pub fn diagnosis_correct(&self) -> u32 {
        self.diagnosis_correct
    }

    pub fn diagnosis_wrong(&self) -> u32 {
        self.diagnosis_wrong
    }

    /// Every patient admitted so far, including ones since discharged.
    pub fn admitted_patients(&self) -> &[AdmittedPatient] {
        &self.admitted_patients
    }

    /// Departments in configuration order.
    pub fn departments(&self) -> &[DepartmentRecord] {
        &self.departments
    }

    pub fn department(&self, name: &str) -> Option<&DepartmentRecord> {
        self.departments.iter().find(|d| d.name() == name)
    }

    fn department_mut(&mut self, name: &str) -> HospitalResult<&mut DepartmentRecord> {
        self.departments
            .iter_mut()
            .find(|d| d.name() == name)
            .ok_or_else(|| HospitalError::UnknownDepartment(name.to_string()))
    }

    /// Admit an already correctly diagnosed patient.
    ///
    /// Returns `Ok(false)` without touching anything when the department is full.
    /// Correctness of the diagnosis is not re-checked here.
    pub fn admit_patient(
        &mut self,
        patient: &InFlightPatient,
        department: &str,
    ) -> HospitalResult<bool> {
        let record = AdmittedPatient::admit(patient, department);
        let dept = self.department_mut(department)?;
        if !dept.occupy(record.clone()) {
            return Ok(false);
        }

        self.admitted_patients.push(record);
        self.score += patient.points as i64;
        self.diagnosis_correct += 1;
        Ok(true)
    }

    /// Turn away a correctly diagnosed patient for lack of beds.
    pub fn refer_patient(&mut self, patient: &InFlightPatient) {
        log::debug!("{}: referring {} ({})", self.name, patient.id, patient.correct_dept);
        self.referred_count += 1;
        self.score -= REFERRAL_PENALTY;
    }

    /// Record a wrong diagnosis, losing half the case's points.
    pub fn misdiagnose(&mut self, patient: &InFlightPatient) {
        self.diagnosis_wrong += 1;
        self.score -= patient.misdiagnosis_penalty();
    }

    /// Discharge the patient at `index` in `department`, freeing their bed.
    ///
    /// The game-wide admission history is kept.
    pub fn discharge_patient(
        &mut self,
        department: &str,
        index: usize,
    ) -> HospitalResult<AdmittedPatient> {
        self.department_mut(department)?
            .release(index)
            .ok_or_else(|| HospitalError::PatientNotFound {
                department: department.to_string(),
                index,
            })
    }

    /// Add points outside the admission path (the time bonus).
    pub(crate) fn award_bonus(&mut self, points: i64) {
        self.score += points;
    }

    pub fn diagnosis_accuracy(&self) -> f64 {
        let total = (self.diagnosis_correct + self.diagnosis_wrong).max(1);
        self.diagnosis_correct as f64 / total as f64 * 100.0
    }

    pub fn bed_occupancy_rate(&self) -> f64 {
        let occupied: u32 = self.departments.iter().map(|d| d.occupied_beds()).sum();
        let total: u32 = self.departments.iter().map(|d| d.total_beds()).sum();
        occupied as f64 / total.max(1) as f64 * 100.0
    }

    pub fn get_stats(&self) -> HospitalStats {
        HospitalStats {
            name: self.name.clone(),
            score: self.score,
            admitted: self.admitted_patients.len(),
            referred: self.referred_count,
            diagnosis_accuracy: self.diagnosis_accuracy(),
            bed_occupancy_rate: self.bed_occupancy_rate(),
        }
    }
}
