//! Per-hospital department bed bookkeeping.

use serde::Serialize;

use crate::config::DepartmentDef;

use super::patient::{AdmittedPatient, PatientStatus};

/// One department's beds inside a hospital.
///
/// `occupied_beds` never exceeds `total_beds`; available beds are derived.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DepartmentRecord {
    name: String,
    total_beds: u32,
    occupied_beds: u32,
    patients: Vec<AdmittedPatient>,
}

impl DepartmentRecord {
    /// Create an empty department from its definition.
    pub fn new(def: &DepartmentDef) -> Self {
        Self {
            name: def.name.to_string(),
            total_beds: def.beds,
            occupied_beds: 0,
            patients: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_beds(&self) -> u32 {
        self.total_beds
    }

    pub fn occupied_beds(&self) -> u32 {
        self.occupied_beds
    }

    pub fn available_beds(&self) -> u32 {
        self.total_beds - self.occupied_beds
    }

    /// Patients currently occupying beds, in admission order.
    pub fn patients(&self) -> &[AdmittedPatient] {
        &self.patients
    }

    /// Percentage of beds in use.
    pub fn occupancy_rate(&self) -> f64 {
        self.occupied_beds as f64 / self.total_beds.max(1) as f64 * 100.0
    }

    /// Take a bed for `record`. Returns false, untouched, when full.
    pub(crate) fn occupy(&mut self, record: AdmittedPatient) -> bool {
        if self.available_beds() == 0 {
            return false;
        }
        self.occupied_beds += 1;
        self.patients.push(record);
        true
    }

    /// Free the bed held by the patient at `index`.
    pub(crate) fn release(&mut self, index: usize) -> Option<AdmittedPatient> {
        if index >= self.patients.len() {
            return None;
        }
        let mut record = self.patients.remove(index);
        self.occupied_beds -= 1;
        record.status = PatientStatus::Discharged;
        Some(record)
    }
}
