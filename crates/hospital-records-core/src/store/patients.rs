//! Patient store operations.

use super::{RecordStore, StoreResult};
use crate::models::{Patient, RecordId};

impl RecordStore {
    /// Add a patient, assigning an ID if it has none.
    pub fn add_patient(&mut self, patient: Patient) -> StoreResult<Patient> {
        self.patients.insert(patient)
    }

    /// All patients, in insertion order.
    pub fn list_patients(&self) -> Vec<Patient> {
        self.patients.list()
    }

    pub fn get_patient(&self, patient_id: RecordId) -> Option<&Patient> {
        self.patients.get(patient_id)
    }

    /// Replace an existing patient.
    pub fn update_patient(&mut self, patient: Patient) -> StoreResult<()> {
        self.patients.update(patient)
    }

    /// Delete a patient. Appointments that reference it are left in place.
    pub fn delete_patient(&mut self, patient_id: RecordId) -> Option<Patient> {
        self.patients.remove(patient_id)
    }
}
