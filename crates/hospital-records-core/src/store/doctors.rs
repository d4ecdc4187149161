//! Doctor store operations.

use super::{RecordStore, StoreResult};
use crate::models::{Doctor, RecordId};

impl RecordStore {
    /// Add a doctor, assigning an ID if it has none.
    pub fn add_doctor(&mut self, doctor: Doctor) -> StoreResult<Doctor> {
        self.doctors.insert(doctor)
    }

    /// All doctors, in insertion order.
    pub fn list_doctors(&self) -> Vec<Doctor> {
        self.doctors.list()
    }

    pub fn get_doctor(&self, doctor_id: RecordId) -> Option<&Doctor> {
        self.doctors.get(doctor_id)
    }

    /// Replace an existing doctor.
    pub fn update_doctor(&mut self, doctor: Doctor) -> StoreResult<()> {
        self.doctors.update(doctor)
    }

    /// Delete a doctor. Appointments that reference it are left in place.
    pub fn delete_doctor(&mut self, doctor_id: RecordId) -> Option<Doctor> {
        self.doctors.remove(doctor_id)
    }
}
