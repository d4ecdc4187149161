//! Appointment store operations.
//!
//! Appointments reference patients and doctors by ID. Nothing here checks that
//! those IDs exist, at insert time or later.

use super::{RecordStore, StoreResult};
use crate::models::{Appointment, AppointmentStatus, RecordId};

impl RecordStore {
    /// Add an appointment, assigning an ID if it has none.
    pub fn add_appointment(&mut self, appointment: Appointment) -> StoreResult<Appointment> {
        self.appointments.insert(appointment)
    }

    /// All appointments, in insertion order.
    pub fn list_appointments(&self) -> Vec<Appointment> {
        self.appointments.list()
    }

    pub fn get_appointment(&self, appointment_id: RecordId) -> Option<&Appointment> {
        self.appointments.get(appointment_id)
    }

    /// Replace an existing appointment. Any status may follow any other.
    pub fn update_appointment(&mut self, appointment: Appointment) -> StoreResult<()> {
        self.appointments.update(appointment)
    }

    pub fn delete_appointment(&mut self, appointment_id: RecordId) -> Option<Appointment> {
        self.appointments.remove(appointment_id)
    }

    /// Appointments with the given status, or all of them for `None`.
    pub fn appointments_with_status(&self, status: Option<AppointmentStatus>) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|a| status.map_or(true, |s| a.status == s))
            .cloned()
            .collect()
    }

    pub fn appointments_for_patient(&self, patient_id: RecordId) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect()
    }

    pub fn appointments_for_doctor(&self, doctor_id: RecordId) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id)
            .cloned()
            .collect()
    }

    /// Appointments whose patient or doctor no longer exists.
    pub fn dangling_appointments(&self) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|a| !self.patients.contains(a.patient_id) || !self.doctors.contains(a.doctor_id))
            .cloned()
            .collect()
    }
}
