//! Hospital Records Core Library
//!
//! In-memory record store for patients, doctors and appointments, with the
//! form validation and table views the front ends share.
//!
//! # Architecture
//!
//! ```text
//!   Shell panels / host UI
//!            │  form text
//!            ▼
//!   ┌──────────────────┐   ValidationError → message to user
//!   │  forms::validate │───────────────────────────────────▶
//!   └────────┬─────────┘
//!            │  Patient / Doctor / Appointment
//!            ▼
//!   ┌──────────────────┐
//!   │   RecordStore    │  patients │ doctors │ appointments
//!   └────────┬─────────┘
//!            │  snapshot
//!      ┌─────┴──────┬──────────────┐
//!      ▼            ▼              ▼
//!   views        search         export
//! (tables)    (name lookup)   (JSON / CSV)
//! ```
//!
//! # Core Principle
//!
//! **Appointments reference patients and doctors by ID only.** Deleting either
//! never touches appointments; views show [`views::UNKNOWN_LABEL`] instead.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, Doctor, Appointment, etc.)
//! - [`store`]: The record store and its per-kind tables
//! - [`forms`]: Form input and validation rules
//! - [`views`]: Table views for each panel
//! - [`search`]: Fuzzy name search
//! - [`export`]: Snapshot and CSV export

pub mod export;
pub mod forms;
pub mod models;
pub mod search;
pub mod store;
pub mod views;

// Re-export commonly used types
pub use export::RecordSnapshot;
pub use forms::{AppointmentForm, DoctorForm, PatientForm, ValidationError};
pub use models::{Appointment, AppointmentStatus, Doctor, Gender, Patient, RecordId};
pub use store::{RecordKind, RecordStore, StoreError};
pub use views::{AppointmentRow, TableView};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum HospitalError {
    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<ValidationError> for HospitalError {
    fn from(e: ValidationError) -> Self {
        HospitalError::Validation(e.to_string())
    }
}

impl From<StoreError> for HospitalError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => HospitalError::NotFound(e.to_string()),
            _ => HospitalError::Store(e.to_string()),
        }
    }
}

impl From<export::ExportError> for HospitalError {
    fn from(e: export::ExportError) -> Self {
        HospitalError::Serialization(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for HospitalError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HospitalError::Store(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a record store, optionally holding the demonstration rows.
#[uniffi::export]
pub fn open_record_store(seed: bool) -> Arc<HospitalCore> {
    let store = if seed {
        RecordStore::with_seed_data()
    } else {
        RecordStore::new()
    };
    Arc::new(HospitalCore {
        store: Arc::new(Mutex::new(store)),
    })
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store wrapper for FFI.
///
/// Every call takes the one lock, so host UIs with several threads still see
/// a single writer.
#[derive(uniffi::Object)]
pub struct HospitalCore {
    store: Arc<Mutex<RecordStore>>,
}

#[uniffi::export]
impl HospitalCore {
    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Validate the form and add a patient.
    pub fn add_patient(&self, form: FfiPatientForm) -> Result<FfiPatient, HospitalError> {
        let patient = PatientForm::from(form).validate()?;
        let mut store = self.store.lock()?;
        Ok(store.add_patient(patient)?.into())
    }

    /// Validate the form and replace an existing patient.
    pub fn update_patient(
        &self,
        patient_id: u32,
        form: FfiPatientForm,
    ) -> Result<FfiPatient, HospitalError> {
        let mut patient = PatientForm::from(form).validate()?;
        patient.patient_id = patient_id;
        let mut store = self.store.lock()?;
        store.update_patient(patient.clone())?;
        Ok(patient.into())
    }

    pub fn get_patient(&self, patient_id: u32) -> Result<Option<FfiPatient>, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.get_patient(patient_id).cloned().map(Into::into))
    }

    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.list_patients().into_iter().map(Into::into).collect())
    }

    /// Delete a patient. Returns false if there was none.
    pub fn delete_patient(&self, patient_id: u32) -> Result<bool, HospitalError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_patient(patient_id).is_some())
    }

    /// Search patients by name.
    pub fn search_patients(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<FfiPatient>, HospitalError> {
        let store = self.store.lock()?;
        let hits = store.search_patients(&query, limit as usize);
        Ok(hits.into_iter().map(|h| h.record.into()).collect())
    }

    // =========================================================================
    // Doctor Operations
    // =========================================================================

    /// Validate the form and add a doctor.
    pub fn add_doctor(&self, form: FfiDoctorForm) -> Result<FfiDoctor, HospitalError> {
        let doctor = DoctorForm::from(form).validate()?;
        let mut store = self.store.lock()?;
        Ok(store.add_doctor(doctor)?.into())
    }

    /// Validate the form and replace an existing doctor.
    pub fn update_doctor(
        &self,
        doctor_id: u32,
        form: FfiDoctorForm,
    ) -> Result<FfiDoctor, HospitalError> {
        let mut doctor = DoctorForm::from(form).validate()?;
        doctor.doctor_id = doctor_id;
        let mut store = self.store.lock()?;
        store.update_doctor(doctor.clone())?;
        Ok(doctor.into())
    }

    pub fn get_doctor(&self, doctor_id: u32) -> Result<Option<FfiDoctor>, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.get_doctor(doctor_id).cloned().map(Into::into))
    }

    pub fn list_doctors(&self) -> Result<Vec<FfiDoctor>, HospitalError> {
        let store = self.store.lock()?;
        Ok(store.list_doctors().into_iter().map(Into::into).collect())
    }

    /// Delete a doctor. Returns false if there was none.
    pub fn delete_doctor(&self, doctor_id: u32) -> Result<bool, HospitalError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_doctor(doctor_id).is_some())
    }

    /// Search doctors by name.
    pub fn search_doctors(&self, query: String, limit: u32) -> Result<Vec<FfiDoctor>, HospitalError> {
        let store = self.store.lock()?;
        let hits = store.search_doctors(&query, limit as usize);
        Ok(hits.into_iter().map(|h| h.record.into()).collect())
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    /// Validate the form and book an appointment.
    pub fn add_appointment(
        &self,
        form: FfiAppointmentForm,
    ) -> Result<FfiAppointmentRow, HospitalError> {
        let appointment = AppointmentForm::from(form).validate()?;
        let mut store = self.store.lock()?;
        let stored = store.add_appointment(appointment)?;
        Ok(views::appointment_row(&store, &stored).into())
    }

    /// Validate the form and replace an existing appointment.
    pub fn update_appointment(
        &self,
        appointment_id: u32,
        form: FfiAppointmentForm,
    ) -> Result<FfiAppointmentRow, HospitalError> {
        let mut appointment = AppointmentForm::from(form).validate()?;
        appointment.appointment_id = appointment_id;
        let mut store = self.store.lock()?;
        store.update_appointment(appointment.clone())?;
        Ok(views::appointment_row(&store, &appointment).into())
    }

    pub fn get_appointment(
        &self,
        appointment_id: u32,
    ) -> Result<Option<FfiAppointmentRow>, HospitalError> {
        let store = self.store.lock()?;
        Ok(store
            .get_appointment(appointment_id)
            .map(|a| views::appointment_row(&store, a).into()))
    }

    /// Appointment table rows. `status_filter` is "All", a status, or absent.
    pub fn list_appointment_rows(
        &self,
        status_filter: Option<String>,
    ) -> Result<Vec<FfiAppointmentRow>, HospitalError> {
        let filter = match status_filter {
            Some(text) => views::parse_status_filter(&text).map_err(HospitalError::Validation)?,
            None => None,
        };
        let store = self.store.lock()?;
        Ok(views::appointment_rows(&store, filter)
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Delete an appointment. Returns false if there was none.
    pub fn delete_appointment(&self, appointment_id: u32) -> Result<bool, HospitalError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_appointment(appointment_id).is_some())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export the whole store as a JSON snapshot.
    pub fn export_json(&self) -> Result<String, HospitalError> {
        let store = self.store.lock()?;
        let snapshot = RecordSnapshot::capture(&store)?;
        Ok(snapshot.to_json()?)
    }

    /// Export one table ("patients", "doctors" or "appointments") as CSV.
    pub fn export_csv(&self, kind: String) -> Result<String, HospitalError> {
        let kind: RecordKind = kind.parse().map_err(HospitalError::Validation)?;
        let store = self.store.lock()?;
        Ok(export::export_csv(&store, kind))
    }

    /// Row counts per table.
    pub fn record_counts(&self) -> Result<FfiRecordCounts, HospitalError> {
        let store = self.store.lock()?;
        Ok(FfiRecordCounts {
            patients: store.count(RecordKind::Patient) as u32,
            doctors: store.count(RecordKind::Doctor) as u32,
            appointments: store.count(RecordKind::Appointment) as u32,
        })
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub patient_id: u32,
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub medical_history: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            patient_id: patient.patient_id,
            name: patient.name,
            age: patient.age,
            gender: patient.gender.to_string(),
            phone: patient.phone,
            address: patient.address,
            medical_history: patient.medical_history,
        }
    }
}

/// FFI-safe patient form (raw field text).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub medical_history: String,
}

impl From<FfiPatientForm> for PatientForm {
    fn from(form: FfiPatientForm) -> Self {
        PatientForm {
            name: form.name,
            age: form.age,
            gender: form.gender,
            phone: form.phone,
            address: form.address,
            medical_history: form.medical_history,
        }
    }
}

/// FFI-safe doctor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctor {
    pub doctor_id: u32,
    pub name: String,
    pub specialization: String,
    pub phone: String,
    pub email: String,
    pub schedule: String,
    pub consultation_fee: f64,
    pub display_fee: String,
}

impl From<Doctor> for FfiDoctor {
    fn from(doctor: Doctor) -> Self {
        let display_fee = doctor.display_fee();
        Self {
            doctor_id: doctor.doctor_id,
            name: doctor.name,
            specialization: doctor.specialization,
            phone: doctor.phone,
            email: doctor.email,
            schedule: doctor.schedule,
            consultation_fee: doctor.consultation_fee,
            display_fee,
        }
    }
}

/// FFI-safe doctor form (raw field text).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctorForm {
    pub name: String,
    pub specialization: String,
    pub phone: String,
    pub email: String,
    pub schedule: String,
    pub consultation_fee: String,
}

impl From<FfiDoctorForm> for DoctorForm {
    fn from(form: FfiDoctorForm) -> Self {
        DoctorForm {
            name: form.name,
            specialization: form.specialization,
            phone: form.phone,
            email: form.email,
            schedule: form.schedule,
            consultation_fee: form.consultation_fee,
        }
    }
}

/// FFI-safe appointment form. Unselected patient/doctor is `None`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentForm {
    pub patient_id: Option<u32>,
    pub doctor_id: Option<u32>,
    pub date: String,
    pub time: String,
    pub status: String,
    pub notes: String,
}

impl From<FfiAppointmentForm> for AppointmentForm {
    fn from(form: FfiAppointmentForm) -> Self {
        AppointmentForm {
            patient_id: form.patient_id,
            doctor_id: form.doctor_id,
            date: form.date,
            time: form.time,
            status: form.status,
            notes: form.notes,
        }
    }
}

/// FFI-safe appointment row with resolved names.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentRow {
    pub appointment_id: u32,
    pub patient_id: u32,
    pub patient_name: String,
    pub doctor_id: u32,
    pub doctor_name: String,
    pub date_time: String,
    pub status: String,
    pub notes: String,
}

impl From<AppointmentRow> for FfiAppointmentRow {
    fn from(row: AppointmentRow) -> Self {
        Self {
            appointment_id: row.appointment_id,
            patient_id: row.patient_id,
            patient_name: row.patient_name,
            doctor_id: row.doctor_id,
            doctor_name: row.doctor_name,
            date_time: row.date_time,
            status: row.status.to_string(),
            notes: row.notes,
        }
    }
}

/// FFI-safe table counts.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecordCounts {
    pub patients: u32,
    pub doctors: u32,
    pub appointments: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient_form(name: &str) -> FfiPatientForm {
        FfiPatientForm {
            name: name.into(),
            age: "44".into(),
            gender: "Other".into(),
            phone: "555-0404".into(),
            address: String::new(),
            medical_history: String::new(),
        }
    }

    fn appointment_form(patient_id: u32, doctor_id: u32) -> FfiAppointmentForm {
        FfiAppointmentForm {
            patient_id: Some(patient_id),
            doctor_id: Some(doctor_id),
            date: "2024-09-01".into(),
            time: "08:15".into(),
            status: String::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_seeded_counts() {
        let core = open_record_store(true);
        let counts = core.record_counts().unwrap();
        assert_eq!(counts.patients, 2);
        assert_eq!(counts.doctors, 3);
        assert_eq!(counts.appointments, 0);
    }

    #[test]
    fn test_add_patient_validates() {
        let core = open_record_store(false);
        let err = core.add_patient(patient_form("  ")).unwrap_err();
        assert!(matches!(err, HospitalError::Validation(ref m) if m == "Please enter patient name."));

        let patient = core.add_patient(patient_form("Quinn")).unwrap();
        assert_eq!(patient.patient_id, 1);
        assert_eq!(patient.gender, "Other");
    }

    #[test]
    fn test_update_missing_patient() {
        let core = open_record_store(true);
        let err = core.update_patient(99, patient_form("Quinn")).unwrap_err();
        assert!(matches!(err, HospitalError::NotFound(_)));
        assert_eq!(core.list_patients().unwrap().len(), 2);
    }

    #[test]
    fn test_appointment_rows_after_delete() {
        let core = open_record_store(true);
        let row = core.add_appointment(appointment_form(2, 3)).unwrap();
        assert_eq!(row.patient_name, "Bob Davis");
        assert_eq!(row.date_time, "2024-09-01 08:15");

        assert!(core.delete_doctor(3).unwrap());
        assert!(!core.delete_doctor(3).unwrap());

        let rows = core.list_appointment_rows(Some("All".into())).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].doctor_name, "Unknown");
    }

    #[test]
    fn test_status_filter_rejects_unknown() {
        let core = open_record_store(true);
        assert!(matches!(
            core.list_appointment_rows(Some("LATER".into())),
            Err(HospitalError::Validation(_))
        ));
    }

    #[test]
    fn test_export_csv_kind() {
        let core = open_record_store(true);
        let csv = core.export_csv("doctors".into()).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(core.export_csv("wards".into()).is_err());
    }
}
