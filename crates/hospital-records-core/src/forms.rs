//! Form input and validation.
//!
//! Forms hold field text exactly as the user typed it. `validate` trims it,
//! checks the rules in a fixed order and either builds an unsaved entity or
//! returns the first failure. The store never sees invalid input.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::models::{Appointment, AppointmentStatus, Doctor, Gender, Patient, RecordId, UNASSIGNED_ID};

/// Date entry format (`2024-03-15`).
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
/// Time entry format (`09:30`).
pub const TIME_INPUT_FORMAT: &str = "%H:%M";

/// Oldest age the patient form accepts.
pub const MAX_PATIENT_AGE: i32 = 150;

/// Validation failures. `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter patient name.")]
    MissingPatientName,

    #[error("Please enter a valid age.")]
    InvalidAge,

    #[error("Please enter a valid age (1-150).")]
    AgeOutOfRange,

    #[error("Please enter phone number.")]
    MissingPhone,

    #[error("Please select a gender (Male, Female, Other).")]
    InvalidGender,

    #[error("Please enter doctor name.")]
    MissingDoctorName,

    #[error("Please enter specialization.")]
    MissingSpecialization,

    #[error("Please enter a valid consultation fee.")]
    InvalidFee,

    #[error("Please select a patient.")]
    MissingPatient,

    #[error("Please select a doctor.")]
    MissingDoctor,

    #[error("Please enter valid date (YYYY-MM-DD) and time (HH:MM).")]
    InvalidDateTime,

    #[error("Please select a valid status (SCHEDULED, COMPLETED, CANCELLED).")]
    InvalidStatus,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Patient registration form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientForm {
    pub name: String,
    pub age: String,
    /// Empty selects the first option (Male)
    pub gender: String,
    pub phone: String,
    pub address: String,
    pub medical_history: String,
}

impl PatientForm {
    /// Validate and build an unsaved patient.
    pub fn validate(&self) -> ValidationResult<Patient> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingPatientName);
        }

        let age: i32 = self
            .age
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidAge)?;
        if age <= 0 || age > MAX_PATIENT_AGE {
            return Err(ValidationError::AgeOutOfRange);
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(ValidationError::MissingPhone);
        }

        let gender = match self.gender.trim() {
            "" => Gender::default(),
            text => text.parse().map_err(|_| ValidationError::InvalidGender)?,
        };

        Ok(Patient {
            patient_id: UNASSIGNED_ID,
            name: name.to_string(),
            // Range checked above
            age: age as u8,
            gender,
            phone: phone.to_string(),
            address: self.address.trim().to_string(),
            medical_history: self.medical_history.trim().to_string(),
        })
    }
}

impl From<&Patient> for PatientForm {
    fn from(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            age: patient.age.to_string(),
            gender: patient.gender.to_string(),
            phone: patient.phone.clone(),
            address: patient.address.clone(),
            medical_history: patient.medical_history.clone(),
        }
    }
}

/// Doctor registration form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorForm {
    pub name: String,
    pub specialization: String,
    pub phone: String,
    pub email: String,
    pub schedule: String,
    pub consultation_fee: String,
}

impl DoctorForm {
    /// Validate and build an unsaved doctor.
    pub fn validate(&self) -> ValidationResult<Doctor> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingDoctorName);
        }

        let specialization = self.specialization.trim();
        if specialization.is_empty() {
            return Err(ValidationError::MissingSpecialization);
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(ValidationError::MissingPhone);
        }

        let fee: f64 = self
            .consultation_fee
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidFee)?;
        if !fee.is_finite() || fee < 0.0 {
            return Err(ValidationError::InvalidFee);
        }

        Ok(Doctor {
            doctor_id: UNASSIGNED_ID,
            name: name.to_string(),
            specialization: specialization.to_string(),
            phone: phone.to_string(),
            email: self.email.trim().to_string(),
            schedule: self.schedule.trim().to_string(),
            consultation_fee: fee,
        })
    }
}

impl From<&Doctor> for DoctorForm {
    fn from(doctor: &Doctor) -> Self {
        Self {
            name: doctor.name.clone(),
            specialization: doctor.specialization.clone(),
            phone: doctor.phone.clone(),
            email: doctor.email.clone(),
            schedule: doctor.schedule.clone(),
            consultation_fee: doctor.consultation_fee.to_string(),
        }
    }
}

/// Appointment booking form.
///
/// Patient and doctor selections are required but are not looked up: any ID
/// is accepted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentForm {
    pub patient_id: Option<RecordId>,
    pub doctor_id: Option<RecordId>,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    /// Empty selects SCHEDULED
    pub status: String,
    pub notes: String,
}

impl AppointmentForm {
    /// Validate and build an unsaved appointment.
    pub fn validate(&self) -> ValidationResult<Appointment> {
        let patient_id = self.patient_id.ok_or(ValidationError::MissingPatient)?;
        let doctor_id = self.doctor_id.ok_or(ValidationError::MissingDoctor)?;
        let scheduled_at = parse_date_time(&self.date, &self.time)?;

        let status = match self.status.trim() {
            "" => AppointmentStatus::default(),
            text => text.parse().map_err(|_| ValidationError::InvalidStatus)?,
        };

        Ok(Appointment {
            appointment_id: UNASSIGNED_ID,
            patient_id,
            doctor_id,
            scheduled_at,
            status,
            notes: self.notes.trim().to_string(),
        })
    }
}

impl From<&Appointment> for AppointmentForm {
    fn from(appointment: &Appointment) -> Self {
        Self {
            patient_id: Some(appointment.patient_id),
            doctor_id: Some(appointment.doctor_id),
            date: appointment.scheduled_at.format(DATE_INPUT_FORMAT).to_string(),
            time: appointment.scheduled_at.format(TIME_INPUT_FORMAT).to_string(),
            status: appointment.status.to_string(),
            notes: appointment.notes.clone(),
        }
    }
}

/// Combine separately entered date and time fields.
///
/// Both fields must be zero-padded: `2024-3-5` and `9:5` are rejected.
pub fn parse_date_time(date: &str, time: &str) -> ValidationResult<NaiveDateTime> {
    let (date, time) = (date.trim(), time.trim());
    let parsed_date = NaiveDate::parse_from_str(date, DATE_INPUT_FORMAT)
        .map_err(|_| ValidationError::InvalidDateTime)?;
    let parsed_time = NaiveTime::parse_from_str(time, TIME_INPUT_FORMAT)
        .map_err(|_| ValidationError::InvalidDateTime)?;

    // Reject unpadded fields that chrono would accept
    if parsed_date.format(DATE_INPUT_FORMAT).to_string() != date
        || parsed_time.format(TIME_INPUT_FORMAT).to_string() != time
    {
        return Err(ValidationError::InvalidDateTime);
    }
    Ok(parsed_date.and_time(parsed_time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient_form() -> PatientForm {
        PatientForm {
            name: "  Dana Reyes ".into(),
            age: "29".into(),
            gender: "female".into(),
            phone: "555-0133".into(),
            address: "7 Pine Rd".into(),
            medical_history: " Asthma ".into(),
        }
    }

    fn doctor_form() -> DoctorForm {
        DoctorForm {
            name: "Dr. Lee".into(),
            specialization: "Neurology".into(),
            phone: "555-2000".into(),
            email: "lee@hospital.com".into(),
            schedule: "Mon-Fri".into(),
            consultation_fee: "175.5".into(),
        }
    }

    fn appointment_form() -> AppointmentForm {
        AppointmentForm {
            patient_id: Some(1),
            doctor_id: Some(2),
            date: "2024-03-15".into(),
            time: "09:30".into(),
            status: String::new(),
            notes: "Follow-up".into(),
        }
    }

    #[test]
    fn test_valid_patient_trims_fields() {
        let patient = patient_form().validate().unwrap();
        assert_eq!(patient.patient_id, UNASSIGNED_ID);
        assert_eq!(patient.name, "Dana Reyes");
        assert_eq!(patient.age, 29);
        assert_eq!(patient.gender, Gender::Female);
        assert_eq!(patient.medical_history, "Asthma");
    }

    #[test]
    fn test_patient_rules_in_order() {
        let form = PatientForm {
            name: "   ".into(),
            age: "abc".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingPatientName));

        let mut form = patient_form();
        form.age = "abc".into();
        form.phone = String::new();
        assert_eq!(form.validate(), Err(ValidationError::InvalidAge));

        form.age = "0".into();
        assert_eq!(form.validate(), Err(ValidationError::AgeOutOfRange));
        form.age = "151".into();
        assert_eq!(form.validate(), Err(ValidationError::AgeOutOfRange));
        form.age = "150".into();
        assert_eq!(form.validate(), Err(ValidationError::MissingPhone));
    }

    #[test]
    fn test_patient_age_bounds() {
        let mut form = patient_form();
        form.age = "1".into();
        assert_eq!(form.validate().unwrap().age, 1);
        form.age = "-5".into();
        assert_eq!(form.validate(), Err(ValidationError::AgeOutOfRange));
        form.age = "12.5".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidAge));
    }

    #[test]
    fn test_patient_gender_defaults_and_rejects() {
        let mut form = patient_form();
        form.gender = String::new();
        assert_eq!(form.validate().unwrap().gender, Gender::Male);

        form.gender = "robot".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidGender));
    }

    #[test]
    fn test_patient_form_prefill() {
        let patient = patient_form().validate().unwrap();
        let form = PatientForm::from(&patient);
        assert_eq!(form.age, "29");
        assert_eq!(form.gender, "Female");
        assert_eq!(form.validate().unwrap(), patient);
    }

    #[test]
    fn test_valid_doctor() {
        let doctor = doctor_form().validate().unwrap();
        assert_eq!(doctor.consultation_fee, 175.5);
        assert_eq!(doctor.specialization, "Neurology");
    }

    #[test]
    fn test_doctor_rules_in_order() {
        let mut form = doctor_form();
        form.specialization = " ".into();
        form.phone = String::new();
        assert_eq!(form.validate(), Err(ValidationError::MissingSpecialization));

        form.specialization = "Neurology".into();
        assert_eq!(form.validate(), Err(ValidationError::MissingPhone));

        form.phone = "555".into();
        for bad in ["", "free", "-0.01", "NaN", "inf"] {
            form.consultation_fee = bad.into();
            assert_eq!(form.validate(), Err(ValidationError::InvalidFee), "fee {:?}", bad);
        }

        form.consultation_fee = "0".into();
        assert_eq!(form.validate().unwrap().consultation_fee, 0.0);
    }

    #[test]
    fn test_doctor_form_prefill() {
        let doctor = doctor_form().validate().unwrap();
        let form = DoctorForm::from(&doctor);
        assert_eq!(form.consultation_fee, "175.5");
        assert_eq!(form.validate().unwrap(), doctor);
    }

    #[test]
    fn test_valid_appointment() {
        let appt = appointment_form().validate().unwrap();
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert_eq!(appt.display_date_time(), "2024-03-15 09:30");
        assert_eq!(appt.notes, "Follow-up");
    }

    #[test]
    fn test_appointment_selection_required() {
        let mut form = appointment_form();
        form.patient_id = None;
        form.doctor_id = None;
        assert_eq!(form.validate(), Err(ValidationError::MissingPatient));

        form.patient_id = Some(1);
        assert_eq!(form.validate(), Err(ValidationError::MissingDoctor));
    }

    #[test]
    fn test_appointment_unknown_ids_still_valid() {
        let mut form = appointment_form();
        form.patient_id = Some(404);
        form.doctor_id = Some(405);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_appointment_date_time_rules() {
        let mut form = appointment_form();
        form.date = "15/03/2024".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidDateTime));

        form.date = "2024-02-30".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidDateTime));

        form.date = "2024-02-29".into();
        form.time = "25:00".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidDateTime));

        form.time = "23:59".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_appointment_date_time_must_be_padded() {
        let mut form = appointment_form();
        form.date = "2024-3-5".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidDateTime));

        form.date = "2024-03-05".into();
        form.time = "9:5".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidDateTime));

        form.time = "9:05".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidDateTime));

        form.time = " 09:05 ".into();
        let appointment = form.validate().unwrap();
        assert_eq!(appointment.display_date_time(), "2024-03-05 09:05");
    }

    #[test]
    fn test_appointment_status() {
        let mut form = appointment_form();
        form.status = "cancelled".into();
        assert_eq!(form.validate().unwrap().status, AppointmentStatus::Cancelled);

        form.status = "PENDING".into();
        assert_eq!(form.validate(), Err(ValidationError::InvalidStatus));
    }

    #[test]
    fn test_appointment_form_prefill() {
        let appt = appointment_form().validate().unwrap();
        let form = AppointmentForm::from(&appt);
        assert_eq!(form.date, "2024-03-15");
        assert_eq!(form.time, "09:30");
        assert_eq!(form.status, "SCHEDULED");
        assert_eq!(form.validate().unwrap(), appt);
    }
}
