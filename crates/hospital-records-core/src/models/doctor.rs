//! Doctor models.

use serde::{Deserialize, Serialize};

use super::{RecordId, UNASSIGNED_ID};

/// A doctor available for appointments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    /// Store-assigned ID (0 until added)
    pub doctor_id: RecordId,
    pub name: String,
    /// Specialization (e.g., "Cardiology", "Pediatrics")
    pub specialization: String,
    pub phone: String,
    pub email: String,
    /// Free-text working hours (e.g., "Mon-Fri 9AM-5PM")
    pub schedule: String,
    /// Consultation fee, never negative
    pub consultation_fee: f64,
}

impl Doctor {
    /// Create an unsaved doctor with required fields.
    pub fn new(
        name: impl Into<String>,
        specialization: impl Into<String>,
        phone: impl Into<String>,
        consultation_fee: f64,
    ) -> Self {
        Self {
            doctor_id: UNASSIGNED_ID,
            name: name.into(),
            specialization: specialization.into(),
            phone: phone.into(),
            email: String::new(),
            schedule: String::new(),
            consultation_fee,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = schedule.into();
        self
    }

    /// Fee as shown in the doctors table.
    pub fn display_fee(&self) -> String {
        format!("${:.2}", self.consultation_fee)
    }
}
