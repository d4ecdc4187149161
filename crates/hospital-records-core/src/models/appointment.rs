//! Appointment models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{RecordId, UNASSIGNED_ID};

/// Display format for appointment date-times (`2024-03-15 09:30`).
pub const DATE_TIME_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Appointment status.
///
/// Transitions are not enforced: any status may be replaced by any other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// Booked, not yet seen
    #[default]
    Scheduled,
    /// Patient was seen
    Completed,
    /// Called off by either side
    Cancelled,
}

impl AppointmentStatus {
    /// All values, in form order.
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SCHEDULED" => Ok(AppointmentStatus::Scheduled),
            "COMPLETED" => Ok(AppointmentStatus::Completed),
            "CANCELLED" => Ok(AppointmentStatus::Cancelled),
            _ => Err(format!(
                "Invalid status: '{}'. Must be one of: SCHEDULED, COMPLETED, CANCELLED",
                s
            )),
        }
    }
}

/// An appointment between a patient and a doctor.
///
/// Patient and doctor are referenced by ID only; either may no longer exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Store-assigned ID (0 until added)
    pub appointment_id: RecordId,
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub scheduled_at: NaiveDateTime,
    pub status: AppointmentStatus,
    pub notes: String,
}

impl Appointment {
    /// Create an unsaved, scheduled appointment.
    pub fn new(patient_id: RecordId, doctor_id: RecordId, scheduled_at: NaiveDateTime) -> Self {
        Self {
            appointment_id: UNASSIGNED_ID,
            patient_id,
            doctor_id,
            scheduled_at,
            status: AppointmentStatus::Scheduled,
            notes: String::new(),
        }
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Date-time as shown in the appointments table.
    pub fn display_date_time(&self) -> String {
        self.scheduled_at.format(DATE_TIME_DISPLAY_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_new_appointment() {
        let appt = Appointment::new(1, 2, at(9, 30));
        assert_eq!(appt.appointment_id, UNASSIGNED_ID);
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert_eq!(appt.display_date_time(), "2024-03-15 09:30");
    }

    #[test]
    fn test_status_round_trip_text() {
        for status in AppointmentStatus::ALL {
            assert_eq!(status.as_str().parse::<AppointmentStatus>().unwrap(), status);
        }
        assert_eq!(
            "completed".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Completed
        );
        assert!("DONE".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_upper_case() {
        let json = serde_json::to_string(&AppointmentStatus::Cancelled).unwrap();
        assert_eq!(json, "\"CANCELLED\"");
    }
}
