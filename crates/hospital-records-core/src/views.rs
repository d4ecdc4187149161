//! Table views for the patient, doctor and appointment panels.
//!
//! Views are built from a store snapshot every time they are shown. The
//! appointment view resolves patient and doctor names and falls back to
//! [`UNKNOWN_LABEL`] when a reference no longer resolves.

use serde::{Deserialize, Serialize};

use crate::models::{Appointment, AppointmentStatus, RecordId};
use crate::store::{RecordKind, RecordStore};

/// Placeholder for a patient or doctor that no longer exists.
pub const UNKNOWN_LABEL: &str = "Unknown";

pub const PATIENT_COLUMNS: [&str; 6] = ["ID", "Name", "Age", "Gender", "Phone", "Address"];
pub const DOCTOR_COLUMNS: [&str; 6] = ["ID", "Name", "Specialization", "Phone", "Email", "Fee"];
pub const APPOINTMENT_COLUMNS: [&str; 5] = ["ID", "Patient", "Doctor", "Date & Time", "Status"];

/// A rendered table: headers plus display-ready cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub kind: RecordKind,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    fn new(kind: RecordKind, headers: &[&str]) -> Self {
        Self {
            kind,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as left-aligned plain-text columns.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        if self.rows.is_empty() {
            out.push_str(&format!("(no {})\n", self.kind.plural()));
        }
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// An appointment with its references resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRow {
    pub appointment_id: RecordId,
    pub patient_id: RecordId,
    pub patient_name: String,
    pub doctor_id: RecordId,
    pub doctor_name: String,
    pub date_time: String,
    pub status: AppointmentStatus,
    pub notes: String,
}

/// Resolve appointments for display, optionally keeping only one status.
pub fn appointment_rows(store: &RecordStore, filter: Option<AppointmentStatus>) -> Vec<AppointmentRow> {
    store
        .appointments_with_status(filter)
        .iter()
        .map(|appt| appointment_row(store, appt))
        .collect()
}

/// Resolve a single appointment for display.
pub fn appointment_row(store: &RecordStore, appt: &Appointment) -> AppointmentRow {
    AppointmentRow {
        appointment_id: appt.appointment_id,
        patient_id: appt.patient_id,
        patient_name: patient_label(store, appt.patient_id),
        doctor_id: appt.doctor_id,
        doctor_name: doctor_label(store, appt.doctor_id),
        date_time: appt.display_date_time(),
        status: appt.status,
        notes: appt.notes.clone(),
    }
}

/// Patient name, or the placeholder if the ID does not resolve.
pub fn patient_label(store: &RecordStore, patient_id: RecordId) -> String {
    store
        .get_patient(patient_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

/// Doctor name, or the placeholder if the ID does not resolve.
pub fn doctor_label(store: &RecordStore, doctor_id: RecordId) -> String {
    store
        .get_doctor(doctor_id)
        .map(|d| d.name.clone())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

pub fn patient_table(store: &RecordStore) -> TableView {
    let mut view = TableView::new(RecordKind::Patient, &PATIENT_COLUMNS);
    view.rows = store
        .patients()
        .iter()
        .map(|p| {
            vec![
                p.patient_id.to_string(),
                p.name.clone(),
                p.age.to_string(),
                p.gender.to_string(),
                p.phone.clone(),
                p.address.clone(),
            ]
        })
        .collect();
    view
}

pub fn doctor_table(store: &RecordStore) -> TableView {
    let mut view = TableView::new(RecordKind::Doctor, &DOCTOR_COLUMNS);
    view.rows = store
        .doctors()
        .iter()
        .map(|d| {
            vec![
                d.doctor_id.to_string(),
                d.name.clone(),
                d.specialization.clone(),
                d.phone.clone(),
                d.email.clone(),
                d.display_fee(),
            ]
        })
        .collect();
    view
}

pub fn appointment_table(store: &RecordStore, filter: Option<AppointmentStatus>) -> TableView {
    let mut view = TableView::new(RecordKind::Appointment, &APPOINTMENT_COLUMNS);
    view.rows = appointment_rows(store, filter)
        .into_iter()
        .map(|row| {
            vec![
                row.appointment_id.to_string(),
                row.patient_name,
                row.doctor_name,
                row.date_time,
                row.status.to_string(),
            ]
        })
        .collect();
    view
}

/// Table for any kind. Appointments are unfiltered.
pub fn table_for(store: &RecordStore, kind: RecordKind) -> TableView {
    match kind {
        RecordKind::Patient => patient_table(store),
        RecordKind::Doctor => doctor_table(store),
        RecordKind::Appointment => appointment_table(store, None),
    }
}

/// Parse a status filter choice: "All" (or empty) or one status.
pub fn parse_status_filter(text: &str) -> Result<Option<AppointmentStatus>, String> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    text.parse().map(Some)
}
