//! Panel actions: the shell counterpart of the patient, doctor and
//! appointment tabs.
//!
//! Every action takes the store explicitly and returns the text to print.
//! Mutations fill a form from `field=value` pairs, validate it and only then
//! touch the store.

use std::fs;
use std::path::{Path, PathBuf};

use hospital_records_core::export::{export_csv, ExportError};
use hospital_records_core::forms::{AppointmentForm, DoctorForm, PatientForm, ValidationError};
use hospital_records_core::models::RecordId;
use hospital_records_core::search::hit_ids;
use hospital_records_core::store::{RecordKind, RecordStore, StoreError};
use hospital_records_core::views::{
    appointment_table, doctor_label, parse_status_filter, patient_label, table_for, TableView,
};
use hospital_records_core::RecordSnapshot;
use thiserror::Error;
use tracing::{info, warn};

use crate::commands::{ExportFormat, FieldValue, ShellError};

/// Most hits a search prints.
pub const SEARCH_LIMIT: usize = 20;

const PATIENT_FIELD_NAMES: &str = "name, age, gender, phone, address, history";
const DOCTOR_FIELD_NAMES: &str = "name, specialization, phone, email, schedule, fee";
const APPOINTMENT_FIELD_NAMES: &str = "patient, doctor, date, time, status, notes";

/// Errors from a panel action. `Display` is what the user sees.
#[derive(Error, Debug)]
pub enum PanelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Input(#[from] ShellError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No {kind} with id {id}.")]
    Missing { kind: RecordKind, id: RecordId },

    #[error("{0}")]
    InvalidFilter(String),

    #[error("The {} panel has no {}.", .kind.plural(), .action)]
    Unsupported {
        kind: RecordKind,
        action: &'static str,
    },

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Could not write {}: {}", .path.display(), .error)]
    Io { path: PathBuf, error: std::io::Error },
}

pub type PanelResult<T> = Result<T, PanelError>;

// =========================================================================
// Field application
// =========================================================================

fn unknown_field(kind: RecordKind, field: &str, known: &str) -> ShellError {
    ShellError::UnknownField {
        kind,
        field: field.to_string(),
        known: known.to_string(),
    }
}

/// Copy field values into a patient form.
pub fn apply_patient_fields(form: &mut PatientForm, fields: &[FieldValue]) -> Result<(), ShellError> {
    for FieldValue { field, value } in fields {
        let slot = match field.as_str() {
            "name" => &mut form.name,
            "age" => &mut form.age,
            "gender" => &mut form.gender,
            "phone" => &mut form.phone,
            "address" => &mut form.address,
            "history" | "medical_history" => &mut form.medical_history,
            other => return Err(unknown_field(RecordKind::Patient, other, PATIENT_FIELD_NAMES)),
        };
        *slot = value.clone();
    }
    Ok(())
}

/// Copy field values into a doctor form.
pub fn apply_doctor_fields(form: &mut DoctorForm, fields: &[FieldValue]) -> Result<(), ShellError> {
    for FieldValue { field, value } in fields {
        let slot = match field.as_str() {
            "name" => &mut form.name,
            "specialization" | "spec" => &mut form.specialization,
            "phone" => &mut form.phone,
            "email" => &mut form.email,
            "schedule" => &mut form.schedule,
            "fee" | "consultation_fee" => &mut form.consultation_fee,
            other => return Err(unknown_field(RecordKind::Doctor, other, DOCTOR_FIELD_NAMES)),
        };
        *slot = value.clone();
    }
    Ok(())
}

/// Copy field values into an appointment form. An empty `patient` or
/// `doctor` clears the selection.
pub fn apply_appointment_fields(
    form: &mut AppointmentForm,
    fields: &[FieldValue],
) -> Result<(), ShellError> {
    for FieldValue { field, value } in fields {
        match field.as_str() {
            "patient" | "patient_id" => form.patient_id = parse_selection(field, value)?,
            "doctor" | "doctor_id" => form.doctor_id = parse_selection(field, value)?,
            "date" => form.date = value.clone(),
            "time" => form.time = value.clone(),
            "status" => form.status = value.clone(),
            "notes" => form.notes = value.clone(),
            other => {
                return Err(unknown_field(
                    RecordKind::Appointment,
                    other,
                    APPOINTMENT_FIELD_NAMES,
                ))
            }
        }
    }
    Ok(())
}

fn parse_selection(field: &str, value: &str) -> Result<Option<RecordId>, ShellError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| ShellError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
}

// =========================================================================
// Actions
// =========================================================================

/// Render the panel's table. Only appointments take a status filter.
pub fn list(store: &RecordStore, kind: RecordKind, filter: Option<&str>) -> PanelResult<String> {
    match (kind, filter) {
        (RecordKind::Appointment, Some(text)) => {
            let status = parse_status_filter(text).map_err(PanelError::InvalidFilter)?;
            Ok(appointment_table(store, status).render())
        }
        (_, Some(_)) => Err(PanelError::Unsupported {
            kind,
            action: "status filter",
        }),
        (_, None) => Ok(table_for(store, kind).render()),
    }
}

/// Validate the fields and add a new record.
pub fn add(store: &mut RecordStore, kind: RecordKind, fields: &[FieldValue]) -> PanelResult<String> {
    let id = match kind {
        RecordKind::Patient => {
            let mut form = PatientForm::default();
            apply_patient_fields(&mut form, fields)?;
            store.add_patient(form.validate()?)?.patient_id
        }
        RecordKind::Doctor => {
            let mut form = DoctorForm::default();
            apply_doctor_fields(&mut form, fields)?;
            store.add_doctor(form.validate()?)?.doctor_id
        }
        RecordKind::Appointment => {
            let mut form = AppointmentForm::default();
            apply_appointment_fields(&mut form, fields)?;
            store.add_appointment(form.validate()?)?.appointment_id
        }
    };
    info!(%kind, id, "added from shell");
    Ok(with_table(store, kind, format!("{} added successfully!", kind.title())))
}

/// Pre-fill a form from the stored record, apply the fields, validate and
/// replace the record.
pub fn update(
    store: &mut RecordStore,
    kind: RecordKind,
    id: RecordId,
    fields: &[FieldValue],
) -> PanelResult<String> {
    let missing = || PanelError::Missing { kind, id };
    match kind {
        RecordKind::Patient => {
            let mut form = PatientForm::from(store.get_patient(id).ok_or_else(missing)?);
            apply_patient_fields(&mut form, fields)?;
            let mut patient = form.validate()?;
            patient.patient_id = id;
            store.update_patient(patient)?;
        }
        RecordKind::Doctor => {
            let mut form = DoctorForm::from(store.get_doctor(id).ok_or_else(missing)?);
            apply_doctor_fields(&mut form, fields)?;
            let mut doctor = form.validate()?;
            doctor.doctor_id = id;
            store.update_doctor(doctor)?;
        }
        RecordKind::Appointment => {
            let mut form = AppointmentForm::from(store.get_appointment(id).ok_or_else(missing)?);
            apply_appointment_fields(&mut form, fields)?;
            let mut appointment = form.validate()?;
            appointment.appointment_id = id;
            store.update_appointment(appointment)?;
        }
    }
    info!(%kind, id, "updated from shell");
    Ok(with_table(store, kind, format!("{} updated successfully!", kind.title())))
}

/// Question asked before a delete.
pub fn delete_prompt(kind: RecordKind) -> String {
    format!("Are you sure you want to delete this {}?", kind)
}

/// Fail early if the record to delete does not exist.
pub fn ensure_exists(store: &RecordStore, kind: RecordKind, id: RecordId) -> PanelResult<()> {
    let exists = match kind {
        RecordKind::Patient => store.patients().contains(id),
        RecordKind::Doctor => store.doctors().contains(id),
        RecordKind::Appointment => store.appointments().contains(id),
    };
    if exists {
        Ok(())
    } else {
        Err(PanelError::Missing { kind, id })
    }
}

/// Delete a record. Appointments that referenced a deleted patient or
/// doctor are kept and reported.
pub fn delete(store: &mut RecordStore, kind: RecordKind, id: RecordId) -> PanelResult<String> {
    let removed = match kind {
        RecordKind::Patient => store.delete_patient(id).is_some(),
        RecordKind::Doctor => store.delete_doctor(id).is_some(),
        RecordKind::Appointment => store.delete_appointment(id).is_some(),
    };
    if !removed {
        return Err(PanelError::Missing { kind, id });
    }

    let orphaned = match kind {
        RecordKind::Patient => store.appointments_for_patient(id).len(),
        RecordKind::Doctor => store.appointments_for_doctor(id).len(),
        RecordKind::Appointment => 0,
    };
    if orphaned > 0 {
        warn!(%kind, id, orphaned, "deleted record is still referenced by appointments");
    }

    Ok(with_table(store, kind, format!("{} deleted successfully!", kind.title())))
}

/// Print one record as its filled-in form, or as JSON.
pub fn show(store: &RecordStore, kind: RecordKind, id: RecordId, json: bool) -> PanelResult<String> {
    let missing = || PanelError::Missing { kind, id };
    let text = match (kind, json) {
        (RecordKind::Patient, true) => to_json(store.get_patient(id).ok_or_else(missing)?)?,
        (RecordKind::Doctor, true) => to_json(store.get_doctor(id).ok_or_else(missing)?)?,
        (RecordKind::Appointment, true) => to_json(store.get_appointment(id).ok_or_else(missing)?)?,
        (RecordKind::Patient, false) => {
            let form = PatientForm::from(store.get_patient(id).ok_or_else(missing)?);
            form_lines(&[
                ("Name", &form.name),
                ("Age", &form.age),
                ("Gender", &form.gender),
                ("Phone", &form.phone),
                ("Address", &form.address),
                ("Medical History", &form.medical_history),
            ])
        }
        (RecordKind::Doctor, false) => {
            let form = DoctorForm::from(store.get_doctor(id).ok_or_else(missing)?);
            form_lines(&[
                ("Name", &form.name),
                ("Specialization", &form.specialization),
                ("Phone", &form.phone),
                ("Email", &form.email),
                ("Schedule", &form.schedule),
                ("Consultation Fee", &form.consultation_fee),
            ])
        }
        (RecordKind::Appointment, false) => {
            let appointment = store.get_appointment(id).ok_or_else(missing)?;
            let form = AppointmentForm::from(appointment);
            let patient = selection_label(
                appointment.patient_id,
                patient_label(store, appointment.patient_id),
            );
            let doctor = selection_label(
                appointment.doctor_id,
                doctor_label(store, appointment.doctor_id),
            );
            form_lines(&[
                ("Patient", &patient),
                ("Doctor", &doctor),
                ("Date", &form.date),
                ("Time", &form.time),
                ("Status", &form.status),
                ("Notes", &form.notes),
            ])
        }
    };
    Ok(text)
}

fn selection_label(id: RecordId, name: String) -> String {
    format!("{} - {}", id, name)
}

fn to_json<T: serde::Serialize>(record: &T) -> PanelResult<String> {
    serde_json::to_string_pretty(record).map_err(|e| PanelError::Export(ExportError::from(e)))
}

fn form_lines(fields: &[(&str, &String)]) -> String {
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    fields
        .iter()
        .map(|(label, value)| format!("{:<width$} {}", format!("{}:", label), value, width = width + 1))
        .map(|line| line.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Search the panel's records by name and render the hits as a table.
pub fn search(store: &RecordStore, kind: RecordKind, query: &str) -> PanelResult<String> {
    let ids: Vec<RecordId> = match kind {
        RecordKind::Patient => hit_ids(&store.search_patients(query, SEARCH_LIMIT)),
        RecordKind::Doctor => hit_ids(&store.search_doctors(query, SEARCH_LIMIT)),
        RecordKind::Appointment => {
            return Err(PanelError::Unsupported {
                kind,
                action: "name search",
            })
        }
    };

    let full = table_for(store, kind);
    let mut view = TableView {
        rows: Vec::with_capacity(ids.len()),
        ..full.clone()
    };
    for id in ids {
        let key = id.to_string();
        if let Some(row) = full.rows.iter().find(|row| row.first() == Some(&key)) {
            view.rows.push(row.clone());
        }
    }
    Ok(view.render())
}

/// Export the whole store as a JSON snapshot, or the panel's table as CSV.
/// With a path the output is written there, otherwise it is returned.
pub fn export(
    store: &RecordStore,
    kind: RecordKind,
    format: ExportFormat,
    path: Option<&Path>,
) -> PanelResult<String> {
    let content = match format {
        ExportFormat::Json => RecordSnapshot::capture(store)?.to_json()?,
        ExportFormat::Csv => export_csv(store, kind),
    };

    match path {
        Some(path) => {
            fs::write(path, &content).map_err(|error| PanelError::Io {
                path: path.to_path_buf(),
                error,
            })?;
            info!(path = %path.display(), bytes = content.len(), "export written");
            Ok(format!("Exported to {}", path.display()))
        }
        None => Ok(content),
    }
}

fn with_table(store: &RecordStore, kind: RecordKind, message: String) -> String {
    format!("{}\n{}", message, table_for(store, kind).render())
}
