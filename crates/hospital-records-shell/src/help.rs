//! Help text for the interactive shell.

pub const BANNER: &str = "Hospital Management System. Type 'help' for commands, 'quit' to leave.";

/// Overview shown by a bare `help`.
pub const OVERVIEW: &str = r#"Panels:
  patients | doctors | appointments   switch panel (also: tab <name>)

Records (on the active panel):
  list [STATUS]                 show the table; appointments accept All, SCHEDULED, COMPLETED, CANCELLED
  show <id> [--json]            print one record
  add field=value ...           add a record
  update <id> field=value ...   change fields of a record
  delete <id> [-y]              delete a record (asks first unless -y)
  search <name>                 find patients or doctors by name

Other:
  export [json|csv] [FILE]      json: whole store snapshot, csv: active table
  help [panel]                  list the fields of a panel
  clear                         clear the screen
  quit | exit                   leave

Quote values with spaces: add name="Ann Lee" age=40"#;

pub const PATIENT_FIELDS: &str = r#"Patient fields:
  name              required
  age               required, 1-150
  gender            Male, Female or Other (default Male)
  phone             required
  address
  history           medical history (also: medical_history)"#;

pub const DOCTOR_FIELDS: &str = r#"Doctor fields:
  name              required
  specialization    required (also: spec)
  phone             required
  email
  schedule
  fee               consultation fee, a number (also: consultation_fee)"#;

pub const APPOINTMENT_FIELDS: &str = r#"Appointment fields:
  patient           patient id, required
  doctor            doctor id, required
  date              YYYY-MM-DD, required
  time              HH:MM, required
  status            SCHEDULED, COMPLETED or CANCELLED (default SCHEDULED)
  notes"#;

/// Help for `help <topic>`. Unknown topics fall back to the overview.
pub fn help_text(topic: Option<&str>) -> &'static str {
    let topic = topic.map(|t| t.trim().to_lowercase());
    match topic.as_deref() {
        Some("patient" | "patients") => PATIENT_FIELDS,
        Some("doctor" | "doctors") => DOCTOR_FIELDS,
        Some("appointment" | "appointments") => APPOINTMENT_FIELDS,
        _ => OVERVIEW,
    }
}
