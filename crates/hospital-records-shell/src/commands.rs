//! Shell command parsing.
//!
//! Lines are split with shell quoting rules, so `add name="Ann Lee" age=40`
//! yields two fields.

use std::path::PathBuf;

use hospital_records_core::{RecordId, RecordKind};
use strsim::jaro_winkler;
use thiserror::Error;

/// Command words, used for suggestions on typos.
pub const COMMAND_WORDS: &[&str] = &[
    "patients",
    "doctors",
    "appointments",
    "tab",
    "list",
    "show",
    "add",
    "update",
    "delete",
    "search",
    "export",
    "help",
    "clear",
    "quit",
    "exit",
];

/// Lowest similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Command parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("Could not split input: unbalanced quotes")]
    Unbalanced,

    #[error("Unknown command '{}'.{}", .command, suggestion_hint(.suggestion))]
    UnknownCommand {
        command: String,
        suggestion: Option<String>,
    },

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Not a record id: '{0}'")]
    InvalidId(String),

    #[error("Expected field=value, got '{0}'")]
    InvalidField(String),

    #[error("Unexpected argument '{argument}' for '{command}'")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },

    #[error("Unknown {kind} field '{field}'. Fields: {known}")]
    UnknownField {
        kind: RecordKind,
        field: String,
        known: String,
    },

    #[error("Invalid value for {field}: '{value}'")]
    InvalidValue { field: String, value: String },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" Did you mean '{}'?", s),
        None => " Type 'help' for a list of commands.".to_string(),
    }
}

/// Output format for exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// Whole-store snapshot with digest
    #[default]
    Json,
    /// One table
    Csv,
}

/// A `field=value` pair from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub field: String,
    pub value: String,
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Make another panel active
    SwitchPanel(RecordKind),
    /// Render the active table, with an optional status filter
    List { filter: Option<String> },
    /// Load one record into the form and print it
    Show { id: RecordId, json: bool },
    Add(Vec<FieldValue>),
    Update { id: RecordId, fields: Vec<FieldValue> },
    Delete { id: RecordId, assume_yes: bool },
    Search(String),
    Export {
        format: ExportFormat,
        path: Option<PathBuf>,
    },
    Help(Option<String>),
    Clear,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ShellError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let parts = shlex::split(trimmed).ok_or(ShellError::Unbalanced)?;
    let Some((word, args)) = parts.split_first() else {
        return Ok(None);
    };

    let command = match word.to_lowercase().as_str() {
        "patients" | "doctors" | "appointments" => {
            no_extra_args("tab", args)?;
            Command::SwitchPanel(parse_kind(word)?)
        }
        "tab" => {
            let name = args.first().ok_or(ShellError::MissingArgument {
                command: "tab",
                argument: "a panel name (patients, doctors, appointments)",
            })?;
            no_extra_args("tab", &args[1..])?;
            Command::SwitchPanel(parse_kind(name)?)
        }
        "list" | "ls" => {
            no_extra_args("list", args.get(1..).unwrap_or_default())?;
            Command::List {
                filter: args.first().cloned(),
            }
        }
        "show" => {
            let id = required_id("show", args)?;
            let mut json = false;
            for arg in &args[1..] {
                match arg.as_str() {
                    "--json" => json = true,
                    other => return Err(unexpected("show", other)),
                }
            }
            Command::Show { id, json }
        }
        "add" => Command::Add(parse_fields(args)?),
        "update" | "edit" => {
            let id = required_id("update", args)?;
            Command::Update {
                id,
                fields: parse_fields(&args[1..])?,
            }
        }
        "delete" | "rm" => {
            let id = required_id("delete", args)?;
            let mut assume_yes = false;
            for arg in &args[1..] {
                match arg.as_str() {
                    "-y" | "--yes" => assume_yes = true,
                    other => return Err(unexpected("delete", other)),
                }
            }
            Command::Delete { id, assume_yes }
        }
        "search" | "find" => {
            if args.is_empty() {
                return Err(ShellError::MissingArgument {
                    command: "search",
                    argument: "a name to look for",
                });
            }
            Command::Search(args.join(" "))
        }
        "export" => parse_export(args)?,
        "help" | "?" => Command::Help(args.first().cloned()),
        "clear" | "cls" => Command::Clear,
        "quit" | "exit" | "q" => Command::Quit,
        _ => {
            return Err(ShellError::UnknownCommand {
                command: word.clone(),
                suggestion: suggest_command(word),
            })
        }
    };

    Ok(Some(command))
}

fn parse_kind(text: &str) -> Result<RecordKind, ShellError> {
    text.parse().map_err(|_| ShellError::UnknownCommand {
        command: text.to_string(),
        suggestion: suggest_command(text),
    })
}

fn required_id(command: &'static str, args: &[String]) -> Result<RecordId, ShellError> {
    let raw = args.first().ok_or(ShellError::MissingArgument {
        command,
        argument: "a record id",
    })?;
    raw.parse::<RecordId>()
        .map_err(|_| ShellError::InvalidId(raw.clone()))
}

fn no_extra_args(command: &'static str, args: &[String]) -> Result<(), ShellError> {
    match args.first() {
        Some(arg) => Err(unexpected(command, arg)),
        None => Ok(()),
    }
}

fn unexpected(command: &'static str, argument: &str) -> ShellError {
    ShellError::UnexpectedArgument {
        command,
        argument: argument.to_string(),
    }
}

/// Split `field=value` arguments. Field names are lower-cased.
pub fn parse_fields(args: &[String]) -> Result<Vec<FieldValue>, ShellError> {
    args.iter()
        .map(|arg| {
            let (field, value) = arg
                .split_once('=')
                .ok_or_else(|| ShellError::InvalidField(arg.clone()))?;
            let field = field.trim();
            if field.is_empty() {
                return Err(ShellError::InvalidField(arg.clone()));
            }
            Ok(FieldValue {
                field: field.to_lowercase(),
                value: value.to_string(),
            })
        })
        .collect()
}

fn parse_export(args: &[String]) -> Result<Command, ShellError> {
    let mut format = ExportFormat::default();
    let mut path = None;

    for arg in args {
        match arg.to_lowercase().as_str() {
            "json" => format = ExportFormat::Json,
            "csv" => format = ExportFormat::Csv,
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => return Err(unexpected("export", arg)),
        }
    }

    Ok(Command::Export { format, path })
}

/// Closest known command word, if any is close enough.
pub fn suggest_command(input: &str) -> Option<String> {
    let input = input.to_lowercase();
    COMMAND_WORDS
        .iter()
        .map(|word| (*word, jaro_winkler(&input, word)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(word, _)| word.to_string())
}
