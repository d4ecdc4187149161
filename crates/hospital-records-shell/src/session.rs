//! A shell session: the store, the active panel and command dispatch.

use std::fs;
use std::path::Path;

use anyhow::Context;
use hospital_records_core::{RecordKind, RecordStore};
use tracing::{debug, warn};

use crate::commands::{parse_command, Command};
use crate::help::help_text;
use crate::panels::{self, PanelError};

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Accepts every confirmation. Used for scripts and `--yes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _question: &str) -> bool {
        true
    }
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text
    Message(String),
    /// Clear the screen
    Clear,
    /// End the session
    Quit,
}

/// Error from a script line, with its 1-based line number. The panel error
/// is part of the message rather than a separate cause.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {error}")]
pub struct ScriptError {
    pub line: usize,
    pub error: PanelError,
}

/// Interactive session state.
#[derive(Debug, Clone)]
pub struct Session {
    store: RecordStore,
    panel: RecordKind,
    assume_yes: bool,
}

impl Session {
    /// Start on the patients panel.
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            panel: RecordKind::Patient,
            assume_yes: false,
        }
    }

    /// Skip delete confirmations.
    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn panel(&self) -> RecordKind {
        self.panel
    }

    /// Prompt text for the line editor.
    pub fn prompt(&self) -> String {
        format!("{}> ", self.panel.plural())
    }

    /// Parse and run one line. `Ok(None)` for blank lines and comments.
    pub fn execute_line(
        &mut self,
        line: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<Option<Outcome>, PanelError> {
        match parse_command(line)? {
            Some(command) => self.execute(command, confirm).map(Some),
            None => Ok(None),
        }
    }

    /// Run a parsed command against the active panel.
    pub fn execute(&mut self, command: Command, confirm: &mut dyn Confirm) -> Result<Outcome, PanelError> {
        debug!(panel = %self.panel, ?command, "executing");
        let kind = self.panel;
        let text = match command {
            Command::SwitchPanel(panel) => {
                self.panel = panel;
                panels::list(&self.store, panel, None)?
            }
            Command::List { filter } => panels::list(&self.store, kind, filter.as_deref())?,
            Command::Show { id, json } => panels::show(&self.store, kind, id, json)?,
            Command::Add(fields) => panels::add(&mut self.store, kind, &fields)?,
            Command::Update { id, fields } => panels::update(&mut self.store, kind, id, &fields)?,
            Command::Delete { id, assume_yes } => {
                panels::ensure_exists(&self.store, kind, id)?;
                let confirmed =
                    assume_yes || self.assume_yes || confirm.confirm(&panels::delete_prompt(kind));
                if !confirmed {
                    return Ok(Outcome::Message("Delete cancelled.".to_string()));
                }
                panels::delete(&mut self.store, kind, id)?
            }
            Command::Search(query) => panels::search(&self.store, kind, &query)?,
            Command::Export { format, path } => {
                panels::export(&self.store, kind, format, path.as_deref())?
            }
            Command::Help(topic) => help_text(topic.as_deref()).to_string(),
            Command::Clear => return Ok(Outcome::Clear),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Message(text))
    }

    /// Run every line of a script, stopping at the first failure or `quit`.
    /// Confirmations are accepted. Each message is handed to `emit` as soon
    /// as its line has run, so output from earlier lines survives a failure.
    pub fn run_script(
        &mut self,
        script: &str,
        mut emit: impl FnMut(String),
    ) -> Result<(), ScriptError> {
        for (index, line) in script.lines().enumerate() {
            let outcome = self
                .execute_line(line, &mut AlwaysConfirm)
                .map_err(|error| {
                    warn!(line = index + 1, %error, "script stopped");
                    ScriptError {
                        line: index + 1,
                        error,
                    }
                })?;
            match outcome {
                Some(Outcome::Message(text)) => emit(text),
                Some(Outcome::Quit) => break,
                Some(Outcome::Clear) | None => {}
            }
        }
        Ok(())
    }

    /// Read and run a script file.
    pub fn run_file(&mut self, path: &Path, emit: impl FnMut(String)) -> anyhow::Result<()> {
        let script = fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Ok(self.run_script(&script, emit)?)
    }
}
