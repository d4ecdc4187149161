//! Process startup and exit reporting for the binary.

use anyhow::{Context, Result};

/// Context attached to failures before the shell is running.
pub const STARTUP_ERROR: &str = "Error starting application";

/// Exit status for a run that ended with an error.
pub const EXIT_FAILURE: u8 = 1;

/// Open the line editor, reporting failure as a startup error.
pub fn open_editor<E>(open: impl FnOnce() -> rustyline::Result<E>) -> Result<E> {
    open().context(STARTUP_ERROR)
}

/// Exit status and stderr text for a finished run. The text carries the
/// whole error chain, e.g. `Error starting application: <cause>`.
pub fn exit_report(result: &Result<()>) -> (u8, Option<String>) {
    match result {
        Ok(()) => (0, None),
        Err(e) => (EXIT_FAILURE, Some(format!("{:#}", e))),
    }
}
