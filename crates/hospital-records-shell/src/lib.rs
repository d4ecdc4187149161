//! Terminal front end for the hospital records store.
//!
//! One panel per entity kind, driven by typed commands instead of tabs and
//! buttons. The binary in `main.rs` wires these modules to a line editor.

pub mod app;
pub mod commands;
pub mod config;
pub mod help;
pub mod panels;
pub mod session;

pub use commands::{parse_command, Command, ExportFormat, ShellError};
pub use config::AppConfig;
pub use panels::PanelError;
pub use session::{AlwaysConfirm, Confirm, Outcome, Session};
