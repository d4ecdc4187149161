use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hospital_records_core::{RecordKind, RecordStore};
use hospital_records_shell::app;
use hospital_records_shell::help::BANNER;
use hospital_records_shell::panels;
use hospital_records_shell::{AppConfig, Confirm, ExportFormat, Outcome, Session};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "hospital-records",
    version,
    about = "Keep patient, doctor and appointment records from the terminal",
    after_help = "Environment: RUST_LOG, HOSPITAL_RECORDS_NO_SEED, HOSPITAL_RECORDS_ASSUME_YES"
)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log filter, overrides RUST_LOG
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    /// Start with an empty store instead of the demonstration rows
    #[arg(long, global = true)]
    no_seed: bool,

    /// Delete without asking
    #[arg(short = 'y', long = "yes", global = true)]
    assume_yes: bool,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Interactive shell (default)
    Shell,

    /// Run shell commands from a file, one per line
    Run {
        /// Script to execute
        file: PathBuf,
    },

    /// Export the starting state and exit
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Table for CSV output
        #[arg(long, default_value = "patients")]
        table: RecordKind,

        /// Write here instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Print the effective configuration as JSON
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = AppConfig::from_env().with_overrides(
        cli.no_seed,
        cli.assume_yes,
        cli.log_level.clone(),
        cli.verbose,
    );

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.effective_log_filter()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    debug!(?config, "configuration loaded");

    let result = run(cli.command.unwrap_or(Mode::Shell), &config);
    let (code, message) = app::exit_report(&result);
    if let Some(message) = message {
        eprintln!("{}", message);
    }
    ExitCode::from(code)
}

fn open_store(config: &AppConfig) -> RecordStore {
    if config.seed_data {
        RecordStore::with_seed_data()
    } else {
        RecordStore::new()
    }
}

fn run(mode: Mode, config: &AppConfig) -> Result<()> {
    match mode {
        Mode::Shell => run_shell(config),
        Mode::Run { file } => {
            let mut session = Session::new(open_store(config)).with_assume_yes(true);
            session.run_file(&file, |text| println!("{}", text))
        }
        Mode::Export { format, table, out } => {
            let store = open_store(config);
            let text = panels::export(&store, table, format, out.as_deref())?;
            println!("{}", text);
            Ok(())
        }
        Mode::Config => {
            println!("{}", serde_json::to_string_pretty(config)?);
            Ok(())
        }
    }
}

/// Confirmation through the line editor.
struct EditorConfirm<'a> {
    editor: &'a mut DefaultEditor,
}

impl Confirm for EditorConfirm<'_> {
    fn confirm(&mut self, question: &str) -> bool {
        match self.editor.readline(&format!("{} [y/N] ", question)) {
            Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

fn run_shell(config: &AppConfig) -> Result<()> {
    let mut editor = app::open_editor(DefaultEditor::new)?;
    let mut session = Session::new(open_store(config)).with_assume_yes(config.assume_yes);
    info!(
        seed = config.seed_data,
        patients = session.store().count(RecordKind::Patient),
        doctors = session.store().count(RecordKind::Doctor),
        "shell started"
    );

    println!("{}", BANNER);
    if let Ok(Some(Outcome::Message(table))) =
        session.execute_line("list", &mut EditorConfirm { editor: &mut editor })
    {
        println!("{}", table);
    }

    loop {
        let line = match editor.readline(&session.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("Type 'quit' to leave.");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("reading input"),
        };
        if !line.trim().is_empty() {
            editor.add_history_entry(line.trim()).ok();
        }

        match session.execute_line(&line, &mut EditorConfirm { editor: &mut editor }) {
            Ok(Some(Outcome::Message(text))) => println!("{}", text),
            Ok(Some(Outcome::Clear)) => {
                if let Err(e) = editor.clear_screen() {
                    warn!(error = %e, "could not clear screen");
                }
            }
            Ok(Some(Outcome::Quit)) => break,
            Ok(None) => {}
            Err(e) => {
                info!(error = %e, "command rejected");
                eprintln!("{}", e);
            }
        }
    }

    Ok(())
}

