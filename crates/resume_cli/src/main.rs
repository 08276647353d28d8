//! Command-line front end for the resume store.
//!
//! # Responsibility
//! - Map one subcommand to one store operation.
//! - Flush before exit so a failed write becomes a non-zero exit code.

mod cli;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Command};
use log::info;
use resume_core::db::{open_db, DbError};
use resume_core::{
    core_version, init_logging, init_stderr_logging, render_outline, ImportError, LoggingError,
    ResumeStore, SqliteDocumentRepository, StoreConfig, StoreError, TemplateKind,
};

#[derive(Debug)]
enum CliError {
    Logging(LoggingError),
    Db(DbError),
    Store(StoreError),
    Import(ImportError),
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    UnknownTemplate(String),
    Unsaved,
    Invalid(usize),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::UnknownTemplate(name) => {
                writeln!(f, "unknown template `{name}`; available templates:")?;
                let known: Vec<String> = TemplateKind::ALL
                    .iter()
                    .map(|t| format!("  {:<9} {}", t.as_str(), t.description()))
                    .collect();
                write!(f, "{}", known.join("\n"))
            }
            Self::Unsaved => write!(f, "resume could not be saved; see log for details"),
            Self::Invalid(count) => write!(f, "resume has {count} problem(s)"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::UnknownTemplate(_) | Self::Unsaved | Self::Invalid(_) => None,
        }
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ImportError> for CliError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.log_dir.as_deref() {
        Some(dir) => init_logging(&cli.log_level, dir)?,
        None => init_stderr_logging(&cli.log_level)?,
    }

    if matches!(cli.command, Command::Version) {
        println!("resume {}", core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db)?;
    let config = StoreConfig {
        storage_key: cli.key.clone(),
        ..StoreConfig::default()
    };
    let mut store = ResumeStore::open(SqliteDocumentRepository::new(&conn), config);
    info!(
        "event=cli_command module=cli status=start command={:?} key={}",
        cli.command,
        store.storage_key()
    );

    match cli.command {
        Command::Show => print!("{}", render_outline(store.document())),
        Command::Export { output } => {
            let json = store.export_data()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json + "\n")
                        .map_err(|source| CliError::Io { path, source })?;
                }
                None => println!("{json}"),
            }
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file).map_err(|source| CliError::Io {
                path: file.clone(),
                source,
            })?;
            store.import_data(&text)?;
        }
        Command::Reset => store.reset_resume_data(),
        Command::MoveSection { index, direction } => {
            if !store.move_section(index, direction.into()) {
                println!("section order unchanged");
            }
            let order: Vec<&str> = store
                .document()
                .section_order
                .iter()
                .map(|kind| kind.as_str())
                .collect();
            println!("{}", order.join(" "));
        }
        Command::Template { name } => {
            let template =
                TemplateKind::parse(name.trim()).ok_or(CliError::UnknownTemplate(name))?;
            store.update_template(template.as_str());
        }
        Command::Check => {
            if let Err(problems) = store.document().validate() {
                for problem in &problems {
                    println!("{problem}");
                }
                return Err(CliError::Invalid(problems.len()));
            }
            println!("ok");
        }
        Command::Version => {}
    }

    if !store.flush() {
        return Err(CliError::Unsaved);
    }
    Ok(())
}
