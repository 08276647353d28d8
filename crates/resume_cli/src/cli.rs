use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use resume_core::{MoveDirection, DEFAULT_STORAGE_KEY};

#[derive(Parser, Debug, Clone)]
#[command(name = "resume")]
#[command(version, about = "Edit and inspect a locally stored resume", long_about = None)]
pub struct Cli {
    /// SQLite database holding the resume
    #[arg(long, env = "RESUME_DB", default_value = "resume.db")]
    pub db: PathBuf,

    /// Storage slot inside the database
    #[arg(long, env = "RESUME_KEY", default_value = DEFAULT_STORAGE_KEY)]
    pub key: String,

    /// trace|debug|info|warn|error
    #[arg(long, env = "RESUME_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Write rotating log files to this absolute directory instead of stderr
    #[arg(long, env = "RESUME_LOG_DIR")]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the resume as a plain-text outline
    Show,
    /// Write the resume as pretty-printed JSON
    Export {
        /// Target file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Replace the resume with a previously exported JSON file
    Import { file: PathBuf },
    /// Replace the resume with the sample document
    Reset,
    /// Swap one section with its neighbor
    MoveSection {
        /// Zero-based position in the current section order
        index: usize,
        direction: Direction,
    },
    /// Select a template (modern, classic, minimal, creative, tech)
    Template { name: String },
    /// Report structural problems in the stored resume
    Check,
    /// Print version information
    Version,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}
