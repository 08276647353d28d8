//! Persistence configuration for the resume store.
//!
//! # Responsibility
//! - Describe when dirty documents are written (`PersistencePolicy`).
//! - Describe which storage slot and seed document a store uses.
//! - Abstract time so debounce windows are testable.

use crate::model::resume::ResumeDocument;
use std::time::{Duration, Instant};

/// Storage key of the full application.
pub const DEFAULT_STORAGE_KEY: &str = "resume_builder_data";
/// Storage key used by the simpler context-only variant.
pub const LEGACY_STORAGE_KEY: &str = "resumeData";
/// Debounce window between the last edit and the autosave write.
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(5);

/// When a dirty document is written to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistencePolicy {
    /// Write inside every effective mutation.
    Immediate,
    /// Write once the document has been idle for the given window. Each
    /// mutation restarts the window; `flush` and teardown write right away.
    Debounced(Duration),
}

impl Default for PersistencePolicy {
    fn default() -> Self {
        Self::Debounced(DEFAULT_AUTOSAVE_INTERVAL)
    }
}

/// Document used on first run, on unreadable storage, and on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedDocument {
    /// Populated placeholder resume.
    #[default]
    Sample,
    /// Empty fields, no entries.
    Blank,
}

impl SeedDocument {
    pub fn build(self) -> ResumeDocument {
        match self {
            Self::Sample => ResumeDocument::sample(),
            Self::Blank => ResumeDocument::blank(),
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub persistence: PersistencePolicy,
    pub seed: SeedDocument,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            persistence: PersistencePolicy::default(),
            seed: SeedDocument::default(),
        }
    }
}

impl StoreConfig {
    /// Configuration matching the simpler variant: legacy key, write on
    /// every change.
    pub fn immediate_legacy() -> Self {
        Self {
            storage_key: LEGACY_STORAGE_KEY.to_string(),
            persistence: PersistencePolicy::Immediate,
            seed: SeedDocument::Sample,
        }
    }
}

/// Time source for debounce bookkeeping.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Notification that another execution context wrote a storage slot.
///
/// `new_value == None` means the slot was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub new_value: Option<String>,
}

impl StorageEvent {
    pub fn written(key: impl Into<String>, new_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            new_value: Some(new_value.into()),
        }
    }
}
