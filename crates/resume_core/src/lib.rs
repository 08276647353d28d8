//! Core domain logic for the resume builder.
//! This crate owns the resume document, its edit operations and persistence.

pub mod db;
pub mod extension;
pub mod id;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use extension::capability::{parse_capability, CapabilityParseError, IntegrationCapability};
pub use extension::registry::{CapabilityError, IntegrationRegistry, LoadDecision, LoadState};
pub use id::generate_id;
pub use logging::{init_logging, init_stderr_logging, logging_status, LogTarget, LoggingError};
pub use model::patch::{
    EducationPatch, ExperiencePatch, PersonalInfoPatch, ProjectPatch, SkillPatch,
};
pub use model::resume::{
    DocumentValidationError, Education, Experience, PersonalInfo, Project, ResumeDocument, Skill,
    SkillGroup, Summary,
};
pub use model::section::{MoveDirection, SectionKind};
pub use model::template::TemplateKind;
pub use render::date_range::format_date_range;
pub use render::outline::render_outline;
pub use repo::document_repo::{
    DocumentRepository, RepoError, RepoResult, SqliteDocumentRepository, StoredDocument,
};
pub use service::persistence::{
    Clock, PersistencePolicy, SeedDocument, StorageEvent, StoreConfig, SystemClock,
    DEFAULT_STORAGE_KEY, LEGACY_STORAGE_KEY,
};
pub use service::resume_store::{ImportError, ResumeStore, StoreError, StoreResult};
pub use service::section_order::move_section;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
