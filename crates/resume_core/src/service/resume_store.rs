//! Resume store: the single owner of the in-memory resume document.
//!
//! # Responsibility
//! - Apply section-scoped edits (add/update/remove) to the document.
//! - Track dirty state and persist through a `DocumentRepository`.
//! - Adopt documents written by other execution contexts (last-write-wins).
//!
//! # Invariants
//! - Mutations never panic and never return errors: unknown ids are no-ops.
//! - Snapshots handed out earlier are never mutated (copy-on-write).
//! - A dirty document is written before the store is dropped.
//! - Observing an external write replaces the whole document and discards
//!   unsaved local edits. This race is accepted, not resolved.

use crate::id::generate_unique_id;
use crate::model::patch::{
    EducationPatch, ExperiencePatch, PersonalInfoPatch, ProjectPatch, SkillPatch,
};
use crate::model::resume::{Education, Experience, Project, ResumeDocument, Skill, SkillGroup};
use crate::model::section::{MoveDirection, SectionKind};
use crate::repo::document_repo::{DocumentRepository, RepoError};
use crate::service::persistence::{
    Clock, PersistencePolicy, StorageEvent, StoreConfig, SystemClock,
};
use crate::service::section_order;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of an explicit store I/O request.
#[derive(Debug)]
pub enum StoreError {
    Serialize(serde_json::Error),
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize resume document: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Reason an import was rejected. The current document is left untouched.
#[derive(Debug)]
pub enum ImportError {
    Parse(serde_json::Error),
    NotAnObject,
    MissingKey(&'static str),
    Schema(serde_json::Error),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "import is not valid JSON: {err}"),
            Self::NotAnObject => write!(f, "import must be a JSON object"),
            Self::MissingKey(key) => write!(f, "import is missing required key `{key}`"),
            Self::Schema(err) => write!(f, "import does not match the resume schema: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) | Self::Schema(err) => Some(err),
            Self::NotAnObject | Self::MissingKey(_) => None,
        }
    }
}

const IMPORT_REQUIRED_KEYS: [&str; 2] = ["personalInfo", "sectionOrder"];

/// Owner of one resume document bound to one storage slot.
pub struct ResumeStore<R: DocumentRepository> {
    repo: R,
    config: StoreConfig,
    clock: Box<dyn Clock>,
    document: Arc<ResumeDocument>,
    dirty: bool,
    last_modified: Option<Instant>,
    last_persisted_body: Option<String>,
    known_revision: Option<i64>,
}

impl<R: DocumentRepository> ResumeStore<R> {
    /// Opens a store using wall-clock time.
    ///
    /// Never fails: missing, unreadable or malformed stored data falls back to
    /// the configured seed document.
    pub fn open(repo: R, config: StoreConfig) -> Self {
        Self::open_with_clock(repo, config, Box::new(SystemClock))
    }

    /// Opens a store with an injected time source.
    pub fn open_with_clock(repo: R, config: StoreConfig, clock: Box<dyn Clock>) -> Self {
        let mut store = Self {
            document: Arc::new(config.seed.build()),
            repo,
            config,
            clock,
            dirty: false,
            last_modified: None,
            last_persisted_body: None,
            known_revision: None,
        };
        store.load_initial();
        store
    }

    fn load_initial(&mut self) {
        let key = self.config.storage_key.clone();
        match self.repo.load(&key) {
            Ok(Some(stored)) => {
                self.known_revision = Some(stored.revision);
                match serde_json::from_str::<ResumeDocument>(&stored.body) {
                    Ok(document) => {
                        info!(
                            "event=store_load module=store status=ok key={} revision={}",
                            key, stored.revision
                        );
                        self.document = Arc::new(document);
                        self.last_persisted_body = Some(stored.body);
                    }
                    Err(err) => {
                        warn!(
                            "event=store_load module=store status=fallback key={} error_code=malformed_document error={}",
                            key, err
                        );
                    }
                }
            }
            Ok(None) => {
                info!("event=store_load module=store status=seed key={key}");
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=fallback key={} error_code=storage_read_failed error={}",
                    key, err
                );
            }
        }
    }

    /// Current document.
    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    /// Cheap read-only snapshot; later edits do not affect it.
    pub fn snapshot(&self) -> Arc<ResumeDocument> {
        Arc::clone(&self.document)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn storage_key(&self) -> &str {
        &self.config.storage_key
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Merges supplied fields into `personalInfo`.
    pub fn update_personal_info(&mut self, patch: PersonalInfoPatch) -> bool {
        self.apply("update_personal_info", |doc| {
            let before = doc.personal_info.clone();
            patch.apply(&mut doc.personal_info);
            doc.personal_info != before
        })
    }

    pub fn update_summary(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        self.apply("update_summary", |doc| replace(&mut doc.summary.text, text))
    }

    /// Prepends a new ongoing experience entry and returns its id.
    pub fn add_experience(&mut self) -> String {
        let id = generate_unique_id(|candidate| {
            self.document.experience.iter().any(|entry| entry.id == candidate)
        });
        let entry = Experience::new_default(id.clone());
        self.apply("add_experience", |doc| {
            doc.experience.insert(0, entry);
            true
        });
        id
    }

    pub fn update_experience(&mut self, id: &str, patch: ExperiencePatch) -> bool {
        self.apply("update_experience", |doc| {
            patch_entry(&mut doc.experience, |entry| entry.id == id, |entry| {
                patch.apply(entry)
            })
        })
    }

    pub fn remove_experience(&mut self, id: &str) -> bool {
        self.apply("remove_experience", |doc| {
            remove_where(&mut doc.experience, |entry| entry.id == id)
        })
    }

    /// Appends an empty highlight placeholder to one experience entry.
    pub fn add_experience_highlight(&mut self, id: &str) -> bool {
        self.edit_experience_highlights(id, |highlights| {
            highlights.push(String::new());
            true
        })
    }

    pub fn update_experience_highlight(
        &mut self,
        id: &str,
        index: usize,
        text: impl Into<String>,
    ) -> bool {
        let text = text.into();
        self.edit_experience_highlights(id, |highlights| set_at(highlights, index, text))
    }

    pub fn remove_experience_highlight(&mut self, id: &str, index: usize) -> bool {
        self.edit_experience_highlights(id, |highlights| remove_at(highlights, index))
    }

    fn edit_experience_highlights(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut Vec<String>) -> bool,
    ) -> bool {
        let Some(entry) = self.document.experience.iter().find(|entry| entry.id == id) else {
            return false;
        };
        let mut highlights = entry.highlights.clone();
        if !edit(&mut highlights) {
            return false;
        }
        self.update_experience(
            id,
            ExperiencePatch {
                highlights: Some(highlights),
                ..ExperiencePatch::default()
            },
        )
    }

    /// Prepends a new education entry and returns its id.
    pub fn add_education(&mut self) -> String {
        let id = generate_unique_id(|candidate| {
            self.document.education.iter().any(|entry| entry.id == candidate)
        });
        let entry = Education::new_default(id.clone());
        self.apply("add_education", |doc| {
            doc.education.insert(0, entry);
            true
        });
        id
    }

    pub fn update_education(&mut self, id: &str, patch: EducationPatch) -> bool {
        self.apply("update_education", |doc| {
            patch_entry(&mut doc.education, |entry| entry.id == id, |entry| {
                patch.apply(entry)
            })
        })
    }

    pub fn remove_education(&mut self, id: &str) -> bool {
        self.apply("remove_education", |doc| {
            remove_where(&mut doc.education, |entry| entry.id == id)
        })
    }

    /// Appends an unnamed, empty skill group and returns its id.
    pub fn add_skill_group(&mut self) -> String {
        let id = generate_unique_id(|candidate| {
            self.document.skill_groups.iter().any(|group| group.id == candidate)
        });
        let group = SkillGroup::new_default(id.clone());
        self.apply("add_skill_group", |doc| {
            doc.skill_groups.push(group);
            true
        });
        id
    }

    pub fn update_skill_group(&mut self, id: &str, name: impl Into<String>) -> bool {
        let name = name.into();
        self.apply("update_skill_group", |doc| {
            doc.skill_groups
                .iter_mut()
                .find(|group| group.id == id)
                .is_some_and(|group| replace(&mut group.name, name))
        })
    }

    /// Removes a group together with all of its skills.
    pub fn remove_skill_group(&mut self, id: &str) -> bool {
        self.apply("remove_skill_group", |doc| {
            remove_where(&mut doc.skill_groups, |group| group.id == id)
        })
    }

    /// Appends a default skill to a group. Returns `None` when the group does
    /// not exist.
    pub fn add_skill(&mut self, group_id: &str) -> Option<String> {
        let group = self
            .document
            .skill_groups
            .iter()
            .find(|group| group.id == group_id)?;
        let id = generate_unique_id(|candidate| group.skills.iter().any(|s| s.id == candidate));
        let skill = Skill::new_default(id.clone());

        let added = self.apply("add_skill", |doc| {
            match doc.skill_groups.iter_mut().find(|group| group.id == group_id) {
                Some(group) => {
                    group.skills.push(skill);
                    true
                }
                None => false,
            }
        });
        added.then_some(id)
    }

    pub fn update_skill(&mut self, group_id: &str, skill_id: &str, patch: SkillPatch) -> bool {
        self.apply("update_skill", |doc| {
            match doc.skill_groups.iter_mut().find(|group| group.id == group_id) {
                Some(group) => patch_entry(&mut group.skills, |skill| skill.id == skill_id, |skill| {
                    patch.apply(skill)
                }),
                None => false,
            }
        })
    }

    pub fn remove_skill(&mut self, group_id: &str, skill_id: &str) -> bool {
        self.apply("remove_skill", |doc| {
            match doc.skill_groups.iter_mut().find(|group| group.id == group_id) {
                Some(group) => remove_where(&mut group.skills, |skill| skill.id == skill_id),
                None => false,
            }
        })
    }

    /// Prepends a new project and returns its id.
    pub fn add_project(&mut self) -> String {
        let id = generate_unique_id(|candidate| {
            self.document.projects.iter().any(|entry| entry.id == candidate)
        });
        let entry = Project::new_default(id.clone());
        self.apply("add_project", |doc| {
            doc.projects.insert(0, entry);
            true
        });
        id
    }

    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> bool {
        self.apply("update_project", |doc| {
            patch_entry(&mut doc.projects, |entry| entry.id == id, |entry| {
                patch.apply(entry)
            })
        })
    }

    pub fn remove_project(&mut self, id: &str) -> bool {
        self.apply("remove_project", |doc| {
            remove_where(&mut doc.projects, |entry| entry.id == id)
        })
    }

    pub fn add_project_highlight(&mut self, id: &str) -> bool {
        self.edit_project_highlights(id, |highlights| {
            highlights.push(String::new());
            true
        })
    }

    pub fn update_project_highlight(
        &mut self,
        id: &str,
        index: usize,
        text: impl Into<String>,
    ) -> bool {
        let text = text.into();
        self.edit_project_highlights(id, |highlights| set_at(highlights, index, text))
    }

    pub fn remove_project_highlight(&mut self, id: &str, index: usize) -> bool {
        self.edit_project_highlights(id, |highlights| remove_at(highlights, index))
    }

    fn edit_project_highlights(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut Vec<String>) -> bool,
    ) -> bool {
        let Some(entry) = self.document.projects.iter().find(|entry| entry.id == id) else {
            return false;
        };
        let mut highlights = entry.highlights.clone();
        if !edit(&mut highlights) {
            return false;
        }
        self.update_project(
            id,
            ProjectPatch {
                highlights: Some(highlights),
                ..ProjectPatch::default()
            },
        )
    }

    /// Replaces the section order wholesale.
    ///
    /// The order is not validated; callers keep it a permutation of the six
    /// section tokens.
    pub fn update_section_order(&mut self, order: Vec<SectionKind>) -> bool {
        self.apply("update_section_order", |doc| {
            replace(&mut doc.section_order, order)
        })
    }

    /// Swaps one section with its neighbor. No-op at the list edges.
    pub fn move_section(&mut self, index: usize, direction: MoveDirection) -> bool {
        match section_order::move_section(&self.document.section_order, index, direction) {
            Some(order) => self.update_section_order(order),
            None => {
                debug!(
                    "event=store_mutation module=store status=noop op=move_section index={index} direction={direction:?}"
                );
                false
            }
        }
    }

    /// Replaces the template name. Unknown names are stored as given.
    pub fn update_template(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        self.apply("update_template", |doc| replace(&mut doc.template, name))
    }

    /// Replaces the document with the seed document and writes it now.
    ///
    /// Asking the user for confirmation is the caller's job.
    pub fn reset_resume_data(&mut self) {
        self.document = Arc::new(self.config.seed.build());
        self.mark_dirty("reset_resume_data");
        self.persist();
    }

    /// Serializes the current document as pretty-printed JSON.
    pub fn export_data(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self.document.as_ref())?)
    }

    /// Replaces the document with an exported blob.
    ///
    /// The blob must be a JSON object carrying at least `personalInfo` and
    /// `sectionOrder`; other missing fields take their defaults. On failure
    /// the current document is kept.
    pub fn import_data(&mut self, text: &str) -> Result<(), ImportError> {
        let result = parse_import(text);
        match result {
            Ok(document) => {
                self.document = Arc::new(document);
                self.mark_dirty("import_data");
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=store_import module=store status=error key={} error={}",
                    self.config.storage_key, err
                );
                Err(err)
            }
        }
    }

    /// Writes the document if the debounce window has elapsed.
    ///
    /// Hosts call this from their timer loop. Returns whether the document is
    /// clean afterwards.
    pub fn tick(&mut self) -> bool {
        if !self.dirty {
            return true;
        }
        let due = match self.config.persistence {
            PersistencePolicy::Immediate => true,
            PersistencePolicy::Debounced(window) => self
                .last_modified
                .map_or(true, |modified| {
                    self.clock.now().saturating_duration_since(modified) >= window
                }),
        };
        if due {
            self.persist()
        } else {
            false
        }
    }

    /// Writes a pending document immediately. Returns whether the document
    /// is clean afterwards.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return true;
        }
        self.persist()
    }

    /// Applies a storage notification from another execution context.
    ///
    /// Returns whether the in-memory document was replaced.
    pub fn handle_storage_event(&mut self, event: &StorageEvent) -> bool {
        if event.key.trim() != self.config.storage_key.trim() {
            return false;
        }
        let Some(body) = event.new_value.as_deref() else {
            debug!(
                "event=external_change module=store status=ignored key={} reason=slot_removed",
                self.config.storage_key
            );
            return false;
        };
        let revision = self.revision_of_stored(body);
        self.adopt_external(body, revision)
    }

    /// Checks the storage revision and adopts a document written by another
    /// store sharing the same database.
    pub fn poll_external_changes(&mut self) -> bool {
        let revision = match self.repo.revision(&self.config.storage_key) {
            Ok(Some(revision)) => revision,
            Ok(None) => return false,
            Err(err) => {
                error!(
                    "event=external_poll module=store status=error key={} error={}",
                    self.config.storage_key, err
                );
                return false;
            }
        };
        if Some(revision) == self.known_revision {
            return false;
        }

        let stored = match self.repo.load(&self.config.storage_key) {
            Ok(Some(stored)) => stored,
            Ok(None) => return false,
            Err(err) => {
                error!(
                    "event=external_poll module=store status=error key={} error={}",
                    self.config.storage_key, err
                );
                return false;
            }
        };
        if self.last_persisted_body.as_deref() == Some(stored.body.as_str()) {
            self.known_revision = Some(stored.revision);
            return false;
        }
        self.adopt_external(&stored.body, Some(stored.revision))
    }

    fn adopt_external(&mut self, body: &str, revision: Option<i64>) -> bool {
        let document = match serde_json::from_str::<ResumeDocument>(body) {
            Ok(document) => document,
            Err(err) => {
                warn!(
                    "event=external_change module=store status=error key={} error_code=malformed_document error={}",
                    self.config.storage_key, err
                );
                if revision.is_some() {
                    self.known_revision = revision;
                }
                return false;
            }
        };

        if self.dirty {
            warn!(
                "event=external_change module=store status=overwrite key={} discarded_unsaved=true",
                self.config.storage_key
            );
        } else {
            info!(
                "event=external_change module=store status=ok key={} revision={:?}",
                self.config.storage_key, revision
            );
        }

        self.document = Arc::new(document);
        self.dirty = false;
        self.last_modified = None;
        self.last_persisted_body = Some(body.to_string());
        if revision.is_some() {
            self.known_revision = revision;
        }
        true
    }

    /// Revision of the stored slot when it still holds `body`. A newer write
    /// yields `None` so the next poll adopts it.
    fn revision_of_stored(&self, body: &str) -> Option<i64> {
        match self.repo.load(&self.config.storage_key) {
            Ok(Some(stored)) if stored.body == body => Some(stored.revision),
            Ok(_) => None,
            Err(err) => {
                error!(
                    "event=external_change module=store status=error key={} error={}",
                    self.config.storage_key, err
                );
                None
            }
        }
    }

    fn current_revision(&self) -> Option<i64> {
        match self.repo.revision(&self.config.storage_key) {
            Ok(revision) => revision,
            Err(err) => {
                error!(
                    "event=external_change module=store status=error key={} error={}",
                    self.config.storage_key, err
                );
                None
            }
        }
    }

    fn apply(&mut self, operation: &'static str, edit: impl FnOnce(&mut ResumeDocument) -> bool) -> bool {
        let changed = edit(Arc::make_mut(&mut self.document));
        if changed {
            self.mark_dirty(operation);
        } else {
            debug!("event=store_mutation module=store status=noop op={operation}");
        }
        changed
    }

    fn mark_dirty(&mut self, operation: &'static str) {
        self.dirty = true;
        self.last_modified = Some(self.clock.now());
        debug!("event=store_mutation module=store status=ok op={operation}");
        if self.config.persistence == PersistencePolicy::Immediate {
            self.persist();
        }
    }

    /// Writes the current document. Failures are logged and leave the store
    /// dirty so the next tick or flush retries.
    fn persist(&mut self) -> bool {
        let key = self.config.storage_key.clone();
        let body = match serde_json::to_string(self.document.as_ref()) {
            Ok(body) => body,
            Err(err) => {
                error!(
                    "event=store_write module=store status=error key={} error_code=serialize_failed error={}",
                    key, err
                );
                return false;
            }
        };

        if self.last_persisted_body.as_deref() == Some(body.as_str())
            && self.current_revision() == self.known_revision
        {
            debug!("event=store_write module=store status=unchanged key={key}");
            self.dirty = false;
            return true;
        }

        match self.repo.save(&key, &body) {
            Ok(revision) => {
                info!(
                    "event=store_write module=store status=ok key={} revision={} bytes={}",
                    key,
                    revision,
                    body.len()
                );
                self.known_revision = Some(revision);
                self.last_persisted_body = Some(body);
                self.dirty = false;
                true
            }
            Err(err) => {
                error!(
                    "event=store_write module=store status=error key={} error_code=storage_write_failed error={}",
                    key, err
                );
                false
            }
        }
    }
}

impl<R: DocumentRepository> Drop for ResumeStore<R> {
    fn drop(&mut self) {
        if self.dirty && !self.flush() {
            error!(
                "event=store_close module=store status=error key={} error_code=unsaved_changes_lost",
                self.config.storage_key
            );
        }
    }
}

fn parse_import(text: &str) -> Result<ResumeDocument, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    let object = value.as_object().ok_or(ImportError::NotAnObject)?;
    for key in IMPORT_REQUIRED_KEYS {
        if !object.contains_key(key) {
            return Err(ImportError::MissingKey(key));
        }
    }
    serde_json::from_value(value).map_err(ImportError::Schema)
}

fn replace<T: PartialEq>(target: &mut T, value: T) -> bool {
    if *target == value {
        return false;
    }
    *target = value;
    true
}

fn patch_entry<T: Clone + PartialEq>(
    entries: &mut [T],
    matches: impl Fn(&T) -> bool,
    patch: impl FnOnce(&mut T),
) -> bool {
    let Some(entry) = entries.iter_mut().find(|entry| matches(entry)) else {
        return false;
    };
    let before = entry.clone();
    patch(entry);
    *entry != before
}

fn remove_where<T>(entries: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = entries.len();
    entries.retain(|entry| !matches(entry));
    entries.len() != before
}

fn set_at(values: &mut [String], index: usize, text: String) -> bool {
    match values.get_mut(index) {
        Some(slot) => replace(slot, text),
        None => false,
    }
}

fn remove_at(values: &mut Vec<String>, index: usize) -> bool {
    if index >= values.len() {
        return false;
    }
    values.remove(index);
    true
}
