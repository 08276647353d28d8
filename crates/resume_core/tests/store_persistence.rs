use resume_core::db::open_db_in_memory;
use resume_core::service::persistence::DEFAULT_AUTOSAVE_INTERVAL;
use resume_core::{
    Clock, DocumentRepository, PersistencePolicy, RepoError, RepoResult, ResumeDocument,
    ResumeStore, SeedDocument, SqliteDocumentRepository, StoreConfig, StoredDocument,
    DEFAULT_STORAGE_KEY, LEGACY_STORAGE_KEY,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

#[derive(Default)]
struct MemoryState {
    slots: RefCell<HashMap<String, StoredDocument>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

/// In-memory slots with switchable write failures.
#[derive(Clone, Default)]
struct MemoryRepo {
    state: Rc<MemoryState>,
}

impl MemoryRepo {
    fn put_raw(&self, key: &str, body: &str) {
        self.state.slots.borrow_mut().insert(
            key.to_string(),
            StoredDocument {
                body: body.to_string(),
                revision: 1,
            },
        );
    }

    fn body(&self, key: &str) -> Option<String> {
        self.state.slots.borrow().get(key).map(|doc| doc.body.clone())
    }

    fn writes(&self) -> usize {
        self.state.writes.get()
    }

    fn fail_writes(&self, fail: bool) {
        self.state.fail_writes.set(fail);
    }
}

impl DocumentRepository for MemoryRepo {
    fn load(&self, key: &str) -> RepoResult<Option<StoredDocument>> {
        Ok(self.state.slots.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, body: &str) -> RepoResult<i64> {
        if self.state.fail_writes.get() {
            return Err(RepoError::InvalidData("quota exceeded".to_string()));
        }
        self.state.writes.set(self.state.writes.get() + 1);
        let mut slots = self.state.slots.borrow_mut();
        let revision = slots.get(key).map_or(1, |doc| doc.revision + 1);
        slots.insert(
            key.to_string(),
            StoredDocument {
                body: body.to_string(),
                revision,
            },
        );
        Ok(revision)
    }

    fn revision(&self, key: &str) -> RepoResult<Option<i64>> {
        Ok(self.state.slots.borrow().get(key).map(|doc| doc.revision))
    }
}

fn stored_document(repo: &MemoryRepo, key: &str) -> ResumeDocument {
    let body = repo.body(key).expect("slot should be written");
    serde_json::from_str(&body).expect("stored body should parse")
}

#[test]
fn first_run_does_not_write_seed() {
    let repo = MemoryRepo::default();
    let store = ResumeStore::open(repo.clone(), StoreConfig::default());

    assert!(!store.is_dirty());
    drop(store);
    assert_eq!(repo.writes(), 0);
    assert!(repo.body(DEFAULT_STORAGE_KEY).is_none());
}

#[test]
fn debounce_waits_for_idle_window() {
    let repo = MemoryRepo::default();
    let clock = ManualClock::new();
    let mut store =
        ResumeStore::open_with_clock(repo.clone(), StoreConfig::default(), Box::new(clock.clone()));

    store.update_summary("first");
    clock.advance(Duration::from_secs(3));
    assert!(!store.tick());
    assert_eq!(repo.writes(), 0);

    // A second edit restarts the window.
    store.update_summary("second");
    clock.advance(Duration::from_secs(3));
    assert!(!store.tick());
    assert_eq!(repo.writes(), 0);

    clock.advance(DEFAULT_AUTOSAVE_INTERVAL);
    assert!(store.tick());
    assert_eq!(repo.writes(), 1);
    assert!(!store.is_dirty());
    assert_eq!(stored_document(&repo, DEFAULT_STORAGE_KEY).summary.text, "second");

    assert!(store.tick());
    assert_eq!(repo.writes(), 1);
}

#[test]
fn flush_writes_before_window_elapses() {
    let repo = MemoryRepo::default();
    let clock = ManualClock::new();
    let mut store =
        ResumeStore::open_with_clock(repo.clone(), StoreConfig::default(), Box::new(clock));

    store.add_project();
    assert!(store.flush());
    assert_eq!(repo.writes(), 1);
    assert!(store.flush());
    assert_eq!(repo.writes(), 1);
}

#[test]
fn dropping_store_flushes_pending_edits() {
    let repo = MemoryRepo::default();
    {
        let mut store = ResumeStore::open_with_clock(
            repo.clone(),
            StoreConfig::default(),
            Box::new(ManualClock::new()),
        );
        store.update_template("classic");
        assert_eq!(repo.writes(), 0);
    }

    assert_eq!(repo.writes(), 1);
    assert_eq!(stored_document(&repo, DEFAULT_STORAGE_KEY).template, "classic");
}

#[test]
fn immediate_policy_writes_every_effective_mutation() {
    let repo = MemoryRepo::default();
    let config = StoreConfig {
        persistence: PersistencePolicy::Immediate,
        ..StoreConfig::default()
    };
    let mut store = ResumeStore::open(repo.clone(), config);

    store.update_summary("one");
    assert_eq!(repo.writes(), 1);
    assert!(!store.is_dirty());

    store.update_summary("one");
    assert_eq!(repo.writes(), 1);

    store.remove_experience("1");
    assert_eq!(repo.writes(), 2);
    assert!(stored_document(&repo, DEFAULT_STORAGE_KEY).experience.is_empty());
}

#[test]
fn legacy_configuration_uses_legacy_key() {
    let repo = MemoryRepo::default();
    let mut store = ResumeStore::open(repo.clone(), StoreConfig::immediate_legacy());

    assert_eq!(store.storage_key(), LEGACY_STORAGE_KEY);
    store.update_summary("legacy");

    assert!(repo.body(DEFAULT_STORAGE_KEY).is_none());
    assert_eq!(stored_document(&repo, LEGACY_STORAGE_KEY).summary.text, "legacy");
}

#[test]
fn reverted_edits_do_not_rewrite_slot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn);
    {
        let mut store = ResumeStore::open(SqliteDocumentRepository::new(&conn), StoreConfig::default());
        store.update_summary("persisted");
        assert!(store.flush());
    }
    assert_eq!(repo.revision(DEFAULT_STORAGE_KEY).unwrap(), Some(1));

    let mut store = ResumeStore::open(SqliteDocumentRepository::new(&conn), StoreConfig::default());
    assert_eq!(store.document().summary.text, "persisted");

    store.update_summary("draft");
    store.update_summary("persisted");
    assert!(store.is_dirty());
    assert!(store.flush());
    assert!(!store.is_dirty());
    assert_eq!(repo.revision(DEFAULT_STORAGE_KEY).unwrap(), Some(1));

    store.update_summary("changed");
    assert!(store.flush());
    assert_eq!(repo.revision(DEFAULT_STORAGE_KEY).unwrap(), Some(2));
}

#[test]
fn failed_write_keeps_store_dirty_and_retries() {
    let repo = MemoryRepo::default();
    let clock = ManualClock::new();
    let mut store =
        ResumeStore::open_with_clock(repo.clone(), StoreConfig::default(), Box::new(clock.clone()));

    repo.fail_writes(true);
    store.update_summary("unsaved");
    clock.advance(DEFAULT_AUTOSAVE_INTERVAL);
    assert!(!store.tick());
    assert!(store.is_dirty());
    assert_eq!(store.document().summary.text, "unsaved");
    assert!(repo.body(DEFAULT_STORAGE_KEY).is_none());

    repo.fail_writes(false);
    assert!(store.tick());
    assert!(!store.is_dirty());
    assert_eq!(stored_document(&repo, DEFAULT_STORAGE_KEY).summary.text, "unsaved");
}

#[test]
fn malformed_stored_data_falls_back_to_seed() {
    let repo = MemoryRepo::default();
    repo.put_raw(DEFAULT_STORAGE_KEY, "{\"personalInfo\": 42");

    let store = ResumeStore::open(repo.clone(), StoreConfig::default());

    assert_eq!(store.document(), &ResumeDocument::sample());
    assert!(!store.is_dirty());
    drop(store);
    assert_eq!(repo.body(DEFAULT_STORAGE_KEY).as_deref(), Some("{\"personalInfo\": 42"));
}

#[test]
fn stored_document_is_loaded_on_open() {
    let repo = MemoryRepo::default();
    let mut stored = ResumeDocument::blank();
    stored.personal_info.name = "Grace Hopper".to_string();
    repo.put_raw(DEFAULT_STORAGE_KEY, &serde_json::to_string(&stored).unwrap());

    let store = ResumeStore::open(repo, StoreConfig::default());
    assert_eq!(store.document(), &stored);
}

#[test]
fn blank_seed_is_used_for_first_run_and_reset() {
    let repo = MemoryRepo::default();
    let config = StoreConfig {
        seed: SeedDocument::Blank,
        ..StoreConfig::default()
    };
    let mut store = ResumeStore::open(repo.clone(), config);
    assert_eq!(store.document(), &ResumeDocument::blank());

    store.add_experience();
    store.reset_resume_data();

    assert_eq!(store.document(), &ResumeDocument::blank());
    assert_eq!(stored_document(&repo, DEFAULT_STORAGE_KEY), ResumeDocument::blank());
}

#[test]
fn reset_persists_without_waiting_for_debounce() {
    let repo = MemoryRepo::default();
    let mut store = ResumeStore::open_with_clock(
        repo.clone(),
        StoreConfig::default(),
        Box::new(ManualClock::new()),
    );

    store.update_summary("edited");
    store.reset_resume_data();

    assert_eq!(repo.writes(), 1);
    assert_eq!(stored_document(&repo, DEFAULT_STORAGE_KEY), ResumeDocument::sample());
}
