//! End-to-end migration runs against an in-memory store and a recording
//! mock remote.

use async_trait::async_trait;
use onboard_core::models::{
    EmployeeInsert, GalleryItemInsert, MissionInsert, PeopleNoteInsert, RequirementInsert,
    TagInsert, TaskInsert,
};
use onboard_core::{
    CreatedRecord, InMemoryStore, LocalStore, MigrationConfig, MigrationEngine, OnboardError,
    RejectionKind, RemoteStore, Result, StorageKeys,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Remote store double that records every call in order and can be armed
/// to fail specific operations.
#[derive(Default)]
struct MockRemote {
    /// Operation names in call order, e.g. "create_tag:IT".
    calls: Mutex<Vec<String>>,
    tags: Mutex<Vec<TagInsert>>,
    tasks: Mutex<Vec<TaskInsert>>,
    missions: Mutex<Vec<MissionInsert>>,
    gallery: Mutex<Vec<GalleryItemInsert>>,
    employees: Mutex<Vec<EmployeeInsert>>,
    people_notes: Mutex<Vec<PeopleNoteInsert>>,
    deleted_gallery_ids: Mutex<Vec<String>>,
    /// Tag names already present remote-side; creating one again is
    /// rejected as a duplicate.
    existing_tag_names: Mutex<HashSet<String>>,
    fail_task_tags: bool,
    fail_gallery_tags: bool,
    next_id: AtomicU64,
}

impl MockRemote {
    fn new() -> Self {
        Self::default()
    }

    fn log(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }

    fn fresh_id(&self) -> String {
        format!("id-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn duplicate_rejection() -> OnboardError {
        OnboardError::Rejected {
            kind: RejectionKind::AlreadyExists,
            message: "This record already exists".to_string(),
        }
    }
}

#[async_trait]
impl RemoteStore for MockRemote {
    async fn create_tag(&self, input: &TagInsert) -> Result<CreatedRecord> {
        self.log(format!("create_tag:{}", input.name));
        let mut existing = self.existing_tag_names.lock().unwrap();
        if !existing.insert(input.name.clone()) {
            return Err(Self::duplicate_rejection());
        }
        self.tags.lock().unwrap().push(input.clone());
        Ok(CreatedRecord { id: self.fresh_id() })
    }

    async fn create_task(&self, input: &TaskInsert) -> Result<CreatedRecord> {
        self.log(format!("create_task:{}", input.title));
        self.tasks.lock().unwrap().push(input.clone());
        Ok(CreatedRecord { id: self.fresh_id() })
    }

    async fn add_task_tags(&self, task_id: &str, tags: &[String]) -> Result<()> {
        self.log(format!("add_task_tags:{}:{}", task_id, tags.join(",")));
        if self.fail_task_tags {
            return Err(OnboardError::Other("tag lookup failed".to_string()));
        }
        Ok(())
    }

    async fn create_mission(
        &self,
        input: &MissionInsert,
        _requirements: &[RequirementInsert],
    ) -> Result<CreatedRecord> {
        self.log(format!("create_mission:{}", input.title));
        self.missions.lock().unwrap().push(input.clone());
        Ok(CreatedRecord { id: self.fresh_id() })
    }

    async fn create_gallery_item(&self, input: &GalleryItemInsert) -> Result<CreatedRecord> {
        self.log(format!("create_gallery_item:{}", input.title));
        self.gallery.lock().unwrap().push(input.clone());
        Ok(CreatedRecord { id: self.fresh_id() })
    }

    async fn add_gallery_tags(&self, item_id: &str, tags: &[String]) -> Result<()> {
        self.log(format!("add_gallery_tags:{}:{}", item_id, tags.join(",")));
        if self.fail_gallery_tags {
            return Err(OnboardError::Other("tag lookup failed".to_string()));
        }
        Ok(())
    }

    async fn delete_gallery_item(&self, item_id: &str) -> Result<()> {
        self.log(format!("delete_gallery_item:{}", item_id));
        let mut items = self.gallery.lock().unwrap();
        // Ids are handed out sequentially per created row across all
        // families, so map the id back to the matching gallery row by
        // dropping the most recent item.
        items.pop();
        self.deleted_gallery_ids
            .lock()
            .unwrap()
            .push(item_id.to_string());
        Ok(())
    }

    async fn create_employee(&self, input: &EmployeeInsert) -> Result<CreatedRecord> {
        self.log(format!("create_employee:{}", input.full_name));
        self.employees.lock().unwrap().push(input.clone());
        Ok(CreatedRecord { id: self.fresh_id() })
    }

    async fn create_people_note(&self, input: &PeopleNoteInsert) -> Result<CreatedRecord> {
        self.log(format!("create_people_note:{}", input.name));
        self.people_notes.lock().unwrap().push(input.clone());
        Ok(CreatedRecord { id: self.fresh_id() })
    }
}

fn engine(store: InMemoryStore, remote: Arc<MockRemote>) -> MigrationEngine {
    MigrationEngine::new(Arc::new(store), remote)
}

#[tokio::test]
async fn test_empty_store_migrates_to_nothing() {
    let remote = Arc::new(MockRemote::new());
    let engine = engine(InMemoryStore::new(), remote.clone());

    let outcome = engine.migrate_all().await;

    assert!(outcome.success);
    assert_eq!(outcome.counts.tags, 0);
    assert_eq!(outcome.counts.tasks, 0);
    assert_eq!(outcome.counts.missions, 0);
    assert_eq!(outcome.counts.gallery_items, 0);
    assert_eq!(outcome.counts.employees, 0);
    assert_eq!(outcome.counts.people_notes, 0);
    assert!(outcome.errors.is_empty());
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn test_successful_run_writes_marker_and_closes_gate() {
    let store = InMemoryStore::new()
        .with_entry(
            StorageKeys::TAGS,
            r##"{"state":{"tags":[{"name":"IT","color":"#3b82f6"}]}}"##,
        )
        .with_entry(
            StorageKeys::TASKS,
            r##"{"state":{"tasks":[{"title":"Setup laptop","dueDate":"2024-03-01","tags":["IT"]}]}}"##,
        );
    let store = Arc::new(store);
    let remote = Arc::new(MockRemote::new());
    let engine = MigrationEngine::new(store.clone(), remote.clone());
    assert!(engine.needs_migration());

    let outcome = engine.migrate_all().await;

    assert!(outcome.success, "errors: {:?}", outcome.errors);
    assert_eq!(outcome.counts.tags, 1);
    assert_eq!(outcome.counts.tasks, 1);
    assert!(outcome.errors.is_empty());
    assert_eq!(
        store.read(MigrationConfig::VERSION_KEY).unwrap().as_deref(),
        Some("1")
    );
    assert!(!engine.needs_migration());

    // The created task carried the legacy fields through.
    let tasks = remote.tasks.lock().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Setup laptop");
    assert_eq!(tasks[0].due_date, "2024-03-01");
}

#[tokio::test]
async fn test_tags_created_before_tasks_and_gallery() {
    let store = InMemoryStore::new()
        .with_entry(
            StorageKeys::GALLERY,
            r##"{"state":{"items":[{"type":"photo","title":"Office","date":"2024-01-05"}]}}"##,
        )
        .with_entry(
            StorageKeys::TASKS,
            r##"{"state":{"tasks":[{"title":"Badge photo","dueDate":"2024-01-10"}]}}"##,
        )
        .with_entry(
            StorageKeys::TAGS,
            r##"{"state":{"tags":[{"name":"Onboarding","color":"#10b981"}]}}"##,
        );
    let remote = Arc::new(MockRemote::new());
    let outcome = engine(store, remote.clone()).migrate_all().await;

    assert!(outcome.success);
    let calls = remote.calls();
    let tag_pos = calls.iter().position(|c| c.starts_with("create_tag")).unwrap();
    let task_pos = calls.iter().position(|c| c.starts_with("create_task")).unwrap();
    let item_pos = calls
        .iter()
        .position(|c| c.starts_with("create_gallery_item"))
        .unwrap();
    assert!(tag_pos < task_pos);
    assert!(task_pos < item_pos);
}

#[tokio::test]
async fn test_duplicate_tag_is_skipped_without_error() {
    let store = InMemoryStore::new().with_entry(
        StorageKeys::TAGS,
        r##"{"state":{"tags":[
            {"name":"IT","color":"#3b82f6"},
            {"name":"IT","color":"#ef4444"},
            {"name":"HR","color":"#10b981"}
        ]}}"##,
    );
    let remote = Arc::new(MockRemote::new());
    let outcome = engine(store, remote.clone()).migrate_all().await;

    assert!(outcome.success);
    assert_eq!(outcome.counts.tags, 2);
    assert!(outcome.errors.is_empty());
    // All three were attempted; only two stuck.
    assert_eq!(
        remote
            .calls()
            .iter()
            .filter(|c| c.starts_with("create_tag"))
            .count(),
        3
    );
    assert_eq!(remote.tags.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_record_failure_does_not_abort_family() {
    // Second task has no dueDate and fails a required field.
    let store = InMemoryStore::new().with_entry(
        StorageKeys::TASKS,
        r##"{"state":{"tasks":[
            {"title":"First","dueDate":"2024-02-01"},
            {"title":"Broken"},
            {"title":"Third","dueDate":"2024-02-03"}
        ]}}"##,
    );
    let store = Arc::new(store);
    let remote = Arc::new(MockRemote::new());
    let engine = MigrationEngine::new(store.clone(), remote.clone());

    let outcome = engine.migrate_all().await;

    assert!(!outcome.success);
    assert_eq!(outcome.counts.tasks, 2);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("Task \"Broken\":"));
    // The record after the failure was still attempted.
    assert!(remote.calls().contains(&"create_task:Third".to_string()));
    // Marker withheld on a dirty run, so it stays offerable.
    assert!(store.read(MigrationConfig::VERSION_KEY).unwrap().is_none());
    assert!(engine.needs_migration());
}

#[tokio::test]
async fn test_gallery_tag_failure_rolls_back_item() {
    let store = InMemoryStore::new().with_entry(
        StorageKeys::GALLERY,
        r##"{"state":{"items":[
            {"type":"photo","title":"Team lunch","date":"2024-04-01","tags":["Social"]}
        ]}}"##,
    );
    let remote = Arc::new(MockRemote {
        fail_gallery_tags: true,
        ..MockRemote::default()
    });
    let outcome = engine(store, remote.clone()).migrate_all().await;

    assert!(!outcome.success);
    assert_eq!(outcome.counts.gallery_items, 0);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("Gallery item \"Team lunch\":"));
    // Compensating delete removed the dangling item.
    assert_eq!(remote.deleted_gallery_ids.lock().unwrap().len(), 1);
    assert!(remote.gallery.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_task_tag_failure_still_counts_task() {
    let store = InMemoryStore::new().with_entry(
        StorageKeys::TASKS,
        r##"{"state":{"tasks":[{"title":"Order desk","dueDate":"2024-05-01","tags":["Facilities"]}]}}"##,
    );
    let remote = Arc::new(MockRemote {
        fail_task_tags: true,
        ..MockRemote::default()
    });
    let outcome = engine(store, remote.clone()).migrate_all().await;

    // Unlike gallery items, a task survives a failed tag attach.
    assert!(outcome.success);
    assert_eq!(outcome.counts.tasks, 1);
    assert!(outcome.errors.is_empty());
    assert_eq!(remote.tasks.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_family_does_not_block_others() {
    let store = InMemoryStore::new()
        .with_entry(StorageKeys::MISSIONS, "{{{definitely not json")
        .with_entry(
            StorageKeys::EMPLOYEES,
            r##"{"state":{"employees":[{
                "fullName":"Dana Smith",
                "startDate":"2024-06-01",
                "position":"Engineer",
                "department":"IT",
                "workArrangement":"remote",
                "contact":{"email":"dana@example.com"}
            }]}}"##,
        );
    let remote = Arc::new(MockRemote::new());
    let outcome = engine(store, remote.clone()).migrate_all().await;

    assert!(outcome.success);
    assert_eq!(outcome.counts.missions, 0);
    assert_eq!(outcome.counts.employees, 1);
    let employees = remote.employees.lock().unwrap();
    assert_eq!(employees[0].full_name, "Dana Smith");
}

#[tokio::test]
async fn test_all_six_families_in_one_run() {
    let store = InMemoryStore::new()
        .with_entry(
            StorageKeys::TAGS,
            r##"{"state":{"tags":[{"name":"IT","color":"#3b82f6"}]}}"##,
        )
        .with_entry(
            StorageKeys::TASKS,
            r##"{"state":{"tasks":[{"title":"Setup laptop","dueDate":"2024-03-01"}]}}"##,
        )
        .with_entry(
            StorageKeys::MISSIONS,
            r##"{"state":{"missions":[{
                "title":"First week",
                "requirements":[{"tag":"IT","count":3}]
            }]}}"##,
        )
        .with_entry(
            StorageKeys::GALLERY,
            r##"{"state":{"items":[{"type":"note","title":"Welcome","date":"2024-03-02"}]}}"##,
        )
        .with_entry(
            StorageKeys::EMPLOYEES,
            r##"{"state":{"employees":[{
                "fullName":"Robin Yu",
                "startDate":"2024-03-04",
                "position":"Analyst",
                "department":"Finance",
                "workArrangement":"hybrid",
                "contact":{}
            }]}}"##,
        )
        .with_entry(
            StorageKeys::PEOPLE_NOTES,
            r##"{"state":{"people":[{"name":"Sam Lee","role":"Buddy","department":"IT"}]}}"##,
        );
    let remote = Arc::new(MockRemote::new());
    let outcome = engine(store, remote.clone()).migrate_all().await;

    assert!(outcome.success, "errors: {:?}", outcome.errors);
    assert_eq!(outcome.counts.tags, 1);
    assert_eq!(outcome.counts.tasks, 1);
    assert_eq!(outcome.counts.missions, 1);
    assert_eq!(outcome.counts.gallery_items, 1);
    assert_eq!(outcome.counts.employees, 1);
    assert_eq!(outcome.counts.people_notes, 1);
    assert_eq!(remote.people_notes.lock().unwrap()[0].name, "Sam Lee");
}

#[tokio::test]
async fn test_skip_then_migrate_is_a_no_op() {
    let raw = r##"{"state":{"tags":[{"name":"IT","color":"#3b82f6"}]}}"##;
    let store = Arc::new(InMemoryStore::new().with_entry(StorageKeys::TAGS, raw));
    let remote = Arc::new(MockRemote::new());
    let engine = MigrationEngine::new(store.clone(), remote.clone());

    engine.skip().unwrap();

    assert!(!engine.needs_migration());
    // Legacy data is left byte-for-byte intact.
    assert_eq!(store.read(StorageKeys::TAGS).unwrap().as_deref(), Some(raw));
}
