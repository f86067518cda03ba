//! The six per-family migrators.
//!
//! Shared contract: read the family's legacy collection (absent or
//! malformed storage means zero records), transform and submit records one
//! at a time, and fold each failure into a human-readable error string
//! instead of aborting. Count only records that made it into the remote
//! store.

use super::transform::{
    transform_employee, transform_gallery_item, transform_mission, transform_people_note,
    transform_tag, transform_task,
};
use super::{FamilyReport, MigrationEngine};
use crate::config::StorageKeys;
use crate::error::RejectionKind;
use serde_json::Value;
use tracing::{debug, warn};

/// Best-effort display name for a record, for error strings. Works on the
/// raw value so even records that fail transform are identifiable.
fn record_name(record: &Value, field: &str) -> String {
    record
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string()
}

impl MigrationEngine {
    /// Parse one legacy blob and pull out its record array.
    ///
    /// Absence and malformed JSON both yield an empty collection: corrupt
    /// data for one family must never block migration of the others.
    fn read_collection(&self, key: &str, collection: &str) -> Vec<Value> {
        let raw = match self.store.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read legacy key {}: {}", key, e);
                return Vec::new();
            }
        };

        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Malformed legacy data under {}: {}", key, e);
                return Vec::new();
            }
        };

        parsed
            .get("state")
            .and_then(|state| state.get(collection))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) async fn migrate_tags(&self) -> FamilyReport {
        let records = self.read_collection(StorageKeys::TAGS, "tags");
        let mut report = FamilyReport::default();

        for record in &records {
            let name = record_name(record, "name");
            let input = match transform_tag(record) {
                Ok(input) => input,
                Err(e) => {
                    report.errors.push(format!("Tag \"{}\": {}", name, e));
                    continue;
                }
            };
            match self.remote.create_tag(&input).await {
                Ok(_) => report.count += 1,
                // Per-owner tag names are unique remote-side; resubmitting
                // an existing tag is a benign duplicate, not a failure.
                Err(e) if e.rejection_kind() == Some(RejectionKind::AlreadyExists) => {
                    debug!("Tag \"{}\" already exists, skipping", name);
                }
                Err(e) => report.errors.push(format!("Tag \"{}\": {}", name, e)),
            }
        }
        report
    }

    pub(crate) async fn migrate_tasks(&self) -> FamilyReport {
        let records = self.read_collection(StorageKeys::TASKS, "tasks");
        let mut report = FamilyReport::default();

        for record in &records {
            let title = record_name(record, "title");
            let (input, tags) = match transform_task(record) {
                Ok(parts) => parts,
                Err(e) => {
                    report.errors.push(format!("Task \"{}\": {}", title, e));
                    continue;
                }
            };
            match self.remote.create_task(&input).await {
                Ok(created) => {
                    if !tags.is_empty() {
                        // The task itself exists; a failed tag attach is
                        // logged but does not demote it to an error.
                        if let Err(e) = self.remote.add_task_tags(&created.id, &tags).await {
                            warn!("Task \"{}\": failed to attach tags: {}", title, e);
                        }
                    }
                    report.count += 1;
                }
                Err(e) => report.errors.push(format!("Task \"{}\": {}", title, e)),
            }
        }
        report
    }

    pub(crate) async fn migrate_missions(&self) -> FamilyReport {
        let records = self.read_collection(StorageKeys::MISSIONS, "missions");
        let mut report = FamilyReport::default();

        for record in &records {
            let title = record_name(record, "title");
            let (input, requirements) = match transform_mission(record) {
                Ok(parts) => parts,
                Err(e) => {
                    report.errors.push(format!("Mission \"{}\": {}", title, e));
                    continue;
                }
            };
            match self.remote.create_mission(&input, &requirements).await {
                Ok(_) => report.count += 1,
                Err(e) => report.errors.push(format!("Mission \"{}\": {}", title, e)),
            }
        }
        report
    }

    pub(crate) async fn migrate_gallery(&self) -> FamilyReport {
        let records = self.read_collection(StorageKeys::GALLERY, "items");
        let mut report = FamilyReport::default();

        for record in &records {
            let title = record_name(record, "title");
            let (input, tags) = match transform_gallery_item(record) {
                Ok(parts) => parts,
                Err(e) => {
                    report
                        .errors
                        .push(format!("Gallery item \"{}\": {}", title, e));
                    continue;
                }
            };
            match self.remote.create_gallery_item(&input).await {
                Ok(created) => {
                    if tags.is_empty() {
                        report.count += 1;
                        continue;
                    }
                    match self.remote.add_gallery_tags(&created.id, &tags).await {
                        Ok(()) => report.count += 1,
                        Err(e) => {
                            // Compensate: an item whose tags silently failed
                            // to attach must not survive untagged.
                            warn!(
                                "Gallery item \"{}\": tag attach failed, rolling back item {}",
                                title, created.id
                            );
                            if let Err(del) =
                                self.remote.delete_gallery_item(&created.id).await
                            {
                                warn!(
                                    "Rollback delete failed for gallery item {}: {}",
                                    created.id, del
                                );
                            }
                            report
                                .errors
                                .push(format!("Gallery item \"{}\": {}", title, e));
                        }
                    }
                }
                Err(e) => report
                    .errors
                    .push(format!("Gallery item \"{}\": {}", title, e)),
            }
        }
        report
    }

    pub(crate) async fn migrate_employees(&self) -> FamilyReport {
        let records = self.read_collection(StorageKeys::EMPLOYEES, "employees");
        let mut report = FamilyReport::default();

        for record in &records {
            let name = record_name(record, "fullName");
            let input = match transform_employee(record) {
                Ok(input) => input,
                Err(e) => {
                    report.errors.push(format!("Employee \"{}\": {}", name, e));
                    continue;
                }
            };
            match self.remote.create_employee(&input).await {
                Ok(_) => report.count += 1,
                Err(e) => report.errors.push(format!("Employee \"{}\": {}", name, e)),
            }
        }
        report
    }

    pub(crate) async fn migrate_people_notes(&self) -> FamilyReport {
        let records = self.read_collection(StorageKeys::PEOPLE_NOTES, "people");
        let mut report = FamilyReport::default();

        for record in &records {
            let name = record_name(record, "name");
            let input = match transform_people_note(record) {
                Ok(input) => input,
                Err(e) => {
                    report.errors.push(format!("Person \"{}\": {}", name, e));
                    continue;
                }
            };
            match self.remote.create_people_note(&input).await {
                Ok(_) => report.count += 1,
                Err(e) => report.errors.push(format!("Person \"{}\": {}", name, e)),
            }
        }
        report
    }
}
