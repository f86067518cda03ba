//! One-shot migration of legacy client data into the remote store.
//!
//! [`MigrationEngine`] is the entry point the presentation layer talks to:
//! it decides whether a migration should be offered, runs it family by
//! family in dependency order, and records the version marker when the run
//! is clean (or when the user opts out via [`MigrationEngine::skip`]).
//!
//! A run is deliberately sequential: tags are created first so tasks and
//! gallery items can re-attach them by name, and within a family records go
//! one at a time so a single owner's tag namespace never sees concurrent
//! writes. Idempotency comes from the gate + version marker pairing; the
//! orchestrator itself carries no re-entrancy guard, so callers must check
//! [`MigrationEngine::needs_migration`] before invoking a run.

mod families;
mod transform;

use crate::config::{MigrationConfig, StorageKeys};
use crate::models::legacy::LegacyRecordSet;
use crate::remote::RemoteStore;
use crate::storage::LocalStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-family success counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationCounts {
    pub tags: usize,
    pub tasks: usize,
    pub missions: usize,
    pub gallery_items: usize,
    pub employees: usize,
    pub people_notes: usize,
}

/// Aggregated result of one migration run.
///
/// Constructed fresh per run, reported to the caller, never persisted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationOutcome {
    /// True iff no error was recorded across all families.
    pub success: bool,
    pub counts: MigrationCounts,
    /// Human-readable per-record error strings, in migration order.
    pub errors: Vec<String>,
}

/// Count and errors for a single family's migration.
#[derive(Debug, Default)]
pub(crate) struct FamilyReport {
    pub count: usize,
    pub errors: Vec<String>,
}

/// Orchestrates the legacy-to-remote migration.
pub struct MigrationEngine {
    store: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteStore>,
}

impl MigrationEngine {
    pub fn new(store: Arc<dyn LocalStore>, remote: Arc<dyn RemoteStore>) -> Self {
        Self { store, remote }
    }

    /// Whether a migration should be offered.
    ///
    /// True only if the version marker is absent (or stale) and at least
    /// one legacy key holds a non-empty `state`. Never fails: storage or
    /// parse problems on a key count as "no data for that key".
    pub fn needs_migration(&self) -> bool {
        if self.migration_applied() {
            return false;
        }
        StorageKeys::ALL.iter().any(|key| self.has_legacy_data(key))
    }

    /// Run the full migration and report the outcome.
    ///
    /// Families run in fixed order — tags, tasks, missions, gallery items,
    /// employees, people notes — and every per-record failure is recorded
    /// without aborting the run. The version marker is written only when
    /// the combined error list is empty, so a partial-failure run stays
    /// re-runnable.
    pub async fn migrate_all(&self) -> MigrationOutcome {
        info!("Starting legacy data migration");
        let mut outcome = MigrationOutcome::default();

        let report = self.migrate_tags().await;
        outcome.counts.tags = report.count;
        outcome.errors.extend(report.errors);

        let report = self.migrate_tasks().await;
        outcome.counts.tasks = report.count;
        outcome.errors.extend(report.errors);

        let report = self.migrate_missions().await;
        outcome.counts.missions = report.count;
        outcome.errors.extend(report.errors);

        let report = self.migrate_gallery().await;
        outcome.counts.gallery_items = report.count;
        outcome.errors.extend(report.errors);

        let report = self.migrate_employees().await;
        outcome.counts.employees = report.count;
        outcome.errors.extend(report.errors);

        let report = self.migrate_people_notes().await;
        outcome.counts.people_notes = report.count;
        outcome.errors.extend(report.errors);

        outcome.success = outcome.errors.is_empty();
        if outcome.success {
            if let Err(e) = self.write_version_marker() {
                outcome.success = false;
                outcome.errors.push(format!("Migration failed: {}", e));
            }
        }

        info!(
            "Migration finished: success={}, migrated={}, errors={}",
            outcome.success,
            outcome.counts.tags
                + outcome.counts.tasks
                + outcome.counts.missions
                + outcome.counts.gallery_items
                + outcome.counts.employees
                + outcome.counts.people_notes,
            outcome.errors.len()
        );
        outcome
    }

    /// Opt out of migrating: set the version marker without touching the
    /// legacy data, permanently silencing the gate for this client.
    pub fn skip(&self) -> crate::Result<()> {
        info!("Migration skipped by user; writing version marker");
        self.write_version_marker()
    }

    /// Remove all six legacy keys. Explicit and user-confirmed upstream;
    /// never called from the migration path.
    pub fn clear_legacy_data(&self) -> crate::Result<()> {
        for key in StorageKeys::ALL {
            self.store.remove(key)?;
        }
        info!("Cleared legacy storage keys");
        Ok(())
    }

    fn migration_applied(&self) -> bool {
        match self.store.read(MigrationConfig::VERSION_KEY) {
            Ok(Some(version)) => version == MigrationConfig::CURRENT_VERSION.to_string(),
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read migration marker: {}", e);
                false
            }
        }
    }

    fn has_legacy_data(&self, key: &str) -> bool {
        let raw = match self.store.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                warn!("Failed to read legacy key {}: {}", key, e);
                return false;
            }
        };
        match serde_json::from_str::<LegacyRecordSet>(&raw) {
            Ok(set) => !set.state.is_empty(),
            Err(_) => false,
        }
    }

    fn write_version_marker(&self) -> crate::Result<()> {
        self.store.write(
            MigrationConfig::VERSION_KEY,
            &MigrationConfig::CURRENT_VERSION.to_string(),
        )?;
        debug!(
            "Version marker set to {}",
            MigrationConfig::CURRENT_VERSION
        );
        Ok(())
    }
}
