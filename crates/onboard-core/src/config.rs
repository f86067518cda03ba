//! Centralized configuration for the Onboard engine.
//!
//! Storage key names, the migration version constant, and network
//! parameters live here so the engine and the remote client agree on them.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Migration versioning.
pub struct MigrationConfig;

impl MigrationConfig {
    /// Local key holding the applied-migration marker.
    pub const VERSION_KEY: &'static str = "data-migration-version";
    /// Version this engine writes after a clean run (stored as a string).
    pub const CURRENT_VERSION: u32 = 1;
}

/// Local storage keys for the legacy per-family blobs.
pub struct StorageKeys;

impl StorageKeys {
    pub const TAGS: &'static str = "onboard-buddy-tags";
    pub const TASKS: &'static str = "onboard-buddy-tasks";
    pub const MISSIONS: &'static str = "onboard-buddy-missions";
    pub const GALLERY: &'static str = "onboard-buddy-gallery";
    pub const EMPLOYEES: &'static str = "onboard-buddy-employees";
    pub const PEOPLE_NOTES: &'static str = "people-notes-storage";

    /// All legacy keys, in migration order.
    pub const ALL: [&'static str; 6] = [
        Self::TAGS,
        Self::TASKS,
        Self::MISSIONS,
        Self::GALLERY,
        Self::EMPLOYEES,
        Self::PEOPLE_NOTES,
    ];
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
    pub const REST_PATH: &'static str = "rest/v1";
    pub const USER_AGENT: &'static str = "onboard-core/0.1";
}

/// Runtime configuration for the Supabase remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://xyzcompany.supabase.co`.
    pub base_url: Url,
    /// Project anon/public API key, sent with every request.
    pub anon_key: String,
}
