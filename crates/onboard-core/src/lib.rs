//! Onboard Core - headless engine migrating legacy client data to the
//! remote store.
//!
//! The old client kept six families of records (tags, tasks, missions,
//! gallery items, employees, people notes) in loosely-typed local JSON
//! blobs. This crate detects that data, reshapes it to the remote schema,
//! submits it family by family in dependency order, and records a version
//! marker so the whole operation runs at most once per client.
//!
//! # Example
//!
//! ```rust,ignore
//! use onboard_core::{
//!     AuthSession, FileStore, MigrationEngine, SupabaseClient, SupabaseConfig,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> onboard_core::Result<()> {
//!     let store = Arc::new(FileStore::new("./client-data")?);
//!     let remote = Arc::new(SupabaseClient::new(SupabaseConfig {
//!         base_url: "https://myproject.supabase.co".parse().unwrap(),
//!         anon_key: std::env::var("SUPABASE_ANON_KEY").unwrap(),
//!     })?);
//!     remote.set_session(Some(AuthSession {
//!         access_token: "...".into(),
//!         user_id: "...".into(),
//!     }));
//!
//!     let engine = MigrationEngine::new(store, remote);
//!     if engine.needs_migration() {
//!         let outcome = engine.migrate_all().await;
//!         println!("migrated with success={}", outcome.success);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod migrate;
pub mod models;
pub mod remote;
pub mod storage;

// Re-export commonly used types
pub use config::{MigrationConfig, NetworkConfig, StorageKeys, SupabaseConfig};
pub use error::{OnboardError, RejectionKind, Result};
pub use migrate::{MigrationCounts, MigrationEngine, MigrationOutcome};
pub use remote::{AuthSession, CreatedRecord, RemoteStore, SupabaseClient};
pub use storage::{FileStore, InMemoryStore, LocalStore};
