//! Local storage backend trait.

use crate::error::Result;

/// String key-value storage on the client.
///
/// Holds the six legacy per-family blobs and the migration version marker.
/// All operations are synchronous; the stored values are opaque strings
/// (the legacy blobs happen to be JSON, but the store does not care).
pub trait LocalStore: Send + Sync {
    /// Read the value for a key.
    ///
    /// Returns `None` if the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, overwriting any existing entry.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
