//! Client-local key-value storage.
//!
//! The engine never assumes a browser-style localStorage; it works against
//! the [`LocalStore`] trait so the marker and legacy blobs can live in
//! files in production and in memory under test.

mod file;
mod memory;
mod traits;

pub use file::FileStore;
pub use memory::InMemoryStore;
pub use traits::LocalStore;
