//! Durable key-value storage.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Key names as constants.
pub mod keys {
    /// Serialized workout collection
    pub const WORKOUTS: &str = "workouts";
}

/// String-keyed store with whole-value replace semantics.
///
/// Methods take `&self`; implementations use interior mutability.
pub trait KeyValueStore {
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Returns `Ok(())` even if the key did not exist.
    fn remove(&self, key: &str) -> Result<()>;
}
