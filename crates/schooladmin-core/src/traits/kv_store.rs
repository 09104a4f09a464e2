//! Durable key-value store trait backing the client session.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for the persisted string store that survives restarts.
///
/// Values are opaque strings; callers own their serialization.
/// Implementations must make `remove_many` appear atomic to the caller.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, overwriting any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Delete several keys in one step.
    async fn remove_many(&self, keys: &[&str]) -> AppResult<()>;
}
