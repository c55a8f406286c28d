//! Persistence Adapter Module
//!
//! The identity manager never touches the underlying storage directly. It
//! goes through two layers kept deliberately thin:
//! - [`KeyValueStore`]: the substrate port, holding opaque strings by key
//! - [`StorageAdapter`]: typed JSON serialization on top of the port
//!
//! Two substrate bindings ship with the crate: [`MemoryStore`] for
//! development and testing, and [`FileStore`] for durable local storage.

pub mod adapter;
pub mod file;
pub mod memory;

pub use adapter::StorageAdapter;
pub use file::FileStore;
pub use memory::MemoryStore;

use hms_core::HmsResult;

/// Key-value storage port
///
/// Implementations store opaque string values by key. An absent key reads as
/// `None`, `set` overwrites unconditionally, and `remove` of a missing key
/// succeeds.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> HmsResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> HmsResult<()>;

    /// Delete the value under `key`, if any
    fn remove(&self, key: &str) -> HmsResult<()>;
}
