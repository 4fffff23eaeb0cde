//! Key/value storage collaborators
//!
//! The portfolio keeps two stores:
//! - durable: survives across runs (visitor log, theme preference)
//! - session: lives for a single shell run (the visitor prompt gate)

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// Durable key holding the serialized visitor list
pub const VISITORS_KEY: &str = "portfolio-visitors";
/// Durable key holding the theme preference
pub const THEME_KEY: &str = "portfolio-theme";
/// Session key holding the visitor prompt gate
pub const SESSION_GATE_KEY: &str = "visitor-registered";

/// String key/value storage with best-effort semantics
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
