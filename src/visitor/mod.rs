//! Visitor registry
//!
//! An append-only, capacity-bounded log of visitor names kept in durable
//! storage. The stored value is a JSON array ordered oldest to newest:
//! `[{"name": "Asha Rao", "time": "2026-10-17T09:34:05.120Z"}]`

pub mod display;
pub mod prompt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use display::VisitorCard;
pub use prompt::{PromptExit, SessionGate, VisitorPrompt};

use crate::config::VisitorsConfig;
use crate::error::StorageError;
use crate::storage::{KeyValueStore, VISITORS_KEY};

static CONTROL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Cc}+").unwrap());

/// One registration record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorEntry {
    pub name: String,
    #[serde(rename = "time")]
    pub registered_at: DateTime<Utc>,
}

impl VisitorEntry {
    pub fn new(name: impl Into<String>, registered_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            registered_at,
        }
    }
}

/// Parse a stored visitor list
pub fn decode(raw: &str) -> Result<Vec<VisitorEntry>, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::corrupt(VISITORS_KEY, e))
}

/// Serialize a visitor list for storage
pub fn encode(entries: &[VisitorEntry]) -> Result<String, StorageError> {
    serde_json::to_string(entries).map_err(|e| StorageError::corrupt(VISITORS_KEY, e))
}

/// Registration policy over a durable store
#[derive(Debug, Clone)]
pub struct VisitorRegistry {
    capacity: usize,
    placeholder: String,
    max_name_len: usize,
}

impl VisitorRegistry {
    pub fn new(config: &VisitorsConfig) -> Self {
        Self {
            capacity: config.capacity.max(1),
            placeholder: config.placeholder.clone(),
            max_name_len: config.max_name_len.max(1),
        }
    }

    /// Register a visitor now; `None` or a blank name records the placeholder
    pub fn register(&self, store: &mut dyn KeyValueStore, name: Option<&str>) -> VisitorEntry {
        self.register_at(store, name, Utc::now())
    }

    pub fn register_at(
        &self,
        store: &mut dyn KeyValueStore,
        name: Option<&str>,
        at: DateTime<Utc>,
    ) -> VisitorEntry {
        let name = name
            .map(|n| self.sanitize(n))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.placeholder.clone());
        let entry = VisitorEntry::new(name, at);

        let mut entries = self.list(store);
        entries.push(entry.clone());
        if entries.len() > self.capacity {
            let excess = entries.len() - self.capacity;
            entries.drain(..excess);
        }

        match encode(&entries).and_then(|json| store.set(VISITORS_KEY, &json)) {
            Ok(()) => log::info!("Registered visitor '{}' ({} stored)", entry.name, entries.len()),
            Err(e) => log::warn!("Failed to persist visitor '{}': {}", entry.name, e),
        }

        entry
    }

    /// All stored entries, oldest first; unreadable storage reads as empty
    pub fn list(&self, store: &dyn KeyValueStore) -> Vec<VisitorEntry> {
        let raw = match store.get(VISITORS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Visitor log unavailable: {}", e);
                return Vec::new();
            }
        };

        decode(&raw).unwrap_or_else(|e| {
            log::warn!("Discarding visitor log: {}", e);
            Vec::new()
        })
    }

    /// Up to `limit` entries, newest first
    pub fn recent(&self, store: &dyn KeyValueStore, limit: usize) -> Vec<VisitorEntry> {
        self.list(store).into_iter().rev().take(limit).collect()
    }

    pub fn count(&self, store: &dyn KeyValueStore) -> usize {
        self.list(store).len()
    }

    fn sanitize(&self, name: &str) -> String {
        let cleaned = CONTROL_CHARS.replace_all(name, " ");
        cleaned.trim().chars().take(self.max_name_len).collect::<String>().trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn registry() -> VisitorRegistry {
        VisitorRegistry::new(&VisitorsConfig::default())
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap()
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::unavailable(key, std::io::Error::other("quota exceeded")))
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::unavailable(key, std::io::Error::other("quota exceeded")))
        }
    }

    #[test]
    fn test_register_first_visitor() {
        let mut store = MemoryStore::new();
        let reg = registry();
        reg.register(&mut store, Some("Asha Rao"));
        assert_eq!(reg.count(&store), 1);
        assert_eq!(reg.list(&store)[0].name, "Asha Rao");
    }

    #[test]
    fn test_register_trims_name() {
        let mut store = MemoryStore::new();
        let entry = registry().register(&mut store, Some("   Ravi  "));
        assert_eq!(entry.name, "Ravi");
    }

    #[test]
    fn test_empty_and_skip_record_placeholder() {
        let mut store = MemoryStore::new();
        let reg = registry();
        reg.register(&mut store, Some(""));
        reg.register(&mut store, Some("    "));
        reg.register(&mut store, None);
        let names: Vec<String> = reg.list(&store).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Anonymous Visitor"; 3]);
    }

    #[test]
    fn test_strips_control_characters() {
        let mut store = MemoryStore::new();
        let entry = registry().register(&mut store, Some("\x1b[31mMallory\x07"));
        assert!(!entry.name.chars().any(|c| c.is_control()));
        assert!(entry.name.contains("Mallory"));
    }

    #[test]
    fn test_truncates_long_names() {
        let mut store = MemoryStore::new();
        let config = VisitorsConfig {
            max_name_len: 5,
            ..VisitorsConfig::default()
        };
        let entry = VisitorRegistry::new(&config).register(&mut store, Some("Bartholomew"));
        assert_eq!(entry.name, "Barth");
    }

    #[test]
    fn test_cap_keeps_newest_fifty_in_order() {
        let mut store = MemoryStore::new();
        let reg = registry();
        for i in 1..=60 {
            reg.register_at(&mut store, Some(&format!("Visitor {}", i)), t0() + Duration::seconds(i));
        }

        let entries = reg.list(&store);
        assert_eq!(entries.len(), 50);
        let expected: Vec<String> = (11..=60).map(|i| format!("Visitor {}", i)).collect();
        let names: Vec<String> = entries.into_iter().map(|e| e.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut store = MemoryStore::new();
        let reg = registry();
        for name in ["a", "b", "c"] {
            reg.register_at(&mut store, Some(name), t0());
        }
        let names: Vec<String> = reg.recent(&store, 2).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["c", "b"]);
    }

    #[test]
    fn test_serialization_is_stable() {
        let mut store = MemoryStore::new();
        let reg = registry();
        reg.register_at(&mut store, Some("Asha Rao"), t0());
        reg.register_at(&mut store, None, t0() + Duration::milliseconds(1500));

        let stored = store.get(VISITORS_KEY).unwrap().unwrap();
        let reencoded = encode(&decode(&stored).unwrap()).unwrap();
        assert_eq!(stored, reencoded);
    }

    #[test]
    fn test_reads_browser_format() {
        let raw = r#"[{"name":"Asha Rao","time":"2026-10-17T09:34:05.120Z"}]"#;
        let entries = decode(raw).unwrap();
        assert_eq!(entries[0].name, "Asha Rao");
        assert_eq!(encode(&entries).unwrap(), raw);
    }

    #[test]
    fn test_corrupt_value_reads_as_empty() {
        let mut store = MemoryStore::new();
        store.set(VISITORS_KEY, "{oops").unwrap();
        let reg = registry();
        assert!(reg.list(&store).is_empty());

        reg.register(&mut store, Some("Asha Rao"));
        assert_eq!(reg.count(&store), 1);
    }

    #[test]
    fn test_unavailable_storage_degrades() {
        let mut store = BrokenStore;
        let reg = registry();
        let entry = reg.register(&mut store, Some("Asha Rao"));
        assert_eq!(entry.name, "Asha Rao");
        assert_eq!(reg.count(&store), 0);
    }
}
