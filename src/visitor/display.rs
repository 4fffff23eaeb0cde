//! Read-only presentation of visitor entries

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::VisitorEntry;

/// Up to two upper-case initials, one per whitespace-separated word
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(|c| c.to_uppercase())
        .take(2)
        .collect()
}

/// Relative age of `then` as seen from `now`
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 2_592_000 => format!("{}d ago", s / 86_400),
        _ => then.format("%-d %b").to_string(),
    }
}

/// Display form of one visitor entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitorCard {
    pub initials: String,
    pub name: String,
    pub time_ago: String,
    pub registered_at: DateTime<Utc>,
}

impl VisitorCard {
    pub fn from_entry(entry: &VisitorEntry, now: DateTime<Utc>) -> Self {
        Self {
            initials: initials(&entry.name),
            name: entry.name.clone(),
            time_ago: time_ago(entry.registered_at, now),
            registered_at: entry.registered_at,
        }
    }
}
