//! Domain model that mirrors the `items` table and gets passed between the
//! store and the terminal UI. The type stays a light-weight data holder; the
//! only behavior it owns is the search predicate, so every backend agrees on
//! what "matches" means.

use chrono::{DateTime, Utc};

/// Timestamp layout used by the `Created` column. It matches what SQLite's
/// `CURRENT_TIMESTAMP` writes, so the table shows the stored value verbatim.
pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single stored item.
pub struct Record {
    /// Primary key assigned by the store. Never reused, even across restarts.
    pub id: i64,
    /// Title as typed by the user. The store accepts an empty title.
    pub title: String,
    /// Free text; empty when the user left it blank.
    pub description: String,
    /// One opaque string (for example `fiction,drama`), never split.
    pub tags: String,
    /// Set once at insertion by the storage default and never updated.
    pub created_at: DateTime<Utc>,
}

impl Record {
    /// Case-insensitive raw substring test against title, description, and
    /// tags. An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.title, &self.description, &self.tags]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Creation time rendered for the table.
    pub fn created_display(&self) -> String {
        self.created_at.format(CREATED_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record(title: &str, description: &str, tags: &str) -> Record {
        Record {
            id: 1,
            title: title.to_string(),
            description: description.to_string(),
            tags: tags.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap(),
        }
    }

    #[test]
    fn matches_any_field_ignoring_case() {
        let book = record("Book", "A novel", "fiction,drama");

        assert!(book.matches("BOOK"));
        assert!(book.matches("novel"));
        assert!(book.matches("Drama"));
        assert!(book.matches("n,d"));
        assert!(!book.matches("guide"));
    }

    #[test]
    fn empty_term_matches_everything() {
        assert!(record("", "", "").matches(""));
    }

    #[test]
    fn matching_is_not_tokenized() {
        let manual = record("Manual", "Tech guide", "reference");

        assert!(manual.matches("h gu"));
        assert!(!manual.matches("tech reference"));
    }

    #[test]
    fn unicode_lowercasing_applies_to_both_sides() {
        let cafe = record("CAFÉ ÖL", "", "");

        assert!(cafe.matches("café"));
        assert!(cafe.matches("öl"));
    }

    #[test]
    fn created_display_uses_sqlite_layout() {
        let book = record("Book", "", "");
        assert_eq!(book.created_display(), "2024-03-09 14:05:00");
    }
}
