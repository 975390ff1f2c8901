//! Rhyme lookup against a static suffix table.
//!
//! The table is built once at startup (built-in groups or a JSON file) and is
//! read-only afterwards. Lookup picks the first entry, in table order, whose
//! suffix the query word ends with; it does not search for the longest match.

pub mod table;

pub use table::{RhymeGroup, BUILTIN_GROUPS};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AppError;

/// Error type for rhyme table construction
#[derive(Debug, thiserror::Error)]
pub enum RhymeTableError {
    #[error("Failed to read rhyme table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rhyme table JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rhyme table entry {index} has an empty suffix")]
    EmptySuffix { index: usize },
}

impl From<RhymeTableError> for AppError {
    fn from(err: RhymeTableError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// One table entry as it appears in a JSON table file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RhymeEntry {
    pub suffix: String,
    pub words: Vec<String>,
}

/// Immutable, ordered suffix -> rhymes mapping
#[derive(Debug, Clone)]
pub struct RhymeTable {
    entries: Vec<RhymeEntry>,
    fallback: Vec<String>,
}

impl Default for RhymeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RhymeTable {
    /// Build a table from entries, normalizing case. Empty suffixes are rejected
    /// because they would match every word.
    pub fn new(entries: Vec<RhymeEntry>) -> Result<Self, RhymeTableError> {
        let entries = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let suffix = entry.suffix.trim().to_lowercase();
                if suffix.is_empty() {
                    return Err(RhymeTableError::EmptySuffix { index });
                }
                let words = entry
                    .words
                    .iter()
                    .map(|w| w.trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect();
                Ok(RhymeEntry { suffix, words })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            entries,
            fallback: Vec::new(),
        })
    }

    /// The compiled-in table
    pub fn builtin() -> Self {
        let entries = BUILTIN_GROUPS
            .iter()
            .map(|g| RhymeEntry {
                suffix: g.suffix.to_string(),
                words: g.words.iter().map(|w| w.to_string()).collect(),
            })
            .collect();

        Self {
            entries,
            fallback: Vec::new(),
        }
    }

    /// Load a table from a JSON array of `{ "suffix": ..., "words": [...] }`
    pub fn from_json_file(path: &Path) -> Result<Self, RhymeTableError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RhymeTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RhymeTableError> {
        let entries: Vec<RhymeEntry> = serde_json::from_str(raw)?;
        Self::new(entries)
    }

    /// Words returned when no suffix matches
    pub fn with_fallback(mut self, fallback: Vec<String>) -> Self {
        self.fallback = fallback
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        self
    }

    pub fn entries(&self) -> &[RhymeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the first entry whose suffix `word` ends with
    pub fn matching_entry(&self, word: &str) -> Option<&RhymeEntry> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return None;
        }
        self.entries.iter().find(|e| word.ends_with(&e.suffix))
    }

    /// Candidate rhymes for `word`, never including the word itself.
    ///
    /// Returns the fallback list (empty unless configured) when nothing matches.
    pub fn rhymes(&self, word: &str) -> Vec<String> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Vec::new();
        }

        let candidates = self
            .matching_entry(&word)
            .map(|e| &e.words)
            .unwrap_or(&self.fallback);

        candidates.iter().filter(|w| **w != word).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_rhymes() {
        let table = RhymeTable::builtin();
        let rhymes = table.rhymes("night");

        for expected in ["light", "right", "sight", "bright", "fight", "tight", "might"] {
            assert!(rhymes.contains(&expected.to_string()), "missing {expected}");
        }
        assert!(!rhymes.contains(&"night".to_string()));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = RhymeTable::builtin();
        let rhymes = table.rhymes("  NIGHT ");
        assert!(rhymes.contains(&"light".to_string()));
        assert!(!rhymes.contains(&"night".to_string()));
    }

    #[test]
    fn test_rhymes_come_from_matched_entry_only() {
        let table = RhymeTable::builtin();
        for entry in table.entries() {
            for word in &entry.words {
                let rhymes = table.rhymes(word);
                let matched = table.matching_entry(word).unwrap();
                assert!(!rhymes.contains(word), "{word} rhymed with itself");
                for rhyme in &rhymes {
                    assert!(matched.words.contains(rhyme), "{rhyme} not in {}", matched.suffix);
                }
            }
        }
    }

    #[test]
    fn test_unknown_word_returns_empty() {
        let table = RhymeTable::builtin();
        assert!(table.rhymes("xylophonez").is_empty());
    }

    #[test]
    fn test_short_and_empty_words_do_not_panic() {
        let table = RhymeTable::builtin();
        assert!(table.rhymes("").is_empty());
        assert!(table.rhymes("   ").is_empty());
        assert!(table.rhymes("i").is_empty());
        assert!(table.rhymes("ü").is_empty());
    }

    #[test]
    fn test_word_not_in_list_still_gets_full_group() {
        let table = RhymeTable::builtin();
        let rhymes = table.rhymes("midnight");
        assert_eq!(rhymes.len(), table::IGHT.words.len());
    }

    #[test]
    fn test_first_match_wins_over_longest() {
        let table = RhymeTable::new(vec![
            RhymeEntry {
                suffix: "t".into(),
                words: vec!["cat".into(), "hat".into()],
            },
            RhymeEntry {
                suffix: "ight".into(),
                words: vec!["light".into()],
            },
        ])
        .unwrap();

        assert_eq!(table.rhymes("night"), vec!["cat", "hat"]);
    }

    #[test]
    fn test_fallback_policy() {
        let table = RhymeTable::builtin()
            .with_fallback(vec!["beat".into(), "Street".into(), "heat".into()]);

        assert_eq!(table.rhymes("zzz"), vec!["beat", "street", "heat"]);

        let table = RhymeTable::builtin().with_fallback(vec!["zed".into(), "bop".into()]);
        assert_eq!(table.rhymes("BOP"), vec!["zed"]);
    }

    #[test]
    fn test_new_rejects_empty_suffix() {
        let err = RhymeTable::new(vec![RhymeEntry {
            suffix: "  ".into(),
            words: vec!["x".into()],
        }])
        .unwrap_err();
        assert!(matches!(err, RhymeTableError::EmptySuffix { index: 0 }));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rhymes.json");
        std::fs::write(
            &path,
            r#"[{"suffix": "OOL", "words": ["Cool", "pool", "school"]}]"#,
        )
        .unwrap();

        let table = RhymeTable::from_json_file(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rhymes("fool"), vec!["cool", "pool", "school"]);
        assert_eq!(table.rhymes("school"), vec!["cool", "pool"]);
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = RhymeTable::from_json_file(Path::new("/nonexistent/rhymes.json")).unwrap_err();
        assert!(matches!(err, RhymeTableError::Io { .. }));
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(matches!(
            RhymeTable::from_json_str("{not json").unwrap_err(),
            RhymeTableError::Parse(_)
        ));
    }
}
