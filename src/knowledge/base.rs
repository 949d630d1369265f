use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::knowledge::entry::{Entry, EntryError, RawEntry};
use crate::types::identifiers::{CategoryId, KnowledgeBaseVersion};

const BUILTIN_TABLE: &str = include_str!("../../data/knowledge_base.json");

#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Knowledge base declares no entries")]
    Empty,
    #[error("Invalid entry {category:?}: {source}")]
    InvalidEntry {
        category: String,
        #[source]
        source: EntryError,
    },
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),
    #[error("Keyword {keyword:?} is declared by both {first} and {second}")]
    SharedKeyword {
        keyword: String,
        first: CategoryId,
        second: CategoryId,
    },
}

#[derive(Debug, Deserialize)]
struct KnowledgeBaseFile {
    entries: Vec<RawEntry>,
}

/// Serializable summary of a loaded knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseManifest {
    pub version: KnowledgeBaseVersion,
    pub category_count: usize,
    pub keyword_count: usize,
    pub loaded_at: DateTime<Utc>, // informational only
}

/// Immutable, validated set of FAQ entries.
///
/// Entries keep their declared order; nothing here depends on it.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<Entry>,
    manifest: KnowledgeBaseManifest,
}

impl KnowledgeBase {
    /// The FAQ table shipped with the crate.
    pub fn builtin() -> Result<Self, KnowledgeBaseError> {
        Self::from_json(BUILTIN_TABLE)
    }

    pub fn from_json(json: &str) -> Result<Self, KnowledgeBaseError> {
        let file: KnowledgeBaseFile = serde_json::from_str(json)?;

        let entries = file
            .entries
            .into_iter()
            .map(|raw| {
                let category = raw.category.clone();
                raw.into_entry()
                    .map_err(|source| KnowledgeBaseError::InvalidEntry { category, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_entries(entries)
    }

    pub fn from_path(path: &Path) -> Result<Self, KnowledgeBaseError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build from already-validated entries, checking cross-entry invariants.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, KnowledgeBaseError> {
        if entries.is_empty() {
            return Err(KnowledgeBaseError::Empty);
        }

        let mut categories = BTreeSet::new();
        let mut owners: BTreeMap<&str, &CategoryId> = BTreeMap::new();

        for entry in &entries {
            if !categories.insert(entry.category()) {
                return Err(KnowledgeBaseError::DuplicateCategory(
                    entry.category().as_str().to_string(),
                ));
            }
            // Warm-cache keys must map to exactly one answer
            for keyword in entry.keywords() {
                if let Some(first) = owners.insert(keyword.text(), entry.category()) {
                    return Err(KnowledgeBaseError::SharedKeyword {
                        keyword: keyword.text().to_string(),
                        first: first.clone(),
                        second: entry.category().clone(),
                    });
                }
            }
        }

        let version = compute_version(&entries)?;
        let manifest = KnowledgeBaseManifest {
            version,
            category_count: entries.len(),
            keyword_count: owners.len(),
            loaded_at: Utc::now(),
        };

        info!(
            version = %manifest.version,
            categories = manifest.category_count,
            keywords = manifest.keyword_count,
            "loaded FAQ knowledge base"
        );

        Ok(KnowledgeBase { entries, manifest })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, category: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.category().as_str() == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn version(&self) -> &KnowledgeBaseVersion {
        &self.manifest.version
    }

    pub fn manifest(&self) -> &KnowledgeBaseManifest {
        &self.manifest
    }
}

/// Hash the entries sorted by category so declaration order does not matter.
fn compute_version(entries: &[Entry]) -> Result<KnowledgeBaseVersion, serde_json::Error> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.category().cmp(b.category()));

    let canonical = serde_json::to_vec(&sorted)?;
    Ok(KnowledgeBaseVersion::from_content(&canonical))
}
