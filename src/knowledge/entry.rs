use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::normalize;
use crate::types::identifiers::CategoryId;

#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("Category identifier must not be empty")]
    EmptyCategory,
    #[error("Entry must declare at least one keyword")]
    NoKeywords,
    #[error("Keyword {0:?} is empty after normalization")]
    EmptyKeyword(String),
    #[error("Keyword {text:?} has invalid weight {weight} (must be finite and > 0)")]
    InvalidWeight { text: String, weight: f64 },
    #[error("Keyword {0:?} is declared twice")]
    DuplicateKeyword(String),
    #[error("Answer must not be empty")]
    EmptyAnswer,
    #[error("Fallback, when present, must not be empty")]
    EmptyFallback,
}

/// A weighted phrase used to detect topical relevance.
///
/// The phrase is held in normalized form so that the gate check, the edit
/// distance and warm-cache keys all see the same alphabet as the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    text: String,
    weight: f64,
    #[serde(skip)]
    parts: Vec<String>,
}

impl Keyword {
    pub fn new(text: &str, weight: f64) -> Result<Self, EntryError> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(EntryError::EmptyKeyword(text.to_string()));
        }
        if !weight.is_finite() || weight <= 0.0 {
            return Err(EntryError::InvalidWeight {
                text: text.to_string(),
                weight,
            });
        }

        let parts = normalized.split_whitespace().map(str::to_string).collect();

        Ok(Keyword {
            text: normalized,
            weight,
            parts,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Space-separated tokens of the phrase.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

/// One topical bucket of the knowledge base.
///
/// Built once at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    category: CategoryId,
    keywords: Vec<Keyword>,
    answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<String>,
}

impl Entry {
    pub fn new(
        category: CategoryId,
        keywords: Vec<Keyword>,
        answer: impl Into<String>,
        fallback: Option<String>,
    ) -> Result<Self, EntryError> {
        let answer = answer.into();

        if category.as_str().trim().is_empty() {
            return Err(EntryError::EmptyCategory);
        }
        if keywords.is_empty() {
            return Err(EntryError::NoKeywords);
        }
        for (i, keyword) in keywords.iter().enumerate() {
            if keywords[..i].iter().any(|k| k.text == keyword.text) {
                return Err(EntryError::DuplicateKeyword(keyword.text.clone()));
            }
        }
        if answer.trim().is_empty() {
            return Err(EntryError::EmptyAnswer);
        }
        if matches!(&fallback, Some(f) if f.trim().is_empty()) {
            return Err(EntryError::EmptyFallback);
        }

        Ok(Entry {
            category,
            keywords,
            answer,
            fallback,
        })
    }

    pub fn category(&self) -> &CategoryId {
        &self.category
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }
}

/// On-disk shape of a keyword, before validation.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawKeyword {
    pub text: String,
    pub weight: f64,
}

/// On-disk shape of an entry, before validation.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawEntry {
    pub category: String,
    pub keywords: Vec<RawKeyword>,
    pub answer: String,
    #[serde(default)]
    pub fallback: Option<String>,
}

impl RawEntry {
    pub(crate) fn into_entry(self) -> Result<Entry, EntryError> {
        let keywords = self
            .keywords
            .iter()
            .map(|k| Keyword::new(&k.text, k.weight))
            .collect::<Result<Vec<_>, _>>()?;

        Entry::new(CategoryId::new(self.category), keywords, self.answer, self.fallback)
    }
}
