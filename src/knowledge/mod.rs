pub mod entry;
pub mod base;

pub use crate::types::identifiers::{CategoryId, KnowledgeBaseVersion};
pub use entry::{Entry, EntryError, Keyword};
pub use base::{KnowledgeBase, KnowledgeBaseError, KnowledgeBaseManifest};
