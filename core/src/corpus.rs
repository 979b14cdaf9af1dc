use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub type DocId = u32;

/// One persisted corpus entry; the on-disk corpus is a JSON array of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub filename: String,
    pub original_content: String,
    pub preprocessed_content: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
}

/// A document materialized from a corpus snapshot. `id` is the ordinal
/// position at load time; the corpus is append-only, so ids are stable
/// within a snapshot but must not be persisted across loads.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocId,
    pub filename: String,
    pub raw_text: String,
    pub preprocessed_text: String,
    pub tokens: Vec<String>,
    pub created_at: String,
}

impl Document {
    pub fn from_record(id: DocId, record: CorpusRecord) -> Self {
        let tokens = record
            .preprocessed_content
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self {
            id,
            filename: record.filename,
            raw_text: record.original_content,
            preprocessed_text: record.preprocessed_content,
            tokens,
            created_at: record.timestamp,
        }
    }
}

/// Durable, append-only document storage. The search path takes the store as
/// an injected dependency and never touches the backing file directly.
pub trait CorpusStore {
    fn append(&self, record: CorpusRecord) -> Result<()>;

    /// Load a consistent snapshot of the whole corpus. Ids are assigned by
    /// position, so `snapshot[doc.id as usize]` is `doc`.
    fn load_all(&self) -> Result<Vec<Document>>;
}

impl<S: CorpusStore> CorpusStore for Arc<S> {
    fn append(&self, record: CorpusRecord) -> Result<()> {
        (**self).append(record)
    }

    fn load_all(&self) -> Result<Vec<Document>> {
        (**self).load_all()
    }
}
