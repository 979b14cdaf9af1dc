use crate::corpus::{CorpusRecord, CorpusStore, DocId, Document};
use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Corpus persistence: one pretty-printed JSON array of records. Loads take
/// the shared lock and appends the exclusive one, so a snapshot handed out
/// by `load_all` is internally consistent even with a concurrent writer.
pub struct JsonCorpusStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonCorpusStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf(), lock: RwLock::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty corpus. A file that exists but does not
    /// parse is recovered as empty, with a warning. Any other read failure
    /// surfaces as an error, distinct from "empty corpus".
    fn read_records(&self) -> Result<Vec<CorpusRecord>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading corpus file {}", self.path.display()))
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "corpus file is corrupt, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    fn write_records(&self, records: &[CorpusRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing corpus file {}", self.path.display()))
    }
}

impl CorpusStore for JsonCorpusStore {
    fn append(&self, record: CorpusRecord) -> Result<()> {
        let _guard = self.lock.write();
        let mut records = self.read_records()?;
        records.push(record);
        self.write_records(&records)
    }

    fn load_all(&self) -> Result<Vec<Document>> {
        let _guard = self.lock.read();
        let records = self.read_records()?;
        Ok(records
            .into_iter()
            .enumerate()
            .map(|(i, record)| Document::from_record(i as DocId, record))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(filename: &str, preprocessed: &str) -> CorpusRecord {
        CorpusRecord {
            filename: filename.to_string(),
            original_content: preprocessed.to_string(),
            preprocessed_content: preprocessed.to_string(),
            timestamp: "2024-05-01 10:00:00".to_string(),
        }
    }

    #[test]
    fn missing_file_is_empty_corpus() {
        let dir = tempdir().unwrap();
        let store = JsonCorpusStore::new(dir.path().join("corpus.json"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn append_then_load_assigns_ordinal_ids() {
        let dir = tempdir().unwrap();
        let store = JsonCorpusStore::new(dir.path().join("corpus.json"));
        store.append(record("a.txt", "granite basalt")).unwrap();
        store.append(record("b.txt", "delta meander")).unwrap();

        let docs = store.load_all().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, 0);
        assert_eq!(docs[1].id, 1);
        assert_eq!(docs[0].filename, "a.txt");
        assert_eq!(docs[0].tokens, vec!["granite", "basalt"]);
    }

    #[test]
    fn corrupt_file_is_empty_corpus() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(&path, "{{ not json").unwrap();
        let store = JsonCorpusStore::new(&path);
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn unreadable_path_is_an_error_not_an_empty_corpus() {
        let dir = tempdir().unwrap();
        // The path exists but is a directory, so the read genuinely fails.
        let store = JsonCorpusStore::new(dir.path());
        assert!(store.load_all().is_err());
    }

    #[test]
    fn corrupt_file_recovers_on_next_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(&path, "]]").unwrap();
        let store = JsonCorpusStore::new(&path);
        store.append(record("a.txt", "granite")).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 1);
    }
}
