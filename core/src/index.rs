use crate::corpus::{DocId, Document};
use std::collections::{HashMap, HashSet};

/// Term to posting-set mapping over one corpus snapshot. Term presence is
/// binary: duplicate occurrences within a document coalesce, and a term is
/// only keyed at all if some document contains it, so every posting set is
/// non-empty. `num_docs` is captured at build time so scores computed against
/// this index always see the corpus size its postings were built from.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InvertedIndex {
    postings: HashMap<String, HashSet<DocId>>,
    num_docs: u32,
}

impl InvertedIndex {
    /// Full scan over the snapshot. Rebuilt on every query; fine while the
    /// corpus stays small, and the first thing to cache if it doesn't.
    pub fn build(docs: &[Document]) -> Self {
        let mut postings: HashMap<String, HashSet<DocId>> = HashMap::new();
        for doc in docs {
            for term in &doc.tokens {
                postings.entry(term.clone()).or_default().insert(doc.id);
            }
        }
        Self { postings, num_docs: docs.len() as u32 }
    }

    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    /// Document frequency; 0 for terms never seen in the corpus.
    pub fn df(&self, term: &str) -> u32 {
        self.postings.get(term).map_or(0, |set| set.len() as u32)
    }

    pub fn contains(&self, term: &str, doc_id: DocId) -> bool {
        self.postings.get(term).is_some_and(|set| set.contains(&doc_id))
    }

    pub fn postings(&self, term: &str) -> Option<&HashSet<DocId>> {
        self.postings.get(term)
    }
}
