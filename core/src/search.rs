use crate::corpus::{CorpusStore, DocId, Document};
use crate::index::InvertedIndex;
use crate::score::bim_score;
use crate::tokenizer;
use anyhow::Result;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Ranks a corpus against free-text queries. Each query loads one snapshot
/// from the store and builds a fresh index over it, so the postings and the
/// corpus size N used by the scorer are always mutually consistent.
pub struct Searcher<S> {
    store: S,
}

impl<S: CorpusStore> Searcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Rank the corpus against `query`, best match first. Scores only order
    /// the result and are then dropped. An empty or all-stopword query, and
    /// a query matching nothing, both yield an empty list.
    pub fn search(&self, query: &str) -> Result<Vec<Document>> {
        Ok(self
            .search_scored(query)?
            .into_iter()
            .map(|(_, doc)| doc)
            .collect())
    }

    /// Like `search`, but keeps each document's score for display layers.
    pub fn search_scored(&self, query: &str) -> Result<Vec<(f64, Document)>> {
        let query_terms = tokenizer::tokenize(query);
        if query_terms.is_empty() {
            return Ok(Vec::new());
        }

        let docs = self.store.load_all()?;
        let index = InvertedIndex::build(&docs);

        // Union of the query terms' posting sets. Documents containing no
        // query term always score zero, so skipping them cannot change the
        // result.
        let mut candidates: HashSet<DocId> = HashSet::new();
        for term in &query_terms {
            if let Some(postings) = index.postings(term) {
                candidates.extend(postings);
            }
        }
        tracing::debug!(
            terms = query_terms.len(),
            candidates = candidates.len(),
            corpus = docs.len(),
            "scoring candidates"
        );

        let mut scored: Vec<(f64, DocId)> = candidates
            .into_iter()
            .map(|doc_id| (bim_score(&query_terms, doc_id, &index), doc_id))
            .filter(|(score, _)| *score > 0.0)
            .collect();
        // Descending score; equal scores keep corpus insertion order.
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });

        Ok(scored
            .into_iter()
            .map(|(score, doc_id)| (score, docs[doc_id as usize].clone()))
            .collect())
    }
}
