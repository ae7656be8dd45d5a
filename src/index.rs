use crate::document::{DocumentData, DocumentId, DocumentStatus};
use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Term frequencies of one term, keyed by document id
pub type Postings = BTreeMap<DocumentId, f64>;

/// Inverted index: term -> (document id -> term frequency), plus per-document metadata.
///
/// Append-only. Ordered maps keep iteration order, and with it result order
/// among exact ties, identical across runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InvertedIndex {
    index: BTreeMap<String, Postings>,
    documents: BTreeMap<DocumentId, DocumentData>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document given its already analyzed words.
    ///
    /// Each occurrence adds `1 / words.len()` to the term's frequency, so a
    /// document's frequencies sum to 1. A document without words is counted
    /// but gets no postings.
    pub fn insert_document(
        &mut self,
        doc_id: DocumentId,
        words: &[String],
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if self.documents.contains_key(&doc_id) {
            return Err(SearchError::DuplicateId(doc_id));
        }

        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                *self
                    .index
                    .entry(word.clone())
                    .or_default()
                    .entry(doc_id)
                    .or_insert(0.0) += inv_word_count;
            }
        }

        self.documents.insert(doc_id, DocumentData::new(ratings, status));
        Ok(())
    }

    /// Get total number of indexed documents
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Get number of documents containing a term (for IDF calculation)
    pub fn document_frequency(&self, term: &str) -> usize {
        self.index.get(term).map_or(0, |postings| postings.len())
    }

    /// Postings of a term, `None` if the term was never indexed
    pub fn postings_for(&self, term: &str) -> Option<&Postings> {
        self.index.get(term)
    }

    /// Does `term` occur in document `doc_id`
    pub fn contains(&self, term: &str, doc_id: DocumentId) -> bool {
        self.index
            .get(term)
            .map_or(false, |postings| postings.contains_key(&doc_id))
    }

    pub fn metadata_for(&self, doc_id: DocumentId) -> Result<&DocumentData> {
        self.documents
            .get(&doc_id)
            .ok_or(SearchError::NotFound(doc_id))
    }

    /// Metadata of a document taken from this index's postings.
    ///
    /// `insert_document` writes postings and metadata together, so every
    /// posting id has an entry; anything else panics.
    pub(crate) fn posted_document(&self, doc_id: DocumentId) -> &DocumentData {
        &self.documents[&doc_id]
    }

    /// Indexed document ids in ascending order
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_documents: self.documents.len(),
            total_terms: self.index.len(),
            avg_docs_per_term: if self.index.is_empty() {
                0.0
            } else {
                let postings: usize = self.index.values().map(|p| p.len()).sum();
                postings as f64 / self.index.len() as f64
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_documents: usize,
    pub total_terms: usize,
    pub avg_docs_per_term: f64,
}
