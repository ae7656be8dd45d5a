use crate::document::{DocumentId, DocumentStatus, Rating};
use crate::error::Result;
use crate::index::{IndexStats, InvertedIndex};
use crate::query::Query;
use crate::ranking::{rank_documents, ScoredDocument};
use crate::tokenizer::Tokenizer;
use tracing::debug;

/// Default number of results returned by a search
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Search options
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of documents a search returns
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: MAX_RESULT_DOCUMENT_COUNT,
        }
    }
}

/// Words of a query found in one document, with the document's status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub words: Vec<String>,
    pub status: DocumentStatus,
}

/// In-memory TF-IDF search server.
///
/// Single writer: documents are appended with [`add_document`](Self::add_document)
/// and queried through `&self`. Wrap it in a lock to share it across threads.
#[derive(Debug, Clone, Default)]
pub struct SearchServer {
    index: InvertedIndex,
    tokenizer: Tokenizer,
    options: SearchOptions,
}

impl SearchServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SearchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Create a server with its stop words configured up front
    pub fn with_stop_words(text: &str) -> Self {
        Self {
            tokenizer: Tokenizer::with_stop_words(text),
            ..Self::default()
        }
    }

    /// Add space-separated stop words.
    ///
    /// Already indexed documents are not re-indexed, so call this before
    /// adding documents.
    pub fn set_stop_words(&mut self, text: &str) {
        self.tokenizer.set_stop_words(text);
    }

    /// Index a document. Fails with `DuplicateId` if `doc_id` is already indexed.
    pub fn add_document(
        &mut self,
        doc_id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        let words = self.tokenizer.analyze(text);
        self.index.insert_document(doc_id, &words, status, ratings)?;
        debug!(doc_id, words = words.len(), %status, "document indexed");
        Ok(())
    }

    /// Top documents with status `Actual`
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents with the given status
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        given_status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>> {
        self.find_top_documents_by(raw_query, |_, status, _| status == given_status)
    }

    /// Top documents accepted by `predicate(id, status, rating)`
    pub fn find_top_documents_by<F>(
        &self,
        raw_query: &str,
        predicate: F,
    ) -> Result<Vec<ScoredDocument>>
    where
        F: Fn(DocumentId, DocumentStatus, Rating) -> bool,
    {
        let query = Query::parse(raw_query, &self.tokenizer)?;
        let results = rank_documents(&query, &self.index, predicate, self.options.limit);
        debug!(
            plus = query.plus_terms.len(),
            minus = query.minus_terms.len(),
            hits = results.len(),
            "search completed"
        );
        Ok(results)
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Plus terms of the query found in the document, in lexicographic order.
    ///
    /// A single minus term found in the document empties the list.
    pub fn match_document(&self, raw_query: &str, doc_id: DocumentId) -> Result<MatchResult> {
        let status = self.index.metadata_for(doc_id)?.status;
        let query = Query::parse(raw_query, &self.tokenizer)?;

        let has_minus = query
            .minus_terms
            .iter()
            .any(|term| self.index.contains(term, doc_id));

        let words = if has_minus {
            Vec::new()
        } else {
            query
                .plus_terms
                .into_iter()
                .filter(|term| self.index.contains(term, doc_id))
                .collect()
        };

        Ok(MatchResult { words, status })
    }

    /// Indexed document ids in ascending order
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.index.document_ids()
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}
