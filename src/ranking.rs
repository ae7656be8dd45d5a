use crate::document::{DocumentId, DocumentStatus, Rating};
use crate::index::InvertedIndex;
use crate::query::Query;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// Relevances closer than this are treated as equal and ordered by rating
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Ranked search result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: DocumentId,
    pub relevance: f64,
    pub rating: Rating,
}

impl ScoredDocument {
    pub fn new(id: DocumentId, relevance: f64, rating: Rating) -> Self {
        Self { id, relevance, rating }
    }
}

impl fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// IDF: ln(N / df). `document_frequency` must be non-zero.
pub fn inverse_document_frequency(total_documents: usize, document_frequency: usize) -> f64 {
    (total_documents as f64 / document_frequency as f64).ln()
}

/// Score every document hit by a plus term and accepted by `predicate`,
/// then drop every document hit by a minus term.
///
/// The predicate only gates accumulation; minus terms exclude regardless of it.
/// Output is in ascending id order.
pub fn compute_relevance<F>(
    query: &Query,
    index: &InvertedIndex,
    predicate: F,
) -> Vec<ScoredDocument>
where
    F: Fn(DocumentId, DocumentStatus, Rating) -> bool,
{
    let total_documents = index.document_count();
    // doc id -> (relevance, rating)
    let mut document_to_relevance: BTreeMap<DocumentId, (f64, Rating)> = BTreeMap::new();

    for term in &query.plus_terms {
        let Some(postings) = index.postings_for(term) else {
            continue;
        };
        let idf = inverse_document_frequency(total_documents, postings.len());
        trace!(term = %term, idf, "scoring plus term");

        for (&doc_id, &term_freq) in postings {
            let data = index.posted_document(doc_id);
            if predicate(doc_id, data.status, data.rating) {
                document_to_relevance
                    .entry(doc_id)
                    .or_insert((0.0, data.rating))
                    .0 += term_freq * idf;
            }
        }
    }

    for term in &query.minus_terms {
        if let Some(postings) = index.postings_for(term) {
            for doc_id in postings.keys() {
                document_to_relevance.remove(doc_id);
            }
        }
    }

    document_to_relevance
        .into_iter()
        .map(|(doc_id, (relevance, rating))| ScoredDocument::new(doc_id, relevance, rating))
        .collect()
}

/// Sort by descending relevance. Runs of relevances within
/// [`RELEVANCE_EPSILON`] of the run's first entry are ordered by descending
/// rating. Both sorts are stable, so equal entries keep their input order.
pub fn sort_by_relevance(docs: &mut [ScoredDocument]) {
    docs.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));

    let mut start = 0;
    while start < docs.len() {
        let leader = docs[start].relevance;
        let end = docs[start..]
            .iter()
            .position(|d| (leader - d.relevance).abs() >= RELEVANCE_EPSILON)
            .map_or(docs.len(), |offset| start + offset);
        docs[start..end].sort_by(|a, b| b.rating.cmp(&a.rating));
        start = end;
    }
}

/// Score, sort and keep the best `limit` documents
pub fn rank_documents<F>(
    query: &Query,
    index: &InvertedIndex,
    predicate: F,
    limit: usize,
) -> Vec<ScoredDocument>
where
    F: Fn(DocumentId, DocumentStatus, Rating) -> bool,
{
    let mut scored_docs = compute_relevance(query, index, predicate);
    sort_by_relevance(&mut scored_docs);
    scored_docs.truncate(limit);
    scored_docs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{split_into_words, Tokenizer};

    fn build_index(docs: &[(DocumentId, &str, DocumentStatus)]) -> InvertedIndex {
        let mut index = InvertedIndex::new();
        for &(id, text, status) in docs {
            index
                .insert_document(id, &split_into_words(text), status, &[1])
                .unwrap();
        }
        index
    }

    fn parse(text: &str) -> Query {
        Query::parse(text, &Tokenizer::new()).unwrap()
    }

    #[test]
    fn test_idf() {
        assert!((inverse_document_frequency(4, 3) - (4.0f64 / 3.0).ln()).abs() < 1e-12);
        assert_eq!(inverse_document_frequency(5, 5), 0.0);
    }

    #[test]
    fn test_single_term_relevance() {
        let index = build_index(&[
            (1, "cat dog", DocumentStatus::Actual),
            (2, "bird", DocumentStatus::Actual),
            (3, "fish", DocumentStatus::Actual),
        ]);
        let docs = compute_relevance(&parse("cat"), &index, |_, _, _| true);
        assert_eq!(docs.len(), 1);
        assert!((docs[0].relevance - 0.5 * 3.0f64.ln()).abs() < RELEVANCE_EPSILON);
    }

    #[test]
    fn test_predicate_gates_accumulation_only() {
        let index = build_index(&[
            (1, "cat", DocumentStatus::Actual),
            (2, "cat", DocumentStatus::Banned),
            (3, "dog", DocumentStatus::Actual),
        ]);
        let docs = compute_relevance(&parse("cat"), &index, |_, status, _| {
            status == DocumentStatus::Banned
        });
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_scored_documents_carry_rating() {
        let mut index = InvertedIndex::new();
        index
            .insert_document(1, &split_into_words("cat dog"), DocumentStatus::Actual, &[3, 6])
            .unwrap();
        index
            .insert_document(2, &split_into_words("cat"), DocumentStatus::Actual, &[])
            .unwrap();
        index
            .insert_document(3, &split_into_words("owl"), DocumentStatus::Actual, &[1])
            .unwrap();

        let docs = compute_relevance(&parse("cat dog"), &index, |_, _, _| true);
        assert_eq!(docs.iter().map(|d| (d.id, d.rating)).collect::<Vec<_>>(), vec![(1, 4), (2, 0)]);
        let idf_cat = (3.0f64 / 2.0).ln();
        let idf_dog = 3.0f64.ln();
        assert!((docs[0].relevance - (idf_cat + idf_dog) / 2.0).abs() < RELEVANCE_EPSILON);
        assert!((docs[1].relevance - idf_cat).abs() < RELEVANCE_EPSILON);
    }

    #[test]
    fn test_minus_term_excludes() {
        let index = build_index(&[
            (1, "cat city", DocumentStatus::Actual),
            (2, "cat park dog", DocumentStatus::Actual),
        ]);
        let docs = compute_relevance(&parse("cat park -dog"), &index, |_, _, _| true);
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_unknown_terms_contribute_nothing() {
        let index = build_index(&[(1, "cat", DocumentStatus::Actual)]);
        assert!(compute_relevance(&parse("dog -bird"), &index, |_, _, _| true).is_empty());
    }

    #[test]
    fn test_sort_ties_broken_by_rating() {
        let mut docs = vec![
            ScoredDocument::new(1, 0.5, 1),
            ScoredDocument::new(2, 0.9, 0),
            ScoredDocument::new(3, 0.5 + RELEVANCE_EPSILON / 2.0, 7),
            ScoredDocument::new(4, 0.5, 3),
        ];
        sort_by_relevance(&mut docs);
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_sort_outside_epsilon_uses_relevance() {
        let mut docs = vec![
            ScoredDocument::new(1, 0.5, 100),
            ScoredDocument::new(2, 0.5 + 10.0 * RELEVANCE_EPSILON, 0),
        ];
        sort_by_relevance(&mut docs);
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_full_ties_are_stable() {
        let mut docs = vec![
            ScoredDocument::new(5, 0.25, 2),
            ScoredDocument::new(1, 0.25, 2),
            ScoredDocument::new(3, 0.25, 2),
        ];
        sort_by_relevance(&mut docs);
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![5, 1, 3]);
    }

    #[test]
    fn test_rank_truncates() {
        let docs: Vec<(DocumentId, String)> = (0..8).map(|i| (i, format!("cat w{}", i))).collect();
        let mut index = InvertedIndex::new();
        for (id, text) in &docs {
            index
                .insert_document(*id, &split_into_words(text), DocumentStatus::Actual, &[*id])
                .unwrap();
        }
        index
            .insert_document(100, &split_into_words("dog"), DocumentStatus::Actual, &[])
            .unwrap();

        let ranked = rank_documents(&parse("cat"), &index, |_, _, _| true, 5);
        assert_eq!(ranked.len(), 5);
        // equal relevance everywhere, so the highest ratings win
        assert_eq!(ranked.iter().map(|d| d.rating).collect::<Vec<_>>(), vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_display() {
        let doc = ScoredDocument::new(1, 0.5, 2);
        assert_eq!(doc.to_string(), "{ document_id = 1, relevance = 0.5, rating = 2 }");
    }
}
