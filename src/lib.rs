pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod ranking;
pub mod tokenizer;

// Re-export commonly used types
pub use document::{DocumentId, DocumentStatus, Rating};
pub use engine::{MatchResult, SearchOptions, SearchServer, MAX_RESULT_DOCUMENT_COUNT};
pub use error::{Result, SearchError};
pub use index::{IndexStats, InvertedIndex};
pub use query::Query;
pub use ranking::{ScoredDocument, RELEVANCE_EPSILON};
pub use tokenizer::Tokenizer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
