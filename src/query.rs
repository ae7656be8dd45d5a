use crate::error::{Result, SearchError};
use crate::tokenizer::{split_into_words, Tokenizer};
use std::collections::BTreeSet;

/// Parsed query: terms a document must contain and terms it must not.
///
/// Both sets are ordered and de-duplicated, and never hold stop words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_terms: BTreeSet<String>,
    pub minus_terms: BTreeSet<String>,
}

/// One classified query word before stop-word filtering
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(word: &str) -> Result<QueryWord<'_>> {
    let Some(data) = word.strip_prefix('-') else {
        return Ok(QueryWord {
            data: word,
            is_minus: false,
        });
    };

    if data.is_empty() {
        return Err(SearchError::InvalidQuery(
            "minus sign without a term".to_string(),
        ));
    }

    Ok(QueryWord {
        data,
        is_minus: true,
    })
}

impl Query {
    /// Parse raw query text. Words prefixed with `-` become minus terms.
    pub fn parse(text: &str, tokenizer: &Tokenizer) -> Result<Self> {
        let mut query = Query::default();

        for word in split_into_words(text) {
            let query_word = parse_query_word(&word)?;
            if tokenizer.is_stop_word(query_word.data) {
                continue;
            }
            if query_word.is_minus {
                query.minus_terms.insert(query_word.data.to_string());
            } else {
                query.plus_terms.insert(query_word.data.to_string());
            }
        }

        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.plus_terms.is_empty() && self.minus_terms.is_empty()
    }
}
