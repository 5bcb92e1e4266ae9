//! Question payload types.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Smallest number of whitespace-separated words a query may contain.
pub const MIN_QUERY_WORDS: usize = 3;

/// A question submitted to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct Question {
    #[validate(custom = "check_req_length")]
    pub query: String,
}

impl Question {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into() }
    }

    /// Number of whitespace-separated words in the query.
    pub fn word_count(&self) -> usize {
        self.query.split_whitespace().count()
    }
}

/// Minimum word count rule, registered on [`Question::query`].
///
/// Runs of any Unicode whitespace count as a single separator, so empty and
/// blank queries have zero words.
pub fn check_req_length(query: &str) -> Result<(), ValidationError> {
    if query.split_whitespace().count() >= MIN_QUERY_WORDS {
        Ok(())
    } else {
        Err(ValidationError::new("check_req_length"))
    }
}
