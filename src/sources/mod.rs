//! Search backends.
//!
//! The [`SearchBackend`] trait is the seam between the HTTP front end and the
//! search API. [`AdsClient`] talks to the real ADS endpoint; [`MockBackend`]
//! returns canned results for tests.
//!
//! A backend answers one query with exactly one upstream request. There are
//! no retries: a failed query surfaces as a [`QueryError`] and the caller
//! renders a failure page.

mod ads;
pub mod mock;

pub use ads::{AdsClient, ADS_API_ENDPOINT, CORE_FIELDS, EXTENDED_FIELDS};
pub use mock::MockBackend;

use crate::context::RunContext;
use crate::models::{ResultSet, SearchQuery};
use async_trait::async_trait;

/// Interface to a bibliographic search service.
#[async_trait]
pub trait SearchBackend: Send + Sync + std::fmt::Debug {
    /// Human-readable name of this backend
    fn name(&self) -> &str;

    /// Run a query and return one page of results.
    ///
    /// Quota reset times are measured from `context`'s start.
    async fn run_query(
        &self,
        query: &SearchQuery,
        context: &RunContext,
    ) -> Result<ResultSet, QueryError>;
}

/// Errors that can occur when running a query
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The query string was empty
    #[error("Empty query")]
    InvalidQuery,

    /// The API reported an error, or returned a body without results
    #[error("API error: {0}")]
    Api(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

impl QueryError {
    /// Whether the error was caused by the caller's input
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, QueryError::InvalidQuery)
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        QueryError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Parse(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(QueryError::InvalidQuery.to_string(), "Empty query");
        assert_eq!(
            QueryError::Api("syntax error".to_string()).to_string(),
            "API error: syntax error"
        );
        assert!(QueryError::InvalidQuery.is_invalid_query());
        assert!(!QueryError::Parse("x".to_string()).is_invalid_query());
    }

    #[test]
    fn test_json_error_converts_to_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(QueryError::from(err), QueryError::Parse(_)));
    }
}
