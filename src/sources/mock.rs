//! Mock backend for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::context::RunContext;
use crate::models::{Document, ResultSet, SearchQuery};
use crate::sources::{QueryError, SearchBackend};

/// A backend that returns a predefined result and records every query.
#[derive(Debug, Default)]
pub struct MockBackend {
    response: Mutex<Option<ResultSet>>,
    error: Mutex<Option<String>>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl MockBackend {
    /// Create a new mock backend that returns empty results
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result to return
    pub fn set_response(&self, response: ResultSet) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(response);
    }

    /// Make every query fail with an API error carrying `message`
    pub fn set_api_error(&self, message: impl Into<String>) {
        let mut guard = self.error.lock().unwrap();
        *guard = Some(message.into());
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    fn name(&self) -> &str {
        "Mock Backend"
    }

    async fn run_query(
        &self,
        query: &SearchQuery,
        _context: &RunContext,
    ) -> Result<ResultSet, QueryError> {
        if query.query.is_empty() {
            return Err(QueryError::InvalidQuery);
        }
        self.queries.lock().unwrap().push(query.clone());

        if let Some(message) = self.error.lock().unwrap().as_ref() {
            return Err(QueryError::Api(message.clone()));
        }
        let guard = self.response.lock().unwrap();
        match &*guard {
            Some(response) => Ok(response.clone()),
            None => Ok(ResultSet::new(0, query.start, Vec::new())),
        }
    }
}

/// Helper function to create a document for testing.
pub fn make_document(bibcode: &str, title: &str, authors: &[&str]) -> Document {
    let mut doc = Document::new(bibcode);
    doc.title = Some(vec![title.to_string()]);
    doc.author = Some(authors.iter().map(|a| a.to_string()).collect());
    doc
}
