//! Search request and result-set models.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::Document;

/// Result ordering understood by the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortMode {
    /// Relevance score, best first
    Score,
    /// Citation count, most cited first
    Citations,
    /// First author, alphabetical
    Author,
    /// Number of authors, fewest first
    AuthorCount,
    /// Publication date, newest first
    NewestDate,
    /// Publication date, oldest first
    OldestDate,
}

impl SortMode {
    /// Parse the classic sort name (`SCORE`, `CITATIONS`, `AUTHOR`, `AUTHOR_CNT`,
    /// `NDATE`, `ODATE`). Anything else yields `None`, which means the API's
    /// default ordering.
    pub fn from_classic(name: &str) -> Option<Self> {
        match name {
            "SCORE" => Some(SortMode::Score),
            "CITATIONS" => Some(SortMode::Citations),
            "AUTHOR" => Some(SortMode::Author),
            "AUTHOR_CNT" => Some(SortMode::AuthorCount),
            "NDATE" => Some(SortMode::NewestDate),
            "ODATE" => Some(SortMode::OldestDate),
            _ => None,
        }
    }

    /// The classic sort name
    pub fn classic_name(&self) -> &'static str {
        match self {
            SortMode::Score => "SCORE",
            SortMode::Citations => "CITATIONS",
            SortMode::Author => "AUTHOR",
            SortMode::AuthorCount => "AUTHOR_CNT",
            SortMode::NewestDate => "NDATE",
            SortMode::OldestDate => "ODATE",
        }
    }

    /// The sort clause in the API's native syntax
    pub fn api_clause(&self) -> &'static str {
        match self {
            SortMode::Score => "score desc",
            SortMode::Citations => "citation_count desc",
            SortMode::Author => "first_author asc",
            SortMode::AuthorCount => "author_count asc",
            SortMode::NewestDate => "date desc",
            SortMode::OldestDate => "date asc",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.classic_name())
    }
}

/// Default page size
pub const DEFAULT_ROWS: usize = 2000;

/// Search query parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Search expression in ADS query syntax
    pub query: String,

    /// Ordering; `None` leaves the sort clause out entirely
    pub sort: Option<SortMode>,

    /// Offset of the first record to return
    pub start: usize,

    /// Maximum number of records to return
    pub rows: usize,

    /// Also request affiliation, keywords, DOI and the raw publication string
    pub extended: bool,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            sort: Some(SortMode::NewestDate),
            start: 0,
            rows: DEFAULT_ROWS,
            extended: false,
        }
    }
}

impl SearchQuery {
    /// Create a new search query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Query for the papers referenced by `bibcode`
    pub fn references(bibcode: &str) -> Self {
        Self::new(format!("references(bibcode:{})", bibcode))
    }

    /// Query for the papers citing `bibcode`
    pub fn citations(bibcode: &str) -> Self {
        Self::new(format!("citations(bibcode:{})", bibcode))
    }

    /// Query for a single record with all extended fields
    pub fn record(bibcode: &str) -> Self {
        Self::new(format!("bibcode:{}", bibcode))
            .rows(1)
            .extended(true)
    }

    /// Set the sort mode
    pub fn sort(mut self, sort: Option<SortMode>) -> Self {
        self.sort = sort;
        self
    }

    /// Set the start offset
    pub fn start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    /// Set the page size
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Request the extended field set
    pub fn extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }
}

/// Rate-limit and timing metadata captured with a response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotaInfo {
    /// Requests left in the current window (`X-RateLimit-Remaining`)
    pub remaining: Option<String>,

    /// Time until the window resets, measured from the run's start
    pub reset_in: Option<Duration>,

    /// Server-reported query execution time
    pub query_time: Duration,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    /// Total number of matching records
    pub num_found: usize,

    /// Offset of the first returned record
    pub start: usize,

    /// Returned records, in API order
    pub docs: Vec<Document>,

    /// Quota and timing metadata
    pub quota: QuotaInfo,
}

impl ResultSet {
    /// Create a result set without quota metadata
    pub fn new(num_found: usize, start: usize, docs: Vec<Document>) -> Self {
        Self {
            num_found,
            start,
            docs,
            quota: QuotaInfo::default(),
        }
    }

    /// Attach quota metadata
    pub fn with_quota(mut self, quota: QuotaInfo) -> Self {
        self.quota = quota;
        self
    }

    /// Whether more records matched than were returned
    pub fn is_partial(&self) -> bool {
        self.num_found > self.docs.len()
    }
}
