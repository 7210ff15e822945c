//! Core data models for queries, results and records.

mod document;
mod search;

pub use document::{Document, LinkData};
pub use search::{QuotaInfo, ResultSet, SearchQuery, SortMode, DEFAULT_ROWS};
