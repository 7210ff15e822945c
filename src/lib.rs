//! # ads-classic
//!
//! A classic-style web front end for the ADS bibliographic search API.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Document, SearchQuery, ResultSet)
//! - [`sources`]: Search backends behind the [`SearchBackend`] trait
//! - [`render`]: HTML renderers for result tables, abstracts and pages
//! - [`server`]: axum front end serving the query and data-query scripts
//! - [`context`]: Per-run start timestamp
//! - [`utils`]: HTTP client
//! - [`config`]: Configuration management

pub mod config;
pub mod context;
pub mod models;
pub mod render;
pub mod server;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use context::RunContext;
pub use models::{Document, ResultSet, SearchQuery, SortMode};
pub use sources::{AdsClient, QueryError, SearchBackend};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
