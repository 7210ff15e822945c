//! Utility modules.
//!
//! - [`HttpClient`]: shared reqwest client with the crate's user agent and timeouts

mod http;

pub use http::{HttpClient, DEFAULT_TIMEOUT};
