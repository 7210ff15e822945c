//! ADS search API client.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::context::RunContext;
use crate::models::{Document, QuotaInfo, ResultSet, SearchQuery};
use crate::sources::{QueryError, SearchBackend};
use crate::utils::HttpClient;

/// Production search endpoint
pub const ADS_API_ENDPOINT: &str = "https://api.adsabs.harvard.edu/v1/search/query";

/// Fields requested for every query
pub const CORE_FIELDS: &str =
    "bibcode,author,title,abstract,pubdate,citation_count,reference,links_data,esources,score";

/// Fields appended when the extended record is requested
pub const EXTENDED_FIELDS: &str = "pub_raw,keyword,doi,aff";

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Client for the ADS search API
///
/// Sends the token as `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AdsClient {
    http: HttpClient,
    endpoint: String,
    token: String,
}

impl AdsClient {
    /// Create a client for the production endpoint
    pub fn new(http: HttpClient, token: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: ADS_API_ENDPOINT.to_string(),
            token: token.into(),
        }
    }

    /// Point the client at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Comma-joined field list for a query
    pub fn field_list(extended: bool) -> String {
        if extended {
            format!("{},{}", CORE_FIELDS, EXTENDED_FIELDS)
        } else {
            CORE_FIELDS.to_string()
        }
    }

    /// Query-string parameters for a request
    pub fn request_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.query.clone()),
            ("start", query.start.to_string()),
            ("fl", Self::field_list(query.extended)),
            ("rows", query.rows.to_string()),
        ];
        if let Some(sort) = query.sort {
            params.push(("sort", sort.api_clause().to_string()));
        }
        params
    }

    /// Decode a response body and its headers into a result set.
    ///
    /// An `error` key wins over a `response` key when both are present.
    pub fn parse_response(
        body: &str,
        headers: &HeaderMap,
        context: &RunContext,
    ) -> Result<ResultSet, QueryError> {
        let value: Value = serde_json::from_str(body)?;

        if let Some(error) = value.get("error") {
            let message = error
                .get("msg")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(QueryError::Api(message));
        }

        let Some(response) = value.get("response") else {
            return Err(QueryError::Api(body.to_string()));
        };

        let page: ApiResponse = serde_json::from_value(response.clone())?;

        let query_time = value
            .pointer("/responseHeader/QTime")
            .and_then(Value::as_u64)
            .map(Duration::from_millis)
            .unwrap_or_default();

        let remaining = headers
            .get(RATE_LIMIT_REMAINING)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let reset_in = headers
            .get(RATE_LIMIT_RESET)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<f64>().ok())
            .and_then(|ts| context.until_unix(ts));

        Ok(ResultSet::new(page.num_found, page.start, page.docs).with_quota(QuotaInfo {
            remaining,
            reset_in,
            query_time,
        }))
    }
}

#[async_trait]
impl SearchBackend for AdsClient {
    fn name(&self) -> &str {
        "ADS"
    }

    async fn run_query(
        &self,
        query: &SearchQuery,
        context: &RunContext,
    ) -> Result<ResultSet, QueryError> {
        if query.query.is_empty() {
            return Err(QueryError::InvalidQuery);
        }

        let params = Self::request_params(query);
        tracing::debug!(
            q = %query.query,
            start = query.start,
            rows = query.rows,
            sort = ?query.sort,
            "sending search request"
        );

        let response = self
            .http
            .client()
            .get(&self.endpoint)
            .query(&params)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| QueryError::Network(format!("Failed to query ADS: {}", e)))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Network(format!("Failed to read response: {}", e)))?;

        let result = Self::parse_response(&body, &headers, context).map_err(|err| match err {
            QueryError::Parse(msg) => QueryError::Parse(format!("{} (HTTP {})", msg, status)),
            other => other,
        })?;

        tracing::debug!(
            num_found = result.num_found,
            returned = result.docs.len(),
            "search request completed"
        );
        Ok(result)
    }
}

// ===== ADS API Types =====

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(rename = "numFound", default)]
    num_found: usize,
    #[serde(default)]
    start: usize,
    #[serde(default)]
    docs: Vec<Document>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortMode;
    use chrono::DateTime;
    use reqwest::header::HeaderValue;

    fn context() -> RunContext {
        RunContext::at(DateTime::from_timestamp(1_700_000_000, 0).unwrap())
    }

    #[test]
    fn test_field_list() {
        assert_eq!(AdsClient::field_list(false), CORE_FIELDS);
        assert!(AdsClient::field_list(true).ends_with(",pub_raw,keyword,doi,aff"));
    }

    #[test]
    fn test_request_params_with_sort() {
        let query = SearchQuery::new("dark matter")
            .sort(Some(SortMode::Citations))
            .start(40)
            .rows(20);
        let params = AdsClient::request_params(&query);
        assert!(params.contains(&("q", "dark matter".to_string())));
        assert!(params.contains(&("start", "40".to_string())));
        assert!(params.contains(&("rows", "20".to_string())));
        assert!(params.contains(&("sort", "citation_count desc".to_string())));
    }

    #[test]
    fn test_request_params_without_sort() {
        let query = SearchQuery::new("dark matter").sort(None);
        let params = AdsClient::request_params(&query);
        assert!(params.iter().all(|(k, _)| *k != "sort"));
    }

    #[test]
    fn test_parse_response_success() {
        let body = r#"{
            "responseHeader": {"status": 0, "QTime": 125},
            "response": {"numFound": 2, "start": 0, "docs": [
                {"bibcode": "A"}, {"bibcode": "B", "citation_count": 4}
            ]}
        }"#;
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from_static("4998"));
        headers.insert(RATE_LIMIT_RESET, HeaderValue::from_static("1700007200"));

        let result = AdsClient::parse_response(body, &headers, &context()).unwrap();
        assert_eq!(result.num_found, 2);
        assert_eq!(result.docs.len(), 2);
        assert_eq!(result.docs[1].citation_count, Some(4));
        assert_eq!(result.quota.remaining.as_deref(), Some("4998"));
        assert_eq!(result.quota.reset_in, Some(Duration::from_secs(7200)));
        assert_eq!(result.quota.query_time, Duration::from_millis(125));
    }

    #[test]
    fn test_parse_response_error_takes_precedence() {
        let body = r#"{
            "error": {"msg": "org.apache.solr.search.SyntaxError", "code": 400},
            "response": {"numFound": 1, "start": 0, "docs": [{"bibcode": "A"}]}
        }"#;
        let err = AdsClient::parse_response(body, &HeaderMap::new(), &context()).unwrap_err();
        match err {
            QueryError::Api(msg) => assert_eq!(msg, "org.apache.solr.search.SyntaxError"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_missing_response_carries_body() {
        let body = r#"{"message": "Unauthorized"}"#;
        let err = AdsClient::parse_response(body, &HeaderMap::new(), &context()).unwrap_err();
        match err {
            QueryError::Api(msg) => assert_eq!(msg, body),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_not_json() {
        let err = AdsClient::parse_response("<html>", &HeaderMap::new(), &context()).unwrap_err();
        assert!(matches!(err, QueryError::Parse(_)));
    }

    #[test]
    fn test_parse_response_without_quota_headers() {
        let body = r#"{"response": {"numFound": 0, "start": 0, "docs": []}}"#;
        let result = AdsClient::parse_response(body, &HeaderMap::new(), &context()).unwrap();
        assert_eq!(result.quota.remaining, None);
        assert_eq!(result.quota.reset_in, None);
        assert_eq!(result.quota.query_time, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let client = AdsClient::new(HttpClient::new().unwrap(), "token")
            .with_endpoint("http://127.0.0.1:9/unreachable");
        let err = client
            .run_query(&SearchQuery::new(""), &RunContext::start())
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidQuery));
    }
}
