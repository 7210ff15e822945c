//! Script handlers.
//!
//! Each handler runs at most one query, renders a complete CGI-framed page
//! and converts it into an HTTP response. Failures render an error page.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use http::StatusCode;
use serde::Deserialize;

use crate::context::RunContext;
use crate::models::{SearchQuery, SortMode};
use crate::render::{
    escape_html, render_abstract, render_table, title_text, LinkKind, PageAssembler,
};
use crate::server::cgi;
use crate::server::AppState;
use crate::sources::QueryError;

/// Parameters of the query script
#[derive(Debug, Default, Deserialize)]
pub struct AbsConnectParams {
    /// Query in ADS syntax
    pub q: Option<String>,
    /// Author name, searched as `author:"<name>"` when `q` is absent
    pub author: Option<String>,
    /// Classic sort name
    pub sort: Option<String>,
    /// Forms send empty fields, so numbers are parsed by the handler
    pub start: Option<String>,
    pub rows: Option<String>,
}

impl AbsConnectParams {
    fn query_text(&self) -> String {
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            return q.to_string();
        }
        match self.author.as_deref().map(str::trim) {
            Some(author) if !author.is_empty() => format!("author:\"{}\"", author),
            _ => String::new(),
        }
    }
}

/// Parse an optional numeric parameter; blank means `default`.
fn numeric_param(name: &str, value: Option<&str>, default: usize) -> Result<usize, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("Invalid value for {}: {}", name, raw)),
    }
}

/// Parameters of the data-query script
#[derive(Debug, Default, Deserialize)]
pub struct DataQueryParams {
    pub bibcode: Option<String>,
    pub link_type: Option<String>,
}

/// Free-form search rendered as a result table.
pub async fn abs_connect(
    State(state): State<AppState>,
    Query(params): Query<AbsConnectParams>,
) -> Response {
    let context = RunContext::start();
    let assembler = PageAssembler::new(context);

    let sort = match params.sort.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => SortMode::from_classic(name),
        None => state.query_defaults.sort(),
    };
    let paging = numeric_param("start", params.start.as_deref(), 0).and_then(|start| {
        numeric_param("rows", params.rows.as_deref(), state.query_defaults.default_rows)
            .map(|rows| (start, rows))
    });
    let (start, rows) = match paging {
        Ok(paging) => paging,
        Err(message) => return error_page(&assembler, StatusCode::BAD_REQUEST, &message),
    };
    let query = SearchQuery::new(params.query_text())
        .sort(sort)
        .start(start)
        .rows(rows);

    match state.backend.run_query(&query, &context).await {
        Ok(result) => {
            let page = format!(
                "{}{}{}",
                assembler.render_header(
                    "ADS query results",
                    &format!("Query results for <i>{}</i>", escape_html(&query.query))
                ),
                render_table(&result, query.start, sort),
                assembler.render_footer(&result, "")
            );
            cgi::into_response(StatusCode::OK, &page)
        }
        Err(err) => query_failure(&assembler, err),
    }
}

/// Per-record data: the abstract view, reference and citation tables, or
/// a redirect to the remote ADS for other link types.
pub async fn data_query(
    State(state): State<AppState>,
    Query(params): Query<DataQueryParams>,
) -> Response {
    let context = RunContext::start();
    let assembler = PageAssembler::new(context);

    let Some(bibcode) = params.bibcode.as_deref().map(str::trim).filter(|b| !b.is_empty()) else {
        return error_page(&assembler, StatusCode::BAD_REQUEST, "Missing bibcode");
    };
    let link_type = params.link_type.as_deref().unwrap_or("ABSTRACT");
    let Some(kind) = LinkKind::from_link_type(link_type) else {
        return error_page(
            &assembler,
            StatusCode::BAD_REQUEST,
            &format!("Unknown link type: {}", link_type),
        );
    };

    match kind {
        LinkKind::Abstract => abstract_page(&state, &assembler, &context, bibcode).await,
        LinkKind::References | LinkKind::Citations => {
            let (query, heading) = if kind == LinkKind::References {
                (SearchQuery::references(bibcode), "References in")
            } else {
                (SearchQuery::citations(bibcode), "Citations to")
            };
            let sort = state.query_defaults.sort();
            let query = query
                .sort(sort)
                .rows(state.query_defaults.default_rows);
            match state.backend.run_query(&query, &context).await {
                Ok(result) => {
                    let page = format!(
                        "{}{}{}",
                        assembler.render_header(
                            &format!("{} {}", heading, escape_html(bibcode)),
                            &format!(
                                "{} <a href=\"{}\">{}</a>",
                                heading,
                                LinkKind::Abstract.data_query_href(bibcode),
                                escape_html(bibcode)
                            )
                        ),
                        render_table(&result, 0, sort),
                        assembler.render_footer(&result, "")
                    );
                    cgi::into_response(StatusCode::OK, &page)
                }
                Err(err) => query_failure(&assembler, err),
            }
        }
        other => Redirect::to(&other.data_query_href(bibcode)).into_response(),
    }
}

async fn abstract_page(
    state: &AppState,
    assembler: &PageAssembler,
    context: &RunContext,
    bibcode: &str,
) -> Response {
    let query = SearchQuery::record(bibcode).sort(None);
    let result = match state.backend.run_query(&query, context).await {
        Ok(result) => result,
        Err(err) => return query_failure(assembler, err),
    };
    let Some(doc) = result.docs.first() else {
        return error_page(
            assembler,
            StatusCode::NOT_FOUND,
            &format!("Record not found: {}", bibcode),
        );
    };
    let page = format!(
        "{}{}{}",
        assembler.render_header(&escape_html(&doc.bibcode), &title_text(doc)),
        render_abstract(doc),
        assembler.render_footer(&result, "")
    );
    cgi::into_response(StatusCode::OK, &page)
}

/// Fallback for unknown paths
pub async fn not_found() -> Response {
    let assembler = PageAssembler::new(RunContext::start());
    error_page(&assembler, StatusCode::NOT_FOUND, "No such page")
}

fn query_failure(assembler: &PageAssembler, err: QueryError) -> Response {
    let status = if err.is_invalid_query() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    };
    tracing::warn!(error = %err, "query failed");
    error_page(assembler, status, &err.to_string())
}

fn error_page(assembler: &PageAssembler, status: StatusCode, message: &str) -> Response {
    cgi::into_response(status, &assembler.render_error(message))
}
