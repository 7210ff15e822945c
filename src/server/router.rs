use axum::extract::Request;
use axum::http::Uri;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use url::form_urlencoded;

use crate::render::LOCAL_ABS_CONNECT;
use crate::render::LOCAL_DATA_QUERY;
use crate::server::routes;
use crate::server::AppState;

const ABSTRACT_PREFIX: &str = "/abs/";

/// Build the application router.
///
/// The script routes sit behind an outer router whose only job is to run
/// the path rewrite before the inner router dispatches.
pub fn build(state: AppState) -> Router {
    let scripts = Router::new()
        .route(LOCAL_ABS_CONNECT, get(routes::abs_connect))
        .route(LOCAL_DATA_QUERY, get(routes::data_query))
        .fallback(routes::not_found)
        .with_state(state);

    Router::new()
        .fallback_service(scripts)
        .layer(middleware::from_fn(rewrite_abstract_path))
}

async fn rewrite_abstract_path(mut request: Request, next: Next) -> Response {
    if let Some(uri) = request
        .uri()
        .path_and_query()
        .and_then(|pq| rewrite_path(pq.as_str()))
        .and_then(|rewritten| rewritten.parse::<Uri>().ok())
    {
        tracing::debug!(from = %request.uri(), to = %uri, "rewriting abstract path");
        *request.uri_mut() = uri;
    }
    next.run(request).await
}

/// Map `/abs/<bibcode>` to the data-query script's abstract view. Other
/// paths are left alone.
pub fn rewrite_path(path_and_query: &str) -> Option<String> {
    let rest = path_and_query.strip_prefix(ABSTRACT_PREFIX)?;
    let raw = rest.split_once('?').map_or(rest, |(path, _)| path);
    let bibcode = urlencoding::decode(raw).ok()?;
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("link_type", "ABSTRACT")
        .append_pair("bibcode", &bibcode)
        .finish();
    Some(format!("{}?{}", LOCAL_DATA_QUERY, query))
}
