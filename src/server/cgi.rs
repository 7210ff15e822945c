//! Conversion of CGI-framed page output into HTTP responses.

use axum::response::{IntoResponse, Response};
use http::{HeaderName, HeaderValue, StatusCode};

/// Split CGI output into its header lines and body.
///
/// The header block ends at the first blank line (`\r\n\r\n` or `\n\n`). If
/// the text before it is not made of `Name: value` lines, the whole output
/// is treated as body.
pub fn split_cgi_output(output: &str) -> (Vec<(&str, &str)>, &str) {
    let split = output
        .find("\r\n\r\n")
        .map(|pos| (pos, 4))
        .or_else(|| output.find("\n\n").map(|pos| (pos, 2)));
    let Some((pos, sep_len)) = split else {
        return (Vec::new(), output);
    };

    let head = &output[..pos];
    let headers: Option<Vec<(&str, &str)>> = head
        .lines()
        .map(|line| {
            line.split_once(':')
                .map(|(name, value)| (name.trim(), value.trim()))
        })
        .collect();

    match headers {
        Some(headers) if !headers.is_empty() => (headers, &output[pos + sep_len..]),
        _ => (Vec::new(), output),
    }
}

/// Build a response from CGI output; its headers become HTTP headers.
pub fn into_response(status: StatusCode, output: &str) -> Response {
    let (headers, body) = split_cgi_output(output);
    let mut response = (status, body.to_string()).into_response();
    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                response.headers_mut().insert(name, value);
            }
            _ => tracing::warn!(header = %name, "dropping invalid CGI header"),
        }
    }
    response
}
