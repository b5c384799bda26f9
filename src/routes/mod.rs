//! HTTP routes for Echo Journal

pub mod dashboard;
pub mod entries;
pub mod health;
pub mod journal;

pub use dashboard::handle_dashboard_data;
pub use entries::handle_recent_entries;
pub use health::{health_check, version_info};
pub use journal::{handle_submit_mood, handle_submit_reflection};

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// JSON error body
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Serialize a body into a JSON response
pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(json)))
        .unwrap()
}

/// Error response with a short message
pub(crate) fn error_response(status: StatusCode, error: &str) -> Response<Full<Bytes>> {
    json_response(
        status,
        &ErrorBody {
            error: error.to_string(),
        },
    )
}

/// Extract a query parameter from a raw query string
///
/// Empty values are treated as absent, matching how the dashboard calls
/// these endpoints with `?userId=`.
pub(crate) fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    query
        .and_then(|q| {
            q.split('&')
                .find(|p| p.starts_with(prefix.as_str()))
                .and_then(|p| p.strip_prefix(prefix.as_str()))
        })
        .map(|v| {
            urlencoding::decode(v)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| v.to_string())
        })
        .filter(|v| !v.is_empty())
}
