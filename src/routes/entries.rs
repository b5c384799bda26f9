//! Recent entries route

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::routes::{json_response, query_param};
use crate::server::AppState;
use crate::services::query::{recent_entries, EntryView};

/// Body of the recent-entries response
#[derive(Serialize)]
struct EntriesResponse {
    entries: Vec<EntryView>,
}

/// Handle GET /recent-entries
///
/// Always answers 200; a degraded store read yields an empty list.
pub async fn handle_recent_entries(
    state: Arc<AppState>,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let user_id = query_param(query, "userId");

    let entries = recent_entries(state.store.as_ref(), user_id.as_deref()).await;

    json_response(StatusCode::OK, &EntriesResponse { entries })
}
