//! Dashboard statistics route

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use tracing::error;

use crate::routes::{error_response, json_response, query_param};
use crate::server::AppState;
use crate::services::dashboard::dashboard_data;

/// Handle GET /dashboard-data
pub async fn handle_dashboard_data(
    state: Arc<AppState>,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let user_id = query_param(query, "userId");

    match dashboard_data(state.store.as_ref(), user_id.as_deref(), Utc::now()).await {
        Ok(data) => json_response(StatusCode::OK, &data),
        Err(e) => {
            error!("Dashboard aggregation failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}
