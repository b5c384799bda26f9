//! Submission routes: mood check-ins and reflections

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{body::Incoming, Request, Response, StatusCode};
use serde::Serialize;
use tracing::{error, warn};

use crate::routes::{error_response, json_response};
use crate::server::AppState;
use crate::services::ingest::{self, SubmitMoodRequest, SubmitReflectionRequest};
use crate::types::EchoError;

/// Body of a successful submission
#[derive(Serialize)]
struct SubmitResponse {
    ok: bool,
    id: String,
}

/// Handle POST /submit-mood
pub async fn handle_submit_mood(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<Full<Bytes>> {
    let payload: SubmitMoodRequest = match read_json(req).await {
        Ok(p) => p,
        Err(response) => return response,
    };

    match ingest::submit_mood(state.store.as_ref(), payload).await {
        Ok(id) => json_response(StatusCode::CREATED, &SubmitResponse { ok: true, id }),
        Err(EchoError::Validation(msg)) => error_response(StatusCode::BAD_REQUEST, &msg),
        Err(e) => {
            error!("Mood write failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

/// Handle POST /submit-reflection
pub async fn handle_submit_reflection(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<Full<Bytes>> {
    let payload: SubmitReflectionRequest = match read_json(req).await {
        Ok(p) => p,
        Err(response) => return response,
    };

    match ingest::submit_reflection(state.store.as_ref(), payload).await {
        Ok(id) => json_response(StatusCode::CREATED, &SubmitResponse { ok: true, id }),
        Err(EchoError::Validation(msg)) => error_response(StatusCode::BAD_REQUEST, &msg),
        Err(e) => {
            // Storage detail is logged, never surfaced
            error!("Reflection write failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to save")
        }
    }
}

/// Collect the request body and parse it into a payload schema
///
/// An empty body is treated as an empty object so that field-level
/// validation produces the specific message ("mood is required" rather
/// than a parse failure).
async fn read_json<T: serde::de::DeserializeOwned + Default>(
    req: Request<Incoming>,
) -> std::result::Result<T, Response<Full<Bytes>>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("Request body error: {}", e);
            return Err(error_response(StatusCode::BAD_REQUEST, "invalid payload"));
        }
    };

    if body.is_empty() {
        return Ok(T::default());
    }

    serde_json::from_slice(&body).map_err(|e| {
        warn!("Request parse error: {}", e);
        error_response(StatusCode::BAD_REQUEST, "invalid payload")
    })
}
