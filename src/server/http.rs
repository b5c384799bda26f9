//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling; one spawned task
//! per connection, match-based routing on method and path.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Args;
use crate::db::store::JournalStore;
use crate::routes;
use crate::types::EchoError;

/// Shared application state
pub struct AppState {
    pub args: Args,
    /// Journal store; the only long-lived connection in the process
    pub store: Arc<dyn JournalStore>,
}

impl AppState {
    pub fn new(args: Args, store: Arc<dyn JournalStore>) -> Self {
        Self { args, store }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), EchoError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Echo Journal listening on {} as node {}",
        state.args.listen, state.args.node_id
    );

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(|q| q.to_string());

    info!("[{}] {} {}", addr, method, path);

    let response = match (method, path.as_str()) {
        // Write path
        (Method::POST, "/submit-mood") => routes::handle_submit_mood(req, state).await,
        (Method::POST, "/submit-reflection") => routes::handle_submit_reflection(req, state).await,

        // Read path
        (Method::GET, "/recent-entries") => {
            routes::handle_recent_entries(state, query.as_deref()).await
        }
        (Method::GET, "/dashboard-data") => {
            routes::handle_dashboard_data(state, query.as_deref()).await
        }

        // Liveness probe
        (Method::GET, "/health") | (Method::GET, "/healthz") => routes::health_check(&state),

        // Version info for deployment verification
        (Method::GET, "/version") => routes::version_info(),

        // CORS preflight
        (Method::OPTIONS, _) => preflight_response(),

        // Not found
        _ => not_found_response(&path),
    };

    Ok(response)
}

/// CORS preflight response
fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap()
}

/// Not found response
fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "path": path,
    });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}
